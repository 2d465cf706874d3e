pub mod openai;

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde_json::{Map, Value, json};

use crate::models::{ClassificationDocument, ClassificationResult, Thread};

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-4.1-mini";
pub const DEFAULT_MAX_RETRIES: u32 = 2;
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(1);

/// Instruction naming exactly the four fields to extract and their shapes.
pub const SYSTEM_PROMPT: &str = "You are a classifier. Return ONLY JSON. \
    Extract these fields from the thread messages: \
    Incident Number (e.g., INC123456 or empty string if unknown), \
    Root Cause (short phrase), Type (Restart or Error), \
    Severity (High, Med, Low).";

/// One structured-extraction exchange: fixed instruction plus the thread
/// payload. The service returns the parsed reply object; transport failures
/// surface as errors, empty or non-JSON replies as an empty object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionRequest {
    pub system_prompt: String,
    pub user_payload: String,
}

pub trait ExtractionService {
    fn extract(&self, request: &ExtractionRequest) -> Result<Value>;
}

/// Seam for the fixed inter-attempt and inter-thread delays so tests run
/// without real time.
pub trait Sleeper {
    fn sleep(&self, duration: Duration);
}

pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep(&self, duration: Duration) {
        if !duration.is_zero() {
            std::thread::sleep(duration);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassifyOptions {
    /// Additional attempts after the first.
    pub max_retries: u32,
    /// Fixed delay after every failed attempt. No backoff, no jitter.
    pub retry_delay: Duration,
    /// Fixed delay after every thread regardless of outcome.
    pub sleep_between_threads: Duration,
}

impl Default for ClassifyOptions {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            retry_delay: DEFAULT_RETRY_DELAY,
            sleep_between_threads: Duration::ZERO,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClassifyStats {
    pub threads_processed: usize,
    pub failures: usize,
}

pub fn build_request(thread: &Thread) -> Result<ExtractionRequest> {
    let payload = json!({
        "thread_id": thread.thread_id,
        "messages": thread.messages,
    });
    let encoded =
        serde_json::to_string(&payload).context("failed to encode thread payload json")?;

    Ok(ExtractionRequest {
        system_prompt: SYSTEM_PROMPT.to_string(),
        user_payload: format!("JSON input:\n{encoded}"),
    })
}

/// Runs one thread through the bounded-retry attempt loop.
///
/// Exactly `1 + max_retries` attempts at most; the first non-empty extracted
/// object wins, otherwise the most recent error description is recorded.
pub fn classify_thread(
    service: &dyn ExtractionService,
    sleeper: &dyn Sleeper,
    thread: &Thread,
    options: &ClassifyOptions,
) -> Result<ClassificationResult> {
    let request = build_request(thread)?;

    let mut attempt = 0_u32;
    let mut last_error = String::from("no extraction attempted");
    while attempt <= options.max_retries {
        match service.extract(&request) {
            Ok(reply) => {
                if let Some(extraction) = non_empty_object(&reply) {
                    return Ok(ClassificationResult::from_extraction(
                        &thread.thread_id,
                        extraction,
                    ));
                }
                last_error = String::from("empty or invalid JSON extraction");
            }
            Err(error) => {
                last_error = format!("{error:#}");
            }
        }
        attempt += 1;
        sleeper.sleep(options.retry_delay);
    }

    Ok(ClassificationResult::failed(&thread.thread_id, last_error))
}

fn non_empty_object(reply: &Value) -> Option<&Map<String, Value>> {
    let object = reply.as_object()?;
    if object.is_empty() { None } else { Some(object) }
}

/// Classifies threads strictly in order, rewriting the full results artifact
/// after every thread so an interruption loses at most the in-flight thread.
pub fn classify_threads(
    service: &dyn ExtractionService,
    sleeper: &dyn Sleeper,
    threads: &[Thread],
    output_path: &Path,
    options: &ClassifyOptions,
) -> Result<ClassifyStats> {
    let total = threads.len();
    let mut document = ClassificationDocument::default();
    let mut failures = 0_usize;

    for (index, thread) in threads.iter().enumerate() {
        let result = classify_thread(service, sleeper, thread, options)?;
        if result.error.is_some() {
            failures += 1;
        }
        document.results.push(result);
        write_results_artifact(output_path, &document)?;

        sleeper.sleep(options.sleep_between_threads);
        println!(
            "classify: progress {}/{} thread={}",
            index + 1,
            total,
            thread.thread_id
        );
    }

    Ok(ClassifyStats {
        threads_processed: document.results.len(),
        failures,
    })
}

pub fn write_results_artifact(path: &Path, document: &ClassificationDocument) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).context("failed to create results artifact directory")?;
    }

    let encoded = serde_json::to_vec_pretty(document).context("failed to encode results json")?;
    std::fs::write(path, encoded).context("failed to write results artifact")
}

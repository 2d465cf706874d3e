use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Error, Result};
use clap::Args;

use crate::assemble::read_threads_artifact;
use crate::classify::openai::OpenAiClient;
use crate::classify::{
    ClassifyOptions, DEFAULT_BASE_URL, DEFAULT_MAX_RETRIES, DEFAULT_MODEL, DEFAULT_RETRY_DELAY,
    DEFAULT_TIMEOUT_SECS, ThreadSleeper, classify_threads,
};

pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

#[derive(Debug, Clone, Args)]
pub struct ClassifyArgs {
    /// Path to the assembled threads JSON.
    #[arg(long, value_name = "PATH")]
    pub input: PathBuf,

    /// Where to write the classification results JSON.
    #[arg(long, value_name = "PATH")]
    pub output: PathBuf,

    /// Chat-completions API base URL.
    #[arg(long, value_name = "URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Model name.
    #[arg(long, value_name = "NAME", default_value = DEFAULT_MODEL)]
    pub model: String,

    /// Seconds to sleep between threads.
    #[arg(long, value_name = "SECS", default_value_t = 0.0)]
    pub sleep_secs: f64,

    /// Retries per thread after the first attempt.
    #[arg(long, value_name = "N", default_value_t = DEFAULT_MAX_RETRIES)]
    pub max_retries: u32,

    /// Per-request timeout in seconds.
    #[arg(long, value_name = "SECS", default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_secs: u64,
}

/// Marker for configuration errors so `main` can map them to the
/// configuration exit code.
#[derive(Debug)]
pub struct ConfigCommandFailure {
    message: String,
}

impl ConfigCommandFailure {
    #[must_use]
    pub fn new(message: String) -> Self {
        Self { message }
    }
}

impl std::fmt::Display for ConfigCommandFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ConfigCommandFailure {}

pub fn run(args: &ClassifyArgs) -> Result<()> {
    // Resolved before any I/O: a missing credential must fail with no
    // network call attempted.
    let api_key = std::env::var(API_KEY_ENV).map_err(|_| {
        Error::new(ConfigCommandFailure::new(format!(
            "{API_KEY_ENV} environment variable is required"
        )))
    })?;

    println!(
        "classify: start input={} output={} base_url={} model={} sleep_secs={} max_retries={} timeout_secs={}",
        args.input.display(),
        args.output.display(),
        args.base_url,
        args.model,
        args.sleep_secs,
        args.max_retries,
        args.timeout_secs
    );

    let document = read_threads_artifact(&args.input)?;
    println!("classify: checkpoint threads_loaded {}", document.threads.len());

    let client = OpenAiClient::new(
        &args.base_url,
        &args.model,
        &api_key,
        Duration::from_secs(args.timeout_secs),
    )?;
    let options = ClassifyOptions {
        max_retries: args.max_retries,
        retry_delay: DEFAULT_RETRY_DELAY,
        sleep_between_threads: Duration::from_secs_f64(args.sleep_secs.max(0.0)),
    };

    let stats = classify_threads(
        &client,
        &ThreadSleeper,
        &document.threads,
        &args.output,
        &options,
    )?;

    println!(
        "classify: complete results_written={} failures={} output={}",
        stats.threads_processed,
        stats.failures,
        args.output.display()
    );

    Ok(())
}

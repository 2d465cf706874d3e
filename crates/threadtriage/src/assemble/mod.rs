use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::models::export;
use crate::models::{Thread, ThreadDocument, ThreadMessage};
use crate::utils::content;
use crate::utils::time::{SortKey, sort_key};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AssembleOptions {
    /// Keep raw markup instead of stripping tags and decoding entities.
    pub keep_html: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AssembleStats {
    pub input_messages: usize,
    pub skipped_without_conversation: usize,
    pub threads_written: usize,
    pub messages_written: usize,
}

struct ThreadBucket {
    thread_id: String,
    messages: Vec<(SortKey, ThreadMessage)>,
}

/// Groups export messages into anonymized, chronologically ordered threads.
///
/// Messages without a conversation id are skipped and counted. Buckets keep
/// first-sight order so that threads with equal sort keys stay in input order
/// under the final stable sort.
pub fn assemble_threads(
    input: &str,
    options: &AssembleOptions,
) -> Result<(ThreadDocument, AssembleStats)> {
    let messages = export::parse_export(input)?;

    let mut buckets: Vec<ThreadBucket> = Vec::new();
    let mut bucket_index: HashMap<String, usize> = HashMap::new();
    let mut skipped_without_conversation = 0_usize;

    for message in &messages {
        let Some(conversation_id) = export::conversation_id(message) else {
            skipped_without_conversation += 1;
            continue;
        };

        let index = match bucket_index.get(conversation_id) {
            Some(index) => *index,
            None => {
                bucket_index.insert(conversation_id.to_string(), buckets.len());
                buckets.push(ThreadBucket {
                    thread_id: conversation_id.to_string(),
                    messages: Vec::new(),
                });
                buckets.len() - 1
            }
        };

        let body = export::body_content(message);
        let text = if options.keep_html {
            body.to_string()
        } else {
            content::strip_markup(body)
        };
        let key = sort_key(export::created_date_time(message));
        buckets[index].messages.push((key, ThreadMessage::new(text)));
    }

    for bucket in &mut buckets {
        bucket.messages.sort_by(|a, b| a.0.cmp(&b.0));
    }
    buckets.sort_by(|a, b| thread_sort_key(a).cmp(thread_sort_key(b)));

    let mut messages_written = 0_usize;
    let threads = buckets
        .into_iter()
        .map(|bucket| {
            messages_written += bucket.messages.len();
            Thread {
                thread_id: bucket.thread_id,
                messages: bucket
                    .messages
                    .into_iter()
                    .map(|(_, message)| message)
                    .collect(),
            }
        })
        .collect::<Vec<Thread>>();

    let stats = AssembleStats {
        input_messages: messages.len(),
        skipped_without_conversation,
        threads_written: threads.len(),
        messages_written,
    };

    Ok((ThreadDocument { threads }, stats))
}

fn thread_sort_key(bucket: &ThreadBucket) -> &SortKey {
    static MISSING: SortKey = SortKey {
        epoch_seconds: 0,
        raw: String::new(),
    };
    bucket
        .messages
        .first()
        .map_or(&MISSING, |(key, _)| key)
}

pub fn write_threads_artifact(path: &Path, document: &ThreadDocument) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).context("failed to create threads artifact directory")?;
    }

    let encoded = serde_json::to_vec_pretty(document).context("failed to encode threads json")?;
    std::fs::write(path, encoded).context("failed to write threads artifact")
}

pub fn read_threads_artifact(path: &Path) -> Result<ThreadDocument> {
    let input = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read threads artifact: {}", path.display()))?;
    serde_json::from_str(&input).context("threads artifact must be valid threads JSON")
}

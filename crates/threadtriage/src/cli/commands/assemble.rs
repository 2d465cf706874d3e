use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use crate::assemble::{AssembleOptions, assemble_threads, write_threads_artifact};

#[derive(Debug, Clone, Args)]
pub struct AssembleArgs {
    /// Path to the raw export (messages.json).
    #[arg(long, value_name = "PATH")]
    pub input: PathBuf,

    /// Where to write the anonymized threads JSON.
    #[arg(long, value_name = "PATH")]
    pub output: PathBuf,

    /// Keep raw HTML content instead of stripping tags.
    #[arg(long, default_value_t = false)]
    pub keep_html: bool,
}

pub fn run(args: &AssembleArgs) -> Result<()> {
    println!(
        "assemble: start input={} output={} keep_html={}",
        args.input.display(),
        args.output.display(),
        args.keep_html
    );

    let input = std::fs::read_to_string(&args.input)
        .with_context(|| format!("failed to read export file: {}", args.input.display()))?;
    let options = AssembleOptions {
        keep_html: args.keep_html,
    };
    let (document, stats) = assemble_threads(&input, &options)?;
    write_threads_artifact(&args.output, &document)?;

    println!(
        "assemble: complete input_messages={} skipped_without_conversation={} threads_written={} messages_written={} output={}",
        stats.input_messages,
        stats.skipped_without_conversation,
        stats.threads_written,
        stats.messages_written,
        args.output.display()
    );

    Ok(())
}

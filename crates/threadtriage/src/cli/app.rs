use clap::{Parser, Subcommand};

use super::commands::{assemble::AssembleArgs, classify::ClassifyArgs};

#[derive(Debug, Parser)]
#[command(
    name = "threadtriage",
    version,
    about = "Chat-export thread assembly and incident classification"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Group an export into anonymized, chronologically ordered threads.
    Assemble(AssembleArgs),
    /// Extract incident metadata from assembled threads via an external service.
    Classify(ClassifyArgs),
}

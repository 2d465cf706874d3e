#![forbid(unsafe_code)]

pub mod assemble;
pub mod classify;
pub mod cli;
pub mod models;
pub mod utils;

pub use cli::app::{Cli, Command};

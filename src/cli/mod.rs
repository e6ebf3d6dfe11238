//! Command-line interface

pub mod output;

use crate::sink;
use clap::{Args, Parser, Subcommand};
use std::ffi::OsString;

/// Sequential multi-stage LLM pipeline runner
#[derive(Debug, Parser, Clone)]
#[command(name = "seqpipe")]
#[command(version = "0.1.0")]
#[command(about = "Run a question through a sequential LLM stage pipeline", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available commands
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Run a pipeline with a question
    Ask(AskCommand),

    /// Validate a pipeline configuration
    Validate(ValidateCommand),
}

/// Run a pipeline with a question
#[derive(Debug, Args, Clone)]
pub struct AskCommand {
    /// The question to run through the pipeline
    pub question: String,

    /// Path to a pipeline YAML file (defaults to the built-in science
    /// pipeline)
    #[arg(short, long)]
    pub file: Option<String>,

    /// Application name the session is scoped to
    #[arg(long, default_value = "DataPipelineApp")]
    pub app: String,

    /// Session identifier; reusing one carries prior stage outputs forward
    #[arg(long, default_value = "session1")]
    pub session: String,

    /// User identifier
    #[arg(long, default_value = "user1")]
    pub user: String,

    /// Folder the result file is written to
    #[arg(short, long, default_value = sink::DEFAULT_FOLDER)]
    pub output: String,

    /// Result filename
    #[arg(long, default_value = sink::DEFAULT_FILENAME)]
    pub filename: String,

    /// Print the result without writing a file
    #[arg(long)]
    pub no_save: bool,
}

/// Validate a pipeline configuration
#[derive(Debug, Args, Clone)]
pub struct ValidateCommand {
    /// Path to pipeline YAML file
    #[arg(short, long)]
    pub file: String,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    /// Parse CLI arguments from the environment
    pub fn from_args() -> Self {
        Self::parse()
    }

    /// Parse CLI arguments from a slice
    pub fn try_parse_from<I, T>(itr: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        <Self as Parser>::try_parse_from(itr)
    }
}

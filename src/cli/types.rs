//! CLI type definitions
//!
//! This module contains clap command structures that define the CLI interface.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use super::commands::ask::AskArgs;
use super::commands::build::BuildArgs;
use super::commands::history::HistoryArgs;
use super::commands::search::SearchArgs;
use super::commands::tasks::{ExplainArgs, QuizArgs, SummaryArgs};

/// Top-level arguments
#[derive(Parser, Debug)]
#[command(name = "pdf-analyst")]
#[command(about = "PDF Analyst - question answering, summaries and quizzes over your PDFs", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    /// Command to run
    pub command: Commands,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,

    /// Configuration file (defaults to .pdf-analyst/config.yaml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Use the local hashing embedder and an echoing generator instead of HTTP models
    #[arg(long, global = true)]
    pub offline: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Extract, chunk, embed and index PDF files
    Build(BuildArgs),

    /// Ask a question answered from the indexed documents
    Ask(AskArgs),

    /// Summarize the indexed documents
    Summary(SummaryArgs),

    /// Generate a quiz from the indexed documents
    Quiz(QuizArgs),

    /// Explain a topic using the indexed documents
    Explain(ExplainArgs),

    /// Show the chunks retrieved for a query without generating
    Search(SearchArgs),

    /// Show or clear the chat history
    History(HistoryArgs),
}

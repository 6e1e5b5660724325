//! Implementation of the document-level `summary`, `quiz` and `explain` commands.

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use crate::cli::output::progress::{create_spinner, ProgressBarExt};
use crate::cli::output::{output, CommandOutput};
use crate::domain::models::{Config, ExplainStyle, QuizKind};
use crate::services::RagAnswer;

use super::{build_service, ensure_index};

#[derive(Args, Debug)]
pub struct SummaryArgs {
    /// Number of chunks to retrieve (defaults to retrieval.task_top_k)
    #[arg(short = 'k', long)]
    pub top_k: Option<usize>,
}

#[derive(Args, Debug)]
pub struct QuizArgs {
    /// Question format: mcq or short-answer
    #[arg(long, default_value = "mcq")]
    pub kind: QuizKind,

    /// Number of chunks to retrieve (defaults to retrieval.task_top_k)
    #[arg(short = 'k', long)]
    pub top_k: Option<usize>,
}

#[derive(Args, Debug)]
pub struct ExplainArgs {
    /// Topic to explain
    pub topic: String,

    /// Explanation style: simple, expert or examples
    #[arg(long, default_value = "simple")]
    pub style: ExplainStyle,

    /// Number of chunks to retrieve (defaults to retrieval.task_top_k)
    #[arg(short = 'k', long)]
    pub top_k: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct TaskOutput {
    pub task: String,
    pub text: String,
    pub chunks_used: usize,
}

impl TaskOutput {
    fn new(task: impl Into<String>, answer: RagAnswer) -> Self {
        Self {
            task: task.into(),
            text: answer.text,
            chunks_used: answer.results.len(),
        }
    }
}

impl CommandOutput for TaskOutput {
    fn to_human(&self) -> String {
        self.text.clone()
    }
}

pub async fn execute_summary(
    args: SummaryArgs,
    config: &Config,
    offline: bool,
    json_mode: bool,
) -> Result<()> {
    let rag = build_service(config, offline)?;
    ensure_index(&rag).await?;

    let spinner = create_spinner("Summarizing...", json_mode);
    let result = rag.summarize(args.top_k).await;
    finish(spinner, result, "summary", json_mode)
}

pub async fn execute_quiz(args: QuizArgs, config: &Config, offline: bool, json_mode: bool) -> Result<()> {
    let rag = build_service(config, offline)?;
    ensure_index(&rag).await?;

    let spinner = create_spinner("Writing quiz...", json_mode);
    let result = rag.quiz(args.kind, args.top_k).await;
    finish(spinner, result, &format!("quiz ({})", args.kind), json_mode)
}

pub async fn execute_explain(
    args: ExplainArgs,
    config: &Config,
    offline: bool,
    json_mode: bool,
) -> Result<()> {
    let rag = build_service(config, offline)?;
    ensure_index(&rag).await?;

    let spinner = create_spinner(format!("Explaining {}...", args.topic), json_mode);
    let result = rag.explain(&args.topic, args.style, args.top_k).await;
    finish(spinner, result, &format!("explain ({})", args.style), json_mode)
}

fn finish(
    spinner: indicatif::ProgressBar,
    result: crate::domain::errors::DomainResult<RagAnswer>,
    task: &str,
    json_mode: bool,
) -> Result<()> {
    match result {
        Ok(answer) => {
            spinner.finish_and_clear();
            output(&TaskOutput::new(task, answer), json_mode);
            Ok(())
        }
        Err(e) => {
            spinner.finish_error("Failed");
            Err(e).with_context(|| format!("Failed to run {task}"))
        }
    }
}

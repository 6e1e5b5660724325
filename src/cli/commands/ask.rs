//! Implementation of the `pdf-analyst ask` command.

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use crate::cli::output::progress::{create_spinner, ProgressBarExt};
use crate::cli::output::{output, CommandOutput};
use crate::domain::models::{Config, SearchResult};
use crate::services::{ChatHistory, ChatRole};

use super::{build_service, ensure_index};

#[derive(Args, Debug)]
pub struct AskArgs {
    /// Question to answer from the indexed documents
    pub question: String,

    /// Number of chunks to retrieve (defaults to retrieval.top_k)
    #[arg(short = 'k', long)]
    pub top_k: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct AskOutput {
    pub question: String,
    pub answer: String,
    pub sources: Vec<SearchResult>,
}

impl CommandOutput for AskOutput {
    fn to_human(&self) -> String {
        let mut lines = vec![self.answer.clone()];
        if !self.sources.is_empty() {
            lines.push("\nSources:".to_string());
            for source in &self.sources {
                lines.push(format!(
                    "  {}. {} (page {})",
                    source.rank, source.chunk.filename, source.chunk.page_number
                ));
            }
        }
        lines.join("\n")
    }
}

pub async fn execute(args: AskArgs, config: &Config, offline: bool, json_mode: bool) -> Result<()> {
    let rag = build_service(config, offline)?;
    ensure_index(&rag).await?;

    let mut history = ChatHistory::load(&config.history.path);
    history.append(ChatRole::User, &args.question)?;

    let spinner = create_spinner("Thinking...", json_mode);
    let answer = match rag.answer(&args.question, args.top_k).await {
        Ok(answer) => answer,
        Err(e) => {
            spinner.finish_error("Failed");
            return Err(e).context("Failed to answer question");
        }
    };
    spinner.finish_and_clear();

    history.append(ChatRole::Assistant, &answer.text)?;

    output(
        &AskOutput {
            question: args.question,
            answer: answer.text,
            sources: answer.results,
        },
        json_mode,
    );
    Ok(())
}

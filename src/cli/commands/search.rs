//! Implementation of the `pdf-analyst search` command.

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use crate::cli::output::{output, CommandOutput, TableFormatter};
use crate::domain::models::{Config, SearchResult};

use super::{build_service, ensure_index};

#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Text to search for
    pub query: String,

    /// Number of results (defaults to retrieval.top_k)
    #[arg(short = 'k', long)]
    pub top_k: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct SearchOutput {
    pub query: String,
    pub results: Vec<SearchResult>,
}

impl CommandOutput for SearchOutput {
    fn to_human(&self) -> String {
        if self.results.is_empty() {
            return "No matching chunks.".to_string();
        }
        TableFormatter::new().format_results(&self.results)
    }
}

pub async fn execute(args: SearchArgs, config: &Config, offline: bool, json_mode: bool) -> Result<()> {
    let rag = build_service(config, offline)?;
    ensure_index(&rag).await?;

    let top_k = args.top_k.unwrap_or(config.retrieval.top_k);
    let context = rag
        .retrieve(&args.query, top_k)
        .await
        .context("Failed to search knowledge base")?;

    output(
        &SearchOutput {
            query: args.query,
            results: context.results,
        },
        json_mode,
    );
    Ok(())
}

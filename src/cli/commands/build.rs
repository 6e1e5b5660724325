//! Implementation of the `pdf-analyst build` command.

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;

use crate::cli::output::progress::{create_spinner, ProgressBarExt};
use crate::cli::output::{output, CommandOutput};
use crate::domain::models::Config;
use crate::infrastructure::pdf::PdfLoader;
use crate::services::BuildReport;

use super::build_service;

#[derive(Args, Debug)]
pub struct BuildArgs {
    /// PDF files to index
    #[arg(required = true)]
    pub pdfs: Vec<PathBuf>,
}

#[derive(Debug, Serialize)]
pub struct BuildOutput {
    pub files: Vec<PathBuf>,
    #[serde(flatten)]
    pub report: BuildReport,
    pub index_dir: String,
}

impl CommandOutput for BuildOutput {
    fn to_human(&self) -> String {
        let mut lines = vec![format!(
            "Knowledge base built from {} file(s) in {}",
            self.files.len(),
            self.index_dir
        )];
        lines.push(format!("  Pages:   {}", self.report.pages));
        lines.push(format!("  Chunks:  {}", self.report.chunks));
        lines.push(format!("  Entries: {}", self.report.entries));
        if self.report.chunks == 0 {
            lines.push("\nNo extractable text was found in the given files.".to_string());
        }
        lines.join("\n")
    }
}

pub async fn execute(args: BuildArgs, config: &Config, offline: bool, json_mode: bool) -> Result<()> {
    let rag = build_service(config, offline)?;

    let spinner = create_spinner("Extracting pages...", json_mode);
    let paths = args.pdfs.clone();
    let extracted = tokio::task::spawn_blocking(move || PdfLoader::new().load_files(&paths))
        .await
        .context("PDF extraction task panicked")?;
    let pages = match extracted {
        Ok(pages) => pages,
        Err(e) => {
            spinner.finish_error("Extraction failed");
            return Err(e).context("Failed to extract PDF pages");
        }
    };

    spinner.set_message(format!("Embedding and indexing {} page(s)...", pages.len()));
    let report = match rag.build_knowledge_base(&pages).await {
        Ok(report) => report,
        Err(e) => {
            spinner.finish_error("Indexing failed");
            return Err(e).context("Failed to build knowledge base");
        }
    };
    spinner.finish_success("Knowledge base ready");

    output(
        &BuildOutput {
            files: args.pdfs,
            report,
            index_dir: config.index.dir.clone(),
        },
        json_mode,
    );
    Ok(())
}

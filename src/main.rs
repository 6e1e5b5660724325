//! PDF Analyst CLI entry point.

use anyhow::{Context, Result};
use clap::Parser;

use pdf_analyst::cli::commands::{ask, build, history, search, tasks};
use pdf_analyst::cli::{Cli, Commands};
use pdf_analyst::domain::models::Config;
use pdf_analyst::infrastructure::config::ConfigLoader;
use pdf_analyst::infrastructure::logging::{LogConfig, LoggerImpl};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(err) => pdf_analyst::cli::handle_error(err, cli.json),
    };

    // Held for the whole run so buffered file logs are flushed on exit
    let _logger = match LogConfig::from_settings(&config.logging).and_then(|c| LoggerImpl::init(&c)) {
        Ok(logger) => logger,
        Err(err) => pdf_analyst::cli::handle_error(err, cli.json),
    };

    tracing::debug!(command = ?cli.command, offline = cli.offline, "starting");

    let json = cli.json;
    let offline = cli.offline;
    let result = match cli.command {
        Commands::Build(args) => build::execute(args, &config, offline, json).await,
        Commands::Ask(args) => ask::execute(args, &config, offline, json).await,
        Commands::Summary(args) => tasks::execute_summary(args, &config, offline, json).await,
        Commands::Quiz(args) => tasks::execute_quiz(args, &config, offline, json).await,
        Commands::Explain(args) => tasks::execute_explain(args, &config, offline, json).await,
        Commands::Search(args) => search::execute(args, &config, offline, json).await,
        Commands::History(args) => history::execute(args, &config, json).await,
    };

    if let Err(err) = result {
        pdf_analyst::cli::handle_error(err, json);
    }
}

fn load_config(cli: &Cli) -> Result<Config> {
    match &cli.config {
        Some(path) => ConfigLoader::load_from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display())),
        None => ConfigLoader::load().context("Failed to load configuration"),
    }
}

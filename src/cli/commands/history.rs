//! Implementation of the `pdf-analyst history` command.

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use crate::cli::output::{output, CommandOutput, TableFormatter};
use crate::domain::models::Config;
use crate::services::{ChatHistory, ChatMessage};

#[derive(Args, Debug)]
pub struct HistoryArgs {
    /// Delete all stored messages
    #[arg(long)]
    pub clear: bool,
}

#[derive(Debug, Serialize)]
pub struct HistoryOutput {
    pub cleared: bool,
    pub messages: Vec<ChatMessage>,
}

impl CommandOutput for HistoryOutput {
    fn to_human(&self) -> String {
        if self.cleared {
            "Chat history cleared.".to_string()
        } else if self.messages.is_empty() {
            "No chat history.".to_string()
        } else {
            TableFormatter::new().format_history(&self.messages)
        }
    }
}

pub async fn execute(args: HistoryArgs, config: &Config, json_mode: bool) -> Result<()> {
    let mut history = ChatHistory::load(&config.history.path);

    if args.clear {
        history.clear()?;
    }

    output(
        &HistoryOutput {
            cleared: args.clear,
            messages: history.messages().to_vec(),
        },
        json_mode,
    );
    Ok(())
}

//! Table output formatting for CLI commands
//!
//! Formats retrieval results and chat history using comfy-table.

use comfy_table::{presets, Attribute, Cell, Color, ContentArrangement, Table};

use super::truncate;
use crate::domain::models::SearchResult;
use crate::services::{ChatMessage, ChatRole};

/// Table formatter for CLI output
pub struct TableFormatter {
    /// Whether to use colors in output
    use_colors: bool,
    /// Maximum width for tables (None = auto)
    max_width: Option<u16>,
}

impl TableFormatter {
    /// Create a new table formatter
    pub fn new() -> Self {
        Self {
            use_colors: console::colors_enabled(),
            max_width: None,
        }
    }

    /// Create a new table formatter with custom settings
    pub fn with_config(use_colors: bool, max_width: Option<u16>) -> Self {
        Self {
            use_colors,
            max_width,
        }
    }

    /// Format ranked search results
    pub fn format_results(&self, results: &[SearchResult]) -> String {
        let mut table = self.create_base_table();
        table.set_header(vec![
            header("Rank"),
            header("Distance"),
            header("File"),
            header("Page"),
            header("Content"),
        ]);

        for result in results {
            let rank = if self.use_colors && result.rank == 1 {
                Cell::new(result.rank).fg(Color::Green)
            } else {
                Cell::new(result.rank)
            };

            table.add_row(vec![
                rank,
                Cell::new(format!("{:.4}", result.distance)),
                Cell::new(&result.chunk.filename),
                Cell::new(result.chunk.page_number),
                Cell::new(truncate(&result.chunk.content.replace('\n', " "), 80)),
            ]);
        }

        table.to_string()
    }

    /// Format chat history messages
    pub fn format_history(&self, messages: &[ChatMessage]) -> String {
        let mut table = self.create_base_table();
        table.set_header(vec![header("Role"), header("Time"), header("Message")]);

        for message in messages {
            let role = if self.use_colors {
                Cell::new(message.role).fg(match message.role {
                    ChatRole::User => Color::Cyan,
                    ChatRole::Assistant => Color::Yellow,
                })
            } else {
                Cell::new(message.role)
            };
            let time = message
                .timestamp
                .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_else(|| "-".to_string());

            table.add_row(vec![
                role,
                Cell::new(time),
                Cell::new(truncate(&message.content, 200)),
            ]);
        }

        table.to_string()
    }

    fn create_base_table(&self) -> Table {
        let mut table = Table::new();

        // Use UTF-8 preset for nice borders
        table
            .load_preset(presets::UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic);

        if let Some(width) = self.max_width {
            table.set_width(width);
        }

        table
    }
}

impl Default for TableFormatter {
    fn default() -> Self {
        Self::new()
    }
}

fn header(text: &str) -> Cell {
    Cell::new(text).add_attribute(Attribute::Bold)
}

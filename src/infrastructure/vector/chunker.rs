//! Page chunking
//!
//! Splits page text into overlapping, size-bounded spans. Split points are
//! tried in the configured separator order (paragraph, line, sentence,
//! word) and a hard character cut is the last resort.

use crate::domain::errors::ChunkingError;
use crate::domain::models::{Chunk, ChunkingConfig, PageRecord};

/// A trimmed span of the source text. `&text[start..end] == content`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextSpan<'a> {
    /// Byte offset of the first character
    pub start: usize,
    /// Byte offset one past the last character
    pub end: usize,
    /// The span text
    pub content: &'a str,
}

/// Character-budget text chunker
///
/// Sizes and overlaps are counted in characters, not bytes. Every emitted
/// span is a contiguous substring of its page.
#[derive(Debug, Clone)]
pub struct Chunker {
    config: ChunkingConfig,
}

impl Chunker {
    /// Create a new chunker with default configuration
    pub fn new() -> Result<Self, ChunkingError> {
        Self::with_config(ChunkingConfig::default())
    }

    /// Create a new chunker with custom configuration
    pub fn with_config(config: ChunkingConfig) -> Result<Self, ChunkingError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The active configuration
    pub fn config(&self) -> &ChunkingConfig {
        &self.config
    }

    /// Split pages into chunks, preserving page order and attribution.
    pub fn split(&self, pages: &[PageRecord]) -> Vec<Chunk> {
        let mut chunks = Vec::new();

        for page in pages {
            for span in self.spans(&page.text) {
                chunks.push(Chunk {
                    filename: page.filename.clone(),
                    page_number: page.page_number,
                    content: span.content.to_string(),
                });
            }
        }

        tracing::debug!(
            pages = pages.len(),
            chunks = chunks.len(),
            chunk_size = self.config.chunk_size,
            chunk_overlap = self.config.chunk_overlap,
            "split pages into chunks"
        );

        chunks
    }

    /// Split raw text into chunk strings
    pub fn split_text<'a>(&self, text: &'a str) -> Vec<&'a str> {
        self.spans(text).into_iter().map(|span| span.content).collect()
    }

    /// Split raw text into spans with their byte offsets
    pub fn spans<'a>(&self, text: &'a str) -> Vec<TextSpan<'a>> {
        let mut spans = Vec::new();
        if text.trim().is_empty() {
            return spans;
        }

        // bounds[i] is the byte offset of char i; the last entry is text.len()
        let bounds: Vec<usize> = text
            .char_indices()
            .map(|(i, _)| i)
            .chain(std::iter::once(text.len()))
            .collect();
        let total = bounds.len() - 1;

        let mut start = skip_whitespace(text, &bounds, 0);
        loop {
            let window_end = (start + self.config.chunk_size).min(total);
            let end = if window_end == total {
                total
            } else {
                self.find_split(text, &bounds, start, window_end)
            };

            if let Some(span) = trimmed_span(text, bounds[start], bounds[end]) {
                spans.push(span);
            }

            if end >= total || text[bounds[end]..].trim().is_empty() {
                break;
            }

            // find_split guarantees end > start + overlap
            start = skip_whitespace(text, &bounds, end - self.config.chunk_overlap);
        }

        spans
    }

    /// Pick the chunk end (char index) for a window starting at `start`.
    ///
    /// The end must leave room for the overlap so the next window advances.
    fn find_split(&self, text: &str, bounds: &[usize], start: usize, window_end: usize) -> usize {
        let total = bounds.len() - 1;
        let min_end = start + self.config.chunk_overlap;

        for separator in self.config.separators.iter().filter(|s| !s.is_empty()) {
            let separator_chars = separator.chars().count();
            // Whitespace separators are dropped, punctuation stays with the chunk
            let keep = !separator.trim().is_empty();

            let region_end = if keep {
                window_end
            } else {
                (window_end + separator_chars).min(total)
            };
            let region = &text[bounds[start]..bounds[region_end]];

            if let Some(byte_pos) = region.rfind(separator.as_str()) {
                let absolute = bounds[start] + byte_pos;
                let position = bounds.binary_search(&absolute).unwrap_or_else(|i| i);
                let end = if keep {
                    position + separator_chars
                } else {
                    position
                };

                if end > min_end {
                    return end;
                }
            }
        }

        window_end
    }
}

/// Advance `pos` (a char index) past whitespace.
fn skip_whitespace(text: &str, bounds: &[usize], mut pos: usize) -> usize {
    let total = bounds.len() - 1;
    while pos < total && text[bounds[pos]..].starts_with(char::is_whitespace) {
        pos += 1;
    }
    pos
}

/// Trim whitespace from `text[start..end]`, returning `None` if nothing is left.
fn trimmed_span(text: &str, start: usize, end: usize) -> Option<TextSpan<'_>> {
    let raw = &text[start..end];
    let content = raw.trim();
    if content.is_empty() {
        return None;
    }

    let leading = raw.len() - raw.trim_start().len();
    let span_start = start + leading;

    Some(TextSpan {
        start: span_start,
        end: span_start + content.len(),
        content,
    })
}

/// Split pages with the default separators.
pub fn split(
    pages: &[PageRecord],
    chunk_size: usize,
    chunk_overlap: usize,
) -> Result<Vec<Chunk>, ChunkingError> {
    let chunker = Chunker::with_config(ChunkingConfig::new(chunk_size, chunk_overlap))?;
    Ok(chunker.split(pages))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunker(size: usize, overlap: usize) -> Chunker {
        Chunker::with_config(ChunkingConfig::new(size, overlap)).unwrap()
    }

    fn page(text: &str) -> PageRecord {
        PageRecord::new("doc.pdf", 1, text).unwrap()
    }

    #[test]
    fn test_new_chunker() {
        let chunker = Chunker::new().unwrap();
        assert_eq!(chunker.config().chunk_size, 800);
    }

    #[test]
    fn test_invalid_config() {
        let result = Chunker::with_config(ChunkingConfig::new(100, 150));
        assert!(matches!(
            result,
            Err(ChunkingError::OverlapTooLarge {
                overlap: 150,
                size: 100
            })
        ));
    }

    #[test]
    fn test_overlap_scenario() {
        let chunks = split(&[page("AAAA BBBB CCCC DDDD")], 9, 4).unwrap();
        let contents: Vec<&str> = chunks.iter().map(|c| c.content.as_str()).collect();

        assert_eq!(contents, vec!["AAAA BBBB", "BBBB CCCC", "CCCC DDDD"]);
        for chunk in &chunks {
            assert_eq!(chunk.filename, "doc.pdf");
            assert_eq!(chunk.page_number, 1);
        }
    }

    #[test]
    fn test_empty_page_yields_no_chunks() {
        assert!(chunker(10, 2).split(&[page("")]).is_empty());
        assert!(chunker(10, 2).split(&[page("   \n\n  ")]).is_empty());
    }

    #[test]
    fn test_short_text_single_chunk() {
        let spans = chunker(100, 10).split_text("  This is a short text.  ");
        assert_eq!(spans, vec!["This is a short text."]);
    }

    #[test]
    fn test_prefers_paragraph_break() {
        let text = "Para one here.\n\nPara two is here";
        let spans = chunker(30, 0).split_text(text);
        assert_eq!(spans, vec!["Para one here.", "Para two is here"]);
    }

    #[test]
    fn test_sentence_punctuation_kept() {
        let text = "First sentence. Second sentence goes on";
        let spans = chunker(20, 0).split_text(text);
        assert_eq!(spans[0], "First sentence.");
    }

    #[test]
    fn test_hard_cut_without_separators() {
        let spans = chunker(4, 1).split_text("abcdefghij");
        assert_eq!(spans, vec!["abcd", "defg", "ghij"]);
    }

    #[test]
    fn test_multibyte_characters_counted_as_chars() {
        let text = "éééé ffff";
        let spans = chunker(4, 0).split_text(text);
        assert_eq!(spans, vec!["éééé", "ffff"]);
    }

    #[test]
    fn test_trailing_whitespace_does_not_duplicate_tail() {
        let spans = chunker(9, 4).split_text("AAAA BBBB   ");
        assert_eq!(spans, vec!["AAAA BBBB"]);
    }

    #[test]
    fn test_spans_are_substrings_with_offsets() {
        let text = "one two three four five six seven eight nine ten";
        for span in chunker(12, 3).spans(text) {
            assert_eq!(&text[span.start..span.end], span.content);
            assert!(span.content.chars().count() <= 12);
        }
    }

    #[test]
    fn test_deterministic() {
        let text = "Lorem ipsum dolor sit amet.\nConsectetur adipiscing elit. ".repeat(20);
        let c = chunker(50, 10);
        assert_eq!(c.split_text(&text), c.split_text(&text));
    }

    #[test]
    fn test_pages_keep_their_identity() {
        let pages = vec![
            PageRecord::new("a.pdf", 1, "alpha beta").unwrap(),
            PageRecord::new("a.pdf", 2, "").unwrap(),
            PageRecord::new("b.pdf", 7, "gamma delta epsilon").unwrap(),
        ];
        let chunks = chunker(11, 2).split(&pages);

        assert_eq!(chunks[0].filename, "a.pdf");
        assert_eq!(chunks[0].page_number, 1);
        assert!(chunks[1..].iter().all(|c| c.filename == "b.pdf" && c.page_number == 7));
    }
}

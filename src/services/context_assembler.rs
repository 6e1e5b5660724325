//! Context assembly
//!
//! Turns a query into a ranked, citation-labelled context block: one
//! embedding call, one index search, then formatting in rank order.

use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::errors::DomainResult;
use crate::domain::models::{RetrievedContext, SearchResult};
use crate::domain::ports::EmbeddingProvider;
use crate::infrastructure::vector::VectorIndex;

/// Separator placed between context blocks
pub const CONTEXT_SEPARATOR: &str = "\n\n---\n\n";

/// Label a result with its source page and file
pub fn format_block(result: &SearchResult) -> String {
    format!(
        "[Page {} - {}]\n{}",
        result.chunk.page_number, result.chunk.filename, result.chunk.content
    )
}

/// Join labelled results in the order given
pub fn format_context(results: &[SearchResult]) -> String {
    results
        .iter()
        .map(format_block)
        .collect::<Vec<_>>()
        .join(CONTEXT_SEPARATOR)
}

/// Retrieves and formats context for a query
pub struct ContextAssembler {
    embedder: Arc<dyn EmbeddingProvider>,
    index: Arc<RwLock<VectorIndex>>,
}

impl ContextAssembler {
    /// Create an assembler over a shared index
    pub fn new(embedder: Arc<dyn EmbeddingProvider>, index: Arc<RwLock<VectorIndex>>) -> Self {
        Self { embedder, index }
    }

    /// Embed `query` once, search the index and format the results.
    ///
    /// The read lock is held only for the search, so a concurrent load or
    /// rebuild cannot interleave with it.
    pub async fn retrieve_context(&self, query: &str, top_k: usize) -> DomainResult<RetrievedContext> {
        let query_vector = self.embedder.embed(query).await?;

        let results = {
            let index = self.index.read().await;
            index.search(&query_vector, top_k)?
        };

        tracing::debug!(
            top_k,
            returned = results.len(),
            embedder = self.embedder.name(),
            "retrieved context"
        );

        Ok(RetrievedContext {
            text: format_context(&results),
            results,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::Chunk;

    fn result(filename: &str, page: u32, content: &str, rank: usize) -> SearchResult {
        SearchResult {
            chunk: Chunk::new(filename, page, content).unwrap(),
            rank,
            distance: 0.0,
            position: rank - 1,
        }
    }

    #[test]
    fn test_format_block() {
        let block = format_block(&result("notes.pdf", 3, "Mitochondria.", 1));
        assert_eq!(block, "[Page 3 - notes.pdf]\nMitochondria.");
    }

    #[test]
    fn test_format_context_keeps_order() {
        let results = vec![
            result("b.pdf", 9, "second source first", 1),
            result("a.pdf", 1, "first source second", 2),
        ];
        assert_eq!(
            format_context(&results),
            "[Page 9 - b.pdf]\nsecond source first\n\n---\n\n[Page 1 - a.pdf]\nfirst source second"
        );
    }

    #[test]
    fn test_format_context_empty() {
        assert_eq!(format_context(&[]), "");
    }
}

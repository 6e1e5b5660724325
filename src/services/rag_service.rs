//! RAG (Retrieval-Augmented Generation) service
//!
//! One explicitly constructed context object owning the vector index, the
//! chunker and both model collaborators. The index sits behind a
//! `tokio::sync::RwLock`: rebuild and load take the write lock for their
//! whole sequence, retrieval takes the read lock.

use serde::Serialize;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{
    Config, ExplainStyle, PageRecord, QuizKind, RetrievalConfig, RetrievedContext, SearchResult,
};
use crate::domain::ports::{EmbeddingProvider, TextGenerator};
use crate::infrastructure::vector::{Chunker, IndexState, VectorIndex};

use super::context_assembler::ContextAssembler;
use super::prompts;

/// Query used to retrieve context for document summaries
pub const SUMMARY_QUERY: &str = "summary";

/// Query used to retrieve context for quizzes
pub const QUIZ_QUERY: &str = "quiz";

/// Outcome of a knowledge base build
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BuildReport {
    /// Pages received from extraction
    pub pages: usize,
    /// Chunks produced from those pages
    pub chunks: usize,
    /// Entries stored in the rebuilt index
    pub entries: usize,
}

/// Generated text plus the ranked results it was grounded on
#[derive(Debug, Clone, Serialize)]
pub struct RagAnswer {
    /// Generator output
    pub text: String,
    /// Ranked results the prompt context was built from
    pub results: Vec<SearchResult>,
}

/// Retrieval-augmented generation over one vector index
pub struct RagService {
    index: Arc<RwLock<VectorIndex>>,
    chunker: Chunker,
    embedder: Arc<dyn EmbeddingProvider>,
    generator: Arc<dyn TextGenerator>,
    assembler: ContextAssembler,
    retrieval: RetrievalConfig,
}

impl RagService {
    /// Create a service from configuration
    ///
    /// # Arguments
    /// * `config` - Application configuration (index, chunking, retrieval)
    /// * `embedder` - Embedding collaborator
    /// * `generator` - Text generation collaborator
    ///
    /// Fails if the embedder's output width differs from `index.dimension`.
    pub fn new(
        config: &Config,
        embedder: Arc<dyn EmbeddingProvider>,
        generator: Arc<dyn TextGenerator>,
    ) -> DomainResult<Self> {
        if embedder.dimension() != config.index.dimension {
            return Err(DomainError::Validation(format!(
                "embedder {} produces {}-wide vectors, index expects {}",
                embedder.name(),
                embedder.dimension(),
                config.index.dimension
            )));
        }

        let index = VectorIndex::from_config(&config.index);
        let chunker = Chunker::with_config(config.chunking.clone())?;
        Ok(Self::with_parts(
            index,
            chunker,
            config.retrieval.clone(),
            embedder,
            generator,
        ))
    }

    /// Create a service from already constructed parts
    pub fn with_parts(
        index: VectorIndex,
        chunker: Chunker,
        retrieval: RetrievalConfig,
        embedder: Arc<dyn EmbeddingProvider>,
        generator: Arc<dyn TextGenerator>,
    ) -> Self {
        let index = Arc::new(RwLock::new(index));
        let assembler = ContextAssembler::new(Arc::clone(&embedder), Arc::clone(&index));

        Self {
            index,
            chunker,
            embedder,
            generator,
            assembler,
            retrieval,
        }
    }

    /// Shared handle to the index
    pub fn index(&self) -> Arc<RwLock<VectorIndex>> {
        Arc::clone(&self.index)
    }

    /// Returns true once an index has been built or loaded
    pub async fn is_ready(&self) -> bool {
        self.index.read().await.state() != IndexState::Uninitialized
    }

    /// Number of entries in the in-memory index
    pub async fn entry_count(&self) -> usize {
        self.index.read().await.len()
    }

    /// Rebuild the knowledge base from extracted pages and persist it.
    ///
    /// Chunk texts are embedded in one batch before the write lock is taken.
    /// Create, add and save then run under that lock as one sequence.
    pub async fn build_knowledge_base(&self, pages: &[PageRecord]) -> DomainResult<BuildReport> {
        let chunks = self.chunker.split(pages);
        let texts: Vec<String> = chunks.iter().map(|c| c.content.clone()).collect();

        let vectors = if texts.is_empty() {
            Vec::new()
        } else {
            self.embedder.embed_batch(&texts).await?
        };

        let chunk_count = chunks.len();
        let entries = {
            let mut index = self.index.write().await;
            index.create_new_index();
            index.add_embeddings(&vectors, chunks)?;
            index.save_index()?;
            index.len()
        };

        let report = BuildReport {
            pages: pages.len(),
            chunks: chunk_count,
            entries,
        };

        tracing::info!(
            pages = report.pages,
            chunks = report.chunks,
            entries = report.entries,
            embedder = self.embedder.name(),
            "knowledge base built"
        );

        Ok(report)
    }

    /// Load the persisted index. Returns false when none exists.
    pub async fn load_index(&self) -> DomainResult<bool> {
        let mut index = self.index.write().await;
        Ok(index.load_index()?)
    }

    /// Retrieve formatted context without generating
    pub async fn retrieve(&self, query: &str, top_k: usize) -> DomainResult<RetrievedContext> {
        self.assembler.retrieve_context(query, top_k).await
    }

    /// Answer a question from the top `top_k` chunks (default `retrieval.top_k`)
    pub async fn answer(&self, question: &str, top_k: Option<usize>) -> DomainResult<RagAnswer> {
        let top_k = top_k.unwrap_or(self.retrieval.top_k);
        let context = self.retrieve(question, top_k).await?;
        let prompt = prompts::answer_prompt(&context.text, question);
        self.complete("answer", &prompt, context).await
    }

    /// Summarize the documents
    pub async fn summarize(&self, top_k: Option<usize>) -> DomainResult<RagAnswer> {
        let top_k = top_k.unwrap_or(self.retrieval.task_top_k);
        let context = self.retrieve(SUMMARY_QUERY, top_k).await?;
        let prompt = prompts::summary_prompt(&context.text);
        self.complete("summary", &prompt, context).await
    }

    /// Generate a quiz over the documents
    pub async fn quiz(&self, kind: QuizKind, top_k: Option<usize>) -> DomainResult<RagAnswer> {
        let top_k = top_k.unwrap_or(self.retrieval.task_top_k);
        let context = self.retrieve(QUIZ_QUERY, top_k).await?;
        let prompt = prompts::quiz_prompt(&context.text, kind);
        self.complete("quiz", &prompt, context).await
    }

    /// Explain a topic using the chunks closest to it
    pub async fn explain(
        &self,
        topic: &str,
        style: ExplainStyle,
        top_k: Option<usize>,
    ) -> DomainResult<RagAnswer> {
        let top_k = top_k.unwrap_or(self.retrieval.task_top_k);
        let context = self.retrieve(topic, top_k).await?;
        let prompt = prompts::explain_prompt(&context.text, style);
        self.complete("explain", &prompt, context).await
    }

    async fn complete(
        &self,
        task: &'static str,
        prompt: &str,
        context: RetrievedContext,
    ) -> DomainResult<RagAnswer> {
        tracing::debug!(
            task,
            context_results = context.results.len(),
            generator = self.generator.name(),
            "invoking generator"
        );

        let text = self.generator.generate(prompt).await?;

        Ok(RagAnswer {
            text,
            results: context.results,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::embeddings::HashingEmbedder;
    use crate::adapters::generation::MockGenerator;
    use crate::domain::models::ChunkingConfig;
    use tempfile::TempDir;

    fn service(dir: &TempDir, generator: MockGenerator) -> RagService {
        let index = VectorIndex::new(
            64,
            dir.path().join("index.bin"),
            dir.path().join("metadata.json"),
        );
        let chunker = Chunker::with_config(ChunkingConfig::new(60, 10)).unwrap();
        RagService::with_parts(
            index,
            chunker,
            RetrievalConfig::default(),
            Arc::new(HashingEmbedder::new(64)),
            Arc::new(generator),
        )
    }

    fn pages() -> Vec<PageRecord> {
        vec![
            PageRecord::new("bio.pdf", 1, "Photosynthesis converts light into chemical energy.").unwrap(),
            PageRecord::new("bio.pdf", 2, "").unwrap(),
            PageRecord::new("history.pdf", 1, "The treaty was signed in 1648 ending the war.").unwrap(),
        ]
    }

    #[test]
    fn test_new_rejects_embedder_of_other_width() {
        let config = Config::default();
        let result = RagService::new(
            &config,
            Arc::new(HashingEmbedder::new(32)),
            Arc::new(MockGenerator::new()),
        );
        assert!(matches!(result, Err(DomainError::Validation(msg)) if msg.contains("384")));

        let matching = RagService::new(
            &config,
            Arc::new(HashingEmbedder::new(config.index.dimension)),
            Arc::new(MockGenerator::new()),
        );
        assert!(matching.is_ok());
    }

    #[tokio::test]
    async fn test_build_reports_and_persists() {
        let dir = TempDir::new().unwrap();
        let rag = service(&dir, MockGenerator::new());
        assert!(!rag.is_ready().await);

        let report = rag.build_knowledge_base(&pages()).await.unwrap();
        assert_eq!(report.pages, 3);
        assert_eq!(report.chunks, 2);
        assert_eq!(report.entries, 2);
        assert!(rag.is_ready().await);
        assert_eq!(rag.index().read().await.state(), IndexState::Persisted);
        assert!(dir.path().join("metadata.json").exists());
    }

    #[tokio::test]
    async fn test_answer_uses_closest_chunk_and_prompt() {
        let dir = TempDir::new().unwrap();
        let generator = MockGenerator::fixed("It converts light.");
        let rag = service(&dir, generator.clone());
        rag.build_knowledge_base(&pages()).await.unwrap();

        let answer = rag
            .answer("How does photosynthesis use light energy?", Some(1))
            .await
            .unwrap();
        assert_eq!(answer.text, "It converts light.");
        assert_eq!(answer.results.len(), 1);
        assert_eq!(answer.results[0].chunk.filename, "bio.pdf");

        let prompts = generator.prompts().await;
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("[Page 1 - bio.pdf]"));
        assert!(prompts[0].contains("USER QUESTION:\nHow does photosynthesis use light energy?"));
    }

    #[tokio::test]
    async fn test_tasks_generate_on_empty_index() {
        let dir = TempDir::new().unwrap();
        let generator = MockGenerator::new();
        let rag = service(&dir, generator.clone());
        rag.build_knowledge_base(&[]).await.unwrap();

        let summary = rag.summarize(None).await.unwrap();
        assert!(summary.results.is_empty());
        rag.quiz(QuizKind::ShortAnswer, None).await.unwrap();
        rag.explain("anything", ExplainStyle::Expert, None).await.unwrap();

        assert_eq!(generator.call_count().await, 3);
    }

    #[tokio::test]
    async fn test_load_index_in_fresh_service() {
        let dir = TempDir::new().unwrap();
        let rag = service(&dir, MockGenerator::new());
        assert!(!rag.load_index().await.unwrap());

        rag.build_knowledge_base(&pages()).await.unwrap();

        let fresh = service(&dir, MockGenerator::new());
        assert!(fresh.load_index().await.unwrap());
        assert_eq!(fresh.entry_count().await, 2);

        let before = rag.retrieve("treaty", 2).await.unwrap();
        let after = fresh.retrieve("treaty", 2).await.unwrap();
        assert_eq!(before.text, after.text);
        assert_eq!(before.results, after.results);
    }

    #[tokio::test]
    async fn test_generation_failure_propagates() {
        let dir = TempDir::new().unwrap();
        let rag = service(&dir, MockGenerator::failing("model unavailable"));
        rag.build_knowledge_base(&pages()).await.unwrap();

        assert!(rag.answer("question", None).await.is_err());
    }
}

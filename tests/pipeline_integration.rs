//! End-to-end tests of the retrieval pipeline with stub collaborators
//!
//! Pages go through chunking, embedding, indexing and persistence, then
//! questions come back out through retrieval and prompt assembly.

use async_trait::async_trait;
use pdf_analyst::domain::errors::{DomainError, DomainResult, IndexError};
use pdf_analyst::domain::models::{
    ChunkingConfig, ExplainStyle, PageRecord, QuizKind, RetrievalConfig,
};
use pdf_analyst::domain::ports::{EmbeddingProvider, TextGenerator};
use pdf_analyst::infrastructure::vector::{Chunker, IndexState, VectorIndex};
use pdf_analyst::services::{ContextAssembler, RagService};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

/// Vocabulary driving the stub embedding: one axis per topic word
const TOPICS: [&str; 3] = ["cell", "war", "market"];

/// Counts occurrences of each topic word. Records how often it is called.
#[derive(Default)]
struct TopicEmbedder {
    calls: AtomicUsize,
    texts_seen: AtomicUsize,
    width: Option<usize>,
}

impl TopicEmbedder {
    fn with_width(width: usize) -> Self {
        Self {
            width: Some(width),
            ..Self::default()
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl EmbeddingProvider for TopicEmbedder {
    fn name(&self) -> &'static str {
        "topic-stub"
    }

    fn dimension(&self) -> usize {
        self.width.unwrap_or(TOPICS.len())
    }

    async fn embed_batch(&self, texts: &[String]) -> DomainResult<Vec<Vec<f32>>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.texts_seen.fetch_add(texts.len(), Ordering::SeqCst);

        Ok(texts
            .iter()
            .map(|text| {
                let lower = text.to_lowercase();
                let mut vector: Vec<f32> = TOPICS
                    .iter()
                    .map(|topic| lower.matches(topic).count() as f32)
                    .collect();
                vector.resize(self.dimension(), 0.0);
                vector
            })
            .collect())
    }
}

struct FailingEmbedder;

#[async_trait]
impl EmbeddingProvider for FailingEmbedder {
    fn name(&self) -> &'static str {
        "failing-stub"
    }

    fn dimension(&self) -> usize {
        TOPICS.len()
    }

    async fn embed_batch(&self, _texts: &[String]) -> DomainResult<Vec<Vec<f32>>> {
        Err(DomainError::Embedding("service unreachable".to_string()))
    }
}

#[derive(Default)]
struct RecordingGenerator {
    prompts: Mutex<Vec<String>>,
}

impl RecordingGenerator {
    fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextGenerator for RecordingGenerator {
    fn name(&self) -> &'static str {
        "recording-stub"
    }

    async fn generate(&self, prompt: &str) -> DomainResult<String> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        Ok("generated".to_string())
    }
}

fn pages() -> Vec<PageRecord> {
    vec![
        PageRecord::new("biology.pdf", 1, "The cell is the basic unit of life.").unwrap(),
        PageRecord::new("biology.pdf", 2, "").unwrap(),
        PageRecord::new("history.pdf", 4, "The war ended with a treaty.").unwrap(),
        PageRecord::new("economics.pdf", 2, "A market clears when supply meets demand.").unwrap(),
    ]
}

fn service(
    dir: &TempDir,
    embedder: Arc<dyn EmbeddingProvider>,
    generator: Arc<dyn TextGenerator>,
) -> RagService {
    let index = VectorIndex::new(
        TOPICS.len(),
        dir.path().join("index.bin"),
        dir.path().join("metadata.json"),
    );
    let chunker = Chunker::with_config(ChunkingConfig::new(200, 20)).unwrap();
    RagService::with_parts(
        index,
        chunker,
        RetrievalConfig::default(),
        embedder,
        generator,
    )
}

#[tokio::test]
async fn test_build_embeds_all_chunks_in_one_call() {
    let dir = TempDir::new().unwrap();
    let embedder = Arc::new(TopicEmbedder::default());
    let rag = service(&dir, embedder.clone(), Arc::new(RecordingGenerator::default()));

    let report = rag.build_knowledge_base(&pages()).await.unwrap();

    assert_eq!(report.pages, 4);
    assert_eq!(report.chunks, 3);
    assert_eq!(report.entries, 3);
    assert_eq!(embedder.calls(), 1);
    assert_eq!(embedder.texts_seen.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn test_retrieve_context_embeds_query_once() {
    let dir = TempDir::new().unwrap();
    let embedder = Arc::new(TopicEmbedder::default());
    let rag = service(&dir, embedder.clone(), Arc::new(RecordingGenerator::default()));
    rag.build_knowledge_base(&pages()).await.unwrap();

    let assembler = ContextAssembler::new(embedder.clone(), rag.index());
    let before = embedder.calls();
    let context = assembler
        .retrieve_context("Which war is described?", 2)
        .await
        .unwrap();

    assert_eq!(embedder.calls() - before, 1);
    assert_eq!(context.results.len(), 2);
    assert_eq!(context.results[0].chunk.filename, "history.pdf");
    assert!(context
        .text
        .starts_with("[Page 4 - history.pdf]\nThe war ended with a treaty."));
    assert!(context.text.contains("\n\n---\n\n"));
}

#[tokio::test]
async fn test_answer_prompt_carries_ranked_context() {
    let dir = TempDir::new().unwrap();
    let generator = Arc::new(RecordingGenerator::default());
    let rag = service(&dir, Arc::new(TopicEmbedder::default()), generator.clone());
    rag.build_knowledge_base(&pages()).await.unwrap();

    let answer = rag.answer("How does a market clear?", Some(1)).await.unwrap();

    assert_eq!(answer.text, "generated");
    assert_eq!(answer.results[0].chunk.filename, "economics.pdf");
    let prompts = generator.prompts();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].contains("[Page 2 - economics.pdf]"));
    assert!(prompts[0].contains("How does a market clear?"));
    assert!(!prompts[0].contains("biology.pdf"));
}

#[tokio::test]
async fn test_empty_index_still_generates() {
    let dir = TempDir::new().unwrap();
    let generator = Arc::new(RecordingGenerator::default());
    let rag = service(&dir, Arc::new(TopicEmbedder::default()), generator.clone());

    let blank = vec![PageRecord::new("scan.pdf", 1, "   ").unwrap()];
    let report = rag.build_knowledge_base(&blank).await.unwrap();
    assert_eq!(report.entries, 0);
    assert!(rag.is_ready().await);

    let answer = rag.answer("anything about cells?", None).await.unwrap();
    assert!(answer.results.is_empty());
    rag.summarize(None).await.unwrap();
    rag.quiz(QuizKind::Mcq, None).await.unwrap();
    rag.explain("cells", ExplainStyle::Examples, None).await.unwrap();

    let prompts = generator.prompts();
    assert_eq!(prompts.len(), 4);
    assert!(prompts[0].contains("CONTEXT:\n\n"));
    assert!(prompts[3].contains("Explain with examples."));
}

#[tokio::test]
async fn test_reloaded_service_answers_identically() {
    let dir = TempDir::new().unwrap();
    let rag = service(
        &dir,
        Arc::new(TopicEmbedder::default()),
        Arc::new(RecordingGenerator::default()),
    );
    rag.build_knowledge_base(&pages()).await.unwrap();

    let fresh = service(
        &dir,
        Arc::new(TopicEmbedder::default()),
        Arc::new(RecordingGenerator::default()),
    );
    assert!(!fresh.is_ready().await);
    assert!(fresh.load_index().await.unwrap());
    assert_eq!(fresh.index().read().await.state(), IndexState::Built);

    for query in ["cell biology", "war and treaty", "market demand", "nothing"] {
        let before = rag.retrieve(query, 3).await.unwrap();
        let after = fresh.retrieve(query, 3).await.unwrap();
        assert_eq!(before.text, after.text);
        assert_eq!(before.results, after.results);
    }
}

#[tokio::test]
async fn test_embedding_failure_aborts_build() {
    let dir = TempDir::new().unwrap();
    let rag = service(
        &dir,
        Arc::new(FailingEmbedder),
        Arc::new(RecordingGenerator::default()),
    );

    let result = rag.build_knowledge_base(&pages()).await;

    assert!(matches!(result, Err(DomainError::Embedding(_))));
    assert!(!rag.is_ready().await);
    assert!(!dir.path().join("index.bin").exists());
}

#[tokio::test]
async fn test_wrong_embedding_width_is_rejected() {
    let dir = TempDir::new().unwrap();
    let rag = service(
        &dir,
        Arc::new(TopicEmbedder::with_width(5)),
        Arc::new(RecordingGenerator::default()),
    );

    let result = rag.build_knowledge_base(&pages()).await;

    assert!(matches!(
        result,
        Err(DomainError::Index(IndexError::DimensionMismatch {
            expected: 3,
            actual: 5
        }))
    ));
    assert_eq!(rag.entry_count().await, 0);
}

//! Persistent exact-search vector index
//!
//! Pairs a [`FlatL2Store`] with a metadata list of [`Chunk`]s. Row `i` of the
//! store always belongs to `metadata[i]`: both sides are appended together in
//! one call, after every input has been validated.
//!
//! On disk the index is two files: a binary vector blob and a pretty-printed
//! JSON array of `{filename, page_number, content}` records in row order.

use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::errors::{IndexError, IndexResult};
use crate::domain::models::{Chunk, IndexConfig, SearchResult};

use super::flat_l2::{FlatL2Store, NO_MATCH};

/// Lifecycle of a [`VectorIndex`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexState {
    /// Nothing created or loaded yet
    Uninitialized,
    /// In-memory index exists (possibly empty) and may differ from disk
    Built,
    /// In-memory index matches what was last written to disk
    Persisted,
}

impl std::fmt::Display for IndexState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Uninitialized => write!(f, "uninitialized"),
            Self::Built => write!(f, "built"),
            Self::Persisted => write!(f, "persisted"),
        }
    }
}

/// Vector index with aligned chunk metadata
#[derive(Debug)]
pub struct VectorIndex {
    dimension: usize,
    vectors_path: PathBuf,
    metadata_path: PathBuf,
    store: Option<FlatL2Store>,
    metadata: Vec<Chunk>,
    state: IndexState,
}

impl VectorIndex {
    /// Create an uninitialized index of fixed width persisting to the given paths.
    pub fn new(
        dimension: usize,
        vectors_path: impl Into<PathBuf>,
        metadata_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            dimension,
            vectors_path: vectors_path.into(),
            metadata_path: metadata_path.into(),
            store: None,
            metadata: Vec::new(),
            state: IndexState::Uninitialized,
        }
    }

    /// Create an uninitialized index from the `index` config section
    pub fn from_config(config: &IndexConfig) -> Self {
        Self::new(
            config.dimension,
            config.vectors_path(),
            config.metadata_path(),
        )
    }

    /// Embedding width every vector must have
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Current lifecycle state
    pub fn state(&self) -> IndexState {
        self.state
    }

    /// Number of stored entries
    pub fn len(&self) -> usize {
        self.metadata.len()
    }

    /// Returns true if no entries are stored
    pub fn is_empty(&self) -> bool {
        self.metadata.is_empty()
    }

    /// Stored chunk metadata in row order
    pub fn chunks(&self) -> &[Chunk] {
        &self.metadata
    }

    /// Location of the vector blob
    pub fn vectors_path(&self) -> &Path {
        &self.vectors_path
    }

    /// Location of the metadata document
    pub fn metadata_path(&self) -> &Path {
        &self.metadata_path
    }

    /// Returns true if a vector blob exists at the configured location
    pub fn persisted_exists(&self) -> bool {
        self.vectors_path.exists()
    }

    /// Discard any in-memory entries and start an empty index.
    pub fn create_new_index(&mut self) {
        let discarded = self.metadata.len();
        self.store = Some(FlatL2Store::new(self.dimension));
        self.metadata.clear();
        self.state = IndexState::Built;

        tracing::info!(
            dimension = self.dimension,
            discarded,
            "created new vector index"
        );
    }

    /// Append vectors and their chunks in matched order.
    ///
    /// Nothing is written unless the counts agree and every vector has the
    /// configured width. Creates the index first if it does not exist yet.
    pub fn add_embeddings(&mut self, vectors: &[Vec<f32>], chunks: Vec<Chunk>) -> IndexResult<()> {
        if vectors.len() != chunks.len() {
            return Err(IndexError::LengthMismatch {
                vectors: vectors.len(),
                chunks: chunks.len(),
            });
        }

        if let Some(bad) = vectors.iter().find(|v| v.len() != self.dimension) {
            return Err(IndexError::DimensionMismatch {
                expected: self.dimension,
                actual: bad.len(),
            });
        }

        if self.store.is_none() {
            self.create_new_index();
        }

        let store = self
            .store
            .get_or_insert_with(|| FlatL2Store::new(self.dimension));
        store.add(vectors)?;

        let added = chunks.len();
        self.metadata.extend(chunks);
        self.state = IndexState::Built;

        debug_assert_eq!(store.len(), self.metadata.len());
        tracing::debug!(added, total = self.metadata.len(), "added embeddings");

        Ok(())
    }

    /// Exact top-k search by ascending squared L2 distance.
    ///
    /// Ties keep insertion order. Returns fewer than `top_k` results when
    /// the index holds fewer entries, and none when it is empty.
    pub fn search(&self, query: &[f32], top_k: usize) -> IndexResult<Vec<SearchResult>> {
        if query.len() != self.dimension {
            return Err(IndexError::DimensionMismatch {
                expected: self.dimension,
                actual: query.len(),
            });
        }

        let store = match &self.store {
            Some(store) if !store.is_empty() && top_k > 0 => store,
            _ => return Ok(Vec::new()),
        };

        // The store pads to the requested slot count
        let neighbors = store.search(query, top_k.min(store.len()))?;

        let results: Vec<SearchResult> = neighbors
            .into_iter()
            .filter(|n| n.label != NO_MATCH)
            .filter_map(|n| {
                let position = usize::try_from(n.label).ok()?;
                let chunk = self.metadata.get(position)?;
                Some((position, n.distance, chunk.clone()))
            })
            .enumerate()
            .map(|(i, (position, distance, chunk))| SearchResult {
                chunk,
                rank: i + 1,
                distance,
                position,
            })
            .collect();

        tracing::debug!(top_k, returned = results.len(), "vector search executed");

        Ok(results)
    }

    /// Write the vector blob and the metadata document.
    ///
    /// Does nothing when no index has been created or loaded.
    pub fn save_index(&mut self) -> IndexResult<()> {
        let Some(store) = &self.store else {
            tracing::debug!("save skipped: index not initialized");
            return Ok(());
        };

        for path in [&self.vectors_path, &self.metadata_path] {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
        }

        fs::write(&self.vectors_path, store.to_bytes()?)?;
        let json = serde_json::to_string_pretty(&self.metadata)?;
        fs::write(&self.metadata_path, json)?;

        self.state = IndexState::Persisted;

        tracing::info!(
            entries = self.metadata.len(),
            vectors = %self.vectors_path.display(),
            metadata = %self.metadata_path.display(),
            "saved vector index"
        );

        Ok(())
    }

    /// Restore the index from disk.
    ///
    /// Returns `Ok(false)` when no vector blob exists. Both files are fully
    /// parsed and cross-checked before the in-memory index is replaced.
    pub fn load_index(&mut self) -> IndexResult<bool> {
        if !self.vectors_path.exists() {
            tracing::debug!(path = %self.vectors_path.display(), "no persisted index");
            return Ok(false);
        }

        let store = FlatL2Store::from_bytes(&fs::read(&self.vectors_path)?)?;
        if store.dimension() != self.dimension {
            return Err(IndexError::CorruptIndex(format!(
                "stored vectors have width {}, index expects {}",
                store.dimension(),
                self.dimension
            )));
        }

        if !self.metadata_path.exists() {
            return Err(IndexError::CorruptIndex(format!(
                "metadata document {} is missing",
                self.metadata_path.display()
            )));
        }

        let raw = fs::read_to_string(&self.metadata_path)?;
        let metadata: Vec<Chunk> = serde_json::from_str(&raw).map_err(|e| {
            IndexError::CorruptIndex(format!("metadata document cannot be parsed: {e}"))
        })?;

        if metadata.len() != store.len() {
            return Err(IndexError::CorruptIndex(format!(
                "{} metadata records for {} stored vectors",
                metadata.len(),
                store.len()
            )));
        }

        self.store = Some(store);
        self.metadata = metadata;
        self.state = IndexState::Built;

        tracing::info!(entries = self.metadata.len(), "loaded vector index");

        Ok(true)
    }
}

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::{
    db::RecordStore,
    error::{AppError, AppResult},
    models::{IndexStats, Movie},
    services::{
        similarity::SimilarityMatrix,
        vectorizer::{self, DocumentVector, Vocabulary},
    },
};

/// One immutable generation of the recommendation index
///
/// Holds the record store together with the vocabulary, vectors and
/// similarity matrix derived from it. Nothing in a generation changes after
/// it is built; a reload produces a new `Index` instead.
#[derive(Debug)]
pub struct Index {
    generation: u64,
    built_at: DateTime<Utc>,
    store: RecordStore,
    vocabulary: Vocabulary,
    vectors: Vec<DocumentVector>,
    similarity: SimilarityMatrix,
}

impl Index {
    /// Runs the full build pipeline over a loaded store
    pub fn build(store: RecordStore) -> Self {
        let started = Instant::now();

        let (vocabulary, vectors) = vectorizer::build(&store.tags());
        let similarity = SimilarityMatrix::build(&vectors);

        tracing::info!(
            items = store.len(),
            vocabulary_size = vocabulary.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Index built"
        );

        Self {
            generation: 0,
            built_at: Utc::now(),
            store,
            vocabulary,
            vectors,
            similarity,
        }
    }

    /// Reads a corpus file and builds an index from it
    pub fn from_path<P: AsRef<Path>>(path: P) -> AppResult<Self> {
        let store = RecordStore::from_path(path)?;
        if store.is_empty() {
            tracing::warn!("Corpus is empty, no recommendations will be available");
        }
        Ok(Self::build(store))
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn vectors(&self) -> &[DocumentVector] {
        &self.vectors
    }

    pub fn similarity(&self) -> &SimilarityMatrix {
        &self.similarity
    }

    pub fn stats(&self) -> IndexStats {
        IndexStats {
            generation: self.generation,
            built_at: self.built_at,
            items: self.store.len(),
            vocabulary_size: self.vocabulary.len(),
        }
    }

    /// Resolves a title case-insensitively, `None` meaning not found
    pub fn lookup(&self, title: &str) -> Option<&Movie> {
        self.store.find_by_title(title)
    }

    /// All titles, sorted and deduplicated, for selection lists
    pub fn list_titles(&self) -> Vec<String> {
        let mut titles: Vec<String> = self.store.iter().map(|m| m.title.clone()).collect();
        titles.sort();
        titles.dedup();
        titles
    }
}

/// Shared handle to the currently serving index generation
///
/// Readers take an `Arc` snapshot and query it without holding the lock, so a
/// concurrent swap never exposes a partially built generation.
#[derive(Debug, Clone)]
pub struct IndexHandle {
    current: Arc<RwLock<Arc<Index>>>,
}

impl IndexHandle {
    /// Wraps a freshly built index as generation 1
    pub fn new(mut index: Index) -> Self {
        index.generation = 1;
        Self {
            current: Arc::new(RwLock::new(Arc::new(index))),
        }
    }

    /// Snapshot of the serving generation
    pub async fn current(&self) -> Arc<Index> {
        self.current.read().await.clone()
    }

    /// Atomically replaces the serving generation, returning the published one
    pub async fn publish(&self, mut index: Index) -> Arc<Index> {
        let mut current = self.current.write().await;
        index.generation = current.generation + 1;
        let published = Arc::new(index);
        *current = published.clone();
        published
    }
}

/// Owns the corpus location and the handle readers query through
#[derive(Debug)]
pub struct IndexLoader {
    corpus_path: PathBuf,
    handle: IndexHandle,
}

impl IndexLoader {
    /// Builds the first generation; the service cannot start without it
    pub async fn load(corpus_path: impl Into<PathBuf>) -> AppResult<Self> {
        let corpus_path = corpus_path.into();
        let index = Self::build_blocking(corpus_path.clone()).await?;

        tracing::info!(
            corpus = %corpus_path.display(),
            items = index.store().len(),
            "Loaded initial corpus"
        );

        Ok(Self {
            corpus_path,
            handle: IndexHandle::new(index),
        })
    }

    /// Rebuilds from the corpus source and swaps the new generation in
    ///
    /// On failure the previous generation keeps serving.
    pub async fn reload(&self) -> AppResult<IndexStats> {
        let index = match Self::build_blocking(self.corpus_path.clone()).await {
            Ok(index) => index,
            Err(e) => {
                tracing::error!(
                    error = %e,
                    corpus = %self.corpus_path.display(),
                    "Corpus reload failed, keeping previous generation"
                );
                return Err(e);
            }
        };

        let stats = self.handle.publish(index).await.stats();

        tracing::info!(
            generation = stats.generation,
            items = stats.items,
            "Published new index generation"
        );

        Ok(stats)
    }

    pub fn handle(&self) -> IndexHandle {
        self.handle.clone()
    }

    pub fn corpus_path(&self) -> &Path {
        &self.corpus_path
    }

    /// Runs the CPU-bound build on the blocking pool
    async fn build_blocking(path: PathBuf) -> AppResult<Index> {
        tokio::task::spawn_blocking(move || Index::from_path(path))
            .await
            .map_err(|e| AppError::Internal(format!("index build task failed: {}", e)))?
    }
}

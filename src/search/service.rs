//! The index service: load-once-reuse-many access to the durable artifact.
//!
//! Front ends hold one [`SearchService`] and call it for every query. The
//! service loads the artifact on first use and caches the resulting engine;
//! rebuilding replaces the artifact and the cached engine together, so
//! callers never observe a half-swapped state. The cache is an explicit,
//! injectable object; tests that want isolation construct a
//! [`SearchEngine`](crate::search::SearchEngine) directly instead.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::info;

use crate::corpus::CorpusSource;
use crate::error::Result;
use crate::index::IndexConfig;
use crate::search::engine::{IndexStats, SearchEngine, SearchHit};

/// Serves queries from a cached engine backed by a durable artifact.
pub struct SearchService {
    artifact_path: PathBuf,
    index_config: IndexConfig,
    engine: RwLock<Option<Arc<SearchEngine>>>,
}

impl std::fmt::Debug for SearchService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchService")
            .field("artifact_path", &self.artifact_path)
            .field("loaded", &self.engine.read().is_some())
            .finish()
    }
}

impl SearchService {
    /// Create a service over the given artifact path. Nothing is loaded
    /// until the first search.
    pub fn new<P: AsRef<Path>>(artifact_path: P) -> Self {
        SearchService {
            artifact_path: artifact_path.as_ref().to_path_buf(),
            index_config: IndexConfig::default(),
            engine: RwLock::new(None),
        }
    }

    /// Override the index configuration used by [`build_index`](Self::build_index).
    pub fn with_index_config(mut self, config: IndexConfig) -> Self {
        self.index_config = config;
        self
    }

    /// Run one query against the cached engine, loading the artifact first
    /// if needed.
    ///
    /// Fails only on artifact problems: absent
    /// ([`IndexMissing`](crate::error::MarqueeError::IndexMissing)) or
    /// unreadable ([`IndexCorrupt`](crate::error::MarqueeError::IndexCorrupt)).
    pub fn search(&self, query: &str, k: usize) -> Result<Vec<SearchHit>> {
        Ok(self.engine()?.search(query, k))
    }

    /// Build a fresh index from the source and atomically replace both the
    /// durable artifact and the cached engine. Idempotent.
    pub fn build_index(&self, source: &dyn CorpusSource) -> Result<IndexStats> {
        let engine = SearchEngine::from_source(source, self.index_config.clone())?;
        engine.save(&self.artifact_path)?;
        let stats = engine.stats();
        *self.engine.write() = Some(Arc::new(engine));
        info!(
            path = %self.artifact_path.display(),
            docs = stats.doc_count,
            vocabulary = stats.vocabulary_size,
            "index rebuilt"
        );
        Ok(stats)
    }

    /// The cached engine, loading it from the artifact on first use.
    pub fn engine(&self) -> Result<Arc<SearchEngine>> {
        if let Some(engine) = self.engine.read().as_ref() {
            return Ok(Arc::clone(engine));
        }

        let mut slot = self.engine.write();
        // Another caller may have loaded while we waited for the lock.
        if let Some(engine) = slot.as_ref() {
            return Ok(Arc::clone(engine));
        }

        let engine = Arc::new(SearchEngine::load(&self.artifact_path)?);
        *slot = Some(Arc::clone(&engine));
        Ok(engine)
    }
}

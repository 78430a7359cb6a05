//! Thread-safe lexical index cache keyed on the corpus fingerprint.
//!
//! Readers clone an `Arc` out of the read lock and search without holding
//! any lock. Rebuilds are serialized by a separate mutex, re-check the
//! fingerprint after acquiring it, and publish with a single pointer swap,
//! so readers always see a complete old or complete new index.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, RwLock};
use std::time::Instant;

use sakumon_core::errors::{RetrievalError, SakumonResult};
use sakumon_core::models::{CorpusRow, Fingerprint};
use sakumon_observability::tracing_setup::events;

use super::index::LexicalIndex;

#[derive(Debug, Default)]
pub struct LexicalIndexCache {
    current: RwLock<Option<Arc<LexicalIndex>>>,
    build_lock: Mutex<()>,
    builds: AtomicUsize,
}

impl LexicalIndexCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached index when its fingerprint matches, otherwise build
    /// one from `rows` and publish it. `rows` is only called on a rebuild.
    pub fn get_or_build<F>(
        &self,
        fingerprint: Fingerprint,
        rows: F,
        force_refresh: bool,
    ) -> SakumonResult<Arc<LexicalIndex>>
    where
        F: FnOnce() -> SakumonResult<Vec<CorpusRow>>,
    {
        if !force_refresh {
            if let Some(index) = self.matching(fingerprint)? {
                return Ok(index);
            }
        }

        let _guard = self.build_lock.lock().map_err(|_| poisoned("build"))?;

        // Another caller may have finished the same build while we waited.
        if !force_refresh {
            if let Some(index) = self.matching(fingerprint)? {
                return Ok(index);
            }
        }

        let _span = sakumon_observability::index_build_span!(fingerprint).entered();
        let started = Instant::now();
        let rows = rows()?;
        let index = Arc::new(LexicalIndex::build(fingerprint, &rows));
        events::index_rebuilt(
            index.len(),
            index.model().vocabulary_size(),
            index.model().analyzer().uses_char_ngrams(),
            started.elapsed().as_millis(),
        );

        let mut slot = self.current.write().map_err(|_| poisoned("index"))?;
        *slot = Some(Arc::clone(&index));
        self.builds.fetch_add(1, Ordering::Relaxed);
        Ok(index)
    }

    /// The published index, if any.
    pub fn current(&self) -> SakumonResult<Option<Arc<LexicalIndex>>> {
        Ok(self.current.read().map_err(|_| poisoned("index"))?.clone())
    }

    /// Drop the published index; the next lookup rebuilds.
    pub fn invalidate(&self) -> SakumonResult<()> {
        *self.current.write().map_err(|_| poisoned("index"))? = None;
        Ok(())
    }

    /// Number of builds published since creation.
    pub fn build_count(&self) -> usize {
        self.builds.load(Ordering::Relaxed)
    }

    fn matching(&self, fingerprint: Fingerprint) -> SakumonResult<Option<Arc<LexicalIndex>>> {
        let slot = self.current.read().map_err(|_| poisoned("index"))?;
        Ok(slot
            .as_ref()
            .filter(|index| index.fingerprint() == fingerprint)
            .cloned())
    }
}

fn poisoned(lock: &str) -> sakumon_core::errors::SakumonError {
    RetrievalError::SearchFailed {
        reason: format!("lexical {lock} lock poisoned"),
    }
    .into()
}

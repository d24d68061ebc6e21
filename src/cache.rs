//! On-disk cache for pairwise likelihood tables
//!
//! A pairwise table takes O(n^2) work to build and is pure data, so it is
//! worth persisting across runs. The cache is strictly best-effort: a miss,
//! an unreadable file, or a corrupt entry logs a warning and reports "no
//! cached table" so the factory falls back to rebuilding; a failed store is
//! logged and swallowed. Nothing here ever propagates as an engine error.

use std::fs;
use std::path::{Path, PathBuf};

use crate::model::pairwise::PairwiseTable;

/// Key-value store for serialized pairwise tables, keyed by
/// [`crate::model::PairwiseConfig::cache_key`].
pub trait TableCache {
    /// Fetch a table, or `None` on miss or corruption.
    fn load(&self, key: &str) -> Option<PairwiseTable>;

    /// Persist a table. Failures are absorbed, not returned.
    fn store(&self, key: &str, table: &PairwiseTable);
}

/// One JSON file per table under a directory.
#[derive(Debug, Clone)]
pub struct DirCache {
    dir: PathBuf,
}

impl DirCache {
    /// Cache rooted at `dir`. The directory is created lazily on store.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl TableCache for DirCache {
    fn load(&self, key: &str) -> Option<PairwiseTable> {
        let path = self.path_for(key);
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) => {
                log::debug!("cache miss for {}: {}", key, e);
                return None;
            }
        };
        match serde_json::from_slice(&bytes) {
            Ok(table) => Some(table),
            Err(e) => {
                log::warn!("corrupt cache entry {}: {}", path.display(), e);
                None
            }
        }
    }

    fn store(&self, key: &str, table: &PairwiseTable) {
        if let Err(e) = self.try_store(&self.path_for(key), table) {
            log::warn!("failed to store table {}: {}", key, e);
        }
    }
}

impl DirCache {
    fn try_store(&self, path: &Path, table: &PairwiseTable) -> Result<(), std::io::Error> {
        fs::create_dir_all(&self.dir)?;
        let json = serde_json::to_vec(table).map_err(std::io::Error::from)?;
        fs::write(path, json)
    }
}

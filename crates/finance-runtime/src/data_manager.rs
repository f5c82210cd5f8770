//! Change-aware table cache.
//!
//! [`TableCache`] memoizes loaded spreadsheets keyed by path. An entry stays
//! valid while the file's modification time and length are unchanged, so
//! repeated loads of an untouched file never re-read it, and a saved edit is
//! picked up on the next call without any explicit invalidation.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

use finance_core::error::{FinanceError, Result};
use finance_core::models::Table;
use finance_data::reader::{load_table_with_report, LoadReport};

// ── FileFingerprint ───────────────────────────────────────────────────────────

/// What the cache compares to decide whether a file changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileFingerprint {
    pub modified: Option<SystemTime>,
    pub len: u64,
}

impl FileFingerprint {
    /// Stat `path`. Missing files are [`FinanceError::DataUnavailable`].
    pub fn of(path: &Path) -> Result<Self> {
        let metadata = fs::metadata(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                FinanceError::data_unavailable(path, "file not found")
            } else {
                FinanceError::data_unavailable(path, format!("cannot stat file: {e}"))
            }
        })?;
        Ok(Self {
            modified: metadata.modified().ok(),
            len: metadata.len(),
        })
    }
}

// ── TableCache ────────────────────────────────────────────────────────────────

#[derive(Debug)]
struct CachedTable {
    table: Arc<Table>,
    report: LoadReport,
    fingerprint: FileFingerprint,
}

/// Path-keyed cache of loaded tables.
///
/// # Example
/// ```no_run
/// use finance_runtime::data_manager::TableCache;
/// use std::path::Path;
///
/// let mut cache = TableCache::new();
/// let table = cache.load(Path::new("finances_data.csv")).unwrap();
/// println!("{} categories", table.category_count());
/// ```
#[derive(Debug, Default)]
pub struct TableCache {
    entries: HashMap<PathBuf, CachedTable>,
    /// Number of times a file was actually read and parsed.
    reads: u64,
}

impl TableCache {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Public API ────────────────────────────────────────────────────────

    /// Return the table for `path`, reading the file only when it is not
    /// cached or its fingerprint changed.
    ///
    /// A failed load leaves any existing entry for `path` untouched.
    pub fn load(&mut self, path: &Path) -> Result<Arc<Table>> {
        let fingerprint = FileFingerprint::of(path)?;

        if let Some(entry) = self.entries.get(path) {
            if entry.fingerprint == fingerprint {
                tracing::debug!(path = %path.display(), "returning cached table");
                return Ok(Arc::clone(&entry.table));
            }
            tracing::debug!(path = %path.display(), "file changed on disk, reloading");
        }

        let loaded = load_table_with_report(path)?;
        self.reads += 1;

        let table = Arc::new(loaded.table);
        tracing::debug!(
            path = %path.display(),
            categories = table.category_count(),
            months = table.months().len(),
            "table cache updated"
        );
        self.entries.insert(
            path.to_path_buf(),
            CachedTable {
                table: Arc::clone(&table),
                report: loaded.report,
                fingerprint,
            },
        );
        Ok(table)
    }

    /// Drop the entry for `path` so the next [`load`](Self::load) re-reads it.
    pub fn invalidate(&mut self, path: &Path) {
        if self.entries.remove(path).is_some() {
            tracing::debug!(path = %path.display(), "cache entry invalidated");
        }
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
        tracing::debug!("cache cleared");
    }

    /// `true` when `path` has a cached entry (fresh or not).
    pub fn is_cached(&self, path: &Path) -> bool {
        self.entries.contains_key(path)
    }

    /// Data-quality report from the last successful read of `path`.
    pub fn report(&self, path: &Path) -> Option<&LoadReport> {
        self.entries.get(path).map(|entry| &entry.report)
    }

    /// Number of actual file reads since construction.
    pub fn reads(&self) -> u64 {
        self.reads
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

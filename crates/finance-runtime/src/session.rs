//! Interactive session state.
//!
//! [`DashboardSession`] ties a data file to a [`TableCache`] and remembers
//! which month the user is looking at. Every query is recomputed from the
//! cached table; only [`DashboardSession::reload`] touches the file system.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use finance_core::error::{FinanceError, Result};
use finance_core::models::{MonthKey, MonthSummary, Table};
use finance_data::aggregator::MonthAggregator;
use finance_data::reader::LoadReport;

use crate::data_manager::TableCache;

/// One user's view over one data file.
#[derive(Debug)]
pub struct DashboardSession {
    path: PathBuf,
    cache: TableCache,
    table: Arc<Table>,
    /// Index into `table.months()`; `None` only when the table has no months.
    selected: Option<usize>,
    last_error: Option<String>,
}

impl DashboardSession {
    /// Load `path` and select its most recent month.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let mut cache = TableCache::new();
        let table = cache.load(&path)?;
        let selected = table.months().len().checked_sub(1);

        tracing::info!(
            path = %path.display(),
            months = table.months().len(),
            "session opened"
        );

        Ok(Self {
            path,
            cache,
            table,
            selected,
            last_error: None,
        })
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    /// Available months, chronological.
    pub fn months(&self) -> &[MonthKey] {
        self.table.months()
    }

    pub fn selected_month(&self) -> Option<MonthKey> {
        self.selected.and_then(|i| self.months().get(i).copied())
    }

    /// Zero-based position of the selected month, for "3/12" style labels.
    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    /// Error message from the last failed reload, cleared by a successful one.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Data-quality report of the table currently shown.
    pub fn load_report(&self) -> Option<&LoadReport> {
        self.cache.report(&self.path)
    }

    // ── Month selection ───────────────────────────────────────────────────

    /// Select `month`; it must be one of [`months`](Self::months).
    pub fn select_month(&mut self, month: &MonthKey) -> Result<()> {
        let index = self
            .months()
            .binary_search(month)
            .map_err(|_| FinanceError::InvalidMonthKey(month.to_string()))?;
        self.selected = Some(index);
        Ok(())
    }

    /// Parse `text` as `YYYY-MM` and select it.
    pub fn select_month_str(&mut self, text: &str) -> Result<()> {
        let month = MonthKey::parse(text)?;
        self.select_month(&month)
    }

    /// Move one month forward. Returns `false` at the last month.
    pub fn next_month(&mut self) -> bool {
        match self.selected {
            Some(i) if i + 1 < self.months().len() => {
                self.selected = Some(i + 1);
                true
            }
            _ => false,
        }
    }

    /// Move one month back. Returns `false` at the first month.
    pub fn previous_month(&mut self) -> bool {
        match self.selected {
            Some(i) if i > 0 => {
                self.selected = Some(i - 1);
                true
            }
            _ => false,
        }
    }

    pub fn first_month(&mut self) {
        if !self.months().is_empty() {
            self.selected = Some(0);
        }
    }

    pub fn last_month(&mut self) {
        self.selected = self.months().len().checked_sub(1);
    }

    // ── Queries ───────────────────────────────────────────────────────────

    /// Summary of the selected month, or `None` when there are no months.
    pub fn summary(&self) -> Option<MonthSummary> {
        self.selected_month()
            .map(|month| MonthAggregator::new(&self.table).summarize(&month))
    }

    /// One summary per month.
    pub fn history(&self) -> Vec<MonthSummary> {
        MonthAggregator::new(&self.table).history()
    }

    // ── Reload ────────────────────────────────────────────────────────────

    /// Re-check the data file and pick up any change.
    ///
    /// Returns `true` when a different table is now shown. On failure the
    /// previous table stays in place and the error is kept for
    /// [`last_error`](Self::last_error).
    pub fn reload(&mut self) -> bool {
        match self.cache.load(&self.path) {
            Ok(table) => {
                self.last_error = None;
                if Arc::ptr_eq(&table, &self.table) {
                    return false;
                }
                let previous = self.selected_month();
                self.table = table;
                self.selected = previous
                    .and_then(|month| self.months().binary_search(&month).ok())
                    .or_else(|| self.months().len().checked_sub(1));
                tracing::info!(path = %self.path.display(), "data file reloaded");
                true
            }
            Err(e) => {
                tracing::warn!(error = %e, "reload failed; keeping previous data");
                self.last_error = Some(e.to_string());
                false
            }
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

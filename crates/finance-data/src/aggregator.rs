//! Month aggregation over a loaded [`Table`].
//!
//! [`MonthAggregator`] answers the two questions the dashboard asks of the
//! data: which months exist, and what one month looks like (totals, savings
//! rate, balance and per-category breakdowns).

use finance_core::calculations;
use finance_core::error::{FinanceError, Result};
use finance_core::models::{CategoryAmount, MonthKey, MonthSummary, Table, TransactionType};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::debug;

// ── MonthAggregator ───────────────────────────────────────────────────────────

/// Read-only view over a table that produces month summaries.
#[derive(Debug, Clone, Copy)]
pub struct MonthAggregator<'a> {
    table: &'a Table,
}

impl<'a> MonthAggregator<'a> {
    pub fn new(table: &'a Table) -> Self {
        Self { table }
    }

    /// Month columns of the table, chronological, without duplicates.
    pub fn available_months(&self) -> Vec<MonthKey> {
        self.table.months().to_vec()
    }

    /// Most recent month, or `None` for a table without months.
    pub fn latest_month(&self) -> Option<MonthKey> {
        self.table.months().last().copied()
    }

    /// Summarise `month`.
    ///
    /// A month that is not a column of the table yields an all-zero summary
    /// with empty breakdowns. Breakdowns only list rows that have a cell for
    /// the month and are sorted by descending amount; equal amounts keep file
    /// order.
    pub fn summarize(&self, month: &MonthKey) -> MonthSummary {
        if !self.table.has_month(month) {
            debug!("month {} not in table, returning empty summary", month);
            return MonthSummary::empty(*month);
        }

        let mut income: Vec<CategoryAmount> = Vec::new();
        let mut expense: Vec<CategoryAmount> = Vec::new();
        let mut savings: Vec<CategoryAmount> = Vec::new();

        for row in self.table.rows() {
            let Some(amount) = row.value_for(month) else {
                continue;
            };
            let bucket = match row.kind {
                TransactionType::Income => &mut income,
                TransactionType::Expense => &mut expense,
                TransactionType::Savings => &mut savings,
            };
            bucket.push(CategoryAmount::new(row.category.clone(), amount));
        }

        let total_income = total_of(&income);
        let total_expense = total_of(&expense);
        let total_savings = total_of(&savings);

        sort_descending(&mut income);
        sort_descending(&mut expense);
        sort_descending(&mut savings);

        MonthSummary {
            month: *month,
            total_income,
            total_expense,
            total_savings,
            savings_rate: calculations::savings_rate(total_savings, total_income),
            balance: calculations::balance(total_income, total_expense, total_savings),
            income_breakdown: income,
            expense_breakdown: expense,
            savings_breakdown: savings,
        }
    }

    /// Like [`summarize`](Self::summarize) but rejects months that are not
    /// in the table with [`FinanceError::InvalidMonthKey`].
    pub fn summarize_checked(&self, month: &MonthKey) -> Result<MonthSummary> {
        if !self.table.has_month(month) {
            return Err(FinanceError::InvalidMonthKey(month.to_string()));
        }
        Ok(self.summarize(month))
    }

    /// Parse `text` as `YYYY-MM` and summarise it.
    ///
    /// Only malformed text is an error; a well-formed month that is not in
    /// the table gives an all-zero summary, as with [`summarize`](Self::summarize).
    pub fn summarize_str(&self, text: &str) -> Result<MonthSummary> {
        let month = MonthKey::parse(text)?;
        Ok(self.summarize(&month))
    }

    /// One summary per available month, chronological.
    pub fn history(&self) -> Vec<MonthSummary> {
        self.table
            .months()
            .iter()
            .map(|month| self.summarize(month))
            .collect()
    }
}

// ── HistoryTotals ─────────────────────────────────────────────────────────────

/// Sums over a run of month summaries, shown as the history footer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryTotals {
    pub months: usize,
    pub total_income: Decimal,
    pub total_expense: Decimal,
    pub total_savings: Decimal,
    pub balance: Decimal,
    /// Overall savings rate across the period.
    pub savings_rate: Decimal,
}

impl HistoryTotals {
    pub fn from_summaries(summaries: &[MonthSummary]) -> Self {
        let total_income = calculations::sum_amounts(summaries.iter().map(|s| s.total_income));
        let total_expense = calculations::sum_amounts(summaries.iter().map(|s| s.total_expense));
        let total_savings = calculations::sum_amounts(summaries.iter().map(|s| s.total_savings));

        Self {
            months: summaries.len(),
            total_income,
            total_expense,
            total_savings,
            balance: calculations::balance(total_income, total_expense, total_savings),
            savings_rate: calculations::savings_rate(total_savings, total_income),
        }
    }

    /// Average monthly balance, zero for an empty period.
    pub fn average_balance(&self) -> Decimal {
        if self.months == 0 {
            return Decimal::ZERO;
        }
        self.balance / Decimal::from(self.months)
    }
}

// ── Internal helpers ──────────────────────────────────────────────────────────

fn total_of(items: &[CategoryAmount]) -> Decimal {
    calculations::sum_amounts(items.iter().map(|item| item.amount))
}

/// Stable sort, so ties keep file order.
fn sort_descending(items: &mut [CategoryAmount]) {
    items.sort_by(|a, b| b.amount.cmp(&a.amount));
}

// ── Tests ─────────────────────────────────────────────────────────────────────

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{FinanceError, Result};

// ── TransactionType ───────────────────────────────────────────────────────────

/// Classification of a budget line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Money coming in (`Entrée`).
    Income,
    /// Money going out (`Sortie`).
    Expense,
    /// Money put aside (`Épargne`).
    Savings,
}

impl TransactionType {
    /// Every type, in presentation order.
    pub const ALL: [TransactionType; 3] = [Self::Income, Self::Expense, Self::Savings];

    /// Resolve a spreadsheet label to a type.
    ///
    /// Accepts the French labels used by the data files (with or without
    /// accents) as well as the English names, trimmed and case-insensitive.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "entrée" | "entree" | "income" => Some(Self::Income),
            "sortie" | "expense" => Some(Self::Expense),
            "épargne" | "epargne" | "savings" => Some(Self::Savings),
            _ => None,
        }
    }

    /// Label as written in the `Type` column of a data file.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Income => "Entrée",
            Self::Expense => "Sortie",
            Self::Savings => "Épargne",
        }
    }

    /// English display name.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Income => "Income",
            Self::Expense => "Expense",
            Self::Savings => "Savings",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for TransactionType {
    type Err = FinanceError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_label(s).ok_or_else(|| FinanceError::InvalidTransactionType(s.trim().to_string()))
    }
}

// ── MonthKey ──────────────────────────────────────────────────────────────────

fn month_key_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(\d{4})-(\d{2})$").expect("regex is valid"))
}

/// A validated `YYYY-MM` month identifier.
///
/// Ordering is chronological (year first, then month).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MonthKey {
    year: i32,
    month: u32,
}

impl MonthKey {
    /// Build a key from its parts; `month` must be in `1..=12`.
    pub fn new(year: i32, month: u32) -> Result<Self> {
        if !(0..=9999).contains(&year) || NaiveDate::from_ymd_opt(year, month, 1).is_none() {
            return Err(FinanceError::InvalidMonthKey(format!("{year:04}-{month:02}")));
        }
        Ok(Self { year, month })
    }

    /// Parse a `YYYY-MM` string (surrounding whitespace is ignored).
    pub fn parse(text: &str) -> Result<Self> {
        let trimmed = text.trim();
        let invalid = || FinanceError::InvalidMonthKey(trimmed.to_string());

        let caps = month_key_regex().captures(trimmed).ok_or_else(invalid)?;
        let year: i32 = caps[1].parse().map_err(|_| invalid())?;
        let month: u32 = caps[2].parse().map_err(|_| invalid())?;

        Self::new(year, month).map_err(|_| invalid())
    }

    /// `true` when `text` is a well-formed month-key.
    pub fn is_month_key(text: &str) -> bool {
        Self::parse(text).is_ok()
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// First calendar day of the month.
    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or_default()
    }

    /// Human-readable form, e.g. `"March 2024"`.
    pub fn long_label(&self) -> String {
        self.first_day().format("%B %Y").to_string()
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for MonthKey {
    type Err = FinanceError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for MonthKey {
    type Error = FinanceError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<MonthKey> for String {
    fn from(key: MonthKey) -> Self {
        key.to_string()
    }
}

// ── TransactionRow ────────────────────────────────────────────────────────────

/// One budget line: a category, its type, and its amount for each month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRow {
    /// Free-text label, unique within a table.
    pub category: String,
    /// Income, expense or savings.
    #[serde(rename = "type")]
    pub kind: TransactionType,
    /// Amount per month. Months without a cell are absent.
    #[serde(default)]
    pub amounts: BTreeMap<MonthKey, Decimal>,
}

impl TransactionRow {
    /// Create a row with no amounts.
    pub fn new(category: impl Into<String>, kind: TransactionType) -> Self {
        Self {
            category: category.into(),
            kind,
            amounts: BTreeMap::new(),
        }
    }

    /// Builder-style helper that records `amount` for `month`.
    pub fn with_amount(mut self, month: MonthKey, amount: Decimal) -> Self {
        self.amounts.insert(month, amount);
        self
    }

    /// The cell for `month`, or `None` when the row has no value for it.
    pub fn value_for(&self, month: &MonthKey) -> Option<Decimal> {
        self.amounts.get(month).copied()
    }

    /// The amount for `month`; a missing cell counts as zero.
    pub fn amount_for(&self, month: &MonthKey) -> Decimal {
        self.value_for(month).unwrap_or(Decimal::ZERO)
    }
}

// ── Table ─────────────────────────────────────────────────────────────────────

/// The in-memory spreadsheet: rows in file order plus every month column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    rows: Vec<TransactionRow>,
    months: Vec<MonthKey>,
}

impl Table {
    /// Build a table from rows and the month columns declared by the source.
    ///
    /// The month list is the union of `months` and every month present in a
    /// row, deduplicated and sorted ascending.
    pub fn new(rows: Vec<TransactionRow>, months: impl IntoIterator<Item = MonthKey>) -> Self {
        let mut all: BTreeSet<MonthKey> = months.into_iter().collect();
        for row in &rows {
            all.extend(row.amounts.keys().copied());
        }
        Self {
            rows,
            months: all.into_iter().collect(),
        }
    }

    /// Build a table whose months are inferred from the rows alone.
    pub fn from_rows(rows: Vec<TransactionRow>) -> Self {
        Self::new(rows, std::iter::empty())
    }

    pub fn rows(&self) -> &[TransactionRow] {
        &self.rows
    }

    /// Month columns, sorted chronologically without duplicates.
    pub fn months(&self) -> &[MonthKey] {
        &self.months
    }

    /// `true` when `month` is one of the table's columns.
    pub fn has_month(&self, month: &MonthKey) -> bool {
        self.months.binary_search(month).is_ok()
    }

    /// Number of categories (rows).
    pub fn category_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows of the given type, in file order.
    pub fn rows_of(&self, kind: TransactionType) -> impl Iterator<Item = &TransactionRow> {
        self.rows.iter().filter(move |row| row.kind == kind)
    }

    /// Look up a row by its category label.
    pub fn find(&self, category: &str) -> Option<&TransactionRow> {
        self.rows.iter().find(|row| row.category == category)
    }
}

// ── Month summary ─────────────────────────────────────────────────────────────

/// One category's amount within a month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryAmount {
    pub category: String,
    pub amount: Decimal,
}

impl CategoryAmount {
    pub fn new(category: impl Into<String>, amount: Decimal) -> Self {
        Self {
            category: category.into(),
            amount,
        }
    }
}

/// Totals, derived metrics and breakdowns for one month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthSummary {
    pub month: MonthKey,
    pub total_income: Decimal,
    pub total_expense: Decimal,
    pub total_savings: Decimal,
    /// `total_savings / total_income`, zero when there is no income.
    pub savings_rate: Decimal,
    /// `total_income - total_expense - total_savings`.
    pub balance: Decimal,
    /// Sorted by descending amount.
    pub income_breakdown: Vec<CategoryAmount>,
    /// Sorted by descending amount.
    pub expense_breakdown: Vec<CategoryAmount>,
    /// Sorted by descending amount.
    pub savings_breakdown: Vec<CategoryAmount>,
}

impl MonthSummary {
    /// An all-zero summary with empty breakdowns.
    pub fn empty(month: MonthKey) -> Self {
        Self {
            month,
            total_income: Decimal::ZERO,
            total_expense: Decimal::ZERO,
            total_savings: Decimal::ZERO,
            savings_rate: Decimal::ZERO,
            balance: Decimal::ZERO,
            income_breakdown: Vec::new(),
            expense_breakdown: Vec::new(),
            savings_breakdown: Vec::new(),
        }
    }

    /// `false` when no row had a cell for this month.
    pub fn has_data(&self) -> bool {
        !(self.income_breakdown.is_empty()
            && self.expense_breakdown.is_empty()
            && self.savings_breakdown.is_empty())
    }

    /// Total for one transaction type.
    pub fn total(&self, kind: TransactionType) -> Decimal {
        match kind {
            TransactionType::Income => self.total_income,
            TransactionType::Expense => self.total_expense,
            TransactionType::Savings => self.total_savings,
        }
    }

    /// Per-category breakdown for one transaction type.
    pub fn breakdown(&self, kind: TransactionType) -> &[CategoryAmount] {
        match kind {
            TransactionType::Income => &self.income_breakdown,
            TransactionType::Expense => &self.expense_breakdown,
            TransactionType::Savings => &self.savings_breakdown,
        }
    }

    /// Savings rate as a percentage, for display.
    pub fn savings_rate_percent(&self) -> f64 {
        crate::calculations::to_f64(self.savings_rate) * 100.0
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn key(s: &str) -> MonthKey {
        MonthKey::parse(s).unwrap()
    }

    // ── TransactionType ───────────────────────────────────────────────────────

    #[test]
    fn test_type_from_french_labels() {
        assert_eq!(TransactionType::from_label("Entrée"), Some(TransactionType::Income));
        assert_eq!(TransactionType::from_label("Sortie"), Some(TransactionType::Expense));
        assert_eq!(TransactionType::from_label("Épargne"), Some(TransactionType::Savings));
    }

    #[test]
    fn test_type_from_label_is_lenient() {
        assert_eq!(TransactionType::from_label("  entree "), Some(TransactionType::Income));
        assert_eq!(TransactionType::from_label("EPARGNE"), Some(TransactionType::Savings));
        assert_eq!(TransactionType::from_label("ÉPARGNE"), Some(TransactionType::Savings));
        assert_eq!(TransactionType::from_label("Expense"), Some(TransactionType::Expense));
        assert_eq!(TransactionType::from_label("Patrimoine"), None);
        assert_eq!(TransactionType::from_label(""), None);
    }

    #[test]
    fn test_type_from_str_error() {
        let err = "Patrimoine".parse::<TransactionType>().unwrap_err();
        assert!(matches!(err, FinanceError::InvalidTransactionType(ref s) if s == "Patrimoine"));
    }

    #[test]
    fn test_type_label_round_trips() {
        for kind in TransactionType::ALL {
            assert_eq!(TransactionType::from_label(kind.label()), Some(kind));
        }
    }

    // ── MonthKey ──────────────────────────────────────────────────────────────

    #[test]
    fn test_month_key_parse_and_display() {
        let k = key("2024-03");
        assert_eq!(k.year(), 2024);
        assert_eq!(k.month(), 3);
        assert_eq!(k.to_string(), "2024-03");
        assert_eq!(key(" 2024-11 ").to_string(), "2024-11");
    }

    #[test]
    fn test_month_key_rejects_malformed() {
        for bad in ["2024-13", "2024-00", "2024-1", "24-01", "2024/01", "Catégorie", ""] {
            assert!(MonthKey::parse(bad).is_err(), "{bad:?} should be rejected");
            assert!(!MonthKey::is_month_key(bad));
        }
    }

    #[test]
    fn test_month_key_ordering_is_chronological() {
        let mut keys = vec![key("2024-10"), key("2023-12"), key("2024-02")];
        keys.sort();
        let rendered: Vec<String> = keys.iter().map(|k| k.to_string()).collect();
        assert_eq!(rendered, vec!["2023-12", "2024-02", "2024-10"]);
    }

    #[test]
    fn test_month_key_long_label() {
        assert_eq!(key("2024-03").long_label(), "March 2024");
    }

    #[test]
    fn test_month_key_serde_as_string() {
        let json = serde_json::to_string(&key("2024-05")).unwrap();
        assert_eq!(json, "\"2024-05\"");
        let back: MonthKey = serde_json::from_str(&json).unwrap();
        assert_eq!(back, key("2024-05"));
        assert!(serde_json::from_str::<MonthKey>("\"2024-99\"").is_err());
    }

    // ── TransactionRow / Table ────────────────────────────────────────────────

    #[test]
    fn test_row_missing_amount_is_zero() {
        let row = TransactionRow::new("Loyer", TransactionType::Expense)
            .with_amount(key("2024-01"), Decimal::from(950));
        assert_eq!(row.amount_for(&key("2024-01")), Decimal::from(950));
        assert_eq!(row.amount_for(&key("2024-02")), Decimal::ZERO);
        assert_eq!(row.value_for(&key("2024-02")), None);
    }

    #[test]
    fn test_table_months_union_sorted_dedup() {
        let rows = vec![
            TransactionRow::new("A", TransactionType::Income)
                .with_amount(key("2024-03"), Decimal::ONE),
            TransactionRow::new("B", TransactionType::Expense)
                .with_amount(key("2024-01"), Decimal::ONE)
                .with_amount(key("2024-03"), Decimal::ONE),
        ];
        let table = Table::new(rows, [key("2024-02"), key("2024-01")]);
        let months: Vec<String> = table.months().iter().map(|m| m.to_string()).collect();
        assert_eq!(months, vec!["2024-01", "2024-02", "2024-03"]);
        assert!(table.has_month(&key("2024-02")));
        assert!(!table.has_month(&key("2024-04")));
    }

    #[test]
    fn test_table_rows_of_and_find() {
        let table = Table::from_rows(vec![
            TransactionRow::new("Salaire", TransactionType::Income),
            TransactionRow::new("Loyer", TransactionType::Expense),
            TransactionRow::new("Bonus", TransactionType::Income),
        ]);
        let incomes: Vec<&str> = table
            .rows_of(TransactionType::Income)
            .map(|r| r.category.as_str())
            .collect();
        assert_eq!(incomes, vec!["Salaire", "Bonus"]);
        assert_eq!(table.find("Loyer").map(|r| r.kind), Some(TransactionType::Expense));
        assert!(table.find("Nope").is_none());
        assert_eq!(table.category_count(), 3);
    }

    // ── MonthSummary ──────────────────────────────────────────────────────────

    #[test]
    fn test_empty_summary() {
        let s = MonthSummary::empty(key("2024-01"));
        assert!(!s.has_data());
        assert_eq!(s.total(TransactionType::Income), Decimal::ZERO);
        assert!(s.breakdown(TransactionType::Expense).is_empty());
        assert_eq!(s.savings_rate_percent(), 0.0);
    }

    #[test]
    fn test_summary_serializes_month_as_string() {
        let s = MonthSummary::empty(key("2024-01"));
        let value = serde_json::to_value(&s).unwrap();
        assert_eq!(value["month"], "2024-01");
        assert!(value["expense_breakdown"].as_array().unwrap().is_empty());
    }
}

//! Spreadsheet loading for the finance dashboard.
//!
//! Reads the budget spreadsheet (one row per category, a `Catégorie` column,
//! a `Type` column and one column per `YYYY-MM` month), either as an Excel or
//! OpenDocument workbook or as delimited text, and converts it into a
//! [`Table`]. Shape problems are fatal
//! ([`FinanceError::DataUnavailable`]); bad cells and rows are not.

use std::collections::HashSet;
use std::path::Path;
use std::str::FromStr;

use calamine::{open_workbook_auto, Data, Reader};
use finance_core::error::{FinanceError, Result};
use finance_core::models::{MonthKey, Table, TransactionRow, TransactionType};
use rust_decimal::Decimal;
use tracing::{debug, info, warn};

/// Header of the category column as written by the spreadsheet template.
pub const CATEGORY_COLUMN: &str = "Catégorie";

/// Header of the type column.
pub const TYPE_COLUMN: &str = "Type";

/// Accepted spellings of the category header (compared lowercase).
const CATEGORY_ALIASES: [&str; 3] = ["catégorie", "categorie", "category"];

// ── Public types ──────────────────────────────────────────────────────────────

/// Data-quality counters gathered while loading a file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Rows kept in the table.
    pub rows_loaded: usize,
    /// Rows dropped (empty category, unknown type, duplicate category).
    pub rows_skipped: usize,
    /// Non-blank cells that could not be parsed and were read as zero.
    pub cells_defaulted: usize,
    /// Headers that are neither category, type nor a month.
    pub ignored_columns: Vec<String>,
}

impl LoadReport {
    /// `true` when anything was skipped, defaulted or ignored.
    pub fn has_warnings(&self) -> bool {
        self.rows_skipped > 0 || self.cells_defaulted > 0 || !self.ignored_columns.is_empty()
    }

    /// One-line description of the warnings, for a status bar.
    pub fn warning_line(&self) -> Option<String> {
        if !self.has_warnings() {
            return None;
        }
        let mut parts = Vec::new();
        if self.rows_skipped > 0 {
            parts.push(format!("{} row(s) skipped", self.rows_skipped));
        }
        if self.cells_defaulted > 0 {
            parts.push(format!("{} unreadable cell(s) read as 0", self.cells_defaulted));
        }
        if !self.ignored_columns.is_empty() {
            parts.push(format!(
                "ignored column(s): {}",
                self.ignored_columns.join(", ")
            ));
        }
        Some(parts.join("; "))
    }
}

/// A table together with the report produced while reading it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedTable {
    pub table: Table,
    pub report: LoadReport,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load the spreadsheet at `path`.
pub fn load_table(path: &Path) -> Result<Table> {
    load_table_with_report(path).map(|loaded| loaded.table)
}

/// Load the spreadsheet at `path` and return the data-quality report too.
///
/// Workbooks (`.xlsx`, `.xlsm`, `.xls`, `.ods`) are read from their first
/// sheet; anything else is read as delimited text. Fails with
/// [`FinanceError::DataUnavailable`] when the file is missing, unreadable,
/// not text, or lacks the required columns.
pub fn load_table_with_report(path: &Path) -> Result<LoadedTable> {
    if !path.exists() {
        return Err(FinanceError::data_unavailable(path, "file not found"));
    }
    if path.is_dir() {
        return Err(FinanceError::data_unavailable(path, "path is a directory"));
    }

    if is_workbook(path) {
        return read_workbook(path);
    }

    let bytes = std::fs::read(path)
        .map_err(|e| FinanceError::data_unavailable(path, format!("cannot read file: {e}")))?;
    let content = String::from_utf8(bytes).map_err(|_| {
        FinanceError::data_unavailable(
            path,
            "file is neither UTF-8 text nor a workbook (.xlsx, .xls, .ods)",
        )
    })?;

    parse_table(&content, path)
}

/// Parse spreadsheet text. `source` is only used in errors and logs.
pub fn parse_table(content: &str, source: &Path) -> Result<LoadedTable> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    if content.trim().is_empty() {
        return Err(FinanceError::data_unavailable(source, "file is empty"));
    }

    let delimiter = sniff_delimiter(content);
    debug!(delimiter = %(delimiter as char), "parsing {}", source.display());

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| {
            FinanceError::data_unavailable(source, format!("header row is unreadable: {e}"))
        })?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let records = reader.records().enumerate().map(|(index, record)| {
        // Header is line 1.
        let line = index + 2;
        record
            .map(|record| (line, record.iter().map(str::to_string).collect()))
            .map_err(|e| {
                FinanceError::data_unavailable(source, format!("line {line} is malformed: {e}"))
            })
    });

    build_table(&headers, records, source)
}

// ── Workbooks ─────────────────────────────────────────────────────────────────

/// Extensions read with `calamine` instead of the CSV reader.
const WORKBOOK_EXTENSIONS: [&str; 4] = ["xlsx", "xlsm", "xls", "ods"];

/// `true` when `path` has a workbook extension.
pub fn is_workbook(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| WORKBOOK_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// Read the first sheet of a workbook through the same row pipeline as CSV.
fn read_workbook(path: &Path) -> Result<LoadedTable> {
    let mut workbook = open_workbook_auto(path).map_err(|e| {
        FinanceError::data_unavailable(path, format!("cannot open workbook: {e}"))
    })?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| FinanceError::data_unavailable(path, "workbook has no sheet"))?
        .map_err(|e| FinanceError::data_unavailable(path, format!("cannot read sheet: {e}")))?;
    debug!(rows = range.height(), "reading workbook {}", path.display());

    // Sheet rows are 1-based; the used range may not start at the top.
    let header_line = range.start().map(|(row, _)| row as usize + 1).unwrap_or(1);
    let mut rows = range
        .rows()
        .map(|row| row.iter().map(cell_text).collect::<Vec<String>>());

    let headers = rows
        .next()
        .ok_or_else(|| FinanceError::data_unavailable(path, "file is empty"))?;
    let records = rows
        .enumerate()
        .map(|(index, cells)| Ok((header_line + 1 + index, cells)));

    build_table(&headers, records, path)
}

/// Text of one workbook cell as the row pipeline expects it.
///
/// Date cells become `YYYY-MM` so that month headers stored as dates are
/// recognised.
fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(text) => text.trim().to_string(),
        Data::Float(value) => value.to_string(),
        Data::Int(value) => value.to_string(),
        Data::DateTime(value) => value
            .as_datetime()
            .map(|date| date.format("%Y-%m").to_string())
            .unwrap_or_else(|| cell.to_string()),
        Data::DateTimeIso(text) => text
            .get(..7)
            .filter(|prefix| MonthKey::is_month_key(prefix))
            .map(str::to_string)
            .unwrap_or_else(|| text.clone()),
        other => other.to_string(),
    }
}

// ── Row pipeline ──────────────────────────────────────────────────────────────

/// Turn a header row and numbered records into a table.
fn build_table<I>(headers: &[String], records: I, source: &Path) -> Result<LoadedTable>
where
    I: IntoIterator<Item = Result<(usize, Vec<String>)>>,
{
    let headers: Vec<String> = headers.iter().map(|h| h.trim().to_string()).collect();
    let layout = ColumnLayout::from_headers(&headers)
        .map_err(|reason| FinanceError::data_unavailable(source, reason))?;

    let mut report = LoadReport {
        ignored_columns: layout.ignored.clone(),
        ..LoadReport::default()
    };
    for column in &layout.ignored {
        warn!("Ignoring column {:?} in {}", column, source.display());
    }

    let mut rows: Vec<TransactionRow> = Vec::new();
    let mut seen_categories: HashSet<String> = HashSet::new();

    for record in records {
        let (line, record) = record?;

        if record.iter().all(|f| f.trim().is_empty()) {
            continue;
        }

        let category = field(&record, layout.category);
        if category.is_empty() {
            warn!("Line {}: empty category, row skipped", line);
            report.rows_skipped += 1;
            continue;
        }

        let type_label = field(&record, layout.kind);
        let Some(kind) = TransactionType::from_label(type_label) else {
            warn!(
                "Line {}: unsupported type {:?} for {:?}, row skipped",
                line, type_label, category
            );
            report.rows_skipped += 1;
            continue;
        };

        if !seen_categories.insert(category.to_string()) {
            warn!("Line {}: duplicate category {:?}, row skipped", line, category);
            report.rows_skipped += 1;
            continue;
        }

        let mut row = TransactionRow::new(category, kind);
        for (column, month) in &layout.months {
            let cell = field(&record, *column);
            match parse_amount(cell) {
                AmountCell::Missing => {}
                AmountCell::Value(amount) => {
                    row.amounts.insert(*month, amount);
                }
                AmountCell::Invalid => {
                    warn!(
                        "Line {}: unreadable amount {:?} for {:?} in {}, using 0",
                        line, cell, category, month
                    );
                    report.cells_defaulted += 1;
                    row.amounts.insert(*month, Decimal::ZERO);
                }
            }
        }
        rows.push(row);
    }

    report.rows_loaded = rows.len();
    let table = Table::new(rows, layout.months.iter().map(|(_, month)| *month));

    info!(
        rows = report.rows_loaded,
        skipped = report.rows_skipped,
        months = table.months().len(),
        "Loaded {}",
        source.display()
    );

    Ok(LoadedTable { table, report })
}

/// Trimmed field `index` of a record, empty when the record is short.
fn field(record: &[String], index: usize) -> &str {
    record.get(index).map(|f| f.trim()).unwrap_or("")
}

// ── Cell parsing ──────────────────────────────────────────────────────────────

/// Outcome of reading one amount cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmountCell {
    /// Blank cell: the row has no value for that month.
    Missing,
    /// A parsed amount.
    Value(Decimal),
    /// Something that is not a number.
    Invalid,
}

/// Parse an amount cell leniently.
///
/// Whitespace (including non-breaking spaces) and the `€` sign are dropped.
/// A lone comma is a decimal separator (`"12,50"`); when both `,` and `.`
/// appear, the last one is the decimal separator and the other groups
/// thousands.
pub fn parse_amount(cell: &str) -> AmountCell {
    let cleaned: String = cell
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '€')
        .collect();

    if cleaned.is_empty() || cleaned.eq_ignore_ascii_case("nan") {
        return AmountCell::Missing;
    }

    let normalized = match (cleaned.rfind(','), cleaned.rfind('.')) {
        (Some(comma), Some(dot)) if comma > dot => cleaned.replace('.', "").replace(',', "."),
        (Some(_), Some(_)) => cleaned.replace(',', ""),
        (Some(_), None) => cleaned.replace(',', "."),
        _ => cleaned,
    };

    Decimal::from_str(&normalized)
        .or_else(|_| Decimal::from_scientific(&normalized))
        .map(AmountCell::Value)
        .unwrap_or(AmountCell::Invalid)
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Column positions resolved from the header row.
#[derive(Debug)]
struct ColumnLayout {
    category: usize,
    kind: usize,
    months: Vec<(usize, MonthKey)>,
    ignored: Vec<String>,
}

impl ColumnLayout {
    fn from_headers(headers: &[String]) -> std::result::Result<Self, String> {
        let lowered: Vec<String> = headers.iter().map(|h| h.to_lowercase()).collect();

        let category = lowered
            .iter()
            .position(|h| CATEGORY_ALIASES.contains(&h.as_str()))
            .ok_or_else(|| format!("missing required column '{CATEGORY_COLUMN}'"))?;
        let kind = lowered
            .iter()
            .position(|h| h == "type")
            .ok_or_else(|| format!("missing required column '{TYPE_COLUMN}'"))?;

        let mut months: Vec<(usize, MonthKey)> = Vec::new();
        let mut ignored: Vec<String> = Vec::new();
        for (index, header) in headers.iter().enumerate() {
            if index == category || index == kind {
                continue;
            }
            match MonthKey::parse(header) {
                Ok(month) if months.iter().any(|(_, m)| *m == month) => {
                    ignored.push(header.clone());
                }
                Ok(month) => months.push((index, month)),
                Err(_) => ignored.push(header.clone()),
            }
        }

        if months.is_empty() {
            return Err("no month column in YYYY-MM format".to_string());
        }

        Ok(Self {
            category,
            kind,
            months,
            ignored,
        })
    }
}

/// Pick the field delimiter from the header line: `;`, tab or `,`.
fn sniff_delimiter(content: &str) -> u8 {
    let header = content.lines().next().unwrap_or("");
    let count = |c: char| header.chars().filter(|&h| h == c).count();

    let candidates = [(b';', count(';')), (b'\t', count('\t')), (b',', count(','))];
    candidates
        .iter()
        .filter(|(_, n)| *n > 0)
        .max_by_key(|(_, n)| *n)
        .map(|(d, _)| *d)
        .unwrap_or(b',')
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;
    use tempfile::NamedTempFile;

    fn d(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn key(s: &str) -> MonthKey {
        MonthKey::parse(s).unwrap()
    }

    fn parse(content: &str) -> Result<LoadedTable> {
        parse_table(content, Path::new("test.csv"))
    }

    fn write_temp_csv(contents: &str) -> NamedTempFile {
        let mut tmp = NamedTempFile::new().expect("temp file");
        write!(tmp, "{}", contents).expect("write csv");
        tmp
    }

    // ── parse_amount ──────────────────────────────────────────────────────────

    #[test]
    fn test_parse_amount_plain_and_decimal_comma() {
        assert_eq!(parse_amount("2800"), AmountCell::Value(d("2800")));
        assert_eq!(parse_amount("950.50"), AmountCell::Value(d("950.50")));
        assert_eq!(parse_amount("12,5"), AmountCell::Value(d("12.5")));
        assert_eq!(parse_amount("-45.10"), AmountCell::Value(d("-45.10")));
    }

    #[test]
    fn test_parse_amount_thousands_and_currency() {
        assert_eq!(parse_amount("1 234,56 €"), AmountCell::Value(d("1234.56")));
        assert_eq!(parse_amount("1\u{a0}234,56"), AmountCell::Value(d("1234.56")));
        assert_eq!(parse_amount("1.234,56"), AmountCell::Value(d("1234.56")));
        assert_eq!(parse_amount("1,234.56"), AmountCell::Value(d("1234.56")));
    }

    #[test]
    fn test_parse_amount_missing_and_invalid() {
        assert_eq!(parse_amount(""), AmountCell::Missing);
        assert_eq!(parse_amount("   "), AmountCell::Missing);
        assert_eq!(parse_amount("NaN"), AmountCell::Missing);
        assert_eq!(parse_amount("n/a"), AmountCell::Invalid);
        assert_eq!(parse_amount("abc"), AmountCell::Invalid);
    }

    #[test]
    fn test_parse_amount_scientific() {
        assert_eq!(parse_amount("1.5e3"), AmountCell::Value(d("1500")));
    }

    // ── sniff_delimiter ───────────────────────────────────────────────────────

    #[test]
    fn test_sniff_delimiter() {
        assert_eq!(sniff_delimiter("Catégorie,Type,2024-01\n"), b',');
        assert_eq!(sniff_delimiter("Catégorie;Type;2024-01\nA;B;1,5\n"), b';');
        assert_eq!(sniff_delimiter("Catégorie\tType\t2024-01\n"), b'\t');
        assert_eq!(sniff_delimiter("Catégorie\n"), b',');
    }

    // ── parse_table ───────────────────────────────────────────────────────────

    #[test]
    fn test_parse_basic_table() {
        let loaded = parse(
            "Catégorie,Type,2024-01,2024-02\n\
             Salaire,Entrée,2800,2810.50\n\
             Loyer,Sortie,950,950\n\
             Livret A,Épargne,300,\n",
        )
        .unwrap();

        let table = &loaded.table;
        assert_eq!(table.category_count(), 3);
        assert_eq!(table.months(), &[key("2024-01"), key("2024-02")]);

        let salaire = table.find("Salaire").unwrap();
        assert_eq!(salaire.kind, TransactionType::Income);
        assert_eq!(salaire.amount_for(&key("2024-02")), d("2810.50"));

        let livret = table.find("Livret A").unwrap();
        assert_eq!(livret.kind, TransactionType::Savings);
        assert_eq!(livret.value_for(&key("2024-02")), None);

        assert!(!loaded.report.has_warnings());
        assert_eq!(loaded.report.rows_loaded, 3);
    }

    #[test]
    fn test_parse_semicolon_export_with_bom() {
        let loaded = parse(
            "\u{feff}Catégorie;Type;2024-01\n\
             Nourriture;Sortie;451,37\n",
        )
        .unwrap();
        let row = loaded.table.find("Nourriture").unwrap();
        assert_eq!(row.amount_for(&key("2024-01")), d("451.37"));
    }

    #[test]
    fn test_parse_months_sorted_even_if_columns_are_not() {
        let loaded = parse("Type,2024-03,Catégorie,2023-12,2024-01\nSortie,1,Loyer,2,3\n").unwrap();
        assert_eq!(
            loaded.table.months(),
            &[key("2023-12"), key("2024-01"), key("2024-03")]
        );
        let row = loaded.table.find("Loyer").unwrap();
        assert_eq!(row.amount_for(&key("2023-12")), d("2"));
    }

    #[test]
    fn test_parse_header_aliases_are_case_insensitive() {
        let loaded = parse("category,TYPE,2024-01\nRent,Expense,900\n").unwrap();
        assert_eq!(loaded.table.find("Rent").unwrap().kind, TransactionType::Expense);
    }

    #[test]
    fn test_missing_category_column_is_unavailable() {
        let err = parse("Nom,Type,2024-01\nLoyer,Sortie,950\n").unwrap_err();
        assert!(err.is_data_unavailable());
        assert!(err.to_string().contains("Catégorie"));
    }

    #[test]
    fn test_missing_type_column_is_unavailable() {
        let err = parse("Catégorie,Genre,2024-01\nLoyer,Sortie,950\n").unwrap_err();
        assert!(err.is_data_unavailable());
        assert!(err.to_string().contains("Type"));
    }

    #[test]
    fn test_no_month_column_is_unavailable() {
        let err = parse("Catégorie,Type,Janvier\nLoyer,Sortie,950\n").unwrap_err();
        assert!(err.is_data_unavailable());
        assert!(err.to_string().contains("YYYY-MM"));
    }

    #[test]
    fn test_empty_content_is_unavailable() {
        assert!(parse("").unwrap_err().is_data_unavailable());
        assert!(parse("  \n\n").unwrap_err().is_data_unavailable());
    }

    #[test]
    fn test_unknown_type_and_empty_category_rows_are_skipped() {
        let loaded = parse(
            "Catégorie,Type,2024-01\n\
             Salaire,Entrée,2800\n\
             Résidence principale,Patrimoine,180000\n\
             ,Sortie,12\n\
             ,,\n",
        )
        .unwrap();
        assert_eq!(loaded.table.category_count(), 1);
        assert_eq!(loaded.report.rows_skipped, 2);
        assert!(loaded.report.warning_line().unwrap().contains("2 row(s) skipped"));
    }

    #[test]
    fn test_duplicate_category_keeps_first_row() {
        let loaded = parse(
            "Catégorie,Type,2024-01\n\
             Loyer,Sortie,950\n\
             Loyer,Sortie,1000\n",
        )
        .unwrap();
        assert_eq!(loaded.table.category_count(), 1);
        assert_eq!(
            loaded.table.find("Loyer").unwrap().amount_for(&key("2024-01")),
            d("950")
        );
        assert_eq!(loaded.report.rows_skipped, 1);
    }

    #[test]
    fn test_unreadable_cells_become_zero() {
        let loaded = parse(
            "Catégorie,Type,2024-01,2024-02\n\
             Loisirs,Sortie,beaucoup,180\n",
        )
        .unwrap();
        let row = loaded.table.find("Loisirs").unwrap();
        assert_eq!(row.value_for(&key("2024-01")), Some(Decimal::ZERO));
        assert_eq!(row.amount_for(&key("2024-02")), d("180"));
        assert_eq!(loaded.report.cells_defaulted, 1);
    }

    #[test]
    fn test_extra_and_duplicate_columns_are_ignored() {
        let loaded = parse(
            "Catégorie,Type,Notes,2024-01,2024-01\n\
             Loyer,Sortie,fixe,950,999\n",
        )
        .unwrap();
        assert_eq!(loaded.table.months(), &[key("2024-01")]);
        assert_eq!(
            loaded.table.find("Loyer").unwrap().amount_for(&key("2024-01")),
            d("950")
        );
        assert_eq!(
            loaded.report.ignored_columns,
            vec!["Notes".to_string(), "2024-01".to_string()]
        );
    }

    #[test]
    fn test_short_rows_are_tolerated() {
        let loaded = parse(
            "Catégorie,Type,2024-01,2024-02\n\
             Loyer,Sortie,950\n",
        )
        .unwrap();
        let row = loaded.table.find("Loyer").unwrap();
        assert_eq!(row.value_for(&key("2024-02")), None);
    }

    // ── load_table ────────────────────────────────────────────────────────────

    #[test]
    fn test_load_table_from_file() {
        let tmp = write_temp_csv("Catégorie,Type,2024-01\nSalaire,Entrée,2800\n");
        let table = load_table(tmp.path()).unwrap();
        assert_eq!(table.category_count(), 1);
    }

    #[test]
    fn test_load_missing_file_is_unavailable() {
        let err = load_table(Path::new("/definitely/not/here/finances.csv")).unwrap_err();
        assert!(err.is_data_unavailable());
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_load_directory_is_unavailable() {
        let dir = tempfile::TempDir::new().unwrap();
        assert!(load_table(dir.path()).unwrap_err().is_data_unavailable());
    }

    #[test]
    fn test_load_binary_file_is_unavailable() {
        let mut tmp = NamedTempFile::new().unwrap();
        tmp.write_all(&[0x50, 0x4b, 0x03, 0x04, 0xff, 0xfe, 0x00]).unwrap();
        let err = load_table(tmp.path()).unwrap_err();
        assert!(err.is_data_unavailable());
    }

    #[test]
    fn test_load_bundled_sample() {
        let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("../../data/finances_sample.csv");
        let loaded = load_table_with_report(&path).unwrap();

        assert_eq!(loaded.table.months().len(), 12);
        assert_eq!(loaded.table.months()[0], key("2024-01"));
        assert_eq!(loaded.table.rows_of(TransactionType::Income).count(), 3);
        assert_eq!(loaded.table.rows_of(TransactionType::Expense).count(), 11);
        assert_eq!(loaded.table.rows_of(TransactionType::Savings).count(), 4);
        // Wealth rows are not part of the three budget types.
        assert_eq!(loaded.report.rows_skipped, 7);
    }

    // ── workbooks ─────────────────────────────────────────────────────────────

    fn write_workbook(path: &Path) {
        let mut workbook = rust_xlsxwriter::Workbook::new();
        let sheet = workbook.add_worksheet();
        for (col, header) in ["Catégorie", "Type", "2024-01", "2024-02"].iter().enumerate() {
            sheet.write_string(0, col as u16, *header).unwrap();
        }
        sheet.write_string(1, 0, "Salaire").unwrap();
        sheet.write_string(1, 1, "Entrée").unwrap();
        sheet.write_number(1, 2, 2800.0).unwrap();
        sheet.write_number(1, 3, 2810.5).unwrap();
        sheet.write_string(2, 0, "Loyer").unwrap();
        sheet.write_string(2, 1, "Sortie").unwrap();
        sheet.write_number(2, 2, 950.0).unwrap();
        sheet.write_string(3, 0, "Résidence principale").unwrap();
        sheet.write_string(3, 1, "Patrimoine").unwrap();
        sheet.write_number(3, 2, 180000.0).unwrap();
        workbook.save(path).unwrap();
    }

    #[test]
    fn test_is_workbook() {
        assert!(is_workbook(Path::new("finances_data.xlsx")));
        assert!(is_workbook(Path::new("Budget.XLSX")));
        assert!(is_workbook(Path::new("budget.ods")));
        assert!(!is_workbook(Path::new("finances_data.csv")));
        assert!(!is_workbook(Path::new("finances")));
    }

    #[test]
    fn test_load_xlsx_workbook() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("finances_data.xlsx");
        write_workbook(&path);

        let loaded = load_table_with_report(&path).unwrap();
        let table = &loaded.table;
        assert_eq!(table.months(), &[key("2024-01"), key("2024-02")]);
        assert_eq!(table.category_count(), 2);

        let salaire = table.find("Salaire").unwrap();
        assert_eq!(salaire.kind, TransactionType::Income);
        assert_eq!(salaire.amount_for(&key("2024-02")), d("2810.5"));

        let loyer = table.find("Loyer").unwrap();
        assert_eq!(loyer.amount_for(&key("2024-01")), d("950"));
        assert_eq!(loyer.value_for(&key("2024-02")), None);

        assert_eq!(loaded.report.rows_skipped, 1);
    }

    #[test]
    fn test_corrupt_workbook_is_unavailable() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("finances_data.xlsx");
        std::fs::write(&path, "Catégorie,Type,2024-01\n").unwrap();

        let err = load_table(&path).unwrap_err();
        assert!(err.is_data_unavailable());
        assert!(err.to_string().contains("cannot open workbook"));
    }

    #[test]
    fn test_cell_text() {
        assert_eq!(cell_text(&Data::Empty), "");
        assert_eq!(cell_text(&Data::String(" Loyer ".to_string())), "Loyer");
        assert_eq!(cell_text(&Data::Float(2800.0)), "2800");
        assert_eq!(cell_text(&Data::Float(29.99)), "29.99");
        assert_eq!(cell_text(&Data::Int(-45)), "-45");
        assert_eq!(
            cell_text(&Data::DateTimeIso("2024-03-01T00:00:00".to_string())),
            "2024-03"
        );
        assert_eq!(cell_text(&Data::DateTimeIso("soon".to_string())), "soon");
    }

    #[test]
    fn test_cell_text_date_header_becomes_month_key() {
        use calamine::{ExcelDateTime, ExcelDateTimeType};
        // Serial 45292 is 2024-01-01.
        let date = ExcelDateTime::new(45292.0, ExcelDateTimeType::DateTime, false);
        assert_eq!(cell_text(&Data::DateTime(date)), "2024-01");
    }
}

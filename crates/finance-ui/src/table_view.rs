//! Month history table.
//!
//! Renders a bordered [`ratatui::widgets::Table`] with one row per month plus
//! a highlighted totals row at the bottom. The selected month is highlighted.

use ratatui::{
    layout::{Constraint, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use finance_core::calculations::to_f64;
use finance_core::formatting;
use finance_core::models::{MonthKey, MonthSummary};
use finance_data::aggregator::HistoryTotals;

use crate::themes::Theme;

const HEADERS: [&str; 6] = [
    "Month",
    "Income",
    "Expenses",
    "Savings",
    "Balance",
    "Savings rate",
];

/// Render the history table into `area`.
pub fn render_history_table(
    frame: &mut Frame,
    area: Rect,
    summaries: &[MonthSummary],
    totals: &HistoryTotals,
    selected: Option<MonthKey>,
    theme: &Theme,
) {
    let header_cells = HEADERS
        .iter()
        .map(|h| Cell::from(*h).style(theme.table_header));
    let header = Row::new(header_cells).height(1);

    let mut all_rows: Vec<Row> = summaries
        .iter()
        .enumerate()
        .map(|(i, summary)| history_row(i, summary, selected, theme))
        .collect();

    let total_row = Row::new(vec![
        Cell::from("TOTAL"),
        Cell::from(formatting::format_currency(totals.total_income)),
        Cell::from(formatting::format_currency(totals.total_expense)),
        Cell::from(formatting::format_currency(totals.total_savings)),
        Cell::from(formatting::format_currency(totals.balance))
            .style(theme.balance_style(totals.balance)),
        Cell::from(formatting::format_percent(
            to_f64(totals.savings_rate) * 100.0,
            1,
        )),
    ])
    .style(theme.table_total);
    all_rows.push(total_row);

    let widths = [
        Constraint::Length(10),
        Constraint::Length(16),
        Constraint::Length(16),
        Constraint::Length(16),
        Constraint::Length(16),
        Constraint::Length(13),
    ];

    let title = format!(
        " Monthly history ({} months, average balance {}) ",
        totals.months,
        formatting::format_currency(totals.average_balance())
    );
    let table = Table::new(all_rows, widths)
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.table_border)
                .title(title),
        )
        .style(theme.text);

    frame.render_widget(table, area);
}

/// Build one month's row; the selected month uses `table_selected`.
fn history_row<'a>(
    index: usize,
    summary: &MonthSummary,
    selected: Option<MonthKey>,
    theme: &Theme,
) -> Row<'a> {
    let is_selected = selected == Some(summary.month);
    let style = row_style(index, is_selected, theme);

    let marker = if is_selected { "> " } else { "  " };
    let balance_cell = Cell::from(formatting::format_currency(summary.balance));
    let balance_cell = if is_selected {
        balance_cell
    } else {
        balance_cell.style(theme.balance_style(summary.balance))
    };

    Row::new(vec![
        Cell::from(format!("{marker}{}", summary.month)),
        Cell::from(formatting::format_currency(summary.total_income)),
        Cell::from(formatting::format_currency(summary.total_expense)),
        Cell::from(formatting::format_currency(summary.total_savings)),
        balance_cell,
        Cell::from(formatting::format_percent(summary.savings_rate_percent(), 1)),
    ])
    .style(style)
}

/// Alternating row colours, overridden by the selection highlight.
fn row_style(index: usize, is_selected: bool, theme: &Theme) -> Style {
    if is_selected {
        theme.table_selected
    } else if index % 2 == 0 {
        theme.table_row
    } else {
        theme.table_row_alt
    }
}

/// Render a "no data" placeholder when there are no months to show.
pub fn render_no_data(frame: &mut Frame, area: Rect, theme: &Theme) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled("No monthly data found", theme.warning)),
        Line::from(""),
        Line::from(Span::styled(
            "Add YYYY-MM columns to the spreadsheet and press 'r'.",
            theme.dim,
        )),
        Line::from(Span::styled("Press 'q' or Ctrl+C to exit", theme.dim)),
    ];
    frame.render_widget(
        Paragraph::new(ratatui::text::Text::from(text)).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Finance Dashboard "),
        ),
        area,
    );
}

// ── Tests ──────────────────────────────────────────────────────────────────────

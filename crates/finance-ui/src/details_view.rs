//! Per-category details for the selected month.
//!
//! Three side-by-side tables (income, expenses, savings) with each
//! category's amount and share of its type total, and below them the list of
//! money flows from income categories through the income hub.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use finance_core::calculations::share_percent;
use finance_core::formatting::{format_currency, format_percent};
use finance_core::models::{MonthSummary, TransactionType};
use finance_data::flows::{money_flows, unallocated, MoneyFlow, INCOME_HUB};

use crate::themes::Theme;

/// Render the details view into `area`.
pub fn render_details_view(frame: &mut Frame, area: Rect, summary: &MonthSummary, theme: &Theme) {
    let [tables_area, flows_area] =
        Layout::vertical([Constraint::Percentage(55), Constraint::Percentage(45)]).areas(area);
    let columns: [Rect; 3] = Layout::horizontal([
        Constraint::Ratio(1, 3),
        Constraint::Ratio(1, 3),
        Constraint::Ratio(1, 3),
    ])
    .areas(tables_area);

    for (kind, column) in TransactionType::ALL.into_iter().zip(columns) {
        render_breakdown_table(frame, column, summary, kind, theme);
    }

    let flows = money_flows(summary);
    let lines = build_flow_lines(summary, &flows, theme);
    frame.render_widget(
        Paragraph::new(Text::from(lines)).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.table_border)
                .title(format!(" Money flows, {} ", summary.month.long_label())),
        ),
        flows_area,
    );
}

fn render_breakdown_table(
    frame: &mut Frame,
    area: Rect,
    summary: &MonthSummary,
    kind: TransactionType,
    theme: &Theme,
) {
    let total = summary.total(kind);
    let header = Row::new(
        ["Category", "Amount", "Share"]
            .iter()
            .map(|h| Cell::from(*h).style(theme.table_header)),
    );

    let mut rows: Vec<Row> = summary
        .breakdown(kind)
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let style = if i % 2 == 0 {
                theme.table_row
            } else {
                theme.table_row_alt
            };
            Row::new(vec![
                Cell::from(item.category.clone()),
                Cell::from(format_currency(item.amount)),
                Cell::from(format_percent(share_percent(item.amount, total), 1)),
            ])
            .style(style)
        })
        .collect();
    rows.push(
        Row::new(vec![
            Cell::from("Total"),
            Cell::from(format_currency(total)),
            Cell::from(""),
        ])
        .style(theme.table_total),
    );

    let widths = [
        Constraint::Min(10),
        Constraint::Length(14),
        Constraint::Length(7),
    ];
    let table = Table::new(rows, widths).header(header).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(theme.table_border)
            .title(Span::styled(
                format!(" {} ", kind.display_name()),
                theme.kind_style(kind),
            )),
    );
    frame.render_widget(table, area);
}

/// One line per money flow, then the unallocated part of the hub.
pub fn build_flow_lines<'a>(
    summary: &MonthSummary,
    flows: &[MoneyFlow],
    theme: &'a Theme,
) -> Vec<Line<'a>> {
    if flows.is_empty() {
        return vec![Line::from(Span::styled(
            "No money flows this month",
            theme.dim,
        ))];
    }

    let source_width = flows
        .iter()
        .map(|f| f.source.chars().count())
        .max()
        .unwrap_or(0);
    let target_width = flows
        .iter()
        .map(|f| f.target.chars().count())
        .max()
        .unwrap_or(0);

    let mut lines: Vec<Line<'a>> = flows
        .iter()
        .map(|flow| {
            Line::from(vec![
                Span::styled(
                    format!("{:<source_width$}", flow.source),
                    theme.text,
                ),
                Span::styled(" → ", theme.dim),
                Span::styled(
                    format!("{:<target_width$}", flow.target),
                    theme.text,
                ),
                Span::styled(
                    format!("{:>16}", format_currency(flow.amount)),
                    theme.kind_style(flow.kind),
                ),
            ])
        })
        .collect();

    let left = unallocated(summary);
    if !left.is_zero() {
        lines.push(Line::from(vec![
            Span::styled(format!("{INCOME_HUB} unallocated: "), theme.label),
            Span::styled(format_currency(left), theme.remaining),
        ]));
    }
    lines
}

// ── Tests ─────────────────────────────────────────────────────────────────────

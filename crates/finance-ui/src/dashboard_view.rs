//! Month dashboard view.
//!
//! Shows the selected month's totals, savings rate and balance, how income
//! was allocated, and one bar per expense and savings category.

use ratatui::{
    layout::Rect,
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use finance_core::models::{MonthKey, MonthSummary, TransactionType};

use crate::components::header::{Header, SEPARATOR_WIDTH};
use crate::components::indicators::{BalanceIndicator, MetricIndicator, SavingsRateIndicator};
use crate::components::progress_bar::{AllocationBar, CategoryBar};
use crate::themes::Theme;

/// All data required to render the dashboard view.
#[derive(Debug, Clone)]
pub struct DashboardViewData {
    /// Data file name shown in the header.
    pub data_file: String,
    /// One-based position of the month and the number of months.
    pub position: Option<(usize, usize)>,
    pub summary: MonthSummary,
}

impl DashboardViewData {
    pub fn month(&self) -> MonthKey {
        self.summary.month
    }
}

/// Render the dashboard into `area`.
pub fn render_dashboard_view(
    frame: &mut Frame,
    area: Rect,
    data: &DashboardViewData,
    theme: &Theme,
) {
    let lines = build_dashboard_lines(data, theme);
    frame.render_widget(Paragraph::new(Text::from(lines)), area);
}

/// Build the full `Vec<Line>` for the dashboard (extracted for testability).
pub fn build_dashboard_lines<'a>(data: &'a DashboardViewData, theme: &'a Theme) -> Vec<Line<'a>> {
    let summary = &data.summary;
    let mut lines: Vec<Line<'a>> = Vec::with_capacity(32);

    lines.extend(Header::new(Some(summary.month), data.position, &data.data_file, theme).to_lines());

    if !summary.has_data() {
        lines.push(Line::from(Span::styled(
            format!("No data for {}", summary.month.long_label()),
            theme.warning,
        )));
        lines.push(Line::from(Span::styled(
            "None of the categories has an amount for this month.",
            theme.dim,
        )));
        return lines;
    }

    // ── Metrics ──────────────────────────────────────────────────────────────
    for kind in TransactionType::ALL {
        lines.push(MetricIndicator::new(kind, summary.total(kind), theme).to_line());
    }
    lines.push(SavingsRateIndicator::new(summary.savings_rate_percent(), theme).to_line());
    lines.push(Line::from(""));
    lines.push(BalanceIndicator::new(summary.balance, theme).to_line());

    lines.push(Line::from(Span::styled(
        "─".repeat(SEPARATOR_WIDTH),
        theme.separator,
    )));

    // ── Allocation ───────────────────────────────────────────────────────────
    lines.push(Line::from(Span::styled("Allocation of income", theme.info)));
    lines.push(AllocationBar::from_summary(summary, theme).to_line());
    lines.push(Line::from(""));

    // ── Category bars ────────────────────────────────────────────────────────
    for (kind, title) in [
        (TransactionType::Expense, "Expenses by category"),
        (TransactionType::Savings, "Savings by category"),
    ] {
        lines.push(Line::from(Span::styled(title, theme.info)));
        let breakdown = summary.breakdown(kind);
        if breakdown.is_empty() {
            lines.push(Line::from(Span::styled("  none", theme.dim)));
        }
        for item in breakdown {
            lines.push(
                CategoryBar::new(
                    &item.category,
                    item.amount,
                    summary.total(kind),
                    theme.kind_style(kind),
                    theme,
                )
                .to_line(),
            );
        }
        lines.push(Line::from(""));
    }

    lines
}

/// Render the placeholder shown when the data file has no month columns.
pub fn render_no_months(frame: &mut Frame, area: Rect, data_file: &str, theme: &Theme) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled("No months found", theme.warning)),
        Line::from(""),
        Line::from(Span::styled(
            format!("{data_file} has no YYYY-MM column with data."),
            theme.dim,
        )),
        Line::from(Span::styled("Press 'r' to reload, 'q' to exit", theme.dim)),
    ];
    frame.render_widget(
        Paragraph::new(Text::from(text)).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Finance Dashboard "),
        ),
        area,
    );
}

// ── Tests ─────────────────────────────────────────────────────────────────────

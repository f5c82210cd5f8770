use crate::components::{pad_to_width, truncate_to_width};
use crate::themes::Theme;
use finance_core::calculations::share_percent;
use finance_core::formatting::{format_currency, format_percent};
use finance_core::models::MonthSummary;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use rust_decimal::Decimal;

/// Configuration controlling visual appearance of a bar.
#[derive(Debug, Clone, Copy)]
pub struct BarConfig {
    /// Width in terminal columns of the bar portion (excluding labels).
    pub width: u16,
    /// Character used to fill the completed portion of the bar.
    pub filled_char: char,
    /// Character used to fill the empty portion of the bar.
    pub empty_char: char,
}

impl Default for BarConfig {
    fn default() -> Self {
        Self {
            width: 30,
            filled_char: '\u{2588}', // █  FULL BLOCK
            empty_char: '\u{2591}',  // ░  LIGHT SHADE
        }
    }
}

/// Split `width` columns into filled / empty counts for `percentage`,
/// clamping the percentage to `[0, 100]`.
pub fn bar_cells(percentage: f64, width: u16) -> (usize, usize) {
    let capped = if percentage.is_finite() {
        percentage.clamp(0.0, 100.0)
    } else {
        0.0
    };
    let width = width as usize;
    let filled = (((capped / 100.0) * width as f64).round() as usize).min(width);
    (filled, width - filled)
}

// ── CategoryBar ──────────────────────────────────────────────────────────────

/// One category's share of its type total.
///
/// Format: `"Loyer               [█████░░░░░]  45.2%     950.00 €"`
pub struct CategoryBar<'a> {
    pub category: &'a str,
    pub amount: Decimal,
    /// Share of the type total, in percent.
    pub percentage: f64,
    /// Fill colour, usually the type colour.
    pub style: Style,
    pub theme: &'a Theme,
    pub config: BarConfig,
    /// Display columns for the category label.
    pub label_width: usize,
}

impl<'a> CategoryBar<'a> {
    /// Build a bar for `amount` out of `total`.
    pub fn new(
        category: &'a str,
        amount: Decimal,
        total: Decimal,
        style: Style,
        theme: &'a Theme,
    ) -> Self {
        Self {
            category,
            amount,
            percentage: share_percent(amount, total),
            style,
            theme,
            config: BarConfig::default(),
            label_width: 22,
        }
    }

    pub fn to_line(&self) -> Line<'a> {
        let (filled, empty) = bar_cells(self.percentage, self.config.width);
        let label = pad_to_width(
            &truncate_to_width(self.category, self.label_width.saturating_sub(1)),
            self.label_width,
        );

        Line::from(vec![
            Span::styled(label, self.theme.text),
            Span::styled("[", self.theme.dim),
            Span::styled(
                std::iter::repeat_n(self.config.filled_char, filled).collect::<String>(),
                self.style,
            ),
            Span::styled(
                std::iter::repeat_n(self.config.empty_char, empty).collect::<String>(),
                self.theme.bar_empty,
            ),
            Span::styled("] ", self.theme.dim),
            Span::styled(
                format!("{:>6}", format_percent(self.percentage, 1)),
                self.theme.label,
            ),
            Span::styled(format!("{:>16}", format_currency(self.amount)), self.theme.value),
        ])
    }
}

// ── AllocationBar ────────────────────────────────────────────────────────────

/// Where the month's income went: expenses, savings and what is left.
///
/// Segments are proportional to income. When expenses and savings exceed
/// income the two segments are scaled to fill the bar and nothing remains.
pub struct AllocationBar<'a> {
    pub expense_percent: f64,
    pub savings_percent: f64,
    pub remaining_percent: f64,
    /// `false` when the month has no positive income.
    pub has_income: bool,
    pub theme: &'a Theme,
    pub config: BarConfig,
}

impl<'a> AllocationBar<'a> {
    pub fn from_summary(summary: &MonthSummary, theme: &'a Theme) -> Self {
        let income = summary.total_income;
        let expense_percent = share_percent(summary.total_expense, income);
        let savings_percent = share_percent(summary.total_savings, income);
        Self {
            expense_percent,
            savings_percent,
            remaining_percent: (100.0 - expense_percent - savings_percent).max(0.0),
            has_income: income > Decimal::ZERO,
            theme,
            config: BarConfig {
                width: 50,
                ..BarConfig::default()
            },
        }
    }

    /// Column counts for the expense, savings and remaining segments.
    pub fn segments(&self) -> (usize, usize, usize) {
        let width = self.config.width as usize;
        if !self.has_income {
            return (0, 0, 0);
        }
        let expense = self.expense_percent.max(0.0);
        let savings = self.savings_percent.max(0.0);
        let scale = if expense + savings > 100.0 {
            100.0 / (expense + savings)
        } else {
            1.0
        };
        let expense_cols = ((expense * scale / 100.0) * width as f64).round() as usize;
        let expense_cols = expense_cols.min(width);
        let savings_cols = ((savings * scale / 100.0) * width as f64).round() as usize;
        let savings_cols = savings_cols.min(width - expense_cols);
        let remaining_cols = width - expense_cols - savings_cols;
        (expense_cols, savings_cols, remaining_cols)
    }

    pub fn to_line(&self) -> Line<'a> {
        let width = self.config.width as usize;
        let mut spans = vec![Span::styled("[", self.theme.dim)];

        if !self.has_income {
            spans.push(Span::styled(
                std::iter::repeat_n(self.config.empty_char, width).collect::<String>(),
                self.theme.bar_empty,
            ));
            spans.push(Span::styled("] ", self.theme.dim));
            spans.push(Span::styled("no income this month", self.theme.dim));
            return Line::from(spans);
        }

        let (expense, savings, remaining) = self.segments();
        let fill = |n: usize| std::iter::repeat_n(self.config.filled_char, n).collect::<String>();
        spans.push(Span::styled(fill(expense), self.theme.expense));
        spans.push(Span::styled(fill(savings), self.theme.savings));
        spans.push(Span::styled(
            std::iter::repeat_n(self.config.empty_char, remaining).collect::<String>(),
            self.theme.remaining,
        ));
        spans.push(Span::styled("] ", self.theme.dim));
        spans.push(Span::styled(
            format!("Expenses {}", format_percent(self.expense_percent, 0)),
            self.theme.expense,
        ));
        spans.push(Span::styled(" | ", self.theme.dim));
        spans.push(Span::styled(
            format!("Savings {}", format_percent(self.savings_percent, 0)),
            self.theme.savings,
        ));
        spans.push(Span::styled(" | ", self.theme.dim));
        spans.push(Span::styled(
            format!("Left {}", format_percent(self.remaining_percent, 0)),
            self.theme.remaining,
        ));
        Line::from(spans)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use finance_core::models::MonthKey;

    fn d(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    fn summary(income: &str, expense: &str, savings: &str) -> MonthSummary {
        let mut s = MonthSummary::empty(MonthKey::parse("2024-01").unwrap());
        s.total_income = d(income);
        s.total_expense = d(expense);
        s.total_savings = d(savings);
        s
    }

    // ── bar_cells ────────────────────────────────────────────────────────────

    #[test]
    fn test_bar_cells() {
        assert_eq!(bar_cells(0.0, 10), (0, 10));
        assert_eq!(bar_cells(50.0, 10), (5, 5));
        assert_eq!(bar_cells(100.0, 10), (10, 0));
        assert_eq!(bar_cells(250.0, 10), (10, 0));
        assert_eq!(bar_cells(-5.0, 10), (0, 10));
        assert_eq!(bar_cells(f64::NAN, 10), (0, 10));
    }

    // ── CategoryBar ──────────────────────────────────────────────────────────

    #[test]
    fn test_category_bar_line() {
        let theme = Theme::dark();
        let bar = CategoryBar::new("Loyer", d("950"), d("1900"), theme.expense, &theme);
        assert!((bar.percentage - 50.0).abs() < 1e-9);

        let line = bar.to_line();
        let rendered = text(&line);
        assert!(rendered.starts_with("Loyer "));
        assert!(rendered.contains("50.0%"));
        assert!(rendered.ends_with("950.00 €"));
        assert_eq!(line.spans[2].content.chars().count(), 15);
        assert_eq!(line.spans[3].content.chars().count(), 15);
        assert_eq!(line.spans[2].style, theme.expense);
    }

    #[test]
    fn test_category_bar_long_name_is_truncated() {
        let theme = Theme::dark();
        let bar = CategoryBar::new(
            "Assurance habitation et responsabilité civile",
            d("30"),
            d("100"),
            theme.expense,
            &theme,
        );
        let label = bar.to_line().spans[0].content.to_string();
        assert!(label.contains('…'));
        assert_eq!(unicode_width::UnicodeWidthStr::width(label.as_str()), 22);
    }

    #[test]
    fn test_category_bar_zero_total() {
        let theme = Theme::dark();
        let bar = CategoryBar::new("Loyer", d("950"), Decimal::ZERO, theme.expense, &theme);
        assert_eq!(bar.percentage, 0.0);
    }

    // ── AllocationBar ────────────────────────────────────────────────────────

    #[test]
    fn test_allocation_bar_segments() {
        let theme = Theme::dark();
        let bar = AllocationBar::from_summary(&summary("2000", "1000", "500"), &theme);
        assert!((bar.expense_percent - 50.0).abs() < 1e-9);
        assert!((bar.savings_percent - 25.0).abs() < 1e-9);
        assert!((bar.remaining_percent - 25.0).abs() < 1e-9);
        assert_eq!(bar.segments(), (25, 13, 12));
    }

    #[test]
    fn test_allocation_bar_overspent_scales_down() {
        let theme = Theme::dark();
        let bar = AllocationBar::from_summary(&summary("1000", "1500", "500"), &theme);
        assert_eq!(bar.remaining_percent, 0.0);
        let (expense, savings, remaining) = bar.segments();
        assert_eq!(expense + savings + remaining, 50);
        assert!(expense > savings);
        assert!(text(&bar.to_line()).contains("Expenses 150%"));
    }

    #[test]
    fn test_allocation_bar_without_income() {
        let theme = Theme::dark();
        let bar = AllocationBar::from_summary(&summary("0", "300", "0"), &theme);
        assert!(!bar.has_income);
        assert_eq!(bar.segments(), (0, 0, 0));
        assert!(text(&bar.to_line()).contains("no income"));
    }
}

use crate::components::pad_to_width;
use crate::themes::Theme;
use finance_core::formatting::{format_currency, format_percent};
use finance_core::models::TransactionType;
use ratatui::text::{Line, Span};
use rust_decimal::Decimal;

/// Display columns reserved for an indicator's emoji and label.
pub const LABEL_WIDTH: usize = 20;

// ── MetricIndicator ──────────────────────────────────────────────────────────

/// One of the three monthly totals.
///
/// Format: `"💶 Income:          2,800.00 €"`
pub struct MetricIndicator<'a> {
    pub kind: TransactionType,
    pub amount: Decimal,
    pub theme: &'a Theme,
}

impl<'a> MetricIndicator<'a> {
    pub fn new(kind: TransactionType, amount: Decimal, theme: &'a Theme) -> Self {
        Self {
            kind,
            amount,
            theme,
        }
    }

    /// Emoji shown in front of each type.
    pub fn emoji(&self) -> &'static str {
        match self.kind {
            TransactionType::Income => "💶",
            TransactionType::Expense => "💸",
            TransactionType::Savings => "🏦",
        }
    }

    /// Label used on the dashboard (plural for expenses).
    pub fn label(&self) -> &'static str {
        match self.kind {
            TransactionType::Income => "Income:",
            TransactionType::Expense => "Expenses:",
            TransactionType::Savings => "Savings:",
        }
    }

    pub fn to_line(&self) -> Line<'a> {
        Line::from(vec![
            Span::styled(
                pad_to_width(&format!("{} {}", self.emoji(), self.label()), LABEL_WIDTH),
                self.theme.label,
            ),
            Span::styled(
                format!("{:>16}", format_currency(self.amount)),
                self.theme.kind_style(self.kind),
            ),
        ])
    }
}

// ── SavingsRateIndicator ─────────────────────────────────────────────────────

/// Savings rate in percent with a traffic-light colour.
///
/// Format: `"📈 Savings rate:       10.7%"`
pub struct SavingsRateIndicator<'a> {
    /// Rate already multiplied by 100.
    pub percent: f64,
    pub theme: &'a Theme,
}

impl<'a> SavingsRateIndicator<'a> {
    pub fn new(percent: f64, theme: &'a Theme) -> Self {
        Self { percent, theme }
    }

    pub fn to_line(&self) -> Line<'a> {
        Line::from(vec![
            Span::styled(pad_to_width("📈 Savings rate:", LABEL_WIDTH), self.theme.label),
            Span::styled(
                format!("{:>16}", format_percent(self.percent, 1)),
                self.theme.savings_rate_style(self.percent),
            ),
        ])
    }
}

// ── BalanceIndicator ─────────────────────────────────────────────────────────

/// Month balance: green with "surplus" when zero or above, red with
/// "deficit" below zero.
pub struct BalanceIndicator<'a> {
    pub balance: Decimal,
    pub theme: &'a Theme,
}

impl<'a> BalanceIndicator<'a> {
    pub fn new(balance: Decimal, theme: &'a Theme) -> Self {
        Self { balance, theme }
    }

    pub fn is_deficit(&self) -> bool {
        self.balance < Decimal::ZERO
    }

    pub fn to_line(&self) -> Line<'a> {
        let verdict = if self.is_deficit() {
            "  deficit"
        } else {
            "  surplus"
        };
        let style = self.theme.balance_style(self.balance);
        Line::from(vec![
            Span::styled(pad_to_width("⚖ Balance:", LABEL_WIDTH), self.theme.label),
            Span::styled(format!("{:>16}", format_currency(self.balance)), style),
            Span::styled(verdict, style),
        ])
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

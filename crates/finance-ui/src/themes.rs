use finance_core::models::TransactionType;
use ratatui::style::{Color, Modifier, Style};
use rust_decimal::Decimal;

/// Terminal background type detection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BackgroundType {
    Dark,
    Light,
    Unknown,
}

/// Detect terminal background type from the `COLORFGBG` environment variable.
///
/// The variable has the format `"foreground;background"`.  Background values
/// 0–6 are considered dark; 7–15 are considered light.  If the variable is
/// absent or unparseable, `BackgroundType::Dark` is returned.
pub fn detect_background() -> BackgroundType {
    if let Ok(val) = std::env::var("COLORFGBG") {
        if let Some(bg) = val.split(';').next_back() {
            if let Ok(bg_num) = bg.parse::<u8>() {
                return if bg_num <= 6 {
                    BackgroundType::Dark
                } else {
                    BackgroundType::Light
                };
            }
        }
    }
    BackgroundType::Dark
}

/// Every style used by the finance-ui views.
#[derive(Debug, Clone)]
pub struct Theme {
    // ── Header ───────────────────────────────────────────────────────────────
    pub header: Style,
    pub header_accent: Style,
    pub separator: Style,

    // ── Text ─────────────────────────────────────────────────────────────────
    pub text: Style,
    pub dim: Style,
    pub bold: Style,
    pub label: Style,
    pub value: Style,

    // ── Status ───────────────────────────────────────────────────────────────
    pub info: Style,
    pub success: Style,
    pub warning: Style,
    pub error: Style,

    // ── Money ────────────────────────────────────────────────────────────────
    pub income: Style,
    pub expense: Style,
    pub savings: Style,
    /// Share of income neither spent nor saved.
    pub remaining: Style,
    pub balance_positive: Style,
    pub balance_negative: Style,
    /// Unfilled portion of a bar.
    pub bar_empty: Style,

    // ── Table ────────────────────────────────────────────────────────────────
    pub table_header: Style,
    pub table_border: Style,
    pub table_row: Style,
    pub table_row_alt: Style,
    pub table_total: Style,
    pub table_selected: Style,
}

impl Theme {
    // ── Constructors ─────────────────────────────────────────────────────────

    /// Dark-background terminal theme (default).
    pub fn dark() -> Self {
        Self {
            header: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            header_accent: Style::default().fg(Color::Yellow),
            separator: Style::default().fg(Color::DarkGray),

            text: Style::default().fg(Color::White),
            dim: Style::default().fg(Color::DarkGray),
            bold: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            label: Style::default().fg(Color::Gray),
            value: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),

            info: Style::default().fg(Color::Cyan),
            success: Style::default().fg(Color::Green),
            warning: Style::default().fg(Color::Yellow),
            error: Style::default().fg(Color::Red),

            income: Style::default().fg(Color::Green),
            expense: Style::default().fg(Color::LightRed),
            savings: Style::default().fg(Color::LightBlue),
            remaining: Style::default().fg(Color::Gray),
            balance_positive: Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
            balance_negative: Style::default()
                .fg(Color::Red)
                .add_modifier(Modifier::BOLD),
            bar_empty: Style::default().fg(Color::DarkGray),

            table_header: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            table_border: Style::default().fg(Color::DarkGray),
            table_row: Style::default().fg(Color::White),
            table_row_alt: Style::default().fg(Color::Gray),
            table_total: Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
            table_selected: Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan),
        }
    }

    /// Light-background terminal theme.
    ///
    /// Uses dark colours for text so that content remains legible against a
    /// white/light-grey terminal canvas.
    pub fn light() -> Self {
        Self {
            header: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            header_accent: Style::default().fg(Color::Magenta),
            separator: Style::default().fg(Color::Gray),

            text: Style::default().fg(Color::Black),
            dim: Style::default().fg(Color::Gray),
            bold: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
            label: Style::default().fg(Color::DarkGray),
            value: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),

            info: Style::default().fg(Color::Blue),
            success: Style::default().fg(Color::Green),
            warning: Style::default().fg(Color::Yellow),
            error: Style::default().fg(Color::Red),

            income: Style::default().fg(Color::Green),
            expense: Style::default().fg(Color::Red),
            savings: Style::default().fg(Color::Blue),
            remaining: Style::default().fg(Color::DarkGray),
            balance_positive: Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
            balance_negative: Style::default()
                .fg(Color::Red)
                .add_modifier(Modifier::BOLD),
            bar_empty: Style::default().fg(Color::Gray),

            table_header: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            table_border: Style::default().fg(Color::Gray),
            table_row: Style::default().fg(Color::Black),
            table_row_alt: Style::default().fg(Color::DarkGray),
            table_total: Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
            table_selected: Style::default()
                .fg(Color::White)
                .bg(Color::Blue),
        }
    }

    /// Classic theme using only the basic 8-colour ANSI palette and no bold.
    pub fn classic() -> Self {
        Self {
            header: Style::default().fg(Color::Cyan),
            header_accent: Style::default().fg(Color::White),
            separator: Style::default().fg(Color::DarkGray),

            text: Style::default().fg(Color::White),
            dim: Style::default().fg(Color::DarkGray),
            bold: Style::default().fg(Color::White),
            label: Style::default().fg(Color::Gray),
            value: Style::default().fg(Color::White),

            info: Style::default().fg(Color::Cyan),
            success: Style::default().fg(Color::Green),
            warning: Style::default().fg(Color::Yellow),
            error: Style::default().fg(Color::Red),

            income: Style::default().fg(Color::Green),
            expense: Style::default().fg(Color::Red),
            savings: Style::default().fg(Color::Blue),
            remaining: Style::default().fg(Color::White),
            balance_positive: Style::default().fg(Color::Green),
            balance_negative: Style::default().fg(Color::Red),
            bar_empty: Style::default().fg(Color::DarkGray),

            table_header: Style::default().fg(Color::Cyan),
            table_border: Style::default().fg(Color::DarkGray),
            table_row: Style::default().fg(Color::White),
            table_row_alt: Style::default().fg(Color::Gray),
            table_total: Style::default().fg(Color::Yellow),
            table_selected: Style::default().add_modifier(Modifier::REVERSED),
        }
    }

    /// Choose a theme automatically based on the detected terminal background.
    pub fn auto_detect() -> Self {
        match detect_background() {
            BackgroundType::Light => Self::light(),
            _ => Self::dark(),
        }
    }

    /// Construct a theme by name.  Falls back to `auto_detect` for unknown
    /// names.
    pub fn from_name(name: &str) -> Self {
        match name {
            "light" => Self::light(),
            "dark" => Self::dark(),
            "classic" => Self::classic(),
            _ => Self::auto_detect(),
        }
    }

    // ── Style helpers ────────────────────────────────────────────────────────

    /// Colour of a transaction type.
    pub fn kind_style(&self, kind: TransactionType) -> Style {
        match kind {
            TransactionType::Income => self.income,
            TransactionType::Expense => self.expense,
            TransactionType::Savings => self.savings,
        }
    }

    /// Green for a balance of zero or more, red below zero.
    pub fn balance_style(&self, balance: Decimal) -> Style {
        if balance >= Decimal::ZERO {
            self.balance_positive
        } else {
            self.balance_negative
        }
    }

    /// Style for a savings rate given in percent.
    ///
    /// * `< 0 %`    → `error`
    /// * `0–10 %`   → `warning`
    /// * `≥ 10 %`   → `success`
    pub fn savings_rate_style(&self, percent: f64) -> Style {
        if percent < 0.0 {
            self.error
        } else if percent < 10.0 {
            self.warning
        } else {
            self.success
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

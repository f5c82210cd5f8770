use crate::themes::Theme;
use finance_core::models::MonthKey;
use ratatui::text::{Line, Span};

/// Decorative sparkle string placed either side of the application title.
pub const SPARKLES: &str = "✦ ✧ ✦ ✧";

/// Width of the `=` separator under the title.
pub const SEPARATOR_WIDTH: usize = 60;

/// Dashboard header rendering four lines:
///
/// 1. Application title with sparkle decorations (ALL CAPS).
/// 2. A 60-column `=` separator.
/// 3. Month and data file in `[ March 2024 (3/12) | finances.csv ]` format.
/// 4. An empty line.
pub struct Header<'a> {
    /// Selected month, `None` when the file has no month columns.
    pub month: Option<MonthKey>,
    /// One-based position of the month and the number of months.
    pub position: Option<(usize, usize)>,
    /// Data file name as shown to the user.
    pub data_file: &'a str,
    pub theme: &'a Theme,
}

impl<'a> Header<'a> {
    pub fn new(
        month: Option<MonthKey>,
        position: Option<(usize, usize)>,
        data_file: &'a str,
        theme: &'a Theme,
    ) -> Self {
        Self {
            month,
            position,
            data_file,
            theme,
        }
    }

    /// Render the header as exactly four lines.
    pub fn to_lines(&self) -> Vec<Line<'a>> {
        let month_label = match self.month {
            Some(month) => month.long_label(),
            None => "no month".to_string(),
        };
        let position = self
            .position
            .map(|(index, count)| format!(" ({index}/{count})"))
            .unwrap_or_default();

        vec![
            Line::from(vec![
                Span::styled(SPARKLES, self.theme.header_accent),
                Span::styled(" PERSONAL FINANCE DASHBOARD ", self.theme.header),
                Span::styled(SPARKLES, self.theme.header_accent),
            ]),
            Line::from(Span::styled(
                "=".repeat(SEPARATOR_WIDTH),
                self.theme.separator,
            )),
            Line::from(vec![
                Span::styled("[ ", self.theme.label),
                Span::styled(month_label, self.theme.value),
                Span::styled(position, self.theme.dim),
                Span::styled(" | ", self.theme.label),
                Span::styled(self.data_file, self.theme.value),
                Span::styled(" ]", self.theme.label),
            ]),
            Line::from(""),
        ]
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

//! Main application state and TUI event loop for the finance dashboard.
//!
//! [`App`] owns the theme, the view mode and the [`DashboardSession`]. Each
//! key press updates the session and the next frame is recomputed from the
//! cached table.

use std::io;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Layout},
    text::{Line, Span},
    Frame, Terminal,
};

use finance_data::aggregator::HistoryTotals;
use finance_runtime::session::DashboardSession;

use crate::dashboard_view::{self, DashboardViewData};
use crate::details_view;
use crate::table_view;
use crate::themes::Theme;

/// How long the loop waits for a key before redrawing.
const TICK_RATE: Duration = Duration::from_millis(250);

/// How often the data file is re-checked without a key press.
const AUTO_RELOAD_INTERVAL: Duration = Duration::from_secs(2);

/// How long a transient status message stays visible.
const STATUS_TIMEOUT: Duration = Duration::from_secs(3);

// ── ViewMode ──────────────────────────────────────────────────────────────────

/// Which view the TUI is currently rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    /// Totals, balance and category bars for one month.
    Dashboard,
    /// One row per month.
    History,
    /// Category tables and money flows for one month.
    Details,
}

impl ViewMode {
    pub const ALL: [ViewMode; 3] = [Self::Dashboard, Self::History, Self::Details];

    /// Parse a `--view` value. Unknown names fall back to the dashboard.
    pub fn from_name(name: &str) -> Self {
        match name {
            "history" => Self::History,
            "details" => Self::Details,
            _ => Self::Dashboard,
        }
    }

    /// Name as accepted by `--view`.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Dashboard => "dashboard",
            Self::History => "history",
            Self::Details => "details",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::History => "History",
            Self::Details => "Details",
        }
    }

    /// The view after this one, wrapping around.
    pub fn next(&self) -> Self {
        match self {
            Self::Dashboard => Self::History,
            Self::History => Self::Details,
            Self::Details => Self::Dashboard,
        }
    }
}

// ── App ───────────────────────────────────────────────────────────────────────

/// Root application state for the finance dashboard TUI.
pub struct App {
    /// Active colour theme.
    pub theme: Theme,
    /// Current view mode.
    pub view_mode: ViewMode,
    /// Loaded data and selected month.
    pub session: DashboardSession,
    /// Set to `true` to break out of the event loop on the next iteration.
    pub should_quit: bool,
    /// Transient message shown in the status line until the next key press
    /// or [`STATUS_TIMEOUT`].
    pub status: Option<String>,
    status_since: Instant,
    last_reload_check: Instant,
}

impl App {
    pub fn new(theme_name: &str, view_mode: ViewMode, session: DashboardSession) -> Self {
        Self {
            theme: Theme::from_name(theme_name),
            view_mode,
            session,
            should_quit: false,
            status: None,
            status_since: Instant::now(),
            last_reload_check: Instant::now(),
        }
    }

    // ── Event loop ────────────────────────────────────────────────────────────

    /// Run the dashboard until `q`, `Q` or `Ctrl+C`.
    ///
    /// Uses `crossterm::event::poll` with a 250 ms timeout so that the data
    /// file can be re-checked between key presses.
    pub fn run(mut self) -> io::Result<()> {
        enable_raw_mode()?;
        let result = self.run_in_terminal();
        let restored = restore_terminal();
        // The loop's own error wins over a failure to restore.
        result.and(restored)
    }

    fn run_in_terminal(&mut self) -> io::Result<()> {
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

        loop {
            terminal.draw(|frame| self.render(frame))?;

            if event::poll(TICK_RATE)? {
                if let Event::Key(key) = event::read()? {
                    self.handle_key(key);
                }
            }

            if self.should_quit {
                return Ok(());
            }

            self.expire_status(STATUS_TIMEOUT);
            if self.last_reload_check.elapsed() >= AUTO_RELOAD_INTERVAL {
                self.last_reload_check = Instant::now();
                if self.session.reload() {
                    self.set_status("Data file changed, reloaded");
                }
            }
        }
    }

    /// Apply one key press.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        self.status = None;

        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
            }
            KeyCode::Char('q') | KeyCode::Char('Q') => self.should_quit = true,
            KeyCode::Left | KeyCode::Char('h') => {
                self.session.previous_month();
            }
            KeyCode::Right | KeyCode::Char('l') => {
                self.session.next_month();
            }
            KeyCode::Home => self.session.first_month(),
            KeyCode::End => self.session.last_month(),
            KeyCode::Tab => self.view_mode = self.view_mode.next(),
            KeyCode::Char('1') => self.view_mode = ViewMode::Dashboard,
            KeyCode::Char('2') => self.view_mode = ViewMode::History,
            KeyCode::Char('3') => self.view_mode = ViewMode::Details,
            KeyCode::Char('r') | KeyCode::Char('R') => self.reload(),
            _ => {}
        }
    }

    /// Re-check the data file on request and report the outcome.
    pub fn reload(&mut self) {
        self.last_reload_check = Instant::now();
        let changed = self.session.reload();
        match (changed, self.session.last_error()) {
            (_, Some(_)) => self.status = None,
            (true, None) => self.set_status("Reloaded"),
            (false, None) => self.set_status("No changes"),
        }
    }

    /// Show `message` in the status line.
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status = Some(message.into());
        self.status_since = Instant::now();
    }

    /// Drop the status message once it is older than `timeout`.
    pub fn expire_status(&mut self, timeout: Duration) {
        if self.status.is_some() && self.status_since.elapsed() >= timeout {
            self.status = None;
        }
    }

    // ── Rendering ─────────────────────────────────────────────────────────────

    /// Render the current view and the status line into `frame`.
    pub fn render(&self, frame: &mut Frame) {
        let [body, status] =
            Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(frame.area());

        let data_file = self.data_file_name();
        match (self.view_mode, self.session.summary()) {
            (_, None) => dashboard_view::render_no_months(frame, body, &data_file, &self.theme),
            (ViewMode::Dashboard, Some(summary)) => {
                let data = DashboardViewData {
                    data_file,
                    position: self
                        .session
                        .selected_index()
                        .map(|i| (i + 1, self.session.months().len())),
                    summary,
                };
                dashboard_view::render_dashboard_view(frame, body, &data, &self.theme);
            }
            (ViewMode::History, Some(_)) => {
                let history = self.session.history();
                if history.is_empty() {
                    table_view::render_no_data(frame, body, &self.theme);
                } else {
                    let totals = HistoryTotals::from_summaries(&history);
                    table_view::render_history_table(
                        frame,
                        body,
                        &history,
                        &totals,
                        self.session.selected_month(),
                        &self.theme,
                    );
                }
            }
            (ViewMode::Details, Some(summary)) => {
                details_view::render_details_view(frame, body, &summary, &self.theme);
            }
        }

        frame.render_widget(self.status_line(), status);
    }

    /// Reload errors first, then transient messages, load warnings and the
    /// key hints.
    pub fn status_line(&self) -> Line<'_> {
        if let Some(error) = self.session.last_error() {
            return Line::from(vec![
                Span::styled("Reload failed: ", self.theme.error),
                Span::styled(error.to_string(), self.theme.error),
                Span::styled("  (showing previous data)", self.theme.dim),
            ]);
        }
        if let Some(status) = &self.status {
            return Line::from(Span::styled(status.clone(), self.theme.info));
        }
        if let Some(warning) = self
            .session
            .load_report()
            .and_then(|report| report.warning_line())
        {
            return Line::from(Span::styled(warning, self.theme.warning));
        }

        let mut spans: Vec<Span> = Vec::new();
        for (i, mode) in ViewMode::ALL.iter().enumerate() {
            let style = if *mode == self.view_mode {
                self.theme.bold
            } else {
                self.theme.dim
            };
            spans.push(Span::styled(format!("[{}] {} ", i + 1, mode.title()), style));
        }
        spans.push(Span::styled(
            " ←/→ month  Home/End  Tab view  r reload  q quit",
            self.theme.dim,
        ));
        Line::from(spans)
    }

    fn data_file_name(&self) -> String {
        let path = self.session.path();
        path.file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string())
    }
}

/// Leave raw mode and the alternate screen, attempting every step.
fn restore_terminal() -> io::Result<()> {
    let raw = disable_raw_mode();
    let screen = execute!(io::stdout(), LeaveAlternateScreen, cursor::Show);
    raw.and(screen)
}

// ── Tests ──────────────────────────────────────────────────────────────────────

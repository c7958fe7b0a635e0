//! TUI-local state (not part of the session).

use std::sync::mpsc::{self, Receiver, Sender};

use studio::catalog::Filter;
use studio::log::LogLine;

/// Input mode for the TUI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InputMode {
    /// Single-key intents; `q` quits.
    Normal,
    /// Filter popup is open; arrows move, Enter selects, Esc closes.
    FilterMenu,
}

pub(crate) struct App {
    pub(crate) input_mode: InputMode,
    /// `all` followed by each category, as offered in the filter menu.
    pub(crate) filters: Vec<Filter>,
    /// Highlighted row in the filter menu.
    pub(crate) filter_cursor: usize,
    pub(crate) product_name: String,
    /// Whether the log pane is visible (toggled with `,`).
    pub(crate) show_logs: bool,
    pub(crate) logs: Vec<LogLine>,
    /// Offset from the bottom of the log (0 = follow tail).
    pub(crate) log_scroll: usize,
    /// Transient message shown in the status line.
    pub(crate) status_message: Option<String>,
    /// Background copy/share tasks report here.
    pub(crate) status_tx: Sender<String>,
    status_rx: Receiver<String>,
    pub(crate) should_quit: bool,
}

impl App {
    pub(crate) fn new(filters: Vec<Filter>, product_name: String) -> Self {
        let (status_tx, status_rx) = mpsc::channel();
        Self {
            input_mode: InputMode::Normal,
            filters,
            filter_cursor: 0,
            product_name,
            show_logs: false,
            logs: Vec::new(),
            log_scroll: 0,
            status_message: None,
            status_tx,
            status_rx,
            should_quit: false,
        }
    }

    /// Pick up the latest message posted by a background task.
    pub(crate) fn collect_status(&mut self) {
        while let Ok(msg) = self.status_rx.try_recv() {
            self.status_message = Some(msg);
        }
    }

    /// Open the filter menu with the cursor on `current`.
    pub(crate) fn open_filter_menu(&mut self, current: Filter) {
        self.filter_cursor = self
            .filters
            .iter()
            .position(|f| *f == current)
            .unwrap_or(0);
        self.input_mode = InputMode::FilterMenu;
    }

    pub(crate) fn selected_filter(&self) -> Option<Filter> {
        self.filters.get(self.filter_cursor).copied()
    }
}

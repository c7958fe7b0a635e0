//! Terminal UI for Creative Studio sessions.
//!
//! Renders [`SessionSnapshot`](studio::session::SessionSnapshot)s with
//! ratatui + crossterm and forwards key presses to the shared
//! [`Session`] as intents. The TUI holds no selection or favorite logic of
//! its own.
//!
//! # Quick start
//!
//! ```ignore
//! use studio::prelude::*;
//! use studio_tui::{TuiConfig, spawn_tui};
//!
//! let session = Session::start(controller)?;
//! let handle = spawn_tui(session, TuiConfig::default(), tokio::runtime::Handle::current());
//! handle.join().unwrap();
//! ```

use std::io;
use std::thread::JoinHandle;
use std::time::Duration;

use crossterm::event::{self, Event};
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use crossterm::{cursor, execute};
use ratatui::prelude::*;
use studio::log::LogBuffer;
use studio::session::Session;
use tokio::runtime::Handle;

mod app;
pub mod clipboard;
mod input;
mod render;

pub use clipboard::{MAX_OSC52_PAYLOAD, Osc52Clipboard, Osc52Queue, osc52_sequence};
pub use render::{log_level_style, truncate_str};

use app::App;
use input::handle_key_event;
use render::render;

/// Configuration for the TUI.
#[derive(Default)]
pub struct TuiConfig {
    /// Log buffer fed by [`StudioTracingLayer`](studio::log::StudioTracingLayer).
    ///
    /// Drained once per frame into the log pane (toggled with `,`).
    pub log_buffer: Option<LogBuffer>,
    /// Open with the log pane visible.
    pub show_logs: bool,
    /// OSC 52 copies to write to the terminal between frames.
    pub clipboard_queue: Option<Osc52Queue>,
}

/// Spawn the TUI on a dedicated OS thread.
///
/// `runtime` runs the draw, copy, and share tasks raised by key presses.
pub fn spawn_tui(session: Session, config: TuiConfig, runtime: Handle) -> JoinHandle<()> {
    std::thread::spawn(move || {
        if let Err(e) = run_tui(&session, &config, &runtime) {
            eprintln!("TUI error: {e}");
        }
    })
}

/// Run the TUI event loop (blocking) until the user quits.
pub fn run_tui(session: &Session, config: &TuiConfig, runtime: &Handle) -> io::Result<()> {
    // Lets input handlers call `tokio::spawn` from this thread.
    let _guard = runtime.enter();

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, cursor::Hide)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    let mut app = App::new(session.catalog().filters(), session.product_name());
    app.show_logs = config.show_logs;

    let result = event_loop(&mut terminal, &mut app, session, config);

    // Restore the terminal even if the loop failed.
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, cursor::Show)?;
    terminal.show_cursor()?;
    result
}

fn event_loop<B: Backend + io::Write>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    session: &Session,
    config: &TuiConfig,
) -> io::Result<()> {
    while !app.should_quit {
        if let Some(ref log_buf) = config.log_buffer {
            log_buf.drain_into(&mut app.logs);
        }
        app.collect_status();
        // Commit a due draw even if its timer task has not run yet.
        session.tick();

        // Snapshot once per frame; the session lock is never held while
        // widgets are built.
        let snap = session.snapshot();
        terminal.draw(|frame| render(frame, &snap, app))?;
        if let Some(ref queue) = config.clipboard_queue {
            queue.flush_into(terminal.backend_mut())?;
        }

        // Short poll keeps the busy indicator responsive to draw commits.
        if event::poll(Duration::from_millis(50))?
            && let Event::Key(key) = event::read()?
        {
            handle_key_event(key, app, session);
        }
    }
    Ok(())
}

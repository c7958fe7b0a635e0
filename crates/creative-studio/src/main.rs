//! Single-screen creative prompt browser for the terminal.
//!
//! Opens with a prompt already being drawn. Press space for another one,
//! `f` to narrow the pool to a category, `c` to copy (OSC 52), `h` to
//! favorite, `,` for the log pane, and `q` to quit.
//!
//! # Examples
//!
//! ```sh
//! creative-studio
//! creative-studio --filter experimental --seed 7
//! ```

use std::process;
use std::sync::Arc;

use clap::Parser;
use creative_studio::AppConfig;
use studio::prelude::*;
use studio_tui::Osc52Clipboard;
use tokio::runtime::Handle;
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Single-screen creative prompt browser.
#[derive(Parser)]
#[command(name = "creative-studio")]
struct Cli {
    /// Filter to open with: `all` or a category name.
    #[arg(long, default_value = "all")]
    filter: String,

    /// Seed for reproducible draws.
    #[arg(long)]
    seed: Option<u64>,

    /// Transition delay per draw, in milliseconds.
    #[arg(long, default_value_t = 150)]
    delay_ms: u64,

    /// Open with the log pane visible.
    #[arg(long)]
    logs: bool,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = AppConfig {
        filter: cli.filter,
        seed: cli.seed,
        delay_ms: cli.delay_ms,
        show_logs: cli.logs,
    };

    // Tracing goes to the TUI log pane; stdout belongs to the terminal UI.
    let (tracing_layer, log_buffer) = StudioTracingLayer::new();
    tracing_subscriber::registry().with(tracing_layer).init();

    let catalog = Catalog::builtin();
    let (clipboard, clipboard_queue) = Osc52Clipboard::channel();
    let session = match start_session(&config, catalog, Arc::new(clipboard)) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    };
    info!(filter = %session.snapshot().filter, "session started");

    let tui_handle = studio_tui::spawn_tui(
        session,
        config.build_tui_config(Some(log_buffer), Some(clipboard_queue)),
        Handle::current(),
    );

    // Keep the runtime free for draw and copy tasks while the TUI runs.
    match tokio::task::spawn_blocking(move || tui_handle.join()).await {
        Ok(Ok(())) => {}
        _ => {
            eprintln!("Error: terminal UI exited abnormally");
            process::exit(1);
        }
    }
}

fn start_session(
    config: &AppConfig,
    catalog: Arc<Catalog>,
    clipboard: Arc<dyn Clipboard>,
) -> studio::Result<Session> {
    let studio_config = config.build_studio_config(&catalog)?;
    let controller = SessionController::new(catalog, studio_config)?
        .with_clipboard(clipboard)
        .with_share_target(Arc::new(NoShare));
    Session::start(controller)
}

//! Headless front end for the Creative Studio engine.
//!
//! # Examples
//!
//! ```sh
//! # Categories and their sizes
//! studio categories
//!
//! # Every minimalist prompt
//! studio list --filter minimalist
//!
//! # Three reproducible draws as JSON snapshots
//! studio draw --filter experimental --seed 7 --count 3 --json
//!
//! # Draw one prompt and share it (printed to stdout)
//! studio share --filter encouraging
//!
//! # Drive a session with intent words, one per line
//! printf 'filter minimalist\ndraw\nfavorite\ncopy\n' | studio script
//! ```

use std::io::{self, BufRead, Write};
use std::process;
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use studio::catalog::ALL_FILTER;
use studio::prelude::*;
use tracing::{Level, warn};

#[derive(Parser)]
#[command(name = "studio", about = "Draw creative prompts from the command line")]
struct Cli {
    /// Log engine events to stderr
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List categories with their prompt counts
    Categories,

    /// Print every prompt eligible under a filter
    List {
        /// `all` or a category name
        #[arg(long, default_value = "all")]
        filter: String,
    },

    /// Draw prompts at random
    Draw {
        /// `all` or a category name
        #[arg(long, default_value = "all")]
        filter: String,

        /// Seed for reproducible draws
        #[arg(long)]
        seed: Option<u64>,

        /// Number of prompts to draw
        #[arg(long, default_value_t = 1)]
        count: usize,

        /// Transition delay per draw, in milliseconds
        #[arg(long, default_value_t = 0)]
        delay_ms: u64,

        /// Print a JSON snapshot per draw instead of the bare prompt
        #[arg(long)]
        json: bool,
    },

    /// Draw one prompt and share it
    Share {
        /// `all` or a category name
        #[arg(long, default_value = "all")]
        filter: String,

        /// Seed for reproducible draws
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Read intents from stdin (draw, filter <name>, copy, favorite, share)
    /// and print a JSON snapshot after each
    Script {
        /// Seed for reproducible draws
        #[arg(long)]
        seed: Option<u64>,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_max_level(if cli.verbose {
            Level::DEBUG
        } else {
            Level::WARN
        })
        .init();

    if let Err(e) = run(cli.command).await {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

async fn run(command: Command) -> Result<(), String> {
    let catalog = Catalog::builtin();
    match command {
        Command::Categories => {
            for entry in catalog.entries() {
                println!("{:<14} {}", entry.category.name(), entry.prompts.len());
            }
            println!("{:<14} {}", ALL_FILTER, catalog.len());
        }
        Command::List { filter } => {
            let filter = catalog.resolve_filter(&filter).map_err(|e| e.to_string())?;
            for prompt in catalog.all_prompts_in(&filter).map_err(|e| e.to_string())? {
                println!("{prompt}");
            }
        }
        Command::Draw {
            filter,
            seed,
            count,
            delay_ms,
            json,
        } => {
            let session = open_session(seed, Duration::from_millis(delay_ms), Arc::new(NoShare))?;
            session.set_filter(&filter).map_err(|e| e.to_string())?;
            for _ in 0..count {
                session
                    .request_new_prompt()
                    .await
                    .map_err(|e| e.to_string())?;
                let snap = session.snapshot();
                if json {
                    println!("{}", to_json(&snap)?);
                } else if let Some(prompt) = snap.current_prompt {
                    println!("{prompt}");
                }
            }
        }
        Command::Share { filter, seed } => {
            let session = open_session(seed, Duration::ZERO, Arc::new(StdoutShare))?;
            session.set_filter(&filter).map_err(|e| e.to_string())?;
            session
                .request_new_prompt()
                .await
                .map_err(|e| e.to_string())?;
            session.share_current_prompt().await;
        }
        Command::Script { seed } => {
            let session = open_session(seed, Duration::ZERO, Arc::new(StdoutShare))?;
            run_script(&session, io::stdin().lock(), &mut io::stdout()).await?;
        }
    }
    Ok(())
}

/// Apply one intent per input line and write a JSON snapshot for each.
///
/// A line that fails (unknown intent, invalid filter) is reported on stderr
/// and skipped; the session keeps going.
async fn run_script(
    session: &Session,
    input: impl BufRead,
    out: &mut impl Write,
) -> Result<(), String> {
    for line in input.lines() {
        let line = line.map_err(|e| format!("failed to read stdin: {e}"))?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match script_step(session, line).await {
            Ok(snap) => writeln!(out, "{}", to_json(&snap)?)
                .map_err(|e| format!("failed to write output: {e}"))?,
            Err(e) => {
                warn!(line, error = %e, "script line rejected");
                eprintln!("Error: {e}");
            }
        }
    }
    Ok(())
}

async fn script_step(session: &Session, line: &str) -> Result<SessionSnapshot, String> {
    let intent = line.parse::<Intent>().map_err(|e| e.to_string())?;
    match intent {
        // Scripts want the drawn prompt, so wait for the commit.
        Intent::RequestNewPrompt => {
            session
                .request_new_prompt()
                .await
                .map_err(|e| e.to_string())?;
            Ok(session.snapshot())
        }
        other => session.dispatch(other).await.map_err(|e| e.to_string()),
    }
}

fn open_session(
    seed: Option<u64>,
    delay: Duration,
    share: Arc<dyn ShareTarget>,
) -> Result<Session, String> {
    let mut config = StudioConfig::default().with_transition_delay(delay);
    if let Some(seed) = seed {
        config = config.with_seed(seed);
    }
    let controller = SessionController::new(Catalog::builtin(), config)
        .map_err(|e| e.to_string())?
        .with_clipboard(Arc::new(MemoryClipboard::new()))
        .with_share_target(share);
    Ok(Session::new(controller))
}

fn to_json(snap: &SessionSnapshot) -> Result<String, String> {
    serde_json::to_string(snap).map_err(|e| format!("failed to serialize snapshot: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn script_skips_rejected_lines() {
        let session = open_session(Some(1), Duration::ZERO, Arc::new(NoShare)).unwrap();
        let input = "filter brutalist\nfilter minimalist\nbogus\n\ndraw\nfavorite\n";
        let mut out = Vec::new();
        run_script(&session, input.as_bytes(), &mut out).await.unwrap();

        let text = String::from_utf8(out).unwrap();
        let snaps: Vec<serde_json::Value> = text
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(snaps.len(), 3);
        assert_eq!(snaps[0]["filter"], "minimalist");
        assert!(snaps[1]["current_prompt"].is_string());
        assert_eq!(snaps[2]["is_favorite"], true);
    }
}

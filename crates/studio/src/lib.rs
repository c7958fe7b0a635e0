//! Prompt catalog and session engine for Creative Studio.
//!
//! Creative Studio shows one short creative prompt at a time, drawn at
//! random from a fixed catalog, optionally narrowed to a single category.
//! The user can copy the prompt, mark it as a favorite, or share it. This
//! crate is everything behind the screen: front ends (the terminal UI in
//! `studio-tui`, the `studio` command-line tool) only render snapshots and
//! forward intents.
//!
//! # Getting started
//!
//! ```ignore
//! use std::sync::Arc;
//! use studio::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> studio::Result<()> {
//!     let controller = SessionController::new(Catalog::builtin(), StudioConfig::default())?
//!         .with_clipboard(Arc::new(MemoryClipboard::new()));
//!     let session = Session::new(controller);
//!
//!     session.set_filter("minimalist")?;
//!     if let DrawOutcome::Committed(prompt) = session.request_new_prompt().await? {
//!         println!("{prompt}");
//!     }
//!     session.toggle_favorite();
//!     session.share_current_prompt().await; // falls back to copy
//!     Ok(())
//! }
//! ```
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`catalog`] | Categories, filters, the shipped prompt table |
//! | [`session`] | [`SessionController`](session::SessionController) state machine and the shared [`Session`](session::Session) handle |
//! | [`intent`] | [`Intent`](intent::Intent) values raised by front ends |
//! | [`platform`] | Clipboard and share capabilities |
//! | [`config`] | [`StudioConfig`] |
//! | [`log`] | Tracing layer feeding an in-app log pane |

pub mod catalog;
pub mod config;
pub mod error;
pub mod intent;
pub mod log;
pub mod platform;
pub mod prelude;
pub mod session;

pub use config::StudioConfig;
pub use error::{Result, StudioError};

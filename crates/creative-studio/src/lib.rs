//! Single-screen creative prompt browser for the terminal.
//!
//! `creative-studio` wires the [`studio`] engine to the [`studio_tui`]
//! front end. The library half only carries [`AppConfig`], which turns
//! command-line settings into engine and TUI configuration:
//!
//! ```ignore
//! use creative_studio::AppConfig;
//! use studio::prelude::*;
//!
//! let config = AppConfig::default();
//! let catalog = Catalog::builtin();
//! let studio_config = config.build_studio_config(&catalog)?;
//! let session = Session::start(SessionController::new(catalog, studio_config)?)?;
//! ```
//!
//! # Binary
//!
//! ```sh
//! # Open on the minimalist prompts
//! creative-studio --filter minimalist
//!
//! # Reproducible draws with the log pane open
//! creative-studio --seed 42 --logs
//! ```

pub mod config;

pub use config::AppConfig;

//! Session state and the operations that mutate it.
//!
//! A [`SessionController`] owns the state of one UI session: the prompt on
//! screen, the active filter, the favorite set, and whether a draw is in
//! flight. It is a plain synchronous state machine. The [`Session`] handle
//! wraps it in `Arc<Mutex<_>>` and drives the asynchronous parts (the
//! transition delay and the capability calls) without holding the lock
//! across an `.await`.
//!
//! # Draws
//!
//! A draw is two-phase:
//!
//! ```text
//! idle ──begin_draw──▶ drawing ──finish_draw / tick (after delay)──▶ idle
//!                        │
//!                        └── begin_draw while drawing: ignored
//! ```
//!
//! [`begin_draw`](SessionController::begin_draw) resolves the pool for the
//! current filter and picks the prompt immediately. The commit only swaps it
//! in, so a filter change while drawing does not affect the pending result.

mod dispatch;
mod favorites;
mod handle;

pub use dispatch::{Dispatch, DispatchOutcome};
pub use favorites::Favorites;
pub use handle::{DrawOutcome, Session};

use std::sync::Arc;
use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use tracing::debug;

use crate::catalog::{Catalog, Category, Filter};
use crate::config::StudioConfig;
use crate::error::{Result, StudioError};
use crate::platform::{Clipboard, NoClipboard, NoShare, ShareTarget};

// ── Draw bookkeeping ──────────────────────────────────────────────────

/// Identifies one accepted draw. Handed back to
/// [`SessionController::finish_draw`] to commit it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawTicket {
    id: u64,
    /// When the draw becomes due.
    pub due: Instant,
    /// How long the caller should wait before committing.
    pub delay: Duration,
}

/// Result of [`SessionController::begin_draw`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawStatus {
    Started(DrawTicket),
    /// A draw was already in flight; nothing changed.
    Ignored,
}

#[derive(Debug, Clone)]
struct PendingDraw {
    ticket: DrawTicket,
    prompt: String,
}

// ── Snapshot ──────────────────────────────────────────────────────────

/// Observable state after an intent has been processed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionSnapshot {
    /// `None` only before the first draw completes.
    pub current_prompt: Option<String>,
    pub filter: Filter,
    pub busy: bool,
    pub is_favorite: bool,
    pub favorite_count: usize,
    /// Category the current prompt belongs to.
    pub category: Option<Category>,
}

// ── Controller ────────────────────────────────────────────────────────

/// Mutable state of one session plus the capabilities it dispatches to.
pub struct SessionController {
    catalog: Arc<Catalog>,
    config: StudioConfig,
    rng: StdRng,
    current: Option<String>,
    filter: Filter,
    favorites: Favorites,
    pending: Option<PendingDraw>,
    next_draw_id: u64,
    clipboard: Arc<dyn Clipboard>,
    share: Arc<dyn ShareTarget>,
}

impl SessionController {
    /// Create an idle session over `catalog`.
    ///
    /// Fails with [`StudioError::InvalidFilter`] if `config.initial_filter`
    /// names a category the catalog does not have. Capabilities default to
    /// [`NoClipboard`] and [`NoShare`].
    pub fn new(catalog: Arc<Catalog>, config: StudioConfig) -> Result<Self> {
        catalog.validate_filter(&config.initial_filter)?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Ok(Self {
            filter: config.initial_filter,
            catalog,
            config,
            rng,
            current: None,
            favorites: Favorites::new(),
            pending: None,
            next_draw_id: 0,
            clipboard: Arc::new(NoClipboard),
            share: Arc::new(NoShare),
        })
    }

    pub fn with_clipboard(mut self, clipboard: Arc<dyn Clipboard>) -> Self {
        self.clipboard = clipboard;
        self
    }

    pub fn with_share_target(mut self, share: Arc<dyn ShareTarget>) -> Self {
        self.share = share;
        self
    }

    // ── Accessors ──

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    pub fn config(&self) -> &StudioConfig {
        &self.config
    }

    pub fn current_prompt(&self) -> Option<&str> {
        self.current.as_deref()
    }

    pub fn filter(&self) -> Filter {
        self.filter
    }

    pub fn favorites(&self) -> &Favorites {
        &self.favorites
    }

    pub fn is_busy(&self) -> bool {
        self.pending.is_some()
    }

    /// Prompt picked by the in-flight draw, not yet visible in snapshots.
    pub fn pending_prompt(&self) -> Option<&str> {
        self.pending.as_ref().map(|p| p.prompt.as_str())
    }

    pub fn is_favorite(&self) -> bool {
        self.current
            .as_deref()
            .is_some_and(|p| self.favorites.contains(p))
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            current_prompt: self.current.clone(),
            filter: self.filter,
            busy: self.is_busy(),
            is_favorite: self.is_favorite(),
            favorite_count: self.favorites.len(),
            category: self
                .current
                .as_deref()
                .and_then(|p| self.catalog.category_of(p)),
        }
    }

    // ── Draws ──

    /// Accept a draw request: pick a prompt from the current pool and mark
    /// the session busy until the returned ticket is committed.
    ///
    /// Ignored while another draw is in flight. The pool is resolved before
    /// the session turns busy, so an [`StudioError::EmptyPool`] failure
    /// leaves the state untouched.
    pub fn begin_draw(&mut self, now: Instant) -> Result<DrawStatus> {
        if let Some(pending) = &self.pending {
            debug!(draw = pending.ticket.id, "draw already in flight, ignoring request");
            return Ok(DrawStatus::Ignored);
        }

        let pool = self.catalog.all_prompts_in(&self.filter)?;
        if pool.is_empty() {
            return Err(StudioError::EmptyPool(self.filter));
        }
        let index = self.rng.random_range(0..pool.len());
        let prompt = pool[index].to_string();

        let delay = self.config.transition_delay;
        let ticket = DrawTicket {
            id: self.next_draw_id,
            due: now + delay,
            delay,
        };
        self.next_draw_id += 1;
        debug!(
            draw = ticket.id,
            filter = %self.filter,
            pool = pool.len(),
            index,
            "draw started"
        );
        self.pending = Some(PendingDraw { ticket, prompt });
        Ok(DrawStatus::Started(ticket))
    }

    /// Commit the draw identified by `ticket`, returning the new prompt.
    ///
    /// Returns `None` if that draw was already committed (e.g. by
    /// [`tick`](Self::tick)); a stale ticket never commits a later draw.
    pub fn finish_draw(&mut self, ticket: DrawTicket) -> Option<String> {
        if self.pending.as_ref()?.ticket.id != ticket.id {
            return None;
        }
        self.commit_pending()
    }

    /// Commit the in-flight draw if it is due at `now`.
    ///
    /// For front ends that advance state once per frame instead of awaiting
    /// timers. Returns `true` if a prompt was committed.
    pub fn tick(&mut self, now: Instant) -> bool {
        let due = self.pending.as_ref().is_some_and(|p| now >= p.ticket.due);
        due && self.commit_pending().is_some()
    }

    fn commit_pending(&mut self) -> Option<String> {
        let PendingDraw { ticket, prompt } = self.pending.take()?;
        debug!(draw = ticket.id, prompt = %prompt, "draw committed");
        self.current = Some(prompt.clone());
        Some(prompt)
    }

    // ── Filter / favorites ──

    /// Change the active filter. Does not draw and does not touch `busy`.
    pub fn set_filter(&mut self, name: &str) -> Result<Filter> {
        let filter = self.catalog.resolve_filter(name)?;
        if filter != self.filter {
            debug!(from = %self.filter, to = %filter, "filter changed");
        }
        self.filter = filter;
        Ok(filter)
    }

    /// Flip the current prompt's favorite membership.
    ///
    /// Returns `None` when there is no current prompt, otherwise whether
    /// the prompt is now a favorite.
    pub fn toggle_favorite(&mut self) -> Option<bool> {
        let prompt = self.current.as_deref()?;
        let now_favorite = self.favorites.toggle(prompt);
        debug!(prompt, favorite = now_favorite, "favorite toggled");
        Some(now_favorite)
    }

    // ── Copy / share ──

    /// Detach what copy and share need from the session.
    ///
    /// `None` when there is no current prompt.
    pub fn prepare_dispatch(&self) -> Option<Dispatch> {
        let prompt = self.current.clone()?;
        Some(Dispatch::new(
            prompt,
            &self.config.product_name,
            Arc::clone(&self.clipboard),
            Arc::clone(&self.share),
        ))
    }

    /// Copy the current prompt to the clipboard. Never fails.
    pub async fn copy_current_prompt(&self) -> DispatchOutcome {
        match self.prepare_dispatch() {
            Some(d) => d.copy().await,
            None => DispatchOutcome::Skipped,
        }
    }

    /// Share the current prompt, falling back to a copy. Never fails.
    pub async fn share_current_prompt(&self) -> DispatchOutcome {
        match self.prepare_dispatch() {
            Some(d) => d.share().await,
            None => DispatchOutcome::Skipped,
        }
    }
}

//! Shared, cloneable handle to a [`SessionController`].
//!
//! The presentation layer and the tasks that complete draws all hold a
//! [`Session`]. The controller lives behind a `std::sync::Mutex` that is
//! only ever held for synchronous work; every `.await` happens with the
//! lock released.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Instant;

use tokio::task::JoinHandle;
use tracing::{debug, warn};

use super::{DispatchOutcome, DrawStatus, SessionController, SessionSnapshot};
use crate::catalog::{Catalog, Filter};
use crate::error::Result;
use crate::intent::Intent;

/// How an awaited draw request ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawOutcome {
    /// The draw ran and this prompt is now current.
    Committed(String),
    /// Another draw was already in flight.
    Ignored,
}

/// Cloneable handle to one session's controller.
#[derive(Clone)]
pub struct Session {
    inner: Arc<Mutex<SessionController>>,
}

impl Session {
    /// Wrap `controller` without drawing.
    pub fn new(controller: SessionController) -> Self {
        Self {
            inner: Arc::new(Mutex::new(controller)),
        }
    }

    /// Wrap `controller` and kick off the first draw in the background.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(controller: SessionController) -> Result<Self> {
        let session = Self::new(controller);
        session.spawn_draw()?;
        Ok(session)
    }

    /// Lock the controller. A poisoned lock is recovered; the controller
    /// holds no invariants a panicking reader could break halfway.
    pub fn lock(&self) -> MutexGuard<'_, SessionController> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.lock().snapshot()
    }

    pub fn catalog(&self) -> Arc<Catalog> {
        Arc::clone(self.lock().catalog())
    }

    pub fn product_name(&self) -> String {
        self.lock().config().product_name.clone()
    }

    /// Favorites in the order they were added.
    pub fn favorites(&self) -> Vec<String> {
        self.lock().favorites().iter().map(str::to_string).collect()
    }

    pub fn set_filter(&self, name: &str) -> Result<Filter> {
        self.lock().set_filter(name)
    }

    pub fn toggle_favorite(&self) -> Option<bool> {
        self.lock().toggle_favorite()
    }

    /// Commit the in-flight draw if it is due. See [`SessionController::tick`].
    pub fn tick(&self) -> bool {
        self.lock().tick(Instant::now())
    }

    /// Draw a new prompt and wait for the transition to finish.
    ///
    /// The commit runs in the task started by [`spawn_draw`](Self::spawn_draw),
    /// so dropping this future mid-transition still lets the draw land.
    pub async fn request_new_prompt(&self) -> Result<DrawOutcome> {
        let Some(draw) = self.spawn_draw()? else {
            return Ok(DrawOutcome::Ignored);
        };
        match draw.await {
            Ok(prompt) => Ok(DrawOutcome::Committed(prompt)),
            Err(e) => {
                warn!(error = %e, "draw task did not finish");
                Ok(self
                    .snapshot()
                    .current_prompt
                    .map_or(DrawOutcome::Ignored, DrawOutcome::Committed))
            }
        }
    }

    /// Start a draw and commit it from a background task.
    ///
    /// The task resolves to the drawn prompt once it is committed, whether
    /// the task itself or an earlier [`tick`](Self::tick) did the commit.
    /// Returns `Ok(None)` when a draw is already in flight. Must be called
    /// from within a tokio runtime.
    pub fn spawn_draw(&self) -> Result<Option<JoinHandle<String>>> {
        let (ticket, prompt) = {
            let mut controller = self.lock();
            let DrawStatus::Started(ticket) = controller.begin_draw(Instant::now())? else {
                return Ok(None);
            };
            let prompt = controller.pending_prompt().unwrap_or_default().to_string();
            (ticket, prompt)
        };
        let session = self.clone();
        Ok(Some(tokio::spawn(async move {
            tokio::time::sleep(ticket.delay).await;
            if session.lock().finish_draw(ticket).is_none() {
                debug!("draw already committed by tick");
            }
            prompt
        })))
    }

    /// Copy the current prompt. Clipboard failures are absorbed.
    pub async fn copy_current_prompt(&self) -> DispatchOutcome {
        let dispatch = self.lock().prepare_dispatch();
        match dispatch {
            Some(d) => d.copy().await,
            None => DispatchOutcome::Skipped,
        }
    }

    /// Share the current prompt, falling back to a copy.
    pub async fn share_current_prompt(&self) -> DispatchOutcome {
        let dispatch = self.lock().prepare_dispatch();
        match dispatch {
            Some(d) => d.share().await,
            None => DispatchOutcome::Skipped,
        }
    }

    /// Process one intent and return the resulting snapshot.
    ///
    /// A draw request only starts the draw; its completion shows up in a
    /// later snapshot.
    pub async fn dispatch(&self, intent: Intent) -> Result<SessionSnapshot> {
        match intent {
            Intent::RequestNewPrompt => {
                self.spawn_draw()?;
            }
            Intent::SetFilter(name) => {
                if let Err(e) = self.set_filter(&name) {
                    warn!(error = %e, "rejected filter change");
                    return Err(e);
                }
            }
            Intent::CopyPrompt => {
                self.copy_current_prompt().await;
            }
            Intent::ToggleFavorite => {
                self.toggle_favorite();
            }
            Intent::SharePrompt => {
                self.share_current_prompt().await;
            }
        }
        Ok(self.snapshot())
    }
}

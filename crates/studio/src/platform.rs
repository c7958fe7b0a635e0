//! Platform capabilities consumed by the session: clipboard and share.
//!
//! The engine never implements these itself. Front ends plug in whatever
//! their platform offers; [`NoClipboard`] and [`NoShare`] stand in when
//! nothing is available.
//!
//! Both traits return boxed futures so they stay object-safe and can be
//! held as `Arc<dyn Clipboard>` / `Arc<dyn ShareTarget>`.

use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use serde::Serialize;
use thiserror::Error;

/// Future returned by capability calls.
pub type CapabilityFuture<'a> =
    Pin<Box<dyn Future<Output = Result<(), CapabilityError>> + Send + 'a>>;

/// Why a capability call did not go through.
///
/// These are expected environmental conditions, not defects. The session
/// absorbs them; they never reach intent callers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CapabilityError {
    #[error("capability unavailable on this platform")]
    Unavailable,
    #[error("cancelled by the user")]
    Cancelled,
    #[error("rejected: {0}")]
    Rejected(String),
}

/// Title and body handed to a share target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SharePayload {
    pub title: String,
    pub text: String,
}

impl SharePayload {
    /// Build the payload for sharing `prompt` from `product`.
    pub fn for_prompt(prompt: &str, product: &str) -> Self {
        Self {
            title: product.to_string(),
            text: format!("\"{prompt}\" \u{2014} A creative prompt from {product}"),
        }
    }
}

/// Write text to the system clipboard.
pub trait Clipboard: Send + Sync {
    fn write_text(&self, text: &str) -> CapabilityFuture<'_>;
}

/// Hand a payload to a platform share sheet.
pub trait ShareTarget: Send + Sync {
    /// Whether the platform offers sharing at all.
    fn is_available(&self) -> bool {
        true
    }

    fn share(&self, payload: &SharePayload) -> CapabilityFuture<'_>;
}

// ── Null implementations ──────────────────────────────────────────────

/// Clipboard for platforms without one. Every write fails.
pub struct NoClipboard;

impl Clipboard for NoClipboard {
    fn write_text(&self, _text: &str) -> CapabilityFuture<'_> {
        Box::pin(async { Err(CapabilityError::Unavailable) })
    }
}

/// Share target for platforms without a share sheet.
pub struct NoShare;

impl ShareTarget for NoShare {
    fn is_available(&self) -> bool {
        false
    }

    fn share(&self, _payload: &SharePayload) -> CapabilityFuture<'_> {
        Box::pin(async { Err(CapabilityError::Unavailable) })
    }
}

// ── In-memory clipboard ───────────────────────────────────────────────

/// Clipboard that keeps every write in memory.
///
/// Used by the headless CLI and by tests. Clones share the same history.
#[derive(Clone, Default)]
pub struct MemoryClipboard(Arc<Mutex<Vec<String>>>);

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recent write, if any.
    pub fn contents(&self) -> Option<String> {
        self.0
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .last()
            .cloned()
    }

    /// Every write in order.
    pub fn history(&self) -> Vec<String> {
        self.0.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

impl Clipboard for MemoryClipboard {
    fn write_text(&self, text: &str) -> CapabilityFuture<'_> {
        let text = text.to_string();
        Box::pin(async move {
            self.0.lock().unwrap_or_else(|e| e.into_inner()).push(text);
            Ok(())
        })
    }
}

// ── Stdout share ──────────────────────────────────────────────────────

/// Share target that prints the payload to stdout.
///
/// Lets the headless CLI behave like a share sheet: the shared text lands
/// in the terminal (or a pipe) instead of a platform dialog.
pub struct StdoutShare;

impl ShareTarget for StdoutShare {
    fn share(&self, payload: &SharePayload) -> CapabilityFuture<'_> {
        let line = format!("{}\n{}", payload.title, payload.text);
        Box::pin(async move {
            println!("{line}");
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn share_payload_quotes_prompt_and_names_product() {
        let payload = SharePayload::for_prompt("Work with absence", "Creative Studio");
        assert_eq!(payload.title, "Creative Studio");
        assert_eq!(
            payload.text,
            "\"Work with absence\" \u{2014} A creative prompt from Creative Studio"
        );
    }

    #[tokio::test]
    async fn memory_clipboard_records_writes() {
        let clipboard = MemoryClipboard::new();
        assert!(clipboard.contents().is_none());

        clipboard.write_text("first").await.unwrap();
        clipboard.clone().write_text("second").await.unwrap();

        assert_eq!(clipboard.contents().as_deref(), Some("second"));
        assert_eq!(clipboard.history(), ["first", "second"]);
    }

    #[tokio::test]
    async fn null_capabilities_are_unavailable() {
        assert_eq!(
            NoClipboard.write_text("x").await,
            Err(CapabilityError::Unavailable)
        );
        assert!(!NoShare.is_available());
        let payload = SharePayload::for_prompt("x", "y");
        assert_eq!(
            NoShare.share(&payload).await,
            Err(CapabilityError::Unavailable)
        );
    }
}

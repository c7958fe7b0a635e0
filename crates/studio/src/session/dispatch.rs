//! Copy and share dispatch with its fallback chain.
//!
//! Sharing walks an ordered list of attempts. Each attempt runs inside its
//! own failure boundary: any error moves on to the next one. The last
//! attempt is a clipboard copy, whose failure is logged and dropped.
//! Nothing in here returns an error to the caller.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info};

use crate::platform::{Clipboard, SharePayload, ShareTarget};

/// Which step of the chain handled a copy or share intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DispatchOutcome {
    /// The share target accepted the payload.
    Shared,
    /// The prompt text was written to the clipboard.
    Copied,
    /// Every attempt failed; the failure was absorbed.
    Dropped,
    /// There was no prompt to dispatch.
    Skipped,
}

/// One step of the share chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Attempt {
    Share,
    Copy,
}

const SHARE_CHAIN: [Attempt; 2] = [Attempt::Share, Attempt::Copy];

/// Everything needed to copy or share a prompt, detached from the session.
///
/// Built under the session lock by
/// [`SessionController::prepare_dispatch`](super::SessionController::prepare_dispatch)
/// so the capability calls can be awaited without holding it.
#[derive(Clone)]
pub struct Dispatch {
    prompt: String,
    payload: SharePayload,
    clipboard: Arc<dyn Clipboard>,
    share: Arc<dyn ShareTarget>,
}

impl Dispatch {
    pub(crate) fn new(
        prompt: String,
        product_name: &str,
        clipboard: Arc<dyn Clipboard>,
        share: Arc<dyn ShareTarget>,
    ) -> Self {
        let payload = SharePayload::for_prompt(&prompt, product_name);
        Self {
            prompt,
            payload,
            clipboard,
            share,
        }
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn payload(&self) -> &SharePayload {
        &self.payload
    }

    /// Write the raw prompt text to the clipboard. Failures are swallowed.
    pub async fn copy(&self) -> DispatchOutcome {
        match self.clipboard.write_text(&self.prompt).await {
            Ok(()) => {
                debug!(prompt = %self.prompt, "copied prompt to clipboard");
                DispatchOutcome::Copied
            }
            Err(e) => {
                debug!(error = %e, "clipboard write failed");
                DispatchOutcome::Dropped
            }
        }
    }

    /// Share the prompt, falling back to a copy if sharing is unavailable
    /// or fails for any reason (including cancellation).
    pub async fn share(&self) -> DispatchOutcome {
        for attempt in SHARE_CHAIN {
            match attempt {
                Attempt::Share => {
                    if !self.share.is_available() {
                        debug!("share target unavailable");
                        continue;
                    }
                    match self.share.share(&self.payload).await {
                        Ok(()) => {
                            debug!(prompt = %self.prompt, "shared prompt");
                            return DispatchOutcome::Shared;
                        }
                        Err(e) => info!(error = %e, "share failed, falling back to copy"),
                    }
                }
                Attempt::Copy => return self.copy().await,
            }
        }
        DispatchOutcome::Dropped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::{
        CapabilityError, CapabilityFuture, MemoryClipboard, NoClipboard, NoShare,
    };
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FailingShare {
        error: CapabilityError,
        calls: AtomicUsize,
    }

    impl FailingShare {
        fn new(error: CapabilityError) -> Self {
            Self {
                error,
                calls: AtomicUsize::new(0),
            }
        }
    }

    impl ShareTarget for FailingShare {
        fn share(&self, _payload: &SharePayload) -> CapabilityFuture<'_> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let err = self.error.clone();
            Box::pin(async move { Err(err) })
        }
    }

    #[derive(Default)]
    struct RecordingShare(std::sync::Mutex<Vec<SharePayload>>);

    impl ShareTarget for RecordingShare {
        fn share(&self, payload: &SharePayload) -> CapabilityFuture<'_> {
            self.0.lock().unwrap().push(payload.clone());
            Box::pin(async { Ok(()) })
        }
    }

    fn dispatch(clipboard: Arc<dyn Clipboard>, share: Arc<dyn ShareTarget>) -> Dispatch {
        Dispatch::new(
            "Work with absence".into(),
            "Creative Studio",
            clipboard,
            share,
        )
    }

    #[tokio::test]
    async fn share_success_does_not_copy() {
        let clipboard = MemoryClipboard::new();
        let share = Arc::new(RecordingShare::default());
        let d = dispatch(Arc::new(clipboard.clone()), share.clone());

        assert_eq!(d.share().await, DispatchOutcome::Shared);
        assert!(clipboard.contents().is_none());
        let sent = share.0.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].title, "Creative Studio");
        assert!(sent[0].text.starts_with("\"Work with absence\""));
    }

    #[tokio::test]
    async fn unavailable_share_falls_back_to_copy() {
        let clipboard = MemoryClipboard::new();
        let d = dispatch(Arc::new(clipboard.clone()), Arc::new(NoShare));

        assert_eq!(d.share().await, DispatchOutcome::Copied);
        assert_eq!(clipboard.contents().as_deref(), Some("Work with absence"));
    }

    #[tokio::test]
    async fn rejected_or_cancelled_share_falls_back_to_copy() {
        for error in [
            CapabilityError::Cancelled,
            CapabilityError::Rejected("permission denied".into()),
        ] {
            let clipboard = MemoryClipboard::new();
            let share = Arc::new(FailingShare::new(error));
            let d = dispatch(Arc::new(clipboard.clone()), share.clone());

            assert_eq!(d.share().await, DispatchOutcome::Copied);
            assert_eq!(share.calls.load(Ordering::SeqCst), 1);
            assert_eq!(clipboard.contents().as_deref(), Some("Work with absence"));
        }
    }

    #[tokio::test]
    async fn everything_failing_is_absorbed() {
        let d = dispatch(
            Arc::new(NoClipboard),
            Arc::new(FailingShare::new(CapabilityError::Cancelled)),
        );
        assert_eq!(d.share().await, DispatchOutcome::Dropped);
        assert_eq!(d.copy().await, DispatchOutcome::Dropped);
    }
}

//! Terminal clipboard via the OSC 52 escape sequence.
//!
//! Most modern terminals (and tmux with `set-clipboard on`) copy the
//! payload of an OSC 52 sequence to the system clipboard, which also works
//! over SSH.
//!
//! Copies are raised from tokio tasks, but only the TUI thread may write to
//! the terminal. [`Osc52Clipboard`] therefore just queues the sequence; the
//! event loop flushes the [`Osc52Queue`] between frames.

use std::io::{self, Write};
use std::sync::mpsc::{self, Receiver, Sender};

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use studio::platform::{CapabilityError, CapabilityFuture, Clipboard};
use tracing::debug;

/// Largest base64 payload sent in one sequence. Terminals drop or truncate
/// anything longer.
pub const MAX_OSC52_PAYLOAD: usize = 74_994;

/// Build the OSC 52 "set clipboard" sequence for `text`.
///
/// Fails with [`CapabilityError::Rejected`] if the encoded payload exceeds
/// [`MAX_OSC52_PAYLOAD`].
pub fn osc52_sequence(text: &str) -> Result<String, CapabilityError> {
    let encoded = STANDARD.encode(text);
    if encoded.len() > MAX_OSC52_PAYLOAD {
        return Err(CapabilityError::Rejected(format!(
            "OSC 52 payload too large ({} > {MAX_OSC52_PAYLOAD})",
            encoded.len()
        )));
    }
    Ok(format!("\x1b]52;c;{encoded}\x07"))
}

/// Clipboard that queues OSC 52 sequences for the TUI thread.
///
/// The terminal gives no acknowledgement, so a queued sequence is reported
/// as a successful copy.
#[derive(Debug, Clone)]
pub struct Osc52Clipboard {
    tx: Sender<String>,
}

/// Receiving side of an [`Osc52Clipboard`], handed to the TUI through
/// [`TuiConfig::clipboard_queue`](crate::TuiConfig::clipboard_queue).
#[derive(Debug)]
pub struct Osc52Queue {
    rx: Receiver<String>,
}

impl Osc52Clipboard {
    pub fn channel() -> (Self, Osc52Queue) {
        let (tx, rx) = mpsc::channel();
        (Self { tx }, Osc52Queue { rx })
    }
}

impl Clipboard for Osc52Clipboard {
    fn write_text(&self, text: &str) -> CapabilityFuture<'_> {
        let result = osc52_sequence(text).and_then(|seq| {
            // The queue is gone once the TUI has exited.
            self.tx.send(seq).map_err(|_| CapabilityError::Unavailable)
        });
        debug!(ok = result.is_ok(), chars = text.chars().count(), "osc52 queued");
        Box::pin(async move { result })
    }
}

impl Osc52Queue {
    /// Write every queued sequence to `out`. Returns how many were written.
    pub(crate) fn flush_into(&self, out: &mut impl Write) -> io::Result<usize> {
        let mut written = 0;
        while let Ok(seq) = self.rx.try_recv() {
            out.write_all(seq.as_bytes())?;
            written += 1;
        }
        if written > 0 {
            out.flush()?;
        }
        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequence_wraps_base64_payload() {
        assert_eq!(osc52_sequence("hi").unwrap(), "\x1b]52;c;aGk=\x07");
    }

    #[test]
    fn oversized_payload_is_rejected() {
        // 3 bytes encode to 4 base64 chars.
        let fits = "a".repeat(MAX_OSC52_PAYLOAD / 4 * 3);
        assert!(osc52_sequence(&fits).is_ok());
        let too_big = "a".repeat(MAX_OSC52_PAYLOAD / 4 * 3 + 3);
        assert!(matches!(
            osc52_sequence(&too_big),
            Err(CapabilityError::Rejected(_))
        ));
    }

    #[tokio::test]
    async fn copies_are_written_only_when_flushed() {
        let (clipboard, queue) = Osc52Clipboard::channel();
        clipboard.write_text("Work with absence").await.unwrap();
        clipboard.write_text("hi").await.unwrap();

        let mut out = Vec::new();
        assert_eq!(queue.flush_into(&mut out).unwrap(), 2);
        let expected = format!(
            "{}{}",
            osc52_sequence("Work with absence").unwrap(),
            osc52_sequence("hi").unwrap()
        );
        assert_eq!(String::from_utf8(out).unwrap(), expected);

        let mut out = Vec::new();
        assert_eq!(queue.flush_into(&mut out).unwrap(), 0);
        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn copy_after_tui_exit_is_unavailable() {
        let (clipboard, queue) = Osc52Clipboard::channel();
        drop(queue);
        assert_eq!(
            clipboard.write_text("hi").await,
            Err(CapabilityError::Unavailable)
        );
    }
}

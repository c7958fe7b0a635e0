//! Tracing layer that captures log events for display inside a front end.
//!
//! A terminal UI owns the screen, so log lines cannot go to stderr while it
//! runs. [`StudioTracingLayer`] pushes formatted [`LogLine`]s into a
//! [`LogBuffer`] instead. The buffer has its own mutex, separate from the
//! session lock, so logging from a draw task never waits on rendering.

use std::sync::{Arc, Mutex};

use chrono::Local;
use serde::Serialize;
use tracing::Subscriber;
use tracing_subscriber::layer::{Context, Layer};
use tracing_subscriber::registry::LookupSpan;

/// Maximum log lines kept in memory.
pub const MAX_LOG_LINES: usize = 2000;
/// Trim to this many when the cap is exceeded.
pub const LOG_TRIM_TO: usize = 1200;

/// A single captured log line.
#[derive(Clone, Debug, Serialize)]
pub struct LogLine {
    pub time: String,
    pub level: LogLevel,
    pub message: String,
}

/// Log severity (mirrors tracing levels).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Short fixed-width label for display.
    pub fn label(self) -> &'static str {
        match self {
            Self::Trace => "TRACE",
            Self::Debug => "DEBUG",
            Self::Info => "INFO ",
            Self::Warn => "WARN ",
            Self::Error => "ERROR",
        }
    }
}

impl From<tracing::Level> for LogLevel {
    fn from(level: tracing::Level) -> Self {
        match level {
            tracing::Level::TRACE => Self::Trace,
            tracing::Level::DEBUG => Self::Debug,
            tracing::Level::INFO => Self::Info,
            tracing::Level::WARN => Self::Warn,
            tracing::Level::ERROR => Self::Error,
        }
    }
}

/// Keep `lines` under [`MAX_LOG_LINES`], dropping the oldest.
fn trim(lines: &mut Vec<LogLine>) {
    if lines.len() > MAX_LOG_LINES {
        let drop = lines.len() - LOG_TRIM_TO;
        lines.drain(..drop);
    }
}

/// Shared buffer of pending log lines.
#[derive(Clone, Default)]
pub struct LogBuffer(Arc<Mutex<Vec<LogLine>>>);

impl LogBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take every pending line.
    pub fn drain(&self) -> Vec<LogLine> {
        let mut buf = self.0.lock().unwrap_or_else(|e| e.into_inner());
        std::mem::take(&mut *buf)
    }

    /// Move pending lines onto the end of `logs`, respecting the trim limits.
    /// Returns how many lines were moved.
    pub fn drain_into(&self, logs: &mut Vec<LogLine>) -> usize {
        let lines = self.drain();
        let n = lines.len();
        if n > 0 {
            logs.extend(lines);
            trim(logs);
        }
        n
    }

    fn push(&self, line: LogLine) {
        if let Ok(mut buf) = self.0.lock() {
            buf.push(line);
            // A burst before the next drain must not grow without bound.
            trim(&mut buf);
        }
    }
}

/// A [`tracing_subscriber::Layer`] that writes events into a [`LogBuffer`].
pub struct StudioTracingLayer {
    buffer: LogBuffer,
}

impl StudioTracingLayer {
    /// Create the layer and the buffer a front end drains from.
    pub fn new() -> (Self, LogBuffer) {
        let buffer = LogBuffer::new();
        (
            Self {
                buffer: buffer.clone(),
            },
            buffer,
        )
    }
}

impl<S: Subscriber + for<'a> LookupSpan<'a>> Layer<S> for StudioTracingLayer {
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);

        self.buffer.push(LogLine {
            time: Local::now().format("%H:%M:%S").to_string(),
            level: (*event.metadata().level()).into(),
            message: visitor.finish(),
        });
    }
}

/// Collects the message and `key=value` fields of an event.
#[derive(Default)]
struct MessageVisitor {
    message: String,
    fields: Vec<(String, String)>,
}

impl MessageVisitor {
    fn finish(self) -> String {
        if self.fields.is_empty() {
            return self.message;
        }
        let extras: Vec<String> = self
            .fields
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect();
        if self.message.is_empty() {
            extras.join(" ")
        } else {
            format!("{} {{{}}}", self.message, extras.join(", "))
        }
    }
}

impl tracing::field::Visit for MessageVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        let rendered = format!("{value:?}");
        if field.name() == "message" {
            self.message = rendered;
        } else {
            self.fields.push((field.name().to_string(), rendered));
        }
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        } else {
            self.fields.push((field.name().to_string(), value.to_string()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_subscriber::layer::SubscriberExt;

    fn line(n: usize) -> LogLine {
        LogLine {
            time: "00:00:00".into(),
            level: LogLevel::Info,
            message: n.to_string(),
        }
    }

    #[test]
    fn log_level_labels() {
        assert_eq!(LogLevel::Info.label(), "INFO ");
        assert_eq!(LogLevel::Error.label(), "ERROR");
        assert_eq!(LogLevel::from(tracing::Level::WARN), LogLevel::Warn);
    }

    #[test]
    fn layer_captures_message_and_fields() {
        let (layer, buffer) = StudioTracingLayer::new();
        let subscriber = tracing_subscriber::registry().with(layer);
        tracing::subscriber::with_default(subscriber, || {
            tracing::info!(filter = "minimalist", "filter changed");
            tracing::warn!(count = 2);
        });

        let lines = buffer.drain();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].level, LogLevel::Info);
        assert_eq!(lines[0].message, "filter changed {filter=minimalist}");
        assert_eq!(lines[1].level, LogLevel::Warn);
        assert_eq!(lines[1].message, "count=2");
        assert!(buffer.drain().is_empty());
    }

    #[test]
    fn drain_into_trims_oldest() {
        let buffer = LogBuffer::new();
        let mut logs: Vec<LogLine> = (0..MAX_LOG_LINES).map(line).collect();
        buffer.push(line(MAX_LOG_LINES));

        assert_eq!(buffer.drain_into(&mut logs), 1);
        assert_eq!(logs.len(), LOG_TRIM_TO);
        assert_eq!(logs.last().unwrap().message, MAX_LOG_LINES.to_string());
        assert_eq!(buffer.drain_into(&mut logs), 0);
    }
}

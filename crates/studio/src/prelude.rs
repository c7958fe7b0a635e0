//! Convenience re-exports for front ends.
//!
//! ```ignore
//! use studio::prelude::*;
//! ```

pub use crate::catalog::{Catalog, Category, Filter};
pub use crate::config::StudioConfig;
pub use crate::error::StudioError;
pub use crate::intent::Intent;
pub use crate::log::{LogBuffer, LogLevel, LogLine, StudioTracingLayer};
pub use crate::platform::{
    CapabilityError, Clipboard, MemoryClipboard, NoClipboard, NoShare, SharePayload, ShareTarget,
    StdoutShare,
};
pub use crate::session::{
    DispatchOutcome, DrawOutcome, Session, SessionController, SessionSnapshot,
};

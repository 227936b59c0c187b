//! Dialogue transcript domain.
//!
//! - [`entities::TranscriptEntry`]: a single turn (system, user, assistant,
//!   tool request or tool result)
//! - [`log::Transcript`]: the ordered, append-only log replayed to the
//!   model on every request

pub mod entities;
pub mod log;

pub use entities::{Role, TranscriptEntry};
pub use log::{DEFAULT_SYSTEM_PROMPT, Transcript};

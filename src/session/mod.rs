//! Session layer — conversation state machines for the TRACE assistant.
//!
//! Submodules:
//! - `conversation`: `ChatSession`, the transcript-owning controller
//! - `reply_analysis`: classify and normalize raw chat replies into turns
//! - `nearby`: one-shot "find talent near me" lookup state
//! - `types`: transcript and candidate types shared across the layer
//! - `errors`: precondition rejections
//!
//! The chat session and the nearby lookup are independent instances of the
//! same request/pending/reply pattern; they may be in flight at the same time
//! and are never serialized against each other.

pub mod conversation;
pub mod errors;
pub mod nearby;
pub mod reply_analysis;
pub mod types;

// Re-exports for convenience
pub use conversation::{ChatBackend, ChatSession};
pub use errors::SessionError;
pub use nearby::{NearbyBackend, NearbyOutcome, NearbySearch};
pub use reply_analysis::{normalize_candidate, normalize_reply};
pub use types::{CandidateSummary, Role, Turn, TurnKind, CONNECTIVITY_FALLBACK, GREETING};

//! Shared types for the session layer.
//!
//! The transcript model (`Turn`, `Role`, `TurnKind`) and the display-ready
//! candidate record (`CandidateSummary`) used by the chat controller, the
//! reply discriminator, and the nearby-search variant.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use crate::api::types::Role;

// ─── Constants ──────────────────────────────────────────────────────────────

/// Synthetic assistant turn every new transcript starts with.
pub const GREETING: &str =
    "Hello! I am Trace AI. How can I help you find the perfect talent today?";

/// Canned assistant turn appended when a chat request fails at the transport
/// level. The raw error never reaches the transcript.
pub const CONNECTIVITY_FALLBACK: &str =
    "Sorry, I'm having trouble connecting to the server. Please ensure the backend is running.";

/// How many skills a candidate card shows before truncating.
const SKILL_DISPLAY_LIMIT: usize = 3;

// ─── Transcript ─────────────────────────────────────────────────────────────

/// What a turn carries: plain text, or text plus a ranked candidate list.
///
/// The discriminant replaces optional-field sniffing on the wire shape, so a
/// `ResultSet` turn always has a payload and a `Text` turn never does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnKind {
    Text,
    ResultSet,
}

/// One entry in a conversation transcript.
///
/// Turns are append-only: once constructed they are never mutated, and
/// transcript order is presentation order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Turn {
    /// Author of the turn.
    pub role: Role,
    /// Text shown to the user.
    pub content: String,
    /// Discriminant for `payload`.
    pub kind: TurnKind,
    /// Ranked candidates; empty unless `kind` is `ResultSet`.
    pub payload: Vec<CandidateSummary>,
    /// UTC creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Turn {
    /// A user text turn.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
            kind: TurnKind::Text,
            payload: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// An assistant text turn.
    pub fn assistant_text(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
            kind: TurnKind::Text,
            payload: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// An assistant turn carrying a ranked candidate list.
    pub fn assistant_results(
        content: impl Into<String>,
        payload: Vec<CandidateSummary>,
    ) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
            kind: TurnKind::ResultSet,
            payload,
            created_at: Utc::now(),
        }
    }

    /// Whether this turn carries candidates.
    pub fn is_result_set(&self) -> bool {
        self.kind == TurnKind::ResultSet
    }
}

// ─── Candidates ─────────────────────────────────────────────────────────────

/// Display-ready representation of one matched person.
///
/// Produced from wire records by `reply_analysis::normalize_candidate`; the
/// score is clamped there, so a constructed summary always satisfies
/// `0.0 <= score <= 100.0`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateSummary {
    /// Opaque identifier, unique within one response.
    pub id: String,
    pub name: Option<String>,
    pub role: Option<String>,
    pub location: Option<String>,
    /// Full skill list; display truncates via [`top_skills`](Self::top_skills).
    pub skills: Vec<String>,
    /// Match score in [0, 100]. Drives both the label and the meter width.
    pub score: f64,
    pub verified: bool,
    /// Avatar URL.
    pub image: Option<String>,
    /// Professional-network profile URL, treated as an opaque string.
    pub linkedin: Option<String>,
    /// Code-hosting profile URL, treated as an opaque string.
    pub github: Option<String>,
}

impl CandidateSummary {
    /// The first three skills, without touching the underlying list.
    pub fn top_skills(&self) -> &[String] {
        &self.skills[..self.skills.len().min(SKILL_DISPLAY_LIMIT)]
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────

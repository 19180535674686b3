//! ChatSession — the conversation session controller.
//!
//! Responsibilities:
//! - Own the ordered transcript and the not-yet-submitted draft
//! - Serialize outbound requests: at most one in flight per session
//! - Project the transcript into the wire history shape
//! - Reduce raw replies into renderable turns via `reply_analysis`
//!
//! The pending flag is the sole concurrency-control primitive. It is enforced
//! here, not in the UI: a disabled submit button is advisory, the controller's
//! rejection is the guarantee. Every path through `submit` clears the flag
//! exactly once before returning.

use async_trait::async_trait;
use uuid::Uuid;

use crate::api::client::ApiClient;
use crate::api::errors::ApiError;
use crate::api::types::{HistoryEntry, RawReply};

use super::errors::SessionError;
use super::reply_analysis::normalize_reply;
use super::types::{Turn, CONNECTIVITY_FALLBACK, GREETING};

// ─── Backend Seam ───────────────────────────────────────────────────────────

/// The one request shape the controller needs from the API boundary.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Send the full history projection, return the raw reply.
    async fn send_chat(&self, history: &[HistoryEntry]) -> Result<RawReply, ApiError>;
}

#[async_trait]
impl ChatBackend for ApiClient {
    async fn send_chat(&self, history: &[HistoryEntry]) -> Result<RawReply, ApiError> {
        self.chat(history).await
    }
}

// ─── ChatSession ────────────────────────────────────────────────────────────

/// One conversation with the assistant: transcript, draft, and in-flight flag.
///
/// Process-local and never persisted; dropping the value is the only reset.
pub struct ChatSession {
    /// Correlation id for log entries; carries no other meaning.
    id: Uuid,
    /// Append-only; order equals presentation order.
    transcript: Vec<Turn>,
    /// True from dispatch until resolution, success or failure.
    pending: bool,
    /// The not-yet-submitted input text.
    draft: String,
}

impl ChatSession {
    /// A fresh session opening with the standard greeting turn.
    pub fn new() -> Self {
        Self::with_greeting(GREETING)
    }

    /// A fresh session opening with a custom greeting turn.
    pub fn with_greeting(greeting: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            transcript: vec![Turn::assistant_text(greeting)],
            pending: false,
            draft: String::new(),
        }
    }

    /// Log-correlation id for this session.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// The full transcript, in presentation order.
    pub fn transcript(&self) -> &[Turn] {
        &self.transcript
    }

    /// Whether a request is outstanding.
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// The current draft text.
    pub fn draft(&self) -> &str {
        &self.draft
    }

    /// Replace the draft. Pure assignment, always permitted.
    pub fn update_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    // ─── Submission ─────────────────────────────────────────────────────

    /// Submit one user message and wait for the assistant's turn.
    ///
    /// Rejects when `text` trims to nothing or a request is already in
    /// flight; a rejected call dispatches nothing and touches no state.
    /// Otherwise appends the
    /// user turn, clears the draft, dispatches exactly one request carrying
    /// the projected history, and appends the resulting assistant turn: the
    /// normalized reply on success, the canned connectivity fallback on any
    /// transport fault. The raw error never reaches the transcript.
    ///
    /// Returns the appended assistant turn.
    pub async fn submit<B>(&mut self, backend: &B, text: &str) -> Result<&Turn, SessionError>
    where
        B: ChatBackend + ?Sized,
    {
        let text = text.trim();
        if text.is_empty() {
            return Err(SessionError::EmptySubmission);
        }
        if self.pending {
            return Err(SessionError::RequestInFlight);
        }

        self.transcript.push(Turn::user(text));
        self.draft.clear();
        self.pending = true;

        let history = self.history_payload();
        tracing::info!(
            session = %self.id,
            turns = history.len(),
            "dispatching chat request"
        );

        let turn = match backend.send_chat(&history).await {
            Ok(reply) => normalize_reply(&reply),
            Err(e) => {
                tracing::warn!(session = %self.id, error = %e, "chat request failed");
                Turn::assistant_text(CONNECTIVITY_FALLBACK)
            }
        };

        self.transcript.push(turn);
        self.pending = false;

        Ok(self.transcript.last().expect("turn was just appended"))
    }

    /// Project the transcript into the flat wire history.
    ///
    /// Turns with empty content are skipped rather than sent as blanks; the
    /// projection tolerates them even though no current path produces one.
    fn history_payload(&self) -> Vec<HistoryEntry> {
        self.transcript
            .iter()
            .filter(|turn| !turn.content.is_empty())
            .map(|turn| HistoryEntry {
                role: turn.role,
                content: turn.content.clone(),
            })
            .collect()
    }
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────

//! Nearby-search variant — one-shot candidate lookup by location.
//!
//! The same request/pending/reply pattern as the chat controller without a
//! transcript: one request, one structured result list. Failure handling is
//! conservative: previously shown results survive both application-level
//! rejections and transport faults, so a failed retry never blanks the screen.

use async_trait::async_trait;

use crate::api::client::ApiClient;
use crate::api::errors::ApiError;
use crate::api::types::{FindNearbyReply, FindNearbyRequest};

use super::errors::SessionError;
use super::reply_analysis::normalize_candidate;
use super::types::CandidateSummary;

/// Shown when the backend rejects a lookup without saying why.
const REJECTION_FALLBACK: &str = "The search could not be completed.";

// ─── Backend Seam ───────────────────────────────────────────────────────────

/// The one request shape the nearby lookup needs from the API boundary.
#[async_trait]
pub trait NearbyBackend: Send + Sync {
    async fn send_find_nearby(
        &self,
        request: &FindNearbyRequest,
    ) -> Result<FindNearbyReply, ApiError>;
}

#[async_trait]
impl NearbyBackend for ApiClient {
    async fn send_find_nearby(
        &self,
        request: &FindNearbyRequest,
    ) -> Result<FindNearbyReply, ApiError> {
        self.find_nearby(request).await
    }
}

// ─── Outcome ────────────────────────────────────────────────────────────────

/// How one lookup resolved. `Rejected` and `Unavailable` leave prior results
/// untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NearbyOutcome {
    /// The result list was replaced.
    Updated { count: usize },
    /// The backend declined, with a message meant for the user.
    Rejected { message: String },
    /// Transport fault; details were logged, nothing user-facing to show.
    Unavailable,
}

// ─── NearbySearch ───────────────────────────────────────────────────────────

/// Local state for the "find talent near me" flow.
#[derive(Debug, Default)]
pub struct NearbySearch {
    /// True from dispatch until resolution, success or failure.
    pending: bool,
    /// Last successfully fetched candidate list.
    results: Vec<CandidateSummary>,
    /// Server-resolved location of the current results.
    location_label: Option<String>,
}

impl NearbySearch {
    pub fn new() -> Self {
        Self::default()
    }

    /// The current candidate list, possibly from an earlier lookup.
    pub fn results(&self) -> &[CandidateSummary] {
        &self.results
    }

    /// The resolved location the current results belong to.
    pub fn location_label(&self) -> Option<&str> {
        self.location_label.as_deref()
    }

    /// Whether a lookup is outstanding.
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Look up candidates near a location.
    ///
    /// Rejects on an empty location or while a lookup is outstanding, in both
    /// cases without dispatching. Otherwise sends exactly one request; on a
    /// successful reply
    /// replaces the result list and location label, on a declined reply
    /// surfaces the server's message, and on a transport fault logs and
    /// reports [`NearbyOutcome::Unavailable`]. Prior results are only ever
    /// replaced by a successful reply. The pending flag is cleared on every
    /// exit path.
    pub async fn find_nearby<B>(
        &mut self,
        backend: &B,
        location: &str,
        username: Option<&str>,
        skill: Option<&str>,
    ) -> Result<NearbyOutcome, SessionError>
    where
        B: NearbyBackend + ?Sized,
    {
        let location = location.trim();
        if location.is_empty() {
            return Err(SessionError::EmptyLocation);
        }
        if self.pending {
            return Err(SessionError::RequestInFlight);
        }
        self.pending = true;

        let request = FindNearbyRequest {
            username: username.unwrap_or_default().to_string(),
            skill: skill.unwrap_or_default().to_string(),
            manual_location: location.to_string(),
        };

        let outcome = match backend.send_find_nearby(&request).await {
            Ok(reply) if reply.success => {
                let results: Vec<CandidateSummary> = reply
                    .candidates
                    .as_deref()
                    .unwrap_or_default()
                    .iter()
                    .map(normalize_candidate)
                    .collect();
                let count = results.len();
                self.results = results;
                // Fall back to what the user typed if the server resolved
                // the location but didn't echo it.
                self.location_label = reply
                    .location
                    .or_else(|| Some(location.to_string()));
                NearbyOutcome::Updated { count }
            }
            Ok(reply) => NearbyOutcome::Rejected {
                message: reply
                    .message
                    .unwrap_or_else(|| REJECTION_FALLBACK.to_string()),
            },
            Err(e) => {
                tracing::warn!(error = %e, location = %location, "nearby lookup failed");
                NearbyOutcome::Unavailable
            }
        };

        self.pending = false;
        Ok(outcome)
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────

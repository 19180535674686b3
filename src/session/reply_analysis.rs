//! Reply analysis for the chat session.
//!
//! Classifies the server's raw reply as a plain text turn or a structured
//! result-set turn and normalizes it into the transcript's `Turn` shape.
//! Everything here is pure and total: any reply matching the wire schema,
//! even one with every optional field missing, produces a valid turn.

use crate::api::types::{CandidateRecord, RawReply, SEARCH_RESULTS_TYPE};

use super::types::{CandidateSummary, Turn};

/// Classify and normalize one raw chat reply into an assistant turn.
///
/// A reply whose `type` is the structured-result marker becomes a `ResultSet`
/// turn with its `data` mapped element-wise; anything else (absent, `"text"`,
/// or unrecognized `type`) degrades to a plain text turn, which is also the
/// graceful path for replies the backend mislabels.
pub fn normalize_reply(reply: &RawReply) -> Turn {
    match reply.reply_type.as_deref() {
        Some(SEARCH_RESULTS_TYPE) => {
            let payload = reply
                .data
                .as_deref()
                .unwrap_or_default()
                .iter()
                .map(normalize_candidate)
                .collect();
            Turn::assistant_results(reply.content.clone(), payload)
        }
        _ => Turn::assistant_text(reply.content.clone()),
    }
}

/// Normalize one wire candidate into its display-ready summary.
///
/// Shared by the chat result path, the nearby lookup, and the direct search:
/// every surface renders the same card.
pub fn normalize_candidate(record: &CandidateRecord) -> CandidateSummary {
    CandidateSummary {
        id: opaque_id(&record.id),
        name: record.name.clone(),
        role: record.role.clone(),
        location: record.location.clone(),
        skills: record.skills.clone(),
        score: clamp_score(record.score),
        verified: record.verified,
        image: record.image.clone(),
        linkedin: record.linkedin.clone(),
        github: record.github.clone(),
    }
}

/// Clamp a wire score into [0, 100].
///
/// In-range values pass through unchanged; non-finite values collapse to 0
/// so the score can always drive a meter width.
fn clamp_score(score: f64) -> f64 {
    if !score.is_finite() {
        return 0.0;
    }
    score.clamp(0.0, 100.0)
}

/// Render a wire id (integer, string, or anything else) as an opaque string.
fn opaque_id(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────

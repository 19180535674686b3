//! Wire types for the TRACE backend API.
//!
//! These mirror the backend's JSON contracts for the chat, nearby-lookup,
//! search, and skill-match endpoints, used for both request building and
//! response parsing. Reply fields are individually defaulted so a sparse or
//! sloppy body deserializes instead of failing the whole call.

use serde::{Deserialize, Serialize};

// ─── Shared ─────────────────────────────────────────────────────────────────

/// Author of a conversation entry, as the backend spells it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// `type` marker on a chat reply that carries ranked candidates.
pub const SEARCH_RESULTS_TYPE: &str = "search_results";

// ─── Chat Exchange ──────────────────────────────────────────────────────────

/// One `{role, content}` pair in the outbound history projection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub role: Role,
    pub content: String,
}

/// Request body for `POST /api/chat`: the full transcript so far, including
/// the newest user turn.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub history: Vec<HistoryEntry>,
}

/// Top-level reply envelope from `POST /api/chat`.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatReplyEnvelope {
    #[serde(default)]
    pub response: RawReply,
}

/// The server's single reply to one chat request, before discrimination.
///
/// `reply_type` is `None` or an unrecognized string for plain text replies and
/// [`SEARCH_RESULTS_TYPE`] for structured ones; `data` rides along only in the
/// structured case, and even then may be absent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawReply {
    #[serde(default)]
    pub content: String,
    #[serde(rename = "type", default)]
    pub reply_type: Option<String>,
    #[serde(default)]
    pub data: Option<Vec<CandidateRecord>>,
}

// ─── Candidates ─────────────────────────────────────────────────────────────

/// A ranked candidate as the backend ships it.
///
/// The id is a permissive JSON value: the curated records carry integers, the
/// LLM-generated fallback path has been seen emitting strings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CandidateRecord {
    #[serde(default)]
    pub id: serde_json::Value,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub score: f64,
    #[serde(default)]
    pub verified: bool,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub linkedin: Option<String>,
    #[serde(default)]
    pub github: Option<String>,
}

// ─── Nearby Lookup ──────────────────────────────────────────────────────────

/// Request body for `POST /api/find-nearby`.
///
/// `username` and `skill` are sent as empty strings when unset; the backend
/// treats empty and missing alike.
#[derive(Debug, Clone, Serialize)]
pub struct FindNearbyRequest {
    pub username: String,
    pub skill: String,
    pub manual_location: String,
}

/// Reply from `POST /api/find-nearby`.
///
/// `message` is only meaningful when `success` is false.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FindNearbyReply {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub candidates: Option<Vec<CandidateRecord>>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

// ─── Direct Search ──────────────────────────────────────────────────────────

/// Reply from `GET /api/search?query=`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchReply {
    #[serde(default)]
    pub candidates: Vec<CandidateRecord>,
}

// ─── Skill Match ────────────────────────────────────────────────────────────

/// Request body for `POST /api/match`.
#[derive(Debug, Clone, Serialize)]
pub struct MatchRequest {
    pub user_skills: Vec<String>,
    pub required_skills: Vec<String>,
}

/// Reply from `POST /api/match`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MatchReply {
    #[serde(default)]
    pub score: f64,
    #[serde(default)]
    pub matches: Vec<String>,
    #[serde(default)]
    pub is_verified: bool,
    #[serde(default)]
    pub ai_analysis: String,
}

// ─── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn history_entry_wire_shape() {
        let entry = HistoryEntry {
            role: Role::User,
            content: "Find React devs in NY".to_string(),
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["role"], "user");
        assert_eq!(json["content"], "Find React devs in NY");
    }

    #[test]
    fn chat_request_nests_history() {
        let req = ChatRequest {
            history: vec![HistoryEntry {
                role: Role::Assistant,
                content: "Hello!".to_string(),
            }],
        };
        let json = serde_json::to_string(&req).unwrap();
        assert!(json.contains("\"history\""));
        assert!(json.contains("\"assistant\""));
    }

    #[test]
    fn raw_reply_tolerates_text_only_body() {
        let reply: RawReply =
            serde_json::from_str(r#"{"content": "Just chatting."}"#).unwrap();
        assert_eq!(reply.content, "Just chatting.");
        assert!(reply.reply_type.is_none());
        assert!(reply.data.is_none());
    }

    #[test]
    fn raw_reply_tolerates_null_data() {
        // The backend sends `"data": null` on its text branch
        let reply: RawReply = serde_json::from_str(
            r#"{"type": "text", "content": "hi", "data": null}"#,
        )
        .unwrap();
        assert_eq!(reply.reply_type.as_deref(), Some("text"));
        assert!(reply.data.is_none());
    }

    #[test]
    fn candidate_record_tolerates_sparse_body() {
        let record: CandidateRecord = serde_json::from_str(r#"{"id": 7}"#).unwrap();
        assert_eq!(record.id, serde_json::json!(7));
        assert!(record.name.is_none());
        assert!(record.skills.is_empty());
        assert_eq!(record.score, 0.0);
        assert!(!record.verified);
    }

    #[test]
    fn candidate_record_accepts_string_id() {
        let record: CandidateRecord =
            serde_json::from_str(r#"{"id": "gh-1234", "verified": true}"#).unwrap();
        assert_eq!(record.id, serde_json::json!("gh-1234"));
        assert!(record.verified);
    }

    #[test]
    fn find_nearby_reply_failure_shape() {
        let reply: FindNearbyReply = serde_json::from_str(
            r#"{"success": false, "message": "No location match"}"#,
        )
        .unwrap();
        assert!(!reply.success);
        assert_eq!(reply.message.as_deref(), Some("No location match"));
        assert!(reply.candidates.is_none());
    }

    #[test]
    fn find_nearby_request_keeps_empty_fields() {
        let req = FindNearbyRequest {
            username: String::new(),
            skill: String::new(),
            manual_location: "Chennai".to_string(),
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["username"], "");
        assert_eq!(json["manual_location"], "Chennai");
    }

    #[test]
    fn match_reply_defaults() {
        let reply: MatchReply = serde_json::from_str("{}").unwrap();
        assert_eq!(reply.score, 0.0);
        assert!(reply.matches.is_empty());
        assert!(!reply.is_verified);
    }
}

//! API boundary — JSON-over-HTTP client for the TRACE backend.
//!
//! This module handles all communication with the backend:
//! - Conversational turn exchange (`POST /api/chat`)
//! - Nearby-candidate lookup (`POST /api/find-nearby`)
//! - Direct candidate search (`GET /api/search`)
//! - Skill-match scoring (`POST /api/match`)
//! - Endpoint configuration loading from `trace.yaml`
//!
//! The backend's ranking and NLP engine is a black box behind these four
//! routes; everything above this module works with decoded wire types only.

pub mod client;
pub mod config;
pub mod errors;
pub mod types;

// Re-exports for convenience
pub use client::ApiClient;
pub use config::ApiConfig;
pub use errors::ApiError;
pub use types::{
    CandidateRecord, FindNearbyReply, FindNearbyRequest, HistoryEntry, MatchReply,
    MatchRequest, RawReply, Role, SearchReply, SEARCH_RESULTS_TYPE,
};

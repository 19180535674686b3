//! HTTP client for the TRACE backend.
//!
//! Sends JSON requests to the chat, nearby-lookup, search, and skill-match
//! endpoints and decodes the replies into wire types. Stays strictly at the
//! wire level; discrimination and normalization happen in the session layer.

use reqwest::Client as HttpClient;
use serde::de::DeserializeOwned;

use super::config::ApiConfig;
use super::errors::ApiError;
use super::types::{
    ChatReplyEnvelope, ChatRequest, FindNearbyReply, FindNearbyRequest, HistoryEntry,
    MatchReply, MatchRequest, RawReply, SearchReply,
};

// ─── ApiClient ───────────────────────────────────────────────────────────────

/// Client for the TRACE backend endpoints.
///
/// Created from `ApiConfig` and cheap to clone (the inner `reqwest` client is
/// reference-counted). Attaches the bearer credential, when configured, to
/// every request.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: HttpClient,
    base_url: String,
    bearer_token: Option<String>,
    /// Kept for timeout error context.
    request_timeout_secs: u64,
}

impl ApiClient {
    /// Build a client from the endpoint configuration.
    ///
    /// Does NOT check connectivity — that happens on the first request.
    pub fn from_config(config: &ApiConfig) -> Result<Self, ApiError> {
        let http = HttpClient::builder()
            .connect_timeout(config.connect_timeout())
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| ApiError::ConfigError {
                reason: format!("failed to build HTTP client: {e}"),
            })?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            bearer_token: config.bearer().map(str::to_string),
            request_timeout_secs: config.request_timeout().as_secs(),
        })
    }

    /// The configured backend base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // ─── Endpoints ───────────────────────────────────────────────────────

    /// `POST /api/chat` — send the full history projection, return the raw
    /// reply for the discriminator.
    pub async fn chat(&self, history: &[HistoryEntry]) -> Result<RawReply, ApiError> {
        let url = format!("{}/api/chat", self.base_url);
        let body = ChatRequest {
            history: history.to_vec(),
        };

        tracing::debug!(url = %url, turns = body.history.len(), "chat request");

        let request = self.authorized(self.http.post(&url)).json(&body);
        let response = request
            .send()
            .await
            .map_err(|e| self.map_send_error(&url, e))?;

        let envelope: ChatReplyEnvelope = Self::decode(response).await?;
        Ok(envelope.response)
    }

    /// `POST /api/find-nearby` — one-shot location lookup.
    pub async fn find_nearby(
        &self,
        request: &FindNearbyRequest,
    ) -> Result<FindNearbyReply, ApiError> {
        let url = format!("{}/api/find-nearby", self.base_url);

        tracing::debug!(url = %url, location = %request.manual_location, "nearby request");

        let response = self
            .authorized(self.http.post(&url))
            .json(request)
            .send()
            .await
            .map_err(|e| self.map_send_error(&url, e))?;

        Self::decode(response).await
    }

    /// `GET /api/search?query=` — direct candidate search, no discrimination.
    pub async fn search(&self, query: &str) -> Result<SearchReply, ApiError> {
        let url = format!("{}/api/search", self.base_url);

        let response = self
            .authorized(self.http.get(&url))
            .query(&[("query", query)])
            .send()
            .await
            .map_err(|e| self.map_send_error(&url, e))?;

        Self::decode(response).await
    }

    /// `POST /api/match` — score a skill set against requirements.
    pub async fn match_skills(&self, request: &MatchRequest) -> Result<MatchReply, ApiError> {
        let url = format!("{}/api/match", self.base_url);

        let response = self
            .authorized(self.http.post(&url))
            .json(request)
            .send()
            .await
            .map_err(|e| self.map_send_error(&url, e))?;

        Self::decode(response).await
    }

    /// Check if the backend is reachable.
    ///
    /// Hits the root welcome route; never consumes backend work.
    pub async fn health_check(&self) -> bool {
        let url = format!("{}/", self.base_url);
        match self.authorized(self.http.get(&url)).send().await {
            Ok(resp) => resp.status().is_success(),
            Err(_) => false,
        }
    }

    // ─── Plumbing ────────────────────────────────────────────────────────

    /// Attach the bearer credential, when one is configured.
    fn authorized(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.bearer_token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Map a `reqwest` send error onto the API error taxonomy.
    fn map_send_error(&self, url: &str, e: reqwest::Error) -> ApiError {
        if e.is_timeout() {
            ApiError::Timeout {
                duration_secs: self.request_timeout_secs,
            }
        } else {
            ApiError::ConnectionFailed {
                endpoint: url.to_string(),
                reason: e.to_string(),
            }
        }
    }

    /// Check the status, then decode the JSON body.
    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::HttpStatus {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await.map_err(|e| ApiError::MalformedReply {
            reason: format!("failed to read response body: {e}"),
        })?;

        serde_json::from_str(&body).map_err(|e| ApiError::MalformedReply {
            reason: e.to_string(),
        })
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::Role;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> ApiClient {
        let config = ApiConfig {
            base_url: server.uri(),
            ..ApiConfig::default()
        };
        ApiClient::from_config(&config).unwrap()
    }

    fn history() -> Vec<HistoryEntry> {
        vec![
            HistoryEntry {
                role: Role::Assistant,
                content: "Hello!".to_string(),
            },
            HistoryEntry {
                role: Role::User,
                content: "Find React devs in NY".to_string(),
            },
        ]
    }

    #[tokio::test]
    async fn chat_posts_full_history_and_unwraps_envelope() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .and(body_json(serde_json::json!({
                "history": [
                    {"role": "assistant", "content": "Hello!"},
                    {"role": "user", "content": "Find React devs in NY"},
                ]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "response": {
                    "type": "search_results",
                    "content": "Here are 2 matches",
                    "data": [{"id": 1, "score": 92}, {"id": 2, "score": 42}]
                }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let reply = client_for(&server).chat(&history()).await.unwrap();
        assert_eq!(reply.content, "Here are 2 matches");
        assert_eq!(reply.reply_type.as_deref(), Some("search_results"));
        assert_eq!(reply.data.as_ref().map(Vec::len), Some(2));
    }

    #[tokio::test]
    async fn bearer_credential_is_attached_when_configured() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .and(header("authorization", "Bearer tok-123"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "response": {"content": "hi"}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let config = ApiConfig {
            base_url: server.uri(),
            bearer_token: Some("tok-123".to_string()),
            ..ApiConfig::default()
        };
        let client = ApiClient::from_config(&config).unwrap();
        client.chat(&history()).await.unwrap();
    }

    #[tokio::test]
    async fn non_2xx_maps_to_http_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .respond_with(ResponseTemplate::new(503).set_body_string("unavailable"))
            .mount(&server)
            .await;

        let err = client_for(&server).chat(&history()).await.unwrap_err();
        match &err {
            ApiError::HttpStatus { status, body } => {
                assert_eq!(*status, 503);
                assert_eq!(body, "unavailable");
            }
            other => panic!("expected HttpStatus, got {other:?}"),
        }
        assert!(err.is_transport());
    }

    #[tokio::test]
    async fn non_json_body_maps_to_malformed_reply() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let err = client_for(&server).chat(&history()).await.unwrap_err();
        assert!(matches!(err, ApiError::MalformedReply { .. }));
        assert!(err.is_transport());
    }

    #[tokio::test]
    async fn unreachable_backend_maps_to_connection_failed() {
        // Bind a server to grab a free port, then drop it so nothing listens.
        let server = MockServer::start().await;
        let client = client_for(&server);
        drop(server);

        let err = client.chat(&history()).await.unwrap_err();
        assert!(matches!(err, ApiError::ConnectionFailed { .. }));
    }

    #[tokio::test]
    async fn find_nearby_decodes_success_reply() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/find-nearby"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "success": true,
                "location": "Chennai, India",
                "candidates": [{"id": 1, "name": "Sarah Chen"}],
                "message": "Showing skilled developers near Chennai, India"
            })))
            .mount(&server)
            .await;

        let reply = client_for(&server)
            .find_nearby(&FindNearbyRequest {
                username: String::new(),
                skill: "React".to_string(),
                manual_location: "Chennai".to_string(),
            })
            .await
            .unwrap();
        assert!(reply.success);
        assert_eq!(reply.location.as_deref(), Some("Chennai, India"));
        assert_eq!(reply.candidates.as_ref().map(Vec::len), Some(1));
    }

    #[tokio::test]
    async fn search_forwards_query_param() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/search"))
            .and(query_param("query", "react developer"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "candidates": [{"id": 3, "name": "Emma Wilson"}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let reply = client_for(&server).search("react developer").await.unwrap();
        assert_eq!(reply.candidates.len(), 1);
        assert_eq!(reply.candidates[0].name.as_deref(), Some("Emma Wilson"));
    }

    #[tokio::test]
    async fn match_skills_round_trip() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/match"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "score": 30,
                "matches": ["React", "TypeScript", "Node.js"],
                "is_verified": true,
                "ai_analysis": "Candidate shows strong potential in required areas."
            })))
            .mount(&server)
            .await;

        let reply = client_for(&server)
            .match_skills(&MatchRequest {
                user_skills: vec!["React".into(), "TypeScript".into(), "Node.js".into()],
                required_skills: vec!["React".into(), "TypeScript".into(), "Node.js".into()],
            })
            .await
            .unwrap();
        assert_eq!(reply.score, 30.0);
        assert_eq!(reply.matches.len(), 3);
        assert!(reply.is_verified);
    }

    #[tokio::test]
    async fn health_check_reports_reachability() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "message": "Welcome to TRACE API"
            })))
            .mount(&server)
            .await;

        let client = client_for(&server);
        assert!(client.health_check().await);

        drop(server);
        assert!(!client.health_check().await);
    }
}

//! Remote service gateway (HTTP/JSON).

use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::Value;

use crate::config::ClientConfig;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GatewayError {
    #[error("network error: {0}")]
    Network(String),
    #[error("{message}")]
    Rejected { status: u16, message: String },
    #[error("malformed response: {0}")]
    Malformed(String),
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl GatewayError {
    /// HTTP status for server rejections.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Rejected { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Network(_))
    }
}

/// Transport seam between the access layer and the remote service.
///
/// `path` always starts with `/` and is relative to the configured base URL.
#[async_trait]
pub trait RemoteGateway: Send + Sync {
    async fn get(&self, path: &str, query: &[(String, String)]) -> Result<Value, GatewayError>;

    async fn post(&self, path: &str, body: &Value) -> Result<Value, GatewayError>;
}

/// `reqwest`-backed gateway.
#[derive(Debug, Clone)]
pub struct HttpGateway {
    base_url: String,
    client: reqwest::Client,
}

impl HttpGateway {
    pub fn new(config: &ClientConfig) -> Result<Self, GatewayError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| GatewayError::InvalidRequest(e.to_string()))?;

        Ok(Self {
            base_url: crate::config::normalize_base_url(&config.base_url),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    async fn into_json(resp: reqwest::Response) -> Result<Value, GatewayError> {
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(GatewayError::Rejected {
                status: status.as_u16(),
                message: error_message(&body, status),
            });
        }

        let bytes = resp
            .bytes()
            .await
            .map_err(|e| GatewayError::Network(e.to_string()))?;
        if bytes.is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_slice(&bytes).map_err(|e| GatewayError::Malformed(e.to_string()))
    }
}

#[async_trait]
impl RemoteGateway for HttpGateway {
    async fn get(&self, path: &str, query: &[(String, String)]) -> Result<Value, GatewayError> {
        let resp = self
            .client
            .get(self.url(path))
            .query(query)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| GatewayError::Network(e.to_string()))?;

        Self::into_json(resp).await
    }

    async fn post(&self, path: &str, body: &Value) -> Result<Value, GatewayError> {
        // `.json()` sets `Content-Type: application/json`.
        let resp = self
            .client
            .post(self.url(path))
            .json(body)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| GatewayError::Network(e.to_string()))?;

        Self::into_json(resp).await
    }
}

/// Scratch base used only to run segments through the URL encoder.
const SEGMENT_BASE: &str = "http://segments.invalid/";

/// Join path segments into a `/`-prefixed path, percent-encoding each one.
///
/// A segment containing `/`, `?` or `#` stays a single segment.
pub fn encoded_path(segments: &[&str]) -> String {
    let Ok(mut url) = reqwest::Url::parse(SEGMENT_BASE) else {
        return format!("/{}", segments.join("/"));
    };
    if let Ok(mut path) = url.path_segments_mut() {
        path.clear().extend(segments);
    }
    url.path().to_string()
}

/// Best human-readable message for a failed response.
///
/// Order: JSON `detail`, JSON `message`, raw body text, status reason.
pub fn error_message(body: &str, status: StatusCode) -> String {
    if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(body) {
        for key in ["detail", "message"] {
            if let Some(Value::String(msg)) = map.get(key) {
                if !msg.trim().is_empty() {
                    return msg.clone();
                }
            }
        }
    }

    let text = body.trim();
    if !text.is_empty() {
        return text.to_string();
    }

    match status.canonical_reason() {
        Some(reason) => reason.to_string(),
        None => format!("request failed with status {}", status.as_u16()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detail_wins_over_message() {
        let body = r#"{"detail":"Project not found","message":"ignored"}"#;
        assert_eq!(error_message(body, StatusCode::NOT_FOUND), "Project not found");
    }

    #[test]
    fn message_used_when_detail_absent_or_not_a_string() {
        assert_eq!(
            error_message(r#"{"message":"quota exceeded"}"#, StatusCode::TOO_MANY_REQUESTS),
            "quota exceeded"
        );
        // FastAPI validation errors carry a list under `detail`.
        let body = r#"{"detail":[{"loc":["body"],"msg":"field required"}],"message":"bad input"}"#;
        assert_eq!(error_message(body, StatusCode::UNPROCESSABLE_ENTITY), "bad input");
    }

    #[test]
    fn raw_text_then_status_reason() {
        assert_eq!(
            error_message("upstream timed out\n", StatusCode::BAD_GATEWAY),
            "upstream timed out"
        );
        assert_eq!(error_message("", StatusCode::NOT_FOUND), "Not Found");
        assert_eq!(error_message("  ", StatusCode::SERVICE_UNAVAILABLE), "Service Unavailable");
    }

    #[test]
    fn json_without_known_keys_falls_back_to_raw_text() {
        assert_eq!(
            error_message(r#"{"error":"boom"}"#, StatusCode::INTERNAL_SERVER_ERROR),
            r#"{"error":"boom"}"#
        );
    }

    #[test]
    fn path_segments_are_percent_encoded() {
        assert_eq!(encoded_path(&["projects", "PRJ001"]), "/projects/PRJ001");
        assert_eq!(encoded_path(&["projects", "user", "5"]), "/projects/user/5");
        assert_eq!(encoded_path(&["projects", "a/b?c#d"]), "/projects/a%2Fb%3Fc%23d");
        assert_eq!(encoded_path(&["projects", "North Grid"]), "/projects/North%20Grid");
    }

    #[test]
    fn url_joins_without_double_slash() {
        let gw = HttpGateway::new(&ClientConfig::new("http://127.0.0.1:9/api/")).unwrap();
        assert_eq!(gw.base_url(), "http://127.0.0.1:9/api");
        assert_eq!(gw.url("/projects"), "http://127.0.0.1:9/api/projects");
        assert_eq!(gw.url("projects"), "http://127.0.0.1:9/api/projects");
    }

    #[test]
    fn rejected_error_displays_server_message() {
        let err = GatewayError::Rejected {
            status: 400,
            message: "budget must be positive".into(),
        };
        assert_eq!(err.to_string(), "budget must be positive");
        assert_eq!(err.status(), Some(400));
        assert!(!err.is_transport());
        assert!(GatewayError::Network("refused".into()).is_transport());
    }
}

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

/// Main error type for Management API operations
#[derive(Debug, Error)]
pub enum RestError {
    /// Error document returned by the API
    #[error("API error {status} ({error_id}): {message}")]
    Api {
        status: u16,
        /// `sys.id` of the error document, e.g. "NotFound" or "VersionMismatch"
        error_id: String,
        message: String,
        request_id: Option<String>,
        details: Option<Value>,
    },

    /// Non-success response whose body is not an API error document
    #[error("HTTP error {status}: {body}")]
    Http { status: u16, body: String },

    /// Access token is missing or malformed
    #[error("invalid access token: {0}")]
    InvalidToken(String),

    /// Header name or value cannot be sent
    #[error("invalid header {name}: {reason}")]
    InvalidHeader { name: String, reason: String },

    /// Request building error
    #[error("failed to build request: {0}")]
    RequestBuild(String),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP client error
    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    /// URL parsing error
    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Other errors
    #[error("{0}")]
    Other(String),
}

#[derive(Debug, Deserialize)]
struct ErrorSys {
    #[serde(rename = "type")]
    kind: String,
    id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ErrorDocument {
    sys: ErrorSys,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    details: Option<Value>,
    #[serde(default)]
    request_id: Option<String>,
}

impl RestError {
    /// Build an error from a non-success response body.
    ///
    /// Bodies shaped like `{"sys": {"type": "Error", "id": ...}, "message": ...}`
    /// become [`RestError::Api`]; anything else becomes [`RestError::Http`].
    /// The `requestId` in the body wins over the header value.
    pub fn from_body(status: u16, body: &[u8], request_id: Option<String>) -> Self {
        match serde_json::from_slice::<ErrorDocument>(body) {
            Ok(doc) if doc.sys.kind == "Error" => RestError::Api {
                status,
                message: doc.message.unwrap_or_else(|| doc.sys.id.clone()),
                error_id: doc.sys.id,
                request_id: doc.request_id.or(request_id),
                details: doc.details,
            },
            _ => RestError::Http {
                status,
                body: String::from_utf8_lossy(body).to_string(),
            },
        }
    }

    /// Check if this error is a not found error (404)
    pub fn is_not_found(&self) -> bool {
        match self {
            RestError::Api {
                status, error_id, ..
            } => *status == 404 || error_id == "NotFound",
            RestError::Http { status, .. } => *status == 404,
            _ => false,
        }
    }

    /// Check if the entity was modified since the version sent (409)
    pub fn is_version_mismatch(&self) -> bool {
        match self {
            RestError::Api {
                status, error_id, ..
            } => *status == 409 || error_id == "VersionMismatch",
            _ => false,
        }
    }

    /// Check if the request was rejected by the rate limiter (429)
    pub fn is_rate_limited(&self) -> bool {
        self.status_code() == Some(429)
    }

    /// Get the HTTP status code if the server answered
    pub fn status_code(&self) -> Option<u16> {
        match self {
            RestError::Api { status, .. } | RestError::Http { status, .. } => Some(*status),
            RestError::Reqwest(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Request id reported by the API, useful when contacting support
    pub fn request_id(&self) -> Option<&str> {
        match self {
            RestError::Api { request_id, .. } => request_id.as_deref(),
            _ => None,
        }
    }
}

/// Result type for Management API operations
pub type Result<T> = std::result::Result<T, RestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_not_found() {
        let body = br#"{
            "sys": {"type": "Error", "id": "NotFound"},
            "message": "The resource could not be found.",
            "details": {"type": "Entry", "id": "nope"},
            "requestId": "abc-123"
        }"#;

        let error = RestError::from_body(404, body, None);
        assert!(error.is_not_found());
        assert!(!error.is_version_mismatch());
        assert_eq!(error.status_code(), Some(404));
        assert_eq!(error.request_id(), Some("abc-123"));
        assert_eq!(
            error.to_string(),
            "API error 404 (NotFound): The resource could not be found."
        );
    }

    #[test]
    fn test_error_version_mismatch() {
        let body = br#"{"sys": {"type": "Error", "id": "VersionMismatch"}}"#;

        let error = RestError::from_body(409, body, Some("from-header".to_string()));
        assert!(error.is_version_mismatch());
        assert_eq!(error.request_id(), Some("from-header"));
        match error {
            RestError::Api { message, .. } => assert_eq!(message, "VersionMismatch"),
            other => panic!("expected RestError::Api, got {:?}", other),
        }
    }

    #[test]
    fn test_error_non_json_body() {
        let error = RestError::from_body(502, b"<html>Bad Gateway</html>", None);
        match error {
            RestError::Http { status, ref body } => {
                assert_eq!(status, 502);
                assert!(body.contains("Bad Gateway"));
            }
            ref other => panic!("expected RestError::Http, got {:?}", other),
        }
        assert!(!error.is_not_found());
    }

    #[test]
    fn test_error_rate_limited() {
        let body =
            br#"{"sys": {"type": "Error", "id": "RateLimitExceeded"}, "message": "slow down"}"#;
        let error = RestError::from_body(429, body, None);
        assert!(error.is_rate_limited());
    }

    #[test]
    fn test_json_without_error_type_is_http() {
        let body = br#"{"sys": {"type": "Entry", "id": "x"}}"#;
        let error = RestError::from_body(500, body, None);
        assert!(matches!(error, RestError::Http { status: 500, .. }));
    }
}

//! Classified API errors.
//!
//! The workflow engine only ever distinguishes two kinds of failure: a
//! request the user can fix (shown verbatim) and everything else (shown as a
//! generic message). `detail` on the second kind is for logs only.

use reqwest::StatusCode;
use serde_json::Value;

/// Fallback message when a client-correctable response carries no text.
const DEFAULT_INVALID_REQUEST_MESSAGE: &str = "Invalid request";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The backend rejected the request as user-correctable (HTTP 400/409/422).
    #[error("{message}")]
    InvalidRequest { message: String },
    /// Transport error, timeout, any other status, or an undecodable body.
    #[error("network or server failure: {detail}")]
    NetworkOrServerFailure { detail: String },
}

/// Result type for gateway operations.
pub type ApiResult<T> = std::result::Result<T, ApiError>;

impl ApiError {
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest {
            message: message.into(),
        }
    }

    pub fn failure(detail: impl Into<String>) -> Self {
        Self::NetworkOrServerFailure {
            detail: detail.into(),
        }
    }

    /// Classifies a non-success HTTP response.
    pub fn from_status(status: StatusCode, body: &str) -> Self {
        if is_client_correctable(status) {
            let message = extract_message(body)
                .unwrap_or_else(|| DEFAULT_INVALID_REQUEST_MESSAGE.to_string());
            Self::InvalidRequest { message }
        } else {
            let detail = match extract_message(body) {
                Some(msg) => format!("HTTP {}: {msg}", status.as_u16()),
                None => format!("HTTP {}", status.as_u16()),
            };
            Self::NetworkOrServerFailure { detail }
        }
    }

    /// Classifies a transport-level failure (connect, timeout, decode).
    pub fn from_transport(err: &reqwest::Error) -> Self {
        let detail = if err.is_timeout() {
            format!("request timed out: {err}")
        } else if err.is_connect() {
            format!("connection failed: {err}")
        } else if err.is_decode() {
            format!("invalid response body: {err}")
        } else {
            err.to_string()
        };
        Self::NetworkOrServerFailure { detail }
    }
}

/// Statuses treated as "the user can fix this request".
pub fn is_client_correctable(status: StatusCode) -> bool {
    matches!(
        status,
        StatusCode::BAD_REQUEST | StatusCode::CONFLICT | StatusCode::UNPROCESSABLE_ENTITY
    )
}

/// Pulls a display message out of an error body.
///
/// Tries `message`, then `error` (string or `{message}`), then the raw body.
fn extract_message(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(json) = serde_json::from_str::<Value>(trimmed) {
        let from_json = json
            .get("message")
            .and_then(Value::as_str)
            .or_else(|| match json.get("error") {
                Some(Value::String(s)) => Some(s.as_str()),
                Some(obj) => obj.get("message").and_then(Value::as_str),
                None => None,
            })
            .map(str::trim)
            .filter(|s| !s.is_empty());
        return from_json.map(ToString::to_string);
    }

    Some(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bad_request_uses_server_message() {
        let err = ApiError::from_status(StatusCode::BAD_REQUEST, r#"{"message":"bad password"}"#);
        assert_eq!(err, ApiError::invalid_request("bad password"));
        assert_eq!(err.to_string(), "bad password");
    }

    #[test]
    fn test_nested_error_message() {
        let err = ApiError::from_status(
            StatusCode::UNPROCESSABLE_ENTITY,
            r#"{"error":{"message":"cpf already registered"}}"#,
        );
        assert_eq!(err, ApiError::invalid_request("cpf already registered"));

        let err = ApiError::from_status(StatusCode::CONFLICT, r#"{"error":"email taken"}"#);
        assert_eq!(err, ApiError::invalid_request("email taken"));
    }

    #[test]
    fn test_plain_text_and_empty_bodies() {
        let err = ApiError::from_status(StatusCode::BAD_REQUEST, "  missing email \n");
        assert_eq!(err, ApiError::invalid_request("missing email"));

        let err = ApiError::from_status(StatusCode::BAD_REQUEST, "");
        assert_eq!(err, ApiError::invalid_request("Invalid request"));

        let err = ApiError::from_status(StatusCode::BAD_REQUEST, r#"{"code":12}"#);
        assert_eq!(err, ApiError::invalid_request("Invalid request"));
    }

    #[test]
    fn test_other_statuses_are_failures() {
        for status in [
            StatusCode::UNAUTHORIZED,
            StatusCode::NOT_FOUND,
            StatusCode::INTERNAL_SERVER_ERROR,
            StatusCode::BAD_GATEWAY,
        ] {
            let err = ApiError::from_status(status, r#"{"message":"stack trace here"}"#);
            assert!(
                matches!(err, ApiError::NetworkOrServerFailure { .. }),
                "{status} should not be correctable"
            );
        }

        let err = ApiError::from_status(StatusCode::INTERNAL_SERVER_ERROR, "");
        assert_eq!(err, ApiError::failure("HTTP 500"));
    }
}

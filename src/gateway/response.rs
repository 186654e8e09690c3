//! Response interpretation
//!
//! Turns a status code and body into either the body text or an `ApiError`
//! carrying the server's own `{"error": ...}` message when there is one.

use super::ApiError;
use serde::Deserialize;

/// Raw HTTP outcome
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

impl ApiResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Body on 2xx, `ApiError::Server` otherwise
    pub fn into_result(self) -> Result<String, ApiError> {
        if self.is_success() {
            return Ok(self.body);
        }

        let message = serde_json::from_str::<ErrorBody>(&self.body)
            .ok()
            .and_then(|body| body.error)
            .filter(|message| !message.trim().is_empty())
            .unwrap_or_else(|| format!("Server error: {}", self.status));

        Err(ApiError::Server {
            status: self.status,
            message,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_returns_body() {
        assert_eq!(ApiResponse::new(201, "{}").into_result(), Ok("{}".to_string()));
    }

    #[test]
    fn test_server_message_is_extracted() {
        let err = ApiResponse::new(403, r#"{"error":"forbidden"}"#).into_result().unwrap_err();
        assert_eq!(
            err,
            ApiError::Server {
                status: 403,
                message: "forbidden".into()
            }
        );
        assert_eq!(err.user_message(), "forbidden");
    }

    #[test]
    fn test_generic_message_without_error_body() {
        let err = ApiResponse::new(502, "<html>Bad gateway</html>").into_result().unwrap_err();
        assert_eq!(err.user_message(), "Server error: 502");

        let err = ApiResponse::new(500, r#"{"mensaje":"x"}"#).into_result().unwrap_err();
        assert_eq!(err.user_message(), "Server error: 500");
    }
}

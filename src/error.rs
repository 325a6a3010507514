use thiserror::Error;

/// Main error type for Dribbble API operations
#[derive(Debug, Error)]
pub enum ApiError {
    /// A required parameter was absent or empty; no request was sent
    #[error("{operation}: missing required parameter `{parameter}`")]
    MissingParameter {
        operation: &'static str,
        parameter: &'static str,
    },

    /// A parameter was supplied that the endpoint does not declare
    #[error("{operation}: unknown parameter `{parameter}`")]
    UnknownParameter {
        operation: &'static str,
        parameter: &'static str,
    },

    /// A path parameter value would change the shape of the path (`.` or `..`)
    #[error("{operation}: invalid value for path parameter `{parameter}`")]
    InvalidParameter {
        operation: &'static str,
        parameter: &'static str,
    },

    /// The API answered with a non-2xx status
    #[error("HTTP error {status}: {body}")]
    Http { status: u16, body: String },

    /// The response body did not match the expected entity
    #[error("failed to decode response: {source}")]
    Decode {
        #[source]
        source: serde_json::Error,
        body: String,
    },

    /// HTTP client error (connect, timeout, TLS, ...)
    #[error("HTTP client error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error
    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    /// The HTTP client could not be constructed
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(String),
}

impl ApiError {
    /// Create a new HTTP error
    pub fn http(status: u16, body: String) -> Self {
        ApiError::Http { status, body }
    }

    /// Check if the API rejected the call with 404
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::Http { status: 404, .. })
    }

    /// Check if the call failed before anything was sent
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            ApiError::MissingParameter { .. }
                | ApiError::UnknownParameter { .. }
                | ApiError::InvalidParameter { .. }
        )
    }

    /// Get the HTTP status code if the API answered
    pub fn status_code(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            ApiError::Transport(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Result type for Dribbble API operations
pub type Result<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_not_found() {
        let error = ApiError::http(404, r#"{"message":"Not found."}"#.to_string());
        assert!(error.is_not_found());
        assert_eq!(error.status_code(), Some(404));
        assert!(!error.is_precondition());
    }

    #[test]
    fn test_error_precondition() {
        let error = ApiError::MissingParameter {
            operation: "create_comment",
            parameter: "body",
        };
        assert!(error.is_precondition());
        assert_eq!(error.status_code(), None);
        assert_eq!(
            error.to_string(),
            "create_comment: missing required parameter `body`"
        );
    }

    #[test]
    fn test_decode_error_keeps_body() {
        let source = serde_json::from_str::<u64>("nope").unwrap_err();
        let error = ApiError::Decode {
            source,
            body: "nope".to_string(),
        };
        assert!(error.to_string().starts_with("failed to decode response"));
        match error {
            ApiError::Decode { body, .. } => assert_eq!(body, "nope"),
            other => panic!("expected Decode, got {:?}", other),
        }
    }
}

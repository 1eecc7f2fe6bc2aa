//! Error taxonomy and the HTTP status-code classifier.

use thiserror::Error;

use crate::transport::TransportError;

/// Result type alias for API operations.
pub type ApiResult<T> = Result<T, ApiError>;

/// Errors raised by API calls.
///
/// Every server-reported error carries the numeric HTTP status code and the
/// server-supplied message, so callers can branch on [`ApiError::code`]
/// without parsing messages. Errors are raised synchronously at the call
/// site and are never retried.
#[derive(Debug, Error)]
pub enum ApiError {
    /// An endpoint flagged as authenticated was called without a configured
    /// access token. Detected locally, before any transport I/O.
    #[error("authentication required: {0}")]
    AuthenticationRequired(String),

    /// Generic call failure: a non-success status with no more specific
    /// category, an unparsable response body, or a response that does not
    /// match its declared shape (both reported as code 400).
    #[error("API call failed (HTTP {code}): {message}")]
    Call {
        /// HTTP status code, or 400 for locally detected body problems.
        code: u16,
        /// Server-supplied or locally produced message.
        message: String,
    },

    /// Bad or missing credentials (HTTP 401).
    #[error("authentication failed (HTTP {code}): {message}")]
    AuthenticationFailed {
        /// HTTP status code.
        code: u16,
        /// Server-supplied message.
        message: String,
    },

    /// Forbidden or quota exhausted (HTTP 403). GitHub reports primary
    /// rate-limit exhaustion with this status.
    #[error("forbidden or rate limited (HTTP {code}): {message}")]
    RateLimitOrForbidden {
        /// HTTP status code.
        code: u16,
        /// Server-supplied message.
        message: String,
    },

    /// Semantically invalid request fields (HTTP 422).
    #[error("validation failed (HTTP {code}): {message}")]
    Validation {
        /// HTTP status code.
        code: u16,
        /// Server-supplied message.
        message: String,
    },

    /// Local misuse detected before dispatch: an unfilled path template
    /// parameter, an invalid base URL, and the like.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Failure inside the transport shim (connection, timeout, client
    /// construction). Never retried here; deadline behavior belongs to the
    /// transport configuration.
    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl ApiError {
    /// The HTTP status code carried by this error, if any.
    ///
    /// Locally detected errors ([`ApiError::AuthenticationRequired`],
    /// [`ApiError::InvalidRequest`], [`ApiError::Transport`]) have none.
    pub fn code(&self) -> Option<u16> {
        match self {
            Self::Call { code, .. }
            | Self::AuthenticationFailed { code, .. }
            | Self::RateLimitOrForbidden { code, .. }
            | Self::Validation { code, .. } => Some(*code),
            Self::AuthenticationRequired(_) | Self::InvalidRequest(_) | Self::Transport(_) => None,
        }
    }

    /// Creates a code-400 call error for a body that cannot be trusted.
    pub(crate) fn bad_request(message: impl Into<String>) -> Self {
        Self::Call {
            code: 400,
            message: message.into(),
        }
    }
}

/// Maps a non-success HTTP status code to the error taxonomy.
///
/// | Status | Outcome |
/// |---|---|
/// | 400 | [`ApiError::Call`] |
/// | 401 | [`ApiError::AuthenticationFailed`] |
/// | 403 | [`ApiError::RateLimitOrForbidden`] |
/// | 422 | [`ApiError::Validation`] |
/// | other | [`ApiError::Call`] with the actual code |
pub fn classify(status: u16, message: String) -> ApiError {
    match status {
        401 => ApiError::AuthenticationFailed {
            code: status,
            message,
        },
        403 => ApiError::RateLimitOrForbidden {
            code: status,
            message,
        },
        422 => ApiError::Validation {
            code: status,
            message,
        },
        code => ApiError::Call { code, message },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn kind(error: &ApiError) -> &'static str {
        match error {
            ApiError::AuthenticationRequired(_) => "authentication_required",
            ApiError::Call { .. } => "call",
            ApiError::AuthenticationFailed { .. } => "authentication_failed",
            ApiError::RateLimitOrForbidden { .. } => "rate_limit_or_forbidden",
            ApiError::Validation { .. } => "validation",
            ApiError::InvalidRequest(_) => "invalid_request",
            ApiError::Transport(_) => "transport",
        }
    }

    #[test_case(400 => "call")]
    #[test_case(401 => "authentication_failed")]
    #[test_case(403 => "rate_limit_or_forbidden")]
    #[test_case(422 => "validation")]
    #[test_case(404 => "call")]
    #[test_case(500 => "call")]
    fn classify_maps_status(status: u16) -> &'static str {
        kind(&classify(status, "message".to_string()))
    }

    #[test_case(400)]
    #[test_case(401)]
    #[test_case(403)]
    #[test_case(422)]
    #[test_case(503)]
    fn classified_errors_carry_the_code(status: u16) {
        let error = classify(status, "message".to_string());
        assert_eq!(error.code(), Some(status));
    }

    #[test]
    fn local_errors_carry_no_code() {
        let error = ApiError::AuthenticationRequired("token missing".to_string());
        assert_eq!(error.code(), None);
    }

    #[test]
    fn display_includes_code_and_message() {
        let error = classify(422, "Validation Failed".to_string());
        let display = error.to_string();
        assert!(display.contains("422"));
        assert!(display.contains("Validation Failed"));
    }

    #[test]
    fn bad_request_is_code_400() {
        assert_eq!(ApiError::bad_request("malformed").code(), Some(400));
    }
}

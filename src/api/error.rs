//! Error taxonomy for backend API calls
//!
//! Classifies HTTP status codes into the handful of outcomes the client
//! actually distinguishes: success, recoverable/fatal authorization
//! failures, and everything else.

use thiserror::Error;

/// Error raised by [`ApiClient`](super::ApiClient) requests.
///
/// Carried inside `anyhow::Error`; callers that care about the taxonomy
/// (tests, sign-out handling) downcast to this type.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP 401 that could not be recovered by a token refresh.
    #[error("unauthorized (401): {detail}")]
    Unauthorized { detail: String },

    /// HTTP 403. Never retried; always forces a sign-out.
    #[error("forbidden (403): the backend rejected the session")]
    Forbidden,

    /// Any other non-2xx status, propagated unchanged to the caller.
    #[error("request failed with status {code}: {detail}")]
    Status { code: u16, detail: String },
}

/// Coarse classification of an HTTP status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusClass {
    /// 2xx
    Success,
    /// 401 — recoverable on the first attempt, fatal on the retry
    Unauthorized,
    /// 403 — fatal on any occurrence
    Forbidden,
    /// Everything else
    Other,
}

impl StatusClass {
    pub fn from_code(code: u16) -> Self {
        match code {
            200..=299 => StatusClass::Success,
            401 => StatusClass::Unauthorized,
            403 => StatusClass::Forbidden,
            _ => StatusClass::Other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_classification() {
        assert_eq!(StatusClass::from_code(200), StatusClass::Success);
        assert_eq!(StatusClass::from_code(204), StatusClass::Success);
        assert_eq!(StatusClass::from_code(401), StatusClass::Unauthorized);
        assert_eq!(StatusClass::from_code(403), StatusClass::Forbidden);
        assert_eq!(StatusClass::from_code(400), StatusClass::Other);
        assert_eq!(StatusClass::from_code(404), StatusClass::Other);
        assert_eq!(StatusClass::from_code(500), StatusClass::Other);
    }

    #[test]
    fn test_error_display_carries_detail() {
        let err = ApiError::Status {
            code: 422,
            detail: "prova sem questões".to_string(),
        };
        assert!(err.to_string().contains("422"));
        assert!(err.to_string().contains("prova sem questões"));
    }
}

//! Error types shared by the API client and the orchestration flows.
//!
//! # Design
//! - `ApiError` is the single failure type of the transport; callers classify it
//!   with [`ApiError::category`] instead of matching raw status codes.
//! - `ValidationError` never reaches the network; views render it inline.

use staybook_api_models::ErrorBody;
use thiserror::Error;

/// Coarse classification of API failures used by the flows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorCategory {
    /// No response reached the client.
    Network,
    /// Missing, expired or invalid credentials.
    Auth,
    /// The referenced remote state is gone or conflicting (expired payment, unknown booking).
    ExternalState,
    /// Any other rejected request.
    Service,
}

/// Failure returned by every API gateway operation.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ApiError {
    /// HTTP status when a response was received.
    pub status: Option<u16>,
    /// Machine-readable code when the backend supplied one.
    pub code: Option<String>,
    /// Human-readable message.
    pub message: String,
}

impl ApiError {
    /// Failure before any response arrived.
    #[must_use]
    pub fn network(message: impl Into<String>) -> Self {
        Self {
            status: None,
            code: None,
            message: message.into(),
        }
    }

    /// Response that could not be decoded into the expected payload.
    #[must_use]
    pub fn decode(status: u16, message: impl Into<String>) -> Self {
        Self {
            status: Some(status),
            code: Some("decode_failed".to_string()),
            message: message.into(),
        }
    }

    /// Normalise a non-success response body into an error.
    #[must_use]
    pub fn from_response(status: u16, body: &str) -> Self {
        let parsed = serde_json::from_str::<ErrorBody>(body).ok();
        let code = parsed.as_ref().and_then(ErrorBody::code);
        let message = parsed
            .as_ref()
            .and_then(ErrorBody::best_message)
            .or_else(|| {
                let text = body.trim();
                (!text.is_empty() && !text.starts_with('{')).then(|| text.to_string())
            })
            .unwrap_or_else(|| format!("request failed with status {status}"));
        Self {
            status: Some(status),
            code,
            message,
        }
    }

    /// Taxonomy bucket for this failure.
    #[must_use]
    pub const fn category(&self) -> ErrorCategory {
        match self.status {
            None => ErrorCategory::Network,
            Some(401) => ErrorCategory::Auth,
            Some(404 | 409 | 410) => ErrorCategory::ExternalState,
            Some(_) => ErrorCategory::Service,
        }
    }

    /// Whether the failure means the session is not (or no longer) valid.
    #[must_use]
    pub const fn is_auth(&self) -> bool {
        matches!(self.category(), ErrorCategory::Auth)
    }

    /// Message suitable for a user-visible notice.
    ///
    /// Backend-provided messages win; network and decode failures fall back to
    /// `fallback` because their text is meaningless to users.
    #[must_use]
    pub fn notice(&self, fallback: &str) -> String {
        let opaque = self.status.is_none()
            || self.code.as_deref() == Some("decode_failed")
            || self.message.starts_with("request failed with status");
        if opaque || self.message.trim().is_empty() {
            fallback.to_string()
        } else {
            self.message.clone()
        }
    }
}

/// Input rejected before any network call.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is empty.
    #[error("{0} is required")]
    Missing(&'static str),
    /// Check-out must come after check-in.
    #[error("check-out date must be after check-in date")]
    CheckOutNotAfterCheckIn,
    /// A date input could not be parsed.
    #[error("{field} is not a valid date: {value}")]
    InvalidDate {
        /// Field label.
        field: &'static str,
        /// Raw input.
        value: String,
    },
    /// A numeric input could not be parsed or is out of range.
    #[error("{field} must be a whole number of at least {min}")]
    InvalidCount {
        /// Field label.
        field: &'static str,
        /// Smallest accepted value.
        min: u32,
    },
    /// Email address is malformed.
    #[error("enter a valid email address")]
    InvalidEmail,
    /// The flow needs a signed-in user.
    #[error("sign in to continue")]
    NotSignedIn,
}

/// Failure of a user-initiated flow: rejected locally or by the backend.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum FlowError {
    /// Input was rejected before any request.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// The backend call failed.
    #[error(transparent)]
    Api(#[from] ApiError),
}

impl FlowError {
    /// Message for a user-visible notice, using `fallback` for opaque API failures.
    #[must_use]
    pub fn notice(&self, fallback: &str) -> String {
        match self {
            Self::Validation(err) => err.to_string(),
            Self::Api(err) => err.notice(fallback),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flow_error_notice_prefers_validation_text() {
        let validation = FlowError::from(ValidationError::Missing("destination"));
        assert_eq!(validation.notice("ignored"), "destination is required");
        let api = FlowError::from(ApiError::network("offline"));
        assert_eq!(api.notice("Unable to search hotels"), "Unable to search hotels");
    }

    #[test]
    fn from_response_uses_fastapi_detail() {
        let err = ApiError::from_response(404, r#"{"detail":"Hotel not found"}"#);
        assert_eq!(err.status, Some(404));
        assert_eq!(err.message, "Hotel not found");
        assert_eq!(err.category(), ErrorCategory::ExternalState);
        assert_eq!(err.notice("Unable to load hotel"), "Hotel not found");
    }

    #[test]
    fn from_response_keeps_code() {
        let err = ApiError::from_response(
            422,
            r#"{"detail":[{"msg":"field required","type":"missing"}]}"#,
        );
        assert_eq!(err.code.as_deref(), Some("missing"));
        assert_eq!(err.message, "field required");
        assert_eq!(err.category(), ErrorCategory::Service);
    }

    #[test]
    fn from_response_falls_back_to_plain_text_then_status() {
        let text = ApiError::from_response(502, "Bad Gateway");
        assert_eq!(text.message, "Bad Gateway");

        let empty = ApiError::from_response(500, "");
        assert_eq!(empty.message, "request failed with status 500");
        assert_eq!(empty.notice("Something went wrong"), "Something went wrong");

        let odd_json = ApiError::from_response(500, r#"{"unexpected":true}"#);
        assert_eq!(odd_json.message, "request failed with status 500");
    }

    #[test]
    fn categories_follow_status() {
        assert_eq!(
            ApiError::network("offline").category(),
            ErrorCategory::Network
        );
        assert!(ApiError::from_response(401, r#"{"detail":"Session expired"}"#).is_auth());
        assert_eq!(
            ApiError::from_response(410, "").category(),
            ErrorCategory::ExternalState
        );
        assert_eq!(
            ApiError::from_response(503, "").category(),
            ErrorCategory::Service
        );
    }

    #[test]
    fn network_and_decode_errors_use_fallback_notice() {
        assert_eq!(
            ApiError::network("TypeError: Failed to fetch").notice("Unable to search hotels"),
            "Unable to search hotels"
        );
        assert_eq!(
            ApiError::decode(200, "missing field `id`").notice("Unable to load hotel"),
            "Unable to load hotel"
        );
    }
}

//! API gateway contract consumed by the orchestration flows.
//!
//! # Design
//! - One method per backend capability; payloads are the shared DTOs.
//! - Credentials are the implementation's concern, never the caller's.
//! - No retries here. The payment poller owns the only retry policy.

use crate::core::error::ApiError;
use async_trait::async_trait;
use staybook_api_models::{
    Acknowledgement, Booking, CheckoutSession, CheckoutSessionRequest, CheckoutStatus,
    CreateBookingRequest, Hotel, Identity, SearchHotelsRequest,
};

/// Relative endpoint paths, appended to the configured API base URL.
pub mod paths {
    /// Session exchange.
    pub const AUTH_SESSION: &str = "/auth/session";
    /// Current identity.
    pub const AUTH_ME: &str = "/auth/me";
    /// Session teardown.
    pub const AUTH_LOGOUT: &str = "/auth/logout";
    /// Hotel search.
    pub const HOTELS_SEARCH: &str = "/hotels/search";
    /// Booking creation.
    pub const BOOKINGS_CREATE: &str = "/bookings/create";
    /// Booking list for the current user.
    pub const BOOKINGS: &str = "/bookings";
    /// Checkout session creation.
    pub const CHECKOUT_SESSION: &str = "/payments/checkout/session";

    /// Detail path for one hotel.
    #[must_use]
    pub fn hotel(id: i64) -> String {
        format!("/hotels/{id}")
    }

    /// Status path for one checkout session; the id is percent-encoded.
    #[must_use]
    pub fn checkout_status(session_id: &str) -> String {
        format!(
            "/payments/checkout/status/{}",
            urlencoding::encode(session_id)
        )
    }
}

/// Backend operations used by the client.
#[async_trait(?Send)]
pub trait HotelApi {
    /// Exchange a provider session id for an identity.
    async fn start_session(&self, session_id: &str) -> Result<Identity, ApiError>;
    /// Resolve the identity behind the ambient credentials.
    async fn current_identity(&self) -> Result<Identity, ApiError>;
    /// Terminate the server-side session.
    async fn end_session(&self) -> Result<Acknowledgement, ApiError>;
    /// Search hotels for the given criteria.
    async fn search_hotels(&self, request: &SearchHotelsRequest) -> Result<Vec<Hotel>, ApiError>;
    /// Fetch one hotel.
    async fn hotel(&self, id: i64) -> Result<Hotel, ApiError>;
    /// Create a booking pending payment.
    async fn create_booking(&self, request: &CreateBookingRequest) -> Result<Booking, ApiError>;
    /// List the current user's bookings.
    async fn bookings(&self) -> Result<Vec<Booking>, ApiError>;
    /// Create a hosted checkout session for a booking.
    async fn create_checkout_session(
        &self,
        request: &CheckoutSessionRequest,
    ) -> Result<CheckoutSession, ApiError>;
    /// Query the status of a checkout session.
    async fn checkout_status(&self, session_id: &str) -> Result<CheckoutStatus, ApiError>;
}

#[cfg(test)]
mod tests {
    use super::paths;

    #[test]
    fn detail_paths_embed_ids() {
        assert_eq!(paths::hotel(1005), "/hotels/1005");
        assert_eq!(
            paths::checkout_status("cs_test_a1"),
            "/payments/checkout/status/cs_test_a1"
        );
    }

    #[test]
    fn checkout_status_path_escapes_reserved_characters() {
        assert_eq!(
            paths::checkout_status("cs/../x?y"),
            "/payments/checkout/status/cs%2F..%2Fx%3Fy"
        );
    }
}

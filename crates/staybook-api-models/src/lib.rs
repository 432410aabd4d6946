#![forbid(unsafe_code)]
#![warn(
    unused,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]
#![allow(clippy::module_name_repetitions)]
//! Shared HTTP DTOs for the Staybook booking API.
//!
//! The web client encodes requests and decodes responses through these types
//! so the wire contract (snake_case keys, ISO dates) lives in one place.
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Authenticated user record returned by the session and identity endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Identity {
    /// Stable user identifier issued by the backend.
    pub user_id: String,
    /// Primary email address.
    pub email: String,
    /// Display name.
    pub name: String,
    /// Avatar URL.
    #[serde(default)]
    pub picture: String,
    /// Session token returned by the session exchange, absent on `/auth/me`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_token: Option<String>,
}

/// Body of `POST /auth/session`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionExchangeRequest {
    /// Opaque session id delivered by the identity provider redirect.
    pub session_id: String,
}

/// Acknowledgement payload returned by side-effect-only endpoints.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Acknowledgement {
    /// Optional server message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Body of `POST /hotels/search`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchHotelsRequest {
    /// Free-text destination (city or region).
    pub destination: String,
    /// Arrival date.
    pub check_in: NaiveDate,
    /// Departure date.
    pub check_out: NaiveDate,
    /// Number of adult guests.
    pub num_adults: u32,
    /// Number of child guests.
    pub num_children: u32,
    /// Number of rooms requested.
    pub num_rooms: u32,
}

/// Hotel listing returned by search and detail endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Hotel {
    /// Backend hotel identifier.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// City the hotel is located in.
    pub city: String,
    /// Country the hotel is located in.
    pub country: String,
    /// Marketing description.
    #[serde(default)]
    pub description: String,
    /// Nightly price in `currency`.
    pub price: f64,
    /// ISO currency code for `price`.
    pub currency: String,
    /// Guest rating on a 0-10 scale.
    #[serde(default)]
    pub rating: Option<f64>,
    /// Number of reviews backing `rating`.
    #[serde(default)]
    pub review_count: Option<u32>,
    /// Gallery image URLs.
    #[serde(default)]
    pub image_urls: Vec<String>,
    /// Amenity labels.
    #[serde(default)]
    pub amenities: Vec<String>,
}

/// Body of `POST /bookings/create`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CreateBookingRequest {
    /// Hotel being booked.
    pub hotel_id: i64,
    /// Arrival date.
    pub check_in: NaiveDate,
    /// Departure date.
    pub check_out: NaiveDate,
    /// Lead guest first name.
    pub guest_first_name: String,
    /// Lead guest last name.
    pub guest_last_name: String,
    /// Lead guest email.
    pub guest_email: String,
    /// Number of adult guests.
    pub num_adults: u32,
    /// Number of child guests.
    pub num_children: u32,
    /// Total price for the stay.
    pub total_price: f64,
}

/// Lifecycle of a booking as reported by the backend.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    /// Created, awaiting payment.
    PendingPayment,
    /// Paid and confirmed.
    Confirmed,
    /// Any status this client does not know about.
    #[serde(other)]
    Other,
}

impl BookingStatus {
    /// Human-readable label for badges.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::PendingPayment => "pending payment",
            Self::Confirmed => "confirmed",
            Self::Other => "unknown",
        }
    }
}

/// Booking record returned by create and list endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Booking {
    /// Backend booking identifier.
    pub booking_id: String,
    /// Hotel the booking belongs to.
    pub hotel_id: i64,
    /// Hotel display name captured at booking time.
    pub hotel_name: String,
    /// Booking lifecycle status.
    pub status: BookingStatus,
    /// Arrival date.
    pub check_in: NaiveDate,
    /// Departure date.
    pub check_out: NaiveDate,
    /// Total price for the stay.
    pub total_price: f64,
    /// Creation timestamp as reported by the backend.
    #[serde(default)]
    pub created_at: String,
}

/// Body of `POST /payments/checkout/session`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CheckoutSessionRequest {
    /// Booking being paid for.
    pub booking_id: String,
    /// Origin the provider should redirect back to.
    pub origin_url: String,
}

/// Hosted checkout session created by the payment provider.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CheckoutSession {
    /// Provider URL the browser must be sent to.
    pub url: String,
    /// Provider session identifier, when echoed back.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
}

/// Provider-side state of a checkout session.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum CheckoutSessionState {
    /// Session is still open for payment.
    Open,
    /// Session completed.
    Complete,
    /// Session expired before payment.
    Expired,
    /// Unrecognised state.
    #[serde(other)]
    Unknown,
}

/// Payment state attached to a checkout session.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum PaymentState {
    /// Funds captured.
    Paid,
    /// Not yet paid.
    Unpaid,
    /// Nothing to collect.
    NoPaymentRequired,
    /// Unrecognised state.
    #[serde(other)]
    Unknown,
}

/// Response of `GET /payments/checkout/status/{session_id}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CheckoutStatus {
    /// Session state.
    pub status: CheckoutSessionState,
    /// Payment state.
    pub payment_status: PaymentState,
    /// Amount in minor currency units.
    #[serde(default)]
    pub amount_total: i64,
    /// Currency for `amount_total`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
}

impl CheckoutStatus {
    /// Whether the provider reports the payment as captured.
    #[must_use]
    pub fn is_paid(&self) -> bool {
        self.payment_status == PaymentState::Paid
    }

    /// Whether the checkout session expired.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.status == CheckoutSessionState::Expired
    }
}

/// Error document returned by the backend.
///
/// The backend emits FastAPI style `{"detail": ...}` bodies; problem documents
/// and `{code, message}` bodies are accepted as well.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorBody {
    /// FastAPI detail: a message or a list of validation items.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<ErrorDetail>,
    /// Problem document title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Machine-readable error code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Plain message field.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Shapes the `detail` field takes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum ErrorDetail {
    /// Single message.
    Text(String),
    /// Request validation failures.
    Items(Vec<ValidationItem>),
}

/// One request validation failure.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ValidationItem {
    /// Failure message.
    pub msg: String,
    /// Failure type tag.
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

impl ErrorBody {
    /// Most specific human-readable message the body carries.
    #[must_use]
    pub fn best_message(&self) -> Option<String> {
        let detail = match &self.detail {
            Some(ErrorDetail::Text(text)) => Some(text.clone()),
            Some(ErrorDetail::Items(items)) => items.first().map(|item| item.msg.clone()),
            None => None,
        };
        detail
            .or_else(|| self.message.clone())
            .or_else(|| self.title.clone())
            .filter(|message| !message.trim().is_empty())
    }

    /// Machine-readable code, falling back to the first validation type tag.
    #[must_use]
    pub fn code(&self) -> Option<String> {
        self.code.clone().or_else(|| match &self.detail {
            Some(ErrorDetail::Items(items)) => items.first().and_then(|item| item.kind.clone()),
            _ => None,
        })
    }
}

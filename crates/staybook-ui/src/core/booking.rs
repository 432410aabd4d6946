//! Booking composition, submission and checkout hand-off.
//!
//! # Design
//! - A [`BookingDraft`] is derived from the store plus guest input and never stored.
//! - Validation happens while composing; nothing invalid reaches the API.
//! - Checkout returns the provider URL; assigning it to the window is the view's job.

use crate::core::api::HotelApi;
use crate::core::error::{ApiError, FlowError, ValidationError};
use crate::core::search::SearchCriteria;
use crate::core::session::SessionSlice;
use crate::core::store::StoreHandle;
use chrono::NaiveDate;
use staybook_api_models::{Booking, CheckoutSessionRequest, CreateBookingRequest, Hotel};

/// Fallback notice for a failed booking.
pub const BOOKING_FAILED: &str = "Unable to create booking";
/// Fallback notice for a failed checkout start.
pub const PAYMENT_FAILED: &str = "Unable to process payment";
/// Fallback notice for a failed bookings list.
pub const BOOKINGS_FAILED: &str = "Failed to load bookings";

/// Guest fields captured by the booking form.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GuestDetails {
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Contact email.
    pub email: String,
}

impl GuestDetails {
    fn validated(&self) -> Result<Self, ValidationError> {
        let first_name = self.first_name.trim();
        let last_name = self.last_name.trim();
        let email = self.email.trim();
        if first_name.is_empty() {
            return Err(ValidationError::Missing("first name"));
        }
        if last_name.is_empty() {
            return Err(ValidationError::Missing("last name"));
        }
        if email.is_empty() {
            return Err(ValidationError::Missing("email"));
        }
        if !email.contains('@') {
            return Err(ValidationError::InvalidEmail);
        }
        Ok(Self {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            email: email.to_string(),
        })
    }
}

/// Validated booking ready to submit.
#[derive(Clone, Debug, PartialEq)]
pub struct BookingDraft {
    /// Hotel being booked.
    pub hotel_id: i64,
    /// Arrival date.
    pub check_in: NaiveDate,
    /// Departure date.
    pub check_out: NaiveDate,
    /// Whole nights between the dates.
    pub nights: u32,
    /// Nightly price of the hotel.
    pub nightly_price: f64,
    /// `nightly_price * nights`.
    pub total_price: f64,
    /// Adults travelling.
    pub num_adults: u32,
    /// Children travelling.
    pub num_children: u32,
    /// Trimmed guest details.
    pub guest: GuestDetails,
}

impl BookingDraft {
    /// Compose a draft from the session, current criteria, hotel and guest input.
    ///
    /// # Errors
    /// [`ValidationError::NotSignedIn`] without a session, otherwise the first
    /// missing or malformed field.
    pub fn compose(
        session: &SessionSlice,
        criteria: &SearchCriteria,
        hotel: &Hotel,
        guest: &GuestDetails,
    ) -> Result<Self, ValidationError> {
        if !session.is_authenticated() {
            return Err(ValidationError::NotSignedIn);
        }
        let guest = guest.validated()?;
        let check_in = criteria
            .check_in
            .ok_or(ValidationError::Missing("check-in date"))?;
        let check_out = criteria
            .check_out
            .ok_or(ValidationError::Missing("check-out date"))?;
        let nights = criteria
            .nights()
            .filter(|nights| *nights > 0)
            .ok_or(ValidationError::CheckOutNotAfterCheckIn)?;
        Ok(Self {
            hotel_id: hotel.id,
            check_in,
            check_out,
            nights,
            nightly_price: hotel.price,
            total_price: hotel.price * f64::from(nights),
            num_adults: criteria.num_adults,
            num_children: criteria.num_children,
            guest,
        })
    }

    /// Wire payload for booking creation.
    #[must_use]
    pub fn to_request(&self) -> CreateBookingRequest {
        CreateBookingRequest {
            hotel_id: self.hotel_id,
            check_in: self.check_in,
            check_out: self.check_out,
            guest_first_name: self.guest.first_name.clone(),
            guest_last_name: self.guest.last_name.clone(),
            guest_email: self.guest.email.clone(),
            num_adults: self.num_adults,
            num_children: self.num_children,
            total_price: self.total_price,
        }
    }
}

/// Compose and submit a booking for `hotel`.
///
/// # Errors
/// [`FlowError::Validation`] before any call, or [`FlowError::Api`] when creation fails.
pub async fn submit_booking<A, S>(
    api: &A,
    store: &S,
    hotel: &Hotel,
    guest: &GuestDetails,
) -> Result<Booking, FlowError>
where
    A: HotelApi + ?Sized,
    S: StoreHandle,
{
    let snapshot = store.snapshot();
    let draft = BookingDraft::compose(
        &snapshot.session,
        &snapshot.search.criteria,
        hotel,
        guest,
    )?;
    let booking = api.create_booking(&draft.to_request()).await.map_err(|err| {
        tracing::warn!(error = %err, hotel_id = draft.hotel_id, "booking failed");
        err
    })?;
    tracing::info!(
        booking_id = %booking.booking_id,
        nights = draft.nights,
        total = draft.total_price,
        "booking created"
    );
    Ok(booking)
}

/// Create a checkout session and return the provider URL to send the browser to.
///
/// # Errors
/// Propagates the [`ApiError`]; a response without a URL is a decode failure.
pub async fn start_checkout<A>(api: &A, booking_id: &str, origin: &str) -> Result<String, ApiError>
where
    A: HotelApi + ?Sized,
{
    let request = CheckoutSessionRequest {
        booking_id: booking_id.to_string(),
        origin_url: origin.trim_end_matches('/').to_string(),
    };
    let session = api.create_checkout_session(&request).await?;
    if session.url.trim().is_empty() {
        return Err(ApiError::decode(200, "checkout session returned no url"));
    }
    tracing::info!(
        booking_id,
        session_id = session.session_id.as_deref().unwrap_or_default(),
        "redirecting to checkout"
    );
    Ok(session.url)
}

/// Fetch the signed-in user's bookings.
///
/// # Errors
/// Propagates the [`ApiError`].
pub async fn load_bookings<A>(api: &A) -> Result<Vec<Booking>, ApiError>
where
    A: HotelApi + ?Sized,
{
    let bookings = api.bookings().await?;
    tracing::debug!(count = bookings.len(), "bookings loaded");
    Ok(bookings)
}

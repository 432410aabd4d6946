//! Scripted fakes shared by the core unit tests.

use crate::core::api::HotelApi;
use crate::core::error::ApiError;
use crate::core::timer::Timer;
use async_trait::async_trait;
use chrono::NaiveDate;
use staybook_api_models::{
    Acknowledgement, Booking, BookingStatus, CheckoutSession, CheckoutSessionRequest,
    CheckoutSessionState, CheckoutStatus, CreateBookingRequest, Hotel, Identity, PaymentState,
    SearchHotelsRequest,
};
use std::cell::RefCell;
use std::collections::VecDeque;

type Queue<T> = RefCell<VecDeque<Result<T, ApiError>>>;

/// Per-operation call counters and captured payloads.
#[derive(Clone, Debug, Default)]
pub(crate) struct Calls {
    pub start_session: usize,
    pub me: usize,
    pub logout: usize,
    pub search: usize,
    pub hotel: usize,
    pub create_booking: usize,
    pub bookings: usize,
    pub checkout_session: usize,
    pub checkout_status: usize,
    pub session_ids: Vec<String>,
    pub search_requests: Vec<SearchHotelsRequest>,
    pub booking_requests: Vec<CreateBookingRequest>,
    pub checkout_requests: Vec<CheckoutSessionRequest>,
}

/// In-memory [`HotelApi`] answering from per-operation queues.
///
/// An empty queue answers with a network error.
#[derive(Default)]
pub(crate) struct FakeApi {
    calls: RefCell<Calls>,
    sessions: Queue<Identity>,
    me: Queue<Identity>,
    logout: Queue<Acknowledgement>,
    search: Queue<Vec<Hotel>>,
    hotel: Queue<Hotel>,
    create_booking: Queue<Booking>,
    bookings: Queue<Vec<Booking>>,
    checkout_session: Queue<CheckoutSession>,
    checkout_status: Queue<CheckoutStatus>,
}

fn next<T>(queue: &Queue<T>) -> Result<T, ApiError> {
    queue
        .borrow_mut()
        .pop_front()
        .unwrap_or_else(|| Err(ApiError::network("no scripted response")))
}

impl FakeApi {
    pub(crate) fn calls(&self) -> Calls {
        self.calls.borrow().clone()
    }

    pub(crate) fn push_session(&self, response: Result<Identity, ApiError>) {
        self.sessions.borrow_mut().push_back(response);
    }

    pub(crate) fn push_me(&self, response: Result<Identity, ApiError>) {
        self.me.borrow_mut().push_back(response);
    }

    pub(crate) fn push_logout(&self, response: Result<Acknowledgement, ApiError>) {
        self.logout.borrow_mut().push_back(response);
    }

    pub(crate) fn push_search(&self, response: Result<Vec<Hotel>, ApiError>) {
        self.search.borrow_mut().push_back(response);
    }

    pub(crate) fn push_hotel(&self, response: Result<Hotel, ApiError>) {
        self.hotel.borrow_mut().push_back(response);
    }

    pub(crate) fn push_create_booking(&self, response: Result<Booking, ApiError>) {
        self.create_booking.borrow_mut().push_back(response);
    }

    pub(crate) fn push_bookings(&self, response: Result<Vec<Booking>, ApiError>) {
        self.bookings.borrow_mut().push_back(response);
    }

    pub(crate) fn push_checkout_session(&self, response: Result<CheckoutSession, ApiError>) {
        self.checkout_session.borrow_mut().push_back(response);
    }

    pub(crate) fn push_checkout_status(&self, response: Result<CheckoutStatus, ApiError>) {
        self.checkout_status.borrow_mut().push_back(response);
    }
}

#[async_trait(?Send)]
impl HotelApi for FakeApi {
    async fn start_session(&self, session_id: &str) -> Result<Identity, ApiError> {
        {
            let mut calls = self.calls.borrow_mut();
            calls.start_session += 1;
            calls.session_ids.push(session_id.to_string());
        }
        next(&self.sessions)
    }

    async fn current_identity(&self) -> Result<Identity, ApiError> {
        self.calls.borrow_mut().me += 1;
        next(&self.me)
    }

    async fn end_session(&self) -> Result<Acknowledgement, ApiError> {
        self.calls.borrow_mut().logout += 1;
        next(&self.logout)
    }

    async fn search_hotels(&self, request: &SearchHotelsRequest) -> Result<Vec<Hotel>, ApiError> {
        {
            let mut calls = self.calls.borrow_mut();
            calls.search += 1;
            calls.search_requests.push(request.clone());
        }
        next(&self.search)
    }

    async fn hotel(&self, _id: i64) -> Result<Hotel, ApiError> {
        self.calls.borrow_mut().hotel += 1;
        next(&self.hotel)
    }

    async fn create_booking(&self, request: &CreateBookingRequest) -> Result<Booking, ApiError> {
        {
            let mut calls = self.calls.borrow_mut();
            calls.create_booking += 1;
            calls.booking_requests.push(request.clone());
        }
        next(&self.create_booking)
    }

    async fn bookings(&self) -> Result<Vec<Booking>, ApiError> {
        self.calls.borrow_mut().bookings += 1;
        next(&self.bookings)
    }

    async fn create_checkout_session(
        &self,
        request: &CheckoutSessionRequest,
    ) -> Result<CheckoutSession, ApiError> {
        {
            let mut calls = self.calls.borrow_mut();
            calls.checkout_session += 1;
            calls.checkout_requests.push(request.clone());
        }
        next(&self.checkout_session)
    }

    async fn checkout_status(&self, _session_id: &str) -> Result<CheckoutStatus, ApiError> {
        self.calls.borrow_mut().checkout_status += 1;
        next(&self.checkout_status)
    }
}

/// Timer that resolves immediately and records each requested delay.
#[derive(Default)]
pub(crate) struct RecordingTimer {
    sleeps: RefCell<Vec<u32>>,
}

impl RecordingTimer {
    pub(crate) fn sleeps(&self) -> Vec<u32> {
        self.sleeps.borrow().clone()
    }
}

#[async_trait(?Send)]
impl Timer for RecordingTimer {
    async fn sleep(&self, millis: u32) {
        self.sleeps.borrow_mut().push(millis);
    }
}

pub(crate) fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

pub(crate) fn identity(name: &str) -> Identity {
    Identity {
        user_id: format!("user_{name}"),
        email: format!("{name}@example.com"),
        name: name.to_string(),
        picture: String::new(),
        session_token: None,
    }
}

pub(crate) fn hotel(id: i64, price: f64) -> Hotel {
    Hotel {
        id,
        name: format!("Hotel {id}"),
        city: "Panaji".to_string(),
        country: "India".to_string(),
        description: String::new(),
        price,
        currency: "USD".to_string(),
        rating: Some(8.4),
        review_count: Some(120),
        image_urls: Vec::new(),
        amenities: vec!["Pool".to_string()],
    }
}

pub(crate) fn booking(id: &str, hotel_id: i64) -> Booking {
    Booking {
        booking_id: id.to_string(),
        hotel_id,
        hotel_name: format!("Hotel {hotel_id}"),
        status: BookingStatus::PendingPayment,
        check_in: date(2025, 6, 1),
        check_out: date(2025, 6, 3),
        total_price: 240.0,
        created_at: String::new(),
    }
}

pub(crate) fn status(status: CheckoutSessionState, payment: PaymentState) -> CheckoutStatus {
    CheckoutStatus {
        status,
        payment_status: payment,
        amount_total: 24_000,
        currency: Some("usd".to_string()),
    }
}

pub(crate) fn pending() -> CheckoutStatus {
    status(CheckoutSessionState::Open, PaymentState::Unpaid)
}

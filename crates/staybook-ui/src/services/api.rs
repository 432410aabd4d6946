//! HTTP client for the booking backend (REST over `gloo-net`).
//!
//! # Design
//! - One client per app boot; the bearer token lives in interior mutability.
//! - Every request is credentialed (cookies) and carries the bearer when known.
//! - Non-success bodies are normalised by [`ApiError::from_response`].

use crate::core::api::{HotelApi, paths};
use crate::core::error::ApiError;
use async_trait::async_trait;
use gloo_net::http::{Request, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use staybook_api_models::{
    Acknowledgement, Booking, CheckoutSession, CheckoutSessionRequest, CheckoutStatus,
    CreateBookingRequest, Hotel, Identity, SearchHotelsRequest, SessionExchangeRequest,
};
use std::cell::RefCell;
use web_sys::RequestCredentials;

#[derive(Debug)]
pub(crate) struct ApiClient {
    base_url: String,
    bearer: RefCell<Option<String>>,
}

impl ApiClient {
    pub(crate) fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            bearer: RefCell::new(None),
        }
    }

    pub(crate) fn set_bearer(&self, token: Option<String>) {
        *self.bearer.borrow_mut() = token.filter(|value| !value.trim().is_empty());
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn prepare(&self, req: Request) -> Request {
        let req = req
            .header("Accept", "application/json")
            .credentials(RequestCredentials::Include);
        match self.bearer.borrow().as_deref() {
            Some(token) => req.header("Authorization", &format!("Bearer {token}")),
            None => req,
        }
    }

    async fn dispatch(
        &self,
        method: &'static str,
        path: &str,
        req: Request,
    ) -> Result<Response, ApiError> {
        tracing::debug!(method, path, "api request");
        let response = req.send().await.map_err(|err| {
            tracing::debug!(method, path, error = %err, "api request failed");
            ApiError::network(err.to_string())
        })?;
        let status = response.status();
        tracing::debug!(method, path, status, "api response");
        if response.ok() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(ApiError::from_response(status, &body))
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        let status = response.status();
        response
            .json::<T>()
            .await
            .map_err(|err| ApiError::decode(status, err.to_string()))
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let req = self.prepare(Request::get(&self.url(path)));
        let response = self.dispatch("GET", path, req).await?;
        Self::decode(response).await
    }

    async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let req = self
            .prepare(Request::post(&self.url(path)))
            .json(body)
            .map_err(|err| ApiError::network(err.to_string()))?;
        let response = self.dispatch("POST", path, req).await?;
        Self::decode(response).await
    }

    async fn post_empty(&self, path: &str) -> Result<Acknowledgement, ApiError> {
        let req = self.prepare(Request::post(&self.url(path)));
        let response = self.dispatch("POST", path, req).await?;
        let body = response.text().await.unwrap_or_default();
        Ok(serde_json::from_str(&body).unwrap_or_default())
    }
}

#[async_trait(?Send)]
impl HotelApi for ApiClient {
    async fn start_session(&self, session_id: &str) -> Result<Identity, ApiError> {
        let body = SessionExchangeRequest {
            session_id: session_id.to_string(),
        };
        let identity: Identity = self.post_json(paths::AUTH_SESSION, &body).await?;
        self.set_bearer(identity.session_token.clone());
        Ok(identity)
    }

    async fn current_identity(&self) -> Result<Identity, ApiError> {
        self.get_json(paths::AUTH_ME).await
    }

    async fn end_session(&self) -> Result<Acknowledgement, ApiError> {
        let outcome = self.post_empty(paths::AUTH_LOGOUT).await;
        self.set_bearer(None);
        outcome
    }

    async fn search_hotels(&self, request: &SearchHotelsRequest) -> Result<Vec<Hotel>, ApiError> {
        self.post_json(paths::HOTELS_SEARCH, request).await
    }

    async fn hotel(&self, id: i64) -> Result<Hotel, ApiError> {
        self.get_json(&paths::hotel(id)).await
    }

    async fn create_booking(&self, request: &CreateBookingRequest) -> Result<Booking, ApiError> {
        self.post_json(paths::BOOKINGS_CREATE, request).await
    }

    async fn bookings(&self) -> Result<Vec<Booking>, ApiError> {
        self.get_json(paths::BOOKINGS).await
    }

    async fn create_checkout_session(
        &self,
        request: &CheckoutSessionRequest,
    ) -> Result<CheckoutSession, ApiError> {
        self.post_json(paths::CHECKOUT_SESSION, request).await
    }

    async fn checkout_status(&self, session_id: &str) -> Result<CheckoutStatus, ApiError> {
        self.get_json(&paths::checkout_status(session_id)).await
    }
}

//! Client-side session slice.
//!
//! # Design
//! - Holds at most one identity; "authenticated" is derived, never stored.
//! - Nothing here is persisted. A fresh boot re-resolves identity over the API.

use crate::core::api::HotelApi;
use crate::core::lifecycle::Liveness;
use crate::core::store::StoreHandle;
use staybook_api_models::Identity;

/// Authenticated-user slice of the app store.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SessionSlice {
    /// Resolved identity, if any.
    pub identity: Option<Identity>,
}

impl SessionSlice {
    /// Whether an identity is currently held.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.identity.is_some()
    }
}

/// Replace the held identity.
pub fn set_identity(state: &mut SessionSlice, identity: Identity) {
    state.identity = Some(identity);
}

/// Drop the held identity.
pub fn clear_identity(state: &mut SessionSlice) {
    state.identity = None;
}

/// Silently re-check the identity behind the ambient credentials.
///
/// Used by public views that adapt to a signed-in user. Success stores the
/// identity; any failure clears it. Skips the store once `liveness` is cancelled.
pub async fn refresh_identity<A, S>(api: &A, store: &S, liveness: &Liveness) -> Option<Identity>
where
    A: HotelApi + ?Sized,
    S: StoreHandle,
{
    let outcome = api.current_identity().await;
    if !liveness.is_alive() {
        return outcome.ok();
    }
    match outcome {
        Ok(identity) => {
            store.reduce(|state| set_identity(&mut state.session, identity.clone()));
            Some(identity)
        }
        Err(err) => {
            tracing::debug!(error = %err, "no active session");
            store.reduce(|state| clear_identity(&mut state.session));
            None
        }
    }
}

/// End the server session and forget the local identity.
///
/// The local identity is cleared even when the backend call fails so a broken
/// session can never keep the UI signed in.
pub async fn logout<A, S>(api: &A, store: &S)
where
    A: HotelApi + ?Sized,
    S: StoreHandle,
{
    if let Err(err) = api.end_session().await {
        tracing::warn!(error = %err, status = ?err.status, "logout request failed");
    }
    store.reduce(|state| clear_identity(&mut state.session));
    tracing::info!("session cleared");
}

//! Authentication gate and login-callback resolution.
//!
//! # Design
//! - The gate is a three-valued enum; views render from it and navigate on the
//!   terminal values. Nothing here touches the router.
//! - A freshly resolved identity handed over through navigation state skips the
//!   identity check, so a completed login never pays for a second round trip.
//! - The callback exchange runs at most once per redirect, latched by a [`OneShot`].
//! - Store mutations after an await are skipped once the owning view is gone.

use crate::core::api::HotelApi;
use crate::core::error::ApiError;
use crate::core::lifecycle::{Liveness, OneShot};
use crate::core::logic::url_param;
use crate::core::session::{clear_identity, set_identity};
use crate::core::store::StoreHandle;
use staybook_api_models::Identity;

/// Fragment key the identity provider uses for its session token.
pub const SESSION_FRAGMENT_KEY: &str = "session_id";

/// Gate state of a protected view.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum GuardState {
    /// Identity not resolved yet.
    #[default]
    Pending,
    /// Identity confirmed.
    Authenticated(Identity),
    /// No valid session; the view redirects to login.
    Unauthenticated,
}

impl GuardState {
    /// Whether the gate reached a final value.
    #[must_use]
    pub const fn is_resolved(&self) -> bool {
        !matches!(self, Self::Pending)
    }
}

/// Resolve the gate for a freshly mounted protected view.
///
/// `handed_off` is the identity carried in navigation state, if any.
pub async fn resolve_guard<A, S>(
    api: &A,
    store: &S,
    handed_off: Option<Identity>,
    liveness: &Liveness,
) -> GuardState
where
    A: HotelApi + ?Sized,
    S: StoreHandle,
{
    if let Some(identity) = handed_off {
        tracing::debug!(user_id = %identity.user_id, "using handed-off identity");
        store.reduce(|state| set_identity(&mut state.session, identity.clone()));
        return GuardState::Authenticated(identity);
    }
    match api.current_identity().await {
        Ok(identity) => {
            if liveness.is_alive() {
                store.reduce(|state| set_identity(&mut state.session, identity.clone()));
            }
            GuardState::Authenticated(identity)
        }
        Err(err) => {
            tracing::info!(error = %err, category = ?err.category(), "identity check failed");
            if liveness.is_alive() {
                store.reduce(|state| clear_identity(&mut state.session));
            }
            GuardState::Unauthenticated
        }
    }
}

/// Result of handling a login redirect.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CallbackOutcome {
    /// Exchange succeeded; continue to the dashboard with this identity.
    Resolved(Identity),
    /// The redirect carried no session token.
    MissingToken,
    /// The exchange was rejected.
    Failed(ApiError),
    /// Another invocation already owns this redirect.
    AlreadyHandled,
}

/// Exchange the session token in `fragment` for an identity.
///
/// Only the first call through `latch` issues the exchange; later calls
/// return [`CallbackOutcome::AlreadyHandled`] without touching the store.
pub async fn resolve_callback<A, S>(
    api: &A,
    store: &S,
    fragment: &str,
    latch: &OneShot,
    liveness: &Liveness,
) -> CallbackOutcome
where
    A: HotelApi + ?Sized,
    S: StoreHandle,
{
    if !latch.try_begin() {
        return CallbackOutcome::AlreadyHandled;
    }
    let Some(session_id) = url_param(fragment, SESSION_FRAGMENT_KEY) else {
        tracing::warn!("login redirect carried no session id");
        store.reduce(|state| clear_identity(&mut state.session));
        return CallbackOutcome::MissingToken;
    };
    match api.start_session(&session_id).await {
        Ok(identity) => {
            tracing::info!(user_id = %identity.user_id, "session established");
            if liveness.is_alive() {
                store.reduce(|state| set_identity(&mut state.session, identity.clone()));
            }
            CallbackOutcome::Resolved(identity)
        }
        Err(err) => {
            tracing::error!(error = %err, status = ?err.status, "session exchange failed");
            if liveness.is_alive() {
                store.reduce(|state| clear_identity(&mut state.session));
            }
            CallbackOutcome::Failed(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::store::LocalStore;
    use crate::core::test_support::{FakeApi, identity};

    #[tokio::test]
    async fn handed_off_identity_skips_identity_check() {
        let api = FakeApi::default();
        let store = LocalStore::default();
        let state = resolve_guard(&api, &store, Some(identity("ada")), &Liveness::new()).await;
        assert_eq!(state, GuardState::Authenticated(identity("ada")));
        assert_eq!(api.calls().me, 0);
        assert!(store.snapshot().session.is_authenticated());
    }

    #[tokio::test]
    async fn guard_checks_identity_without_handoff() {
        let api = FakeApi::default();
        api.push_me(Ok(identity("grace")));
        let store = LocalStore::default();
        let state = resolve_guard(&api, &store, None, &Liveness::new()).await;
        assert_eq!(state, GuardState::Authenticated(identity("grace")));
        assert_eq!(api.calls().me, 1);
    }

    #[tokio::test]
    async fn every_guard_mount_rechecks_identity() {
        let api = FakeApi::default();
        api.push_me(Ok(identity("grace")));
        api.push_me(Err(ApiError::from_response(401, r#"{"detail":"Session expired"}"#)));
        let store = LocalStore::default();

        let first = resolve_guard(&api, &store, None, &Liveness::new()).await;
        assert_eq!(first, GuardState::Authenticated(identity("grace")));
        assert!(store.snapshot().session.is_authenticated());

        let second = resolve_guard(&api, &store, None, &Liveness::new()).await;
        assert_eq!(second, GuardState::Unauthenticated);
        assert_eq!(api.calls().me, 2);
        assert!(!store.snapshot().session.is_authenticated());
    }

    #[tokio::test]
    async fn failed_identity_check_clears_session() {
        let api = FakeApi::default();
        api.push_me(Err(ApiError::from_response(401, r#"{"detail":"Not authenticated"}"#)));
        let store = LocalStore::default();
        store.reduce(|state| set_identity(&mut state.session, identity("stale")));
        let state = resolve_guard(&api, &store, None, &Liveness::new()).await;
        assert_eq!(state, GuardState::Unauthenticated);
        assert!(!store.snapshot().session.is_authenticated());
    }

    #[tokio::test]
    async fn torn_down_guard_leaves_store_alone() {
        let api = FakeApi::default();
        api.push_me(Err(ApiError::network("offline")));
        let store = LocalStore::default();
        store.reduce(|state| set_identity(&mut state.session, identity("ada")));
        let liveness = Liveness::new();
        liveness.cancel();
        let _ = resolve_guard(&api, &store, None, &liveness).await;
        assert!(store.snapshot().session.is_authenticated());
    }

    #[tokio::test]
    async fn callback_exchanges_once_per_redirect() {
        let api = FakeApi::default();
        api.push_session(Ok(identity("ada")));
        let store = LocalStore::default();
        let latch = OneShot::default();
        let liveness = Liveness::new();

        let first = resolve_callback(&api, &store, "#session_id=tok", &latch, &liveness).await;
        let second = resolve_callback(&api, &store, "#session_id=tok", &latch, &liveness).await;

        assert_eq!(first, CallbackOutcome::Resolved(identity("ada")));
        assert_eq!(second, CallbackOutcome::AlreadyHandled);
        let calls = api.calls();
        assert_eq!(calls.start_session, 1);
        assert_eq!(calls.session_ids, vec!["tok".to_string()]);
        assert!(store.snapshot().session.is_authenticated());
    }

    #[tokio::test]
    async fn callback_without_token_never_calls_api() {
        let api = FakeApi::default();
        let store = LocalStore::default();
        let outcome = resolve_callback(
            &api,
            &store,
            "#state=1",
            &OneShot::default(),
            &Liveness::new(),
        )
        .await;
        assert_eq!(outcome, CallbackOutcome::MissingToken);
        assert_eq!(api.calls().start_session, 0);
    }

    #[tokio::test]
    async fn failed_exchange_leaves_session_empty() {
        let api = FakeApi::default();
        api.push_session(Err(ApiError::from_response(
            401,
            r#"{"detail":"Invalid session"}"#,
        )));
        let store = LocalStore::default();
        let outcome = resolve_callback(
            &api,
            &store,
            "#session_id=bad",
            &OneShot::default(),
            &Liveness::new(),
        )
        .await;
        assert!(matches!(outcome, CallbackOutcome::Failed(ref err) if err.is_auth()));
        assert!(!store.snapshot().session.is_authenticated());
    }
}

use crate::app::{ApiCtx, Route};
use crate::components::shell::LoadingPanel;
use crate::core::auth::{GuardState, resolve_guard};
use crate::core::lifecycle::Liveness;
use crate::core::store::AppStore;
use staybook_api_models::Identity;
use yew::platform::spawn_local;
use yew::prelude::*;
use yew_router::prelude::*;
use yewdux::prelude::Dispatch;

#[derive(Properties, PartialEq)]
pub(crate) struct ProtectedProps {
    pub api: ApiCtx,
    pub children: Children,
}

/// Renders children only once the identity check passes; redirects to login otherwise.
#[function_component(Protected)]
pub(crate) fn protected(props: &ProtectedProps) -> Html {
    let guard = use_state(GuardState::default);
    let location = use_location();
    let route = use_route::<Route>();
    let navigator = use_navigator();

    {
        let guard = guard.clone();
        let client = props.api.client.clone();
        let navigator = navigator.clone();
        let handed_off = location
            .as_ref()
            .and_then(|location| location.state::<Identity>())
            .map(|identity| (*identity).clone());
        let path = location
            .as_ref()
            .map(|location| location.path().to_string())
            .unwrap_or_default();
        use_effect_with_deps(
            move |_: &String| {
                guard.set(GuardState::Pending);
                let liveness = Liveness::new();
                let task = liveness.clone();
                spawn_local(async move {
                    let dispatch = Dispatch::<AppStore>::new();
                    let consumed_handoff = handed_off.is_some();
                    let state = resolve_guard(client.as_ref(), &dispatch, handed_off, &task).await;
                    if !task.is_alive() {
                        return;
                    }
                    if consumed_handoff {
                        // Drop the identity from history so back/forward re-checks.
                        if let (Some(navigator), Some(route)) = (navigator, route) {
                            navigator.replace(&route);
                        }
                    }
                    guard.set(state);
                });
                move || liveness.cancel()
            },
            path,
        );
    }

    {
        let navigator = navigator.clone();
        use_effect_with_deps(
            move |state: &GuardState| {
                if *state == GuardState::Unauthenticated {
                    if let Some(navigator) = navigator {
                        navigator.replace(&Route::Login);
                    }
                }
                || ()
            },
            (*guard).clone(),
        );
    }

    match &*guard {
        GuardState::Authenticated(_) => html! { <>{for props.children.iter()}</> },
        GuardState::Pending | GuardState::Unauthenticated => html! { <LoadingPanel /> },
    }
}

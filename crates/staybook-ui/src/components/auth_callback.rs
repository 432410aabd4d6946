use crate::app::{ApiCtx, Route};
use crate::components::shell::LoadingPanel;
use crate::core::auth::{CallbackOutcome, resolve_callback};
use crate::core::lifecycle::{Liveness, OneShot};
use crate::core::store::AppStore;
use yew::platform::spawn_local;
use yew::prelude::*;
use yew_router::prelude::*;
use yewdux::prelude::Dispatch;

#[derive(Properties, PartialEq)]
pub(crate) struct AuthCallbackProps {
    pub api: ApiCtx,
    /// Raw location fragment, e.g. `#session_id=...`.
    pub fragment: String,
}

/// Completes a provider login, then hands the identity to the dashboard.
#[function_component(AuthCallback)]
pub(crate) fn auth_callback(props: &AuthCallbackProps) -> Html {
    let latch = use_memo(|_| OneShot::default(), ());
    let navigator = use_navigator();

    {
        let latch = (*latch).clone();
        let client = props.api.client.clone();
        let fragment = props.fragment.clone();
        use_effect_with_deps(
            move |_| {
                let liveness = Liveness::new();
                let task = liveness.clone();
                spawn_local(async move {
                    let dispatch = Dispatch::<AppStore>::new();
                    let outcome =
                        resolve_callback(client.as_ref(), &dispatch, &fragment, &latch, &task).await;
                    if !task.is_alive() {
                        return;
                    }
                    let Some(navigator) = navigator else {
                        return;
                    };
                    match outcome {
                        CallbackOutcome::Resolved(identity) => {
                            navigator.replace_with_state(&Route::Dashboard, identity);
                        }
                        CallbackOutcome::MissingToken | CallbackOutcome::Failed(_) => {
                            navigator.replace(&Route::Login);
                        }
                        CallbackOutcome::AlreadyHandled => {}
                    }
                });
                move || liveness.cancel()
            },
            (),
        );
    }

    html! {
        <section class="card centered">
            <LoadingPanel />
            <p class="muted">{"Signing you in…"}</p>
        </section>
    }
}

//! Root component, router shell and wasm entry point.
//!
//! # Design
//! - One [`ApiCtx`] per boot, handed to every page as a prop.
//! - Toasts live in a reducer at the root; views emit [`Notice`]s through context.
//! - The router shell diverts any location whose fragment carries a login
//!   session id to the callback resolver before route matching.

use crate::components::auth_callback::AuthCallback;
use crate::components::dashboard::DashboardPage;
use crate::components::guard::Protected;
use crate::components::hotel_detail::HotelDetailPage;
use crate::components::login::LoginPage;
use crate::components::payment::{PaymentPage, PaymentSuccessPage};
use crate::components::search::{HomePage, SearchResultsPage};
use crate::components::shell::{AppShell, NotFoundPage};
use crate::components::toast::ToastHost;
use crate::core::auth::SESSION_FRAGMENT_KEY;
use crate::core::logic::url_param;
use crate::core::telemetry::init_logging;
use crate::models::{Notice, ToastAction, ToastList};
use preferences::{client_config, console_sink};
use yew::prelude::*;
use yew_router::prelude::*;

pub(crate) mod api;
pub(crate) mod preferences;
mod routes;

pub(crate) use api::ApiCtx;
pub(crate) use routes::Route;

#[derive(Properties, PartialEq)]
struct StaybookAppProps {
    api: ApiCtx,
}

#[function_component(StaybookApp)]
fn staybook_app(props: &StaybookAppProps) -> Html {
    let toasts = use_reducer(ToastList::default);
    let notify = {
        let toasts = toasts.dispatcher();
        Callback::from(move |notice: Notice| toasts.dispatch(ToastAction::Push(notice)))
    };
    let dismiss = {
        let toasts = toasts.dispatcher();
        Callback::from(move |id: u64| toasts.dispatch(ToastAction::Dismiss(id)))
    };

    html! {
        <ContextProvider<Callback<Notice>> context={notify}>
            <BrowserRouter>
                <AppShell>
                    <RouterOutlet api={props.api.clone()} />
                </AppShell>
                <ToastHost toasts={toasts.toasts.clone()} on_dismiss={dismiss} />
            </BrowserRouter>
        </ContextProvider<Callback<Notice>>>
    }
}

#[derive(Properties, PartialEq)]
struct RouterOutletProps {
    api: ApiCtx,
}

#[function_component(RouterOutlet)]
fn router_outlet(props: &RouterOutletProps) -> Html {
    let location = use_location();
    let fragment = location
        .as_ref()
        .map(|location| location.hash().to_string())
        .unwrap_or_default();
    if url_param(&fragment, SESSION_FRAGMENT_KEY).is_some() {
        return html! { <AuthCallback api={props.api.clone()} fragment={fragment} /> };
    }
    let api = props.api.clone();
    html! { <Switch<Route> render={move |route| switch(&api, route)} /> }
}

fn switch(api: &ApiCtx, route: Route) -> Html {
    let api = api.clone();
    let key = route.to_path();
    match route {
        Route::Home => html! { <HomePage api={api} /> },
        Route::SearchResults => html! { <SearchResultsPage /> },
        Route::HotelDetail { id } => html! { <HotelDetailPage api={api} id={id} /> },
        Route::Login => html! { <LoginPage api={api} /> },
        Route::Dashboard => html! {
            <Protected key={key.clone()} api={api.clone()}><DashboardPage api={api.clone()} /></Protected>
        },
        Route::Payment => html! {
            <Protected key={key.clone()} api={api.clone()}><PaymentPage api={api.clone()} /></Protected>
        },
        Route::PaymentSuccess => html! {
            <Protected key={key.clone()} api={api.clone()}><PaymentSuccessPage api={api.clone()} /></Protected>
        },
        Route::NotFound => html! { <NotFoundPage /> },
    }
}

/// Install logging and mount the app on `#root` (or the body).
pub fn run_app() {
    console_error_panic_hook::set_once();
    let config = client_config();
    if let Err(err) = init_logging(&config.log_level, console_sink) {
        gloo::console::error!(err.to_string());
    }
    tracing::info!(api = %config.api_base_url, "starting staybook");
    let props = StaybookAppProps {
        api: ApiCtx::new(config),
    };
    if let Some(root) = gloo::utils::document().get_element_by_id("root") {
        yew::Renderer::<StaybookApp>::with_root_and_props(root, props).render();
    } else {
        yew::Renderer::<StaybookApp>::with_props(props).render();
    }
}

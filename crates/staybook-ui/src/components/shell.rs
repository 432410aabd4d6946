use crate::app::Route;
use crate::core::store::AppStore;
use yew::prelude::*;
use yew_router::prelude::*;
use yewdux::prelude::use_selector;

#[derive(Properties, PartialEq)]
pub(crate) struct ShellProps {
    pub children: Children,
}

#[function_component(AppShell)]
pub(crate) fn app_shell(props: &ShellProps) -> Html {
    let identity = use_selector(|state: &AppStore| state.session.identity.clone());
    let route = use_route::<Route>();

    let account = (*identity).as_ref().map_or_else(
        || html! { <Link<Route> classes="nav-link" to={Route::Login}>{"Sign in"}</Link<Route>> },
        |identity| {
            html! {
                <Link<Route> classes="nav-link account" to={Route::Dashboard}>
                    {avatar(&identity.picture, &identity.name)}
                    <span>{identity.name.clone()}</span>
                </Link<Route>>
            }
        },
    );

    html! {
        <div class="app-shell">
            <header class="topbar">
                <Link<Route> classes="brand" to={Route::Home}>
                    <strong>{"Staybook"}</strong>
                </Link<Route>>
                <nav>
                    {nav_item(Route::Home, "Search", route.as_ref())}
                    {nav_item(Route::Dashboard, "My bookings", route.as_ref())}
                    {account}
                </nav>
            </header>
            <main class="content">
                {for props.children.iter()}
            </main>
        </div>
    }
}

fn nav_item(target: Route, label: &str, active: Option<&Route>) -> Html {
    let class = if active == Some(&target) {
        classes!("nav-link", "active")
    } else {
        classes!("nav-link")
    };
    html! { <Link<Route> classes={class} to={target}>{label.to_string()}</Link<Route>> }
}

pub(crate) fn avatar(picture: &str, name: &str) -> Html {
    if picture.trim().is_empty() {
        let initial = name.chars().next().map(|c| c.to_uppercase().to_string()).unwrap_or_default();
        html! { <span class="avatar placeholder">{initial}</span> }
    } else {
        html! { <img class="avatar" src={picture.to_string()} alt={name.to_string()} /> }
    }
}

#[function_component(LoadingPanel)]
pub(crate) fn loading_panel() -> Html {
    html! {
        <div class="loading-panel" role="status" aria-busy="true">
            <span class="spinner" />
            <span class="muted">{"Loading…"}</span>
        </div>
    }
}

#[function_component(NotFoundPage)]
pub(crate) fn not_found_page() -> Html {
    html! {
        <section class="card empty">
            <h2>{"Page not found"}</h2>
            <Link<Route> to={Route::Home}>{"Back to search"}</Link<Route>>
        </section>
    }
}

use crate::app::preferences::redirect_to;
use crate::app::{ApiCtx, Route};
use crate::core::store::AppStore;
use yew::prelude::*;
use yew_router::prelude::*;
use yewdux::prelude::use_selector;

#[derive(Properties, PartialEq)]
pub(crate) struct LoginPageProps {
    pub api: ApiCtx,
}

#[function_component(LoginPage)]
pub(crate) fn login_page(props: &LoginPageProps) -> Html {
    let signed_in = use_selector(|state: &AppStore| state.session.is_authenticated());
    let sign_in = {
        let url = props.api.config.login_url();
        Callback::from(move |_| {
            tracing::info!("redirecting to identity provider");
            let _ = redirect_to(&url);
        })
    };

    html! {
        <section class="card login">
            <h2>{"Welcome back"}</h2>
            <p class="muted">{"Sign in to book hotels and manage your reservations."}</p>
            {if *signed_in {
                html! { <Link<Route> classes="button primary" to={Route::Dashboard}>{"Go to my bookings"}</Link<Route>> }
            } else {
                html! { <button class="primary" onclick={sign_in}>{"Continue with Google"}</button> }
            }}
            <Link<Route> classes="ghost" to={Route::Home}>{"Back to search"}</Link<Route>>
        </section>
    }
}

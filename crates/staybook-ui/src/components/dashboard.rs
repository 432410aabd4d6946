use crate::app::{ApiCtx, Route};
use crate::components::shell::{LoadingPanel, avatar};
use crate::components::use_notify;
use crate::core::booking::{BOOKINGS_FAILED, load_bookings};
use crate::core::lifecycle::Liveness;
use crate::core::logic::{format_stay_date, nights_label};
use crate::core::session::logout;
use crate::core::store::AppStore;
use crate::models::Notice;
use staybook_api_models::{Booking, BookingStatus};
use yew::platform::spawn_local;
use yew::prelude::*;
use yew_router::prelude::*;
use yewdux::prelude::{Dispatch, use_selector};

#[derive(Clone, Debug, PartialEq)]
enum BookingsView {
    Loading,
    Loaded(Vec<Booking>),
}

#[derive(Properties, PartialEq)]
pub(crate) struct DashboardProps {
    pub api: ApiCtx,
}

/// Signed-in landing view: identity card, bookings list and logout.
#[function_component(DashboardPage)]
pub(crate) fn dashboard_page(props: &DashboardProps) -> Html {
    let identity = use_selector(|state: &AppStore| state.session.identity.clone());
    let bookings = use_state(|| BookingsView::Loading);
    let navigator = use_navigator();
    let notify = use_notify();

    {
        let bookings = bookings.clone();
        let client = props.api.client.clone();
        let notify = notify.clone();
        use_effect_with_deps(
            move |_| {
                let liveness = Liveness::new();
                let task = liveness.clone();
                spawn_local(async move {
                    let outcome = load_bookings(client.as_ref()).await;
                    if !task.is_alive() {
                        return;
                    }
                    match outcome {
                        Ok(list) => bookings.set(BookingsView::Loaded(list)),
                        Err(err) => {
                            tracing::warn!(error = %err, "bookings load failed");
                            notify.emit(Notice::error(err.notice(BOOKINGS_FAILED)));
                            bookings.set(BookingsView::Loaded(Vec::new()));
                        }
                    }
                });
                move || liveness.cancel()
            },
            (),
        );
    }

    let on_logout = {
        let client = props.api.client.clone();
        Callback::from(move |_: MouseEvent| {
            let client = client.clone();
            let navigator = navigator.clone();
            let notify = notify.clone();
            spawn_local(async move {
                let dispatch = Dispatch::<AppStore>::new();
                logout(client.as_ref(), &dispatch).await;
                notify.emit(Notice::info("Signed out"));
                if let Some(navigator) = navigator {
                    navigator.replace(&Route::Login);
                }
            });
        })
    };

    let profile = (*identity).as_ref().map(|identity| {
        html! {
            <div class="profile">
                {avatar(&identity.picture, &identity.name)}
                <div>
                    <strong>{identity.name.clone()}</strong>
                    <p class="muted">{identity.email.clone()}</p>
                </div>
            </div>
        }
    });

    let list = match &*bookings {
        BookingsView::Loading => html! { <LoadingPanel /> },
        BookingsView::Loaded(list) if list.is_empty() => html! {
            <div class="card empty">
                <p>{"No bookings yet."}</p>
                <Link<Route> classes="button primary" to={Route::Home}>{"Find a hotel"}</Link<Route>>
            </div>
        },
        BookingsView::Loaded(list) => html! {
            <div class="bookings">
                {for list.iter().map(booking_row)}
            </div>
        },
    };

    html! {
        <section class="dashboard">
            <header class="section-header">
                {profile}
                <button class="ghost" onclick={on_logout}>{"Log out"}</button>
            </header>
            <h2>{"My "}<strong>{"bookings"}</strong></h2>
            {list}
        </section>
    }
}

fn booking_row(booking: &Booking) -> Html {
    let status_class = match booking.status {
        BookingStatus::Confirmed => "badge success",
        BookingStatus::PendingPayment => "badge warning",
        BookingStatus::Other => "badge",
    };
    let nights = u32::try_from((booking.check_out - booking.check_in).num_days()).unwrap_or(0);
    html! {
        <article class="card booking">
            <div>
                <h3>{booking.hotel_name.clone()}</h3>
                <p class="muted">
                    {format!(
                        "{} → {} · {}",
                        format_stay_date(booking.check_in),
                        format_stay_date(booking.check_out),
                        nights_label(nights)
                    )}
                </p>
            </div>
            <div class="aside">
                <span class={status_class}>{booking.status.label()}</span>
                <strong>{format!("{:.2}", booking.total_price)}</strong>
            </div>
        </article>
    }
}

use crate::app::{ApiCtx, Route};
use crate::components::shell::LoadingPanel;
use crate::components::{input_value, use_notify};
use crate::core::booking::{BOOKING_FAILED, GuestDetails, submit_booking};
use crate::core::error::{FlowError, ValidationError};
use crate::core::lifecycle::Liveness;
use crate::core::logic::{format_price, format_rating, format_stay_date, nights_label};
use crate::core::search::load_hotel;
use crate::core::session::refresh_identity;
use crate::core::store::AppStore;
use crate::models::Notice;
use staybook_api_models::Hotel;
use yew::platform::spawn_local;
use yew::prelude::*;
use yew_router::prelude::*;
use yewdux::prelude::{Dispatch, use_selector};

const HOTEL_FAILED: &str = "Failed to load hotel details";

#[derive(Clone, Copy, PartialEq, Eq)]
enum GuestField {
    FirstName,
    LastName,
    Email,
}

#[derive(Properties, PartialEq)]
pub(crate) struct HotelDetailProps {
    pub api: ApiCtx,
    pub id: i64,
}

/// Hotel details with the guest form that creates a booking.
#[function_component(HotelDetailPage)]
pub(crate) fn hotel_detail_page(props: &HotelDetailProps) -> Html {
    let hotel = use_state(|| None as Option<Hotel>);
    let failed = use_state(|| false);
    let guest = use_state(GuestDetails::default);
    let busy = use_state(|| false);
    let inline_error = use_state(|| None as Option<String>);
    let criteria = use_selector(|state: &AppStore| state.search.criteria.clone());
    let signed_in = use_selector(|state: &AppStore| state.session.is_authenticated());
    let navigator = use_navigator();
    let notify = use_notify();

    {
        let hotel = hotel.clone();
        let failed = failed.clone();
        let client = props.api.client.clone();
        let notify = notify.clone();
        use_effect_with_deps(
            move |id: &i64| {
                let id = *id;
                let liveness = Liveness::new();
                let task = liveness.clone();
                spawn_local(async move {
                    let dispatch = Dispatch::<AppStore>::new();
                    if !dispatch.get().session.is_authenticated() {
                        let _ = refresh_identity(client.as_ref(), &dispatch, &task).await;
                    }
                    let outcome = load_hotel(client.as_ref(), &dispatch, id).await;
                    if !task.is_alive() {
                        return;
                    }
                    match outcome {
                        Ok(found) => hotel.set(Some(found)),
                        Err(err) => {
                            tracing::warn!(hotel_id = id, error = %err, "hotel load failed");
                            failed.set(true);
                            notify.emit(Notice::error(err.notice(HOTEL_FAILED)));
                        }
                    }
                });
                move || liveness.cancel()
            },
            props.id,
        );
    }

    let on_guest = {
        let guest = guest.clone();
        move |field: GuestField| {
            let guest = guest.clone();
            Callback::from(move |event: Event| {
                let Some(value) = input_value(&event) else {
                    return;
                };
                let mut next = (*guest).clone();
                match field {
                    GuestField::FirstName => next.first_name = value,
                    GuestField::LastName => next.last_name = value,
                    GuestField::Email => next.email = value,
                }
                guest.set(next);
            })
        }
    };

    let on_book = {
        let client = props.api.client.clone();
        let hotel = hotel.clone();
        let guest = guest.clone();
        let busy = busy.clone();
        let inline_error = inline_error.clone();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            let Some(target) = (*hotel).clone() else {
                return;
            };
            let client = client.clone();
            let details = (*guest).clone();
            let busy = busy.clone();
            let inline_error = inline_error.clone();
            let navigator = navigator.clone();
            let notify = notify.clone();
            busy.set(true);
            spawn_local(async move {
                let dispatch = Dispatch::<AppStore>::new();
                let outcome = submit_booking(client.as_ref(), &dispatch, &target, &details).await;
                busy.set(false);
                match outcome {
                    Ok(booking) => {
                        inline_error.set(None);
                        notify.emit(Notice::success("Booking created! Proceeding to payment..."));
                        if let Some(navigator) = navigator {
                            navigator.push_with_state(&Route::Payment, booking);
                        }
                    }
                    Err(FlowError::Validation(ValidationError::NotSignedIn)) => {
                        if let Some(navigator) = navigator {
                            navigator.push(&Route::Login);
                        }
                    }
                    Err(err @ FlowError::Validation(_)) => inline_error.set(Some(err.to_string())),
                    Err(err) => notify.emit(Notice::error(err.notice(BOOKING_FAILED))),
                }
            });
        })
    };

    let Some(current) = (*hotel).as_ref() else {
        return if *failed {
            html! {
                <section class="card empty">
                    <p>{"This hotel could not be loaded."}</p>
                    <Link<Route> to={Route::SearchResults}>{"Back to results"}</Link<Route>>
                </section>
            }
        } else {
            html! { <LoadingPanel /> }
        };
    };

    let stay = match (criteria.check_in, criteria.check_out, criteria.nights()) {
        (Some(check_in), Some(check_out), Some(nights)) if nights > 0 => html! {
            <dl class="summary">
                <dt>{"Check-in"}</dt><dd>{format_stay_date(check_in)}</dd>
                <dt>{"Check-out"}</dt><dd>{format_stay_date(check_out)}</dd>
                <dt>{nights_label(nights)}</dt>
                <dd>{format_price(current.price * f64::from(nights), &current.currency)}</dd>
            </dl>
        },
        _ => html! { <p class="muted">{"Pick your dates on the search page to see the total."}</p> },
    };

    html! {
        <section class="hotel-detail">
            <Link<Route> classes="ghost" to={Route::SearchResults}>{"Back to results"}</Link<Route>>
            <div class="gallery">
                {for current.image_urls.iter().take(4).map(|url| html! {
                    <img src={url.clone()} alt={current.name.clone()} />
                })}
            </div>
            <div class="columns">
                <article class="card">
                    <h2>{current.name.clone()}</h2>
                    <p class="muted">{format!("{}, {}", current.city, current.country)}</p>
                    <p class="rating">{format_rating(current.rating)}</p>
                    <p>{current.description.clone()}</p>
                    <ul class="amenities">
                        {for current.amenities.iter().map(|amenity| html! { <li>{amenity.clone()}</li> })}
                    </ul>
                </article>
                <form class="card booking-form" onsubmit={on_book}>
                    <p class="price">{format_price(current.price, &current.currency)}<small>{" / night"}</small></p>
                    {stay}
                    if *signed_in {
                        <label class="stack">
                            <span>{"First name"}</span>
                            <input type="text" value={guest.first_name.clone()} onchange={on_guest(GuestField::FirstName)} />
                        </label>
                        <label class="stack">
                            <span>{"Last name"}</span>
                            <input type="text" value={guest.last_name.clone()} onchange={on_guest(GuestField::LastName)} />
                        </label>
                        <label class="stack">
                            <span>{"Email"}</span>
                            <input type="email" value={guest.email.clone()} onchange={on_guest(GuestField::Email)} />
                        </label>
                    } else {
                        <p class="muted">{"Sign in to complete your booking."}</p>
                    }
                    {(*inline_error).as_ref().map(|message| html! {
                        <p class="inline-error" role="alert">{message.clone()}</p>
                    })}
                    <button class="primary" type="submit" disabled={*busy}>
                        {if *signed_in { "Book now" } else { "Sign in to book" }}
                    </button>
                </form>
            </div>
        </section>
    }
}

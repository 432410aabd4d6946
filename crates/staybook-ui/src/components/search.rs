use crate::app::{ApiCtx, Route};
use crate::components::{input_value, use_notify};
use crate::core::error::{FlowError, ValidationError};
use crate::core::logic::{format_price, format_rating, parse_count, parse_date_input};
use crate::core::search::{
    CriteriaPatch, SEARCH_FAILED, SearchCriteria, select_hotel, submit_search, update_criteria,
};
use crate::core::store::AppStore;
use crate::models::Notice;
use chrono::NaiveDate;
use staybook_api_models::Hotel;
use yew::platform::spawn_local;
use yew::prelude::*;
use yew_router::prelude::*;
use yewdux::prelude::{Dispatch, use_selector};

#[derive(Clone, Copy, PartialEq, Eq)]
enum Field {
    Destination,
    CheckIn,
    CheckOut,
    Adults,
    Children,
    Rooms,
}

fn patch_for(field: Field, raw: &str) -> Result<CriteriaPatch, ValidationError> {
    let patch = CriteriaPatch::default();
    Ok(match field {
        Field::Destination => patch.destination(raw),
        Field::CheckIn => patch.check_in(parse_date_input("check-in date", raw)?),
        Field::CheckOut => patch.check_out(parse_date_input("check-out date", raw)?),
        Field::Adults => patch.adults(parse_count("adults", raw, 1)?),
        Field::Children => patch.children(parse_count("children", raw, 0)?),
        Field::Rooms => patch.rooms(parse_count("rooms", raw, 1)?),
    })
}

fn date_value(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_default()
}

#[derive(Properties, PartialEq)]
pub(crate) struct HomePageProps {
    pub api: ApiCtx,
}

/// Landing page with the search form.
#[function_component(HomePage)]
pub(crate) fn home_page(props: &HomePageProps) -> Html {
    let criteria = use_selector(|state: &AppStore| state.search.criteria.clone());
    let is_loading = use_selector(|state: &AppStore| state.search.is_loading);
    let inline_error = use_state(|| None as Option<String>);
    let navigator = use_navigator();
    let notify = use_notify();

    let on_field = {
        let inline_error = inline_error.clone();
        move |field: Field| {
            let inline_error = inline_error.clone();
            Callback::from(move |event: Event| {
                let Some(raw) = input_value(&event) else {
                    return;
                };
                let dispatch = Dispatch::<AppStore>::new();
                match patch_for(field, &raw).and_then(|patch| update_criteria(&dispatch, patch)) {
                    Ok(()) => inline_error.set(None),
                    Err(err) => inline_error.set(Some(err.to_string())),
                }
            })
        }
    };

    let on_submit = {
        let client = props.api.client.clone();
        let inline_error = inline_error.clone();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            let client = client.clone();
            let inline_error = inline_error.clone();
            let navigator = navigator.clone();
            let notify = notify.clone();
            spawn_local(async move {
                let dispatch = Dispatch::<AppStore>::new();
                match submit_search(client.as_ref(), &dispatch).await {
                    Ok(_) => {
                        inline_error.set(None);
                        if let Some(navigator) = navigator {
                            navigator.push(&Route::SearchResults);
                        }
                    }
                    Err(err @ FlowError::Validation(_)) => inline_error.set(Some(err.to_string())),
                    Err(err) => notify.emit(Notice::error(err.notice(SEARCH_FAILED))),
                }
            });
        })
    };

    html! {
        <section class="hero">
            <h1>{"Discover your perfect "}<strong>{"escape"}</strong></h1>
            <p class="muted">{"Book hotels worldwide with the best prices."}</p>
            <form class="card search-form" onsubmit={on_submit}>
                {search_fields(&criteria, &on_field)}
                {(*inline_error).as_ref().map(|message| html! {
                    <p class="inline-error" role="alert">{message.clone()}</p>
                })}
                <button class="primary" type="submit" disabled={*is_loading}>
                    {if *is_loading { "Searching…" } else { "Search hotels" }}
                </button>
            </form>
        </section>
    }
}

fn search_fields(criteria: &SearchCriteria, on_field: &impl Fn(Field) -> Callback<Event>) -> Html {
    html! {
        <div class="grid">
            <label class="stack wide">
                <span>{"Destination"}</span>
                <input type="text" placeholder="Where are you going?"
                    value={criteria.destination.clone()} onchange={on_field(Field::Destination)} />
            </label>
            <label class="stack">
                <span>{"Check-in"}</span>
                <input type="date" value={date_value(criteria.check_in)} onchange={on_field(Field::CheckIn)} />
            </label>
            <label class="stack">
                <span>{"Check-out"}</span>
                <input type="date" value={date_value(criteria.check_out)} onchange={on_field(Field::CheckOut)} />
            </label>
            <label class="stack">
                <span>{"Adults"}</span>
                <input type="number" min="1" value={criteria.num_adults.to_string()} onchange={on_field(Field::Adults)} />
            </label>
            <label class="stack">
                <span>{"Children"}</span>
                <input type="number" min="0" value={criteria.num_children.to_string()} onchange={on_field(Field::Children)} />
            </label>
            <label class="stack">
                <span>{"Rooms"}</span>
                <input type="number" min="1" value={criteria.num_rooms.to_string()} onchange={on_field(Field::Rooms)} />
            </label>
        </div>
    }
}

/// Result list of the last search.
#[function_component(SearchResultsPage)]
pub(crate) fn search_results_page() -> Html {
    let results = use_selector(|state: &AppStore| state.search.results.clone());
    let last_error = use_selector(|state: &AppStore| state.search.last_error.clone());
    let navigator = use_navigator();

    let on_select = Callback::from(move |hotel: Hotel| {
        let id = hotel.id;
        Dispatch::<AppStore>::new().reduce_mut(|state| select_hotel(&mut state.search, hotel));
        if let Some(navigator) = &navigator {
            navigator.push(&Route::HotelDetail { id });
        }
    });

    let body = if let Some(message) = (*last_error).as_ref() {
        html! { <p class="inline-error" role="alert">{message.clone()}</p> }
    } else if results.is_empty() {
        html! {
            <div class="card empty">
                <p>{"No hotels found. Try another destination or dates."}</p>
            </div>
        }
    } else {
        html! {
            <div class="results-grid">
                {for results.iter().map(|hotel| hotel_card(hotel, &on_select))}
            </div>
        }
    };

    html! {
        <section class="results">
            <header class="section-header">
                <h2>{"Available "}<strong>{"hotels"}</strong></h2>
                <Link<Route> classes="ghost" to={Route::Home}>{"Back to search"}</Link<Route>>
            </header>
            {body}
        </section>
    }
}

fn hotel_card(hotel: &Hotel, on_select: &Callback<Hotel>) -> Html {
    let onclick = {
        let hotel = hotel.clone();
        on_select.reform(move |_: MouseEvent| hotel.clone())
    };
    let image = hotel.image_urls.first().cloned().unwrap_or_default();
    html! {
        <article class="card hotel-card" {onclick}>
            if !image.is_empty() {
                <img class="cover" src={image} alt={hotel.name.clone()} />
            }
            <div class="body">
                <h3>{hotel.name.clone()}</h3>
                <p class="muted">{format!("{}, {}", hotel.city, hotel.country)}</p>
                <div class="meta">
                    <span class="rating">{format_rating(hotel.rating)}</span>
                    {hotel.review_count.map(|count| html! { <span class="muted">{format!("{count} reviews")}</span> })}
                </div>
                <p class="price">{format_price(hotel.price, &hotel.currency)}<small>{" / night"}</small></p>
            </div>
        </article>
    }
}

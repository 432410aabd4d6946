use crate::app::preferences::{page_origin, redirect_to};
use crate::app::{ApiCtx, Route};
use crate::components::shell::LoadingPanel;
use crate::components::use_notify;
use crate::core::booking::{PAYMENT_FAILED, start_checkout};
use crate::core::lifecycle::Liveness;
use crate::core::logic::{format_minor_units, format_stay_date, url_param};
use crate::core::payment::{
    MAX_POLL_ATTEMPTS, PaymentPollStatus, PollPolicy, SESSION_QUERY_KEY, TIMEOUT_NOTICE,
    poll_payment,
};
use crate::models::Notice;
use crate::services::timer::BrowserTimer;
use staybook_api_models::Booking;
use yew::platform::spawn_local;
use yew::prelude::*;
use yew_router::prelude::*;

#[derive(Properties, PartialEq)]
pub(crate) struct PaymentPageProps {
    pub api: ApiCtx,
}

/// Booking summary with the hand-off to hosted checkout.
#[function_component(PaymentPage)]
pub(crate) fn payment_page(props: &PaymentPageProps) -> Html {
    let location = use_location();
    let navigator = use_navigator();
    let notify = use_notify();
    let busy = use_state(|| false);
    let booking = location
        .as_ref()
        .and_then(|location| location.state::<Booking>())
        .map(|booking| (*booking).clone());

    {
        let missing = booking.is_none();
        let navigator = navigator.clone();
        use_effect_with_deps(
            move |missing: &bool| {
                if *missing {
                    if let Some(navigator) = navigator {
                        navigator.replace(&Route::Dashboard);
                    }
                }
                || ()
            },
            missing,
        );
    }

    let Some(booking) = booking else {
        return html! { <LoadingPanel /> };
    };

    let on_pay = {
        let client = props.api.client.clone();
        let booking_id = booking.booking_id.clone();
        let busy = busy.clone();
        Callback::from(move |_: MouseEvent| {
            let client = client.clone();
            let booking_id = booking_id.clone();
            let busy = busy.clone();
            let notify = notify.clone();
            busy.set(true);
            spawn_local(async move {
                match start_checkout(client.as_ref(), &booking_id, &page_origin()).await {
                    Ok(url) => {
                        if !redirect_to(&url) {
                            busy.set(false);
                            notify.emit(Notice::error(PAYMENT_FAILED));
                        }
                    }
                    Err(err) => {
                        busy.set(false);
                        notify.emit(Notice::error(err.notice(PAYMENT_FAILED)));
                    }
                }
            });
        })
    };

    html! {
        <section class="card payment">
            <h2>{"Complete your payment"}</h2>
            {booking_summary(&booking)}
            <button class="primary" onclick={on_pay} disabled={*busy}>
                {if *busy { "Redirecting…" } else { "Proceed to payment" }}
            </button>
            <Link<Route> classes="ghost" to={Route::Dashboard}>{"Pay later"}</Link<Route>>
        </section>
    }
}

fn booking_summary(booking: &Booking) -> Html {
    html! {
        <dl class="summary">
            <dt>{"Hotel"}</dt><dd>{booking.hotel_name.clone()}</dd>
            <dt>{"Check-in"}</dt><dd>{format_stay_date(booking.check_in)}</dd>
            <dt>{"Check-out"}</dt><dd>{format_stay_date(booking.check_out)}</dd>
            <dt>{"Total"}</dt><dd>{format!("{:.2}", booking.total_price)}</dd>
            <dt>{"Status"}</dt><dd>{booking.status.label()}</dd>
        </dl>
    }
}

#[derive(Properties, PartialEq)]
pub(crate) struct PaymentSuccessProps {
    pub api: ApiCtx,
}

/// Landing view after the provider redirect; reconciles the payment state.
#[function_component(PaymentSuccessPage)]
pub(crate) fn payment_success_page(props: &PaymentSuccessProps) -> Html {
    let location = use_location();
    let navigator = use_navigator();
    let notify = use_notify();
    let status = use_state(|| PaymentPollStatus::Polling { attempt: 1 });
    let session_id = location
        .as_ref()
        .and_then(|location| url_param(location.query_str(), SESSION_QUERY_KEY));

    {
        let status = status.clone();
        let client = props.api.client.clone();
        use_effect_with_deps(
            move |session_id: &Option<String>| {
                let liveness = Liveness::new();
                match session_id.clone() {
                    None => {
                        if let Some(navigator) = navigator {
                            navigator.replace(&Route::Dashboard);
                        }
                    }
                    Some(session_id) => {
                        let task = liveness.clone();
                        spawn_local(async move {
                            let timer = BrowserTimer;
                            let publish = |state: &PaymentPollStatus| status.set(state.clone());
                            let outcome = poll_payment(
                                client.as_ref(),
                                &timer,
                                &session_id,
                                PollPolicy::default(),
                                &task,
                                publish,
                            )
                            .await;
                            if outcome == Some(PaymentPollStatus::Timeout) {
                                notify.emit(Notice::info(TIMEOUT_NOTICE));
                            }
                        });
                    }
                }
                move || liveness.cancel()
            },
            session_id,
        );
    }

    let body = match &*status {
        PaymentPollStatus::Polling { attempt } => html! {
            <>
                <LoadingPanel />
                <p class="muted">
                    {format!("Verifying your payment (attempt {attempt} of {MAX_POLL_ATTEMPTS})…")}
                </p>
            </>
        },
        PaymentPollStatus::Paid {
            amount_total,
            currency,
        } => html! {
            <>
                <h2>{"Payment successful"}</h2>
                <p>{format!("Paid {}", format_minor_units(*amount_total, currency.as_deref()))}</p>
                <p class="muted">{"Your booking is confirmed. We look forward to hosting you."}</p>
            </>
        },
        PaymentPollStatus::Expired => html! {
            <>
                <h2>{"Payment session expired"}</h2>
                <p class="muted">{"Your checkout session expired before payment. You can try again from your bookings."}</p>
            </>
        },
        PaymentPollStatus::Timeout => html! {
            <>
                <h2>{"Still confirming"}</h2>
                <p class="muted">{TIMEOUT_NOTICE}</p>
            </>
        },
    };

    html! {
        <section class="card payment-status">
            {body}
            if status.is_terminal() {
                <Link<Route> classes="button primary" to={Route::Dashboard}>{"View my bookings"}</Link<Route>>
            }
        </section>
    }
}

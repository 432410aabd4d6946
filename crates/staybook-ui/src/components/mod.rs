pub(crate) mod auth_callback;
pub(crate) mod dashboard;
pub(crate) mod guard;
pub(crate) mod hotel_detail;
pub(crate) mod login;
pub(crate) mod payment;
pub(crate) mod search;
pub(crate) mod shell;
pub(crate) mod toast;

use crate::models::Notice;
use web_sys::HtmlInputElement;
use yew::prelude::*;

/// Toast emitter provided by the app root; a no-op outside it.
#[hook]
pub(crate) fn use_notify() -> Callback<Notice> {
    use_context::<Callback<Notice>>().unwrap_or_default()
}

/// Current value of the input an event fired on.
pub(crate) fn input_value(event: &Event) -> Option<String> {
    event
        .target_dyn_into::<HtmlInputElement>()
        .map(|input| input.value())
}

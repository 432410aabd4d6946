//! Routing definitions for the Staybook UI.
use yew_router::prelude::*;

#[derive(Clone, Routable, PartialEq, Eq, Debug)]
pub(crate) enum Route {
    #[at("/")]
    Home,
    #[at("/search-results")]
    SearchResults,
    #[at("/hotel/:id")]
    HotelDetail { id: i64 },
    #[at("/login")]
    Login,
    #[at("/dashboard")]
    Dashboard,
    #[at("/payment")]
    Payment,
    #[at("/payment-success")]
    PaymentSuccess,
    #[not_found]
    #[at("/404")]
    NotFound,
}

//! Search criteria, result set and selection.
//!
//! # Design
//! - Criteria change through merge-patches; fields a patch leaves unset keep their value.
//! - The only invariant enforced on merge is date order. Completeness is checked
//!   when a request is built, right before the network call.
//! - Reducers are plain functions over [`SearchSlice`] so views and tests share them.

use crate::core::api::HotelApi;
use crate::core::error::{ApiError, FlowError, ValidationError};
use crate::core::store::StoreHandle;
use chrono::NaiveDate;
use staybook_api_models::{Hotel, SearchHotelsRequest};

/// Notice shown when a search fails without a backend message.
pub const SEARCH_FAILED: &str = "Unable to search hotels. Please try again.";

/// In-flight search criteria.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchCriteria {
    /// Free-text destination.
    pub destination: String,
    /// Arrival date.
    pub check_in: Option<NaiveDate>,
    /// Departure date.
    pub check_out: Option<NaiveDate>,
    /// Adult guests, at least one.
    pub num_adults: u32,
    /// Child guests.
    pub num_children: u32,
    /// Rooms, at least one.
    pub num_rooms: u32,
}

impl Default for SearchCriteria {
    fn default() -> Self {
        Self {
            destination: String::new(),
            check_in: None,
            check_out: None,
            num_adults: 1,
            num_children: 0,
            num_rooms: 1,
        }
    }
}

/// Partial update of [`SearchCriteria`].
///
/// Date fields are doubly optional: `Some(None)` clears the date, `None` leaves it alone.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CriteriaPatch {
    /// New destination.
    pub destination: Option<String>,
    /// New arrival date, or a clear.
    pub check_in: Option<Option<NaiveDate>>,
    /// New departure date, or a clear.
    pub check_out: Option<Option<NaiveDate>>,
    /// New adult count.
    pub num_adults: Option<u32>,
    /// New child count.
    pub num_children: Option<u32>,
    /// New room count.
    pub num_rooms: Option<u32>,
}

impl CriteriaPatch {
    /// Patch setting the destination.
    #[must_use]
    pub fn destination(mut self, value: impl Into<String>) -> Self {
        self.destination = Some(value.into());
        self
    }

    /// Patch setting or clearing the arrival date.
    #[must_use]
    pub const fn check_in(mut self, value: Option<NaiveDate>) -> Self {
        self.check_in = Some(value);
        self
    }

    /// Patch setting or clearing the departure date.
    #[must_use]
    pub const fn check_out(mut self, value: Option<NaiveDate>) -> Self {
        self.check_out = Some(value);
        self
    }

    /// Patch setting the adult count.
    #[must_use]
    pub const fn adults(mut self, value: u32) -> Self {
        self.num_adults = Some(value);
        self
    }

    /// Patch setting the child count.
    #[must_use]
    pub const fn children(mut self, value: u32) -> Self {
        self.num_children = Some(value);
        self
    }

    /// Patch setting the room count.
    #[must_use]
    pub const fn rooms(mut self, value: u32) -> Self {
        self.num_rooms = Some(value);
        self
    }
}

impl SearchCriteria {
    /// Apply a patch, returning the merged criteria.
    ///
    /// # Errors
    /// Returns [`ValidationError::CheckOutNotAfterCheckIn`] when the merge would
    /// leave both dates set with check-out on or before check-in.
    pub fn merged(&self, patch: CriteriaPatch) -> Result<Self, ValidationError> {
        let next = Self {
            destination: patch
                .destination
                .unwrap_or_else(|| self.destination.clone()),
            check_in: patch.check_in.unwrap_or(self.check_in),
            check_out: patch.check_out.unwrap_or(self.check_out),
            num_adults: patch.num_adults.unwrap_or(self.num_adults).max(1),
            num_children: patch.num_children.unwrap_or(self.num_children),
            num_rooms: patch.num_rooms.unwrap_or(self.num_rooms).max(1),
        };
        next.check_dates()?;
        Ok(next)
    }

    fn check_dates(&self) -> Result<(), ValidationError> {
        match (self.check_in, self.check_out) {
            (Some(check_in), Some(check_out)) if check_out <= check_in => {
                Err(ValidationError::CheckOutNotAfterCheckIn)
            }
            _ => Ok(()),
        }
    }

    /// Number of nights between the two dates, when both are set.
    #[must_use]
    pub fn nights(&self) -> Option<u32> {
        let (check_in, check_out) = (self.check_in?, self.check_out?);
        u32::try_from((check_out - check_in).num_days()).ok()
    }

    /// Build the wire request, checking that every required field is present.
    ///
    /// # Errors
    /// Returns a [`ValidationError`] naming the first missing field, or the date-order error.
    pub fn to_request(&self) -> Result<SearchHotelsRequest, ValidationError> {
        let destination = self.destination.trim();
        if destination.is_empty() {
            return Err(ValidationError::Missing("destination"));
        }
        let check_in = self
            .check_in
            .ok_or(ValidationError::Missing("check-in date"))?;
        let check_out = self
            .check_out
            .ok_or(ValidationError::Missing("check-out date"))?;
        self.check_dates()?;
        Ok(SearchHotelsRequest {
            destination: destination.to_string(),
            check_in,
            check_out,
            num_adults: self.num_adults,
            num_children: self.num_children,
            num_rooms: self.num_rooms,
        })
    }
}

/// Search slice of the app store.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SearchSlice {
    /// Current criteria.
    pub criteria: SearchCriteria,
    /// Last result set.
    pub results: Vec<Hotel>,
    /// Hotel picked from the results (or loaded directly).
    pub selected: Option<Hotel>,
    /// Search request in flight.
    pub is_loading: bool,
    /// Notice from the last failed search.
    pub last_error: Option<String>,
}

/// Merge a patch into the criteria; on rejection the slice is untouched.
///
/// # Errors
/// Propagates the merge [`ValidationError`].
pub fn apply_criteria_patch(
    state: &mut SearchSlice,
    patch: CriteriaPatch,
) -> Result<(), ValidationError> {
    state.criteria = state.criteria.merged(patch)?;
    Ok(())
}

/// Replace the result set.
pub fn set_results(state: &mut SearchSlice, hotels: Vec<Hotel>) {
    state.results = hotels;
}

/// Select one hotel.
pub fn select_hotel(state: &mut SearchSlice, hotel: Hotel) {
    state.selected = Some(hotel);
}

/// Toggle the loading flag.
pub fn set_loading(state: &mut SearchSlice, loading: bool) {
    state.is_loading = loading;
}

/// Record or clear the last search error.
pub fn set_error(state: &mut SearchSlice, error: Option<String>) {
    state.last_error = error;
}

/// Reset criteria, results, selection and error to defaults.
pub fn reset_search(state: &mut SearchSlice) {
    *state = SearchSlice::default();
}

/// Merge a patch through a store handle.
///
/// # Errors
/// Returns the merge [`ValidationError`]; the store is unchanged in that case.
pub fn update_criteria<S: StoreHandle>(
    store: &S,
    patch: CriteriaPatch,
) -> Result<(), ValidationError> {
    let mut outcome = Ok(());
    store.reduce(|state| outcome = apply_criteria_patch(&mut state.search, patch));
    outcome
}

/// Validate the current criteria and run one search.
///
/// Returns the number of hotels found.
///
/// # Errors
/// [`FlowError::Validation`] before any call when criteria are incomplete;
/// [`FlowError::Api`] when the search call fails (also recorded in `last_error`).
pub async fn submit_search<A, S>(api: &A, store: &S) -> Result<usize, FlowError>
where
    A: HotelApi + ?Sized,
    S: StoreHandle,
{
    let request = store.snapshot().search.criteria.to_request()?;
    store.reduce(|state| {
        set_loading(&mut state.search, true);
        set_error(&mut state.search, None);
    });
    tracing::info!(
        destination = %request.destination,
        check_in = %request.check_in,
        check_out = %request.check_out,
        "searching hotels"
    );
    let outcome = match api.search_hotels(&request).await {
        Ok(hotels) => {
            let count = hotels.len();
            store.reduce(|state| set_results(&mut state.search, hotels));
            Ok(count)
        }
        Err(err) => {
            tracing::warn!(error = %err, "hotel search failed");
            let notice = err.notice(SEARCH_FAILED);
            store.reduce(|state| set_error(&mut state.search, Some(notice)));
            Err(FlowError::Api(err))
        }
    };
    store.reduce(|state| set_loading(&mut state.search, false));
    outcome
}

/// Resolve the hotel shown by the detail view.
///
/// Reuses the current selection when it already is hotel `id`; otherwise
/// fetches it and makes it the selection.
///
/// # Errors
/// Propagates the fetch [`ApiError`].
pub async fn load_hotel<A, S>(api: &A, store: &S, id: i64) -> Result<Hotel, ApiError>
where
    A: HotelApi + ?Sized,
    S: StoreHandle,
{
    if let Some(selected) = store
        .snapshot()
        .search
        .selected
        .as_ref()
        .filter(|hotel| hotel.id == id)
    {
        return Ok(selected.clone());
    }
    let hotel = api.hotel(id).await?;
    store.reduce(|state| select_hotel(&mut state.search, hotel.clone()));
    Ok(hotel)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::store::LocalStore;
    use crate::core::test_support::{FakeApi, date, hotel};

    #[test]
    fn defaults_match_empty_search() {
        let criteria = SearchCriteria::default();
        assert!(criteria.destination.is_empty());
        assert_eq!(criteria.check_in, None);
        assert_eq!(criteria.check_out, None);
        assert_eq!(
            (criteria.num_adults, criteria.num_children, criteria.num_rooms),
            (1, 0, 1)
        );
    }

    #[test]
    fn merge_keeps_fields_missing_from_patch() {
        let base = SearchCriteria::default()
            .merged(
                CriteriaPatch::default()
                    .destination("Goa")
                    .check_in(Some(date(2025, 6, 1)))
                    .children(2),
            )
            .expect("valid patch");
        let next = base
            .merged(CriteriaPatch::default().rooms(2))
            .expect("valid patch");
        assert_eq!(next.destination, "Goa");
        assert_eq!(next.check_in, Some(date(2025, 6, 1)));
        assert_eq!(next.num_children, 2);
        assert_eq!(next.num_adults, 1);
        assert_eq!(next.num_rooms, 2);
    }

    #[test]
    fn rejected_check_out_leaves_slice_unchanged() {
        let mut slice = SearchSlice::default();
        apply_criteria_patch(
            &mut slice,
            CriteriaPatch::default()
                .check_in(Some(date(2025, 6, 3)))
                .check_out(Some(date(2025, 6, 5))),
        )
        .expect("ordered dates");
        let before = slice.clone();

        let same_day = apply_criteria_patch(
            &mut slice,
            CriteriaPatch::default().check_out(Some(date(2025, 6, 3))),
        );
        assert_eq!(same_day, Err(ValidationError::CheckOutNotAfterCheckIn));
        let earlier = apply_criteria_patch(
            &mut slice,
            CriteriaPatch::default().check_out(Some(date(2025, 6, 1))),
        );
        assert_eq!(earlier, Err(ValidationError::CheckOutNotAfterCheckIn));
        let late_check_in = apply_criteria_patch(
            &mut slice,
            CriteriaPatch::default().check_in(Some(date(2025, 6, 9))),
        );
        assert_eq!(late_check_in, Err(ValidationError::CheckOutNotAfterCheckIn));
        assert_eq!(slice, before);
    }

    #[test]
    fn clearing_a_date_is_allowed() {
        let criteria = SearchCriteria::default()
            .merged(
                CriteriaPatch::default()
                    .check_in(Some(date(2025, 6, 3)))
                    .check_out(Some(date(2025, 6, 5))),
            )
            .expect("ordered");
        let cleared = criteria
            .merged(CriteriaPatch::default().check_out(None))
            .expect("clear");
        assert_eq!(cleared.check_out, None);
        assert_eq!(cleared.nights(), None);
    }

    #[test]
    fn counts_never_drop_below_one_adult_and_room() {
        let criteria = SearchCriteria::default()
            .merged(CriteriaPatch::default().adults(0).rooms(0))
            .expect("clamped");
        assert_eq!(criteria.num_adults, 1);
        assert_eq!(criteria.num_rooms, 1);
    }

    #[test]
    fn request_requires_destination_and_dates() {
        let mut criteria = SearchCriteria::default();
        assert_eq!(
            criteria.to_request(),
            Err(ValidationError::Missing("destination"))
        );
        criteria.destination = "  Goa ".to_string();
        assert_eq!(
            criteria.to_request(),
            Err(ValidationError::Missing("check-in date"))
        );
        criteria.check_in = Some(date(2025, 6, 1));
        assert_eq!(
            criteria.to_request(),
            Err(ValidationError::Missing("check-out date"))
        );
        criteria.check_out = Some(date(2025, 6, 3));
        let request = criteria.to_request().expect("complete");
        assert_eq!(request.destination, "Goa");
        assert_eq!(criteria.nights(), Some(2));
    }

    #[test]
    fn reset_restores_defaults() {
        let mut slice = SearchSlice::default();
        set_results(&mut slice, vec![hotel(1, 100.0)]);
        select_hotel(&mut slice, hotel(1, 100.0));
        set_error(&mut slice, Some("boom".to_string()));
        set_loading(&mut slice, true);
        reset_search(&mut slice);
        assert_eq!(slice, SearchSlice::default());
    }

    #[tokio::test]
    async fn incomplete_criteria_never_reach_the_api() {
        let api = FakeApi::default();
        let store = LocalStore::default();
        let err = submit_search(&api, &store).await.expect_err("invalid");
        assert_eq!(err, FlowError::Validation(ValidationError::Missing("destination")));
        assert_eq!(api.calls().search, 0);
        assert!(!store.snapshot().search.is_loading);
    }

    #[tokio::test]
    async fn failed_search_records_notice_and_clears_loading() {
        let api = FakeApi::default();
        api.push_search(Err(ApiError::from_response(
            503,
            r#"{"detail":"Unable to reach Booking.com API"}"#,
        )));
        let store = LocalStore::default();
        update_criteria(
            &store,
            CriteriaPatch::default()
                .destination("Goa")
                .check_in(Some(date(2025, 6, 1)))
                .check_out(Some(date(2025, 6, 3))),
        )
        .expect("valid");

        let err = submit_search(&api, &store).await.expect_err("failed");
        assert!(matches!(err, FlowError::Api(_)));
        let state = store.snapshot();
        assert!(!state.search.is_loading);
        assert_eq!(
            state.search.last_error.as_deref(),
            Some("Unable to reach Booking.com API")
        );
    }

    #[tokio::test]
    async fn load_hotel_reuses_matching_selection() {
        let api = FakeApi::default();
        let store = LocalStore::default();
        store.reduce(|state| select_hotel(&mut state.search, hotel(7, 90.0)));

        let found = load_hotel(&api, &store, 7).await.expect("selected");
        assert_eq!(found.id, 7);
        assert_eq!(api.calls().hotel, 0);

        api.push_hotel(Ok(hotel(8, 120.0)));
        let fetched = load_hotel(&api, &store, 8).await.expect("fetched");
        assert_eq!(fetched.id, 8);
        assert_eq!(api.calls().hotel, 1);
        assert_eq!(
            store.snapshot().search.selected.as_ref().map(|h| h.id),
            Some(8)
        );
    }
}

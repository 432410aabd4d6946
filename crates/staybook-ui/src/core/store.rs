//! App-wide yewdux store and the handle flows use to reach it.
//!
//! # Design
//! - Keep shared state in one store with small slices so reducers stay predictable.
//! - Flows never reach for a global; they take a [`StoreHandle`] so the browser
//!   passes its yewdux dispatch and tests pass a [`LocalStore`].

use crate::core::search::SearchSlice;
use crate::core::session::SessionSlice;
use std::cell::RefCell;
use std::rc::Rc;
use yewdux::prelude::Dispatch;
use yewdux::store::Store;

/// Global application store for shared state.
#[derive(Clone, Debug, PartialEq, Store, Default)]
pub struct AppStore {
    /// Authenticated identity.
    pub session: SessionSlice,
    /// Search criteria, results and selection.
    pub search: SearchSlice,
}

/// Mutation and read access to the single logical [`AppStore`].
pub trait StoreHandle {
    /// Apply a reducer to the store.
    fn reduce(&self, reducer: impl FnOnce(&mut AppStore));
    /// Current snapshot of the store.
    fn snapshot(&self) -> Rc<AppStore>;
}

impl StoreHandle for Dispatch<AppStore> {
    fn reduce(&self, reducer: impl FnOnce(&mut AppStore)) {
        self.reduce_mut(|store| reducer(store));
    }

    fn snapshot(&self) -> Rc<AppStore> {
        self.get()
    }
}

/// Store handle backed by a plain shared cell, for non-browser hosts.
#[derive(Clone, Debug, Default)]
pub struct LocalStore {
    inner: Rc<RefCell<AppStore>>,
}

impl LocalStore {
    /// Create a handle over an existing store value.
    #[must_use]
    pub fn new(store: AppStore) -> Self {
        Self {
            inner: Rc::new(RefCell::new(store)),
        }
    }
}

impl StoreHandle for LocalStore {
    fn reduce(&self, reducer: impl FnOnce(&mut AppStore)) {
        reducer(&mut self.inner.borrow_mut());
    }

    fn snapshot(&self) -> Rc<AppStore> {
        Rc::new(self.inner.borrow().clone())
    }
}

#[cfg(test)]
mod tests {
    use super::{LocalStore, StoreHandle};

    #[test]
    fn local_store_clones_share_state() {
        let store = LocalStore::default();
        let other = store.clone();
        other.reduce(|state| state.search.is_loading = true);
        assert!(store.snapshot().search.is_loading);
    }
}

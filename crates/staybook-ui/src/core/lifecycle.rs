//! Cooperative cancellation primitives tied to view lifetimes.
//!
//! # Design
//! - A view creates one [`Liveness`] per mount and cancels it from its effect cleanup.
//! - Async continuations check [`Liveness::is_alive`] before touching shared state
//!   or scheduling more work; nothing is aborted preemptively.
//! - [`OneShot`] latches the first caller so re-renders cannot repeat an action.

use std::cell::Cell;
use std::rc::Rc;

/// Shared flag that stays alive until its owner is torn down.
#[derive(Clone, Debug)]
pub struct Liveness {
    alive: Rc<Cell<bool>>,
}

impl Default for Liveness {
    fn default() -> Self {
        Self::new()
    }
}

impl Liveness {
    /// Fresh, live token.
    #[must_use]
    pub fn new() -> Self {
        Self {
            alive: Rc::new(Cell::new(true)),
        }
    }

    /// Whether the owner is still mounted.
    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.alive.get()
    }

    /// Mark the owner as torn down; every clone observes it.
    pub fn cancel(&self) {
        self.alive.set(false);
    }
}

/// Latch that lets exactly one caller through.
#[derive(Clone, Debug, Default)]
pub struct OneShot {
    fired: Rc<Cell<bool>>,
}

impl OneShot {
    /// Returns `true` for the first call only.
    #[must_use]
    pub fn try_begin(&self) -> bool {
        !self.fired.replace(true)
    }

    /// Whether the latch has been taken.
    #[must_use]
    pub fn has_fired(&self) -> bool {
        self.fired.get()
    }
}

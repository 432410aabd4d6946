//! Browser-side implementations of the core seams.

pub(crate) mod api;
pub(crate) mod timer;

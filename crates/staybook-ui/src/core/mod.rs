//! Core, DOM-free state and orchestration for the web client.
pub mod api;
pub mod auth;
pub mod booking;
pub mod config;
pub mod error;
pub mod lifecycle;
pub mod logic;
pub mod payment;
pub mod search;
pub mod session;
pub mod store;
pub mod telemetry;
pub mod timer;

#[cfg(test)]
pub(crate) mod test_support;

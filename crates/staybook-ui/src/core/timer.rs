//! Delay abstraction for scheduled work.
//!
//! The browser implementation wraps `gloo-timers`; native tests record the
//! requested delays and resolve immediately.

use async_trait::async_trait;

/// Source of non-blocking delays.
#[async_trait(?Send)]
pub trait Timer {
    /// Resolve after roughly `millis` milliseconds.
    async fn sleep(&self, millis: u32);
}

//! Browser timer backed by `gloo-timers` futures.

use crate::core::timer::Timer;
use async_trait::async_trait;
use gloo_timers::future::TimeoutFuture;

#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct BrowserTimer;

#[async_trait(?Send)]
impl Timer for BrowserTimer {
    async fn sleep(&self, millis: u32) {
        TimeoutFuture::new(millis).await;
    }
}

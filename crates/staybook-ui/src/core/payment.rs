//! Payment reconciliation after the checkout redirect.
//!
//! # Design
//! - Fixed budget: the first attempt is immediate, later attempts follow a fixed delay.
//! - Attempts are strictly sequential; the next is scheduled only after the
//!   previous response (or error) has been observed.
//! - Errors are absorbed and consume an attempt, like any non-terminal answer.
//! - A cancelled [`Liveness`] stops the loop before any further call, sleep or publish.

use crate::core::api::HotelApi;
use crate::core::lifecycle::Liveness;
use crate::core::timer::Timer;

/// Delay between status checks.
pub const POLL_INTERVAL_MS: u32 = 2_000;
/// Status checks per redirect, the first included.
pub const MAX_POLL_ATTEMPTS: u32 = 5;
/// Notice shown when the budget runs out.
pub const TIMEOUT_NOTICE: &str =
    "Payment verification timed out. Please check your bookings for the latest status.";
/// Query key the payment provider uses for its session id.
pub const SESSION_QUERY_KEY: &str = "session_id";

/// Observable state of the reconciliation loop.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PaymentPollStatus {
    /// Check number `attempt` (1-based) is in flight.
    Polling {
        /// Current attempt.
        attempt: u32,
    },
    /// Payment captured.
    Paid {
        /// Amount in minor units.
        amount_total: i64,
        /// Currency of the amount.
        currency: Option<String>,
    },
    /// The checkout session expired unpaid.
    Expired,
    /// Budget exhausted without a terminal answer.
    Timeout,
}

impl PaymentPollStatus {
    /// Whether polling has stopped.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        !matches!(self, Self::Polling { .. })
    }
}

/// Attempt budget and spacing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PollPolicy {
    /// Delay between attempts in milliseconds.
    pub interval_ms: u32,
    /// Total attempts.
    pub max_attempts: u32,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            interval_ms: POLL_INTERVAL_MS,
            max_attempts: MAX_POLL_ATTEMPTS,
        }
    }
}

/// Poll the checkout status for `session_id` until a terminal state.
///
/// Every state is passed to `publish` while the owner is alive. Returns the
/// terminal state, or `None` when the owner was torn down first.
pub async fn poll_payment<A, T, F>(
    api: &A,
    timer: &T,
    session_id: &str,
    policy: PollPolicy,
    liveness: &Liveness,
    mut publish: F,
) -> Option<PaymentPollStatus>
where
    A: HotelApi + ?Sized,
    T: Timer + ?Sized,
    F: FnMut(&PaymentPollStatus),
{
    for attempt in 1..=policy.max_attempts {
        if !liveness.is_alive() {
            return None;
        }
        publish(&PaymentPollStatus::Polling { attempt });
        let terminal = match api.checkout_status(session_id).await {
            Ok(status) if status.is_paid() => Some(PaymentPollStatus::Paid {
                amount_total: status.amount_total,
                currency: status.currency,
            }),
            Ok(status) if status.is_expired() => Some(PaymentPollStatus::Expired),
            Ok(status) => {
                tracing::debug!(
                    attempt,
                    status = ?status.status,
                    payment_status = ?status.payment_status,
                    "payment not settled yet"
                );
                None
            }
            Err(err) => {
                tracing::warn!(attempt, error = %err, "payment status check failed");
                None
            }
        };
        if !liveness.is_alive() {
            return None;
        }
        if let Some(state) = terminal {
            tracing::info!(attempt, state = ?state, "payment reconciled");
            publish(&state);
            return Some(state);
        }
        if attempt < policy.max_attempts {
            timer.sleep(policy.interval_ms).await;
        }
    }
    if !liveness.is_alive() {
        return None;
    }
    tracing::warn!(attempts = policy.max_attempts, "payment polling timed out");
    publish(&PaymentPollStatus::Timeout);
    Some(PaymentPollStatus::Timeout)
}

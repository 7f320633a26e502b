use crate::domain::orders::{OrderService, OrderStatus};
use crate::error::{AppError, AppResult};
use crate::infrastructure::config::Config;
use async_trait::async_trait;
use backon::{BackoffBuilder, ExponentialBuilder};
use std::sync::Arc;
use std::time::Duration;

pub const SUCCESS_ROUTE: &str = "/payment-success";
pub const FAILED_ROUTE: &str = "/payment-failed";
pub const PENDING_ROUTE: &str = "/payment-pending";

/// How a payment poll ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentOutcome {
    Paid,
    Failed,
    /// Attempts ran out without a final status
    Pending,
}

impl PaymentOutcome {
    /// Storefront route the customer is sent to
    pub fn route(&self) -> &'static str {
        match self {
            Self::Paid => SUCCESS_ROUTE,
            Self::Failed => FAILED_ROUTE,
            Self::Pending => PENDING_ROUTE,
        }
    }
}

/// Result of a single status check
#[derive(Debug)]
pub enum TickResult {
    Settled(PaymentOutcome),
    Waiting(OrderStatus),
    TransientError(AppError),
    TerminalError(AppError),
}

impl TickResult {
    pub fn classify(result: AppResult<OrderStatus>) -> Self {
        match result {
            Ok(OrderStatus::Paid) => Self::Settled(PaymentOutcome::Paid),
            Ok(OrderStatus::Failed) => Self::Settled(PaymentOutcome::Failed),
            Ok(status) => Self::Waiting(status),
            Err(err) if err.is_transient() => Self::TransientError(err),
            Err(err) => Self::TerminalError(err),
        }
    }
}

/// Where the poller reads payment status from
#[async_trait]
pub trait StatusSource: Send + Sync {
    async fn payment_status(&self, order_id: i64) -> AppResult<OrderStatus>;
}

#[async_trait]
impl StatusSource for OrderService {
    async fn payment_status(&self, order_id: i64) -> AppResult<OrderStatus> {
        OrderService::payment_status(self, order_id).await
    }
}

#[derive(Debug, Clone)]
pub struct PollPolicy {
    pub interval: Duration,
    pub max_attempts: u32,
    /// Upper bound of the delay after consecutive transient errors
    pub max_backoff: Duration,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(3_000),
            max_attempts: 20,
            max_backoff: Duration::from_millis(30_000),
        }
    }
}

impl PollPolicy {
    pub fn from_config(config: &Config) -> Self {
        Self {
            interval: Duration::from_millis(config.poll_interval_ms),
            max_attempts: config.poll_max_attempts,
            max_backoff: Duration::from_millis(config.poll_max_backoff_ms),
        }
    }

    fn backoff(&self) -> ExponentialBuilder {
        ExponentialBuilder::default()
            .with_min_delay(self.interval)
            .with_max_delay(self.max_backoff)
            .with_max_times(self.max_attempts as usize)
    }
}

/// Polls an order's payment status until it settles or attempts run out.
///
/// Dropping the future returned by [`PaymentPoller::poll`] stops polling.
pub struct PaymentPoller {
    source: Arc<dyn StatusSource>,
    policy: PollPolicy,
}

impl PaymentPoller {
    pub fn new(source: Arc<dyn StatusSource>, policy: PollPolicy) -> Self {
        Self { source, policy }
    }

    pub fn policy(&self) -> &PollPolicy {
        &self.policy
    }

    pub async fn poll(&self, order_id: i64) -> AppResult<PaymentOutcome> {
        self.poll_with(order_id, |_| {}).await
    }

    /// Poll, reporting every status seen to `on_status`
    pub async fn poll_with<F>(&self, order_id: i64, mut on_status: F) -> AppResult<PaymentOutcome>
    where
        F: FnMut(&OrderStatus) + Send,
    {
        let mut delay = self.policy.interval;
        let mut backoff = None;

        for attempt in 1..=self.policy.max_attempts {
            tokio::time::sleep(delay).await;

            let result = self.source.payment_status(order_id).await;
            if let Ok(status) = &result {
                on_status(status);
            }

            match TickResult::classify(result) {
                TickResult::Settled(outcome) => {
                    tracing::info!(order_id, attempt, outcome = ?outcome, "Payment settled");
                    return Ok(outcome);
                }
                TickResult::Waiting(status) => {
                    tracing::debug!(order_id, attempt, status = %status, "Payment still pending");
                    backoff = None;
                    delay = self.policy.interval;
                }
                TickResult::TransientError(err) => {
                    delay = backoff
                        .get_or_insert_with(|| self.policy.backoff().build())
                        .next()
                        .unwrap_or(self.policy.max_backoff);
                    tracing::warn!(
                        order_id,
                        attempt,
                        error = %err,
                        retry_in = ?delay,
                        "Payment status check failed"
                    );
                }
                TickResult::TerminalError(err) => {
                    tracing::error!(order_id, attempt, error = %err, "Payment polling aborted");
                    return Err(err);
                }
            }
        }

        tracing::info!(
            order_id,
            attempts = self.policy.max_attempts,
            "Payment not settled, giving up"
        );
        Ok(PaymentOutcome::Pending)
    }
}

//! The quota gate itself.

use std::future::Future;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{info, warn};

use super::clock::{Clock, SystemClock};
use super::config::QuotaConfig;
use super::store::{CounterStore, MokaCounterStore, WindowCounter};
use super::window::{Window, WindowKey};

/// What a rejected caller should do instead of calling the paid API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Fallback {
    /// Use great-circle geometry in place of road routing.
    StraightLine,
}

/// Which ceiling was hit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum RejectReason {
    DailyLimitExceeded { requests: u64, limit: u64 },
    MonthlyBudgetExceeded { cost: Decimal, budget: Decimal },
}

/// A rejected gate check. Not an error: callers are expected to degrade.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuotaRejection {
    pub reason: RejectReason,
    pub fallback: Fallback,
}

impl QuotaRejection {
    fn new(reason: RejectReason) -> Self {
        Self {
            reason,
            fallback: Fallback::StraightLine,
        }
    }

    pub fn is_daily(&self) -> bool {
        matches!(self.reason, RejectReason::DailyLimitExceeded { .. })
    }

    pub fn is_monthly(&self) -> bool {
        matches!(self.reason, RejectReason::MonthlyBudgetExceeded { .. })
    }
}

/// Result of [`QuotaGovernor::check`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    Allowed,
    Rejected(QuotaRejection),
}

impl GateDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed)
    }
}

/// Result of a gated call that did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateOutcome<T> {
    /// The call ran and succeeded; it has been counted.
    Completed(T),
    /// The call never ran.
    Rejected(QuotaRejection),
}

/// Per-window state in a [`UsageReport`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowStatus {
    Active,
    Blocked,
}

/// Overall state of the paid API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ApiStatus {
    Active,
    DailyLimitExceeded,
    MonthlyBudgetExceeded,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyUsage {
    pub period: String,
    pub requests: u64,
    pub limit: u64,
    pub percentage: f64,
    pub status: WindowStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyUsage {
    pub period: String,
    pub requests: u64,
    pub cost: Decimal,
    pub budget: Decimal,
    pub percentage: Decimal,
    pub status: WindowStatus,
}

/// Snapshot of both windows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UsageReport {
    pub service_id: String,
    pub daily: DailyUsage,
    pub monthly: MonthlyUsage,
}

/// Gate in front of a paid API.
///
/// Counters live in `S` and windows are chosen by `C`, so tests can swap in
/// a [`ManualClock`](super::ManualClock) to cross day and month boundaries.
pub struct QuotaGovernor<S = MokaCounterStore, C = SystemClock> {
    config: QuotaConfig,
    store: S,
    clock: C,
}

impl QuotaGovernor {
    /// Governor with an in-memory store and the system clock.
    ///
    /// Counts are private to this value and lost when it is dropped; share
    /// one governor per process, or use [`with_parts`](Self::with_parts) with
    /// a persistent [`CounterStore`] to keep them across restarts.
    pub fn new(config: QuotaConfig) -> Self {
        Self::with_parts(config, MokaCounterStore::default(), SystemClock)
    }
}

impl<S: CounterStore, C: Clock> QuotaGovernor<S, C> {
    pub fn with_parts(config: QuotaConfig, store: S, clock: C) -> Self {
        Self {
            config,
            store,
            clock,
        }
    }

    pub fn config(&self) -> &QuotaConfig {
        &self.config
    }

    fn key(&self, window: Window) -> WindowKey {
        WindowKey::current(&self.config.service_id, window, self.clock.now())
    }

    async fn read(&self, key: &WindowKey) -> WindowCounter {
        self.store.get(key).await.unwrap_or_default()
    }

    /// Daily count first, then monthly cost. Both reads see zero for a window
    /// that has no entry yet.
    pub async fn check(&self) -> GateDecision {
        if !self.config.enabled {
            return GateDecision::Allowed;
        }

        match self.rejection().await {
            Some(rejection) => {
                match &rejection.reason {
                    RejectReason::DailyLimitExceeded { requests, limit } => {
                        warn!(
                            service = %self.config.service_id,
                            requests, limit, "daily request limit reached"
                        );
                    }
                    RejectReason::MonthlyBudgetExceeded { cost, budget } => {
                        warn!(
                            service = %self.config.service_id,
                            %cost, %budget, "monthly budget exhausted"
                        );
                    }
                }
                GateDecision::Rejected(rejection)
            }
            None => GateDecision::Allowed,
        }
    }

    async fn rejection(&self) -> Option<QuotaRejection> {
        let daily = self.read(&self.key(Window::Daily)).await;
        if daily.requests >= self.config.daily_request_limit {
            return Some(QuotaRejection::new(RejectReason::DailyLimitExceeded {
                requests: daily.requests,
                limit: self.config.daily_request_limit,
            }));
        }

        let monthly = self.read(&self.key(Window::Monthly)).await;
        if monthly.cost >= self.config.monthly_budget {
            return Some(QuotaRejection::new(RejectReason::MonthlyBudgetExceeded {
                cost: monthly.cost,
                budget: self.config.monthly_budget,
            }));
        }

        None
    }

    /// Count one successful paid call against both windows.
    ///
    /// Re-reads the counters rather than reusing values from `check`, but the
    /// read and the write are still separate store operations.
    pub async fn record_success(&self) {
        let now = self.clock.now();
        let cost = self.config.cost_per_request;

        let daily = self.bump(Window::Daily, now, cost).await;
        let monthly = self.bump(Window::Monthly, now, cost).await;

        info!(
            service = %self.config.service_id,
            daily_requests = daily.requests,
            monthly_cost = %monthly.cost,
            "tracked paid API call"
        );
    }

    async fn bump(&self, window: Window, now: DateTime<Utc>, cost: Decimal) -> WindowCounter {
        let key = WindowKey::current(&self.config.service_id, window, now);
        let mut counter = self.read(&key).await;
        counter.requests += 1;
        counter.cost += cost;
        self.store.put(key, counter, window.remaining(now)).await;
        counter
    }

    /// Run `call` if the gate allows it, counting it only when it succeeds.
    ///
    /// A rejection is `Ok(GateOutcome::Rejected(..))`; the wrapped call's own
    /// error is passed through uncounted.
    pub async fn check_and_consume<F, Fut, T, E>(&self, call: F) -> Result<GateOutcome<T>, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        if let GateDecision::Rejected(rejection) = self.check().await {
            return Ok(GateOutcome::Rejected(rejection));
        }

        let value = call().await?;
        self.record_success().await;
        Ok(GateOutcome::Completed(value))
    }

    pub async fn usage(&self) -> UsageReport {
        let now = self.clock.now();
        let daily_key = WindowKey::current(&self.config.service_id, Window::Daily, now);
        let monthly_key = WindowKey::current(&self.config.service_id, Window::Monthly, now);
        let daily = self.read(&daily_key).await;
        let monthly = self.read(&monthly_key).await;

        let limit = self.config.daily_request_limit;
        let budget = self.config.monthly_budget;

        let daily_percentage = if limit == 0 {
            100.0
        } else {
            crate::domain::round_to(daily.requests as f64 / limit as f64 * 100.0, 2)
        };
        let monthly_percentage = (monthly.cost * Decimal::ONE_HUNDRED)
            .checked_div(budget)
            .map(|p| p.round_dp(2))
            .unwrap_or(Decimal::ONE_HUNDRED);

        UsageReport {
            service_id: self.config.service_id.clone(),
            daily: DailyUsage {
                period: daily_key.period().to_string(),
                requests: daily.requests,
                limit,
                percentage: daily_percentage,
                status: if daily.requests >= limit {
                    WindowStatus::Blocked
                } else {
                    WindowStatus::Active
                },
            },
            monthly: MonthlyUsage {
                period: monthly_key.period().to_string(),
                requests: monthly.requests,
                cost: monthly.cost,
                budget,
                percentage: monthly_percentage,
                status: if monthly.cost >= budget {
                    WindowStatus::Blocked
                } else {
                    WindowStatus::Active
                },
            },
        }
    }

    /// Which ceiling, if any, is currently hit. Ignores `enabled`.
    pub async fn api_status(&self) -> ApiStatus {
        match self.rejection().await.map(|r| r.reason) {
            None => ApiStatus::Active,
            Some(RejectReason::DailyLimitExceeded { .. }) => ApiStatus::DailyLimitExceeded,
            Some(RejectReason::MonthlyBudgetExceeded { .. }) => ApiStatus::MonthlyBudgetExceeded,
        }
    }

    /// Clear the current counter for one window.
    pub async fn reset(&self, window: Window) {
        let key = self.key(window);
        warn!(%key, "resetting quota counter");
        self.store.remove(&key).await;
    }
}

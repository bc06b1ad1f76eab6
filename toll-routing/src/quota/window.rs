//! Calendar windows and their cache keys.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::Serialize;

/// A counting period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Window {
    /// UTC calendar day; holds the request count.
    Daily,
    /// UTC calendar month; holds the accumulated cost.
    Monthly,
}

impl Window {
    /// Label of the period containing `now`: `2026-10-19` or `2026-10`.
    pub fn period(&self, now: DateTime<Utc>) -> String {
        match self {
            Self::Daily => now.format("%Y-%m-%d").to_string(),
            Self::Monthly => now.format("%Y-%m").to_string(),
        }
    }

    /// Start of the next period, i.e. when the current one expires.
    pub fn end(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        let next = match self {
            Self::Daily => now.date_naive().succ_opt()?,
            Self::Monthly => {
                let (year, month) = if now.month() == 12 {
                    (now.year() + 1, 1)
                } else {
                    (now.year(), now.month() + 1)
                };
                NaiveDate::from_ymd_opt(year, month, 1)?
            }
        };
        Some(next.and_hms_opt(0, 0, 0)?.and_utc())
    }

    /// Time left in the period containing `now`.
    pub fn remaining(&self, now: DateTime<Utc>) -> Duration {
        self.end(now)
            .and_then(|end| (end - now).to_std().ok())
            .unwrap_or(Duration::ZERO)
    }

    fn counter_name(&self) -> &'static str {
        match self {
            Self::Daily => "requests",
            Self::Monthly => "cost",
        }
    }
}

/// Cache key for one counter: service, window kind and period label.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WindowKey {
    service_id: Arc<str>,
    window: Window,
    period: String,
}

impl WindowKey {
    /// Key of the window of kind `window` containing `now`.
    pub fn current(service_id: &str, window: Window, now: DateTime<Utc>) -> Self {
        Self {
            service_id: Arc::from(service_id),
            window,
            period: window.period(now),
        }
    }

    pub fn service_id(&self) -> &str {
        &self.service_id
    }

    pub fn window(&self) -> Window {
        self.window
    }

    pub fn period(&self) -> &str {
        &self.period
    }
}

impl fmt::Display for WindowKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}_{}_{}",
            self.service_id,
            self.window.counter_name(),
            self.period
        )
    }
}

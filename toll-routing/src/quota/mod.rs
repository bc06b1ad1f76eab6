//! Spend governor for the paid mapping API.
//!
//! Two calendar-aligned counters (UTC) gate every paid call:
//!
//! - requests today, checked against a daily ceiling
//! - estimated cost this month, checked against a monthly budget
//!
//! A call is admitted only while both are below their ceilings, and is
//! counted only if it succeeds. A rejection carries a
//! [`Fallback::StraightLine`] directive so callers can degrade to
//! [`crate::geometry`] distances instead of failing.
//!
//! The check and the post-call increment are separate store operations, so
//! concurrent callers can all pass the check before any of them is counted
//! and overshoot a ceiling. The governor bounds spend approximately; it is
//! not exact admission control. All counter access goes through
//! [`CounterStore`], which is where an atomic increment would live.

mod clock;
mod config;
mod governor;
mod store;
mod window;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{ConfigError, QuotaConfig};
pub use governor::{
    ApiStatus, DailyUsage, Fallback, GateDecision, GateOutcome, MonthlyUsage, QuotaGovernor,
    QuotaRejection, RejectReason, UsageReport, WindowStatus,
};
pub use store::{CounterStore, MokaCounterStore, WindowCounter};
pub use window::{Window, WindowKey};

//! Quota-gated distance with straight-line fallback.

use serde::Serialize;
use tracing::warn;

use crate::domain::Coordinate;
use crate::geometry::{DistanceUnit, route_length};
use crate::quota::{
    Clock, CounterStore, GateOutcome, MokaCounterStore, QuotaGovernor, SystemClock,
};

use super::client::RouteProvider;

/// Where a [`RouteDistance`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteSource {
    /// The paid road-routing API.
    Road,
    /// Great-circle geometry through the same points.
    StraightLine,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteDistance {
    pub distance_km: f64,
    /// Only known for road routes.
    pub duration_secs: Option<u64>,
    pub source: RouteSource,
}

impl RouteDistance {
    fn straight_line(points: &[Coordinate]) -> Self {
        Self {
            distance_km: route_length(points, DistanceUnit::Kilometers),
            duration_secs: None,
            source: RouteSource::StraightLine,
        }
    }
}

/// Route distances from a paid provider, bounded by a [`QuotaGovernor`].
pub struct RouteDistanceService<P, S = MokaCounterStore, C = SystemClock> {
    provider: P,
    governor: QuotaGovernor<S, C>,
}

impl<P, S, C> RouteDistanceService<P, S, C>
where
    P: RouteProvider,
    S: CounterStore,
    C: Clock,
{
    pub fn new(provider: P, governor: QuotaGovernor<S, C>) -> Self {
        Self { provider, governor }
    }

    pub fn governor(&self) -> &QuotaGovernor<S, C> {
        &self.governor
    }

    /// Road distance through `points`, or straight-line distance when the
    /// quota rejects the call or the provider fails. Never errors.
    pub async fn distance(&self, points: &[Coordinate]) -> RouteDistance {
        let outcome = self
            .governor
            .check_and_consume(|| self.provider.route(points))
            .await;

        match outcome {
            Ok(GateOutcome::Completed(route)) => RouteDistance {
                distance_km: route.distance_km,
                duration_secs: Some(route.duration_secs),
                source: RouteSource::Road,
            },
            Ok(GateOutcome::Rejected(rejection)) => {
                warn!(reason = ?rejection.reason, "using straight-line distance");
                RouteDistance::straight_line(points)
            }
            Err(e) => {
                warn!(error = %e, "directions failed, using straight-line distance");
                RouteDistance::straight_line(points)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::directions::{DirectionsError, RoadRoute};
    use crate::quota::{ManualClock, QuotaConfig};
    use chrono::{TimeZone, Utc};

    /// Provider that counts calls and either answers a fixed route or fails.
    #[derive(Clone, Default)]
    struct MockRouteProvider {
        calls: Arc<AtomicUsize>,
        fail: bool,
    }

    impl MockRouteProvider {
        fn failing() -> Self {
            Self {
                fail: true,
                ..Self::default()
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl RouteProvider for MockRouteProvider {
        async fn route(&self, points: &[Coordinate]) -> Result<RoadRoute, DirectionsError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(DirectionsError::Status("ZERO_RESULTS".into()));
            }
            Ok(RoadRoute {
                distance_km: 434.46,
                duration_secs: 18300,
                path: points.to_vec(),
            })
        }
    }

    fn sp_rio() -> [Coordinate; 2] {
        [
            Coordinate::new(-23.5505, -46.6333).unwrap(),
            Coordinate::new(-22.9068, -43.1729).unwrap(),
        ]
    }

    fn service(
        provider: MockRouteProvider,
        config: QuotaConfig,
    ) -> RouteDistanceService<MockRouteProvider, MokaCounterStore, Arc<ManualClock>> {
        let clock = Arc::new(ManualClock::new(
            Utc.with_ymd_and_hms(2026, 10, 19, 12, 0, 0).unwrap(),
        ));
        let governor = QuotaGovernor::with_parts(config, MokaCounterStore::default(), clock);
        RouteDistanceService::new(provider, governor)
    }

    #[tokio::test]
    async fn road_distance_when_allowed() {
        let provider = MockRouteProvider::default();
        let service = service(provider.clone(), QuotaConfig::default());

        let result = service.distance(&sp_rio()).await;
        assert_eq!(result.source, RouteSource::Road);
        assert_eq!(result.distance_km, 434.46);
        assert_eq!(result.duration_secs, Some(18300));
        assert_eq!(provider.calls(), 1);
        assert_eq!(service.governor().usage().await.daily.requests, 1);
    }

    #[tokio::test]
    async fn falls_back_when_quota_rejects() {
        let provider = MockRouteProvider::default();
        let service = service(provider.clone(), QuotaConfig::default().with_daily_limit(1));

        service.distance(&sp_rio()).await;
        let result = service.distance(&sp_rio()).await;

        assert_eq!(result.source, RouteSource::StraightLine);
        assert_eq!(result.distance_km, 360.75);
        assert_eq!(result.duration_secs, None);
        assert_eq!(provider.calls(), 1);
    }

    #[tokio::test]
    async fn falls_back_on_provider_error_without_counting() {
        let provider = MockRouteProvider::failing();
        let service = service(provider.clone(), QuotaConfig::default());

        let result = service.distance(&sp_rio()).await;
        assert_eq!(result.source, RouteSource::StraightLine);
        assert_eq!(provider.calls(), 1);
        assert_eq!(service.governor().usage().await.daily.requests, 0);
    }
}

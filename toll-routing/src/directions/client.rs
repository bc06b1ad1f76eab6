//! Google Directions HTTP client.

use std::future::Future;

use serde::Serialize;
use tracing::{debug, warn};

use crate::domain::{Coordinate, round_to};

use super::error::DirectionsError;
use super::polyline::decode_polyline;
use super::types::DirectionsResponse;

/// Default endpoint for the Directions JSON API.
const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com/maps/api/directions/json";

/// Origin + 23 intermediates + destination.
const DEFAULT_MAX_WAYPOINTS: usize = 25;

/// Configuration for the Directions client.
#[derive(Debug, Clone)]
pub struct DirectionsConfig {
    /// API key sent as the `key` query parameter
    pub api_key: String,
    /// Endpoint URL (defaults to production Google)
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Maximum points per request, endpoints included
    pub max_waypoints: usize,
}

impl DirectionsConfig {
    /// Create a new config with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
            max_waypoints: DEFAULT_MAX_WAYPOINTS,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// A driving route as reported by the provider.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoadRoute {
    /// Sum of leg distances, rounded to 2 decimals.
    pub distance_km: f64,
    /// Sum of leg durations.
    pub duration_secs: u64,
    /// Decoded overview polyline.
    pub path: Vec<Coordinate>,
}

/// Something that can compute a road route through a list of points.
pub trait RouteProvider: Send + Sync {
    fn route(
        &self,
        points: &[Coordinate],
    ) -> impl Future<Output = Result<RoadRoute, DirectionsError>> + Send;
}

/// Directions API client.
#[derive(Debug, Clone)]
pub struct DirectionsClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
    max_waypoints: usize,
}

impl DirectionsClient {
    /// Create a new client with the given configuration.
    pub fn new(config: DirectionsConfig) -> Result<Self, DirectionsError> {
        if config.api_key.trim().is_empty() {
            return Err(DirectionsError::NotConfigured);
        }

        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            api_key: config.api_key,
            base_url: config.base_url,
            max_waypoints: config.max_waypoints,
        })
    }

    /// Fetch a driving route through `points`, in order.
    pub async fn route(&self, points: &[Coordinate]) -> Result<RoadRoute, DirectionsError> {
        let params = request_params(points, self.max_waypoints)?;
        debug!(waypoints = points.len(), "requesting directions");

        let response = self
            .http
            .get(&self.base_url)
            .query(&params)
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DirectionsError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;
        let parsed: DirectionsResponse =
            serde_json::from_str(&body).map_err(|e| DirectionsError::Json {
                message: e.to_string(),
            })?;

        road_route(parsed)
    }
}

impl RouteProvider for DirectionsClient {
    async fn route(&self, points: &[Coordinate]) -> Result<RoadRoute, DirectionsError> {
        DirectionsClient::route(self, points).await
    }
}

fn lat_lon(point: &Coordinate) -> String {
    format!("{},{}", point.lat(), point.lon())
}

/// Query parameters for a route through `points` (the key excluded).
fn request_params(
    points: &[Coordinate],
    max_waypoints: usize,
) -> Result<Vec<(&'static str, String)>, DirectionsError> {
    let (origin, destination) = match points {
        [first, .., last] => (first, last),
        _ => return Err(DirectionsError::TooFewWaypoints),
    };
    if points.len() > max_waypoints {
        return Err(DirectionsError::TooManyWaypoints { max: max_waypoints });
    }

    let mut params = vec![
        ("origin", lat_lon(origin)),
        ("destination", lat_lon(destination)),
        ("mode", "driving".to_string()),
        ("units", "metric".to_string()),
    ];

    let intermediates = &points[1..points.len() - 1];
    if !intermediates.is_empty() {
        let joined = intermediates
            .iter()
            .map(lat_lon)
            .collect::<Vec<_>>()
            .join("|");
        params.push(("waypoints", joined));
    }

    Ok(params)
}

/// Interpret a decoded response body.
fn road_route(response: DirectionsResponse) -> Result<RoadRoute, DirectionsError> {
    if response.status != "OK" {
        warn!(
            status = %response.status,
            message = response.error_message.as_deref().unwrap_or(""),
            "directions request not OK"
        );
        return Err(DirectionsError::Status(response.status));
    }

    let route = response
        .routes
        .into_iter()
        .next()
        .ok_or(DirectionsError::NoRoute)?;

    let metres: u64 = route
        .legs
        .iter()
        .filter_map(|leg| leg.distance.as_ref())
        .map(|d| d.value)
        .sum();
    let duration_secs = route
        .legs
        .iter()
        .filter_map(|leg| leg.duration.as_ref())
        .map(|d| d.value)
        .sum();
    let path = route
        .overview_polyline
        .map(|p| decode_polyline(&p.points))
        .unwrap_or_default();

    Ok(RoadRoute {
        distance_km: round_to(metres as f64 / 1000.0, 2),
        duration_secs,
        path,
    })
}

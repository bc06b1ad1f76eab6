//! Road routing through the paid Google Directions API.
//!
//! Every request should go through [`RouteDistanceService`], which puts the
//! [`QuotaGovernor`](crate::quota::QuotaGovernor) in front of the provider
//! and falls back to great-circle distance when the gate rejects the call
//! or the provider fails.

mod client;
mod error;
mod polyline;
mod service;
mod types;

pub use client::{DirectionsClient, DirectionsConfig, RoadRoute, RouteProvider};
pub use error::DirectionsError;
pub use polyline::decode_polyline;
pub use service::{RouteDistance, RouteDistanceService, RouteSource};
pub use types::{DirectionsLeg, DirectionsResponse, DirectionsRoute, OverviewPolyline, TextValue};

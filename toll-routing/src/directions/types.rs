//! Directions API response DTOs.
//!
//! Only the fields the client reads are mapped. Google omits fields freely,
//! so most of them default.

use serde::Deserialize;

/// Top-level `directions/json` response.
#[derive(Debug, Clone, Deserialize)]
pub struct DirectionsResponse {
    /// `OK`, `ZERO_RESULTS`, `OVER_QUERY_LIMIT`, `REQUEST_DENIED`, ...
    pub status: String,

    #[serde(default)]
    pub routes: Vec<DirectionsRoute>,

    /// Present on most non-`OK` statuses.
    pub error_message: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DirectionsRoute {
    #[serde(default)]
    pub legs: Vec<DirectionsLeg>,

    pub overview_polyline: Option<OverviewPolyline>,
}

/// One leg between consecutive waypoints.
#[derive(Debug, Clone, Deserialize)]
pub struct DirectionsLeg {
    /// Metres.
    pub distance: Option<TextValue>,
    /// Seconds.
    pub duration: Option<TextValue>,
}

/// A measured quantity: display text plus numeric value.
#[derive(Debug, Clone, Deserialize)]
pub struct TextValue {
    #[serde(default)]
    pub text: String,
    pub value: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OverviewPolyline {
    pub points: String,
}

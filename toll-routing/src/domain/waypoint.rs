//! Stops submitted to the toll routing service.

use super::Coordinate;

/// Route type code for a standard route.
pub const STANDARD_ROUTE_TYPE: i32 = 1;

/// An ordered stop on a route.
///
/// Every field is optional because upstream delivery records are often
/// incomplete. The encoder substitutes `0` for a missing IBGE code or
/// coordinate and an empty string for a missing description.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Waypoint {
    /// IBGE municipality code of the stop.
    pub ibge_code: Option<i64>,
    /// Free-text label, usually the city name.
    pub description: Option<String>,
    pub coordinate: Option<Coordinate>,
}

impl Waypoint {
    /// Create a fully populated waypoint.
    pub fn new(ibge_code: i64, description: impl Into<String>, coordinate: Coordinate) -> Self {
        Self {
            ibge_code: Some(ibge_code),
            description: Some(description.into()),
            coordinate: Some(coordinate),
        }
    }
}

/// Routing options sent alongside the stop list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteOptions {
    /// Whether alternative routes should be returned.
    pub allow_alternatives: bool,
    pub route_type: i32,
}

impl RouteOptions {
    pub fn new(allow_alternatives: bool, route_type: i32) -> Self {
        Self {
            allow_alternatives,
            route_type,
        }
    }

    /// Request alternative routes.
    pub fn with_alternatives(mut self, allow: bool) -> Self {
        self.allow_alternatives = allow;
        self
    }
}

impl Default for RouteOptions {
    fn default() -> Self {
        Self {
            allow_alternatives: false,
            route_type: STANDARD_ROUTE_TYPE,
        }
    }
}

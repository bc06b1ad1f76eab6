//! Domain types for toll routing.
//!
//! Coordinates here are always decimal degrees. Values still in the legacy
//! fixed-point encoding never reach these types; they are resolved by
//! [`crate::normalize`] first.

mod coordinate;
mod plaza;
mod waypoint;

pub use coordinate::{Coordinate, RegionBounds, round_to};
pub use plaza::{RouteRegistration, TollPlaza};
pub use waypoint::{RouteOptions, STANDARD_ROUTE_TYPE, Waypoint};

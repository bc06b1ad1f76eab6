//! Spherical geometry over normalized coordinates.
//!
//! Distances use the haversine formula on a sphere of radius 6371 km. Every
//! higher-level figure (route length, nearest plaza, fallback distance) is
//! derived from that one function.
//!
//! Internal work is in radians and unrounded. Rounding happens only where a
//! value leaves a public function that documents it.

mod bearing;
mod bounds;
mod distance;

pub use bearing::{CompassDirection, bearing};
pub use bounds::{BRAZIL_CENTER, BoundingBox, bounding_box, centroid};
pub use distance::{
    DistanceUnit, EARTH_RADIUS_KM, Nearest, great_circle_distance, nearest, route_length,
    within_distance,
};

//! Great-circle distances.

use std::fmt;

use crate::domain::{Coordinate, round_to};

/// Mean Earth radius used by every distance computation.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

const MILES_PER_KM: f64 = 0.621371;

/// Unit for reported distances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DistanceUnit {
    #[default]
    Kilometers,
    Meters,
    Miles,
}

impl DistanceUnit {
    /// Parse a unit code (`"km"`, `"m"`, `"mi"`).
    ///
    /// Unknown codes fall back to kilometres.
    pub fn parse(s: &str) -> Self {
        match s.trim() {
            "m" | "meters" | "metres" => Self::Meters,
            "mi" | "miles" => Self::Miles,
            _ => Self::Kilometers,
        }
    }

    /// Short code for display.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Kilometers => "km",
            Self::Meters => "m",
            Self::Miles => "mi",
        }
    }

    /// Convert a distance in kilometres to this unit.
    pub fn from_km(&self, km: f64) -> f64 {
        match self {
            Self::Kilometers => km,
            Self::Meters => km * 1000.0,
            Self::Miles => km * MILES_PER_KM,
        }
    }
}

impl fmt::Display for DistanceUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Haversine distance in kilometres, unrounded.
fn haversine_km(a: &Coordinate, b: &Coordinate) -> f64 {
    let d_lat = (b.lat() - a.lat()).to_radians();
    let d_lon = (b.lon() - a.lon()).to_radians();

    let h = (d_lat / 2.0).sin().powi(2)
        + a.lat_rad().cos() * b.lat_rad().cos() * (d_lon / 2.0).sin().powi(2);

    // Float error can push h a hair above 1 for antipodal points.
    let h = h.min(1.0);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_KM * c
}

/// Great-circle distance between two points in the requested unit.
///
/// # Examples
///
/// ```
/// use toll_routing::domain::Coordinate;
/// use toll_routing::geometry::{DistanceUnit, great_circle_distance};
///
/// let sp = Coordinate::new(-23.5505, -46.6333).unwrap();
/// let rj = Coordinate::new(-22.9068, -43.1729).unwrap();
/// let km = great_circle_distance(&sp, &rj, DistanceUnit::Kilometers);
/// assert!((km - 360.75).abs() < 0.01);
/// ```
pub fn great_circle_distance(a: &Coordinate, b: &Coordinate, unit: DistanceUnit) -> f64 {
    unit.from_km(haversine_km(a, b))
}

/// Total length of a path through `points`, rounded to 2 decimals.
///
/// Fewer than two points give 0.
pub fn route_length(points: &[Coordinate], unit: DistanceUnit) -> f64 {
    if points.len() < 2 {
        return 0.0;
    }

    let km: f64 = points.windows(2).map(|w| haversine_km(&w[0], &w[1])).sum();
    round_to(unit.from_km(km), 2)
}

/// True iff `a` and `b` are at most `max_km` kilometres apart.
pub fn within_distance(a: &Coordinate, b: &Coordinate, max_km: f64) -> bool {
    haversine_km(a, b) <= max_km
}

/// Result of a nearest-point search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Nearest {
    pub point: Coordinate,
    /// Position of `point` in the candidate slice.
    pub index: usize,
    /// Distance from the reference in kilometres, rounded to 2 decimals.
    pub distance_km: f64,
}

/// Find the candidate closest to `reference`.
///
/// Linear scan; on ties the earliest candidate wins. Returns `None` for an
/// empty slice.
pub fn nearest(reference: &Coordinate, candidates: &[Coordinate]) -> Option<Nearest> {
    let mut best: Option<(usize, f64)> = None;

    for (index, candidate) in candidates.iter().enumerate() {
        let d = haversine_km(reference, candidate);
        match best {
            Some((_, best_d)) if d >= best_d => {}
            _ => best = Some((index, d)),
        }
    }

    best.map(|(index, d)| Nearest {
        point: candidates[index],
        index,
        distance_km: round_to(d, 2),
    })
}

//! Decimal-degree coordinates and rectangular region bounds.

use std::fmt;

use serde::Serialize;

/// Most decimal digits an `f64` carries.
const MAX_PLACES: u32 = 15;

/// Round `value` to `places` decimal digits, half away from zero.
///
/// `places` above 15 is treated as 15.
pub fn round_to(value: f64, places: u32) -> f64 {
    let factor = 10f64.powi(places.min(MAX_PLACES) as i32);
    (value * factor).round() / factor
}

/// A point in decimal degrees.
///
/// A `Coordinate` always satisfies `-90 <= lat <= 90` and
/// `-180 <= lon <= 180`; the only public constructor checks this.
///
/// # Examples
///
/// ```
/// use toll_routing::domain::Coordinate;
///
/// let sao_paulo = Coordinate::new(-23.5505, -46.6333).unwrap();
/// assert_eq!(sao_paulo.lat(), -23.5505);
///
/// assert!(Coordinate::new(91.0, 0.0).is_none());
/// assert!(Coordinate::new(0.0, -180.5).is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinate {
    lat: f64,
    lon: f64,
}

impl Coordinate {
    /// Create a coordinate, returning `None` when either axis is out of range
    /// or not a finite number.
    pub fn new(lat: f64, lon: f64) -> Option<Self> {
        if Self::is_valid(lat, lon) {
            Some(Self { lat, lon })
        } else {
            None
        }
    }

    /// Used for constants and for values derived from already valid points
    /// (means, rounded copies).
    pub(crate) const fn new_unchecked(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// True iff `lat` is within [-90, 90] and `lon` within [-180, 180].
    pub fn is_valid(lat: f64, lon: f64) -> bool {
        (-90.0..=90.0).contains(&lat) && (-180.0..=180.0).contains(&lon)
    }

    /// Latitude in degrees.
    pub fn lat(&self) -> f64 {
        self.lat
    }

    /// Longitude in degrees.
    pub fn lon(&self) -> f64 {
        self.lon
    }

    /// Latitude in radians.
    pub(crate) fn lat_rad(&self) -> f64 {
        self.lat.to_radians()
    }

    /// Longitude in radians.
    pub(crate) fn lon_rad(&self) -> f64 {
        self.lon.to_radians()
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.lat, self.lon)
    }
}

/// An axis-aligned latitude/longitude rectangle, inclusive on all edges.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RegionBounds {
    pub lat_min: f64,
    pub lat_max: f64,
    pub lon_min: f64,
    pub lon_max: f64,
}

impl RegionBounds {
    /// Rough rectangle around the Brazilian national territory.
    pub const BRAZIL: RegionBounds = RegionBounds {
        lat_min: -35.0,
        lat_max: 6.0,
        lon_min: -75.0,
        lon_max: -33.0,
    };

    /// Check whether a point lies inside the rectangle.
    pub fn contains(&self, lat: f64, lon: f64) -> bool {
        lat >= self.lat_min && lat <= self.lat_max && lon >= self.lon_min && lon <= self.lon_max
    }
}

impl Default for RegionBounds {
    fn default() -> Self {
        Self::BRAZIL
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_edges() {
        assert!(Coordinate::new(90.0, 180.0).is_some());
        assert!(Coordinate::new(-90.0, -180.0).is_some());
    }

    #[test]
    fn rejects_out_of_range_and_nan() {
        assert!(Coordinate::new(90.0001, 0.0).is_none());
        assert!(Coordinate::new(0.0, 180.0001).is_none());
        assert!(Coordinate::new(f64::NAN, 0.0).is_none());
        assert!(Coordinate::new(0.0, f64::INFINITY).is_none());
    }

    #[test]
    fn display() {
        let c = Coordinate::new(-23.5505, -46.6333).unwrap();
        assert_eq!(c.to_string(), "-23.5505, -46.6333");
    }

    #[test]
    fn round_to_places() {
        assert_eq!(round_to(1.23456789, 2), 1.23);
        assert_eq!(round_to(-1.005001, 2), -1.01);
        assert_eq!(round_to(2.5, 0), 3.0);
        assert_eq!(round_to(-23.08765434, 7), -23.0876543);
    }

    #[test]
    fn round_to_caps_places() {
        assert_eq!(round_to(0.1, 400), 0.1);
        assert_eq!(round_to(-23.5, u32::MAX), -23.5);
        assert!(round_to(1.0 / 3.0, 40).is_finite());
    }

    #[test]
    fn brazil_bounds() {
        let b = RegionBounds::default();
        assert!(b.contains(-23.5505, -46.6333));
        assert!(b.contains(-35.0, -75.0));
        assert!(!b.contains(40.7128, -74.0060));
        assert!(!b.contains(-23.5, -30.0));
    }
}

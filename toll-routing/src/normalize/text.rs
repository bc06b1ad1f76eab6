//! Validation, free-text parsing and display formatting.

use crate::domain::{Coordinate, RegionBounds, round_to};

use super::raw::{RawSource, sanitize};

/// True iff `-90 <= lat <= 90` and `-180 <= lon <= 180`.
pub fn is_valid_coordinate(lat: f64, lon: f64) -> bool {
    Coordinate::is_valid(lat, lon)
}

/// True iff the point lies inside `bounds` (edges included).
///
/// Use [`RegionBounds::BRAZIL`] for the national territory check.
pub fn is_within_region_bounds(lat: f64, lon: f64, bounds: &RegionBounds) -> bool {
    bounds.contains(lat, lon)
}

/// Sanitize both axes of a feed row and validate the result.
pub fn normalize_pair<L, R>(raw_lat: &L, raw_lon: &R) -> Option<Coordinate>
where
    L: RawSource + ?Sized,
    R: RawSource + ?Sized,
{
    Coordinate::new(sanitize(raw_lat)?, sanitize(raw_lon)?)
}

/// Parse a `"lat, lon"`, `"lat,lon"` or `"lat lon"` string.
///
/// Surrounding whitespace is ignored and a run of separators counts as one,
/// but a leading or trailing comma leaves an empty token and is rejected.
/// Each token is sanitized (so legacy fixed-point tokens are accepted) and
/// the pair is range checked. Anything other than exactly two valid numeric
/// tokens yields `None`.
///
/// # Examples
///
/// ```
/// use toll_routing::normalize::parse_free_text;
///
/// let c = parse_free_text("-23.5505, -46.6333").unwrap();
/// assert_eq!((c.lat(), c.lon()), (-23.5505, -46.6333));
///
/// assert!(parse_free_text("-23.5505").is_none());
/// assert!(parse_free_text("95 10").is_none());
/// ```
pub fn parse_free_text(text: &str) -> Option<Coordinate> {
    let pieces: Vec<&str> = text
        .trim()
        .split(|c: char| c == ',' || c.is_whitespace())
        .collect();
    if pieces.first()?.is_empty() || pieces.last()?.is_empty() {
        return None;
    }

    match pieces.into_iter().filter(|t| !t.is_empty()).collect::<Vec<_>>()[..] {
        [lat, lon] => normalize_pair(lat, lon),
        _ => None,
    }
}

/// Render `"lat, lon"` rounded to `precision` decimals, for display.
///
/// Trailing zeros are not padded: `(-23.5, -46.6333)` renders as
/// `"-23.5, -46.6333"`.
pub fn format_coordinate(lat: f64, lon: f64, precision: u32) -> String {
    format!(
        "{}, {}",
        round_to(lat, precision),
        round_to(lon, precision)
    )
}

//! Legacy fixed-point GPS encoding.

use crate::domain::round_to;

/// Scale factor of the legacy encoding: stored value = degrees × 10^7.
pub const LEGACY_SCALE: f64 = 10_000_000.0;

/// Decoded values are rounded to this many decimal places.
const LEGACY_PRECISION: u32 = 7;

/// Sanity bound on a decoded value. Wider than latitude's ±90 because the
/// same routine decodes longitudes.
const MAX_ABS_DEGREES: f64 = 180.0;

/// Decode a legacy fixed-point string into decimal degrees.
///
/// Returns `None` for empty input, the literal `"0"` (the feed's marker
/// for "no position"), non-numeric input, or a decoded magnitude above 180.
///
/// # Examples
///
/// ```
/// use toll_routing::normalize::from_legacy_encoding;
///
/// assert_eq!(from_legacy_encoding("-230876543"), Some(-23.0876543));
/// assert_eq!(from_legacy_encoding("0"), None);
/// assert_eq!(from_legacy_encoding("abc"), None);
/// assert_eq!(from_legacy_encoding("1900000000"), None);
/// ```
pub fn from_legacy_encoding(raw: &str) -> Option<f64> {
    let raw = raw.trim();
    if raw.is_empty() || raw == "0" {
        return None;
    }

    let value: f64 = raw.parse().ok()?;
    decode_legacy_value(value)
}

/// Decode an already-parsed legacy value.
pub(crate) fn decode_legacy_value(value: f64) -> Option<f64> {
    if !value.is_finite() {
        return None;
    }

    let degrees = value / LEGACY_SCALE;
    if degrees.abs() > MAX_ABS_DEGREES {
        return None;
    }

    Some(round_to(degrees, LEGACY_PRECISION))
}

/// Encode decimal degrees in the legacy fixed-point form.
///
/// The value is multiplied by 10^7 and rounded to the nearest integer, so
/// anything past the 7th decimal is lost: `to_legacy_encoding(1.00000004)`
/// and `to_legacy_encoding(1.0)` both give `"10000000"`.
///
/// No range check is applied; see [`to_legacy_encoding_checked`].
pub fn to_legacy_encoding(degrees: f64) -> String {
    // Adding 0.0 turns a rounded -0.0 into 0.0.
    let scaled = (degrees * LEGACY_SCALE).round() + 0.0;
    format!("{scaled:.0}")
}

/// Like [`to_legacy_encoding`] but returns `None` for non-finite values and
/// magnitudes above 180 degrees, which the decoder would reject anyway.
pub fn to_legacy_encoding_checked(degrees: f64) -> Option<String> {
    if !degrees.is_finite() || degrees.abs() > MAX_ABS_DEGREES {
        return None;
    }
    Some(to_legacy_encoding(degrees))
}

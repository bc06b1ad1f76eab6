//! One-time classification of untagged feed values.

use serde_json::Value;

use super::legacy::decode_legacy_value;

/// Anything above this magnitude cannot be decimal degrees and is taken to
/// be legacy fixed point.
const DECIMAL_MAGNITUDE_LIMIT: f64 = 180.0;

/// A raw coordinate axis whose encoding has been decided.
///
/// The feed carries no discriminator, so the encoding is inferred from the
/// magnitude exactly once, here. Downstream code receives resolved degrees
/// and never guesses again.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RawCoordinate {
    /// Already decimal degrees. Not range checked at this stage.
    Decimal(f64),
    /// Legacy fixed point, degrees × 10^7.
    Legacy(f64),
}

impl RawCoordinate {
    /// Classify a finite number by magnitude.
    pub fn classify(value: f64) -> Option<Self> {
        if !value.is_finite() {
            return None;
        }
        if value.abs() > DECIMAL_MAGNITUDE_LIMIT {
            Some(Self::Legacy(value))
        } else {
            Some(Self::Decimal(value))
        }
    }

    /// Resolve to decimal degrees.
    ///
    /// Legacy values go through the fixed-point decoder and may be rejected;
    /// decimal values are returned unchanged.
    pub fn resolve(self) -> Option<f64> {
        match self {
            Self::Decimal(degrees) => Some(degrees),
            Self::Legacy(value) => decode_legacy_value(value),
        }
    }
}

/// A value of unknown provenance that may hold one coordinate axis.
pub trait RawSource {
    /// Classify the value, or `None` if it is null, empty or not numeric.
    fn classify(&self) -> Option<RawCoordinate>;
}

impl RawSource for str {
    fn classify(&self) -> Option<RawCoordinate> {
        let s = self.trim();
        if s.is_empty() {
            return None;
        }
        RawCoordinate::classify(s.parse().ok()?)
    }
}

impl RawSource for String {
    fn classify(&self) -> Option<RawCoordinate> {
        self.as_str().classify()
    }
}

impl RawSource for f64 {
    fn classify(&self) -> Option<RawCoordinate> {
        RawCoordinate::classify(*self)
    }
}

impl RawSource for i64 {
    fn classify(&self) -> Option<RawCoordinate> {
        RawCoordinate::classify(*self as f64)
    }
}

impl RawSource for Value {
    fn classify(&self) -> Option<RawCoordinate> {
        match self {
            Value::Number(n) => RawCoordinate::classify(n.as_f64()?),
            Value::String(s) => s.classify(),
            _ => None,
        }
    }
}

impl<T: RawSource + ?Sized> RawSource for &T {
    fn classify(&self) -> Option<RawCoordinate> {
        (**self).classify()
    }
}

impl<T: RawSource> RawSource for Option<T> {
    fn classify(&self) -> Option<RawCoordinate> {
        self.as_ref()?.classify()
    }
}

/// Turn a raw feed value into decimal degrees.
///
/// Null and empty values give `None`. Magnitudes above 180 are decoded as
/// legacy fixed point; anything else is returned as-is. Bounds are not
/// checked here: pair the result with
/// [`is_valid_coordinate`](super::is_valid_coordinate) or build a
/// [`Coordinate`](crate::domain::Coordinate).
///
/// # Examples
///
/// ```
/// use toll_routing::normalize::sanitize;
///
/// assert_eq!(sanitize("-23.5505"), Some(-23.5505));
/// assert_eq!(sanitize("-235505000"), Some(-23.5505));
/// assert_eq!(sanitize(&-235505000i64), Some(-23.5505));
/// assert_eq!(sanitize(""), None);
/// ```
pub fn sanitize<T: RawSource + ?Sized>(value: &T) -> Option<f64> {
    value.classify()?.resolve()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn classify_by_magnitude() {
        assert_eq!(RawCoordinate::classify(-23.5), Some(RawCoordinate::Decimal(-23.5)));
        assert_eq!(RawCoordinate::classify(180.0), Some(RawCoordinate::Decimal(180.0)));
        assert_eq!(
            RawCoordinate::classify(180.5),
            Some(RawCoordinate::Legacy(180.5))
        );
        assert_eq!(RawCoordinate::classify(f64::NAN), None);
    }

    #[test]
    fn decimal_values_pass_through_unchecked() {
        // 95 is not a valid latitude, but range checks belong to the caller.
        assert_eq!(sanitize("95"), Some(95.0));
        assert_eq!(sanitize(&0.0f64), Some(0.0));
        assert_eq!(sanitize("0"), Some(0.0));
    }

    #[test]
    fn legacy_values_are_decoded() {
        assert_eq!(sanitize("-230876543"), Some(-23.0876543));
        assert_eq!(sanitize(&-466333000.0f64), Some(-46.6333));
        // Small legacy magnitudes decode to tiny degree values.
        assert_eq!(sanitize("181"), Some(0.0000181));
    }

    #[test]
    fn legacy_values_beyond_bound_are_rejected() {
        assert_eq!(sanitize("99999999999"), None);
    }

    #[test]
    fn null_empty_and_garbage() {
        assert_eq!(sanitize(""), None);
        assert_eq!(sanitize("  "), None);
        assert_eq!(sanitize("north"), None);
        assert_eq!(sanitize(&None::<f64>), None);
        assert_eq!(sanitize(&json!(null)), None);
        assert_eq!(sanitize(&json!(true)), None);
    }

    #[test]
    fn json_values() {
        assert_eq!(sanitize(&json!(-23.5505)), Some(-23.5505));
        assert_eq!(sanitize(&json!("-230876543")), Some(-23.0876543));
        assert_eq!(sanitize(&json!(-230876543)), Some(-23.0876543));
    }

    #[test]
    fn option_and_owned_string() {
        assert_eq!(sanitize(&Some("-23.5".to_string())), Some(-23.5));
        assert_eq!(sanitize(&"-23.5".to_string()), Some(-23.5));
    }
}

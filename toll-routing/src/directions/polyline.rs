//! Encoded polyline decoding (precision 1e5).

use crate::domain::{Coordinate, round_to};

const PRECISION: f64 = 1e5;

/// Read one zigzag varint chunk sequence. `None` if input ends mid-value.
fn next_value(bytes: &[u8], index: &mut usize) -> Option<i64> {
    let mut result: i64 = 0;
    let mut shift = 0u32;
    loop {
        let byte = i64::from(*bytes.get(*index)?) - 63;
        *index += 1;
        if !(0..64).contains(&byte) || shift > 60 {
            return None;
        }
        result |= (byte & 0x1f) << shift;
        shift += 5;
        if byte < 0x20 {
            break;
        }
    }
    Some(if result & 1 != 0 {
        !(result >> 1)
    } else {
        result >> 1
    })
}

/// Decode a Google encoded polyline into coordinates rounded to 6 decimals.
///
/// Decoding stops at the first malformed or truncated pair; points decoded
/// before it are returned. Points outside coordinate bounds are dropped.
pub fn decode_polyline(encoded: &str) -> Vec<Coordinate> {
    let bytes = encoded.as_bytes();
    let mut index = 0;
    let (mut lat, mut lon) = (0i64, 0i64);
    let mut points = Vec::new();

    while index < bytes.len() {
        let Some(dlat) = next_value(bytes, &mut index) else {
            break;
        };
        let Some(dlon) = next_value(bytes, &mut index) else {
            break;
        };
        let (Some(next_lat), Some(next_lon)) = (lat.checked_add(dlat), lon.checked_add(dlon))
        else {
            break;
        };
        lat = next_lat;
        lon = next_lon;

        let point = Coordinate::new(
            round_to(lat as f64 / PRECISION, 6),
            round_to(lon as f64 / PRECISION, 6),
        );
        if let Some(point) = point {
            points.push(point);
        }
    }

    points
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_reference_polyline() {
        let points = decode_polyline("_p~iF~ps|U_ulLnnqC_mqNvxq`@");
        let pairs: Vec<(f64, f64)> = points.iter().map(|p| (p.lat(), p.lon())).collect();
        assert_eq!(
            pairs,
            vec![(38.5, -120.2), (40.7, -120.95), (43.252, -126.453)]
        );
    }

    #[test]
    fn empty_input() {
        assert!(decode_polyline("").is_empty());
    }

    #[test]
    fn truncated_input_keeps_complete_points() {
        // First point complete, second cut after its latitude.
        let points = decode_polyline("_p~iF~ps|U_ulL");
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].lat(), 38.5);
    }

    #[test]
    fn overflowing_deltas_stop_decoding() {
        // Each chunk is a maximal 13-character varint.
        let encoded = format!("{}F", "~".repeat(12)).repeat(6);
        assert!(decode_polyline(&encoded).is_empty());
    }

    #[test]
    fn invalid_bytes_stop_decoding() {
        assert!(decode_polyline(" !!").is_empty());
    }
}

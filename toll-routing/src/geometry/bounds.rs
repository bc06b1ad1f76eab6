//! Bounding boxes and centroids.

use serde::Serialize;

use crate::domain::{Coordinate, RegionBounds, round_to};

/// Approximate length of one degree of latitude.
const KM_PER_DEGREE: f64 = 111.0;

/// Geographic centre of Brazil, used when there is nothing to average.
pub const BRAZIL_CENTER: Coordinate = Coordinate::new_unchecked(-14.2350, -51.9253);

/// A latitude/longitude box.
///
/// Padded boxes may extend past ±90/±180 near the poles or the
/// antimeridian, so the corners are plain numbers rather than
/// [`Coordinate`]s.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub min_lon: f64,
    pub max_lat: f64,
    pub max_lon: f64,
}

impl BoundingBox {
    /// The default box used when there are no points.
    pub const BRAZIL: BoundingBox = BoundingBox {
        min_lat: RegionBounds::BRAZIL.lat_min,
        min_lon: RegionBounds::BRAZIL.lon_min,
        max_lat: RegionBounds::BRAZIL.lat_max,
        max_lon: RegionBounds::BRAZIL.lon_max,
    };

    /// Corners as `[[min_lat, min_lon], [max_lat, max_lon]]`.
    pub fn corners(&self) -> [[f64; 2]; 2] {
        [[self.min_lat, self.min_lon], [self.max_lat, self.max_lon]]
    }

    /// True if the point lies inside the box (edges included).
    pub fn contains_point(&self, point: &Coordinate) -> bool {
        point.lat() >= self.min_lat
            && point.lat() <= self.max_lat
            && point.lon() >= self.min_lon
            && point.lon() <= self.max_lon
    }

    /// True if `other` lies entirely inside this box.
    pub fn contains(&self, other: &BoundingBox) -> bool {
        other.min_lat >= self.min_lat
            && other.max_lat <= self.max_lat
            && other.min_lon >= self.min_lon
            && other.max_lon <= self.max_lon
    }
}

/// Bounding box of `points`, optionally padded by `padding_km` on every side.
///
/// Latitude padding is `padding_km / 111` degrees. Longitude padding is
/// scaled by `1 / cos(mid_lat)`, where `mid_lat` is the midpoint latitude of
/// the unpadded box. Corners are rounded to 6 decimals. An empty slice gives
/// [`BoundingBox::BRAZIL`].
pub fn bounding_box(points: &[Coordinate], padding_km: f64) -> BoundingBox {
    let Some(first) = points.first() else {
        return BoundingBox::BRAZIL;
    };

    let init = (first.lat(), first.lat(), first.lon(), first.lon());
    let (mut min_lat, mut max_lat, mut min_lon, mut max_lon) =
        points.iter().fold(init, |(lo_lat, hi_lat, lo_lon, hi_lon), p| {
            (
                lo_lat.min(p.lat()),
                hi_lat.max(p.lat()),
                lo_lon.min(p.lon()),
                hi_lon.max(p.lon()),
            )
        });

    if padding_km > 0.0 {
        let mid_lat = ((min_lat + max_lat) / 2.0).to_radians();
        let lat_pad = padding_km / KM_PER_DEGREE;
        let lon_pad = padding_km / (KM_PER_DEGREE * mid_lat.cos());

        min_lat -= lat_pad;
        max_lat += lat_pad;
        min_lon -= lon_pad;
        max_lon += lon_pad;
    }

    BoundingBox {
        min_lat: round_to(min_lat, 6),
        min_lon: round_to(min_lon, 6),
        max_lat: round_to(max_lat, 6),
        max_lon: round_to(max_lon, 6),
    }
}

/// Arithmetic mean of the points, rounded to 6 decimals.
///
/// An empty slice gives [`BRAZIL_CENTER`].
pub fn centroid(points: &[Coordinate]) -> Coordinate {
    if points.is_empty() {
        return BRAZIL_CENTER;
    }

    let n = points.len() as f64;
    let lat = points.iter().map(Coordinate::lat).sum::<f64>() / n;
    let lon = points.iter().map(Coordinate::lon).sum::<f64>() / n;

    Coordinate::new_unchecked(round_to(lat, 6), round_to(lon, 6))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(lat: f64, lon: f64) -> Coordinate {
        Coordinate::new(lat, lon).unwrap()
    }

    #[test]
    fn empty_gives_brazil() {
        let b = bounding_box(&[], 0.0);
        assert_eq!(b.corners(), [[-35.0, -75.0], [6.0, -33.0]]);
        assert_eq!(bounding_box(&[], 50.0), BoundingBox::BRAZIL);
    }

    #[test]
    fn unpadded_box_is_min_max() {
        let b = bounding_box(&[c(-23.5505, -46.6333), c(-22.9068, -43.1729)], 0.0);
        assert_eq!(b.corners(), [[-23.5505, -46.6333], [-22.9068, -43.1729]]);
    }

    #[test]
    fn single_point_box_is_degenerate() {
        let b = bounding_box(&[c(-10.0, -50.0)], 0.0);
        assert_eq!(b.min_lat, b.max_lat);
        assert_eq!(b.min_lon, b.max_lon);
    }

    #[test]
    fn padding_at_equator() {
        let b = bounding_box(&[c(0.0, 0.0)], 111.0);
        assert_eq!(b.corners(), [[-1.0, -1.0], [1.0, 1.0]]);
    }

    #[test]
    fn longitude_padding_widens_with_latitude() {
        // At 60° the cosine is 0.5, so longitude padding doubles.
        let b = bounding_box(&[c(60.0, 10.0)], 111.0);
        assert_eq!(b.min_lat, 59.0);
        assert_eq!(b.max_lat, 61.0);
        assert!((b.min_lon - 8.0).abs() < 1e-6);
        assert!((b.max_lon - 12.0).abs() < 1e-6);
    }

    #[test]
    fn negative_padding_is_ignored() {
        let pts = [c(-23.5, -46.6), c(-22.9, -43.2)];
        assert_eq!(bounding_box(&pts, -10.0), bounding_box(&pts, 0.0));
    }

    #[test]
    fn contains_helpers() {
        let b = bounding_box(&[c(-23.5505, -46.6333), c(-22.9068, -43.1729)], 0.0);
        assert!(b.contains_point(&c(-23.0, -45.0)));
        assert!(!b.contains_point(&c(-15.78, -47.93)));
        assert!(BoundingBox::BRAZIL.contains(&b));
        assert!(!b.contains(&BoundingBox::BRAZIL));
    }

    #[test]
    fn centroid_of_points() {
        let center = centroid(&[c(-20.0, -40.0), c(-22.0, -44.0)]);
        assert_eq!(center, c(-21.0, -42.0));
    }

    #[test]
    fn centroid_rounds_to_six_places() {
        let center = centroid(&[c(0.0, 0.0), c(0.0, 0.0), c(1.0, 1.0)]);
        assert_eq!(center.lat(), 0.333333);
        assert_eq!(center.lon(), 0.333333);
    }

    #[test]
    fn centroid_empty_is_brazil_center() {
        let center = centroid(&[]);
        assert_eq!((center.lat(), center.lon()), (-14.2350, -51.9253));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn coordinate() -> impl Strategy<Value = Coordinate> {
        (-80.0f64..=80.0, -170.0f64..=170.0).prop_map(|(lat, lon)| Coordinate::new(lat, lon).unwrap())
    }

    proptest! {
        /// Padding only ever grows the box.
        #[test]
        fn padded_box_contains_unpadded(
            pts in prop::collection::vec(coordinate(), 1..20),
            padding in 0.001f64..500.0,
        ) {
            let plain = bounding_box(&pts, 0.0);
            let padded = bounding_box(&pts, padding);
            prop_assert!(padded.contains(&plain));
        }

        #[test]
        fn every_point_inside_its_box(pts in prop::collection::vec(coordinate(), 1..20)) {
            let b = bounding_box(&pts, 0.0);
            for p in &pts {
                let rounded = Coordinate::new(round_to(p.lat(), 6), round_to(p.lon(), 6)).unwrap();
                prop_assert!(b.contains_point(&rounded));
            }
        }

        #[test]
        fn centroid_is_valid(pts in prop::collection::vec(coordinate(), 1..20)) {
            let center = centroid(&pts);
            prop_assert!(Coordinate::is_valid(center.lat(), center.lon()));
        }
    }
}

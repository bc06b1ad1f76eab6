//! Forward azimuth and compass sectors.

use std::fmt;

use serde::Serialize;

use crate::domain::{Coordinate, round_to};

/// Initial bearing from `from` to `to` in degrees, in `[0, 360)`, rounded
/// to 2 decimals.
///
/// # Examples
///
/// ```
/// use toll_routing::domain::Coordinate;
/// use toll_routing::geometry::bearing;
///
/// let origin = Coordinate::new(0.0, 0.0).unwrap();
/// let east = Coordinate::new(0.0, 1.0).unwrap();
/// assert_eq!(bearing(&origin, &east), 90.0);
/// ```
pub fn bearing(from: &Coordinate, to: &Coordinate) -> f64 {
    let lat1 = from.lat_rad();
    let lat2 = to.lat_rad();
    let d_lon = (to.lon() - from.lon()).to_radians();

    let y = d_lon.sin() * lat2.cos();
    let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * d_lon.cos();

    let degrees = (y.atan2(x).to_degrees() + 360.0) % 360.0;
    let rounded = round_to(degrees, 2);

    // 359.996 rounds up to 360.00, which is north again.
    if rounded >= 360.0 { 0.0 } else { rounded }
}

/// One of the eight principal compass points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum CompassDirection {
    N,
    NE,
    E,
    SE,
    S,
    SW,
    W,
    NW,
}

impl CompassDirection {
    const ALL: [CompassDirection; 8] = [
        Self::N,
        Self::NE,
        Self::E,
        Self::SE,
        Self::S,
        Self::SW,
        Self::W,
        Self::NW,
    ];

    /// Map a bearing to its 45° sector.
    ///
    /// Sector boundaries sit at the midpoints and round up, so 22.5° is `NE`
    /// and 337.5° is `N`. Negative and >360 bearings wrap.
    pub fn from_bearing(bearing: f64) -> Self {
        let index = (bearing / 45.0).round() as i64;
        Self::ALL[index.rem_euclid(8) as usize]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::N => "N",
            Self::NE => "NE",
            Self::E => "E",
            Self::SE => "SE",
            Self::S => "S",
            Self::SW => "SW",
            Self::W => "W",
            Self::NW => "NW",
        }
    }
}

impl fmt::Display for CompassDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

//! Coordinate normalization at the system boundary.
//!
//! The mainframe feed mixes two encodings without a type tag:
//!
//! - plain decimal degrees (`-23.5505`)
//! - legacy fixed point, degrees × 10^7 with no decimal point (`-235505000`)
//!
//! Raw values are classified once into a [`RawCoordinate`] by magnitude and
//! resolved to decimal degrees. Everything downstream (geometry, the toll
//! encoder) only ever sees [`Coordinate`](crate::domain::Coordinate).

mod legacy;
mod raw;
mod text;

pub use legacy::{
    LEGACY_SCALE, from_legacy_encoding, to_legacy_encoding, to_legacy_encoding_checked,
};
pub use raw::{RawCoordinate, RawSource, sanitize};
pub use text::{
    format_coordinate, is_valid_coordinate, is_within_region_bounds, normalize_pair,
    parse_free_text,
};

//! Geospatial and toll-routing core.
//!
//! Normalizes coordinates from a legacy fixed-point feed, computes
//! great-circle analytics over them, serializes stops into the XML fragments
//! a SemParar-style toll SOAP service expects, and bounds spend on a paid
//! road-routing API.

pub mod directions;
pub mod domain;
pub mod geometry;
pub mod normalize;
pub mod quota;
pub mod toll;

//! Records returned by the toll routing service.

use serde::Serialize;

/// A toll plaza on a computed route.
///
/// Only ever produced by parsing a service response. Missing text fields
/// are empty and missing numbers are zero; `id` stays `None` when absent
/// so callers can tell a real plaza 0 from a gap in the data.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TollPlaza {
    pub id: Option<i64>,
    /// Plaza name.
    pub name: String,
    pub highway: String,
    /// Kilometre marker on the highway.
    pub km: f64,
    /// Operating concessionaire.
    pub concessionaire: String,
    pub status: i64,
}

/// Reply to a temporary route registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteRegistration {
    /// Route code assigned by the service.
    pub id: i64,
    pub name: String,
    pub status: i64,
}

//! Toll service error types.

/// Failures reported by the toll service inside an otherwise valid reply.
///
/// Malformed or partial data never produces an error; these variants only
/// cover replies the service itself flags as failed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TollError {
    /// Non-zero status code in a routing or registration reply
    #[error("toll service returned status {code}: {message}")]
    Status { code: i64, message: String },

    /// Registration reply had status 0 but no route identifier
    #[error("route registration returned no route id")]
    MissingRouteId,
}

//! Directions client error types.

/// Errors from the Directions HTTP client.
#[derive(Debug, thiserror::Error)]
pub enum DirectionsError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// No API key was configured
    #[error("directions API key not configured")]
    NotConfigured,

    #[error("at least 2 waypoints required")]
    TooFewWaypoints,

    #[error("directions API supports at most {max} waypoints")]
    TooManyWaypoints { max: usize },

    /// Non-success HTTP status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// The API answered but `status` was not `OK`
    #[error("directions API returned status {0}")]
    Status(String),

    /// Failed to parse response JSON
    #[error("JSON parse error: {message}")]
    Json { message: String },

    /// `OK` response without any route
    #[error("no route in directions response")]
    NoRoute,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        assert_eq!(
            DirectionsError::TooManyWaypoints { max: 25 }.to_string(),
            "directions API supports at most 25 waypoints"
        );
        assert_eq!(
            DirectionsError::Status("OVER_QUERY_LIMIT".into()).to_string(),
            "directions API returned status OVER_QUERY_LIMIT"
        );
        let err = DirectionsError::Api {
            status: 403,
            message: "Forbidden".into(),
        };
        assert_eq!(err.to_string(), "API error 403: Forbidden");
    }
}

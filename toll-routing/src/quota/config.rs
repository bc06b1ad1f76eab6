//! Governor configuration.

use rust_decimal::Decimal;

/// Counter namespace used when none is configured.
pub const DEFAULT_SERVICE_ID: &str = "google_maps";

const ENV_DAILY_LIMIT: &str = "MAPS_QUOTA_DAILY_LIMIT";
const ENV_MONTHLY_BUDGET: &str = "MAPS_QUOTA_MONTHLY_BUDGET";
const ENV_COST_PER_REQUEST: &str = "MAPS_QUOTA_COST_PER_REQUEST";
const ENV_ENABLED: &str = "MAPS_QUOTA_ENABLED";

/// Error reading configuration from the environment.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A variable was set but could not be parsed
    #[error("invalid value for {var}: {value:?}")]
    Invalid { var: &'static str, value: String },
}

/// Ceilings and cost model for the governor.
#[derive(Debug, Clone, PartialEq)]
pub struct QuotaConfig {
    /// Namespace for the counters of this API.
    pub service_id: String,

    /// Maximum successful requests per UTC day.
    pub daily_request_limit: u64,

    /// Maximum estimated spend per UTC month, in dollars.
    pub monthly_budget: Decimal,

    /// Estimated cost charged per successful request.
    pub cost_per_request: Decimal,

    /// When false, nothing is rejected (usage is still tracked).
    pub enabled: bool,
}

impl QuotaConfig {
    /// Default ceilings for the given service namespace.
    pub fn new(service_id: impl Into<String>) -> Self {
        Self {
            service_id: service_id.into(),
            ..Self::default()
        }
    }

    pub fn with_daily_limit(mut self, limit: u64) -> Self {
        self.daily_request_limit = limit;
        self
    }

    pub fn with_monthly_budget(mut self, budget: Decimal) -> Self {
        self.monthly_budget = budget;
        self
    }

    pub fn with_cost_per_request(mut self, cost: Decimal) -> Self {
        self.cost_per_request = cost;
        self
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Read overrides from `MAPS_QUOTA_*` environment variables.
    ///
    /// Unset variables keep their defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Like [`from_env`](Self::from_env) with a custom variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(value) = lookup(ENV_DAILY_LIMIT) {
            config.daily_request_limit = parse_var(ENV_DAILY_LIMIT, &value, |v| v.parse().ok())?;
        }
        if let Some(value) = lookup(ENV_MONTHLY_BUDGET) {
            config.monthly_budget = parse_var(ENV_MONTHLY_BUDGET, &value, |v| v.parse().ok())?;
        }
        if let Some(value) = lookup(ENV_COST_PER_REQUEST) {
            config.cost_per_request =
                parse_var(ENV_COST_PER_REQUEST, &value, |v| v.parse().ok())?;
        }
        if let Some(value) = lookup(ENV_ENABLED) {
            config.enabled = parse_var(ENV_ENABLED, &value, parse_bool)?;
        }

        Ok(config)
    }
}

impl Default for QuotaConfig {
    fn default() -> Self {
        Self {
            service_id: DEFAULT_SERVICE_ID.to_string(),
            daily_request_limit: 1000,
            monthly_budget: Decimal::ONE,
            cost_per_request: Decimal::new(5, 3), // $0.005
            enabled: true,
        }
    }
}

fn parse_var<T>(
    var: &'static str,
    value: &str,
    parse: impl Fn(&str) -> Option<T>,
) -> Result<T, ConfigError> {
    parse(value.trim()).ok_or_else(|| ConfigError::Invalid {
        var,
        value: value.to_string(),
    })
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

use std::time::Duration;

/// Environment-driven configuration for a monitoring session
#[derive(Debug, Clone)]
pub struct Config {
    /// Spreadsheet identifier behind the tabular feed
    pub sheet_id: String,
    /// API key for the Sheets values endpoint
    pub sheets_api_key: String,
    /// API key for the weather lookup
    pub weather_api_key: String,
    /// Sheet range to read (default "Sheet1")
    pub sheet_range: String,
    /// Location name for the weather lookup (default "Bengaluru")
    pub weather_location: String,
    /// Poll cadence for the feed cycle (default 10s)
    pub poll_interval: Duration,
    /// Request timeout applied to the shared HTTP client (default 10s)
    pub http_timeout: Duration,
}

impl Config {
    /// Create a new Config instance from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let sheet_id = std::env::var("SHEET_ID")
            .map_err(|_| ConfigError::MissingEnvVar("SHEET_ID".to_string()))?;

        let sheets_api_key = std::env::var("SHEETS_API_KEY")
            .map_err(|_| ConfigError::MissingEnvVar("SHEETS_API_KEY".to_string()))?;

        let weather_api_key = std::env::var("WEATHER_API_KEY")
            .map_err(|_| ConfigError::MissingEnvVar("WEATHER_API_KEY".to_string()))?;

        let sheet_range =
            std::env::var("SHEET_RANGE").unwrap_or_else(|_| "Sheet1".to_string());

        let weather_location =
            std::env::var("WEATHER_LOCATION").unwrap_or_else(|_| "Bengaluru".to_string());

        let poll_interval = duration_var("POLL_INTERVAL_SECS", 10)?;
        let http_timeout = duration_var("HTTP_TIMEOUT_SECS", 10)?;

        Ok(Config {
            sheet_id,
            sheets_api_key,
            weather_api_key,
            sheet_range,
            weather_location,
            poll_interval,
            http_timeout,
        })
    }
}

fn duration_var(name: &str, default_secs: u64) -> Result<Duration, ConfigError> {
    match std::env::var(name) {
        Ok(raw) => raw
            .parse::<u64>()
            .map(Duration::from_secs)
            .map_err(|_| ConfigError::InvalidEnvVar(name.to_string(), raw)),
        Err(_) => Ok(Duration::from_secs(default_secs)),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid value for environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

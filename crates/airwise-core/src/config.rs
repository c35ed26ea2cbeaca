//! Configuration for context sampling

/// Invalid or missing settings. Fatal before any network call.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("GROQ_API_KEY not found. Set it in the environment or a .env file")]
    MissingApiKey,
    #[error("invalid setting {name}: {reason}")]
    InvalidSetting { name: &'static str, reason: String },
}

/// Sampling and prompt configuration
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Max city rows in the prompt (worst city included)
    pub city_cap: usize,

    /// Max station rows in the prompt (worst station included)
    pub station_cap: usize,

    /// Entity names previewed after the totals
    pub preview_names: usize,

    /// Estimated prompt tokens before a warning is logged
    pub prompt_token_budget: usize,

    /// Rows shown by the snapshot view
    pub snapshot_rows: usize,
}

impl Config {
    pub fn new() -> Self {
        Self {
            city_cap: 10,
            station_cap: 15,
            preview_names: 5,
            prompt_token_budget: 6000,
            snapshot_rows: 5,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.city_cap == 0 {
            return Err(ConfigError::InvalidSetting {
                name: "city_cap",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.station_cap == 0 {
            return Err(ConfigError::InvalidSetting {
                name: "station_cap",
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

use std::env;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing environment variable {0}")]
    Missing(&'static str),

    #[error("invalid value for {name}: {value:?}")]
    Invalid { name: &'static str, value: String },
}

/// Process configuration, sourced entirely from the environment (a `.env`
/// file is honored via dotenv before this runs).
#[derive(Debug, Clone)]
pub struct Config {
    pub api_token: String,
    pub user_email: String,
    pub port: u16,
    /// Custom field flagging leads tracked by the web client.
    pub lead_tracking_field_id: u64,
    /// Custom field carrying the marketing funnel label.
    pub marketing_source_field_id: u64,
    /// Directory holding the built single-page app.
    pub static_dir: PathBuf,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            api_token: require("COPPER_API_TOKEN")?,
            user_email: require("COPPER_API_USER_EMAIL")?,
            port: parse_or("PORT", 4000)?,
            lead_tracking_field_id: parse_required("COPPER_LEAD_TRACKING_CUSTOM_FIELD_ID")?,
            marketing_source_field_id: parse_required("COPPER_MARKETING_SOURCE_CUSTOM_FIELD_ID")?,
            static_dir: env::var("STATIC_DIR")
                .unwrap_or_else(|_| "client/build".to_string())
                .into(),
        })
    }
}

fn require(name: &'static str) -> Result<String, ConfigError> {
    env::var(name).map_err(|_| ConfigError::Missing(name))
}

fn parse_required<T: std::str::FromStr>(name: &'static str) -> Result<T, ConfigError> {
    let value = require(name)?;
    value
        .parse()
        .map_err(|_| ConfigError::Invalid { name, value })
}

fn parse_or<T: std::str::FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(value) => value
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
        Err(_) => Ok(default),
    }
}

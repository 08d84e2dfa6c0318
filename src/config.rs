//! Application Configuration
//!
//! Values are baked in at compile time (`MANAGEME_API_URL`,
//! `MANAGEME_LOG_LEVEL`); the browser bundle has no runtime config file.

use std::str::FromStr;

use log::LevelFilter;

/// Browser storage key holding the session token
pub const TOKEN_KEY: &str = "token";

/// Browser storage key holding the dark-mode flag
pub const THEME_KEY: &str = "darkMode";

const DEFAULT_API_URL: &str = "http://localhost:5000";
const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::Info;

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Backend base URL without trailing slash
    pub api_url: String,
    pub log_level: LevelFilter,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_values(None, None)
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_values(option_env!("MANAGEME_API_URL"), option_env!("MANAGEME_LOG_LEVEL"))
    }

    pub fn from_values(api_url: Option<&str>, log_level: Option<&str>) -> Self {
        let api_url = api_url
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .unwrap_or(DEFAULT_API_URL)
            .trim_end_matches('/')
            .to_string();

        let log_level = log_level
            .and_then(|level| LevelFilter::from_str(level.trim()).ok())
            .unwrap_or(DEFAULT_LOG_LEVEL);

        Self { api_url, log_level }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::from_values(None, None);
        assert_eq!(config.api_url, "http://localhost:5000");
        assert_eq!(config.log_level, LevelFilter::Info);
    }

    #[test]
    fn test_trailing_slash_and_level_parsing() {
        let config = AppConfig::from_values(Some(" https://api.example.com/v1/ "), Some("DEBUG"));
        assert_eq!(config.api_url, "https://api.example.com/v1");
        assert_eq!(config.log_level, LevelFilter::Debug);
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let config = AppConfig::from_values(Some("   "), Some("loud"));
        assert_eq!(config.api_url, "http://localhost:5000");
        assert_eq!(config.log_level, LevelFilter::Info);
    }
}

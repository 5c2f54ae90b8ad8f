//! Runtime configuration loaded from `gios.toml`.
//!
//! Every section and field has a default, so an absent or partial file is
//! valid. Sections: `[api]`, `[geocoder]`, `[cache]`, `[chart]`, `[logging]`.

use crate::{Error, Period};
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "gios.toml";

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub geocoder: GeocoderConfig,
    pub cache: CacheConfig,
    pub chart: ChartConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_seconds: u64,
    pub https_only: bool,
    pub user_agent: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct GeocoderConfig {
    pub url: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct CacheConfig {
    pub dir: PathBuf,
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct ChartConfig {
    /// Hours shown on the chart: 0 (all), 24, 72 or 168.
    pub period: Period,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: crate::BASE_URL.to_string(),
            timeout_seconds: 60,
            https_only: true,
            user_agent: format!("gios/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl Default for GeocoderConfig {
    fn default() -> Self {
        Self {
            url: crate::GEOCODER_URL.to_string(),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("cache"),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::ConfigError(format!("Failed to read {} ({}).", path.display(), e))
        })?;
        Self::parse(&content)
            .map_err(|e| Error::ConfigError(format!("Failed to parse {} ({}).", path.display(), e)))
    }

    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Load `gios.toml` from `.` or `config/`, with default fallback when
    /// neither exists. A file that exists but does not load is an error.
    pub fn load_or_default() -> Result<Self, Error> {
        Self::load_first(&[
            PathBuf::from(CONFIG_FILE),
            PathBuf::from("config").join(CONFIG_FILE),
        ])
    }

    pub fn load_first(paths: &[PathBuf]) -> Result<Self, Error> {
        match paths.iter().find(|path| path.exists()) {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.api.timeout_seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_is_default() {
        let config = Config::parse("").unwrap();
        assert_eq!(config.api.base_url, crate::BASE_URL);
        assert_eq!(config.api.timeout_seconds, 60);
        assert!(config.api.https_only);
        assert_eq!(config.cache.dir, PathBuf::from("cache"));
        assert_eq!(config.chart.period, Period::All);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn partial_sections() {
        let config = Config::parse(
            r#"
            [api]
            base_url = "http://localhost:8080/rest"
            https_only = false

            [chart]
            period = 72

            [logging]
            level = "debug"
            "#,
        )
        .unwrap();
        assert_eq!(config.api.base_url, "http://localhost:8080/rest");
        assert!(!config.api.https_only);
        assert_eq!(config.api.timeout_seconds, 60);
        assert_eq!(config.chart.period, Period::ThreeDays);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.geocoder.url, crate::GEOCODER_URL);
    }

    #[test]
    fn unknown_period_is_rejected() {
        assert!(Config::parse("[chart]\nperiod = 12\n").is_err());
    }

    #[test]
    fn broken_file_is_not_replaced_by_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let broken = dir.path().join(CONFIG_FILE);
        std::fs::write(&broken, "[api\nhttps_only = false\n").unwrap();
        let missing = dir.path().join("missing.toml");

        let err = Config::load_first(&[missing, broken]).unwrap_err();
        assert!(matches!(err, Error::ConfigError(_)));
    }

    #[test]
    fn first_existing_file_wins() {
        let dir = tempfile::tempdir().unwrap();
        let first = dir.path().join("first.toml");
        let second = dir.path().join("second.toml");
        std::fs::write(&first, "[logging]\nlevel = \"warn\"\n").unwrap();
        std::fs::write(&second, "[logging]\nlevel = \"debug\"\n").unwrap();

        let config = Config::load_first(&[dir.path().join("none.toml"), first, second]).unwrap();
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn no_file_means_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_first(&[dir.path().join(CONFIG_FILE)]).unwrap();
        assert_eq!(config.api.base_url, crate::BASE_URL);
    }

    #[test]
    fn missing_file_is_a_config_error() {
        let err = Config::load("/nonexistent/gios.toml").unwrap_err();
        assert!(matches!(err, Error::ConfigError(_)));
    }
}

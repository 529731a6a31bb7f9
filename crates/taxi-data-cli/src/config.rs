use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use taxi_data::{FetchOptions, TRIP_DATA_BASE_URL};
use taxi_data_http::{HttpConfig, WeatherRequest};

/// Top-level application configuration. Every field is optional in the file.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    /// Where downloaded files go. Relative paths resolve against the
    /// working directory.
    pub save_dir: PathBuf,
    /// Trip-data year when `--year` is not given.
    pub year: Option<i32>,
    /// Base URL the monthly trip files are published under.
    pub base_url: String,
    /// Per-request timeout. Unset waits indefinitely.
    pub timeout_secs: Option<u64>,
    /// Attempts per file, including the first.
    pub max_attempts: u32,
    pub weather: WeatherConfig,
}

/// Defaults for the weather download.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct WeatherConfig {
    pub latitude: f64,
    pub longitude: f64,
    pub time_zone: Option<String>,
    pub filename: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            save_dir: PathBuf::from("data"),
            year: None,
            base_url: TRIP_DATA_BASE_URL.into(),
            timeout_secs: None,
            max_attempts: 1,
            weather: WeatherConfig::default(),
        }
    }
}

impl Default for WeatherConfig {
    fn default() -> Self {
        let request = WeatherRequest::default();
        Self {
            latitude: request.latitude,
            longitude: request.longitude,
            time_zone: request.time_zone,
            filename: request.filename,
        }
    }
}

impl AppConfig {
    pub fn http_config(&self) -> HttpConfig {
        HttpConfig {
            timeout: self.timeout_secs.map(Duration::from_secs),
            ..HttpConfig::default()
        }
    }

    pub fn fetch_options(&self) -> FetchOptions {
        FetchOptions::with_max_attempts(self.max_attempts)
    }

    pub fn weather_request(&self, save_dir: &Path) -> WeatherRequest {
        WeatherRequest {
            start_date: None,
            end_date: None,
            latitude: self.weather.latitude,
            longitude: self.weather.longitude,
            time_zone: self.weather.time_zone.clone(),
            save_dir: save_dir.to_path_buf(),
            filename: self.weather.filename.clone(),
        }
    }
}

/// Config file path: `~/.config/taxi-data-fetcher/config.toml`
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("taxi-data-fetcher").join("config.toml"))
}

/// Load config from `explicit` or the default location, falling back to
/// defaults if the file is missing or unreadable.
pub fn load_config(explicit: Option<&Path>) -> AppConfig {
    let path = match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => config_path(),
    };

    if let Some(path) = path {
        match std::fs::read_to_string(&path) {
            Ok(contents) => match toml::from_str::<AppConfig>(&contents) {
                Ok(config) => return config,
                Err(e) => tracing::warn!(
                    path = %path.display(),
                    "failed to parse config, using defaults: {e}"
                ),
            },
            Err(e) if explicit.is_some() => tracing::warn!(
                path = %path.display(),
                "failed to read config, using defaults: {e}"
            ),
            Err(_) => {}
        }
    }

    AppConfig::default()
}

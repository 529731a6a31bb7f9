use std::path::{Path, PathBuf};

use chrono::{Datelike, NaiveDate};
use taxi_data::FetchError;
use tracing::info;

use crate::client::{HttpConfig, download_to_file};

/// Open-Meteo historical weather endpoint.
pub const WEATHER_ARCHIVE_URL: &str = "https://archive-api.open-meteo.com/v1/archive";

/// WMO weather interpretation codes, pinned to a fixed gist revision.
pub const WEATHER_CODES_URL: &str = "https://gist.githubusercontent.com/stellasphere/9490c195ed2b53c707087c8c2db4ec0c/raw/76b0cb0ef0bfd8a2ec988aa54e30ecd1b483495d/descriptions.json";

const WEATHER_CODES_FILENAME: &str = "weather_codes.json";
const HOURLY_VARIABLES: &str = "temperature_2m,weather_code,is_day";

/// Parameters for an hourly weather download. Defaults target New York City.
#[derive(Debug, Clone)]
pub struct WeatherRequest {
    /// Defaults per [`default_date_window`].
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub latitude: f64,
    pub longitude: f64,
    /// IANA zone name. `None` or empty returns UTC timestamps.
    pub time_zone: Option<String>,
    pub save_dir: PathBuf,
    pub filename: String,
}

impl Default for WeatherRequest {
    fn default() -> Self {
        Self {
            start_date: None,
            end_date: None,
            latitude: 40.7128,
            longitude: -74.006,
            time_zone: Some("America/New_York".into()),
            save_dir: PathBuf::from("data"),
            filename: "weather.json".into(),
        }
    }
}

impl WeatherRequest {
    /// Start and end dates, filling gaps from [`default_date_window`].
    pub fn date_range(&self, today: NaiveDate) -> Result<(NaiveDate, NaiveDate), FetchError> {
        let (default_start, default_end) = default_date_window(today);
        let start = self.start_date.unwrap_or(default_start);
        let end = self.end_date.unwrap_or(default_end);

        if start > end {
            return Err(FetchError::InvalidParameter(format!(
                "start date {start} is after end date {end}"
            )));
        }
        Ok((start, end))
    }
}

/// Weather window lined up with the taxi data: the current year so far once
/// March has begun, otherwise the whole previous year.
pub fn default_date_window(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    let year = today.year();
    if today.month() >= 3 {
        (first_of_year(year), today)
    } else {
        (
            first_of_year(year - 1),
            NaiveDate::from_ymd_opt(year - 1, 12, 31).unwrap_or(today),
        )
    }
}

fn first_of_year(year: i32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, 1, 1).unwrap_or_default()
}

/// HTTP client for the single-file weather downloads.
pub struct WeatherClient {
    client: reqwest::Client,
    archive_url: String,
    codes_url: String,
}

impl WeatherClient {
    pub fn new(config: &HttpConfig) -> Result<Self, FetchError> {
        Ok(Self {
            client: config.build_client()?,
            archive_url: WEATHER_ARCHIVE_URL.into(),
            codes_url: WEATHER_CODES_URL.into(),
        })
    }

    pub fn with_archive_url(mut self, url: impl Into<String>) -> Self {
        self.archive_url = url.into();
        self
    }

    pub fn with_codes_url(mut self, url: impl Into<String>) -> Self {
        self.codes_url = url.into();
        self
    }

    /// Full query URL for `request`, resolving default dates against `today`.
    pub fn archive_query_url(
        &self,
        request: &WeatherRequest,
        today: NaiveDate,
    ) -> Result<String, FetchError> {
        let (start, end) = request.date_range(today)?;

        let mut params = vec![
            ("latitude", request.latitude.to_string()),
            ("longitude", request.longitude.to_string()),
            ("start_date", start.format("%Y-%m-%d").to_string()),
            ("end_date", end.format("%Y-%m-%d").to_string()),
            ("hourly", HOURLY_VARIABLES.to_owned()),
        ];
        if let Some(tz) = request.time_zone.as_deref().filter(|tz| !tz.is_empty()) {
            params.push(("timezone", tz.to_owned()));
        }

        reqwest::Url::parse_with_params(&self.archive_url, &params)
            .map(String::from)
            .map_err(|e| {
                FetchError::InvalidParameter(format!("bad weather URL {}: {e}", self.archive_url))
            })
    }

    /// Download hourly observations and save them as
    /// `<save_dir>/<filename>`. Returns the saved path.
    pub async fn download_weather_data(
        &self,
        request: &WeatherRequest,
        today: NaiveDate,
    ) -> Result<PathBuf, FetchError> {
        let url = self.archive_query_url(request, today)?;
        let path = request.save_dir.join(&request.filename);

        create_save_dir(&request.save_dir).await?;
        download_to_file(&self.client, &url, &path).await?;

        info!(path = %path.display(), "saved weather data");
        Ok(path)
    }

    /// Download the weather code lookup table to `<save_dir>/weather_codes.json`.
    pub async fn download_weather_codes(&self, save_dir: &Path) -> Result<PathBuf, FetchError> {
        let path = save_dir.join(WEATHER_CODES_FILENAME);

        create_save_dir(save_dir).await?;
        download_to_file(&self.client, &self.codes_url, &path).await?;

        info!(path = %path.display(), "saved weather codes");
        Ok(path)
    }
}

async fn create_save_dir(dir: &Path) -> Result<(), FetchError> {
    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|e| FetchError::filesystem(dir, e))
}

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use taxi_data_http::WeatherClient;

use crate::config::AppConfig;

/// Command-line overrides for the weather download.
#[derive(Debug, Default, Clone)]
pub struct WeatherOverrides {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub time_zone: Option<String>,
    pub filename: Option<String>,
}

pub async fn run(config: &AppConfig, save_dir: &Path, overrides: WeatherOverrides) -> Result<()> {
    let mut request = config.weather_request(save_dir);
    request.start_date = overrides.start;
    request.end_date = overrides.end;
    if let Some(latitude) = overrides.latitude {
        request.latitude = latitude;
    }
    if let Some(longitude) = overrides.longitude {
        request.longitude = longitude;
    }
    if let Some(time_zone) = overrides.time_zone {
        request.time_zone = Some(time_zone);
    }
    if let Some(filename) = overrides.filename {
        request.filename = filename;
    }

    let client = WeatherClient::new(&config.http_config())?;
    let path = client
        .download_weather_data(&request, Local::now().date_naive())
        .await
        .context("weather download failed")?;

    println!("Saved weather data to: {}", path.display());
    Ok(())
}

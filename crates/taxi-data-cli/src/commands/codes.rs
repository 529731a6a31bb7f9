use std::path::Path;

use anyhow::{Context, Result};
use taxi_data_http::WeatherClient;

use crate::config::AppConfig;

pub async fn run(config: &AppConfig, save_dir: &Path) -> Result<()> {
    let client = WeatherClient::new(&config.http_config())?;
    let path = client
        .download_weather_codes(save_dir)
        .await
        .context("weather code download failed")?;

    println!("Saved weather codes to: {}", path.display());
    Ok(())
}

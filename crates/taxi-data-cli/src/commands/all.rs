use std::path::Path;

use anyhow::Result;

use super::weather::WeatherOverrides;
use crate::config::AppConfig;

/// Trip data first, then weather observations, then the weather code table.
pub async fn run(config: &AppConfig, year: Option<i32>, save_dir: &Path) -> Result<()> {
    super::taxi::run(config, year, Vec::new(), save_dir).await?;
    super::weather::run(config, save_dir, WeatherOverrides::default()).await?;
    super::codes::run(config, save_dir).await
}

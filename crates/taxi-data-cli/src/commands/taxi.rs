use std::path::Path;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use taxi_data::{Feedback, Locator, resolve_locators_with_base};
use taxi_data_http::download_taxi_data;

use super::print_feedback;
use crate::config::AppConfig;

/// Explicit URLs win; otherwise resolve the monthly files for `year`.
pub fn select_locators(
    config: &AppConfig,
    year: Option<i32>,
    urls: Vec<String>,
    today: NaiveDate,
) -> Result<(Vec<Locator>, Option<Feedback>)> {
    if !urls.is_empty() {
        return Ok((urls.into_iter().map(Locator::from).collect(), None));
    }

    let plan = resolve_locators_with_base(&config.base_url, year.or(config.year), today)?;
    Ok((plan.locators, plan.notice))
}

/// Download the trip-data batch, printing one progress line per file.
pub async fn run(
    config: &AppConfig,
    year: Option<i32>,
    urls: Vec<String>,
    save_dir: &Path,
) -> Result<()> {
    let (locators, notice) = select_locators(config, year, urls, Local::now().date_naive())?;
    if let Some(notice) = notice {
        print_feedback(&[notice]);
    }

    println!(
        "Downloading {} files to {}...",
        locators.len(),
        save_dir.display()
    );

    let result = download_taxi_data(
        &locators,
        save_dir,
        &config.http_config(),
        config.fetch_options(),
    )
    .await
    .context("taxi data download failed")?;

    print_feedback(&result.feedback);
    for line in result.progress_lines() {
        println!("{line}");
    }

    Ok(())
}

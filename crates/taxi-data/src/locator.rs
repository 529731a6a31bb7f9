use std::fmt;

use chrono::{Datelike, NaiveDate};

use crate::error::FetchError;
use crate::feedback::Feedback;

/// Where the monthly Yellow Taxi trip files are published.
pub const TRIP_DATA_BASE_URL: &str = "https://d37ci6vzurychx.cloudfront.net/trip-data";

/// First year with published trip data.
pub const EARLIEST_YEAR: i32 = 2009;

/// Files appear about two months after the month they cover. One extra
/// month of margin keeps us from requesting files that do not exist yet.
pub const REPORTING_LAG_MONTHS: u32 = 3;

/// Address of a single remote file.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Locator(String);

impl Locator {
    pub fn new(uri: impl Into<String>) -> Self {
        Self(uri.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Final path segment of the URI, used verbatim as the on-disk file name.
    ///
    /// Query strings and fragments are not part of the path. A URI without
    /// a path, or whose path ends in `/`, has no usable name.
    pub fn file_name(&self) -> Result<&str, FetchError> {
        let path = self.0.split(['?', '#']).next().unwrap_or_default();
        let without_scheme = path.split_once("://").map_or(path, |(_, rest)| rest);

        without_scheme
            .split_once('/')
            .and_then(|(_, resource)| resource.rsplit('/').next())
            .filter(|name| !name.is_empty())
            .ok_or_else(|| {
                FetchError::InvalidParameter(format!("locator has no file name: {}", self.0))
            })
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Locator {
    fn from(uri: &str) -> Self {
        Self::new(uri)
    }
}

impl From<String> for Locator {
    fn from(uri: String) -> Self {
        Self(uri)
    }
}

/// The outcome of resolving which monthly files to request.
#[derive(Debug, Clone)]
pub struct LocatorPlan {
    /// Year the locators point at. Differs from the requested year when
    /// the fallback to the previous year kicked in.
    pub year: i32,
    /// Last month included, 1-based.
    pub end_month: u32,
    /// One locator per month, January first.
    pub locators: Vec<Locator>,
    /// Set when the requested year was swapped for the previous one.
    pub notice: Option<Feedback>,
}

/// Locator for one month of trip data under `base_url`.
pub fn trip_data_locator(base_url: &str, year: i32, month: u32) -> Locator {
    Locator::new(format!(
        "{}/yellow_tripdata_{year}-{month:02}.parquet",
        base_url.trim_end_matches('/'),
    ))
}

/// Resolve the monthly trip-data locators for `year`, as of `today`.
pub fn resolve_locators(year: Option<i32>, today: NaiveDate) -> Result<LocatorPlan, FetchError> {
    resolve_locators_with_base(TRIP_DATA_BASE_URL, year, today)
}

/// Resolve locators against a mirror of the publisher's layout.
///
/// When `year` is the current year, only months at least
/// [`REPORTING_LAG_MONTHS`] old are requested. Early in the year that leaves
/// nothing, so the whole previous year is requested instead and a notice
/// is attached to the plan.
pub fn resolve_locators_with_base(
    base_url: &str,
    year: Option<i32>,
    today: NaiveDate,
) -> Result<LocatorPlan, FetchError> {
    let current_year = today.year();
    let mut year = year.unwrap_or(current_year);

    if !(EARLIEST_YEAR..=current_year).contains(&year) {
        return Err(FetchError::InvalidParameter(format!(
            "year must be >= {EARLIEST_YEAR} and <= {current_year}, but {year} was given"
        )));
    }

    let mut end_month = 12;
    let mut notice = None;

    if year == current_year {
        if today.month() <= REPORTING_LAG_MONTHS {
            year = current_year - 1;
            notice = Some(Feedback::info(format!(
                "The current year was requested, but data may not yet be available. \
                 Using last year ({year}) instead."
            )));
        } else {
            end_month = today.month() - REPORTING_LAG_MONTHS;
        }
    }

    let locators = (1..=end_month)
        .map(|month| trip_data_locator(base_url, year, month))
        .collect();

    Ok(LocatorPlan {
        year,
        end_month,
        locators,
        notice,
    })
}

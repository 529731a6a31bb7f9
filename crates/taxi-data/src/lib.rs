pub mod batch;
pub mod error;
pub mod feedback;
pub mod fetch;
pub mod locator;

pub use batch::{BatchEntry, BatchResult, format_progress};
pub use error::FetchError;
pub use feedback::Feedback;
pub use fetch::{FetchOptions, ResourceFetcher, fetch_all};
pub use locator::{
    EARLIEST_YEAR, Locator, LocatorPlan, REPORTING_LAG_MONTHS, TRIP_DATA_BASE_URL,
    resolve_locators, resolve_locators_with_base, trip_data_locator,
};

#[cfg(test)]
pub mod test_support;

pub mod client;
pub mod weather;

pub use client::{HttpConfig, HttpFetcher, download_taxi_data};
pub use weather::{
    WEATHER_ARCHIVE_URL, WEATHER_CODES_URL, WeatherClient, WeatherRequest, default_date_window,
};

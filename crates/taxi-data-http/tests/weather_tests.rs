use chrono::NaiveDate;
use taxi_data::FetchError;
use taxi_data_http::{HttpConfig, WeatherClient, WeatherRequest};
use wiremock::matchers::{method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

const WEATHER_BODY: &str = r#"{"latitude":40.71,"longitude":-74.0,"hourly":{"time":["2024-01-01T00:00"],"temperature_2m":[3.1],"weather_code":[3],"is_day":[0]}}"#;
const CODES_BODY: &str = r#"{"0":{"day":{"description":"Sunny"},"night":{"description":"Clear"}}}"#;

fn client_for(server: &MockServer) -> WeatherClient {
    WeatherClient::new(&HttpConfig::default())
        .unwrap()
        .with_archive_url(format!("{}/v1/archive", server.uri()))
        .with_codes_url(format!("{}/codes/descriptions.json", server.uri()))
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

#[tokio::test]
async fn weather_download_saves_body_with_default_window() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/archive"))
        .and(query_param("latitude", "40.7128"))
        .and(query_param("longitude", "-74.006"))
        .and(query_param("start_date", "2024-01-01"))
        .and(query_param("end_date", "2024-08-15"))
        .and(query_param("hourly", "temperature_2m,weather_code,is_day"))
        .and(query_param("timezone", "America/New_York"))
        .respond_with(ResponseTemplate::new(200).set_body_string(WEATHER_BODY))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let request = WeatherRequest {
        save_dir: dir.path().join("data"),
        ..Default::default()
    };

    let saved = client_for(&server)
        .download_weather_data(&request, date(2024, 8, 15))
        .await
        .unwrap();

    assert_eq!(saved, dir.path().join("data").join("weather.json"));
    assert_eq!(std::fs::read_to_string(&saved).unwrap(), WEATHER_BODY);
}

#[tokio::test]
async fn weather_download_uses_previous_year_early_in_year() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/archive"))
        .and(query_param("start_date", "2023-01-01"))
        .and(query_param("end_date", "2023-12-31"))
        .and(query_param_is_missing("timezone"))
        .respond_with(ResponseTemplate::new(200).set_body_string(WEATHER_BODY))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let request = WeatherRequest {
        time_zone: None,
        save_dir: dir.path().to_path_buf(),
        filename: "nyc.json".into(),
        ..Default::default()
    };

    let saved = client_for(&server)
        .download_weather_data(&request, date(2024, 2, 10))
        .await
        .unwrap();

    assert_eq!(saved, dir.path().join("nyc.json"));
}

#[tokio::test]
async fn weather_error_status_is_reported() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/archive"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let request = WeatherRequest {
        save_dir: dir.path().to_path_buf(),
        ..Default::default()
    };

    let result = client_for(&server)
        .download_weather_data(&request, date(2024, 8, 15))
        .await;

    assert!(matches!(
        result,
        Err(FetchError::RemoteStatus { status: 429, .. })
    ));
    assert!(!dir.path().join("weather.json").exists());
}

#[tokio::test]
async fn weather_codes_saved_under_fixed_name() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/codes/descriptions.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string(CODES_BODY))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let save_dir = dir.path().join("fresh");

    let saved = client_for(&server)
        .download_weather_codes(&save_dir)
        .await
        .unwrap();

    assert_eq!(saved, save_dir.join("weather_codes.json"));
    assert_eq!(std::fs::read_to_string(&saved).unwrap(), CODES_BODY);
}

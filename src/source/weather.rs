//! Weather providers.
//!
//! Primary: [Open-Meteo](https://open-meteo.com/) current conditions, keyed
//! by coordinates.  Alternate: weatherapi.com's public demo key, keyed by
//! city name.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use super::{http, DataItem, Provider};
use crate::error::ProviderError;

const OPEN_METEO_URL: &str = "https://api.open-meteo.com/v1/forecast";
const WEATHER_API_URL: &str = "https://api.weatherapi.com/v1/current.json";

/// Where to report the weather for.
#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    pub city: String,
    pub latitude: f64,
    pub longitude: f64,
    /// IANA zone name, e.g. `Asia/Kolkata`.
    pub timezone: String,
}

/// Description for a WMO weather interpretation code.
pub fn describe_code(code: u32) -> &'static str {
    match code {
        0 => "☀️ Clear sky",
        1 => "🌤️ Mainly clear",
        2 => "⛅ Partly cloudy",
        3 => "☁️ Overcast",
        45 => "🌫️ Foggy",
        48 => "🌫️ Rime fog",
        51 => "🌦️ Light drizzle",
        53 => "🌦️ Moderate drizzle",
        55 => "🌦️ Dense drizzle",
        61 => "🌧️ Slight rain",
        63 => "🌧️ Moderate rain",
        65 => "🌧️ Heavy rain",
        80 | 81 => "🌦️ Rain showers",
        82 => "🌦️ Violent rain showers",
        95 => "⛈️ Thunderstorm",
        96 | 99 => "⛈️ Thunderstorm with hail",
        _ => "🌡️ Unknown weather",
    }
}

/// Whole degrees, with halves rounded towards positive infinity.
///
/// -2.5 becomes -2 and -0.4 becomes 0 (never `-0`).
fn whole_degrees(celsius: f64) -> i64 {
    (celsius + 0.5).floor() as i64
}

// ---------------------------------------------------------------------------
// Open-Meteo
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct OpenMeteoBody {
    current: OpenMeteoCurrent,
}

#[derive(Debug, Deserialize)]
struct OpenMeteoCurrent {
    temperature_2m: f64,
    relative_humidity_2m: f64,
    weather_code: u32,
}

pub struct OpenMeteo {
    client: Client,
    location: Location,
}

impl OpenMeteo {
    pub fn new(client: Client, location: Location) -> Self {
        Self { client, location }
    }

    pub fn to_item(body: &OpenMeteoBody, city: &str) -> DataItem {
        let current = &body.current;
        DataItem::new(
            format!("🌤️ Weather in {city}"),
            format!(
                "{}<br>Temperature: {}°C<br>Humidity: {}%",
                describe_code(current.weather_code),
                whole_degrees(current.temperature_2m),
                current.relative_humidity_2m,
            ),
        )
    }
}

#[async_trait]
impl Provider for OpenMeteo {
    fn name(&self) -> &str {
        "open-meteo"
    }

    async fn fetch(&self) -> Result<DataItem, ProviderError> {
        let latitude = self.location.latitude.to_string();
        let longitude = self.location.longitude.to_string();
        let body: OpenMeteoBody = http::get_json(
            &self.client,
            OPEN_METEO_URL,
            &[
                ("latitude", latitude.as_str()),
                ("longitude", longitude.as_str()),
                ("current", "temperature_2m,relative_humidity_2m,weather_code"),
                ("timezone", self.location.timezone.as_str()),
            ],
        )
        .await?;
        Ok(Self::to_item(&body, &self.location.city))
    }
}

// ---------------------------------------------------------------------------
// weatherapi.com
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct WeatherApiBody {
    current: WeatherApiCurrent,
}

#[derive(Debug, Deserialize)]
struct WeatherApiCurrent {
    condition: WeatherApiCondition,
    temp_c: f64,
    feelslike_c: f64,
}

#[derive(Debug, Deserialize)]
struct WeatherApiCondition {
    text: String,
}

pub struct WeatherApi {
    client: Client,
    city: String,
}

impl WeatherApi {
    pub fn new(client: Client, city: impl Into<String>) -> Self {
        Self {
            client,
            city: city.into(),
        }
    }

    pub fn to_item(body: &WeatherApiBody) -> DataItem {
        let current = &body.current;
        DataItem::new(
            "🌤️ Current Weather",
            format!(
                "{}<br>Temperature: {}°C<br>Feels like: {}°C",
                current.condition.text,
                whole_degrees(current.temp_c),
                whole_degrees(current.feelslike_c),
            ),
        )
    }
}

#[async_trait]
impl Provider for WeatherApi {
    fn name(&self) -> &str {
        "weatherapi"
    }

    async fn fetch(&self) -> Result<DataItem, ProviderError> {
        let body: WeatherApiBody = http::get_json(
            &self.client,
            WEATHER_API_URL,
            &[("key", "demo"), ("q", self.city.as_str()), ("aqi", "no")],
        )
        .await?;
        Ok(Self::to_item(&body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_meteo_formats_current_conditions() {
        let body: OpenMeteoBody = http::decode(
            br#"{
                "latitude": 26.875,
                "current": {
                    "time": "2026-10-18T12:00",
                    "temperature_2m": 27.6,
                    "relative_humidity_2m": 65,
                    "weather_code": 2
                }
            }"#,
        )
        .unwrap();

        let item = OpenMeteo::to_item(&body, "Lucknow");
        assert_eq!(item.title(), "🌤️ Weather in Lucknow");
        assert_eq!(
            item.content(),
            "⛅ Partly cloudy<br>Temperature: 28°C<br>Humidity: 65%"
        );
    }

    #[test]
    fn open_meteo_missing_current_is_malformed() {
        let err = http::decode::<OpenMeteoBody>(br#"{"error": true, "reason": "bad"}"#).unwrap_err();
        assert!(matches!(err, ProviderError::Malformed(_)));
    }

    #[test]
    fn unknown_code_has_generic_description() {
        assert_eq!(describe_code(7), "🌡️ Unknown weather");
        assert_eq!(describe_code(99), "⛈️ Thunderstorm with hail");
    }

    #[test]
    fn weather_api_rounds_temperatures() {
        let body: WeatherApiBody = http::decode(
            br#"{
                "location": {"name": "Lucknow"},
                "current": {
                    "temp_c": 31.4,
                    "feelslike_c": 35.5,
                    "condition": {"text": "Sunny", "code": 1000}
                }
            }"#,
        )
        .unwrap();

        let item = WeatherApi::to_item(&body);
        assert_eq!(item.title(), "🌤️ Current Weather");
        assert_eq!(
            item.content(),
            "Sunny<br>Temperature: 31°C<br>Feels like: 36°C"
        );
    }

    #[test]
    fn sub_zero_temperatures_round_half_up() {
        let body: WeatherApiBody = http::decode(
            br#"{
                "current": {
                    "temp_c": -0.4,
                    "feelslike_c": -2.5,
                    "condition": {"text": "Snow", "code": 1219}
                }
            }"#,
        )
        .unwrap();

        assert_eq!(
            WeatherApi::to_item(&body).content(),
            "Snow<br>Temperature: 0°C<br>Feels like: -2°C"
        );
    }

    #[test]
    fn open_meteo_never_shows_negative_zero() {
        let body: OpenMeteoBody = http::decode(
            br#"{"current": {"temperature_2m": -0.4, "relative_humidity_2m": 90, "weather_code": 71}}"#,
        )
        .unwrap();

        assert_eq!(
            OpenMeteo::to_item(&body, "Oslo").content(),
            "🌡️ Unknown weather<br>Temperature: 0°C<br>Humidity: 90%"
        );
    }

    #[test]
    fn whole_degrees_matches_half_up_rounding() {
        assert_eq!(whole_degrees(27.5), 28);
        assert_eq!(whole_degrees(-2.5), -2);
        assert_eq!(whole_degrees(-2.6), -3);
        assert_eq!(whole_degrees(-0.4), 0);
    }

    #[test]
    fn weather_api_error_body_is_malformed() {
        let err = http::decode::<WeatherApiBody>(
            br#"{"error": {"code": 2006, "message": "API key is invalid."}}"#,
        )
        .unwrap_err();
        assert!(matches!(err, ProviderError::Malformed(_)));
    }

    #[test]
    fn names_identify_providers() {
        let client = Client::new();
        let location = Location {
            city: "Lucknow".into(),
            latitude: 26.85,
            longitude: 80.95,
            timezone: "Asia/Kolkata".into(),
        };
        assert_eq!(OpenMeteo::new(client.clone(), location).name(), "open-meteo");
        assert_eq!(WeatherApi::new(client, "Lucknow").name(), "weatherapi");
    }
}

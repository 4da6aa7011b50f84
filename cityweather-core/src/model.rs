use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A city as served by the backend API (and by the static demo table).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct City {
    pub city_id: u32,
    pub city_name: String,
    pub state_code: String,
    pub country_code: String,
    pub country_full: String,
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

impl From<&City> for Coordinates {
    fn from(city: &City) -> Self {
        Self { lat: city.lat, lon: city.lon }
    }
}

/// Anything a weather lookup can be issued for.
pub trait Locate {
    fn coordinates(&self) -> Coordinates;
}

impl Locate for Coordinates {
    fn coordinates(&self) -> Coordinates {
        *self
    }
}

impl Locate for City {
    fn coordinates(&self) -> Coordinates {
        Coordinates::from(self)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherCondition {
    pub id: u32,
    pub main: String,
    pub description: String,
    pub icon: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyTemperature {
    pub day: f64,
    pub min: f64,
    pub max: f64,
    pub night: f64,
    pub eve: f64,
    pub morn: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyFeelsLike {
    pub day: f64,
    pub night: f64,
    pub eve: f64,
    pub morn: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyForecast {
    pub dt: i64,
    pub sunrise: i64,
    pub sunset: i64,
    pub moonrise: i64,
    pub moonset: i64,
    pub moon_phase: f64,
    pub temp: DailyTemperature,
    pub feels_like: DailyFeelsLike,
    pub pressure: f64,
    pub humidity: f64,
    pub dew_point: f64,
    pub wind_speed: f64,
    pub wind_deg: f64,
    /// Not reported on calm days.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wind_gust: Option<f64>,
    pub weather: Vec<WeatherCondition>,
    pub clouds: f64,
    pub pop: f64,
    pub uvi: f64,
}

impl DailyForecast {
    pub fn date(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.dt, 0)
    }

    /// Description of the first reported condition, if any.
    pub fn condition(&self) -> Option<&str> {
        self.weather.first().map(|w| w.description.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlyForecast {
    pub dt: i64,
    pub temp: f64,
    pub feels_like: f64,
    pub pressure: f64,
    pub humidity: f64,
    pub dew_point: f64,
    pub uvi: f64,
    pub clouds: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visibility: Option<f64>,
    pub wind_speed: f64,
    pub wind_deg: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wind_gust: Option<f64>,
    pub weather: Vec<WeatherCondition>,
    pub pop: f64,
}

impl HourlyForecast {
    pub fn time(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.dt, 0)
    }
}

/// Typed view of a `/onecall` body with `current`, `minutely` and `alerts`
/// excluded. Fields the weather API adds beyond these are kept only in
/// [`WeatherData::raw`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    pub lat: f64,
    pub lon: f64,
    pub timezone: String,
    pub timezone_offset: i64,
    pub daily: Vec<DailyForecast>,
    pub hourly: Vec<HourlyForecast>,
}

/// A `/onecall` body exactly as the weather API sent it, plus its typed view.
///
/// Serializes back to the original JSON, so unknown fields and integer
/// values survive a pass through this type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Value", into = "Value")]
pub struct WeatherData {
    raw: Value,
    forecast: Forecast,
}

impl WeatherData {
    pub fn forecast(&self) -> &Forecast {
        &self.forecast
    }

    pub fn raw(&self) -> &Value {
        &self.raw
    }

    pub fn into_raw(self) -> Value {
        self.raw
    }
}

impl TryFrom<Value> for WeatherData {
    type Error = serde_json::Error;

    fn try_from(raw: Value) -> Result<Self, Self::Error> {
        let forecast = Forecast::deserialize(&raw)?;
        Ok(Self { raw, forecast })
    }
}

impl From<WeatherData> for Value {
    fn from(data: WeatherData) -> Self {
        data.raw
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paris() -> City {
        City {
            city_id: 2988507,
            city_name: "Paris".into(),
            state_code: "11".into(),
            country_code: "FR".into(),
            country_full: "France".into(),
            lat: 48.8534,
            lon: 2.3488,
        }
    }

    #[test]
    fn city_locates_to_its_coordinates() {
        let city = paris();
        assert_eq!(city.coordinates(), Coordinates::new(48.8534, 2.3488));
    }

    #[test]
    fn city_uses_backend_field_names() {
        let json = serde_json::to_value(paris()).unwrap();
        for key in ["city_id", "city_name", "state_code", "country_code", "country_full", "lat", "lon"] {
            assert!(json.get(key).is_some(), "missing {key}");
        }
    }

    #[test]
    fn hourly_without_gust_or_visibility_parses() {
        let json = serde_json::json!({
            "dt": 1_700_000_000,
            "temp": 11.2,
            "feels_like": 10.1,
            "pressure": 1015,
            "humidity": 81,
            "dew_point": 8.0,
            "uvi": 0,
            "clouds": 75,
            "wind_speed": 3.1,
            "wind_deg": 240,
            "weather": [{"id": 803, "main": "Clouds", "description": "broken clouds", "icon": "04n"}],
            "pop": 0.2
        });

        let hour: HourlyForecast = serde_json::from_value(json).unwrap();
        assert_eq!(hour.wind_gust, None);
        assert_eq!(hour.visibility, None);
        assert_eq!(hour.time().map(|t| t.timestamp()), Some(1_700_000_000));
    }

    #[test]
    fn weather_data_serializes_back_to_the_received_body() {
        let body = serde_json::json!({
            "lat": 48.85,
            "lon": 2.35,
            "timezone": "Europe/Paris",
            "timezone_offset": 7200,
            "daily": [{
                "dt": 1_697_454_000,
                "sunrise": 1_697_436_420,
                "sunset": 1_697_475_060,
                "moonrise": 1_697_443_380,
                "moonset": 1_697_478_720,
                "moon_phase": 0.05,
                "summary": "Expect a day of partly cloudy with rain",
                "temp": {"day": 15.2, "min": 9.8, "max": 16, "night": 10.9, "eve": 13.7, "morn": 10.1},
                "feels_like": {"day": 14.5, "night": 10.2, "eve": 13, "morn": 9.4},
                "pressure": 1017,
                "humidity": 66,
                "dew_point": 8.8,
                "wind_speed": 4.9,
                "wind_deg": 238,
                "weather": [{"id": 500, "main": "Rain", "description": "light rain", "icon": "10d"}],
                "clouds": 55,
                "pop": 1,
                "rain": 2.5,
                "uvi": 2.1
            }],
            "hourly": []
        });

        let data: WeatherData = serde_json::from_value(body.clone()).unwrap();

        assert_eq!(data.forecast().daily[0].pressure, 1017.0);
        assert_eq!(data.forecast().daily[0].condition(), Some("light rain"));
        assert_eq!(serde_json::to_value(&data).unwrap(), body);
        assert_eq!(serde_json::to_string(&data).unwrap(), body.to_string());
    }

    #[test]
    fn weather_data_rejects_bodies_missing_required_fields() {
        let body = serde_json::json!({"lat": 1.0, "lon": 2.0, "timezone": "UTC"});
        assert!(serde_json::from_value::<WeatherData>(body).is_err());
    }
}

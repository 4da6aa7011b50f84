//! The weather client, generic over where favorited cities come from.
//!
//! [`DemoClient`] serves a built-in city table and looks weather up by raw
//! [`Coordinates`]; [`LiveClient`] asks the backend API for cities and looks
//! weather up by [`City`]. Both issue the same `/onecall` request against the
//! weather API and hand the decoded body back unchanged.

use std::sync::Arc;
use tracing::instrument;

use crate::{
    config::Config,
    error::ClientError,
    model::{City, Coordinates, Locate, WeatherData},
    source::{BackendCities, FavoritedCitiesSource, StaticCities},
    transport::{HttpTransport, Transport, TransportConfig, get_json},
};

/// Parts of the forecast the weather API is asked to leave out.
pub const ONECALL_EXCLUDE: &str = "current,minutely,alerts";
pub const ONECALL_UNITS: &str = "metric";

/// Path and query of a `/onecall` request, relative to the weather base URL.
pub fn onecall_path(coords: Coordinates, api_key: &str) -> String {
    format!(
        "/onecall?lat={}&lon={}&exclude={ONECALL_EXCLUDE}&units={ONECALL_UNITS}&appid={}",
        coords.lat,
        coords.lon,
        urlencoding::encode(api_key),
    )
}

#[derive(Debug, Clone)]
pub struct WeatherClient<S> {
    weather: Arc<dyn Transport>,
    api_key: Option<String>,
    source: S,
}

pub type DemoClient = WeatherClient<StaticCities>;
pub type LiveClient = WeatherClient<BackendCities>;

impl<S: FavoritedCitiesSource> WeatherClient<S> {
    /// `weather` must resolve relative URLs against the weather API base URL.
    pub fn from_parts(weather: Arc<dyn Transport>, api_key: Option<String>, source: S) -> Self {
        Self { weather, api_key, source }
    }

    pub async fn favorited_cities(&self) -> Result<Vec<City>, ClientError> {
        self.source.favorited_cities().await
    }

    /// Forecast for `target`, or `None` without any request when `target` is `None`.
    #[instrument(skip_all, level = "info")]
    pub async fn get_weather_by_city<L>(
        &self,
        target: Option<&L>,
    ) -> Result<Option<WeatherData>, ClientError>
    where
        L: Locate + ?Sized,
    {
        let Some(target) = target else {
            tracing::debug!("no location given, skipping weather request");
            return Ok(None);
        };

        let api_key = self.api_key.as_deref().ok_or(ClientError::MissingApiKey)?;
        let coords = target.coordinates();
        tracing::debug!(lat = coords.lat, lon = coords.lon, "requesting forecast");

        let data: WeatherData = get_json(self.weather.as_ref(), &onecall_path(coords, api_key)).await?;
        Ok(Some(data))
    }
}

fn weather_transport(config: &Config) -> Result<Arc<dyn Transport>, ClientError> {
    let http = HttpTransport::new(TransportConfig::with_base_url(&config.weather_base_url))?;
    Ok(Arc::new(http))
}

impl DemoClient {
    pub fn demo(config: &Config) -> Result<Self, ClientError> {
        Ok(Self::from_parts(weather_transport(config)?, config.api_key.clone(), StaticCities))
    }
}

impl LiveClient {
    pub fn live(config: &Config) -> Result<Self, ClientError> {
        let backend_http: Arc<dyn Transport> =
            Arc::new(HttpTransport::new(TransportConfig::default())?);
        let source = BackendCities::new(&config.backend_base_url, backend_http);

        Ok(Self::from_parts(weather_transport(config)?, config.api_key.clone(), source))
    }

    /// City-name autocomplete against the backend API.
    pub async fn get_cities(&self, keyword: &str) -> Result<Vec<City>, ClientError> {
        self.source.search(keyword).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn onecall_path_has_each_parameter_once() {
        let path = onecall_path(Coordinates::new(48.8534, 2.3488), "KEY");

        assert!(path.starts_with("/onecall?"));
        assert_eq!(path.matches("lat=48.8534").count(), 1);
        assert_eq!(path.matches("lon=2.3488").count(), 1);
        assert_eq!(path.matches("exclude=current,minutely,alerts").count(), 1);
        assert_eq!(path.matches("units=metric").count(), 1);
        assert!(path.ends_with("appid=KEY"));
    }

    #[test]
    fn negative_coordinates_are_kept_signed() {
        let path = onecall_path(Coordinates::new(-33.8679, 151.2073), "KEY");
        assert!(path.contains("lat=-33.8679&lon=151.2073&"));
    }

    #[tokio::test]
    async fn absent_input_short_circuits_before_key_check() {
        let client = DemoClient::demo(&Config::default()).unwrap();

        let res = client.get_weather_by_city::<Coordinates>(None).await.unwrap();
        assert!(res.is_none());
    }

    #[tokio::test]
    async fn missing_api_key_fails_before_any_request() {
        let client = DemoClient::demo(&Config::default()).unwrap();
        let coords = Coordinates::new(1.0, 2.0);

        let err = client.get_weather_by_city(Some(&coords)).await.unwrap_err();
        assert!(matches!(err, ClientError::MissingApiKey));
    }
}

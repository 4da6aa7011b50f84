use async_trait::async_trait;
use std::sync::Arc;
use tracing::instrument;

use crate::{
    error::ClientError,
    model::City,
    transport::{Transport, get_json},
};

use super::FavoritedCitiesSource;

/// Upper bound the backend applies to a city search.
pub const SEARCH_LIMIT: usize = 10;

/// Favorited cities and city search served by the backend API.
#[derive(Debug, Clone)]
pub struct BackendCities {
    base_url: String,
    http: Arc<dyn Transport>,
}

impl BackendCities {
    /// `http` receives fully qualified URLs built from `base_url`.
    pub fn new(base_url: impl Into<String>, http: Arc<dyn Transport>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url, http }
    }

    pub fn favorited_cities_url(&self) -> String {
        format!("{}/favoritedCities", self.base_url)
    }

    /// The keyword is percent-encoded so reserved characters stay inside the value.
    pub fn search_url(&self, keyword: &str) -> String {
        format!(
            "{}/cities?city_name_like={}&_limit={SEARCH_LIMIT}",
            self.base_url,
            urlencoding::encode(keyword),
        )
    }

    /// Cities whose name contains `keyword`, at most [`SEARCH_LIMIT`].
    #[instrument(skip(self), level = "info")]
    pub async fn search(&self, keyword: &str) -> Result<Vec<City>, ClientError> {
        let cities: Vec<City> = get_json(self.http.as_ref(), &self.search_url(keyword)).await?;
        tracing::debug!(count = cities.len(), "city search returned");
        Ok(cities)
    }
}

#[async_trait]
impl FavoritedCitiesSource for BackendCities {
    #[instrument(skip(self), level = "info")]
    async fn favorited_cities(&self) -> Result<Vec<City>, ClientError> {
        Ok(get_json(self.http.as_ref(), &self.favorited_cities_url()).await?)
    }
}

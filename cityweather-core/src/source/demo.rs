use async_trait::async_trait;
use std::{collections::BTreeMap, sync::LazyLock};

use crate::{error::ClientError, model::City};

use super::FavoritedCitiesSource;

static CITIES: LazyLock<BTreeMap<u32, City>> = LazyLock::new(|| {
    [
        (2643743, "London", "ENG", "GB", "United Kingdom", 51.5085, -0.1257),
        (2988507, "Paris", "11", "FR", "France", 48.8534, 2.3488),
        (3117735, "Madrid", "29", "ES", "Spain", 40.4165, -3.7026),
        (5128581, "New York City", "NY", "US", "United States", 40.7143, -74.006),
        (1850147, "Tokyo", "40", "JP", "Japan", 35.6895, 139.6917),
        (2147714, "Sydney", "NSW", "AU", "Australia", -33.8679, 151.2073),
    ]
    .into_iter()
    .map(|(city_id, name, state, country, country_full, lat, lon)| {
        let city = City {
            city_id,
            city_name: name.to_string(),
            state_code: state.to_string(),
            country_code: country.to_string(),
            country_full: country_full.to_string(),
            lat,
            lon,
        };
        (city_id, city)
    })
    .collect()
});

/// Built-in city table, keyed by `city_id`.
pub fn cities_table() -> &'static BTreeMap<u32, City> {
    &CITIES
}

/// Serves the built-in table; never touches the network.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticCities;

#[async_trait]
impl FavoritedCitiesSource for StaticCities {
    async fn favorited_cities(&self) -> Result<Vec<City>, ClientError> {
        Ok(cities_table().values().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_is_keyed_by_city_id() {
        let table = cities_table();
        assert!(!table.is_empty());
        for (id, city) in table {
            assert_eq!(*id, city.city_id);
        }
    }

    #[test]
    fn coordinates_are_in_range() {
        for city in cities_table().values() {
            assert!((-90.0..=90.0).contains(&city.lat), "{}", city.city_name);
            assert!((-180.0..=180.0).contains(&city.lon), "{}", city.city_name);
            assert!(!city.city_name.is_empty());
            assert_eq!(city.country_code.len(), 2);
        }
    }

    #[tokio::test]
    async fn favorited_cities_are_the_table_values_in_id_order() {
        let cities = StaticCities.favorited_cities().await.unwrap();

        assert_eq!(cities.len(), cities_table().len());
        assert!(cities.windows(2).all(|w| w[0].city_id < w[1].city_id));
    }
}

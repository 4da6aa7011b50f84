//! Terminal rendering of cities and forecasts.

use chrono::Duration;
use cityweather_core::{City, WeatherData, model::DailyForecast};

pub fn print_cities(cities: &[City], json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(cities)?);
        return Ok(());
    }

    if cities.is_empty() {
        println!("No cities found.");
    }
    for city in cities {
        println!("{}", city_line(city));
    }
    Ok(())
}

pub fn print_weather(label: Option<&str>, data: Option<&WeatherData>, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(&data)?);
        return Ok(());
    }

    let Some(data) = data else {
        println!("No weather data.");
        return Ok(());
    };

    let forecast = data.forecast();
    match label {
        Some(name) => println!("{name} ({})", forecast.timezone),
        None => println!("{:.4}, {:.4} ({})", forecast.lat, forecast.lon, forecast.timezone),
    }

    let offset = Duration::try_seconds(forecast.timezone_offset);
    for day in &forecast.daily {
        println!("  {}", day_line(day, offset));
    }
    Ok(())
}

fn city_line(city: &City) -> String {
    format!(
        "{:>9}  {}, {} ({})  [{:.4}, {:.4}]",
        city.city_id, city.city_name, city.state_code, city.country_full, city.lat, city.lon
    )
}

/// One forecast day, dated in the location's local time. Dates that fall
/// outside chrono's range print as a placeholder.
fn day_line(day: &DailyForecast, offset: Option<Duration>) -> String {
    let date = offset
        .zip(day.date())
        .and_then(|(offset, d)| d.checked_add_signed(offset))
        .map(|d| d.format("%a %d %b").to_string())
        .unwrap_or_else(|| "??? ?? ???".to_string());

    format!(
        "{date}  {:>5.1}°C / {:>5.1}°C  {:>3.0}% rain  {}",
        day.temp.min,
        day.temp.max,
        day.pop * 100.0,
        day.condition().unwrap_or("Unknown"),
    )
}

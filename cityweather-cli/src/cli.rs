use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use cityweather_core::{
    City, Config, Coordinates, DemoClient, FavoritedCitiesSource, LiveClient, SourceKind,
    WeatherClient,
};

use crate::output;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "cityweather", version, about = "Forecasts for your favorited cities")]
pub struct Cli {
    /// Where favorited cities come from: "demo" (built-in table) or "live" (backend API).
    #[arg(long, global = true, default_value = "live", value_parser = parse_source)]
    pub source: SourceKind,

    /// Print raw JSON instead of a summary.
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List favorited cities.
    Favorites,

    /// Search the backend for cities whose name contains a keyword.
    Search {
        keyword: String,
    },

    /// Show the forecast for a favorited city or for raw coordinates.
    Weather {
        /// Id of a favorited city.
        #[arg(required_unless_present_all = ["lat", "lon"], conflicts_with_all = ["lat", "lon"])]
        city_id: Option<u32>,

        #[arg(long, requires = "lon", allow_hyphen_values = true)]
        lat: Option<f64>,

        #[arg(long, requires = "lat", allow_hyphen_values = true)]
        lon: Option<f64>,
    },

    /// Interactively set base URLs and the weather API key.
    Configure,

    /// Print the config file location.
    ConfigPath,
}

fn parse_source(value: &str) -> Result<SourceKind, String> {
    SourceKind::try_from(value).map_err(|e| e.to_string())
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => return configure(),
            Command::ConfigPath => {
                println!("{}", Config::config_file_path()?.display());
                return Ok(());
            }
            _ => {}
        }

        let config = Config::load()?;
        tracing::debug!(source = %self.source, "loaded configuration");

        match self.source {
            SourceKind::Demo => {
                let client = DemoClient::demo(&config)?;
                if let Command::Search { .. } = self.command {
                    bail!("City search needs the backend. Re-run with `--source live`.");
                }
                execute(&client, self.command, self.json).await
            }
            SourceKind::Live => {
                let client = LiveClient::live(&config)?;
                if let Command::Search { keyword } = &self.command {
                    let cities = client.get_cities(keyword).await?;
                    return output::print_cities(&cities, self.json);
                }
                execute(&client, self.command, self.json).await
            }
        }
    }
}

async fn execute<S: FavoritedCitiesSource>(
    client: &WeatherClient<S>,
    command: Command,
    json: bool,
) -> anyhow::Result<()> {
    match command {
        Command::Favorites => {
            let cities = client.favorited_cities().await?;
            output::print_cities(&cities, json)
        }
        Command::Weather { city_id: Some(id), .. } => {
            let cities = client.favorited_cities().await?;
            let city = find_city(&cities, id)?;
            let data = client.get_weather_by_city(Some(city)).await?;
            output::print_weather(Some(&city.city_name), data.as_ref(), json)
        }
        Command::Weather { lat: Some(lat), lon: Some(lon), .. } => {
            let coords = Coordinates::new(lat, lon);
            let data = client.get_weather_by_city(Some(&coords)).await?;
            output::print_weather(None, data.as_ref(), json)
        }
        Command::Weather { .. } => bail!("Either a city id or both --lat and --lon are required"),
        Command::Search { .. } | Command::Configure | Command::ConfigPath => {
            bail!("This command does not use a weather client")
        }
    }
}

fn find_city(cities: &[City], id: u32) -> anyhow::Result<&City> {
    cities
        .iter()
        .find(|c| c.city_id == id)
        .with_context(|| format!("City {id} is not among the favorited cities"))
}

fn configure() -> anyhow::Result<()> {
    let path = Config::config_file_path()?;
    let mut cfg = Config::load_from(&path)?;

    cfg.weather_base_url = inquire::Text::new("Weather API base URL:")
        .with_default(&cfg.weather_base_url)
        .prompt()?;

    cfg.backend_base_url = inquire::Text::new("Backend API base URL:")
        .with_default(&cfg.backend_base_url)
        .prompt()?;

    let key = inquire::Password::new("Weather API key (leave empty to keep current):")
        .without_confirmation()
        .prompt()?;
    if !key.trim().is_empty() {
        cfg.api_key = Some(key.trim().to_string());
    }

    cfg.save_to(&path)?;
    println!("Saved configuration to {}", path.display());

    Ok(())
}

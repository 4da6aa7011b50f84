//! Core library for the `cityweather` client.
//!
//! This crate defines:
//! - Configuration resolved from environment, config file and defaults
//! - A GET-only HTTP transport
//! - The weather API and backend API data shapes
//! - A weather client over a demo or live source of favorited cities
//!
//! It is used by `cityweather-cli`, but can also be embedded by other front ends.

pub mod client;
pub mod config;
pub mod error;
pub mod model;
pub mod source;
pub mod transport;

pub use client::{DemoClient, LiveClient, WeatherClient};
pub use config::Config;
pub use error::{ClientError, TransportError};
pub use model::{City, Coordinates, Forecast, Locate, WeatherData};
pub use source::{BackendCities, FavoritedCitiesSource, SourceKind, StaticCities};
pub use transport::{HttpTransport, Transport, TransportConfig};

use async_trait::async_trait;
use std::fmt::Debug;

use crate::{error::ClientError, model::City};

pub mod backend;
pub mod demo;

pub use backend::BackendCities;
pub use demo::StaticCities;

/// Where the favorited cities come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    Demo,
    Live,
}

impl SourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceKind::Demo => "demo",
            SourceKind::Live => "live",
        }
    }

    pub const fn all() -> &'static [SourceKind] {
        &[SourceKind::Demo, SourceKind::Live]
    }
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for SourceKind {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "demo" => Ok(SourceKind::Demo),
            "live" => Ok(SourceKind::Live),
            _ => Err(anyhow::anyhow!("Unknown source '{value}'. Supported sources: demo, live.")),
        }
    }
}

#[async_trait]
pub trait FavoritedCitiesSource: Send + Sync + Debug {
    async fn favorited_cities(&self) -> Result<Vec<City>, ClientError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_kind_as_str_roundtrip() {
        for kind in SourceKind::all() {
            let parsed = SourceKind::try_from(kind.as_str()).expect("roundtrip should succeed");
            assert_eq!(*kind, parsed);
        }
    }

    #[test]
    fn source_kind_is_case_insensitive() {
        assert_eq!(SourceKind::try_from("LIVE").unwrap(), SourceKind::Live);
    }

    #[test]
    fn unknown_source_error() {
        let err = SourceKind::try_from("remote").unwrap_err();
        assert!(err.to_string().contains("Unknown source"));
    }
}

//! Error types for the transport and the clients built on top of it.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TransportError {
    #[error("Relative URL '{0}' requested but no base URL is configured")]
    RelativeUrl(String),

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Request to {url} failed with status {status}: {body}")]
    Status { status: u16, url: String, body: String },

    #[error("Failed to decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

impl TransportError {
    /// HTTP status of the failed response, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Request(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

#[derive(Error, Debug)]
pub enum ClientError {
    #[error(
        "No weather API key configured.\n\
         Hint: set CITYWEATHER_API_KEY or run `cityweather configure`."
    )]
    MissingApiKey,

    #[error(transparent)]
    Transport(#[from] TransportError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_is_exposed_for_status_errors() {
        let err = TransportError::Status {
            status: 500,
            url: "http://localhost/x".into(),
            body: "boom".into(),
        };
        assert_eq!(err.status(), Some(500));
        assert!(err.to_string().contains("500"));
    }

    #[test]
    fn relative_url_has_no_status() {
        let err = TransportError::RelativeUrl("/onecall".into());
        assert_eq!(err.status(), None);
        assert!(err.to_string().contains("no base URL"));
    }

    #[test]
    fn client_error_is_transparent_over_transport() {
        let err: ClientError = TransportError::RelativeUrl("/x".into()).into();
        assert!(err.to_string().starts_with("Relative URL"));
    }
}

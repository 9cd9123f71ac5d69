//! Top-level error type of the server.
//!
//! Domain errors stay in their own modules ([`AddinError`], [`TransportError`]);
//! this type only wraps them for the startup path in `main`.

use thiserror::Error;

use super::transport::TransportError;
use crate::domains::addins::AddinError;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// The add-in directory client could not be built or used.
    #[error("Add-in directory error: {0}")]
    Addins(#[from] AddinError),

    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// A configuration value is unusable.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_addin_error_converts() {
        let err: Error = AddinError::invalid_argument("asset ID must not be empty").into();
        assert!(matches!(err, Error::Addins(AddinError::InvalidArgument(_))));
        assert!(err.to_string().starts_with("Add-in directory error:"));
    }

    #[test]
    fn test_config_error_message() {
        let err = Error::config("MCP_ADDINS_BASE_URL is not a URL");
        assert_eq!(
            err.to_string(),
            "Configuration error: MCP_ADDINS_BASE_URL is not a URL"
        );
    }
}

//! Console configuration loaded via OrthoConfig.
//!
//! Values come from configuration files and `ADMIN_CONSOLE_*` environment
//! variables. Command-line flags are parsed separately by the shell and
//! override what is loaded here.

use std::ffi::OsString;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;
use url::Url;

/// Backend address used when nothing else is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:5000";

/// Errors raised while interpreting loaded settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// Layered configuration could not be read.
    #[error("failed to load console settings: {message}")]
    Load {
        /// Loader failure description.
        message: String,
    },
    /// The backend address is not a URL.
    #[error("invalid API URL {url}: {source}")]
    InvalidApiUrl {
        /// Offending value.
        url: String,
        /// Parser failure.
        #[source]
        source: url::ParseError,
    },
    /// The backend address cannot have `/users` appended to it.
    #[error("API URL {url} cannot be used as a base address")]
    NotABase {
        /// Offending value.
        url: String,
    },
}

/// Settings for reaching the remote collaborator.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "ADMIN_CONSOLE")]
pub struct ConsoleSettings {
    /// Base URL of the REST backend.
    pub api_url: Option<String>,
    /// Per-request timeout in seconds. Zero means requests never time out.
    #[ortho_config(default = 0)]
    pub request_timeout_secs: u64,
}

impl ConsoleSettings {
    /// Load settings from configuration files and the environment only.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Load`] when a configuration source is
    /// malformed.
    pub fn from_environment() -> Result<Self, SettingsError> {
        Self::load_from_iter([OsString::from(env!("CARGO_PKG_NAME"))]).map_err(|error| {
            SettingsError::Load {
                message: error.to_string(),
            }
        })
    }

    /// Return the configured API URL text, falling back to the default.
    pub fn api_url_or_default(&self) -> &str {
        self.api_url.as_deref().unwrap_or(DEFAULT_API_URL)
    }

    /// Parse the configured API URL.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::InvalidApiUrl`] when the value does not parse
    /// and [`SettingsError::NotABase`] when it cannot carry path segments.
    pub fn api_url(&self) -> Result<Url, SettingsError> {
        let raw = self.api_url_or_default();
        let url = Url::parse(raw).map_err(|source| SettingsError::InvalidApiUrl {
            url: raw.to_owned(),
            source,
        })?;
        if url.cannot_be_a_base() {
            return Err(SettingsError::NotABase {
                url: raw.to_owned(),
            });
        }
        Ok(url)
    }

    /// Request timeout, when a non-zero one is configured.
    pub fn request_timeout(&self) -> Option<Duration> {
        (self.request_timeout_secs > 0).then(|| Duration::from_secs(self.request_timeout_secs))
    }
}

//! # Client Configuration

use std::time::Duration;
use thiserror::Error;
use url::Url;

pub const DEFAULT_SERVER_URL: &str = "http://localhost:8000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_SPEECH_LANG: &str = "en-US";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid server URL '{url}': {reason}")]
    InvalidServerUrl { url: String, reason: String },

    #[error("Request timeout must be greater than zero")]
    ZeroTimeout,

    #[error("Speech language must not be empty")]
    EmptySpeechLang,
}

/// Settings for one client process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Backend base URL; API paths are appended to it.
    pub server_url: String,
    pub request_timeout_secs: u64,
    /// BCP 47 tag handed to speech recognition.
    pub speech_lang: String,
    /// When false, the speech platform is treated as unavailable.
    pub voice_enabled: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            speech_lang: DEFAULT_SPEECH_LANG.to_string(),
            voice_enabled: true,
        }
    }
}

impl ClientConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |reason: String| ConfigError::InvalidServerUrl {
            url: self.server_url.clone(),
            reason,
        };
        let url = Url::parse(&self.server_url).map_err(|e| invalid(e.to_string()))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(invalid(format!("unsupported scheme '{}'", url.scheme())));
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        if self.speech_lang.trim().is_empty() {
            return Err(ConfigError::EmptySpeechLang);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = ClientConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_rejects_bad_values() {
        let bad_scheme = ClientConfig {
            server_url: "ftp://example.com".into(),
            ..ClientConfig::default()
        };
        assert!(matches!(
            bad_scheme.validate(),
            Err(ConfigError::InvalidServerUrl { .. })
        ));

        let garbage = ClientConfig {
            server_url: "not a url".into(),
            ..ClientConfig::default()
        };
        assert!(garbage.validate().is_err());

        let zero = ClientConfig {
            request_timeout_secs: 0,
            ..ClientConfig::default()
        };
        assert_eq!(zero.validate(), Err(ConfigError::ZeroTimeout));
    }
}

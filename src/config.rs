//! Client configuration
//!
//! Defaults, then an optional JSON file, then the `HANZI_SKETCH_ENDPOINT`
//! environment variable, then command-line overrides.

use crate::capture::surface::SurfaceOptions;
use crate::display::ResponseOrdering;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_ENDPOINT: &str = "http://localhost:8585/addCharImage/";
pub const ENDPOINT_ENV: &str = "HANZI_SKETCH_ENDPOINT";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ClientConfig {
    /// Recognition endpoint receiving the signature POSTs
    pub endpoint: String,
    /// Per-request timeout in milliseconds
    pub timeout_ms: u64,
    pub ordering: ResponseOrdering,
    pub surface: SurfaceOptions,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout_ms: 10_000,
            ordering: ResponseOrdering::default(),
            surface: SurfaceOptions::default(),
        }
    }
}

impl ClientConfig {
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let config: ClientConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json(&content)?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Resolve the effective configuration for a run
    pub fn resolve(path: Option<&Path>, endpoint: Option<String>) -> ConfigResult<Self> {
        let mut config = match path {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        config.override_endpoint(std::env::var(ENDPOINT_ENV).ok());
        config.override_endpoint(endpoint);
        config.validate()?;
        Ok(config)
    }

    pub fn override_endpoint(&mut self, endpoint: Option<String>) {
        if let Some(endpoint) = endpoint.filter(|e| !e.trim().is_empty()) {
            self.endpoint = endpoint;
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if !(self.endpoint.starts_with("http://") || self.endpoint.starts_with("https://")) {
            return Err(ConfigError::Invalid(format!(
                "endpoint must be an http(s) URL, got '{}'",
                self.endpoint
            )));
        }
        if self.timeout_ms == 0 {
            return Err(ConfigError::Invalid("timeoutMs must be > 0".to_string()));
        }
        self.surface
            .validate()
            .map_err(|e| ConfigError::Invalid(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.endpoint, "http://localhost:8585/addCharImage/");
        assert_eq!(config.timeout(), Duration::from_secs(10));
        assert_eq!(config.ordering, ResponseOrdering::LatestRequest);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = ClientConfig::from_json(
            r#"{"ordering": "last-response", "surface": {"width": 300}}"#,
        )
        .unwrap();
        assert_eq!(config.ordering, ResponseOrdering::LastResponse);
        assert_eq!(config.surface.width, 300);
        assert_eq!(config.surface.height, 200);
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(matches!(
            ClientConfig::from_json(r#"{"endpoint": "localhost:8585"}"#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            ClientConfig::from_json(r#"{"timeoutMs": 0}"#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            ClientConfig::from_json(r#"{"surface": {"lineWidth": 0}}"#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            ClientConfig::from_json("{"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_override_endpoint_ignores_blank() {
        let mut config = ClientConfig::default();
        config.override_endpoint(Some("  ".to_string()));
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);

        config.override_endpoint(Some("http://10.0.0.2:8585/addCharImage/".to_string()));
        assert_eq!(config.endpoint, "http://10.0.0.2:8585/addCharImage/");
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"endpoint": "https://recog.example/addCharImage/", "timeoutMs": 250}}"#)
            .unwrap();

        let config = ClientConfig::load(file.path()).unwrap();
        assert_eq!(config.endpoint, "https://recog.example/addCharImage/");
        assert_eq!(config.timeout(), Duration::from_millis(250));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = ClientConfig::load(&dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}

//! Endpoint configuration for the submission client

use std::env;

use thiserror::Error;
use tracing::info;
use url::Url;

pub const DEFAULT_BASE_URL: &str = "http://example.com/api";
pub const DEFAULT_CANDIDATE_PATH: &str = "/candidate";

pub const BASE_URL_VAR: &str = "CANDIDATE_API_BASE";
pub const CANDIDATE_PATH_VAR: &str = "CANDIDATE_API_PATH";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid endpoint {endpoint}: {source}")]
    InvalidEndpoint {
        endpoint: String,
        source: url::ParseError,
    },
    #[error("Unsupported scheme {scheme} in {endpoint}, expected http or https")]
    UnsupportedScheme { endpoint: String, scheme: String },
}

/// Location of the candidate endpoint, injected into the submission client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    base_url: String,
    candidate_path: String,
    endpoint: Url,
}

impl ClientConfig {
    pub fn new(
        base_url: impl Into<String>,
        candidate_path: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        let base_url = base_url.into();
        let candidate_path = candidate_path.into();
        let endpoint = join_endpoint(&base_url, &candidate_path)?;

        Ok(Self {
            base_url,
            candidate_path,
            endpoint,
        })
    }

    /// Reads `CANDIDATE_API_BASE` and `CANDIDATE_API_PATH`, defaulting each
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Like [`ClientConfig::from_env`], but explicit values win over the environment
    pub fn from_env_with_overrides(
        base_url: Option<String>,
        candidate_path: Option<String>,
    ) -> Result<Self, ConfigError> {
        Self::from_lookup(|key| {
            let explicit = match key {
                BASE_URL_VAR => base_url.clone(),
                CANDIDATE_PATH_VAR => candidate_path.clone(),
                _ => None,
            };
            explicit.or_else(|| env::var(key).ok())
        })
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let load = |key: &str, default: &str| {
            lookup(key).unwrap_or_else(|| {
                info!("{key} not set, using default: {default}");
                default.to_string()
            })
        };

        Self::new(
            load(BASE_URL_VAR, DEFAULT_BASE_URL),
            load(CANDIDATE_PATH_VAR, DEFAULT_CANDIDATE_PATH),
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn candidate_path(&self) -> &str {
        &self.candidate_path
    }

    /// Full URL the client posts to
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

/// Joins base and path with exactly one slash between them
fn join_endpoint(base_url: &str, candidate_path: &str) -> Result<Url, ConfigError> {
    let base = base_url.trim().trim_end_matches('/');
    let path = candidate_path.trim().trim_start_matches('/');
    let joined = if path.is_empty() {
        base.to_string()
    } else {
        format!("{base}/{path}")
    };

    let url = Url::parse(&joined).map_err(|source| ConfigError::InvalidEndpoint {
        endpoint: joined.clone(),
        source,
    })?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::UnsupportedScheme {
            scheme: url.scheme().to_string(),
            endpoint: joined,
        });
    }

    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_candidate_path() {
        let config = ClientConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config.endpoint().as_str(), "http://example.com/api/candidate");
    }

    #[test]
    fn slashes_are_normalised() {
        let cases = [
            ("http://localhost:8000/api/", "/candidate"),
            ("http://localhost:8000/api", "candidate"),
            ("http://localhost:8000/api/", "candidate"),
        ];
        for (base, path) in cases {
            let config = ClientConfig::new(base, path).unwrap();
            assert_eq!(
                config.endpoint().as_str(),
                "http://localhost:8000/api/candidate"
            );
        }
    }

    #[test]
    fn empty_path_posts_to_base() {
        let config = ClientConfig::new("https://votes.test/new", "").unwrap();
        assert_eq!(config.endpoint().as_str(), "https://votes.test/new");
    }

    #[test]
    fn rejects_garbage_and_other_schemes() {
        assert!(matches!(
            ClientConfig::new("not a url", "/candidate"),
            Err(ConfigError::InvalidEndpoint { .. })
        ));
        assert!(matches!(
            ClientConfig::new("ftp://example.com", "/candidate"),
            Err(ConfigError::UnsupportedScheme { .. })
        ));
    }

    #[test]
    fn lookup_overrides_defaults() {
        let config = ClientConfig::from_lookup(|key| match key {
            BASE_URL_VAR => Some("http://127.0.0.1:9000".to_string()),
            _ => None,
        })
        .unwrap();

        assert_eq!(config.base_url(), "http://127.0.0.1:9000");
        assert_eq!(config.candidate_path(), DEFAULT_CANDIDATE_PATH);
        assert_eq!(config.endpoint().as_str(), "http://127.0.0.1:9000/candidate");
    }

    #[test]
    fn explicit_overrides_win() {
        let config = ClientConfig::from_env_with_overrides(
            Some("https://votes.example.org/api".to_string()),
            Some("candidates/".to_string()),
        )
        .unwrap();

        assert_eq!(
            config.endpoint().as_str(),
            "https://votes.example.org/api/candidates/"
        );
    }
}

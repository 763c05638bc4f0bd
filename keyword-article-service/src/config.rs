use std::fmt;
use std::time::Duration;

use crate::error::ConfigError;

pub const API_KEY_VAR: &str = "OPENAI_API_KEY";
pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_MODEL: &str = "openai/gpt-4o-mini";
pub const DEFAULT_ARTICLE_URL: &str = "http://191.run";
pub const DEFAULT_PACING_DELAY_MS: u64 = 500;

/// Pause applied after every candidate so the upstream API is not hammered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PacingPolicy {
    pub delay: Duration,
}

impl PacingPolicy {
    pub fn from_millis(millis: u64) -> Self {
        Self {
            delay: Duration::from_millis(millis),
        }
    }

    pub fn disabled() -> Self {
        Self {
            delay: Duration::ZERO,
        }
    }

    pub async fn pause(&self) {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
    }
}

impl Default for PacingPolicy {
    fn default() -> Self {
        Self::from_millis(DEFAULT_PACING_DELAY_MS)
    }
}

/// Configuration for the keyword article service, built once at startup
#[derive(Clone)]
pub struct ServiceConfig {
    pub api_key: String,
    pub port: u16,
    pub model: String,
    pub default_url: String,
    pub pacing: PacingPolicy,
}

impl fmt::Debug for ServiceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceConfig")
            .field("api_key", &"<redacted>")
            .field("port", &self.port)
            .field("model", &self.model)
            .field("default_url", &self.default_url)
            .field("pacing", &self.pacing)
            .finish()
    }
}

impl ServiceConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build the config from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup(API_KEY_VAR)
            .filter(|key| !key.trim().is_empty())
            .ok_or(ConfigError::MissingVar(API_KEY_VAR))?;

        let port = match lookup("PORT") {
            Some(raw) => raw.trim().parse::<u16>().map_err(|_| ConfigError::InvalidVar {
                name: "PORT",
                value: raw,
            })?,
            None => DEFAULT_PORT,
        };

        let pacing = match lookup("PACING_DELAY_MS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .map(PacingPolicy::from_millis)
                .map_err(|_| ConfigError::InvalidVar {
                    name: "PACING_DELAY_MS",
                    value: raw,
                })?,
            None => PacingPolicy::default(),
        };

        let default_url = lookup("DEFAULT_ARTICLE_URL")
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| DEFAULT_ARTICLE_URL.to_string());

        Ok(Self {
            api_key,
            port,
            model: DEFAULT_MODEL.to_string(),
            default_url,
            pacing,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults_when_only_key_is_set() {
        let config = ServiceConfig::from_lookup(lookup_from(&[(API_KEY_VAR, "sk-test")])).unwrap();

        assert_eq!(config.api_key, "sk-test");
        assert_eq!(config.port, 5000);
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.default_url, "http://191.run");
        assert_eq!(config.pacing.delay, Duration::from_millis(500));
        assert_eq!(config.bind_address(), "0.0.0.0:5000");
    }

    #[test]
    fn test_missing_or_blank_key_is_rejected() {
        let missing = ServiceConfig::from_lookup(lookup_from(&[]));
        assert!(matches!(missing, Err(ConfigError::MissingVar(API_KEY_VAR))));

        let blank = ServiceConfig::from_lookup(lookup_from(&[(API_KEY_VAR, "   ")]));
        assert!(matches!(blank, Err(ConfigError::MissingVar(_))));
    }

    #[test]
    fn test_overrides() {
        let config = ServiceConfig::from_lookup(lookup_from(&[
            (API_KEY_VAR, "sk-test"),
            ("PORT", "8080"),
            ("PACING_DELAY_MS", "0"),
            ("DEFAULT_ARTICLE_URL", " https://example.org "),
        ]))
        .unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(config.pacing, PacingPolicy::disabled());
        assert_eq!(config.default_url, "https://example.org");
    }

    #[test]
    fn test_debug_hides_api_key() {
        let config = ServiceConfig::from_lookup(lookup_from(&[(API_KEY_VAR, "sk-secret")])).unwrap();
        let rendered = format!("{:?}", config);

        assert!(!rendered.contains("sk-secret"));
        assert!(rendered.contains("<redacted>"));
        assert!(rendered.contains("5000"));
    }

    #[test]
    fn test_invalid_port() {
        let result =
            ServiceConfig::from_lookup(lookup_from(&[(API_KEY_VAR, "sk-test"), ("PORT", "abc")]));
        match result {
            Err(ConfigError::InvalidVar { name, value }) => {
                assert_eq!(name, "PORT");
                assert_eq!(value, "abc");
            }
            other => panic!("expected invalid PORT, got {:?}", other),
        }
    }
}

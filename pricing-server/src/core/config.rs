use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use super::error::ConfigError;

/// Deployment environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Self::Development),
            "staging" => Ok(Self::Staging),
            "production" | "prod" => Ok(Self::Production),
            other => Err(ConfigError::InvalidEnvironment(other.to_string())),
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Development => "development",
            Self::Staging => "staging",
            Self::Production => "production",
        };
        f.write_str(name)
    }
}

/// Server configuration
///
/// # Environment variables
///
/// | Variable | Default | Description |
/// |----------|---------|-------------|
/// | HTTP_HOST | 0.0.0.0 | Bind address |
/// | HTTP_PORT | 8080 | HTTP port |
/// | ENVIRONMENT | development | development \| staging \| production |
/// | LOG_LEVEL | info | Level for this crate and the HTTP trace layer (`RUST_LOG` overrides) |
/// | LOG_JSON | false | Emit JSON log lines |
/// | LOG_DIR | (unset) | Write logs to a daily rolling file in this directory |
/// | CORS_PERMISSIVE | true | Allow any origin |
/// | REQUEST_TIMEOUT_MS | 30000 | Per-request timeout |
///
/// Unparsable numbers and booleans fall back to their defaults; an unknown
/// `ENVIRONMENT` is an error.
///
/// ```ignore
/// HTTP_PORT=9000 LOG_JSON=true cargo run -p pricing-server
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    pub http_host: String,
    pub http_port: u16,
    pub environment: Environment,
    pub log_level: String,
    pub log_json: bool,
    pub log_dir: Option<String>,
    pub cors_permissive: bool,
    pub request_timeout_ms: u64,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from any key → value source
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let environment = match lookup("ENVIRONMENT") {
            Some(value) if !value.trim().is_empty() => value.parse()?,
            _ => defaults.environment,
        };

        Ok(Self {
            http_host: lookup("HTTP_HOST")
                .filter(|s| !s.is_empty())
                .unwrap_or(defaults.http_host),
            http_port: lookup("HTTP_PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.http_port),
            environment,
            log_level: lookup("LOG_LEVEL")
                .filter(|s| !s.is_empty())
                .unwrap_or(defaults.log_level),
            log_json: lookup("LOG_JSON")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.log_json),
            log_dir: lookup("LOG_DIR").filter(|s| !s.is_empty()),
            cors_permissive: lookup("CORS_PERMISSIVE")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.cors_permissive),
            request_timeout_ms: lookup("REQUEST_TIMEOUT_MS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.request_timeout_ms),
        })
    }

    /// `host:port` to bind
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.http_host, self.http_port)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }

    pub fn is_development(&self) -> bool {
        self.environment == Environment::Development
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            http_host: "0.0.0.0".into(),
            http_port: 8080,
            environment: Environment::Development,
            log_level: "info".into(),
            log_json: false,
            log_dir: None,
            cors_permissive: true,
            request_timeout_ms: 30000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config.bind_addr(), "0.0.0.0:8080");
        assert!(config.is_development());
        assert!(config.cors_permissive);
        assert!(!config.log_json);
        assert_eq!(config.log_dir, None);
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("HTTP_HOST", "127.0.0.1"),
            ("HTTP_PORT", "9000"),
            ("ENVIRONMENT", "Production"),
            ("LOG_JSON", "true"),
            ("LOG_DIR", "/tmp/logs"),
            ("CORS_PERMISSIVE", "false"),
            ("REQUEST_TIMEOUT_MS", "500"),
        ])
        .unwrap();
        assert_eq!(config.bind_addr(), "127.0.0.1:9000");
        assert!(config.is_production());
        assert!(config.log_json);
        assert_eq!(config.log_dir.as_deref(), Some("/tmp/logs"));
        assert!(!config.cors_permissive);
        assert_eq!(config.request_timeout_ms, 500);
    }

    #[test]
    fn test_bad_numbers_fall_back() {
        let config = load(&[("HTTP_PORT", "http"), ("LOG_JSON", "yes please")]).unwrap();
        assert_eq!(config.http_port, 8080);
        assert!(!config.log_json);
    }

    #[test]
    fn test_unknown_environment_is_error() {
        let err = load(&[("ENVIRONMENT", "moon")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvironment(ref e) if e == "moon"));
    }
}

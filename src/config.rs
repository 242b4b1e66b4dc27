use std::fmt;

use config::{ConfigError, File};
use serde::Deserialize;

use crate::models::{DEFAULT_PER_PAGE, MAX_PER_PAGE};

const CONFIG_BASENAME: &str = "blog";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Some(Self::Development),
            "production" | "prod" => Some(Self::Production),
            _ => None,
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => f.write_str("development"),
            Self::Production => f.write_str("production"),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub environment: Environment,
    /// `None` runs the in-memory store.
    pub database_url: Option<String>,
    pub page_size: u32,
    pub default_author: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawConfig {
    host: Option<String>,
    port: Option<u16>,
    app_env: Option<String>,
    node_env: Option<String>,
    database_url: Option<String>,
    page_size: Option<u32>,
    default_author: Option<String>,
}

impl Config {
    /// Reads `.env`, then an optional `blog.toml`, then the process environment.
    pub fn from_env() -> crate::Result<Self> {
        dotenvy::dotenv().ok();
        Self::load(config::Environment::default())
    }

    fn load(env: config::Environment) -> crate::Result<Self> {
        let raw: RawConfig = config::Config::builder()
            .add_source(File::with_name(CONFIG_BASENAME).required(false))
            .add_source(env.try_parsing(true))
            .build()?
            .try_deserialize()?;

        Ok(Self::from_raw(raw)?)
    }

    fn from_raw(raw: RawConfig) -> Result<Self, ConfigError> {
        let environment = match raw.app_env.or(raw.node_env) {
            Some(value) => Environment::parse(&value).ok_or_else(|| {
                ConfigError::Message(format!(
                    "APP_ENV must be `development` or `production`, got `{}`",
                    value
                ))
            })?,
            None => Environment::Development,
        };

        let page_size = raw.page_size.unwrap_or(DEFAULT_PER_PAGE);
        if page_size == 0 || page_size > MAX_PER_PAGE {
            return Err(ConfigError::Message(format!(
                "PAGE_SIZE must be between 1 and {}",
                MAX_PER_PAGE
            )));
        }

        Ok(Self {
            host: raw.host.unwrap_or_else(|| "0.0.0.0".to_string()),
            port: raw.port.unwrap_or(3000),
            environment,
            database_url: raw.database_url.filter(|url| !url.trim().is_empty()),
            page_size,
            default_author: raw
                .default_author
                .map(|name| name.trim().to_string())
                .filter(|name| !name.is_empty())
                .unwrap_or_else(|| "Anonymous".to_string()),
        })
    }

    pub fn web_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load_from(vars: &[(&str, &str)]) -> crate::Result<Config> {
        let source: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::load(config::Environment::default().source(Some(source)))
    }

    #[test]
    fn test_defaults() {
        let config = load_from(&[]).unwrap();
        assert_eq!(config.port, 3000);
        assert_eq!(config.web_addr(), "0.0.0.0:3000");
        assert_eq!(config.environment, Environment::Development);
        assert_eq!(config.database_url, None);
        assert_eq!(config.page_size, DEFAULT_PER_PAGE);
        assert_eq!(config.default_author, "Anonymous");
    }

    #[test]
    fn test_overrides() {
        let config = load_from(&[
            ("PORT", "8080"),
            ("HOST", "127.0.0.1"),
            ("APP_ENV", "production"),
            ("DATABASE_URL", "postgres://localhost/blog"),
            ("PAGE_SIZE", "25"),
        ])
        .unwrap();
        assert_eq!(config.web_addr(), "127.0.0.1:8080");
        assert!(config.is_production());
        assert_eq!(
            config.database_url.as_deref(),
            Some("postgres://localhost/blog")
        );
        assert_eq!(config.page_size, 25);
    }

    #[test]
    fn test_node_env_fallback() {
        let config = load_from(&[("NODE_ENV", "production")]).unwrap();
        assert!(config.is_production());
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(load_from(&[("PORT", "not-a-port")]).is_err());
        assert!(load_from(&[("APP_ENV", "staging")]).is_err());
        assert!(load_from(&[("PAGE_SIZE", "0")]).is_err());
    }
}

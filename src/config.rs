use log::info;
use std::env;
use std::fmt::Display;
use std::str::FromStr;

use crate::error::{Result, TallyError};

pub const DEFAULT_DATABASE_URL: &str = "sqlite:vote_tally.db";
pub const DEFAULT_REDIS_URL: &str = "redis://127.0.0.1:6379";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub database_url: String,
    pub database_max_connections: u32,
    pub redis_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            database_max_connections: DEFAULT_MAX_CONNECTIONS,
            redis_url: DEFAULT_REDIS_URL.to_string(),
        }
    }
}

impl Config {
    /// Reads the process environment; the binary loads `.env` into it at startup.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    // Split out so tests don't have to touch the process environment
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let database_max_connections = match lookup("DATABASE_MAX_CONNECTIONS") {
            Some(value) => parse_var("DATABASE_MAX_CONNECTIONS", &value)?,
            None => defaults.database_max_connections,
        };
        if database_max_connections == 0 {
            return Err(TallyError::Config(
                "DATABASE_MAX_CONNECTIONS must be at least 1".to_string(),
            ));
        }

        let config = Self {
            database_url: lookup("DATABASE_URL").unwrap_or_else(|| {
                info!("DATABASE_URL not set, using default: {}", DEFAULT_DATABASE_URL);
                defaults.database_url
            }),
            database_max_connections,
            redis_url: lookup("REDIS_URL").unwrap_or_else(|| {
                info!("REDIS_URL not set, using default: {}", DEFAULT_REDIS_URL);
                defaults.redis_url
            }),
        };

        Ok(config)
    }
}

fn parse_var<T: FromStr>(key: &str, value: &str) -> Result<T>
where
    T::Err: Display,
{
    value
        .trim()
        .parse()
        .map_err(|e| TallyError::Config(format!("Invalid {key} value {value:?}: {e}")))
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
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn values_are_read_from_the_environment() {
        let config = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "sqlite::memory:"),
            ("DATABASE_MAX_CONNECTIONS", "1"),
            ("REDIS_URL", "redis://cache:6379"),
        ]))
        .unwrap();

        assert_eq!(config.database_url, "sqlite::memory:");
        assert_eq!(config.database_max_connections, 1);
        assert_eq!(config.redis_url, "redis://cache:6379");
    }

    #[test]
    fn bad_numbers_are_rejected() {
        let err = Config::from_lookup(lookup_from(&[("DATABASE_MAX_CONNECTIONS", "many")])).unwrap_err();
        assert!(matches!(err, TallyError::Config(_)));

        let err = Config::from_lookup(lookup_from(&[("DATABASE_MAX_CONNECTIONS", "0")])).unwrap_err();
        assert!(matches!(err, TallyError::Config(_)));
    }
}

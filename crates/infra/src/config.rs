//! Database configuration loaded from the process environment.
//!
//! | variable | default |
//! |---|---|
//! | `DB_HOST` | required |
//! | `DB_PORT` | `3306` |
//! | `DB_USER` | required |
//! | `DB_PASSWORD` | empty |
//! | `DB_NAME` | required |
//! | `DB_MAX_CONNECTIONS` | `5` |

use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),

    #[error("invalid value {value:?} for {key}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Read a variable through `lookup`, treating blank values as unset.
pub fn optional(lookup: &impl Fn(&str) -> Option<String>, key: &'static str) -> Option<String> {
    lookup(key).filter(|v| !v.trim().is_empty())
}

pub fn required(lookup: &impl Fn(&str) -> Option<String>, key: &'static str) -> Result<String, ConfigError> {
    optional(lookup, key).ok_or(ConfigError::Missing(key))
}

/// Parse an optional variable, falling back to `default` when unset.
pub fn parsed_or<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: T,
) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: core::fmt::Display,
{
    match optional(lookup, key) {
        None => Ok(default),
        Some(raw) => raw.trim().parse::<T>().map_err(|e| ConfigError::Invalid {
            key,
            value: raw,
            reason: e.to_string(),
        }),
    }
}

/// Connection settings for the relational store.
#[derive(Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub database: String,
    pub max_connections: u32,
}

impl DatabaseConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        Ok(Self {
            host: required(&lookup, "DB_HOST")?,
            port: parsed_or(&lookup, "DB_PORT", 3306)?,
            user: required(&lookup, "DB_USER")?,
            password: lookup("DB_PASSWORD").unwrap_or_default(),
            database: required(&lookup, "DB_NAME")?,
            max_connections: parsed_or(&lookup, "DB_MAX_CONNECTIONS", 5)?,
        })
    }
}

// Keeps the password out of logs.
impl core::fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("database", &self.database)
            .field("max_connections", &self.max_connections)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn loads_required_fields_with_defaults() {
        let cfg = DatabaseConfig::from_lookup(env(&[
            ("DB_HOST", "db.local"),
            ("DB_USER", "shop"),
            ("DB_NAME", "inventory"),
        ]))
        .unwrap();

        assert_eq!(cfg.host, "db.local");
        assert_eq!(cfg.port, 3306);
        assert_eq!(cfg.password, "");
        assert_eq!(cfg.max_connections, 5);
    }

    #[test]
    fn missing_host_is_reported() {
        let err = DatabaseConfig::from_lookup(env(&[("DB_USER", "shop"), ("DB_NAME", "inventory")]))
            .unwrap_err();
        assert_eq!(err, ConfigError::Missing("DB_HOST"));
    }

    #[test]
    fn blank_value_counts_as_missing() {
        let err = DatabaseConfig::from_lookup(env(&[
            ("DB_HOST", "db.local"),
            ("DB_USER", "  "),
            ("DB_NAME", "inventory"),
        ]))
        .unwrap_err();
        assert_eq!(err, ConfigError::Missing("DB_USER"));
    }

    #[test]
    fn invalid_port_is_reported() {
        let err = DatabaseConfig::from_lookup(env(&[
            ("DB_HOST", "db.local"),
            ("DB_PORT", "mysql"),
            ("DB_USER", "shop"),
            ("DB_NAME", "inventory"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "DB_PORT", .. }));
    }

    #[test]
    fn debug_redacts_password() {
        let cfg = DatabaseConfig::from_lookup(env(&[
            ("DB_HOST", "db.local"),
            ("DB_USER", "shop"),
            ("DB_PASSWORD", "hunter2"),
            ("DB_NAME", "inventory"),
        ]))
        .unwrap();
        let rendered = format!("{cfg:?}");
        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("<redacted>"));
    }
}

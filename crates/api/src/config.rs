//! HTTP listener configuration (`BIND_ADDR`, `PORT`) and `.env` loading.

use std::io::ErrorKind;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use shopfloor_infra::config::{parsed_or, ConfigError};

pub const DEFAULT_PORT: u16 = 5000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApiConfig {
    pub bind_addr: IpAddr,
    pub port: u16,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind_addr: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
        }
    }
}

impl ApiConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        Ok(Self {
            bind_addr: parsed_or(&lookup, "BIND_ADDR", defaults.bind_addr)?,
            port: parsed_or(&lookup, "PORT", defaults.port)?,
        })
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_addr, self.port)
    }
}

/// Load `.env` from the working directory or one of its parents.
///
/// Returns `Ok(None)` when there is no such file. A file that exists but
/// cannot be read or parsed is an error.
pub fn load_dotenv() -> Result<Option<PathBuf>, dotenvy::Error> {
    missing_is_ok(dotenvy::dotenv())
}

fn missing_is_ok(result: Result<PathBuf, dotenvy::Error>) -> Result<Option<PathBuf>, dotenvy::Error> {
    match result {
        Ok(path) => Ok(Some(path)),
        Err(dotenvy::Error::Io(e)) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_all_interfaces_on_5000() {
        let cfg = ApiConfig::from_lookup(|_| None).unwrap();
        assert_eq!(cfg.socket_addr().to_string(), "0.0.0.0:5000");
    }

    #[test]
    fn reads_port_and_bind_addr() {
        let cfg = ApiConfig::from_lookup(|key| match key {
            "PORT" => Some("8081".to_string()),
            "BIND_ADDR" => Some("127.0.0.1".to_string()),
            _ => None,
        })
        .unwrap();
        assert_eq!(cfg.socket_addr().to_string(), "127.0.0.1:8081");
    }

    #[test]
    fn rejects_non_numeric_port() {
        let err = ApiConfig::from_lookup(|key| (key == "PORT").then(|| "http".to_string())).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "PORT", .. }));
    }

    #[test]
    fn missing_env_file_is_tolerated() {
        let missing = Err(dotenvy::Error::Io(std::io::Error::from(ErrorKind::NotFound)));
        assert!(matches!(missing_is_ok(missing), Ok(None)));

        let found = Ok(PathBuf::from("/srv/app/.env"));
        assert_eq!(missing_is_ok(found).unwrap(), Some(PathBuf::from("/srv/app/.env")));
    }

    #[test]
    fn malformed_env_file_is_reported() {
        let malformed = Err(dotenvy::Error::LineParse("DB_HOST='db.local".to_string(), 9));
        assert!(matches!(missing_is_ok(malformed), Err(dotenvy::Error::LineParse(_, 9))));

        let unreadable = Err(dotenvy::Error::Io(std::io::Error::from(ErrorKind::PermissionDenied)));
        assert!(matches!(missing_is_ok(unreadable), Err(dotenvy::Error::Io(_))));
    }
}

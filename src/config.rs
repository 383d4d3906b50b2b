use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::store::DEFAULT_DB_FILE;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 5000;

/// Configuration for the web service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Interface to bind
    pub host: String,
    /// TCP port to listen on
    pub port: u16,
    /// SQLite database file
    pub db_path: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            db_path: PathBuf::from(DEFAULT_DB_FILE),
        }
    }
}

impl ServerConfig {
    pub fn new(host: String, port: u16, db_path: PathBuf) -> Self {
        Self {
            host,
            port,
            db_path,
        }
    }

    /// `host:port`, ready for `TcpListener::bind`.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 5000);
        assert_eq!(config.db_path, PathBuf::from("notes.db"));
        assert_eq!(config.bind_address(), "127.0.0.1:5000");
    }

    #[test]
    fn test_bind_address() {
        let config = ServerConfig::new("0.0.0.0".to_string(), 8080, PathBuf::from("x.db"));
        assert_eq!(config.bind_address(), "0.0.0.0:8080");
    }
}

use std::env;
use std::net::{IpAddr, SocketAddr};
use std::num::ParseIntError;
use std::path::PathBuf;
use thiserror::Error;

use tickoff_config::{
    DEFAULT_CORS_ORIGINS, DEFAULT_DATABASE_PATH, DEFAULT_DB_MAX_CONNECTIONS, DEFAULT_HOST,
    DEFAULT_PORT, PORT, TICKOFF_CORS_ORIGINS, TICKOFF_DATABASE_PATH, TICKOFF_DB_MAX_CONNECTIONS,
    TICKOFF_HOST, TICKOFF_PORT,
};
use tickoff_storage::DatabaseConfig;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid port number: {0}")]
    InvalidPort(#[from] ParseIntError),
    #[error("Port {0} is out of valid range (1-65535)")]
    PortOutOfRange(u16),
    #[error("Invalid host address: {0}")]
    InvalidHost(String),
    #[error("Invalid database connection limit: {0}")]
    InvalidMaxConnections(String),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub database_path: PathBuf,
    pub db_max_connections: u32,
    pub cors_origins: Vec<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let host_str = env::var(TICKOFF_HOST).unwrap_or_else(|_| DEFAULT_HOST.to_string());
        let host = parse_host(&host_str)?;

        let port = match env::var(TICKOFF_PORT).or_else(|_| env::var(PORT)) {
            Ok(port_str) => parse_port(&port_str)?,
            Err(_) => DEFAULT_PORT,
        };

        let database_path = env::var(TICKOFF_DATABASE_PATH)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_DATABASE_PATH));

        let db_max_connections = match env::var(TICKOFF_DB_MAX_CONNECTIONS) {
            Ok(raw) => match raw.trim().parse::<u32>() {
                Ok(value) if value >= 1 => value,
                _ => return Err(ConfigError::InvalidMaxConnections(raw)),
            },
            Err(_) => DEFAULT_DB_MAX_CONNECTIONS,
        };

        let cors_origins = env::var(TICKOFF_CORS_ORIGINS)
            .unwrap_or_else(|_| DEFAULT_CORS_ORIGINS.to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Ok(Config {
            host,
            port,
            database_path,
            db_max_connections,
            cors_origins,
        })
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    pub fn database_config(&self) -> DatabaseConfig {
        DatabaseConfig {
            max_connections: self.db_max_connections,
            ..DatabaseConfig::with_path(self.database_path.clone())
        }
    }
}

pub fn parse_host(value: &str) -> Result<IpAddr, ConfigError> {
    let trimmed = value.trim();
    if trimmed.eq_ignore_ascii_case("localhost") {
        return Ok(IpAddr::from([127, 0, 0, 1]));
    }
    trimmed
        .parse::<IpAddr>()
        .map_err(|_| ConfigError::InvalidHost(value.to_string()))
}

pub fn parse_port(value: &str) -> Result<u16, ConfigError> {
    let port = value.trim().parse::<u16>()?;

    // Validate port is in valid range
    if port == 0 {
        return Err(ConfigError::PortOutOfRange(port));
    }
    Ok(port)
}

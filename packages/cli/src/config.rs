use std::net::IpAddr;
use std::num::ParseIntError;
use std::path::PathBuf;
use std::time::Duration;

use mindgate_config::constants::{
    CORS_ORIGIN, MINDGATE_BIND_ADDR, MINDGATE_DATA_DIR, MINDGATE_HTTP_CONNECT_TIMEOUT_SECS,
    MINDGATE_HTTP_TIMEOUT_SECS, MINDSDB_HOST, MINDSDB_PASSWORD, MINDSDB_PROJECT, MINDSDB_USER,
    PORT,
};
use mindgate_config::{env_var, env_var_or, parse_env_or};
use mindgate_core::{validation::require_identifier, DEFAULT_DATA_DIR, DEFAULT_PROJECT};
use mindgate_mindsdb::MindsDbConfig;
use thiserror::Error;

const DEFAULT_PORT: &str = "8000";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0";
const DEFAULT_CORS_ORIGIN: &str = "http://localhost:3000";
const DEFAULT_MINDSDB_HOST: &str = "http://127.0.0.1:47334";
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 120;
const DEFAULT_HTTP_CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid port number: {0}")]
    InvalidPort(#[from] ParseIntError),
    #[error("Port {0} is out of valid range (1-65535)")]
    PortOutOfRange(u16),
    #[error("Invalid bind address: {0}")]
    InvalidBindAddr(String),
    #[error("Invalid MindsDB project name: {0}")]
    InvalidProject(String),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub bind_addr: IpAddr,
    pub cors_origin: String,
    pub mindsdb_host: String,
    pub mindsdb_user: Option<String>,
    pub mindsdb_password: Option<String>,
    pub mindsdb_project: String,
    pub data_dir: PathBuf,
    pub request_timeout: Duration,
    pub connect_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let port = env_var_or(PORT, DEFAULT_PORT).parse::<u16>()?;

        // Validate port is in valid range
        if port == 0 {
            return Err(ConfigError::PortOutOfRange(port));
        }

        let bind_raw = env_var_or(MINDGATE_BIND_ADDR, DEFAULT_BIND_ADDR);
        let bind_addr = bind_raw
            .parse::<IpAddr>()
            .map_err(|_| ConfigError::InvalidBindAddr(bind_raw.clone()))?;

        // The project name is interpolated unquoted into statements
        let mindsdb_project = env_var_or(MINDSDB_PROJECT, DEFAULT_PROJECT);
        require_identifier(MINDSDB_PROJECT, &mindsdb_project)
            .map_err(|e| ConfigError::InvalidProject(e.to_string()))?;

        Ok(Config {
            port,
            bind_addr,
            cors_origin: env_var_or(CORS_ORIGIN, DEFAULT_CORS_ORIGIN),
            mindsdb_host: env_var_or(MINDSDB_HOST, DEFAULT_MINDSDB_HOST),
            mindsdb_user: env_var(MINDSDB_USER),
            mindsdb_password: env_var(MINDSDB_PASSWORD),
            mindsdb_project,
            data_dir: PathBuf::from(env_var_or(MINDGATE_DATA_DIR, DEFAULT_DATA_DIR)),
            request_timeout: Duration::from_secs(parse_env_or(
                MINDGATE_HTTP_TIMEOUT_SECS,
                DEFAULT_HTTP_TIMEOUT_SECS,
            )),
            connect_timeout: Duration::from_secs(parse_env_or(
                MINDGATE_HTTP_CONNECT_TIMEOUT_SECS,
                DEFAULT_HTTP_CONNECT_TIMEOUT_SECS,
            )),
        })
    }

    /// Connection settings for the MindsDB client
    pub fn mindsdb(&self) -> MindsDbConfig {
        let mut mindsdb =
            MindsDbConfig::new(&self.mindsdb_host).with_project(&self.mindsdb_project);
        mindsdb.user = self.mindsdb_user.clone();
        mindsdb.password = self.mindsdb_password.clone();
        mindsdb.request_timeout = self.request_timeout;
        mindsdb.connect_timeout = self.connect_timeout;
        mindsdb
    }
}

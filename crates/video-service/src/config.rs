use eyre::{Result, eyre};
use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;
use video_pipeline::services::orchestrator::DEFAULT_ACTION_TIMEOUT;

pub const DEFAULT_PORT: u16 = 8000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    pub host: IpAddr,
    pub port: u16,
    pub database_url: Option<String>,
    pub database_name: Option<String>,
    pub action_timeout: Duration,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            database_url: None,
            database_name: None,
            action_timeout: DEFAULT_ACTION_TIMEOUT,
        }
    }
}

impl ServiceConfig {
    /// Loads `.env` (if present) and reads the process environment.
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable lookup. Blank values count
    /// as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let defaults = Self::default();

        let host = match get("HOST") {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|e| eyre!("Invalid HOST '{}': {}", raw, e))?,
            None => defaults.host,
        };

        let port = match get("PORT") {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|e| eyre!("Invalid PORT '{}': {}", raw, e))?,
            None => defaults.port,
        };

        let action_timeout = match get("ACTION_TIMEOUT_SECS") {
            Some(raw) => {
                let secs: u64 = raw
                    .trim()
                    .parse()
                    .map_err(|e| eyre!("Invalid ACTION_TIMEOUT_SECS '{}': {}", raw, e))?;
                if secs == 0 {
                    return Err(eyre!("ACTION_TIMEOUT_SECS must be greater than zero"));
                }
                Duration::from_secs(secs)
            }
            None => defaults.action_timeout,
        };

        Ok(Self {
            host,
            port,
            database_url: get("DATABASE_URL"),
            database_name: get("DATABASE_NAME"),
            action_timeout,
        })
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

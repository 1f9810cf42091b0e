use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use figment::Figment;
use figment::providers::Env;
use serde::Deserialize;

use crate::error::Error;

pub const DEFAULT_ERRORS_PATH: &str = "errors.json";
pub const DEFAULT_BIND_PORT: u16 = 8000;
pub const DEFAULT_CORS_ORIGIN: &str = "http://localhost:3000";
pub const DEFAULT_RPC_TIMEOUT_SECS: u64 = 30;

/// Environment variables the service reads. Nothing else in the process
/// environment is consulted.
pub const ENV_KEYS: [&str; 5] = [
    "SOLANA_RPC_URL",
    "ERRORS_PATH",
    "BIND_ADDR",
    "CORS_ORIGINS",
    "RPC_TIMEOUT_SECS",
];

/// Process settings, read once at startup.
///
/// | variable | default |
/// |---|---|
/// | `SOLANA_RPC_URL` | required |
/// | `ERRORS_PATH` | `errors.json` |
/// | `BIND_ADDR` | `127.0.0.1:8000` |
/// | `CORS_ORIGINS` | `http://localhost:3000` (comma-separated) |
/// | `RPC_TIMEOUT_SECS` | `30` |
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    #[serde(rename = "solana_rpc_url")]
    pub rpc_url: String,
    pub errors_path: PathBuf,
    pub bind_addr: SocketAddr,
    /// Comma-separated list as given; see [`Config::cors_origins`].
    #[serde(rename = "cors_origins")]
    pub cors_origins_raw: String,
    pub rpc_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rpc_url: String::new(),
            errors_path: PathBuf::from(DEFAULT_ERRORS_PATH),
            bind_addr: SocketAddr::from(([127, 0, 0, 1], DEFAULT_BIND_PORT)),
            cors_origins_raw: DEFAULT_CORS_ORIGIN.to_string(),
            rpc_timeout_secs: DEFAULT_RPC_TIMEOUT_SECS,
        }
    }
}

impl Config {
    /// Defaults overlaid with the variables in [`ENV_KEYS`].
    pub fn figment() -> Figment {
        Figment::new().merge(Env::raw().only(&ENV_KEYS))
    }

    pub fn from_env() -> Result<Self, Error> {
        Self::from_figment(&Self::figment())
    }

    pub fn from_figment(figment: &Figment) -> Result<Self, Error> {
        let config: Self = figment.extract().map_err(|e| Error::Config {
            reason: e.to_string(),
        })?;
        config.validate()
    }

    fn validate(mut self) -> Result<Self, Error> {
        self.rpc_url = self.rpc_url.trim().to_string();
        if self.rpc_url.is_empty() {
            return Err(Error::Config {
                reason: "SOLANA_RPC_URL is not set".into(),
            });
        }
        if self.rpc_timeout_secs == 0 {
            return Err(Error::Config {
                reason: "RPC_TIMEOUT_SECS must be greater than zero".into(),
            });
        }
        Ok(self)
    }

    pub fn rpc_timeout(&self) -> Duration {
        Duration::from_secs(self.rpc_timeout_secs)
    }

    /// Allowed browser origins, blanks dropped.
    pub fn cors_origins(&self) -> Vec<String> {
        self.cors_origins_raw
            .split(',')
            .map(str::trim)
            .filter(|o| !o.is_empty())
            .map(String::from)
            .collect()
    }
}

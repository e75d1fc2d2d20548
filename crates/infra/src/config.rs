//! Configuration loading and representation.
//!
//! Everything comes from environment variables. The binary loads a `.env`
//! file into the environment first (if present), so this module only ever
//! looks at variables.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::order_store::ORDERS_DIR_NAME;
use crate::snapshot_store::SNAPSHOT_FILE_NAME;

pub const ENV_PARTNER_TOKENS: &str = "AUTHORIZATIONS_TOKEN";
pub const ENV_CREATE_TOKEN: &str = "AUTH_CREATE_TOKEN";
pub const ENV_DATA_DIR: &str = "STOCKGATE_DATA_DIR";
pub const ENV_BIND: &str = "STOCKGATE_BIND";
pub const ENV_IO_TIMEOUT_MS: &str = "STOCKGATE_IO_TIMEOUT_MS";
pub const ENV_MAX_BODY_BYTES: &str = "STOCKGATE_MAX_BODY_BYTES";

/// Request body cap unless overridden; sized for a full-warehouse snapshot.
pub const DEFAULT_MAX_BODY_BYTES: usize = 64 * 1024 * 1024;

const DEFAULT_BIND: &str = "0.0.0.0:8000";
const DEFAULT_IO_TIMEOUT_MS: u64 = 5_000;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("environment variable {0} must be set")]
    Missing(&'static str),

    #[error("environment variable {var} is invalid: {reason}")]
    Invalid { var: &'static str, reason: String },
}

/// Runtime settings of the gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    /// Tokens the marketplace partner may call with (membership check).
    pub partner_tokens: Vec<String>,
    /// Token of the upstream supplier that may replace the snapshot.
    pub create_token: String,
    /// Holds the snapshot file and the order event directory.
    pub data_dir: PathBuf,
    pub bind_addr: SocketAddr,
    /// Upper bound for any single storage operation.
    pub io_timeout: Duration,
    /// Largest accepted request body, in bytes.
    pub max_body_bytes: usize,
}

impl GatewayConfig {
    /// Load from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load through an arbitrary variable lookup (tests pass a map).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let partner_tokens = parse_token_list(
            &lookup(ENV_PARTNER_TOKENS).ok_or(ConfigError::Missing(ENV_PARTNER_TOKENS))?,
        );
        if partner_tokens.is_empty() {
            return Err(ConfigError::Invalid {
                var: ENV_PARTNER_TOKENS,
                reason: "at least one token is required".to_string(),
            });
        }

        let create_token = lookup(ENV_CREATE_TOKEN)
            .map(|t| t.trim().to_string())
            .ok_or(ConfigError::Missing(ENV_CREATE_TOKEN))?;
        if create_token.is_empty() {
            return Err(ConfigError::Invalid {
                var: ENV_CREATE_TOKEN,
                reason: "token cannot be empty".to_string(),
            });
        }

        let data_dir = lookup(ENV_DATA_DIR)
            .filter(|d| !d.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));

        let bind_raw = lookup(ENV_BIND).unwrap_or_else(|| DEFAULT_BIND.to_string());
        let bind_addr = bind_raw.parse().map_err(|e| ConfigError::Invalid {
            var: ENV_BIND,
            reason: format!("{bind_raw:?}: {e}"),
        })?;

        let io_timeout_ms = match lookup(ENV_IO_TIMEOUT_MS) {
            Some(raw) => raw.trim().parse::<u64>().map_err(|e| ConfigError::Invalid {
                var: ENV_IO_TIMEOUT_MS,
                reason: format!("{raw:?}: {e}"),
            })?,
            None => DEFAULT_IO_TIMEOUT_MS,
        };
        if io_timeout_ms == 0 {
            return Err(ConfigError::Invalid {
                var: ENV_IO_TIMEOUT_MS,
                reason: "timeout must be positive".to_string(),
            });
        }

        let max_body_bytes = match lookup(ENV_MAX_BODY_BYTES) {
            Some(raw) => raw.trim().parse::<usize>().map_err(|e| ConfigError::Invalid {
                var: ENV_MAX_BODY_BYTES,
                reason: format!("{raw:?}: {e}"),
            })?,
            None => DEFAULT_MAX_BODY_BYTES,
        };
        if max_body_bytes == 0 {
            return Err(ConfigError::Invalid {
                var: ENV_MAX_BODY_BYTES,
                reason: "limit must be positive".to_string(),
            });
        }

        Ok(Self {
            partner_tokens,
            create_token,
            data_dir,
            bind_addr,
            io_timeout: Duration::from_millis(io_timeout_ms),
            max_body_bytes,
        })
    }

    pub fn snapshot_path(&self) -> PathBuf {
        self.data_dir.join(SNAPSHOT_FILE_NAME)
    }

    pub fn orders_dir(&self) -> PathBuf {
        self.data_dir.join(ORDERS_DIR_NAME)
    }
}

/// Comma-separated list; blanks are dropped.
fn parse_token_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

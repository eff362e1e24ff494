//! Process configuration, read once from the environment at startup.

use std::net::SocketAddr;

use thiserror::Error;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid BIND_ADDR '{0}'")]
    BindAddr(String),

    #[error("unknown PANTRY_STORE '{0}' (expected memory or postgres)")]
    UnknownStore(String),

    #[error("PANTRY_STORE=postgres requires DATABASE_URL")]
    MissingDatabaseUrl,
}

/// Which document store backs the pantry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    Memory,
    Postgres { database_url: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub bind_addr: SocketAddr,
    pub store: StoreBackend,
    /// Read voice transcripts from stdin, one per line.
    pub voice_stdin: bool,
}

impl ApiConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup (the environment in production, a map in tests).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let raw_addr = lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = raw_addr
            .parse()
            .map_err(|_| ConfigError::BindAddr(raw_addr.clone()))?;

        let store = match lookup("PANTRY_STORE")
            .map(|s| s.trim().to_ascii_lowercase())
            .as_deref()
        {
            None | Some("") | Some("memory") => StoreBackend::Memory,
            Some("postgres") => StoreBackend::Postgres {
                database_url: lookup("DATABASE_URL").ok_or(ConfigError::MissingDatabaseUrl)?,
            },
            Some(other) => return Err(ConfigError::UnknownStore(other.to_string())),
        };

        let voice_stdin = lookup("PANTRY_VOICE_STDIN")
            .is_some_and(|v| matches!(v.trim(), "1" | "true" | "yes"));

        Ok(Self {
            bind_addr,
            store,
            voice_stdin,
        })
    }
}

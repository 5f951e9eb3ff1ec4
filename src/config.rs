use std::env;
use std::ops::RangeInclusive;
use std::path::PathBuf;
use std::time::Duration;
use log::warn;
use thiserror::Error;

const DEV_JWT_SECRET: &str = "task-manager-development-secret";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{key} must be set")]
    Missing { key: &'static str },

    #[error("{key} has an invalid value: {value}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub enum AllowedOrigins {
    Any,
    List(Vec<String>),
}

/// Runtime settings, read once at startup and shared with every worker.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub server_address: String,
    pub max_connections: u32,
    pub acquire_timeout: Duration,
    pub cors_origins: AllowedOrigins,
    pub static_dir: PathBuf,
    pub jwt_secret: String,
    pub jwt_expiry: chrono::Duration,
    pub bcrypt_cost: u32,
}

impl Config {
    /// Reads the process environment. Call `dotenv().ok()` first to pick up a `.env` file.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let jwt_secret = match lookup("JWT_SECRET").filter(|s| !s.is_empty()) {
            Some(secret) => secret,
            None if cfg!(debug_assertions) => {
                warn!("JWT_SECRET not set, using the development secret");
                DEV_JWT_SECRET.to_string()
            }
            None => return Err(ConfigError::Missing { key: "JWT_SECRET" }),
        };

        Ok(Config {
            database_url: lookup("DATABASE_URL")
                .unwrap_or_else(|| "sqlite://task_manager.db".to_string()),
            server_address: lookup("SERVER_ADDRESS")
                .unwrap_or_else(|| "0.0.0.0:8080".to_string()),
            max_connections: parse_in_range(&lookup, "DB_MAX_CONNECTIONS", 5, 1..=u32::MAX)?,
            acquire_timeout: Duration::from_secs(parse_or(&lookup, "DB_ACQUIRE_TIMEOUT_SECS", 30)?),
            cors_origins: parse_origins(lookup("CORS_ORIGINS").as_deref().unwrap_or("*")),
            static_dir: PathBuf::from(lookup("STATIC_DIR").unwrap_or_else(|| "static".to_string())),
            jwt_secret,
            jwt_expiry: parse_expiry(&lookup)?,
            bcrypt_cost: parse_in_range(&lookup, "BCRYPT_COST", bcrypt::DEFAULT_COST, 4..=31)?,
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value }),
        None => Ok(default),
    }
}

fn parse_in_range<F, T>(
    lookup: &F,
    key: &'static str,
    default: T,
    range: RangeInclusive<T>,
) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr + PartialOrd,
{
    let value = parse_or(lookup, key, default)?;
    if range.contains(&value) {
        Ok(value)
    } else {
        Err(ConfigError::Invalid {
            key,
            value: lookup(key).unwrap_or_default(),
        })
    }
}

// Positive and small enough that chrono can represent it
fn parse_expiry<F>(lookup: &F) -> Result<chrono::Duration, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let minutes: i64 = parse_or(lookup, "JWT_EXPIRY_MINUTES", 30)?;
    if minutes <= 0 {
        return Err(ConfigError::Invalid {
            key: "JWT_EXPIRY_MINUTES",
            value: minutes.to_string(),
        });
    }
    chrono::Duration::try_minutes(minutes).ok_or_else(|| ConfigError::Invalid {
        key: "JWT_EXPIRY_MINUTES",
        value: minutes.to_string(),
    })
}

fn parse_origins(raw: &str) -> AllowedOrigins {
    let origins: Vec<String> = raw
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();

    if origins.is_empty() || origins.iter().any(|o| o == "*") {
        AllowedOrigins::Any
    } else {
        AllowedOrigins::List(origins)
    }
}

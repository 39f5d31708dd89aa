use anyhow::{Context, Result};
use dotenvy::dotenv;
use once_cell::sync::OnceCell;
use std::env;
use std::str::FromStr;
use std::time::Duration;

static CONFIG: OnceCell<Config> = OnceCell::new();

pub const DEFAULT_BACKEND_PORT: u16 = 5000;
pub const DEFAULT_BFF_PORT: u16 = 3000;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    /// Unset means "use the default port of whichever layer is starting".
    pub port: Option<u16>,
    /// Without a MongoDB URI the backend serves from the seeded in-memory store.
    pub mongo_uri: Option<String>,
    pub mongo_db_name: String,
    pub mongo_collection: String,
    pub backend_url: String,
    pub upstream_timeout: Duration,
    pub allowed_origin: Option<String>,
    pub static_dir: Option<String>,
}

impl Config {
    /// Process-wide configuration, read from the environment (and `.env`) on first use.
    pub fn get() -> Result<&'static Config> {
        CONFIG.get_or_try_init(|| {
            dotenv().ok(); // Load .env file if present
            Self::from_env()
        })
    }

    pub fn from_env() -> Result<Self> {
        Ok(Config {
            host: get_env_or_default("HOST", "0.0.0.0"),
            port: get_env_opt("PORT")
                .map(|port| parse_env("PORT", &port))
                .transpose()?,
            mongo_uri: get_env_opt("MONGO_URI"),
            mongo_db_name: get_env_or_default("MONGO_DB_NAME", "search"),
            mongo_collection: get_env_or_default("MONGO_COLLECTION", "search_items"),
            backend_url: get_env_or_default("BACKEND_URL", "http://localhost:5000"),
            upstream_timeout: Duration::from_millis(parse_env(
                "UPSTREAM_TIMEOUT_MS",
                &get_env_or_default("UPSTREAM_TIMEOUT_MS", "5000"),
            )?),
            allowed_origin: get_env_opt("ALLOWED_ORIGIN"),
            static_dir: get_env_opt("STATIC_DIR"),
        })
    }
}

fn get_env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn get_env_or_default(key: &str, default: &str) -> String {
    get_env_opt(key).unwrap_or_else(|| default.to_string())
}

fn parse_env<T>(key: &str, value: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    value
        .trim()
        .parse()
        .with_context(|| format!("Invalid value for environment variable {key}: {value}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_env_accepts_numbers() {
        assert_eq!(parse_env::<u16>("PORT", " 8080 ").unwrap(), 8080);
        assert_eq!(parse_env::<u64>("UPSTREAM_TIMEOUT_MS", "5000").unwrap(), 5000);
    }

    #[test]
    fn test_parse_env_reports_bad_values() {
        let err = parse_env::<u16>("PORT", "eighty").unwrap_err();
        assert!(
            format!("{err:#}").starts_with("Invalid value for environment variable PORT: eighty")
        );
        assert!(parse_env::<u16>("PORT", "70000").is_err());
        assert!(parse_env::<u64>("UPSTREAM_TIMEOUT_MS", "-1").is_err());
    }
}

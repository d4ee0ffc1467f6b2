use crate::error::Error;
use log::info;
use std::path::PathBuf;

/// Process configuration, read once from the environment (and `.env`) at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub url_host: String,
    pub static_dir: PathBuf,
    pub bind_addr: String,
    pub max_connections: u32,
    /// Users allowed to list every survey.
    pub super_admins: Vec<i32>,
}

fn var_or(key: &str, default: &str) -> String {
    dotenv::var(key).unwrap_or_else(|_| {
        info!("{} not set, using default: {}", key, default);
        default.to_owned()
    })
}

impl Config {
    pub fn load() -> Result<Self, Error> {
        let max_connections = var_or("MAX_CONNECTIONS", "5")
            .parse()
            .map_err(|e| Error::ConfigError(format!("invalid MAX_CONNECTIONS: {}", e)))?;
        let super_admins = var_or("SUPER_ADMINS", "")
            .split(',')
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(|v| v.parse().map_err(|e| Error::ConfigError(format!("invalid SUPER_ADMINS entry {}: {}", v, e))))
            .collect::<Result<Vec<i32>, Error>>()?;
        Ok(Config {
            database_url: dotenv::var("DATABASE_URL")?,
            jwt_secret: dotenv::var("JWT_SECRET")?,
            url_host: dotenv::var("URL_HOST")?,
            static_dir: PathBuf::from(var_or("STATIC_DIR", "./static")),
            bind_addr: var_or("BIND_ADDR", "0.0.0.0:8000"),
            max_connections,
            super_admins,
        })
    }
}

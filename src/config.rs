//! Environment-based configuration, read once at startup.

use anyhow::{Result, bail};
use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    /// Origin allowed by the CORS policy. "*" permits any origin.
    pub allowed_origin: String,

    /// Port the HTTP server binds to.
    pub port: u16,

    pub database: DatabaseConfig,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub server: String,
    pub name: String,
    pub user: String,
    pub password: String,
}

impl Config {
    /// Reads the required environment variables. The process refuses to
    /// start when any of them is missing or blank.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            allowed_origin: required_env("ALLOWED_ORIGIN")?,
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            database: DatabaseConfig {
                server: required_env("DB_SERVER")?,
                name: required_env("DB_NAME")?,
                user: required_env("DB_USER")?,
                password: required_env("DB_PASSWORD")?,
            },
        })
    }

    #[must_use]
    pub fn database_url(&self) -> String {
        format!(
            "postgres://{}:{}@{}/{}",
            self.database.user, self.database.password, self.database.server, self.database.name
        )
    }
}

fn required_env(key: &str) -> Result<String> {
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => bail!("{key} is not set or is empty"),
    }
}

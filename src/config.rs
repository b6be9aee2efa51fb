use std::env;

use chrono::Weekday;

/// Which [`crate::db::DocumentStore`] implementation backs the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Postgres,
    Memory,
}

impl std::str::FromStr for StoreBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(Self::Postgres),
            "memory" => Ok(Self::Memory),
            other => anyhow::bail!("Unknown STORE_BACKEND: {}", other),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub store_backend: StoreBackend,
    pub database_url: Option<String>,
    pub db_max_connections: u32,
    pub host: String,
    pub port: u16,
    pub app_base_url: String,
    /// First day of a calendar week.
    pub week_start: Weekday,
    /// Seed demo recipes and menus into the memory backend on startup.
    pub seed_demo: bool,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_source(|key| env::var(key).ok())
    }

    /// Build a config from any key lookup; empty values count as unset.
    pub fn from_source<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let store_backend: StoreBackend = get("STORE_BACKEND")
            .unwrap_or_else(|| "postgres".into())
            .parse()?;
        let database_url = get("DATABASE_URL");
        if store_backend == StoreBackend::Postgres && database_url.is_none() {
            anyhow::bail!("Missing required env var: DATABASE_URL");
        }

        let week_start = get("WEEK_START").unwrap_or_else(|| "sunday".into());
        let week_start: Weekday = week_start
            .trim()
            .parse()
            .map_err(|_| anyhow::anyhow!("Invalid WEEK_START: {}", week_start))?;

        Ok(Self {
            store_backend,
            database_url,
            db_max_connections: get("DB_MAX_CONNECTIONS")
                .unwrap_or_else(|| "10".into())
                .parse()?,
            host: get("HOST").unwrap_or_else(|| "0.0.0.0".into()),
            port: get("PORT").unwrap_or_else(|| "8080".into()).parse()?,
            app_base_url: get("APP_BASE_URL").unwrap_or_else(|| "http://localhost".into()),
            week_start,
            seed_demo: get("SEED_DEMO")
                .map(|v| matches!(v.to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
                .unwrap_or(false),
        })
    }

    /// In-memory configuration used by tests and local experiments.
    pub fn memory() -> Self {
        Self {
            store_backend: StoreBackend::Memory,
            database_url: None,
            db_max_connections: 1,
            host: "127.0.0.1".into(),
            port: 0,
            app_base_url: "http://localhost".into(),
            week_start: Weekday::Sun,
            seed_demo: false,
        }
    }
}

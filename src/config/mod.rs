use anyhow::anyhow;
use config::{Config as Cfg, File};
use serde::Deserialize;
use std::env;

/// Settings shared by every deployment: file-based with `APP__` env overrides.
#[derive(Debug, Deserialize, Clone)]
pub struct CommonConfig {
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_port() -> u16 {
    8080
}

impl CommonConfig {
    pub fn load() -> anyhow::Result<Self> {
        let config = Cfg::builder()
            .add_source(File::with_name("configuration").required(false))
            .add_source(config::Environment::with_prefix("APP").separator("__"))
            .build()?;

        Ok(config.try_deserialize()?)
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub common: CommonConfig,
    pub database: DatabaseConfig,
    pub google: GoogleConfig,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

#[derive(Debug, Clone)]
pub struct GoogleConfig {
    /// Absence is not a startup error: requests fail individually with
    /// HTTP 500 "API Key missing" until the key is provided.
    pub api_key: Option<String>,
    pub model: String,
}

impl AppConfig {
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let common = CommonConfig::load()?;
        let is_prod = env::var("ENVIRONMENT").unwrap_or_else(|_| "dev".to_string()) == "prod";

        Ok(AppConfig {
            common,
            database: DatabaseConfig {
                url: get_env("DATABASE_URL", Some("sqlite://classifai.db?mode=rwc"), is_prod)?,
                max_connections: get_env("DATABASE_MAX_CONNECTIONS", Some("5"), is_prod)?
                    .parse()
                    .unwrap_or(5),
                min_connections: get_env("DATABASE_MIN_CONNECTIONS", Some("1"), is_prod)?
                    .parse()
                    .unwrap_or(1),
            },
            google: GoogleConfig {
                api_key: env::var("GEMINI_API_KEY").ok().filter(|key| !key.is_empty()),
                model: get_env("GEMINI_MODEL", Some("gemini-2.5-flash"), is_prod)?,
            },
        })
    }
}

fn get_env(key: &str, default: Option<&str>, is_prod: bool) -> anyhow::Result<String> {
    match env::var(key) {
        Ok(val) => Ok(val),
        Err(_) => {
            if is_prod {
                Err(anyhow!("{} is required in production but not set", key))
            } else if let Some(def) = default {
                Ok(def.to_string())
            } else {
                Err(anyhow!("{} is required but not set", key))
            }
        }
    }
}

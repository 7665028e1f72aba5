//! config/app_config.rs
//! Configuración del servidor, leída del entorno (y de `.env` vía dotenv).

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database_path: PathBuf,
    pub db_max_connections: u32,
    /// Prefijo de las rutas ("/api"); vacío monta en la raíz.
    pub api_prefix: String,
    /// `None`: lo que decida actix (núcleos físicos).
    pub workers: Option<usize>,
    /// Vacío: se permite cualquier origen.
    pub cors_allowed_origins: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            host: "0.0.0.0".to_string(),
            port: 8000,
            database_path: PathBuf::from("data").join("messages.db"),
            db_max_connections: 5,
            api_prefix: "/api".to_string(),
            workers: None,
            cors_allowed_origins: Vec::new(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Igual que `from_env`, con una fuente de variables inyectable.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = AppConfig::default();

        let workers = match lookup("WORKERS") {
            Some(raw) => Some(parse_var::<usize>("WORKERS", &raw)?),
            None => None,
        };

        Ok(AppConfig {
            host: lookup("HOST").unwrap_or(defaults.host),
            port: match lookup("PORT") {
                Some(raw) => parse_var("PORT", &raw)?,
                None => defaults.port,
            },
            database_path: lookup("DATABASE_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.database_path),
            db_max_connections: match lookup("DB_MAX_CONNECTIONS") {
                Some(raw) => parse_var("DB_MAX_CONNECTIONS", &raw)?,
                None => defaults.db_max_connections,
            },
            api_prefix: lookup("API_PREFIX")
                .map(|p| normalize_prefix(&p))
                .unwrap_or(defaults.api_prefix),
            workers,
            cors_allowed_origins: lookup("CORS_ALLOWED_ORIGINS")
                .map(|raw| split_list(&raw))
                .unwrap_or_default(),
        })
    }
}

fn parse_var<T>(key: &str, raw: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    raw.trim()
        .parse::<T>()
        .with_context(|| format!("{} tiene un valor inválido: '{}'", key, raw))
}

fn normalize_prefix(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{}", trimmed)
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

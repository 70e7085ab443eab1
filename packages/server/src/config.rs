//! Server configuration read from environment variables.
//!
//! | Variable | Default |
//! |---|---|
//! | `BIND_ADDR` | `127.0.0.1` |
//! | `PORT` | `8080` |
//! | `CORS_ORIGINS` | `["http://localhost:5173"]` |
//! | `FAVORITES_PATH` | `data/favorites.json` |
//! | `STATIC_DIR` | `app/dist` |

use std::path::PathBuf;

use signal_scope_favorites::DEFAULT_FAVORITES_PATH;

const DEFAULT_BIND_ADDR: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_CORS_ORIGINS: &str = r#"["http://localhost:5173"]"#;
const DEFAULT_STATIC_DIR: &str = "app/dist";

/// Runtime settings for [`crate::run_server`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Address to bind the HTTP listener to.
    pub bind_addr: String,
    /// Port to bind the HTTP listener to.
    pub port: u16,
    /// Origins allowed by CORS. `*` allows any origin.
    pub cors_origins: Vec<String>,
    /// JSON file holding saved favorites.
    pub favorites_path: PathBuf,
    /// Frontend build served at `/` when the directory exists.
    pub static_dir: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

impl ServerConfig {
    /// Reads the configuration from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let bind_addr = lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());

        let port = lookup("PORT").map_or(DEFAULT_PORT, |raw| {
            raw.trim().parse().unwrap_or_else(|_| {
                log::warn!("Invalid PORT {raw:?}, using {DEFAULT_PORT}");
                DEFAULT_PORT
            })
        });

        let cors_origins =
            parse_cors_origins(&lookup("CORS_ORIGINS").unwrap_or_else(|| DEFAULT_CORS_ORIGINS.to_string()));

        let favorites_path = lookup("FAVORITES_PATH")
            .map_or_else(|| PathBuf::from(DEFAULT_FAVORITES_PATH), PathBuf::from);

        let static_dir =
            lookup("STATIC_DIR").map_or_else(|| PathBuf::from(DEFAULT_STATIC_DIR), PathBuf::from);

        Self {
            bind_addr,
            port,
            cors_origins,
            favorites_path,
            static_dir,
        }
    }
}

/// Parses the `CORS_ORIGINS` value.
///
/// Accepts a JSON array (`["https://a", "https://b"]`), the same array
/// wrapped in an extra layer of quotes as some hosting dashboards store it,
/// a single bare origin, or a comma-separated list. Empty entries are
/// dropped.
#[must_use]
pub fn parse_cors_origins(raw: &str) -> Vec<String> {
    let mut value = raw.trim().to_string();

    if value.len() >= 2 && value.starts_with('"') && value.ends_with('"') {
        value = value[1..value.len() - 1].replace("\\\"", "\"");
    }

    let origins: Vec<String> = match serde_json::from_str::<serde_json::Value>(&value) {
        Ok(serde_json::Value::Array(items)) => items
            .into_iter()
            .map(|item| match item {
                serde_json::Value::String(s) => s,
                other => other.to_string(),
            })
            .collect(),
        Ok(serde_json::Value::String(s)) => vec![s],
        Ok(other) => vec![other.to_string()],
        Err(_) if value.contains(',') => value
            .split(',')
            .map(|origin| origin.trim().trim_matches(['"', '\'']).to_string())
            .collect(),
        Err(_) => vec![value],
    };

    origins
        .into_iter()
        .map(|origin| origin.trim().to_string())
        .filter(|origin| !origin.is_empty())
        .collect()
}

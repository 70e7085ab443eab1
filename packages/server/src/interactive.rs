//! Interactive mode for the server.
//!
//! Walks through the `SignalScope` server settings, each prefilled from the
//! environment, then starts the server.

use std::path::{Path, PathBuf};

use dialoguer::{Confirm, Input};

use crate::ServerConfig;

fn prompt_path(prompt: &str, current: &Path) -> PathBuf {
    Input::<String>::new()
        .with_prompt(prompt)
        .default(current.display().to_string())
        .interact_text()
        .map_or_else(|_| current.to_path_buf(), PathBuf::from)
}

/// One-line description of what the server will do with `config`.
#[must_use]
pub fn summary(config: &ServerConfig) -> String {
    let static_files = if config.static_dir.is_dir() {
        format!("serving {}", config.static_dir.display())
    } else {
        "API only".to_string()
    };

    format!(
        "http://{}:{} with favorites in {} ({static_files})",
        config.bind_addr,
        config.port,
        config.favorites_path.display()
    )
}

/// Runs the server in interactive mode, prompting for configuration.
///
/// Starts from [`ServerConfig::from_env`] and asks for the bind address,
/// port, favorites file and dashboard directory before delegating to
/// [`super::run_server`].
///
/// # Errors
///
/// Returns an `std::io::Result` error if the underlying server fails to
/// start.
#[allow(clippy::future_not_send)]
pub async fn run() -> std::io::Result<()> {
    println!("SignalScope Server");
    println!();

    let mut config = ServerConfig::from_env();

    config.bind_addr = Input::new()
        .with_prompt("Bind address (BIND_ADDR)")
        .default(config.bind_addr.clone())
        .interact_text()
        .unwrap_or_else(|_| config.bind_addr.clone());

    config.port = Input::new()
        .with_prompt("Port (PORT)")
        .default(config.port)
        .interact_text()
        .unwrap_or(config.port);

    config.favorites_path = prompt_path("Favorites file (FAVORITES_PATH)", &config.favorites_path);
    config.static_dir = prompt_path("Dashboard directory (STATIC_DIR)", &config.static_dir);

    if !Confirm::new()
        .with_prompt(format!("Start SignalScope on {}?", summary(&config)))
        .default(true)
        .interact()
        .unwrap_or(true)
    {
        println!("Cancelled.");
        return Ok(());
    }

    super::run_server(config).await
}

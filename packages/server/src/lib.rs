#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web API server for the `SignalScope` coverage dashboard.
//!
//! Serves the REST API over an in-memory tower/report snapshot and the
//! built frontend from `STATIC_DIR`. Towers are fixed at startup; submitted
//! reports are appended in memory and favorites are persisted to a JSON
//! file.

pub mod config;
mod handlers;
pub mod interactive;

use std::sync::{Mutex, MutexGuard, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use actix_cors::Cors;
use actix_files::Files;
use actix_web::{App, HttpServer, middleware, web};
use signal_scope_coverage::Snapshot;
use signal_scope_coverage_models::{SignalReport, Tower};
use signal_scope_favorites::{Favorites, FavoritesStore, JsonFileStore};

pub use config::ServerConfig;

/// Shared application state.
pub struct AppState {
    /// Towers loaded at startup. Never mutated.
    pub towers: Vec<Tower>,
    /// Seed reports followed by everything submitted since startup.
    reports: RwLock<Vec<SignalReport>>,
    /// Saved favorites, written through to `favorites_store`.
    favorites: Mutex<Favorites>,
    favorites_store: Box<dyn FavoritesStore>,
}

impl AppState {
    #[must_use]
    pub fn new(
        snapshot: Snapshot,
        favorites: Favorites,
        favorites_store: Box<dyn FavoritesStore>,
    ) -> Self {
        Self {
            towers: snapshot.towers,
            reports: RwLock::new(snapshot.reports),
            favorites: Mutex::new(favorites),
            favorites_store,
        }
    }

    /// Copies the current towers and reports into a standalone snapshot.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::new(self.towers.clone(), self.reports().clone())
    }

    fn reports(&self) -> RwLockReadGuard<'_, Vec<SignalReport>> {
        self.reports.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn reports_mut(&self) -> RwLockWriteGuard<'_, Vec<SignalReport>> {
        self.reports.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn favorites(&self) -> MutexGuard<'_, Favorites> {
        self.favorites.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Registers the `/api` routes.
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/health", web::get().to(handlers::health))
            .route("/towers", web::get().to(handlers::towers))
            .route("/reports", web::get().to(handlers::reports))
            .route("/reports", web::post().to(handlers::submit_report))
            .route("/markers", web::get().to(handlers::markers))
            .route("/compare", web::get().to(handlers::compare))
            .route("/resolve", web::get().to(handlers::resolve))
            .route("/nearest", web::get().to(handlers::nearest))
            .route("/analytics", web::get().to(handlers::analytics))
            .route("/favorites", web::get().to(handlers::list_favorites))
            .route("/favorites", web::post().to(handlers::create_favorite))
            .route("/favorites/{id}", web::delete().to(handlers::delete_favorite))
            .route(
                "/favorites/{id}/compare",
                web::get().to(handlers::favorite_compare),
            ),
    );
}

/// Builds the CORS middleware for the configured origins.
///
/// A `*` entry allows any origin.
fn build_cors(origins: &[String]) -> Cors {
    if origins.iter().any(|origin| origin == "*") {
        return Cors::permissive();
    }

    origins
        .iter()
        .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
        .allow_any_method()
        .allow_any_header()
        .supports_credentials()
        .max_age(3600)
}

/// Starts the `SignalScope` API server.
///
/// Loads the bundled seed snapshot and the saved favorites, then starts the
/// Actix-Web HTTP server. This is a regular async function; the caller is
/// responsible for providing the async runtime (e.g. via
/// `#[actix_web::main]`) and for initializing logging.
///
/// # Errors
///
/// Returns an `std::io::Result` error if the favorites file cannot be read,
/// or if the HTTP server fails to bind or encounters a runtime error.
#[allow(clippy::future_not_send)]
pub async fn run_server(config: ServerConfig) -> std::io::Result<()> {
    log::info!(
        "Loading favorites from {}...",
        config.favorites_path.display()
    );
    let store = JsonFileStore::new(config.favorites_path.clone());
    let favorites = Favorites::load(&store).map_err(std::io::Error::other)?;

    let snapshot = Snapshot::seeded();
    log::info!(
        "Loaded {} tower(s), {} report(s), {} favorite(s)",
        snapshot.towers.len(),
        snapshot.reports.len(),
        favorites.len()
    );

    let state = web::Data::new(AppState::new(snapshot, favorites, Box::new(store)));

    let static_dir = config.static_dir.is_dir().then(|| config.static_dir.clone());
    if static_dir.is_none() {
        log::warn!(
            "Static directory {} not found, serving the API only",
            config.static_dir.display()
        );
    }

    let cors_origins = config.cors_origins.clone();
    log::info!("Allowed CORS origins: {cors_origins:?}");
    log::info!("Starting server on {}:{}", config.bind_addr, config.port);

    HttpServer::new(move || {
        let app = App::new()
            .wrap(build_cors(&cors_origins))
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .configure(configure_api);

        // Serve frontend static files (production)
        match &static_dir {
            Some(dir) => app.service(Files::new("/", dir).index_file("index.html")),
            None => app,
        }
    })
    .bind((config.bind_addr.as_str(), config.port))?
    .run()
    .await
}

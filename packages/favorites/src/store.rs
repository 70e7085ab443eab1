//! Persistence adapters for the favorites list.

use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use signal_scope_coverage_models::FavoriteLocation;

use crate::FavoritesError;

/// Default path for the favorites file, relative to the working directory.
pub const DEFAULT_FAVORITES_PATH: &str = "data/favorites.json";

/// Wholesale storage for the favorites list.
///
/// Implementations read and write the entire list at once; there is no
/// per-item update.
pub trait FavoritesStore: Send + Sync {
    /// Reads the stored list. An empty store yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns [`FavoritesError`] if the backing storage cannot be read or
    /// parsed.
    fn load(&self) -> Result<Vec<FavoriteLocation>, FavoritesError>;

    /// Replaces the stored list.
    ///
    /// # Errors
    ///
    /// Returns [`FavoritesError`] if the backing storage cannot be written.
    fn save(&self, favorites: &[FavoriteLocation]) -> Result<(), FavoritesError>;
}

/// Stores favorites as a JSON array in a single file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for JsonFileStore {
    fn default() -> Self {
        Self::new(DEFAULT_FAVORITES_PATH)
    }
}

impl FavoritesStore for JsonFileStore {
    fn load(&self) -> Result<Vec<FavoriteLocation>, FavoritesError> {
        if !self.path.exists() {
            log::debug!(
                "Favorites file {} does not exist yet",
                self.path.display()
            );
            return Ok(Vec::new());
        }

        let contents = std::fs::read_to_string(&self.path)?;
        if contents.trim().is_empty() {
            return Ok(Vec::new());
        }

        Ok(serde_json::from_str(&contents)?)
    }

    fn save(&self, favorites: &[FavoriteLocation]) -> Result<(), FavoritesError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        // Stage in a sibling file, then rename into place.
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, serde_json::to_string_pretty(favorites)?)?;
        std::fs::rename(&tmp, &self.path)?;

        log::debug!(
            "Saved {} favorite(s) to {}",
            favorites.len(),
            self.path.display()
        );
        Ok(())
    }
}

/// Keeps favorites in memory for the lifetime of the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    items: Mutex<Vec<FavoriteLocation>>,
}

impl FavoritesStore for MemoryStore {
    fn load(&self) -> Result<Vec<FavoriteLocation>, FavoritesError> {
        Ok(self
            .items
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }

    fn save(&self, favorites: &[FavoriteLocation]) -> Result<(), FavoritesError> {
        *self.items.lock().unwrap_or_else(PoisonError::into_inner) = favorites.to_vec();
        Ok(())
    }
}

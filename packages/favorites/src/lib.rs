#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Favorite locations and their persistence.
//!
//! The [`Favorites`] collection is plain state owned by the caller. It is
//! read from and written to a [`FavoritesStore`] wholesale, the way the
//! dashboard kept its favorites under a single local-storage key. Coverage
//! scoring only ever reads a favorite's coordinates.

pub mod store;

use signal_scope_coverage_models::{FavoriteLocation, NewFavorite};
use thiserror::Error;

pub use store::{DEFAULT_FAVORITES_PATH, FavoritesStore, JsonFileStore, MemoryStore};

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

/// Errors from favorites persistence.
#[derive(Debug, Error)]
pub enum FavoritesError {
    /// Reading or writing the backing file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The stored favorites could not be (de)serialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

// ---------------------------------------------------------------------------
// Collection
// ---------------------------------------------------------------------------

/// An ordered list of favorites, oldest first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Favorites {
    items: Vec<FavoriteLocation>,
}

impl Favorites {
    #[must_use]
    pub const fn new(items: Vec<FavoriteLocation>) -> Self {
        Self { items }
    }

    /// Loads the collection from `store`.
    ///
    /// # Errors
    ///
    /// Returns [`FavoritesError`] if the store cannot be read.
    pub fn load(store: &dyn FavoritesStore) -> Result<Self, FavoritesError> {
        let items = store.load()?;
        log::debug!("Loaded {} favorite(s)", items.len());
        Ok(Self::new(items))
    }

    /// Writes the whole collection to `store`.
    ///
    /// # Errors
    ///
    /// Returns [`FavoritesError`] if the store cannot be written.
    pub fn save(&self, store: &dyn FavoritesStore) -> Result<(), FavoritesError> {
        store.save(&self.items)
    }

    /// Adds a favorite with a freshly generated id and returns it.
    pub fn add(&mut self, favorite: NewFavorite) -> FavoriteLocation {
        let id = format!("f{}", uuid::Uuid::new_v4().simple());
        let favorite = favorite.into_favorite(id);
        self.items.push(favorite.clone());
        favorite
    }

    /// Removes the favorite with `id`, returning it if it existed.
    pub fn remove(&mut self, id: &str) -> Option<FavoriteLocation> {
        let idx = self.items.iter().position(|f| f.id == id)?;
        Some(self.items.remove(idx))
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&FavoriteLocation> {
        self.items.iter().find(|f| f.id == id)
    }

    #[must_use]
    pub fn all(&self) -> &[FavoriteLocation] {
        &self.items
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

//! Server dependencies shared by every handler (using traits for testability)

use std::sync::Arc;

use crate::domains::resources::Catalog;
use crate::kernel::{BaseFavoriteRepository, InMemoryFavoriteRepository};

#[derive(Clone)]
pub struct ServerDeps {
    /// Immutable after startup
    pub catalog: Arc<Catalog>,
    pub favorites: Arc<dyn BaseFavoriteRepository>,
}

impl ServerDeps {
    pub fn new(catalog: Catalog, favorites: Arc<dyn BaseFavoriteRepository>) -> Self {
        Self {
            catalog: Arc::new(catalog),
            favorites,
        }
    }

    /// Catalog with a fresh in-memory favorites store
    pub fn in_memory(catalog: Catalog) -> Self {
        Self::new(catalog, Arc::new(InMemoryFavoriteRepository::new()))
    }
}

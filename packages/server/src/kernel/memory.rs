//! In-process favorites storage

use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domains::favorites::Favorite;
use crate::kernel::BaseFavoriteRepository;

/// Favorites kept in insertion order for the life of the process
#[derive(Debug, Default)]
pub struct InMemoryFavoriteRepository {
    favorites: RwLock<Vec<Favorite>>,
}

impl InMemoryFavoriteRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BaseFavoriteRepository for InMemoryFavoriteRepository {
    async fn find(&self, resource_id: &str) -> Result<Option<Favorite>> {
        let favorites = self.favorites.read().await;
        Ok(favorites
            .iter()
            .find(|f| f.resource_id == resource_id)
            .cloned())
    }

    async fn insert(&self, favorite: Favorite) -> Result<bool> {
        let mut favorites = self.favorites.write().await;
        if favorites.iter().any(|f| f.resource_id == favorite.resource_id) {
            return Ok(false);
        }
        favorites.push(favorite);
        Ok(true)
    }

    async fn delete(&self, resource_id: &str) -> Result<bool> {
        let mut favorites = self.favorites.write().await;
        let before = favorites.len();
        favorites.retain(|f| f.resource_id != resource_id);
        Ok(favorites.len() != before)
    }

    async fn update_notes(&self, resource_id: &str, notes: &str) -> Result<bool> {
        let mut favorites = self.favorites.write().await;
        match favorites.iter_mut().find(|f| f.resource_id == resource_id) {
            Some(favorite) => {
                favorite.notes = notes.to_string();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn list(&self) -> Result<Vec<Favorite>> {
        let favorites = self.favorites.read().await;
        Ok(favorites.iter().rev().cloned().collect())
    }

    async fn count_for(&self, resource_id: &str) -> Result<usize> {
        let favorites = self.favorites.read().await;
        Ok(favorites
            .iter()
            .filter(|f| f.resource_id == resource_id)
            .count())
    }
}

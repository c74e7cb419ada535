// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic.
// Naming convention: Base* for trait names (e.g., BaseFavoriteRepository)

use anyhow::Result;
use async_trait::async_trait;

use crate::domains::favorites::Favorite;

// =============================================================================
// Favorites storage
// =============================================================================

#[async_trait]
pub trait BaseFavoriteRepository: Send + Sync {
    async fn find(&self, resource_id: &str) -> Result<Option<Favorite>>;

    /// Insert unless the resource is already saved; returns whether it was inserted
    async fn insert(&self, favorite: Favorite) -> Result<bool>;

    /// Returns whether anything was removed
    async fn delete(&self, resource_id: &str) -> Result<bool>;

    /// Returns whether the favorite existed
    async fn update_notes(&self, resource_id: &str, notes: &str) -> Result<bool>;

    /// All favorites, newest first
    async fn list(&self) -> Result<Vec<Favorite>>;

    /// How many times a resource is saved
    async fn count_for(&self, resource_id: &str) -> Result<usize>;
}

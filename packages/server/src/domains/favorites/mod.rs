//! Favorites domain - one implicit user's saved resources
//!
//! Mutations validate the request and report outcomes as typed errors whose
//! messages are shown to the user verbatim.

pub mod actions;
pub mod models;

pub use actions::{
    add_favorite, check_favorites, export_favorites, favorites_calendar, list_user_favorites,
    remove_favorite, update_note, ExportError, ExportFormat, FavoriteError, FavoritesExport,
};
pub use models::Favorite;

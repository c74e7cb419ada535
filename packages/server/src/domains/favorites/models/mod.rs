//! Favorites domain models

pub mod favorite;

pub use favorite::Favorite;

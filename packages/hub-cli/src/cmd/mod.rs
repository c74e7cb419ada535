pub mod browse;
pub mod favorites;
pub mod prefs;
pub mod search;
pub mod suggest;

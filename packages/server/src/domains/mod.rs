// Business domains
pub mod favorites;
pub mod resources;

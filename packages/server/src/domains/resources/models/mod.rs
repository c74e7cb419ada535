//! Resource domain models

pub mod catalog;

pub use catalog::Catalog;

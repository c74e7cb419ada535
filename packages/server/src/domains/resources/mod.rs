//! Resources domain - the read-only catalog
//!
//! Records come from a category document loaded at startup. Queries filter
//! with the same facet predicates the directory page uses and score search
//! hits by where the term occurs. The RSS feed publishes the head of the
//! catalog.

pub mod actions;
pub mod models;

pub use actions::{
    category_details, find_category, list_categories, list_resources, rss_feed, search_resources,
    CategoryDetail, CategorySummary, ResourcePage, ResourceQuery, SearchError, SearchQuery,
    FEED_ITEMS, SITE_NAME,
};
pub use models::Catalog;

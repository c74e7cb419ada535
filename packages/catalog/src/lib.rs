// Teaching Resources Hub - Catalog
//
// Client-side state for the resource directory: autocomplete, faceted filtering,
// category sections, display preferences and favorites. Every piece of page state
// lives in an explicit store; network collaborators sit behind async traits.

pub mod api;
pub mod autocomplete;
pub mod directory;
pub mod error;
pub mod facets;
pub mod favorites;
pub mod filter;
pub mod preferences;
pub mod resource;
pub mod search;

pub use api::*;
pub use autocomplete::{
    search_url, Autocomplete, AutocompleteEvent, AutocompleteResults, NavKey, Suggestion,
    MAX_SUGGESTIONS, MIN_QUERY_CHARS,
};
pub use directory::{CategorySection, Directory, SortOrder};
pub use error::{ApiError, StorageError};
pub use facets::{Facet, FacetSelection, FacetValue, FilterPill};
pub use favorites::{FavoritesStore, Notification, NotificationKind, PendingToggle, ToggleOutcome};
pub use filter::{FilterOutcome, FilterState, SectionVisibility, TagFilter};
pub use preferences::{
    DisplaySettings, FileStorage, MemoryStorage, PreferenceStore, Storage, ViewMode, SETTINGS_KEY,
};
pub use resource::{slugify, CatalogDocument, CategoryEntry, Resource, ResourceEntry};
pub use search::{escape_html, highlight_match, matches_search, relevance_score, SearchField};

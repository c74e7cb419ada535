//! The page filter: search term, legacy tag buttons and facet checkboxes

use serde::Serialize;

use crate::facets::FacetSelection;
use crate::resource::Resource;
use crate::search::matches_search;

/// Legacy single-tag filter buttons (`data-tag`)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TagFilter {
    #[default]
    All,
    Tag(String),
}

impl TagFilter {
    /// `"all"` (or empty) selects everything; anything else filters by that tag
    pub fn from_attr(tag: &str) -> Self {
        let tag = tag.trim().to_lowercase();
        if tag.is_empty() || tag == "all" {
            Self::All
        } else {
            Self::Tag(tag)
        }
    }

    pub fn matches(&self, tags: &str) -> bool {
        match self {
            Self::All => true,
            Self::Tag(tag) => tags.contains(tag.as_str()),
        }
    }
}

/// Everything the user has set on the filter bar
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    pub search: String,
    pub tag: TagFilter,
    pub facets: FacetSelection,
}

impl FilterState {
    /// A record is visible iff it matches the search, the tag button and every facet group
    pub fn matches(&self, resource: &Resource) -> bool {
        let term = self.search.to_lowercase();
        let tags = resource.tag_string();
        matches_search(resource, &term) && self.tag.matches(&tags) && self.facets.matches(&tags)
    }

    /// Run one filter pass over sections of `(category, resources)` in document order
    pub fn apply<'a, I>(&self, sections: I) -> FilterOutcome
    where
        I: IntoIterator<Item = (&'a str, &'a [Resource])>,
    {
        let sections: Vec<SectionVisibility> = sections
            .into_iter()
            .map(|(category, resources)| {
                let visible: Vec<String> = resources
                    .iter()
                    .filter(|r| self.matches(r))
                    .map(|r| r.id.clone())
                    .collect();
                SectionVisibility {
                    category: category.to_string(),
                    hidden: resources.len() - visible.len(),
                    visible,
                }
            })
            .collect();

        let visible_resources = sections.iter().map(|s| s.visible.len()).sum();
        let visible_categories = sections.iter().filter(|s| s.is_visible()).count();

        FilterOutcome {
            sections,
            visible_resources,
            visible_categories,
        }
    }
}

/// Which cards of one category section survived the filter
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionVisibility {
    pub category: String,
    /// Visible resource ids, in document order
    pub visible: Vec<String>,
    pub hidden: usize,
}

impl SectionVisibility {
    /// A section is shown only while it has a visible card
    pub fn is_visible(&self) -> bool {
        !self.visible.is_empty()
    }
}

/// Result of a filter pass: per-section visibility plus the page stats
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterOutcome {
    pub sections: Vec<SectionVisibility>,
    pub visible_resources: usize,
    pub visible_categories: usize,
}

impl FilterOutcome {
    /// Whether the "no results" message should be shown
    pub fn is_empty(&self) -> bool {
        self.visible_resources == 0
    }

    pub fn is_visible(&self, resource_id: &str) -> bool {
        self.sections
            .iter()
            .any(|s| s.visible.iter().any(|id| id == resource_id))
    }

    pub fn section(&self, category: &str) -> Option<&SectionVisibility> {
        self.sections.iter().find(|s| s.category == category)
    }
}

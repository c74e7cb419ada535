//! The resources page as an explicit store.
//!
//! Holds the category sections, the filter bar state and the last filter
//! outcome. Every user action is a method here; each one that touches the
//! filter re-runs the filter pass so `outcome()` always reflects the state.

use std::str::FromStr;

use serde::Serialize;

use crate::facets::{FacetSelection, FacetValue, FilterPill};
use crate::filter::{FilterOutcome, FilterState, TagFilter};
use crate::resource::{slugify, Resource};

/// Order of category sections on the page
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum SortOrder {
    /// Document order
    #[default]
    Default,
    /// Category name A to Z
    AZ,
    /// Category name Z to A
    ZA,
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "default" => Ok(Self::Default),
            "az" => Ok(Self::AZ),
            "za" => Ok(Self::ZA),
            other => Err(format!("unknown sort order '{}'", other)),
        }
    }
}

/// One category block with its cards
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategorySection {
    pub name: String,
    pub icon: String,
    /// Anchor id used by the category jump menu
    pub anchor: String,
    pub resources: Vec<Resource>,
    pub expanded: bool,
    position: usize,
}

impl CategorySection {
    /// Label of the collapse/expand toggle button
    pub fn toggle_label(&self) -> &'static str {
        if self.expanded {
            "Collapse"
        } else {
            "Expand"
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Directory {
    sections: Vec<CategorySection>,
    filter: FilterState,
    sort: SortOrder,
    outcome: FilterOutcome,
}

impl Directory {
    /// Group resources into sections by category, in order of first appearance
    pub fn new(resources: Vec<Resource>) -> Self {
        let mut sections: Vec<CategorySection> = Vec::new();

        for resource in resources {
            match sections.iter_mut().find(|s| s.name == resource.category) {
                Some(section) => section.resources.push(resource),
                None => {
                    let position = sections.len();
                    sections.push(CategorySection {
                        name: resource.category.clone(),
                        icon: resource.category_icon.clone(),
                        anchor: slugify(&resource.category),
                        resources: vec![resource],
                        expanded: true,
                        position,
                    });
                }
            }
        }

        let mut directory = Self {
            sections,
            ..Default::default()
        };
        directory.refilter();
        directory
    }

    /// Apply the `search` parameter of a page URL or query string.
    ///
    /// Returns the search term when one was present and non-empty.
    pub fn apply_url_search(&mut self, url_or_query: &str) -> Option<String> {
        let query = match url_or_query.split_once('?') {
            Some((_, query)) => query,
            None => url_or_query,
        };
        let query = query.split('#').next().unwrap_or_default();

        let term = url::form_urlencoded::parse(query.as_bytes())
            .find(|(key, _)| key == "search")
            .map(|(_, value)| value.into_owned())
            .filter(|value| !value.is_empty())?;

        tracing::debug!(search = %term, "Auto-searched from URL");
        self.set_search(&term);
        Some(term)
    }

    pub fn sections(&self) -> &[CategorySection] {
        &self.sections
    }

    pub fn section(&self, name: &str) -> Option<&CategorySection> {
        self.sections.iter().find(|s| s.name == name)
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn outcome(&self) -> &FilterOutcome {
        &self.outcome
    }

    pub fn sort_order(&self) -> SortOrder {
        self.sort
    }

    /// All resources in current section order
    pub fn resources(&self) -> impl Iterator<Item = &Resource> {
        self.sections.iter().flat_map(|s| s.resources.iter())
    }

    pub fn set_search(&mut self, term: &str) {
        self.filter.search = term.to_string();
        self.refilter();
    }

    pub fn clear_search(&mut self) {
        self.set_search("");
    }

    /// Activate a legacy tag button (`"all"` resets it)
    pub fn set_tag(&mut self, tag: &str) {
        self.filter.tag = TagFilter::from_attr(tag);
        self.refilter();
    }

    pub fn set_facet(&mut self, value: FacetValue, checked: bool) {
        self.filter.facets.set(value, checked);
        self.refilter();
    }

    pub fn set_facets(&mut self, selection: FacetSelection) {
        self.filter.facets = selection;
        self.refilter();
    }

    /// Remove a pill: uncheck its value
    pub fn remove_filter(&mut self, value: FacetValue) {
        self.set_facet(value, false);
    }

    /// Check every facet box again
    pub fn clear_all_filters(&mut self) {
        self.set_facets(FacetSelection::all());
    }

    /// Clear the search box and the tag buttons. Facet checkboxes are untouched.
    pub fn reset_filters(&mut self) {
        self.filter.search.clear();
        self.filter.tag = TagFilter::All;
        self.refilter();
    }

    pub fn pills(&self) -> Vec<FilterPill> {
        self.filter.facets.pills()
    }

    /// Flip a section between expanded and collapsed; returns the new state
    pub fn toggle_category(&mut self, name: &str) -> Option<bool> {
        let section = self.sections.iter_mut().find(|s| s.name == name)?;
        section.expanded = !section.expanded;
        Some(section.expanded)
    }

    pub fn set_expanded(&mut self, name: &str, expanded: bool) -> bool {
        match self.sections.iter_mut().find(|s| s.name == name) {
            Some(section) => {
                section.expanded = expanded;
                true
            }
            None => false,
        }
    }

    /// Reorder sections. Sorting also reorders the next filter outcome.
    pub fn sort(&mut self, order: SortOrder) {
        match order {
            SortOrder::Default => self.sections.sort_by_key(|s| s.position),
            SortOrder::AZ => self.sections.sort_by_key(|s| s.name.to_lowercase()),
            SortOrder::ZA => self
                .sections
                .sort_by(|a, b| b.name.to_lowercase().cmp(&a.name.to_lowercase())),
        }
        self.sort = order;
        self.refilter();
    }

    /// Anchor to scroll to for the category jump menu
    pub fn category_anchor(&self, name: &str) -> Option<&str> {
        self.section(name).map(|s| s.anchor.as_str())
    }

    fn refilter(&mut self) {
        self.outcome = self.filter.apply(
            self.sections
                .iter()
                .map(|s| (s.name.as_str(), s.resources.as_slice())),
        );
        tracing::trace!(
            visible = self.outcome.visible_resources,
            categories = self.outcome.visible_categories,
            "Filter pass"
        );
    }
}

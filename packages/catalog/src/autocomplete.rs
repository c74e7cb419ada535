//! Homepage search box with live suggestions and keyboard navigation

use serde::Serialize;

use crate::api::{load_resources, ResourceSource};
use crate::resource::Resource;
use crate::search::{highlight_match, matches_suggestion};

/// Queries shorter than this (in characters) show nothing
pub const MIN_QUERY_CHARS: usize = 2;

/// At most this many suggestions are displayed
pub const MAX_SUGGESTIONS: usize = 8;

/// Tags shown on each suggestion
const SUGGESTION_TAGS: usize = 2;

/// One row of the dropdown
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Suggestion {
    pub resource_id: String,
    pub name: String,
    /// Name with query occurrences wrapped in `<strong>`, HTML-escaped
    pub highlighted_name: String,
    pub category: String,
    pub category_icon: String,
    pub tags: Vec<String>,
}

/// Displayed suggestions plus the full match count
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AutocompleteResults {
    pub query: String,
    pub items: Vec<Suggestion>,
    pub total_matches: usize,
}

impl AutocompleteResults {
    /// Hidden dropdown
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// "See all" footer text, when there is more than one match
    pub fn footer(&self) -> Option<String> {
        if self.total_matches > MAX_SUGGESTIONS {
            Some(format!("See all {} results \u{2192}", self.total_matches))
        } else if self.total_matches > 1 {
            Some(format!("{} resources found \u{2192}", self.total_matches))
        } else {
            None
        }
    }

    /// Where the footer leads
    pub fn footer_target(&self) -> Option<String> {
        self.footer().map(|_| search_url(&self.query))
    }
}

/// Keys the search box reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    ArrowDown,
    ArrowUp,
    Enter,
    Escape,
}

/// Side effect requested by a key press
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AutocompleteEvent {
    /// Selection moved; nothing else to do
    Selected(Option<usize>),
    /// Go to the resources page
    Navigate(String),
    /// Dropdown closed
    Hidden,
}

/// Autocomplete state for one page view
#[derive(Debug, Clone, Default)]
pub struct Autocomplete {
    resources: Vec<Resource>,
    input: String,
    results: AutocompleteResults,
    selected: Option<usize>,
}

impl Autocomplete {
    pub fn new(resources: Vec<Resource>) -> Self {
        Self {
            resources,
            ..Default::default()
        }
    }

    /// Fetch the resource list once; a failed fetch leaves suggestions empty
    pub async fn load(source: &dyn ResourceSource) -> Self {
        Self::new(load_resources(source).await)
    }

    pub fn resource_count(&self) -> usize {
        self.resources.len()
    }

    pub fn results(&self) -> &AutocompleteResults {
        &self.results
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    /// Match resources against the typed text (used as-is, not trimmed)
    pub fn suggest(&self, query: &str) -> AutocompleteResults {
        if query.chars().count() < MIN_QUERY_CHARS {
            return AutocompleteResults::default();
        }

        let lower = query.to_lowercase();
        let matches: Vec<&Resource> = self
            .resources
            .iter()
            .filter(|r| matches_suggestion(r, &lower))
            .collect();

        AutocompleteResults {
            query: query.to_string(),
            total_matches: matches.len(),
            items: matches
                .into_iter()
                .take(MAX_SUGGESTIONS)
                .map(|r| Suggestion {
                    resource_id: r.id.clone(),
                    name: r.name.clone(),
                    highlighted_name: highlight_match(&r.name, query),
                    category: r.category.clone(),
                    category_icon: r.category_icon.clone(),
                    tags: r.tags.iter().take(SUGGESTION_TAGS).cloned().collect(),
                })
                .collect(),
        }
    }

    /// Input event: recompute suggestions and reset the selection
    pub fn input_changed(&mut self, query: &str) -> &AutocompleteResults {
        self.input = query.to_string();
        self.results = self.suggest(query);
        self.selected = None;
        &self.results
    }

    /// Mouse hover selects a row
    pub fn hover(&mut self, index: usize) {
        if index < self.results.items.len() {
            self.selected = Some(index);
        }
    }

    pub fn hide(&mut self) {
        self.results = AutocompleteResults::default();
        self.selected = None;
    }

    /// Clicking a suggestion searches for its name
    pub fn click(&self, index: usize) -> Option<String> {
        self.results.items.get(index).map(|s| search_url(&s.name))
    }

    pub fn handle_key(&mut self, key: NavKey) -> AutocompleteEvent {
        let count = self.results.items.len();
        match key {
            NavKey::ArrowDown => {
                if count > 0 {
                    self.selected = Some(match self.selected {
                        Some(i) => (i + 1).min(count - 1),
                        None => 0,
                    });
                }
                AutocompleteEvent::Selected(self.selected)
            }
            NavKey::ArrowUp => {
                self.selected = match self.selected {
                    Some(0) | None => None,
                    Some(i) => Some(i - 1),
                };
                AutocompleteEvent::Selected(self.selected)
            }
            NavKey::Enter => {
                let target = match self.selected.and_then(|i| self.click(i)) {
                    Some(url) => url,
                    None => search_url(&self.input),
                };
                AutocompleteEvent::Navigate(target)
            }
            NavKey::Escape => {
                self.hide();
                AutocompleteEvent::Hidden
            }
        }
    }
}

/// Resources page URL for a search term; no parameter when the term is blank
pub fn search_url(term: &str) -> String {
    let term = term.trim();
    if term.is_empty() {
        "/resources".to_string()
    } else {
        format!("/resources?search={}", urlencoding::encode(term))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;
    use async_trait::async_trait;

    fn resources(n: usize) -> Vec<Resource> {
        (0..n)
            .map(|i| {
                Resource::new(&format!("math-{}", i), &format!("Math Tool {}", i), "Math")
                    .with_icon("🔢")
                    .with_tags(&["free", "math", "k-5"])
            })
            .collect()
    }

    #[test]
    fn test_short_query_is_empty() {
        let ac = Autocomplete::new(resources(3));
        assert!(ac.suggest("").is_empty());
        assert!(ac.suggest("m").is_empty());
        assert!(!ac.suggest("ma").is_empty());
    }

    #[test]
    fn test_caps_at_eight_and_counts_all() {
        let ac = Autocomplete::new(resources(12));
        let results = ac.suggest("TOOL");
        assert_eq!(results.items.len(), MAX_SUGGESTIONS);
        assert_eq!(results.total_matches, 12);
        assert_eq!(results.footer().unwrap(), "See all 12 results →");
        assert_eq!(
            results.footer_target().as_deref(),
            Some("/resources?search=TOOL")
        );
        assert_eq!(results.items[0].resource_id, "math-0");
        assert_eq!(results.items[0].highlighted_name, "Math <strong>Tool</strong> 0");
        assert_eq!(results.items[0].tags, vec!["free", "math"]);
    }

    #[test]
    fn test_footer_variants() {
        let ac = Autocomplete::new(resources(3));
        assert_eq!(ac.suggest("tool").footer().unwrap(), "3 resources found →");
        assert_eq!(ac.suggest("tool 1").footer(), None);
    }

    #[test]
    fn test_matches_category_and_tags() {
        let mut list = resources(1);
        list.push(Resource::new("phet", "PhET", "Science").with_tags(&["Simulations"]));
        let ac = Autocomplete::new(list);
        assert_eq!(ac.suggest("scien").total_matches, 1);
        assert_eq!(ac.suggest("simul").items[0].resource_id, "phet");
    }

    #[test]
    fn test_keyboard_navigation() {
        let mut ac = Autocomplete::new(resources(3));
        ac.input_changed("tool");

        assert_eq!(ac.handle_key(NavKey::ArrowUp), AutocompleteEvent::Selected(None));
        assert_eq!(ac.handle_key(NavKey::ArrowDown), AutocompleteEvent::Selected(Some(0)));
        ac.handle_key(NavKey::ArrowDown);
        ac.handle_key(NavKey::ArrowDown);
        assert_eq!(ac.handle_key(NavKey::ArrowDown), AutocompleteEvent::Selected(Some(2)));

        assert_eq!(
            ac.handle_key(NavKey::Enter),
            AutocompleteEvent::Navigate("/resources?search=Math%20Tool%202".to_string())
        );

        ac.handle_key(NavKey::ArrowUp);
        ac.handle_key(NavKey::ArrowUp);
        assert_eq!(ac.handle_key(NavKey::ArrowUp), AutocompleteEvent::Selected(None));
    }

    #[test]
    fn test_enter_without_selection_uses_input() {
        let mut ac = Autocomplete::new(resources(3));
        ac.input_changed("  fractions ");
        assert_eq!(
            ac.handle_key(NavKey::Enter),
            AutocompleteEvent::Navigate("/resources?search=fractions".to_string())
        );

        ac.input_changed("");
        assert_eq!(
            ac.handle_key(NavKey::Enter),
            AutocompleteEvent::Navigate("/resources".to_string())
        );
    }

    #[test]
    fn test_new_input_resets_selection_and_escape_hides() {
        let mut ac = Autocomplete::new(resources(3));
        ac.input_changed("tool");
        ac.hover(1);
        assert_eq!(ac.selected(), Some(1));
        ac.hover(7);
        assert_eq!(ac.selected(), Some(1));

        ac.input_changed("tool ");
        assert_eq!(ac.selected(), None);

        assert_eq!(ac.handle_key(NavKey::Escape), AutocompleteEvent::Hidden);
        assert!(ac.results().is_empty());
    }

    struct FailingSource;

    #[async_trait]
    impl ResourceSource for FailingSource {
        async fn fetch_resources(&self) -> Result<Vec<Resource>, ApiError> {
            Err(ApiError::Transport("offline".to_string()))
        }
    }

    #[tokio::test]
    async fn test_failed_load_shows_nothing() {
        let ac = Autocomplete::load(&FailingSource).await;
        assert_eq!(ac.resource_count(), 0);
        assert!(ac.suggest("math").is_empty());
    }
}

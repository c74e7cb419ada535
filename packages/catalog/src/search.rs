//! Substring matching shared by autocomplete, the page filter and the search endpoint

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::resource::Resource;

/// Autocomplete match: name, description, category or any tag contains the query.
///
/// `lower_query` must already be lowercased.
pub fn matches_suggestion(resource: &Resource, lower_query: &str) -> bool {
    resource.name.to_lowercase().contains(lower_query)
        || resource.description.to_lowercase().contains(lower_query)
        || resource.category.to_lowercase().contains(lower_query)
        || resource
            .tags
            .iter()
            .any(|tag| tag.to_lowercase().contains(lower_query))
}

/// Page filter match: empty term passes, otherwise name, description or tag string
/// contains it. `lower_term` must already be lowercased.
pub fn matches_search(resource: &Resource, lower_term: &str) -> bool {
    lower_term.is_empty()
        || resource.name.to_lowercase().contains(lower_term)
        || resource.description.to_lowercase().contains(lower_term)
        || resource.tag_string().contains(lower_term)
}

/// Fields the search endpoint can score against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchField {
    Name,
    Description,
    Tags,
}

impl SearchField {
    pub fn all() -> &'static [SearchField] {
        &[Self::Name, Self::Description, Self::Tags]
    }

    /// Parse a comma-separated field list, skipping unknown names
    pub fn parse_list(list: &str) -> Vec<SearchField> {
        list.split(',')
            .filter_map(|f| f.trim().parse().ok())
            .collect()
    }
}

impl FromStr for SearchField {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(Self::Name),
            "description" => Ok(Self::Description),
            "tags" => Ok(Self::Tags),
            _ => Err(()),
        }
    }
}

/// Relevance: 3 for a name hit, 2 for a description hit, 1 per matching tag
pub fn relevance_score(resource: &Resource, lower_query: &str, fields: &[SearchField]) -> u32 {
    let mut score = 0;

    if fields.contains(&SearchField::Name) && resource.name.to_lowercase().contains(lower_query) {
        score += 3;
    }

    if fields.contains(&SearchField::Description)
        && resource.description.to_lowercase().contains(lower_query)
    {
        score += 2;
    }

    if fields.contains(&SearchField::Tags) {
        score += resource
            .tags
            .iter()
            .filter(|tag| tag.to_lowercase().contains(lower_query))
            .count() as u32;
    }

    score
}

/// Wrap every case-insensitive occurrence of `query` in `<strong>` tags.
///
/// Text outside the markers is HTML-escaped.
pub fn highlight_match(text: &str, query: &str) -> String {
    let needle: Vec<char> = query.chars().flat_map(char::to_lowercase).collect();
    if needle.is_empty() {
        return escape_html(text);
    }

    let mut out = String::with_capacity(text.len() + 17);
    let mut cursor = 0;

    for (start, _) in text.char_indices() {
        if start < cursor {
            continue;
        }
        if let Some(end) = match_end(text, start, &needle) {
            out.push_str(&escape_html(&text[cursor..start]));
            out.push_str("<strong>");
            out.push_str(&escape_html(&text[start..end]));
            out.push_str("</strong>");
            cursor = end;
        }
    }
    out.push_str(&escape_html(&text[cursor..]));
    out
}

/// Byte offset where `needle` ends if it matches `text` at `start`, on a char boundary
fn match_end(text: &str, start: usize, needle: &[char]) -> Option<usize> {
    let mut matched = 0;
    for (offset, c) in text[start..].char_indices() {
        for lower in c.to_lowercase() {
            if matched == needle.len() || needle[matched] != lower {
                return None;
            }
            matched += 1;
        }
        if matched == needle.len() {
            return Some(start + offset + c.len_utf8());
        }
    }
    None
}

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn desmos() -> Resource {
        Resource::new("desmos", "Desmos Graphing", "Math Tools")
            .with_description("Free online graphing calculator")
            .with_tags(&["Free", "Math", "High School"])
    }

    #[test]
    fn test_suggestion_matches_category_but_search_does_not() {
        let r = desmos();
        assert!(matches_suggestion(&r, "tools"));
        assert!(!matches_search(&r, "tools"));
    }

    #[test]
    fn test_search_matches_tags_case_insensitively() {
        let r = desmos();
        assert!(matches_search(&r, "high school"));
        assert!(matches_search(&r, ""));
        assert!(!matches_search(&r, "spanish"));
    }

    #[test]
    fn test_relevance_score() {
        let r = desmos();
        // name (3) + description (2) + no tag
        assert_eq!(relevance_score(&r, "graphing", SearchField::all()), 5);
        // description "free" (2) + tag "free" (1)
        assert_eq!(relevance_score(&r, "free", SearchField::all()), 3);
        assert_eq!(relevance_score(&r, "free", &[SearchField::Tags]), 1);
        assert_eq!(relevance_score(&r, "zzz", SearchField::all()), 0);
    }

    #[test]
    fn test_parse_field_list() {
        assert_eq!(
            SearchField::parse_list("name, tags,bogus"),
            vec![SearchField::Name, SearchField::Tags]
        );
    }

    #[test]
    fn test_highlight_every_occurrence() {
        assert_eq!(
            highlight_match("Math Mathletics", "math"),
            "<strong>Math</strong> <strong>Math</strong>letics"
        );
    }

    #[test]
    fn test_highlight_escapes_markup() {
        assert_eq!(
            highlight_match("<b>Art & Music</b>", "art"),
            "&lt;b&gt;<strong>Art</strong> &amp; Music&lt;/b&gt;"
        );
        assert_eq!(highlight_match("a.b", "."), "a<strong>.</strong>b");
    }

    #[test]
    fn test_highlight_without_match_or_query() {
        assert_eq!(highlight_match("Scratch", "xyz"), "Scratch");
        assert_eq!(highlight_match("Scratch", ""), "Scratch");
    }
}

//! Plain-text rendering of catalog state

use catalog::{DisplaySettings, FilterOutcome, FilterPill, Resource};
use colored::Colorize;

const OPEN: &str = "<strong>";
const CLOSE: &str = "</strong>";

/// Terminal version of a highlighted name: `<strong>` runs become bold
pub fn highlight(html: &str) -> String {
    let mut out = String::new();
    let mut rest = html;

    while let Some(start) = rest.find(OPEN) {
        out.push_str(&unescape_html(&rest[..start]));
        let after = &rest[start + OPEN.len()..];
        match after.find(CLOSE) {
            Some(end) => {
                let matched = unescape_html(&after[..end]);
                out.push_str(&matched.bright_yellow().bold().to_string());
                rest = &after[end + CLOSE.len()..];
            }
            None => {
                rest = after;
                break;
            }
        }
    }
    out.push_str(&unescape_html(rest));
    out
}

pub fn unescape_html(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

/// Lines of one resource card under the current display settings
pub fn card(resource: &Resource, settings: &DisplaySettings, favorited: bool) -> Vec<String> {
    let star = if favorited {
        "★".bright_yellow().to_string()
    } else {
        "☆".dimmed().to_string()
    };
    let mut lines = vec![format!(
        "{} {} {}",
        star,
        resource.name.bold(),
        format!("({})", resource.id).dimmed()
    )];

    if settings.show_descriptions && !resource.description.is_empty() {
        lines.push(format!("    {}", resource.description));
    }
    if settings.show_tags && !resource.tags.is_empty() {
        lines.push(format!("    {}", resource.tags.join(" · ").cyan()));
    }
    if !settings.compact {
        if let Some(url) = &resource.url {
            lines.push(format!("    {}", url.underline()));
        }
    }
    lines
}

pub fn pills(pills: &[FilterPill]) -> Option<String> {
    if pills.is_empty() {
        return None;
    }
    let chips: Vec<String> = pills
        .iter()
        .map(|p| format!("[{}: {} ×]", p.facet_label, p.label))
        .collect();
    Some(chips.join(" "))
}

pub fn stats(outcome: &FilterOutcome) -> String {
    let resources = plural(outcome.visible_resources, "resource", "resources");
    let categories = plural(outcome.visible_categories, "category", "categories");
    format!("Showing {} in {}", resources, categories)
}

fn plural(count: usize, one: &str, many: &str) -> String {
    format!("{} {}", count, if count == 1 { one } else { many })
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog::{FacetSelection, FacetValue};

    fn plain() {
        colored::control::set_override(false);
    }

    #[test]
    fn test_highlight_strips_markup() {
        plain();
        assert_eq!(highlight("<strong>Des</strong>mos"), "Desmos");
        assert_eq!(highlight("Arts &amp; <strong>Mus</strong>ic"), "Arts & Music");
        assert_eq!(highlight("unclosed <strong>tag"), "unclosed tag");
    }

    #[test]
    fn test_card_respects_settings() {
        plain();
        let resource = Resource::new("desmos", "Desmos", "Math")
            .with_description("Graphing calculator")
            .with_tags(&["Free", "Math"])
            .with_url("https://www.desmos.com");

        let full = card(&resource, &DisplaySettings::default(), true);
        assert_eq!(
            full,
            vec![
                "★ Desmos (desmos)",
                "    Graphing calculator",
                "    Free · Math",
                "    https://www.desmos.com",
            ]
        );

        let settings = DisplaySettings {
            compact: true,
            show_descriptions: false,
            show_tags: false,
            ..Default::default()
        };
        assert_eq!(card(&resource, &settings, false), vec!["☆ Desmos (desmos)"]);
    }

    #[test]
    fn test_pills_and_stats() {
        plain();
        let selection = FacetSelection::only([FacetValue::Free, FacetValue::Math]);
        assert_eq!(
            pills(&selection.pills()).unwrap(),
            "[Cost: Free ×] [Subject: Mathematics ×]"
        );
        assert!(pills(&FacetSelection::all().pills()).is_none());

        let outcome = FilterOutcome {
            sections: Vec::new(),
            visible_resources: 1,
            visible_categories: 3,
        };
        assert_eq!(stats(&outcome), "Showing 1 resource in 3 categories");
    }
}

//! End-to-end flows over the resources page store.

use catalog::{
    CatalogDocument, Directory, DisplaySettings, Facet, FacetSelection, FacetValue,
    MemoryStorage, PreferenceStore, Resource, SortOrder,
};

const CATALOG: &str = r#"{
  "categories": [
    {
      "name": "Math",
      "icon": "🔢",
      "resources": [
        {"name": "Desmos", "description": "Graphing calculator", "tags": ["Free", "Math", "High School"]},
        {"name": "IXL", "description": "Skill practice", "tags": ["Premium", "Math", "K-5"]},
        {"name": "Khan Academy", "description": "Video lessons", "tags": ["Free", "Math", "K-12"]}
      ]
    },
    {
      "name": "Science",
      "resources": [
        {"name": "PhET", "description": "Interactive simulations", "tags": ["Free", "Science", "Middle"]}
      ]
    },
    {
      "name": "Coding",
      "icon": "💻",
      "resources": [
        {"id": "scratch", "name": "Scratch", "description": "Block coding", "tags": ["Free", "Coding", "Elementary"]},
        {"name": "Tynker", "description": "Coding courses", "tags": ["Freemium", "Coding", "K-5"]}
      ]
    }
  ]
}"#;

fn directory() -> Directory {
    let doc: CatalogDocument = serde_json::from_str(CATALOG).unwrap();
    Directory::new(doc.flatten())
}

#[test]
fn catalog_flattens_into_sections() {
    let d = directory();
    let names: Vec<&str> = d.sections().iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["Math", "Science", "Coding"]);
    assert_eq!(d.section("Science").unwrap().icon, "📚");
    assert_eq!(d.resources().count(), 6);
    assert!(d.resources().any(|r| r.id == "khan-academy"));
}

/// Checkbox states worth covering: none, all, each single value, each
/// cross-group pair, and all-but-one
fn selections() -> Vec<(String, FacetSelection)> {
    let values = FacetValue::all();
    let mut out = vec![
        ("none".to_string(), FacetSelection::none()),
        ("all".to_string(), FacetSelection::all()),
    ];
    for v in values {
        out.push((format!("only {v}"), FacetSelection::only([*v])));

        let mut all_but = FacetSelection::all();
        all_but.set(*v, false);
        out.push((format!("all but {v}"), all_but));
    }
    for (i, a) in values.iter().enumerate() {
        for b in &values[i + 1..] {
            if a.facet() != b.facet() {
                out.push((format!("{a} + {b}"), FacetSelection::only([*a, *b])));
            }
        }
    }
    out
}

/// Visibility worked out from the predicate table directly
fn expected_visible(
    selection: &FacetSelection,
    search: &str,
    tag: &str,
    resource: &Resource,
) -> bool {
    let tags = resource.tag_string();
    let term = search.to_lowercase();
    let search_ok = term.is_empty()
        || resource.name.to_lowercase().contains(&term)
        || resource.description.to_lowercase().contains(&term)
        || tags.contains(&term);
    let tag_ok = tag == "all" || tags.contains(tag);
    let facets_ok = selection.is_all_selected()
        || Facet::all().iter().all(|facet| {
            let selected: Vec<FacetValue> = selection.selected(*facet).collect();
            selected.is_empty() || selected.iter().any(|v| v.matches(&tags))
        });
    search_ok && tag_ok && facets_ok
}

#[test]
fn visible_cards_satisfy_every_active_filter() {
    let mut d = directory();
    let mut cases = 0;

    for (name, selection) in selections() {
        for search in ["", "coding"] {
            for tag in ["all", "free"] {
                d.set_search(search);
                d.set_tag(tag);
                d.set_facets(selection.clone());

                let context = format!("{name}, search {search:?}, tag {tag}");
                let mut visible = 0;
                let mut categories = std::collections::BTreeSet::new();
                for resource in d.resources() {
                    let expected = expected_visible(&selection, search, tag, resource);
                    let label = format!("{} in {}", resource.id, context);
                    assert_eq!(d.outcome().is_visible(&resource.id), expected, "{}", label);
                    assert_eq!(d.filter().matches(resource), expected, "{}", label);
                    if expected {
                        visible += 1;
                        categories.insert(resource.category.clone());
                    }
                }
                assert_eq!(d.outcome().visible_resources, visible, "{}", context);
                assert_eq!(d.outcome().visible_categories, categories.len(), "{}", context);
                cases += 1;
            }
        }
    }
    assert!(cases > 100);

    d.set_tag("all");
    d.set_search("coding");
    d.set_facets(FacetSelection::only([FacetValue::Free, FacetValue::Freemium]));
    assert_eq!(d.outcome().visible_resources, 2);
    assert_eq!(d.outcome().visible_categories, 1);

    d.clear_search();
    d.set_facets(FacetSelection::none());
    assert_eq!(d.outcome().visible_resources, 6);
}

#[test]
fn free_excludes_freemium() {
    let mut d = directory();
    d.set_facets(FacetSelection::only([FacetValue::Free]));
    assert!(!d.outcome().is_visible("tynker"));
    assert!(d.outcome().is_visible("scratch"));

    d.set_facets(FacetSelection::only([FacetValue::Paid]));
    assert_eq!(d.outcome().visible_resources, 1);
    assert!(d.outcome().is_visible("ixl"));
}

#[test]
fn pills_follow_checkbox_order() {
    let mut d = directory();
    d.set_facets(FacetSelection::only([FacetValue::Cs, FacetValue::Free, FacetValue::Middle]));

    let labels: Vec<String> = d
        .pills()
        .iter()
        .map(|p| format!("{}: {}", p.facet_label, p.label))
        .collect();
    assert_eq!(
        labels,
        vec!["Cost: Free", "Grade: Middle School", "Subject: CS/Tech"]
    );
}

#[test]
fn unknown_search_shows_no_results() {
    let mut d = directory();
    d.apply_url_search("/resources?search=underwater+basket+weaving");
    assert!(d.outcome().is_empty());

    d.reset_filters();
    assert_eq!(d.outcome().visible_resources, 6);
}

#[test]
fn collapsed_categories_restore_from_preferences() {
    let mut prefs = PreferenceStore::new(MemoryStorage::new());
    prefs
        .update(|s| {
            s.toggle_collapsed("Science");
        })
        .unwrap();

    let mut d = directory();
    d.sort(SortOrder::ZA);
    let settings: DisplaySettings = prefs.load();
    for name in settings.collapsed_categories.clone() {
        d.set_expanded(&name, false);
    }

    assert!(!d.section("Science").unwrap().expanded);
    assert!(d.section("Math").unwrap().expanded);
    assert_eq!(d.sections()[0].name, "Science");
}

//! Resource query actions
//!
//! Read-only operations over the loaded catalog. Handlers deserialize the
//! query string into these structs and map errors to HTTP responses.

use catalog::{relevance_score, Facet, FacetValue, Resource, SearchField, SearchHit, SearchResponse};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::domains::resources::models::Catalog;

/// Default cap on search results
pub const DEFAULT_SEARCH_LIMIT: usize = 50;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SearchError {
    #[error("Query parameter \"q\" required")]
    MissingQuery,
}

/// `GET /api/v1/resources` query string
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResourceQuery {
    pub category: Option<String>,
    pub grade: Option<String>,
    pub subject: Option<String>,
    pub cost: Option<String>,
    pub search: Option<String>,
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ResourcePage {
    pub success: bool,
    pub total: usize,
    pub count: usize,
    pub offset: usize,
    pub limit: usize,
    pub resources: Vec<Resource>,
}

/// Category metadata without its records
#[derive(Debug, Clone, Serialize)]
pub struct CategorySummary {
    pub name: String,
    pub description: String,
    pub icon: String,
    pub resource_count: usize,
}

/// A category with its flattened records
#[derive(Debug, Clone, Serialize)]
pub struct CategoryDetail {
    pub name: String,
    pub description: String,
    pub icon: String,
    pub resources: Vec<Resource>,
}

/// `GET /api/v1/search` query string
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
    pub fields: Option<String>,
    pub limit: Option<usize>,
}

/// A non-empty query value
fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Known checkbox values use the facet predicate; anything else is a tag substring
fn facet_matches(facet: Facet, value: &str, tags: &str) -> bool {
    let value = value.to_lowercase();
    match FacetValue::parse(facet, &value) {
        Some(known) => known.matches(tags),
        None => tags.contains(&value),
    }
}

impl ResourceQuery {
    pub fn matches(&self, resource: &Resource) -> bool {
        let tags = resource.tag_string();

        if let Some(category) = present(&self.category) {
            if resource.category != category {
                return false;
            }
        }

        let facets = [
            (Facet::Grade, &self.grade),
            (Facet::Subject, &self.subject),
            (Facet::Cost, &self.cost),
        ];
        for (facet, value) in facets {
            if let Some(value) = present(value) {
                if !facet_matches(facet, value, &tags) {
                    return false;
                }
            }
        }

        match present(&self.search) {
            Some(term) => {
                let term = term.to_lowercase();
                resource.name.to_lowercase().contains(&term)
                    || resource.description.to_lowercase().contains(&term)
            }
            None => true,
        }
    }
}

/// Filter then paginate. `limit` defaults to the whole filtered list.
pub fn list_resources(catalog: &Catalog, query: &ResourceQuery) -> ResourcePage {
    let filtered: Vec<&Resource> = catalog
        .resources()
        .iter()
        .filter(|r| query.matches(r))
        .collect();

    let total = filtered.len();
    let offset = query.offset.unwrap_or(0);
    let limit = query.limit.unwrap_or(total);

    let resources: Vec<Resource> = filtered
        .into_iter()
        .skip(offset)
        .take(limit)
        .cloned()
        .collect();

    debug!(total, offset, limit, "Listed resources");

    ResourcePage {
        success: true,
        total,
        count: resources.len(),
        offset,
        limit,
        resources,
    }
}

pub fn list_categories(catalog: &Catalog) -> Vec<CategorySummary> {
    catalog
        .categories()
        .iter()
        .map(|c| CategorySummary {
            name: c.name.clone(),
            description: c.description.clone(),
            icon: c.icon.clone(),
            resource_count: c.resources.len(),
        })
        .collect()
}

pub fn category_details(catalog: &Catalog) -> Vec<CategoryDetail> {
    catalog
        .categories()
        .iter()
        .filter_map(|c| find_category(catalog, &c.name))
        .collect()
}

pub fn find_category(catalog: &Catalog, name: &str) -> Option<CategoryDetail> {
    let entry = catalog.category(name)?;
    Some(CategoryDetail {
        name: entry.name.clone(),
        description: entry.description.clone(),
        icon: entry.icon.clone(),
        resources: catalog.resources_in(name).cloned().collect(),
    })
}

/// Score every record against `q`, drop misses, order by score (ties keep document order)
pub fn search_resources(catalog: &Catalog, query: &SearchQuery) -> Result<SearchResponse, SearchError> {
    let q = query
        .q
        .as_deref()
        .map(str::to_lowercase)
        .filter(|q| !q.is_empty())
        .ok_or(SearchError::MissingQuery)?;

    let fields = match query.fields.as_deref() {
        Some(list) => SearchField::parse_list(list),
        None => SearchField::all().to_vec(),
    };
    let limit = query.limit.unwrap_or(DEFAULT_SEARCH_LIMIT);

    let mut results: Vec<SearchHit> = catalog
        .resources()
        .iter()
        .filter_map(|resource| {
            let score = relevance_score(resource, &q, &fields);
            (score > 0).then(|| SearchHit {
                resource: resource.clone(),
                relevance_score: score,
            })
        })
        .collect();

    results.sort_by(|a, b| b.relevance_score.cmp(&a.relevance_score));
    results.truncate(limit);

    debug!(query = %q, hits = results.len(), "Search");

    Ok(SearchResponse {
        success: true,
        query: q,
        count: results.len(),
        results,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Catalog {
        Catalog::from_json(
            r#"{"categories":[
                {"name":"Math","description":"Numbers","resources":[
                    {"name":"Desmos","description":"Graphing calculator","tags":["Free","Math","High School"]},
                    {"name":"IXL","description":"Practice for math skills","tags":["Premium","Math","K-5"]},
                    {"name":"Prodigy","description":"Math game","tags":["Freemium","Math","Elementary"]}
                ]},
                {"name":"Science","resources":[
                    {"name":"PhET","description":"Simulations","tags":["Free","Science","Middle School"]}
                ]}
            ]}"#,
        )
        .unwrap()
    }

    #[test]
    fn test_list_filters_by_facet_predicates() {
        let c = catalog();
        let query = ResourceQuery {
            cost: Some("free".into()),
            ..Default::default()
        };
        let page = list_resources(&c, &query);
        let ids: Vec<&str> = page.resources.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["desmos", "phet"]);

        let query = ResourceQuery {
            grade: Some("Elementary".into()),
            subject: Some("math".into()),
            ..Default::default()
        };
        assert_eq!(list_resources(&c, &query).total, 2);
    }

    #[test]
    fn test_list_category_search_and_pagination() {
        let c = catalog();
        let query = ResourceQuery {
            category: Some("Math".into()),
            search: Some("MATH".into()),
            offset: Some(1),
            limit: Some(5),
            ..Default::default()
        };
        let page = list_resources(&c, &query);
        assert_eq!(page.total, 2);
        assert_eq!(page.count, 1);
        assert_eq!(page.resources[0].id, "prodigy");
        assert_eq!(page.limit, 5);
    }

    #[test]
    fn test_default_limit_is_everything() {
        let page = list_resources(&catalog(), &ResourceQuery::default());
        assert_eq!(page.limit, 4);
        assert_eq!(page.count, 4);
    }

    #[test]
    fn test_search_scores_and_orders() {
        let query = SearchQuery {
            q: Some("Math".into()),
            ..Default::default()
        };
        let response = search_resources(&catalog(), &query).unwrap();
        assert_eq!(response.query, "math");
        let scored: Vec<(&str, u32)> = response
            .results
            .iter()
            .map(|h| (h.resource.id.as_str(), h.relevance_score))
            .collect();
        // IXL: description + tag, Prodigy: description + tag, Desmos: tag
        assert_eq!(scored, vec![("ixl", 3), ("prodigy", 3), ("desmos", 1)]);
    }

    #[test]
    fn test_search_fields_and_limit() {
        let query = SearchQuery {
            q: Some("math".into()),
            fields: Some("name".into()),
            limit: None,
        };
        assert_eq!(search_resources(&catalog(), &query).unwrap().count, 0);

        let query = SearchQuery {
            q: Some("math".into()),
            fields: None,
            limit: Some(1),
        };
        assert_eq!(search_resources(&catalog(), &query).unwrap().count, 1);
    }

    #[test]
    fn test_search_requires_query() {
        assert_eq!(
            search_resources(&catalog(), &SearchQuery::default()).unwrap_err(),
            SearchError::MissingQuery
        );
    }

    #[test]
    fn test_categories() {
        let c = catalog();
        let summaries = list_categories(&c);
        assert_eq!(summaries[0].resource_count, 3);
        assert_eq!(summaries[1].icon, "📚");
        assert_eq!(category_details(&c)[1].resources[0].id, "phet");
        assert!(find_category(&c, "History").is_none());
    }
}

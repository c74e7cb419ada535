use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use catalog::{CatalogDocument, CategoryEntry, Resource};

/// The loaded catalog: the category document plus its flattened records
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    document: CatalogDocument,
    resources: Vec<Resource>,
}

impl Catalog {
    pub fn new(document: CatalogDocument) -> Self {
        let resources = document.flatten();
        Self {
            document,
            resources,
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let document: CatalogDocument =
            serde_json::from_str(json).context("Catalog is not a valid category document")?;
        Ok(Self::new(document))
    }

    pub fn read(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)
            .with_context(|| format!("Failed to read catalog {}", path.display()))?;
        Self::from_json(&json)
    }

    /// Load the catalog file. A missing or malformed file yields an empty catalog.
    pub fn load(path: &Path) -> Self {
        match Self::read(path) {
            Ok(catalog) => {
                tracing::info!(
                    path = %path.display(),
                    categories = catalog.categories().len(),
                    resources = catalog.len(),
                    "Catalog loaded"
                );
                catalog
            }
            Err(e) => {
                tracing::error!(path = %path.display(), error = %format!("{:#}", e), "Error loading catalog");
                Self::default()
            }
        }
    }

    /// All records in document order
    pub fn resources(&self) -> &[Resource] {
        &self.resources
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    pub fn find(&self, resource_id: &str) -> Option<&Resource> {
        self.resources.iter().find(|r| r.id == resource_id)
    }

    pub fn categories(&self) -> &[CategoryEntry] {
        &self.document.categories
    }

    pub fn category(&self, name: &str) -> Option<&CategoryEntry> {
        self.document.category(name)
    }

    /// Flattened records of one category
    pub fn resources_in(&self, category: &str) -> impl Iterator<Item = &Resource> + '_ {
        let category = category.to_string();
        self.resources.iter().filter(move |r| r.category == category)
    }
}

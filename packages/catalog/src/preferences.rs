//! Display preferences persisted in local key/value storage

use std::collections::{BTreeSet, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::StorageError;

/// Storage key holding the JSON-serialized settings object
pub const SETTINGS_KEY: &str = "resourcesDisplaySettings";

/// Local persistent key/value storage with string values
pub trait Storage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove_item(&mut self, key: &str) -> Result<(), StorageError>;
}

/// Storage that lives for the process only
#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    items: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
        self.items.remove(key);
        Ok(())
    }
}

/// Storage backed by one JSON object file of key -> string value.
///
/// Entries written by other tools with non-string values are kept as they are.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<config dir>/<app>/storage.json`, when the platform has a config dir
    pub fn in_dir(dir: &Path, app: &str) -> Self {
        Self::new(dir.join(app).join("storage.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<Map<String, Value>, StorageError> {
        match fs::read_to_string(&self.path) {
            Ok(data) => Ok(serde_json::from_str(&data)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Map::new()),
            Err(e) => Err(e.into()),
        }
    }

    /// Contents for a write. A file that is not a JSON object is replaced;
    /// I/O failures are returned.
    fn read_for_write(&self) -> Result<Map<String, Value>, StorageError> {
        match self.read_all() {
            Err(StorageError::Json(e)) => {
                tracing::warn!(path = %self.path.display(), error = %e, "Replacing unreadable storage file");
                Ok(Map::new())
            }
            other => other,
        }
    }

    fn write_all(&self, items: &Map<String, Value>) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(items)?)?;
        Ok(())
    }
}

impl Storage for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.read_all()?.remove(key).map(|value| match value {
            Value::String(s) => s,
            other => other.to_string(),
        }))
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut items = self.read_for_write()?;
        items.insert(key.to_string(), Value::String(value.to_string()));
        self.write_all(&items)
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
        let mut items = self.read_for_write()?;
        if items.remove(key).is_some() {
            self.write_all(&items)?;
        }
        Ok(())
    }
}

/// Card layout
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Grid,
    List,
}

/// The flat settings object. Missing fields take their defaults on load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DisplaySettings {
    pub view: ViewMode,
    pub compact: bool,
    pub show_descriptions: bool,
    pub show_tags: bool,
    pub high_contrast: bool,
    pub collapsed_categories: Vec<String>,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            view: ViewMode::Grid,
            compact: false,
            show_descriptions: true,
            show_tags: true,
            high_contrast: false,
            collapsed_categories: Vec::new(),
        }
    }
}

impl DisplaySettings {
    /// Every class this store manages, with whether it should be on
    pub fn class_toggles(&self) -> [(&'static str, bool); 5] {
        [
            ("list-view", self.view == ViewMode::List),
            ("compact-mode", self.compact),
            ("hide-descriptions", !self.show_descriptions),
            ("hide-tags", !self.show_tags),
            ("high-contrast", self.high_contrast),
        ]
    }

    /// Toggle the managed classes on a class list, leaving other classes alone
    pub fn apply(&self, classes: &mut BTreeSet<String>) {
        for (class, on) in self.class_toggles() {
            if on {
                classes.insert(class.to_string());
            } else {
                classes.remove(class);
            }
        }
    }

    /// Managed classes that are on
    pub fn css_classes(&self) -> BTreeSet<String> {
        let mut classes = BTreeSet::new();
        self.apply(&mut classes);
        classes
    }

    pub fn is_collapsed(&self, category: &str) -> bool {
        self.collapsed_categories.iter().any(|c| c == category)
    }

    /// Flip a category's collapsed flag; returns true when it is now collapsed
    pub fn toggle_collapsed(&mut self, category: &str) -> bool {
        if self.is_collapsed(category) {
            self.collapsed_categories.retain(|c| c != category);
            false
        } else {
            self.collapsed_categories.push(category.to_string());
            true
        }
    }

    /// Set one field from its JSON name and a string value
    pub fn set_field(&mut self, field: &str, value: &str) -> Result<(), String> {
        let parse_bool = |v: &str| match v.trim().to_lowercase().as_str() {
            "true" | "on" | "yes" | "1" => Ok(true),
            "false" | "off" | "no" | "0" => Ok(false),
            other => Err(format!("expected true/false, got '{}'", other)),
        };

        match field {
            "view" => {
                self.view = match value.trim().to_lowercase().as_str() {
                    "grid" => ViewMode::Grid,
                    "list" => ViewMode::List,
                    other => return Err(format!("expected grid/list, got '{}'", other)),
                }
            }
            "compact" => self.compact = parse_bool(value)?,
            "showDescriptions" => self.show_descriptions = parse_bool(value)?,
            "showTags" => self.show_tags = parse_bool(value)?,
            "highContrast" => self.high_contrast = parse_bool(value)?,
            other => return Err(format!("unknown setting '{}'", other)),
        }
        Ok(())
    }
}

/// Loads and saves [`DisplaySettings`] through a [`Storage`]
#[derive(Debug)]
pub struct PreferenceStore<S: Storage> {
    storage: S,
}

impl<S: Storage> PreferenceStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Stored settings merged over defaults.
    ///
    /// Unavailable storage or malformed JSON falls back to defaults.
    pub fn load(&self) -> DisplaySettings {
        let raw = match self.storage.get_item(SETTINGS_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return DisplaySettings::default(),
            Err(e) => {
                tracing::debug!(error = %e, "Display settings storage unavailable");
                return DisplaySettings::default();
            }
        };

        serde_json::from_str(&raw).unwrap_or_else(|e| {
            tracing::debug!(error = %e, "Ignoring malformed display settings");
            DisplaySettings::default()
        })
    }

    pub fn save(&mut self, settings: &DisplaySettings) -> Result<(), StorageError> {
        let json = serde_json::to_string(settings)?;
        self.storage.set_item(SETTINGS_KEY, &json)
    }

    /// Load, change and save in one step
    pub fn update<F>(&mut self, change: F) -> Result<DisplaySettings, StorageError>
    where
        F: FnOnce(&mut DisplaySettings),
    {
        let mut settings = self.load();
        change(&mut settings);
        self.save(&settings)?;
        Ok(settings)
    }

    /// Forget saved settings; the next load yields defaults
    pub fn reset(&mut self) -> Result<(), StorageError> {
        self.storage.remove_item(SETTINGS_KEY)
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }
}

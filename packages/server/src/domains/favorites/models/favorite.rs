use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A saved resource with the note attached to it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Favorite {
    pub id: Uuid,
    pub resource_id: String,
    pub notes: String,
    pub added_at: DateTime<Utc>,
}

impl Favorite {
    pub fn new(resource_id: &str, notes: &str) -> Self {
        Self {
            id: Uuid::now_v7(),
            resource_id: resource_id.to_string(),
            notes: notes.to_string(),
            added_at: Utc::now(),
        }
    }
}

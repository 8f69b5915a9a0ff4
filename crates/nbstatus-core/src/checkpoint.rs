use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A saved snapshot of the document, as reported by the document model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Checkpoint {
    #[serde(default)]
    pub id: String,
    pub last_modified: DateTime<Utc>,
}

impl Checkpoint {
    pub fn new(id: impl Into<String>, last_modified: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            last_modified,
        }
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A muscle-group style grouping of exercises ("Chest", "Back", ...).
/// Reference data: created and maintained by privileged callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    /// Store-assigned identifier (0 until persisted)
    pub id: i64,

    /// Unique display label
    pub name: String,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Category {
    /// Create an unsaved Category
    pub fn new(name: String) -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            name: name.trim().to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn rename(&mut self, name: String) {
        self.name = name.trim().to_string();
        self.updated_at = Utc::now();
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

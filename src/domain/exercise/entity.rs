use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single movement in the catalog ("Bench Press").
/// Always belongs to exactly one Category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exercise {
    /// Store-assigned identifier (0 until persisted)
    pub id: i64,

    pub name: String,

    /// Optional free-text coaching notes
    pub instruction: Option<String>,

    /// Owning category, must exist
    pub category_id: i64,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Exercise {
    /// Create an unsaved Exercise
    pub fn new(name: String, instruction: Option<String>, category_id: i64) -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            name: name.trim().to_string(),
            instruction,
            category_id,
            created_at: now,
            updated_at: now,
        }
    }

    /// Merge-patch update: `None` keeps the stored value,
    /// `Some(None)` clears the instruction.
    pub fn update_details(
        &mut self,
        name: Option<String>,
        instruction: Option<Option<String>>,
        category_id: Option<i64>,
    ) {
        if let Some(n) = name {
            self.name = n.trim().to_string();
        }
        if let Some(i) = instruction {
            self.instruction = i;
        }
        if let Some(c) = category_id {
            self.category_id = c;
        }

        self.updated_at = Utc::now();
    }
}

impl std::fmt::Display for Exercise {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

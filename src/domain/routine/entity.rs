use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A named, ordered plan of exercises that users can subscribe to.
///
/// The routine itself only carries its descriptive fields; the ordered
/// exercise list and the subscriber set live in the composition and
/// enrollment records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Routine {
    /// Store-assigned identifier (0 until persisted)
    pub id: i64,

    pub name: String,

    pub description: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Routine {
    /// Create an unsaved Routine
    pub fn new(name: String, description: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            name: name.trim().to_string(),
            description,
            created_at: now,
            updated_at: now,
        }
    }

    /// Merge-patch update
    pub fn update(&mut self, name: Option<String>, description: Option<Option<String>>) {
        if let Some(n) = name {
            self.name = n.trim().to_string();
        }
        if let Some(d) = description {
            self.description = d;
        }

        self.updated_at = Utc::now();
    }
}

impl std::fmt::Display for Routine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

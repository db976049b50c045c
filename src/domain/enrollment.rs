// src/domain/enrollment.rs
//
// Enrollment record: a User subscribed to a Routine.
// At most one per (user_id, routine_id); duplicates are rejected, never merged.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enrollment {
    pub user_id: i64,
    pub routine_id: i64,
    pub created_at: DateTime<Utc>,
}

impl Enrollment {
    pub fn new(user_id: i64, routine_id: i64) -> Self {
        Self {
            user_id,
            routine_id,
            created_at: Utc::now(),
        }
    }
}

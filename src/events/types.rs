// events/types.rs
//
// All domain events in the system.
// Each event represents an immutable fact that has already occurred.
//
// CRITICAL RULES:
// - Events are facts, not commands
// - Events are immutable
// - Events carry only the data needed to react
// - No business logic in event types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Trait that all domain events must implement
pub trait DomainEvent: std::fmt::Debug + Clone {
    /// Unique identifier for this event instance
    fn event_id(&self) -> Uuid;

    /// When this event occurred
    fn occurred_at(&self) -> DateTime<Utc>;

    /// Human-readable event type name
    fn event_type(&self) -> &'static str;
}

macro_rules! domain_event {
    ($name:ident) => {
        impl DomainEvent for $name {
            fn event_id(&self) -> Uuid {
                self.event_id
            }
            fn occurred_at(&self) -> DateTime<Utc> {
                self.occurred_at
            }
            fn event_type(&self) -> &'static str {
                stringify!($name)
            }
        }
    };
}

// ============================================================================
// CATALOG EVENTS
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryCreated {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub category_id: i64,
    pub name: String,
}

impl CategoryCreated {
    pub fn new(category_id: i64, name: String) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            category_id,
            name,
        }
    }
}

domain_event!(CategoryCreated);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryUpdated {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub category_id: i64,
    pub name: String,
}

impl CategoryUpdated {
    pub fn new(category_id: i64, name: String) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            category_id,
            name,
        }
    }
}

domain_event!(CategoryUpdated);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryDeleted {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub category_id: i64,
}

impl CategoryDeleted {
    pub fn new(category_id: i64) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            category_id,
        }
    }
}

domain_event!(CategoryDeleted);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExerciseCreated {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub exercise_id: i64,
    pub category_id: i64,
    pub name: String,
}

impl ExerciseCreated {
    pub fn new(exercise_id: i64, category_id: i64, name: String) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            exercise_id,
            category_id,
            name,
        }
    }
}

domain_event!(ExerciseCreated);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExerciseUpdated {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub exercise_id: i64,
    pub category_id: i64,
}

impl ExerciseUpdated {
    pub fn new(exercise_id: i64, category_id: i64) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            exercise_id,
            category_id,
        }
    }
}

domain_event!(ExerciseUpdated);

/// Composition records for the exercise are gone as well
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExerciseDeleted {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub exercise_id: i64,
}

impl ExerciseDeleted {
    pub fn new(exercise_id: i64) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            exercise_id,
        }
    }
}

domain_event!(ExerciseDeleted);

// ============================================================================
// ROUTINE EVENTS
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutineCreated {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub routine_id: i64,
    pub name: String,
    pub created_by: i64,
    pub exercise_count: usize,
}

impl RoutineCreated {
    pub fn new(routine_id: i64, name: String, created_by: i64, exercise_count: usize) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            routine_id,
            name,
            created_by,
            exercise_count,
        }
    }
}

domain_event!(RoutineCreated);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutineUpdated {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub routine_id: i64,
}

impl RoutineUpdated {
    pub fn new(routine_id: i64) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            routine_id,
        }
    }
}

domain_event!(RoutineUpdated);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutineDeleted {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub routine_id: i64,
}

impl RoutineDeleted {
    pub fn new(routine_id: i64) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            routine_id,
        }
    }
}

domain_event!(RoutineDeleted);

/// Emitted on every successful add, including re-adds that only change
/// parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExerciseAddedToRoutine {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub routine_id: i64,
    pub exercise_id: i64,
    pub sequence: u32,
}

impl ExerciseAddedToRoutine {
    pub fn new(routine_id: i64, exercise_id: i64, sequence: u32) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            routine_id,
            exercise_id,
            sequence,
        }
    }
}

domain_event!(ExerciseAddedToRoutine);

/// Only emitted when a record was actually removed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExerciseRemovedFromRoutine {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub routine_id: i64,
    pub exercise_id: i64,
}

impl ExerciseRemovedFromRoutine {
    pub fn new(routine_id: i64, exercise_id: i64) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            routine_id,
            exercise_id,
        }
    }
}

domain_event!(ExerciseRemovedFromRoutine);

// ============================================================================
// USER EVENTS
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRegistered {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub user_id: i64,
}

impl UserRegistered {
    pub fn new(user_id: i64) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            user_id,
        }
    }
}

domain_event!(UserRegistered);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSubscribed {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub user_id: i64,
    pub routine_id: i64,
}

impl UserSubscribed {
    pub fn new(user_id: i64, routine_id: i64) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            user_id,
            routine_id,
        }
    }
}

domain_event!(UserSubscribed);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserUnsubscribed {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub user_id: i64,
    pub routine_id: i64,
}

impl UserUnsubscribed {
    pub fn new(user_id: i64, routine_id: i64) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            user_id,
            routine_id,
        }
    }
}

domain_event!(UserUnsubscribed);

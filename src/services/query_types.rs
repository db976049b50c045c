// src/services/query_types.rs
//
// Read-side view models
//
// Storage stays normalized; these are the shapes callers see.
// - No business logic in types
// - Composition fields are flattened next to the exercise's own fields

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{Category, Exercise, Routine, RoutineExercise, User};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryView {
    pub id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Category> for CategoryView {
    fn from(category: Category) -> Self {
        Self {
            id: category.id,
            name: category.name,
            created_at: category.created_at,
            updated_at: category.updated_at,
        }
    }
}

/// An exercise with its category resolved
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseView {
    pub id: i64,
    pub name: String,
    pub instruction: Option<String>,
    pub category_id: i64,
    pub category: CategoryView,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ExerciseView {
    pub fn new(exercise: Exercise, category: CategoryView) -> Self {
        Self {
            id: exercise.id,
            name: exercise.name,
            instruction: exercise.instruction,
            category_id: exercise.category_id,
            category,
            created_at: exercise.created_at,
            updated_at: exercise.updated_at,
        }
    }
}

/// One line of a routine: the exercise plus its training parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComposedExercise {
    pub id: i64,
    pub name: String,
    pub instruction: Option<String>,
    pub category_id: i64,
    pub sequence: u32,
    pub target_sets: u32,
    pub target_reps: u32,
    pub rest_seconds: u32,
}

impl ComposedExercise {
    pub fn new(exercise: Exercise, record: RoutineExercise) -> Self {
        Self {
            id: exercise.id,
            name: exercise.name,
            instruction: exercise.instruction,
            category_id: exercise.category_id,
            sequence: record.sequence,
            target_sets: record.target_sets,
            target_reps: record.target_reps,
            rest_seconds: record.rest_seconds,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserView {
    pub id: i64,
    pub name: String,
    pub email: String,
}

impl From<User> for UserView {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
        }
    }
}

/// A routine with its ordered composition.
///
/// `users` is only populated on single-routine reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutineView {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub exercises: Vec<ComposedExercise>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub users: Option<Vec<UserView>>,
}

impl RoutineView {
    pub fn new(routine: Routine, exercises: Vec<ComposedExercise>) -> Self {
        Self {
            id: routine.id,
            name: routine.name,
            description: routine.description,
            created_at: routine.created_at,
            updated_at: routine.updated_at,
            exercises,
            users: None,
        }
    }

    pub fn with_users(mut self, users: Vec<UserView>) -> Self {
        self.users = Some(users);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_composed_exercise_is_flat() {
        let mut exercise = Exercise::new("Bench Press".to_string(), None, 1);
        exercise.id = 4;
        let record = RoutineExercise {
            routine_id: 9,
            exercise_id: 4,
            sequence: 1,
            target_sets: 4,
            target_reps: 10,
            rest_seconds: 90,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let json = serde_json::to_value(ComposedExercise::new(exercise, record)).unwrap();

        assert_eq!(json["id"], 4);
        assert_eq!(json["name"], "Bench Press");
        assert_eq!(json["sequence"], 1);
        assert_eq!(json["target_sets"], 4);
        assert_eq!(json["rest_seconds"], 90);
    }

    #[test]
    fn test_users_omitted_unless_loaded() {
        let view = RoutineView::new(Routine::new("Push Day".to_string(), None), vec![]);
        let json = serde_json::to_value(&view).unwrap();
        assert!(json.get("users").is_none());

        let json = serde_json::to_value(view.with_users(vec![])).unwrap();
        assert_eq!(json["users"], serde_json::json!([]));
    }
}

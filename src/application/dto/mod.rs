// src/application/dto/mod.rs
//
// Data Transfer Objects
//
// CRITICAL PRINCIPLES:
// - DTOs are caller-facing input shapes
// - DTOs carry raw values; domain validation happens in services
// - Partial updates distinguish "absent" from "null"
//
// Responses use the view types from `services::query_types`.

use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::{CompositionEntry, CompositionParams, User};

/// `Option<Option<T>>` for merge-patch fields:
/// absent -> None, null -> Some(None), value -> Some(Some(value))
fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

// ============================================================================
// CATALOG DTOs
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCategoryDto {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateCategoryDto {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateExerciseDto {
    pub name: String,
    #[serde(default)]
    pub instruction: Option<String>,
    pub category_id: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateExerciseDto {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub instruction: Option<Option<String>>,
    #[serde(default)]
    pub category_id: Option<i64>,
}

// ============================================================================
// ROUTINE DTOs
// ============================================================================

/// One exercise with its training parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutineExerciseDto {
    pub exercise_id: i64,
    pub target_sets: i64,
    pub target_reps: i64,
    #[serde(default)]
    pub rest_seconds: Option<i64>,
    #[serde(default)]
    pub sequence: Option<i64>,
}

impl RoutineExerciseDto {
    pub fn params(&self) -> CompositionParams {
        CompositionParams {
            target_sets: self.target_sets,
            target_reps: self.target_reps,
            rest_seconds: self.rest_seconds,
            sequence: self.sequence,
        }
    }
}

impl From<&RoutineExerciseDto> for CompositionEntry {
    fn from(dto: &RoutineExerciseDto) -> Self {
        CompositionEntry {
            exercise_id: dto.exercise_id,
            params: dto.params(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRoutineDto {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Initial composition
    #[serde(default)]
    pub exercises: Vec<RoutineExerciseDto>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateRoutineDto {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<String>>,
}

// ============================================================================
// USER DTOs
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterUserDto {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserDto {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub created_at: String,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            created_at: user.created_at.to_rfc3339(),
        }
    }
}

// ============================================================================
// ACKNOWLEDGEMENT
// ============================================================================

/// Returned by operations that have nothing else to report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AckDto {
    pub success: bool,
    pub message: String,
}

impl AckDto {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_exercise_distinguishes_null_from_absent() {
        let absent: UpdateExerciseDto = serde_json::from_str(r#"{"name":"Row"}"#).unwrap();
        assert_eq!(absent.instruction, None);

        let cleared: UpdateExerciseDto = serde_json::from_str(r#"{"instruction":null}"#).unwrap();
        assert_eq!(cleared.instruction, Some(None));

        let set: UpdateExerciseDto =
            serde_json::from_str(r#"{"instruction":"Pull to the hip"}"#).unwrap();
        assert_eq!(set.instruction, Some(Some("Pull to the hip".to_string())));
    }

    #[test]
    fn test_create_routine_defaults() {
        let dto: CreateRoutineDto = serde_json::from_str(r#"{"name":"Push Day"}"#).unwrap();
        assert!(dto.description.is_none());
        assert!(dto.exercises.is_empty());
    }

    #[test]
    fn test_routine_exercise_to_entry() {
        let dto: RoutineExerciseDto = serde_json::from_str(
            r#"{"exercise_id":4,"target_sets":4,"target_reps":10,"rest_seconds":90}"#,
        )
        .unwrap();

        let entry = CompositionEntry::from(&dto);
        assert_eq!(entry.exercise_id, 4);
        assert_eq!(entry.params.rest_seconds, Some(90));
        assert_eq!(entry.params.sequence, None);
    }
}

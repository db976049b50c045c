// src/domain/mod.rs
//
// Domain Root - The Single Source of Truth for Domain API
//
// This file MUST declare all domain modules and re-export their public API.
// All other modules import from `crate::domain::*`

// ============================================================================
// MODULE DECLARATIONS
// ============================================================================

pub mod category;
pub mod composition;
pub mod enrollment;
pub mod exercise;
pub mod routine;
pub mod user;

// ============================================================================
// PUBLIC API RE-EXPORTS
// ============================================================================

// Catalog (reference data)
pub use category::{validate_category, Category};
pub use exercise::{validate_exercise, Exercise};

// Routine Domain
pub use routine::{validate_routine, Routine};

// Composition (Routine <-> Exercise with training parameters)
pub use composition::{
    next_sequence, validate_composition, CompositionEntry, CompositionParams, RoutineExercise,
    DEFAULT_REST_SECONDS,
};

// Enrollment (User <-> Routine)
pub use enrollment::Enrollment;

// Users and caller identity
pub use user::{validate_user, CurrentUser, User};

// ============================================================================
// DOMAIN ERROR TYPES
// ============================================================================

use thiserror::Error;

/// Domain-level errors
/// These represent violations of business rules and invariants
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    #[error("{entity} {id} does not exist")]
    DanglingReference { entity: &'static str, id: i64 },
}

/// Domain result type
pub type DomainResult<T> = Result<T, DomainError>;

/// Longest accepted display name, in characters.
pub const MAX_NAME_LENGTH: usize = 255;

/// Shared rule for every user-facing name: not blank, at most 255 characters.
pub(crate) fn validate_display_name(kind: &str, name: &str) -> DomainResult<()> {
    if name.trim().is_empty() {
        return Err(DomainError::InvariantViolation(format!(
            "{} name cannot be empty",
            kind
        )));
    }
    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(DomainError::InvariantViolation(format!(
            "{} name cannot exceed {} characters",
            kind, MAX_NAME_LENGTH
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_limits() {
        assert!(validate_display_name("Routine", "Push Day").is_ok());
        assert!(validate_display_name("Routine", "  ").is_err());
        assert!(validate_display_name("Routine", &"x".repeat(MAX_NAME_LENGTH)).is_ok());
        assert!(validate_display_name("Routine", &"x".repeat(MAX_NAME_LENGTH + 1)).is_err());
    }

    #[test]
    fn test_dangling_reference_message() {
        let err = DomainError::DanglingReference {
            entity: "Category",
            id: 9999,
        };
        assert_eq!(err.to_string(), "Category 9999 does not exist");
    }
}

use super::entity::Exercise;
use crate::domain::{validate_display_name, DomainError, DomainResult};

/// Validates the field-level Exercise invariants.
/// Existence of `category_id` is checked by the catalog service.
pub fn validate_exercise(exercise: &Exercise) -> DomainResult<()> {
    validate_display_name("Exercise", &exercise.name)?;
    validate_category_id(exercise.category_id)?;
    Ok(())
}

fn validate_category_id(category_id: i64) -> DomainResult<()> {
    if category_id <= 0 {
        return Err(DomainError::DanglingReference {
            entity: "Category",
            id: category_id,
        });
    }
    Ok(())
}

/// Invariants that must hold true for Exercise domain:
///
/// 1. Name is not blank and at most 255 characters
/// 2. category_id references an existing Category (creation and update)
/// 3. Instruction is optional and unconstrained

use super::entity::Routine;
use crate::domain::{validate_display_name, DomainResult};

/// Validates all Routine invariants
pub fn validate_routine(routine: &Routine) -> DomainResult<()> {
    validate_display_name("Routine", &routine.name)
}

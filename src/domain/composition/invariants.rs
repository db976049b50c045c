use super::entity::CompositionParams;
use crate::domain::{DomainError, DomainResult};

/// Validates requested training parameters
///
/// - target_sets >= 1
/// - target_reps >= 1
/// - rest_seconds >= 0 when given
/// - sequence >= 1 when given
pub fn validate_composition(params: &CompositionParams) -> DomainResult<()> {
    require_at_least("target_sets", params.target_sets, 1)?;
    require_at_least("target_reps", params.target_reps, 1)?;
    if let Some(rest) = params.rest_seconds {
        require_at_least("rest_seconds", rest, 0)?;
    }
    if let Some(sequence) = params.sequence {
        require_at_least("sequence", sequence, 1)?;
    }
    Ok(())
}

/// Position given to an exercise appended without an explicit sequence.
pub fn next_sequence(member_count: usize) -> u32 {
    u32::try_from(member_count)
        .unwrap_or(u32::MAX)
        .saturating_add(1)
}

fn require_at_least(field: &str, value: i64, min: i64) -> DomainResult<()> {
    if value < min {
        return Err(DomainError::InvariantViolation(format!(
            "{} must be at least {}, got {}",
            field, min, value
        )));
    }
    Ok(())
}

/// Invariants that must hold true for the composition relation:
///
/// 1. (routine_id, exercise_id) is unique; re-adding overwrites parameters
/// 2. Sequence is positive but neither unique nor contiguous
/// 3. Removing a member never renumbers the others
/// 4. Omitted sequence appends at member count + 1
/// 5. Omitted rest interval is 60 seconds

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::composition::{RoutineExercise, DEFAULT_REST_SECONDS};

    #[test]
    fn test_next_sequence_appends() {
        assert_eq!(next_sequence(0), 1);
        assert_eq!(next_sequence(2), 3);
    }

    #[test]
    fn test_zero_sets_rejected() {
        let params = CompositionParams::new(0, 10);
        assert!(validate_composition(&params).is_err());
    }

    #[test]
    fn test_zero_rest_allowed_negative_rejected() {
        assert!(validate_composition(&CompositionParams::new(3, 8).with_rest_seconds(0)).is_ok());
        assert!(validate_composition(&CompositionParams::new(3, 8).with_rest_seconds(-1)).is_err());
    }

    #[test]
    fn test_zero_sequence_rejected() {
        let params = CompositionParams::new(3, 8).with_sequence(0);
        assert!(validate_composition(&params).is_err());
    }

    #[test]
    fn test_resolve_defaults() {
        let params = CompositionParams::new(4, 10);
        let record = RoutineExercise::resolve(1, 5, &params, None, 2).unwrap();

        assert_eq!(record.sequence, 3);
        assert_eq!(record.rest_seconds, DEFAULT_REST_SECONDS);
        assert_eq!(record.target_sets, 4);
        assert_eq!(record.target_reps, 10);
    }

    #[test]
    fn test_resolve_explicit_sequence_wins() {
        let params = CompositionParams::new(4, 10).with_sequence(7);
        let record = RoutineExercise::resolve(1, 5, &params, None, 2).unwrap();
        assert_eq!(record.sequence, 7);
    }

    #[test]
    fn test_reattach_keeps_position_and_overwrites_parameters() {
        let first = RoutineExercise::resolve(
            1,
            5,
            &CompositionParams::new(3, 12).with_rest_seconds(45),
            None,
            0,
        )
        .unwrap();

        let again = RoutineExercise::resolve(1, 5, &CompositionParams::new(5, 5), Some(&first), 4)
            .unwrap();

        assert_eq!(again.sequence, first.sequence);
        assert_eq!(again.target_sets, 5);
        assert_eq!(again.target_reps, 5);
        assert_eq!(again.rest_seconds, DEFAULT_REST_SECONDS);
        assert_eq!(again.created_at, first.created_at);
    }

    #[test]
    fn test_resolve_rejects_values_beyond_u32() {
        let params = CompositionParams::new(i64::from(u32::MAX) + 1, 10);
        assert!(RoutineExercise::resolve(1, 5, &params, None, 0).is_err());
    }
}

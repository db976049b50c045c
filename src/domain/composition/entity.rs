use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::invariants::{next_sequence, validate_composition};
use crate::domain::{DomainError, DomainResult};

/// Rest interval applied when the caller does not supply one.
pub const DEFAULT_REST_SECONDS: u32 = 60;

/// Training parameters as requested by a caller.
///
/// Values are kept signed so that out-of-range input (negative rest,
/// zero sets) reaches domain validation instead of failing a type
/// conversion somewhere upstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompositionParams {
    pub target_sets: i64,
    pub target_reps: i64,
    /// Defaults to [`DEFAULT_REST_SECONDS`]
    pub rest_seconds: Option<i64>,
    /// Defaults to "append": current member count + 1
    pub sequence: Option<i64>,
}

impl CompositionParams {
    pub fn new(target_sets: i64, target_reps: i64) -> Self {
        Self {
            target_sets,
            target_reps,
            rest_seconds: None,
            sequence: None,
        }
    }

    pub fn with_rest_seconds(mut self, rest_seconds: i64) -> Self {
        self.rest_seconds = Some(rest_seconds);
        self
    }

    pub fn with_sequence(mut self, sequence: i64) -> Self {
        self.sequence = Some(sequence);
        self
    }
}

/// One exercise to place in a routine, with its parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompositionEntry {
    pub exercise_id: i64,
    pub params: CompositionParams,
}

/// Composition record: links a Routine to an Exercise.
///
/// Keyed by (routine_id, exercise_id). Sequence values are positions, not
/// ranks: they may repeat or leave gaps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutineExercise {
    pub routine_id: i64,
    pub exercise_id: i64,
    pub sequence: u32,
    pub target_sets: u32,
    pub target_reps: u32,
    pub rest_seconds: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl RoutineExercise {
    /// Turn a request into the record to store.
    ///
    /// `existing` is the current record for the same pair, if any, and
    /// `member_count` the number of records the routine already has. Both
    /// must be read in the same transaction that writes the result.
    ///
    /// Sequence resolution:
    /// - explicit sequence wins
    /// - re-attaching an existing member keeps its position
    /// - otherwise append at `member_count + 1`
    pub fn resolve(
        routine_id: i64,
        exercise_id: i64,
        params: &CompositionParams,
        existing: Option<&RoutineExercise>,
        member_count: usize,
    ) -> DomainResult<Self> {
        validate_composition(params)?;

        let sequence = match (params.sequence, existing) {
            (Some(explicit), _) => to_u32("sequence", explicit)?,
            (None, Some(current)) => current.sequence,
            (None, None) => next_sequence(member_count),
        };

        let rest_seconds = match params.rest_seconds {
            Some(rest) => to_u32("rest_seconds", rest)?,
            None => DEFAULT_REST_SECONDS,
        };

        let now = Utc::now();
        Ok(Self {
            routine_id,
            exercise_id,
            sequence,
            target_sets: to_u32("target_sets", params.target_sets)?,
            target_reps: to_u32("target_reps", params.target_reps)?,
            rest_seconds,
            created_at: existing.map(|e| e.created_at).unwrap_or(now),
            updated_at: now,
        })
    }
}

fn to_u32(field: &str, value: i64) -> DomainResult<u32> {
    u32::try_from(value).map_err(|_| {
        DomainError::InvariantViolation(format!("{} is out of range: {}", field, value))
    })
}

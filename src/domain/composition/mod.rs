//! Routine composition: the ordered Routine <-> Exercise relation and the
//! training parameters attached to each member.

pub mod entity;
pub mod invariants;

pub use entity::{CompositionEntry, CompositionParams, RoutineExercise, DEFAULT_REST_SECONDS};
pub use invariants::{next_sequence, validate_composition};

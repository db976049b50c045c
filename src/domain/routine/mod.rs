pub mod entity;
pub mod invariants;

pub use entity::Routine;
pub use invariants::validate_routine;

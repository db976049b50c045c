pub mod entity;
pub mod invariants;

pub use entity::Exercise;
pub use invariants::validate_exercise;

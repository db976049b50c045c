pub mod entity;
pub mod invariants;

pub use entity::Category;
pub use invariants::validate_category;

// src/repositories/mod.rs
//
// Repository layer
//
// CRITICAL RULES:
// - Repositories are DUMB data mappers
// - NO event emission
// - Explicit SQL only
// - Read-then-write sequences run in ONE transaction
//   (composition attach, routine creation)

pub mod category_repository;
pub mod composition_repository;
pub mod enrollment_repository;
pub mod exercise_repository;
pub mod routine_repository;
pub mod user_repository;

pub use category_repository::{CategoryRepository, SqliteCategoryRepository};
pub use composition_repository::{CompositionRepository, SqliteCompositionRepository};
pub use enrollment_repository::{EnrollmentRepository, SqliteEnrollmentRepository};
pub use exercise_repository::{ExerciseRepository, SqliteExerciseRepository};
pub use routine_repository::{RoutineRepository, SqliteRoutineRepository};
pub use user_repository::{SqliteUserRepository, UserRepository};

#[cfg(test)]
pub use category_repository::MockCategoryRepository;
#[cfg(test)]
pub use composition_repository::MockCompositionRepository;
#[cfg(test)]
pub use enrollment_repository::MockEnrollmentRepository;
#[cfg(test)]
pub use exercise_repository::MockExerciseRepository;
#[cfg(test)]
pub use routine_repository::MockRoutineRepository;
#[cfg(test)]
pub use user_repository::MockUserRepository;

use chrono::{DateTime, Utc};
use rusqlite::types::Type;
use rusqlite::Row;

/// Read an RFC 3339 text column as a UTC timestamp.
pub(crate) fn timestamp_column(row: &Row, column: &str) -> rusqlite::Result<DateTime<Utc>> {
    let raw: String = row.get(column)?;
    DateTime::parse_from_rfc3339(&raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(0, Type::Text, Box::new(e)))
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use crate::config::AppConfig;
    use crate::db::{create_connection_pool, get_connection, initialize_database, ConnectionPool};

    /// File-backed pool in a temp dir; in-memory SQLite would give every
    /// pooled connection its own empty database.
    pub fn test_pool() -> (tempfile::TempDir, Arc<ConnectionPool>) {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig {
            database_path: dir.path().join("routinehub.db"),
            pool_max_size: 4,
            busy_timeout_ms: 1000,
        };
        let pool = create_connection_pool(&config).unwrap();
        initialize_database(&get_connection(&pool).unwrap()).unwrap();
        (dir, Arc::new(pool))
    }
}

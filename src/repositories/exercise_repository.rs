// src/repositories/exercise_repository.rs

use std::sync::Arc;

use rusqlite::{params, Row};

use crate::db::ConnectionPool;
use crate::domain::Exercise;
use crate::error::{AppError, AppResult};
use crate::repositories::timestamp_column;

#[cfg_attr(test, mockall::automock)]
pub trait ExerciseRepository: Send + Sync {
    fn insert(&self, exercise: &Exercise) -> AppResult<i64>;
    fn update(&self, exercise: &Exercise) -> AppResult<()>;
    fn get_by_id(&self, id: i64) -> AppResult<Option<Exercise>>;
    fn list_all(&self) -> AppResult<Vec<Exercise>>;
    fn list_by_category(&self, category_id: i64) -> AppResult<Vec<Exercise>>;
    fn count_by_category(&self, category_id: i64) -> AppResult<usize>;
    fn exists(&self, id: i64) -> AppResult<bool>;
    /// Also drops the exercise from every routine it belongs to
    fn delete(&self, id: i64) -> AppResult<bool>;
}

pub struct SqliteExerciseRepository {
    pool: Arc<ConnectionPool>,
}

impl SqliteExerciseRepository {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }

    /// Shared with join queries that select the exercise columns unaliased.
    pub(crate) fn row_to_exercise(row: &Row) -> Result<Exercise, rusqlite::Error> {
        Ok(Exercise {
            id: row.get("id")?,
            name: row.get("name")?,
            instruction: row.get("instruction")?,
            category_id: row.get("category_id")?,
            created_at: timestamp_column(row, "created_at")?,
            updated_at: timestamp_column(row, "updated_at")?,
        })
    }
}

impl ExerciseRepository for SqliteExerciseRepository {
    fn insert(&self, exercise: &Exercise) -> AppResult<i64> {
        let conn = self.pool.get()?;

        conn.execute(
            "INSERT INTO exercises (category_id, name, instruction, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                exercise.category_id,
                exercise.name,
                exercise.instruction,
                exercise.created_at.to_rfc3339(),
                exercise.updated_at.to_rfc3339(),
            ],
        )?;

        Ok(conn.last_insert_rowid())
    }

    fn update(&self, exercise: &Exercise) -> AppResult<()> {
        let conn = self.pool.get()?;

        conn.execute(
            "UPDATE exercises SET
                category_id = ?2,
                name = ?3,
                instruction = ?4,
                updated_at = ?5
             WHERE id = ?1",
            params![
                exercise.id,
                exercise.category_id,
                exercise.name,
                exercise.instruction,
                exercise.updated_at.to_rfc3339(),
            ],
        )?;

        Ok(())
    }

    fn get_by_id(&self, id: i64) -> AppResult<Option<Exercise>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare("SELECT * FROM exercises WHERE id = ?1")?;

        match stmt.query_row(params![id], Self::row_to_exercise) {
            Ok(exercise) => Ok(Some(exercise)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(AppError::Database(e)),
        }
    }

    fn list_all(&self) -> AppResult<Vec<Exercise>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare("SELECT * FROM exercises ORDER BY id")?;

        let exercises = stmt
            .query_map([], Self::row_to_exercise)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(exercises)
    }

    fn list_by_category(&self, category_id: i64) -> AppResult<Vec<Exercise>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare("SELECT * FROM exercises WHERE category_id = ?1 ORDER BY id")?;

        let exercises = stmt
            .query_map(params![category_id], Self::row_to_exercise)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(exercises)
    }

    fn count_by_category(&self, category_id: i64) -> AppResult<usize> {
        let conn = self.pool.get()?;

        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM exercises WHERE category_id = ?1",
            params![category_id],
            |row| row.get(0),
        )?;

        Ok(count as usize)
    }

    fn exists(&self, id: i64) -> AppResult<bool> {
        let conn = self.pool.get()?;

        let exists: bool = conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM exercises WHERE id = ?1)",
            params![id],
            |row| row.get(0),
        )?;

        Ok(exists)
    }

    fn delete(&self, id: i64) -> AppResult<bool> {
        let conn = self.pool.get()?;
        // exercise_routine rows go with it (ON DELETE CASCADE)
        let deleted = conn.execute("DELETE FROM exercises WHERE id = ?1", params![id])?;
        Ok(deleted > 0)
    }
}

// src/repositories/routine_repository.rs

use std::sync::Arc;

use rusqlite::{params, Row};

use crate::db::{with_transaction, ConnectionPool};
use crate::domain::{CompositionEntry, Enrollment, Routine};
use crate::error::{AppError, AppResult};
use crate::repositories::composition_repository::attach_on;
use crate::repositories::enrollment_repository::enroll_on;
use crate::repositories::timestamp_column;

#[cfg_attr(test, mockall::automock)]
pub trait RoutineRepository: Send + Sync {
    /// Insert a routine together with its initial composition and, when
    /// `enroll_user` is set, that user's enrollment. All or nothing.
    fn create(
        &self,
        routine: &Routine,
        entries: &[CompositionEntry],
        enroll_user: Option<i64>,
    ) -> AppResult<i64>;

    fn update(&self, routine: &Routine) -> AppResult<()>;
    fn get_by_id(&self, id: i64) -> AppResult<Option<Routine>>;
    fn list_all(&self) -> AppResult<Vec<Routine>>;

    /// Routines the user is enrolled in, in enrollment order
    fn list_for_user(&self, user_id: i64) -> AppResult<Vec<Routine>>;

    fn exists(&self, id: i64) -> AppResult<bool>;

    /// Composition and enrollment rows go with the routine
    fn delete(&self, id: i64) -> AppResult<bool>;
}

pub struct SqliteRoutineRepository {
    pool: Arc<ConnectionPool>,
}

impl SqliteRoutineRepository {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }

    fn row_to_routine(row: &Row) -> Result<Routine, rusqlite::Error> {
        Ok(Routine {
            id: row.get("id")?,
            name: row.get("name")?,
            description: row.get("description")?,
            created_at: timestamp_column(row, "created_at")?,
            updated_at: timestamp_column(row, "updated_at")?,
        })
    }
}

impl RoutineRepository for SqliteRoutineRepository {
    fn create(
        &self,
        routine: &Routine,
        entries: &[CompositionEntry],
        enroll_user: Option<i64>,
    ) -> AppResult<i64> {
        let mut conn = self.pool.get()?;

        with_transaction(&mut conn, |tx| {
            tx.execute(
                "INSERT INTO routines (name, description, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4)",
                params![
                    routine.name,
                    routine.description,
                    routine.created_at.to_rfc3339(),
                    routine.updated_at.to_rfc3339(),
                ],
            )?;
            let routine_id = tx.last_insert_rowid();

            for entry in entries {
                attach_on(tx, routine_id, entry.exercise_id, &entry.params)?;
            }

            if let Some(user_id) = enroll_user {
                enroll_on(tx, &Enrollment::new(user_id, routine_id))?;
            }

            Ok(routine_id)
        })
    }

    fn update(&self, routine: &Routine) -> AppResult<()> {
        let conn = self.pool.get()?;

        conn.execute(
            "UPDATE routines SET name = ?2, description = ?3, updated_at = ?4 WHERE id = ?1",
            params![
                routine.id,
                routine.name,
                routine.description,
                routine.updated_at.to_rfc3339(),
            ],
        )?;

        Ok(())
    }

    fn get_by_id(&self, id: i64) -> AppResult<Option<Routine>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare("SELECT * FROM routines WHERE id = ?1")?;

        match stmt.query_row(params![id], Self::row_to_routine) {
            Ok(routine) => Ok(Some(routine)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(AppError::Database(e)),
        }
    }

    fn list_all(&self) -> AppResult<Vec<Routine>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare("SELECT * FROM routines ORDER BY id")?;

        let routines = stmt
            .query_map([], Self::row_to_routine)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(routines)
    }

    fn list_for_user(&self, user_id: i64) -> AppResult<Vec<Routine>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(
            "SELECT r.id, r.name, r.description, r.created_at, r.updated_at
             FROM routine_user ru
             INNER JOIN routines r ON r.id = ru.routine_id
             WHERE ru.user_id = ?1
             ORDER BY ru.rowid ASC",
        )?;

        let routines = stmt
            .query_map(params![user_id], Self::row_to_routine)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(routines)
    }

    fn exists(&self, id: i64) -> AppResult<bool> {
        let conn = self.pool.get()?;

        let exists: bool = conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM routines WHERE id = ?1)",
            params![id],
            |row| row.get(0),
        )?;

        Ok(exists)
    }

    fn delete(&self, id: i64) -> AppResult<bool> {
        let conn = self.pool.get()?;
        let deleted = conn.execute("DELETE FROM routines WHERE id = ?1", params![id])?;
        Ok(deleted > 0)
    }
}

// src/repositories/composition_repository.rs
//
// Routine composition records (exercise_routine)
//
// attach is an upsert keyed by (routine_id, exercise_id). The existing
// record and member count it depends on are read inside the same
// IMMEDIATE transaction as the write, so two concurrent appends cannot
// both see the same count. The exercise is checked in that transaction too,
// so a concurrent delete surfaces as a dangling reference.

use std::sync::Arc;

use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::db::{with_transaction, ConnectionPool};
use crate::domain::{CompositionParams, DomainError, Exercise, RoutineExercise};
use crate::error::AppResult;
use crate::repositories::exercise_repository::SqliteExerciseRepository;
use crate::repositories::timestamp_column;

#[cfg_attr(test, mockall::automock)]
pub trait CompositionRepository: Send + Sync {
    /// Insert or update the record for (routine_id, exercise_id)
    fn attach(
        &self,
        routine_id: i64,
        exercise_id: i64,
        params: &CompositionParams,
    ) -> AppResult<RoutineExercise>;

    /// Returns false when the exercise was not part of the routine
    fn detach(&self, routine_id: i64, exercise_id: i64) -> AppResult<bool>;

    fn get(&self, routine_id: i64, exercise_id: i64) -> AppResult<Option<RoutineExercise>>;

    /// Ordered by sequence, then insertion order
    fn list_for_routine(&self, routine_id: i64) -> AppResult<Vec<RoutineExercise>>;

    /// Same ordering as `list_for_routine`, paired with the exercise itself
    fn list_with_exercises(&self, routine_id: i64) -> AppResult<Vec<(Exercise, RoutineExercise)>>;

    fn count_for_routine(&self, routine_id: i64) -> AppResult<usize>;
}

pub struct SqliteCompositionRepository {
    pool: Arc<ConnectionPool>,
}

impl SqliteCompositionRepository {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }

    fn row_to_record(row: &Row) -> Result<RoutineExercise, rusqlite::Error> {
        Ok(RoutineExercise {
            routine_id: row.get("routine_id")?,
            exercise_id: row.get("exercise_id")?,
            sequence: row.get("sequence")?,
            target_sets: row.get("target_sets")?,
            target_reps: row.get("target_reps")?,
            rest_seconds: row.get("rest_seconds")?,
            created_at: timestamp_column(row, "created_at")?,
            updated_at: timestamp_column(row, "updated_at")?,
        })
    }

    /// Join rows carry the exercise columns under their own names and the
    /// composition timestamps aliased.
    fn row_to_pair(row: &Row) -> Result<(Exercise, RoutineExercise), rusqlite::Error> {
        let exercise = SqliteExerciseRepository::row_to_exercise(row)?;
        let record = RoutineExercise {
            routine_id: row.get("routine_id")?,
            exercise_id: exercise.id,
            sequence: row.get("sequence")?,
            target_sets: row.get("target_sets")?,
            target_reps: row.get("target_reps")?,
            rest_seconds: row.get("rest_seconds")?,
            created_at: timestamp_column(row, "composed_at")?,
            updated_at: timestamp_column(row, "composition_updated_at")?,
        };
        Ok((exercise, record))
    }
}

fn get_on(
    conn: &Connection,
    routine_id: i64,
    exercise_id: i64,
) -> AppResult<Option<RoutineExercise>> {
    let record = conn
        .query_row(
            "SELECT * FROM exercise_routine WHERE routine_id = ?1 AND exercise_id = ?2",
            params![routine_id, exercise_id],
            SqliteCompositionRepository::row_to_record,
        )
        .optional()?;

    Ok(record)
}

fn count_on(conn: &Connection, routine_id: i64) -> AppResult<usize> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM exercise_routine WHERE routine_id = ?1",
        params![routine_id],
        |row| row.get(0),
    )?;

    Ok(count as usize)
}

/// Resolve and upsert one composition record on an open connection.
///
/// Callers must already hold a write transaction.
pub(crate) fn attach_on(
    conn: &Connection,
    routine_id: i64,
    exercise_id: i64,
    params: &CompositionParams,
) -> AppResult<RoutineExercise> {
    let existing = get_on(conn, routine_id, exercise_id)?;
    let member_count = count_on(conn, routine_id)?;

    let record =
        RoutineExercise::resolve(routine_id, exercise_id, params, existing.as_ref(), member_count)?;

    let exercise_exists: bool = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM exercises WHERE id = ?1)",
        params![exercise_id],
        |row| row.get(0),
    )?;
    if !exercise_exists {
        return Err(DomainError::DanglingReference {
            entity: "Exercise",
            id: exercise_id,
        }
        .into());
    }

    conn.execute(
        "INSERT INTO exercise_routine (
            routine_id, exercise_id, sequence, target_sets, target_reps,
            rest_seconds, created_at, updated_at
         ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
         ON CONFLICT(routine_id, exercise_id) DO UPDATE SET
            sequence = excluded.sequence,
            target_sets = excluded.target_sets,
            target_reps = excluded.target_reps,
            rest_seconds = excluded.rest_seconds,
            updated_at = excluded.updated_at",
        params![
            record.routine_id,
            record.exercise_id,
            record.sequence,
            record.target_sets,
            record.target_reps,
            record.rest_seconds,
            record.created_at.to_rfc3339(),
            record.updated_at.to_rfc3339(),
        ],
    )?;

    Ok(record)
}

impl CompositionRepository for SqliteCompositionRepository {
    fn attach(
        &self,
        routine_id: i64,
        exercise_id: i64,
        params: &CompositionParams,
    ) -> AppResult<RoutineExercise> {
        let mut conn = self.pool.get()?;
        with_transaction(&mut conn, |tx| attach_on(tx, routine_id, exercise_id, params))
    }

    fn detach(&self, routine_id: i64, exercise_id: i64) -> AppResult<bool> {
        let conn = self.pool.get()?;

        let deleted = conn.execute(
            "DELETE FROM exercise_routine WHERE routine_id = ?1 AND exercise_id = ?2",
            params![routine_id, exercise_id],
        )?;

        Ok(deleted > 0)
    }

    fn get(&self, routine_id: i64, exercise_id: i64) -> AppResult<Option<RoutineExercise>> {
        let conn = self.pool.get()?;
        get_on(&conn, routine_id, exercise_id)
    }

    fn list_for_routine(&self, routine_id: i64) -> AppResult<Vec<RoutineExercise>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(
            "SELECT * FROM exercise_routine
             WHERE routine_id = ?1
             ORDER BY sequence ASC, rowid ASC",
        )?;

        let records = stmt
            .query_map(params![routine_id], Self::row_to_record)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(records)
    }

    fn list_with_exercises(&self, routine_id: i64) -> AppResult<Vec<(Exercise, RoutineExercise)>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(
            "SELECT
                e.id, e.category_id, e.name, e.instruction, e.created_at, e.updated_at,
                er.routine_id, er.sequence, er.target_sets, er.target_reps, er.rest_seconds,
                er.created_at AS composed_at,
                er.updated_at AS composition_updated_at
             FROM exercise_routine er
             INNER JOIN exercises e ON e.id = er.exercise_id
             WHERE er.routine_id = ?1
             ORDER BY er.sequence ASC, er.rowid ASC",
        )?;

        let pairs = stmt
            .query_map(params![routine_id], Self::row_to_pair)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(pairs)
    }

    fn count_for_routine(&self, routine_id: i64) -> AppResult<usize> {
        let conn = self.pool.get()?;
        count_on(&conn, routine_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Category, Routine};
    use crate::repositories::test_support::test_pool;
    use crate::repositories::{
        CategoryRepository, ExerciseRepository, RoutineRepository, SqliteCategoryRepository,
        SqliteExerciseRepository, SqliteRoutineRepository,
    };

    struct Fixture {
        _dir: tempfile::TempDir,
        repo: SqliteCompositionRepository,
        routine_id: i64,
        exercises: Vec<i64>,
    }

    fn fixture() -> Fixture {
        let (dir, pool) = test_pool();
        let categories = SqliteCategoryRepository::new(pool.clone());
        let exercises = SqliteExerciseRepository::new(pool.clone());
        let routines = SqliteRoutineRepository::new(pool.clone());

        let chest = categories.insert(&Category::new("Chest".to_string())).unwrap();
        let ids = ["Bench Press", "Incline Press", "Fly"]
            .iter()
            .map(|name| {
                exercises
                    .insert(&Exercise::new(name.to_string(), None, chest))
                    .unwrap()
            })
            .collect();
        let routine_id = routines
            .create(&Routine::new("Push Day".to_string(), None), &[], None)
            .unwrap();

        Fixture {
            _dir: dir,
            repo: SqliteCompositionRepository::new(pool),
            routine_id,
            exercises: ids,
        }
    }

    #[test]
    fn test_attach_appends_in_order() {
        let f = fixture();

        for id in &f.exercises {
            f.repo
                .attach(f.routine_id, *id, &CompositionParams::new(3, 10))
                .unwrap();
        }

        let records = f.repo.list_for_routine(f.routine_id).unwrap();
        let sequences: Vec<u32> = records.iter().map(|r| r.sequence).collect();
        assert_eq!(sequences, vec![1, 2, 3]);
        assert!(records.iter().all(|r| r.rest_seconds == 60));
    }

    #[test]
    fn test_reattach_updates_in_place() {
        let f = fixture();
        let bench = f.exercises[0];

        f.repo
            .attach(f.routine_id, bench, &CompositionParams::new(3, 10))
            .unwrap();
        f.repo
            .attach(f.routine_id, f.exercises[1], &CompositionParams::new(3, 10))
            .unwrap();
        let updated = f
            .repo
            .attach(
                f.routine_id,
                bench,
                &CompositionParams::new(5, 5).with_rest_seconds(120),
            )
            .unwrap();

        assert_eq!(updated.sequence, 1);
        assert_eq!(f.repo.count_for_routine(f.routine_id).unwrap(), 2);

        let stored = f.repo.get(f.routine_id, bench).unwrap().unwrap();
        assert_eq!(stored.target_sets, 5);
        assert_eq!(stored.target_reps, 5);
        assert_eq!(stored.rest_seconds, 120);
    }

    #[test]
    fn test_duplicate_sequences_keep_insertion_order() {
        let f = fixture();

        f.repo
            .attach(f.routine_id, f.exercises[2], &CompositionParams::new(3, 12).with_sequence(1))
            .unwrap();
        f.repo
            .attach(f.routine_id, f.exercises[0], &CompositionParams::new(3, 8).with_sequence(1))
            .unwrap();

        let pairs = f.repo.list_with_exercises(f.routine_id).unwrap();
        let names: Vec<&str> = pairs.iter().map(|(e, _)| e.name.as_str()).collect();
        assert_eq!(names, vec!["Fly", "Bench Press"]);
        assert_eq!(pairs[1].1.target_reps, 8);
    }

    #[test]
    fn test_detach_leaves_gaps() {
        let f = fixture();

        for id in &f.exercises {
            f.repo
                .attach(f.routine_id, *id, &CompositionParams::new(3, 10))
                .unwrap();
        }

        assert!(f.repo.detach(f.routine_id, f.exercises[1]).unwrap());
        assert!(!f.repo.detach(f.routine_id, f.exercises[1]).unwrap());

        let sequences: Vec<u32> = f
            .repo
            .list_for_routine(f.routine_id)
            .unwrap()
            .iter()
            .map(|r| r.sequence)
            .collect();
        assert_eq!(sequences, vec![1, 3]);
    }

    #[test]
    fn test_attach_deleted_exercise_is_dangling_reference() {
        let f = fixture();
        // removed after any service-level check would have passed
        let exercises = SqliteExerciseRepository::new(f.repo.pool.clone());
        assert!(exercises.delete(f.exercises[0]).unwrap());

        let err = f
            .repo
            .attach(f.routine_id, f.exercises[0], &CompositionParams::new(3, 10))
            .unwrap_err();

        assert!(err.is_validation());
        assert!(err.to_string().contains("Exercise"));
        assert_eq!(f.repo.count_for_routine(f.routine_id).unwrap(), 0);
    }

    #[test]
    fn test_invalid_params_write_nothing() {
        let f = fixture();

        let result = f
            .repo
            .attach(f.routine_id, f.exercises[0], &CompositionParams::new(0, 10));

        assert!(result.unwrap_err().is_validation());
        assert_eq!(f.repo.count_for_routine(f.routine_id).unwrap(), 0);
    }
}

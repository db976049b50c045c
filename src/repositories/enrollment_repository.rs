// src/repositories/enrollment_repository.rs
//
// Enrollment records (routine_user)

use std::sync::Arc;

use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::db::ConnectionPool;
use crate::domain::{Enrollment, User};
use crate::error::AppResult;
use crate::repositories::timestamp_column;
use crate::repositories::user_repository::SqliteUserRepository;

#[cfg_attr(test, mockall::automock)]
pub trait EnrollmentRepository: Send + Sync {
    /// Returns false when the user was already enrolled; the existing
    /// record is left untouched.
    fn enroll(&self, user_id: i64, routine_id: i64) -> AppResult<bool>;

    /// Returns false when there was nothing to remove
    fn unenroll(&self, user_id: i64, routine_id: i64) -> AppResult<bool>;

    fn get(&self, user_id: i64, routine_id: i64) -> AppResult<Option<Enrollment>>;

    fn is_enrolled(&self, user_id: i64, routine_id: i64) -> AppResult<bool>;

    /// Subscribers in enrollment order
    fn list_users_for_routine(&self, routine_id: i64) -> AppResult<Vec<User>>;

    fn count_for_routine(&self, routine_id: i64) -> AppResult<usize>;
}

pub struct SqliteEnrollmentRepository {
    pool: Arc<ConnectionPool>,
}

impl SqliteEnrollmentRepository {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }

    fn row_to_enrollment(row: &Row) -> Result<Enrollment, rusqlite::Error> {
        Ok(Enrollment {
            user_id: row.get("user_id")?,
            routine_id: row.get("routine_id")?,
            created_at: timestamp_column(row, "created_at")?,
        })
    }
}

/// Insert one enrollment on an open connection.
///
/// A single statement: the duplicate check and the insert cannot be split
/// by another writer.
pub(crate) fn enroll_on(conn: &Connection, enrollment: &Enrollment) -> AppResult<bool> {
    let inserted = conn.execute(
        "INSERT INTO routine_user (user_id, routine_id, created_at)
         VALUES (?1, ?2, ?3)
         ON CONFLICT(user_id, routine_id) DO NOTHING",
        params![
            enrollment.user_id,
            enrollment.routine_id,
            enrollment.created_at.to_rfc3339(),
        ],
    )?;

    Ok(inserted > 0)
}

impl EnrollmentRepository for SqliteEnrollmentRepository {
    fn enroll(&self, user_id: i64, routine_id: i64) -> AppResult<bool> {
        let conn = self.pool.get()?;
        enroll_on(&conn, &Enrollment::new(user_id, routine_id))
    }

    fn unenroll(&self, user_id: i64, routine_id: i64) -> AppResult<bool> {
        let conn = self.pool.get()?;

        let deleted = conn.execute(
            "DELETE FROM routine_user WHERE user_id = ?1 AND routine_id = ?2",
            params![user_id, routine_id],
        )?;

        Ok(deleted > 0)
    }

    fn get(&self, user_id: i64, routine_id: i64) -> AppResult<Option<Enrollment>> {
        let conn = self.pool.get()?;

        let enrollment = conn
            .query_row(
                "SELECT * FROM routine_user WHERE user_id = ?1 AND routine_id = ?2",
                params![user_id, routine_id],
                Self::row_to_enrollment,
            )
            .optional()?;

        Ok(enrollment)
    }

    fn is_enrolled(&self, user_id: i64, routine_id: i64) -> AppResult<bool> {
        let conn = self.pool.get()?;

        let enrolled: bool = conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM routine_user WHERE user_id = ?1 AND routine_id = ?2)",
            params![user_id, routine_id],
            |row| row.get(0),
        )?;

        Ok(enrolled)
    }

    fn list_users_for_routine(&self, routine_id: i64) -> AppResult<Vec<User>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(
            "SELECT u.id, u.name, u.email, u.created_at
             FROM routine_user ru
             INNER JOIN users u ON u.id = ru.user_id
             WHERE ru.routine_id = ?1
             ORDER BY ru.rowid ASC",
        )?;

        let users = stmt
            .query_map(params![routine_id], SqliteUserRepository::row_to_user)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(users)
    }

    fn count_for_routine(&self, routine_id: i64) -> AppResult<usize> {
        let conn = self.pool.get()?;

        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM routine_user WHERE routine_id = ?1",
            params![routine_id],
            |row| row.get(0),
        )?;

        Ok(count as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Routine;
    use crate::repositories::test_support::test_pool;
    use crate::repositories::{
        RoutineRepository, SqliteRoutineRepository, SqliteUserRepository, UserRepository,
    };

    #[test]
    fn test_enroll_is_rejected_the_second_time() {
        let (_dir, pool) = test_pool();
        let users = SqliteUserRepository::new(pool.clone());
        let routines = SqliteRoutineRepository::new(pool.clone());
        let repo = SqliteEnrollmentRepository::new(pool);

        let ana = users
            .insert(&User::new("Ana".to_string(), "ana@example.com".to_string()))
            .unwrap();
        let routine = routines
            .create(&Routine::new("Leg Day".to_string(), None), &[], None)
            .unwrap();

        assert!(repo.enroll(ana, routine).unwrap());
        let first = repo.get(ana, routine).unwrap().unwrap();

        assert!(!repo.enroll(ana, routine).unwrap());
        assert_eq!(repo.count_for_routine(routine).unwrap(), 1);
        assert_eq!(repo.get(ana, routine).unwrap().unwrap(), first);
    }

    #[test]
    fn test_unenroll() {
        let (_dir, pool) = test_pool();
        let users = SqliteUserRepository::new(pool.clone());
        let routines = SqliteRoutineRepository::new(pool.clone());
        let repo = SqliteEnrollmentRepository::new(pool);

        let ana = users
            .insert(&User::new("Ana".to_string(), "ana@example.com".to_string()))
            .unwrap();
        let bo = users
            .insert(&User::new("Bo".to_string(), "bo@example.com".to_string()))
            .unwrap();
        let routine = routines
            .create(&Routine::new("Leg Day".to_string(), None), &[], None)
            .unwrap();

        repo.enroll(ana, routine).unwrap();
        repo.enroll(bo, routine).unwrap();

        assert!(repo.unenroll(ana, routine).unwrap());
        assert!(!repo.unenroll(ana, routine).unwrap());
        assert!(!repo.is_enrolled(ana, routine).unwrap());

        let remaining = repo.list_users_for_routine(routine).unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].email, "bo@example.com");
    }
}

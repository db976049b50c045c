// src/repositories/user_repository.rs

use std::sync::Arc;

use rusqlite::{params, OptionalExtension, Row};

use crate::db::ConnectionPool;
use crate::domain::User;
use crate::error::{AppError, AppResult};
use crate::repositories::timestamp_column;

#[cfg_attr(test, mockall::automock)]
pub trait UserRepository: Send + Sync {
    fn insert(&self, user: &User) -> AppResult<i64>;
    fn get_by_id(&self, id: i64) -> AppResult<Option<User>>;
    fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;
    fn list_all(&self) -> AppResult<Vec<User>>;
    fn exists(&self, id: i64) -> AppResult<bool>;
}

pub struct SqliteUserRepository {
    pool: Arc<ConnectionPool>,
}

impl SqliteUserRepository {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }

    pub(crate) fn row_to_user(row: &Row) -> Result<User, rusqlite::Error> {
        Ok(User {
            id: row.get("id")?,
            name: row.get("name")?,
            email: row.get("email")?,
            created_at: timestamp_column(row, "created_at")?,
        })
    }
}

impl UserRepository for SqliteUserRepository {
    fn insert(&self, user: &User) -> AppResult<i64> {
        let conn = self.pool.get()?;

        conn.execute(
            "INSERT INTO users (name, email, created_at) VALUES (?1, ?2, ?3)",
            params![user.name, user.email, user.created_at.to_rfc3339()],
        )?;

        Ok(conn.last_insert_rowid())
    }

    fn get_by_id(&self, id: i64) -> AppResult<Option<User>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare("SELECT * FROM users WHERE id = ?1")?;

        match stmt.query_row(params![id], Self::row_to_user) {
            Ok(user) => Ok(Some(user)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(AppError::Database(e)),
        }
    }

    fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let conn = self.pool.get()?;

        let user = conn
            .query_row(
                "SELECT * FROM users WHERE email = ?1",
                params![email],
                Self::row_to_user,
            )
            .optional()?;

        Ok(user)
    }

    fn list_all(&self) -> AppResult<Vec<User>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare("SELECT * FROM users ORDER BY id")?;

        let users = stmt
            .query_map([], Self::row_to_user)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(users)
    }

    fn exists(&self, id: i64) -> AppResult<bool> {
        let conn = self.pool.get()?;

        let exists: bool = conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM users WHERE id = ?1)",
            params![id],
            |row| row.get(0),
        )?;

        Ok(exists)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::test_support::test_pool;

    #[test]
    fn test_insert_and_lookup_by_email() {
        let (_dir, pool) = test_pool();
        let repo = SqliteUserRepository::new(pool);

        let id = repo
            .insert(&User::new("Ana".to_string(), "Ana@Example.com".to_string()))
            .unwrap();

        let found = repo.find_by_email("ana@example.com").unwrap().unwrap();
        assert_eq!(found.id, id);
        assert!(repo.exists(id).unwrap());
        assert!(!repo.exists(id + 1).unwrap());
    }

    #[test]
    fn test_email_is_unique() {
        let (_dir, pool) = test_pool();
        let repo = SqliteUserRepository::new(pool);

        repo.insert(&User::new("Ana".to_string(), "ana@example.com".to_string()))
            .unwrap();
        let err = repo
            .insert(&User::new("Ana B".to_string(), "ana@example.com".to_string()))
            .unwrap_err();

        assert!(err.is_unique_violation());
    }
}

// src/repositories/category_repository.rs

use std::sync::Arc;

use rusqlite::{params, OptionalExtension, Row};

use crate::db::ConnectionPool;
use crate::domain::Category;
use crate::error::{AppError, AppResult};
use crate::repositories::timestamp_column;

#[cfg_attr(test, mockall::automock)]
pub trait CategoryRepository: Send + Sync {
    /// Insert a new category and return its assigned id
    fn insert(&self, category: &Category) -> AppResult<i64>;
    fn update(&self, category: &Category) -> AppResult<()>;
    fn get_by_id(&self, id: i64) -> AppResult<Option<Category>>;
    fn find_by_name(&self, name: &str) -> AppResult<Option<Category>>;
    fn list_all(&self) -> AppResult<Vec<Category>>;
    fn exists(&self, id: i64) -> AppResult<bool>;
    /// Returns false when no row was deleted
    fn delete(&self, id: i64) -> AppResult<bool>;
}

pub struct SqliteCategoryRepository {
    pool: Arc<ConnectionPool>,
}

impl SqliteCategoryRepository {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }

    pub(crate) fn row_to_category(row: &Row) -> Result<Category, rusqlite::Error> {
        Ok(Category {
            id: row.get("id")?,
            name: row.get("name")?,
            created_at: timestamp_column(row, "created_at")?,
            updated_at: timestamp_column(row, "updated_at")?,
        })
    }
}

impl CategoryRepository for SqliteCategoryRepository {
    fn insert(&self, category: &Category) -> AppResult<i64> {
        let conn = self.pool.get()?;

        conn.execute(
            "INSERT INTO categories (name, created_at, updated_at) VALUES (?1, ?2, ?3)",
            params![
                category.name,
                category.created_at.to_rfc3339(),
                category.updated_at.to_rfc3339(),
            ],
        )?;

        Ok(conn.last_insert_rowid())
    }

    fn update(&self, category: &Category) -> AppResult<()> {
        let conn = self.pool.get()?;

        conn.execute(
            "UPDATE categories SET name = ?2, updated_at = ?3 WHERE id = ?1",
            params![category.id, category.name, category.updated_at.to_rfc3339()],
        )?;

        Ok(())
    }

    fn get_by_id(&self, id: i64) -> AppResult<Option<Category>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare("SELECT * FROM categories WHERE id = ?1")?;

        match stmt.query_row(params![id], Self::row_to_category) {
            Ok(category) => Ok(Some(category)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(AppError::Database(e)),
        }
    }

    fn find_by_name(&self, name: &str) -> AppResult<Option<Category>> {
        let conn = self.pool.get()?;

        let category = conn
            .query_row(
                "SELECT * FROM categories WHERE name = ?1",
                params![name],
                Self::row_to_category,
            )
            .optional()?;

        Ok(category)
    }

    fn list_all(&self) -> AppResult<Vec<Category>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare("SELECT * FROM categories ORDER BY id")?;

        let categories: Vec<Category> = stmt
            .query_map([], Self::row_to_category)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(categories)
    }

    fn exists(&self, id: i64) -> AppResult<bool> {
        let conn = self.pool.get()?;

        let exists: bool = conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM categories WHERE id = ?1)",
            params![id],
            |row| row.get(0),
        )?;

        Ok(exists)
    }

    fn delete(&self, id: i64) -> AppResult<bool> {
        let conn = self.pool.get()?;
        let deleted = conn.execute("DELETE FROM categories WHERE id = ?1", params![id])?;
        Ok(deleted > 0)
    }
}

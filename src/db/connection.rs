// src/db/connection.rs
//
// Database connection management
//
// PRINCIPLES:
// - Explicit connection pooling
// - No hidden connection creation
// - Clear error propagation
// - Thread-safe access

use log::debug;
use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::{Connection, Transaction, TransactionBehavior};

use crate::config::AppConfig;
use crate::error::{AppError, AppResult};

/// Type alias for connection pool
pub type ConnectionPool = Pool<SqliteConnectionManager>;

/// Type alias for a pooled connection
pub type PooledConn = PooledConnection<SqliteConnectionManager>;

/// Create a connection pool for the configured database file
///
/// Every connection:
/// - has foreign keys enabled (not default in SQLite)
/// - runs in WAL mode for concurrent readers
/// - waits `busy_timeout_ms` on a locked database instead of failing
pub fn create_connection_pool(config: &AppConfig) -> AppResult<ConnectionPool> {
    if let Some(parent) = config.database_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let busy_timeout_ms = config.busy_timeout_ms;
    let manager = SqliteConnectionManager::file(&config.database_path).with_init(move |conn| {
        conn.execute_batch(&format!(
            "PRAGMA foreign_keys = ON;
             PRAGMA journal_mode = WAL;
             PRAGMA synchronous = NORMAL;
             PRAGMA busy_timeout = {};",
            busy_timeout_ms
        ))?;
        Ok(())
    });

    let pool = Pool::builder()
        .max_size(config.pool_max_size)
        .build(manager)
        .map_err(|e| AppError::Other(format!("Failed to create connection pool: {}", e)))?;

    debug!(
        "Connection pool ready: {} (max {} connections)",
        config.database_path.display(),
        config.pool_max_size
    );

    Ok(pool)
}

/// Get a connection from the pool
///
/// This is a convenience wrapper that provides better error messages.
pub fn get_connection(pool: &ConnectionPool) -> AppResult<PooledConn> {
    pool.get()
        .map_err(|e| AppError::Pool(format!("Failed to get database connection: {}", e)))
}

/// Create a standalone connection (for testing)
///
/// This creates an in-memory database, useful for unit tests.
pub fn create_test_connection() -> AppResult<Connection> {
    let conn = Connection::open_in_memory().map_err(AppError::Database)?;

    conn.execute_batch("PRAGMA foreign_keys = ON;")
        .map_err(AppError::Database)?;

    Ok(conn)
}

/// Run `f` inside an IMMEDIATE transaction.
///
/// The write lock is taken at BEGIN, so a read-then-write inside `f`
/// cannot interleave with another writer. Commits on `Ok`, rolls back on
/// `Err`.
pub fn with_transaction<T, F>(conn: &mut Connection, f: F) -> AppResult<T>
where
    F: FnOnce(&Transaction<'_>) -> AppResult<T>,
{
    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
    match f(&tx) {
        Ok(value) => {
            tx.commit()?;
            Ok(value)
        }
        Err(e) => {
            tx.rollback()?;
            Err(e)
        }
    }
}

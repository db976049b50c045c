// src/config.rs
//
// Runtime configuration
//
// Sources, lowest to highest precedence:
// - built-in defaults (database under the user's data directory)
// - environment variables (a `.env` file is loaded by the binary)
// - explicit overrides from the caller (e.g. a CLI flag)

use std::path::PathBuf;

use crate::error::{AppError, AppResult};

pub const DATABASE_PATH_VAR: &str = "ROUTINEHUB_DATABASE_PATH";
pub const POOL_SIZE_VAR: &str = "ROUTINEHUB_POOL_SIZE";
pub const BUSY_TIMEOUT_VAR: &str = "ROUTINEHUB_BUSY_TIMEOUT_MS";

const DEFAULT_POOL_SIZE: u32 = 15;
const DEFAULT_BUSY_TIMEOUT_MS: u32 = 5000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// SQLite database file
    pub database_path: PathBuf,

    /// Maximum pooled connections
    pub pool_max_size: u32,

    /// How long a writer waits on a locked database before failing
    pub busy_timeout_ms: u32,
}

impl AppConfig {
    /// Defaults with no environment applied.
    /// Database path: {APP_DATA}/routinehub/routinehub.db
    pub fn defaults() -> AppResult<Self> {
        Ok(Self {
            database_path: default_database_path()?,
            pool_max_size: DEFAULT_POOL_SIZE,
            busy_timeout_ms: DEFAULT_BUSY_TIMEOUT_MS,
        })
    }

    /// Defaults overridden by the process environment
    pub fn from_env() -> AppResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each variable
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_path = match lookup(DATABASE_PATH_VAR) {
            Some(path) if !path.trim().is_empty() => PathBuf::from(path.trim()),
            _ => default_database_path()?,
        };

        let pool_max_size = parse_number(&lookup, POOL_SIZE_VAR, DEFAULT_POOL_SIZE)?;
        if pool_max_size == 0 {
            return Err(AppError::Config(format!("{} must be at least 1", POOL_SIZE_VAR)));
        }

        let busy_timeout_ms = parse_number(&lookup, BUSY_TIMEOUT_VAR, DEFAULT_BUSY_TIMEOUT_MS)?;

        Ok(Self {
            database_path,
            pool_max_size,
            busy_timeout_ms,
        })
    }

    pub fn with_database_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.database_path = path.into();
        self
    }
}

fn parse_number<F>(lookup: &F, key: &str, default: u32) -> AppResult<u32>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<u32>()
            .map_err(|e| AppError::Config(format!("{}={:?}: {}", key, raw, e))),
        None => Ok(default),
    }
}

fn default_database_path() -> AppResult<PathBuf> {
    let app_data_dir = dirs::data_dir()
        .ok_or_else(|| AppError::Config("Could not determine app data directory".to_string()))?;

    Ok(app_data_dir.join("routinehub").join("routinehub.db"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_environment_overrides_defaults() {
        let config = AppConfig::from_lookup(lookup_from(&[
            (DATABASE_PATH_VAR, "/tmp/routines.db"),
            (POOL_SIZE_VAR, "4"),
            (BUSY_TIMEOUT_VAR, "250"),
        ]))
        .unwrap();

        assert_eq!(config.database_path, PathBuf::from("/tmp/routines.db"));
        assert_eq!(config.pool_max_size, 4);
        assert_eq!(config.busy_timeout_ms, 250);
    }

    #[test]
    fn test_invalid_pool_size_is_a_config_error() {
        let err = AppConfig::from_lookup(lookup_from(&[
            (DATABASE_PATH_VAR, "/tmp/routines.db"),
            (POOL_SIZE_VAR, "lots"),
        ]))
        .unwrap_err();
        assert!(matches!(err, AppError::Config(_)));

        let err = AppConfig::from_lookup(lookup_from(&[
            (DATABASE_PATH_VAR, "/tmp/routines.db"),
            (POOL_SIZE_VAR, "0"),
        ]))
        .unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn test_explicit_path_override() {
        let config = AppConfig::from_lookup(lookup_from(&[(DATABASE_PATH_VAR, "/tmp/a.db")]))
            .unwrap()
            .with_database_path("/tmp/b.db");
        assert_eq!(config.database_path, PathBuf::from("/tmp/b.db"));
        assert_eq!(config.pool_max_size, DEFAULT_POOL_SIZE);
    }
}

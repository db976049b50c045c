// src/application/state.rs

use std::sync::Arc;

use log::info;

use crate::config::AppConfig;
use crate::db::{create_connection_pool, get_connection, initialize_database, ConnectionPool};
use crate::error::AppResult;
use crate::events::EventBus;
use crate::repositories::{
    SqliteCategoryRepository, SqliteCompositionRepository, SqliteEnrollmentRepository,
    SqliteExerciseRepository, SqliteRoutineRepository, SqliteUserRepository,
};
use crate::services::{
    CatalogService, CompositionService, EnrollmentService, QueryService, RoutineService,
    UserService,
};

/// Application state shared by every command.
/// All fields are Arc-wrapped for thread-safe sharing.
pub struct AppState {
    pub pool: Arc<ConnectionPool>,
    pub event_bus: Arc<EventBus>,
    pub catalog_service: Arc<CatalogService>,
    pub routine_service: Arc<RoutineService>,
    pub composition_service: Arc<CompositionService>,
    pub enrollment_service: Arc<EnrollmentService>,
    pub query_service: Arc<QueryService>,
    pub user_service: Arc<UserService>,
}

impl AppState {
    /// Open the configured database, apply the schema, wire the services.
    pub fn initialize(config: &AppConfig) -> AppResult<Self> {
        info!("Opening database at {}", config.database_path.display());

        let pool = create_connection_pool(config)?;
        {
            let conn = get_connection(&pool)?;
            initialize_database(&conn)?;
        }

        Ok(Self::build(Arc::new(pool)))
    }

    /// Wire repositories and services over an initialized pool
    pub fn build(pool: Arc<ConnectionPool>) -> Self {
        let event_bus = Arc::new(EventBus::new());

        let category_repo = Arc::new(SqliteCategoryRepository::new(pool.clone()));
        let exercise_repo = Arc::new(SqliteExerciseRepository::new(pool.clone()));
        let routine_repo = Arc::new(SqliteRoutineRepository::new(pool.clone()));
        let composition_repo = Arc::new(SqliteCompositionRepository::new(pool.clone()));
        let enrollment_repo = Arc::new(SqliteEnrollmentRepository::new(pool.clone()));
        let user_repo = Arc::new(SqliteUserRepository::new(pool.clone()));

        let query_service = Arc::new(QueryService::new(
            category_repo.clone(),
            exercise_repo.clone(),
            routine_repo.clone(),
            composition_repo.clone(),
            enrollment_repo.clone(),
        ));

        let catalog_service = Arc::new(CatalogService::new(
            category_repo,
            exercise_repo.clone(),
            event_bus.clone(),
        ));

        let routine_service = Arc::new(RoutineService::new(
            routine_repo.clone(),
            exercise_repo.clone(),
            user_repo.clone(),
            query_service.clone(),
            event_bus.clone(),
        ));

        let composition_service = Arc::new(CompositionService::new(
            routine_repo.clone(),
            exercise_repo,
            composition_repo,
            query_service.clone(),
            event_bus.clone(),
        ));

        let enrollment_service = Arc::new(EnrollmentService::new(
            routine_repo,
            user_repo.clone(),
            enrollment_repo,
            query_service.clone(),
            event_bus.clone(),
        ));

        let user_service = Arc::new(UserService::new(user_repo, event_bus.clone()));

        Self {
            pool,
            event_bus,
            catalog_service,
            routine_service,
            composition_service,
            enrollment_service,
            query_service,
            user_service,
        }
    }
}

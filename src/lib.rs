// src/lib.rs
// RoutineHub - workout routine catalog and subscription backend
//
// Architecture:
// - Domain-centric: entities and invariants live in `domain`
// - Repositories: dumb SQLite mappers, transactional where a write depends on a read
// - Services: validate -> persist -> emit events
// - Application layer: DTOs in, views out, ErrorResponse on failure
// - Explicit identity: callers pass CurrentUser, no session state

// ============================================================================
// FOUNDATION
// ============================================================================

pub mod config;
pub mod db;
pub mod domain;
pub mod error;
pub mod events;
pub mod logging;
pub mod repositories;
pub mod services;

// ============================================================================
// APPLICATION LAYER
// ============================================================================

pub mod application;

// ============================================================================
// PUBLIC API - Domain Entities
// ============================================================================

pub use domain::{
    next_sequence,
    validate_category,
    validate_composition,
    validate_exercise,
    validate_routine,
    validate_user,
    // Catalog
    Category,
    // Composition
    CompositionEntry,
    CompositionParams,
    // Identity
    CurrentUser,
    DomainError,
    Enrollment,
    Exercise,
    Routine,
    RoutineExercise,
    User,
    DEFAULT_REST_SECONDS,
};

// ============================================================================
// PUBLIC API - Errors and Configuration
// ============================================================================

pub use config::AppConfig;
pub use error::{AppError, AppResult};

// ============================================================================
// PUBLIC API - Events
// ============================================================================

pub use events::{create_event_bus, DomainEvent, EventBus, EventLogEntry};

// ============================================================================
// PUBLIC API - Database
// ============================================================================

pub use db::{create_connection_pool, initialize_database, with_transaction, ConnectionPool};

// ============================================================================
// PUBLIC API - Repositories
// ============================================================================

pub use repositories::{
    CategoryRepository, CompositionRepository, EnrollmentRepository, ExerciseRepository,
    RoutineRepository, SqliteCategoryRepository, SqliteCompositionRepository,
    SqliteEnrollmentRepository, SqliteExerciseRepository, SqliteRoutineRepository,
    SqliteUserRepository, UserRepository,
};

// ============================================================================
// PUBLIC API - Services
// ============================================================================

pub use services::{
    seed_demo_catalog, CatalogService, CategoryView, ComposedExercise, CompositionService,
    EnrollmentService, ExerciseView, QueryService, RoutineService, RoutineView, SeedReport,
    UserService, UserView,
};

// ============================================================================
// PUBLIC API - Application
// ============================================================================

pub use application::{AppState, CommandResult, ErrorResponse, ErrorType};

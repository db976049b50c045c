// src/services/mod.rs
//
// Services Module - Orchestration Layer
//
// Services validate, call repositories, then emit events.
// Reads are composed by QueryService.

pub mod catalog_service;
pub mod composition_service;
pub mod demo_seed;
pub mod enrollment_service;
pub mod query_service;
pub mod query_types;
pub mod routine_service;
pub mod user_service;

pub use catalog_service::{
    CatalogService, CreateCategoryRequest, CreateExerciseRequest, UpdateCategoryRequest,
    UpdateExerciseRequest,
};

pub use composition_service::{AddExerciseRequest, CompositionService};

pub use enrollment_service::EnrollmentService;

pub use query_service::QueryService;

pub use query_types::{CategoryView, ComposedExercise, ExerciseView, RoutineView, UserView};

pub use routine_service::{CreateRoutineRequest, RoutineService, UpdateRoutineRequest};

pub use user_service::{RegisterUserRequest, UserService};

pub use demo_seed::{seed_demo_catalog, SeedReport};

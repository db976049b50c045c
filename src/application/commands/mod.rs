// src/application/commands/mod.rs
//
// Command Handlers
//
// ARCHITECTURE:
// - Commands are thin adapters between callers and services
// - Commands accept DTOs, return views or DTOs
// - Commands convert AppError into ErrorResponse
// - Commands NEVER contain business logic

pub mod category_commands;
pub mod exercise_commands;
pub mod maintenance_commands;
pub mod my_routine_commands;
pub mod routine_commands;
pub mod user_commands;

pub use category_commands::*;
pub use exercise_commands::*;
pub use maintenance_commands::*;
pub use my_routine_commands::*;
pub use routine_commands::*;
pub use user_commands::*;

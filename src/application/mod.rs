// src/application/mod.rs
//
// Application Layer
//
// ARCHITECTURE:
// - The boundary between callers (CLI, HTTP adapters) and services
// - Translates DTOs into service requests
// - Every command returns Result<T, ErrorResponse>

pub mod commands;
pub mod dto;
pub mod error_handling;
pub mod state;

pub use commands::*;
pub use dto::*;
pub use error_handling::{CommandResult, ErrorResponse, ErrorType};
pub use state::AppState;

// src/application/commands/maintenance_commands.rs
//
// Database housekeeping: demo data, statistics, integrity.

use crate::application::dto::AckDto;
use crate::application::error_handling::CommandResult;
use crate::application::state::AppState;
use crate::db::{get_connection, get_database_stats, verify_database_integrity, DatabaseStats};
use crate::services::{seed_demo_catalog, SeedReport};

pub fn seed_demo(state: &AppState) -> CommandResult<SeedReport> {
    Ok(seed_demo_catalog(
        &state.catalog_service,
        &state.user_service,
        &state.routine_service,
        &state.enrollment_service,
        &state.query_service,
    )?)
}

pub fn database_stats(state: &AppState) -> CommandResult<DatabaseStats> {
    let conn = get_connection(&state.pool)?;
    Ok(get_database_stats(&conn)?)
}

pub fn check_integrity(state: &AppState) -> CommandResult<AckDto> {
    let conn = get_connection(&state.pool)?;
    verify_database_integrity(&conn)?;
    Ok(AckDto::ok("Integrity check passed"))
}

// src/application/commands/my_routine_commands.rs
//
// Subscription commands. The identity comes from the caller's auth layer.

use crate::application::dto::AckDto;
use crate::application::error_handling::CommandResult;
use crate::application::state::AppState;
use crate::domain::CurrentUser;
use crate::services::RoutineView;

pub fn list_my_routines(state: &AppState, user: CurrentUser) -> CommandResult<Vec<RoutineView>> {
    Ok(state.query_service.list_my_routines(user)?)
}

pub fn subscribe(state: &AppState, user: CurrentUser, routine_id: i64) -> CommandResult<RoutineView> {
    Ok(state.enrollment_service.subscribe(user, routine_id)?)
}

pub fn unsubscribe(state: &AppState, user: CurrentUser, routine_id: i64) -> CommandResult<AckDto> {
    state.enrollment_service.unsubscribe(user, routine_id)?;
    Ok(AckDto::ok(format!("Unsubscribed from routine {}", routine_id)))
}

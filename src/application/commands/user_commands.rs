// src/application/commands/user_commands.rs

use crate::application::dto::{RegisterUserDto, UserDto};
use crate::application::error_handling::CommandResult;
use crate::application::state::AppState;
use crate::services::RegisterUserRequest;

pub fn register_user(state: &AppState, dto: RegisterUserDto) -> CommandResult<UserDto> {
    let user = state.user_service.register_user(RegisterUserRequest {
        name: dto.name,
        email: dto.email,
    })?;

    Ok(UserDto::from(user))
}

pub fn get_user(state: &AppState, user_id: i64) -> CommandResult<UserDto> {
    Ok(UserDto::from(state.user_service.get_user(user_id)?))
}

pub fn list_users(state: &AppState) -> CommandResult<Vec<UserDto>> {
    let users = state.user_service.list_users()?;
    Ok(users.into_iter().map(UserDto::from).collect())
}

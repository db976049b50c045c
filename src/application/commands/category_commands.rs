// src/application/commands/category_commands.rs
//
// Category Command Handlers
//
// RULES:
// - Accept DTOs
// - Call services
// - Return views
// - Never contain business logic

use crate::application::dto::{AckDto, CreateCategoryDto, UpdateCategoryDto};
use crate::application::error_handling::CommandResult;
use crate::application::state::AppState;
use crate::services::{CategoryView, CreateCategoryRequest, ExerciseView, UpdateCategoryRequest};

pub fn list_categories(state: &AppState) -> CommandResult<Vec<CategoryView>> {
    Ok(state.query_service.list_categories()?)
}

pub fn get_category(state: &AppState, category_id: i64) -> CommandResult<CategoryView> {
    Ok(state.query_service.get_category(category_id)?)
}

pub fn create_category(state: &AppState, dto: CreateCategoryDto) -> CommandResult<CategoryView> {
    let category = state
        .catalog_service
        .create_category(CreateCategoryRequest { name: dto.name })?;

    Ok(CategoryView::from(category))
}

pub fn update_category(
    state: &AppState,
    category_id: i64,
    dto: UpdateCategoryDto,
) -> CommandResult<CategoryView> {
    let category = state.catalog_service.update_category(UpdateCategoryRequest {
        category_id,
        name: dto.name,
    })?;

    Ok(CategoryView::from(category))
}

pub fn delete_category(state: &AppState, category_id: i64) -> CommandResult<AckDto> {
    state.catalog_service.delete_category(category_id)?;
    Ok(AckDto::ok(format!("Category {} deleted", category_id)))
}

pub fn list_category_exercises(
    state: &AppState,
    category_id: i64,
) -> CommandResult<Vec<ExerciseView>> {
    Ok(state.query_service.list_category_exercises(category_id)?)
}

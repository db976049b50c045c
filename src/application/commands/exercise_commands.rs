// src/application/commands/exercise_commands.rs

use crate::application::dto::{AckDto, CreateExerciseDto, UpdateExerciseDto};
use crate::application::error_handling::CommandResult;
use crate::application::state::AppState;
use crate::services::{CreateExerciseRequest, ExerciseView, UpdateExerciseRequest};

pub fn list_exercises(state: &AppState) -> CommandResult<Vec<ExerciseView>> {
    Ok(state.query_service.list_exercises()?)
}

pub fn get_exercise(state: &AppState, exercise_id: i64) -> CommandResult<ExerciseView> {
    Ok(state.query_service.get_exercise(exercise_id)?)
}

pub fn create_exercise(state: &AppState, dto: CreateExerciseDto) -> CommandResult<ExerciseView> {
    let exercise = state.catalog_service.create_exercise(CreateExerciseRequest {
        name: dto.name,
        instruction: dto.instruction,
        category_id: dto.category_id,
    })?;

    Ok(state.query_service.get_exercise(exercise.id)?)
}

pub fn update_exercise(
    state: &AppState,
    exercise_id: i64,
    dto: UpdateExerciseDto,
) -> CommandResult<ExerciseView> {
    let exercise = state.catalog_service.update_exercise(UpdateExerciseRequest {
        exercise_id,
        name: dto.name,
        instruction: dto.instruction,
        category_id: dto.category_id,
    })?;

    Ok(state.query_service.get_exercise(exercise.id)?)
}

pub fn delete_exercise(state: &AppState, exercise_id: i64) -> CommandResult<AckDto> {
    state.catalog_service.delete_exercise(exercise_id)?;
    Ok(AckDto::ok(format!("Exercise {} deleted", exercise_id)))
}

// src/application/commands/routine_commands.rs
//
// Routine and composition command handlers.
// Routine mutation is open to any authenticated caller.

use crate::application::dto::{
    AckDto, CreateRoutineDto, RoutineExerciseDto, UpdateRoutineDto,
};
use crate::application::error_handling::CommandResult;
use crate::application::state::AppState;
use crate::domain::{CompositionEntry, CurrentUser};
use crate::services::{
    AddExerciseRequest, ComposedExercise, CreateRoutineRequest, RoutineView, UpdateRoutineRequest,
};

pub fn list_routines(state: &AppState) -> CommandResult<Vec<RoutineView>> {
    Ok(state.query_service.list_routines()?)
}

/// Includes enrolled users
pub fn get_routine(state: &AppState, routine_id: i64) -> CommandResult<RoutineView> {
    Ok(state.query_service.get_routine(routine_id)?)
}

/// The caller is enrolled in the new routine
pub fn create_routine(
    state: &AppState,
    user: CurrentUser,
    dto: CreateRoutineDto,
) -> CommandResult<RoutineView> {
    let request = CreateRoutineRequest {
        name: dto.name,
        description: dto.description,
        exercises: dto.exercises.iter().map(CompositionEntry::from).collect(),
    };

    Ok(state.routine_service.create_routine(user, request)?)
}

pub fn update_routine(
    state: &AppState,
    routine_id: i64,
    dto: UpdateRoutineDto,
) -> CommandResult<RoutineView> {
    Ok(state.routine_service.update_routine(UpdateRoutineRequest {
        routine_id,
        name: dto.name,
        description: dto.description,
    })?)
}

pub fn delete_routine(state: &AppState, routine_id: i64) -> CommandResult<AckDto> {
    state.routine_service.delete_routine(routine_id)?;
    Ok(AckDto::ok(format!("Routine {} deleted", routine_id)))
}

pub fn list_routine_composition(
    state: &AppState,
    routine_id: i64,
) -> CommandResult<Vec<ComposedExercise>> {
    Ok(state.query_service.list_routine_composition(routine_id)?)
}

pub fn add_exercise_to_routine(
    state: &AppState,
    routine_id: i64,
    dto: RoutineExerciseDto,
) -> CommandResult<RoutineView> {
    Ok(state.composition_service.add_exercise(AddExerciseRequest {
        routine_id,
        exercise_id: dto.exercise_id,
        params: dto.params(),
    })?)
}

/// Succeeds whether or not the exercise was in the routine
pub fn remove_exercise_from_routine(
    state: &AppState,
    routine_id: i64,
    exercise_id: i64,
) -> CommandResult<AckDto> {
    state
        .composition_service
        .remove_exercise(routine_id, exercise_id)?;

    Ok(AckDto::ok(format!(
        "Exercise {} removed from routine {}",
        exercise_id, routine_id
    )))
}

// src/services/composition_service.rs
//
// Composition Manager - the ordered exercise list of a routine
//
// CRITICAL RULES:
// - (routine_id, exercise_id) is unique; re-adding overwrites parameters
// - Omitted sequence = member count + 1, resolved in the write transaction
// - Removal never renumbers the remaining records

use std::sync::Arc;

use log::{debug, info, warn};

use crate::domain::{validate_composition, CompositionParams, DomainError};
use crate::error::{AppError, AppResult};
use crate::events::{EventBus, ExerciseAddedToRoutine, ExerciseRemovedFromRoutine};
use crate::repositories::{CompositionRepository, ExerciseRepository, RoutineRepository};
use crate::services::query_service::QueryService;
use crate::services::query_types::RoutineView;

#[derive(Debug, Clone)]
pub struct AddExerciseRequest {
    pub routine_id: i64,
    pub exercise_id: i64,
    pub params: CompositionParams,
}

pub struct CompositionService {
    routine_repo: Arc<dyn RoutineRepository>,
    exercise_repo: Arc<dyn ExerciseRepository>,
    composition_repo: Arc<dyn CompositionRepository>,
    query: Arc<QueryService>,
    event_bus: Arc<EventBus>,
}

impl CompositionService {
    pub fn new(
        routine_repo: Arc<dyn RoutineRepository>,
        exercise_repo: Arc<dyn ExerciseRepository>,
        composition_repo: Arc<dyn CompositionRepository>,
        query: Arc<QueryService>,
        event_bus: Arc<EventBus>,
    ) -> Self {
        Self {
            routine_repo,
            exercise_repo,
            composition_repo,
            query,
            event_bus,
        }
    }

    /// Add an exercise to a routine, or update its parameters if present.
    ///
    /// Returns the routine with its full, ordered composition.
    pub fn add_exercise(&self, request: AddExerciseRequest) -> AppResult<RoutineView> {
        if !self.routine_repo.exists(request.routine_id)? {
            return Err(AppError::not_found(format!("Routine {}", request.routine_id)));
        }

        validate_composition(&request.params)?;

        if !self.exercise_repo.exists(request.exercise_id)? {
            warn!(
                "Rejected add to routine {}: exercise {} does not exist",
                request.routine_id, request.exercise_id
            );
            return Err(DomainError::DanglingReference {
                entity: "Exercise",
                id: request.exercise_id,
            }
            .into());
        }

        let record = self.composition_repo.attach(
            request.routine_id,
            request.exercise_id,
            &request.params,
        )?;

        info!(
            "Routine {}: exercise {} at sequence {} ({}x{}, rest {}s)",
            record.routine_id,
            record.exercise_id,
            record.sequence,
            record.target_sets,
            record.target_reps,
            record.rest_seconds
        );
        self.event_bus.emit(ExerciseAddedToRoutine::new(
            record.routine_id,
            record.exercise_id,
            record.sequence,
        ));

        self.query.get_composed_routine(request.routine_id)
    }

    /// Idempotent: removing an absent exercise succeeds.
    pub fn remove_exercise(&self, routine_id: i64, exercise_id: i64) -> AppResult<()> {
        let removed = self.composition_repo.detach(routine_id, exercise_id)?;

        if removed {
            info!("Routine {}: removed exercise {}", routine_id, exercise_id);
            self.event_bus
                .emit(ExerciseRemovedFromRoutine::new(routine_id, exercise_id));
        } else {
            debug!(
                "Routine {}: exercise {} was not a member, nothing to remove",
                routine_id, exercise_id
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Routine, RoutineExercise};
    use crate::repositories::{
        MockCategoryRepository, MockCompositionRepository, MockEnrollmentRepository,
        MockExerciseRepository, MockRoutineRepository,
    };
    use chrono::Utc;

    fn query() -> Arc<QueryService> {
        let mut routines = MockRoutineRepository::new();
        routines.expect_get_by_id().returning(|id| {
            let mut routine = Routine::new("Push Day".to_string(), None);
            routine.id = id;
            Ok(Some(routine))
        });
        let mut compositions = MockCompositionRepository::new();
        compositions
            .expect_list_with_exercises()
            .returning(|_| Ok(vec![]));
        Arc::new(QueryService::new(
            Arc::new(MockCategoryRepository::new()),
            Arc::new(MockExerciseRepository::new()),
            Arc::new(routines),
            Arc::new(compositions),
            Arc::new(MockEnrollmentRepository::new()),
        ))
    }

    fn service(
        routines: MockRoutineRepository,
        exercises: MockExerciseRepository,
        compositions: MockCompositionRepository,
    ) -> (CompositionService, Arc<EventBus>) {
        let bus = Arc::new(EventBus::new());
        let service = CompositionService::new(
            Arc::new(routines),
            Arc::new(exercises),
            Arc::new(compositions),
            query(),
            bus.clone(),
        );
        (service, bus)
    }

    #[test]
    fn test_add_to_missing_routine_is_not_found() {
        let mut routines = MockRoutineRepository::new();
        routines.expect_exists().returning(|_| Ok(false));
        let mut compositions = MockCompositionRepository::new();
        compositions.expect_attach().never();

        let (service, _bus) = service(routines, MockExerciseRepository::new(), compositions);
        let err = service
            .add_exercise(AddExerciseRequest {
                routine_id: 1,
                exercise_id: 1,
                params: CompositionParams::new(3, 10),
            })
            .unwrap_err();

        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[test]
    fn test_add_unknown_exercise_is_validation_error() {
        let mut routines = MockRoutineRepository::new();
        routines.expect_exists().returning(|_| Ok(true));
        let mut exercises = MockExerciseRepository::new();
        exercises.expect_exists().returning(|_| Ok(false));
        let mut compositions = MockCompositionRepository::new();
        compositions.expect_attach().never();

        let (service, _bus) = service(routines, exercises, compositions);
        let err = service
            .add_exercise(AddExerciseRequest {
                routine_id: 1,
                exercise_id: 9999,
                params: CompositionParams::new(3, 10),
            })
            .unwrap_err();

        assert!(err.is_validation());
    }

    #[test]
    fn test_negative_rest_is_rejected_before_lookup() {
        let mut routines = MockRoutineRepository::new();
        routines.expect_exists().returning(|_| Ok(true));
        let mut exercises = MockExerciseRepository::new();
        exercises.expect_exists().never();

        let (service, _bus) = service(routines, exercises, MockCompositionRepository::new());
        let err = service
            .add_exercise(AddExerciseRequest {
                routine_id: 1,
                exercise_id: 1,
                params: CompositionParams::new(3, 10).with_rest_seconds(-5),
            })
            .unwrap_err();

        assert!(err.is_validation());
    }

    #[test]
    fn test_add_emits_with_resolved_sequence() {
        let mut routines = MockRoutineRepository::new();
        routines.expect_exists().returning(|_| Ok(true));
        let mut exercises = MockExerciseRepository::new();
        exercises.expect_exists().returning(|_| Ok(true));
        let mut compositions = MockCompositionRepository::new();
        compositions
            .expect_attach()
            .times(1)
            .returning(|routine_id, exercise_id, params| {
                Ok(RoutineExercise {
                    routine_id,
                    exercise_id,
                    sequence: 3,
                    target_sets: params.target_sets as u32,
                    target_reps: params.target_reps as u32,
                    rest_seconds: 60,
                    created_at: Utc::now(),
                    updated_at: Utc::now(),
                })
            });

        let (service, bus) = service(routines, exercises, compositions);
        let received = Arc::new(std::sync::Mutex::new(None));
        let sink = received.clone();
        bus.subscribe::<ExerciseAddedToRoutine, _>(move |event| {
            *sink.lock().unwrap() = Some(event.sequence);
        });

        service
            .add_exercise(AddExerciseRequest {
                routine_id: 1,
                exercise_id: 2,
                params: CompositionParams::new(3, 10),
            })
            .unwrap();

        assert_eq!(*received.lock().unwrap(), Some(3));
    }

    #[test]
    fn test_remove_absent_is_silent() {
        let mut compositions = MockCompositionRepository::new();
        compositions.expect_detach().returning(|_, _| Ok(false));

        let (service, bus) = service(
            MockRoutineRepository::new(),
            MockExerciseRepository::new(),
            compositions,
        );

        service.remove_exercise(1, 2).unwrap();
        assert!(bus.get_event_log().is_empty());
    }
}

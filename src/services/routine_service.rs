// src/services/routine_service.rs
//
// Routine Service - routine lifecycle
//
// Creation is one transaction: routine row, initial composition, and the
// creator's enrollment.

use std::sync::Arc;

use log::{info, warn};

use crate::domain::{
    validate_composition, validate_routine, CompositionEntry, CurrentUser, DomainError, Routine,
};
use crate::error::{AppError, AppResult};
use crate::events::{EventBus, RoutineCreated, RoutineDeleted, RoutineUpdated};
use crate::repositories::{ExerciseRepository, RoutineRepository, UserRepository};
use crate::services::query_service::QueryService;
use crate::services::query_types::RoutineView;

#[derive(Debug, Clone)]
pub struct CreateRoutineRequest {
    pub name: String,
    pub description: Option<String>,
    /// Entries without a sequence are appended in list order
    pub exercises: Vec<CompositionEntry>,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateRoutineRequest {
    pub routine_id: i64,
    pub name: Option<String>,
    pub description: Option<Option<String>>,
}

pub struct RoutineService {
    routine_repo: Arc<dyn RoutineRepository>,
    exercise_repo: Arc<dyn ExerciseRepository>,
    user_repo: Arc<dyn UserRepository>,
    query: Arc<QueryService>,
    event_bus: Arc<EventBus>,
}

impl RoutineService {
    pub fn new(
        routine_repo: Arc<dyn RoutineRepository>,
        exercise_repo: Arc<dyn ExerciseRepository>,
        user_repo: Arc<dyn UserRepository>,
        query: Arc<QueryService>,
        event_bus: Arc<EventBus>,
    ) -> Self {
        Self {
            routine_repo,
            exercise_repo,
            user_repo,
            query,
            event_bus,
        }
    }

    /// Create a routine and enroll its creator.
    ///
    /// Every initial entry is checked before anything is written; one bad
    /// entry means no routine.
    pub fn create_routine(
        &self,
        creator: CurrentUser,
        request: CreateRoutineRequest,
    ) -> AppResult<RoutineView> {
        let mut routine = Routine::new(request.name, request.description);

        validate_routine(&routine)?;

        for entry in &request.exercises {
            validate_composition(&entry.params)?;
            if !self.exercise_repo.exists(entry.exercise_id)? {
                warn!(
                    "Rejected routine {:?}: exercise {} does not exist",
                    routine.name, entry.exercise_id
                );
                return Err(DomainError::DanglingReference {
                    entity: "Exercise",
                    id: entry.exercise_id,
                }
                .into());
            }
        }

        if !self.user_repo.exists(creator.user_id)? {
            return Err(AppError::not_found(format!("User {}", creator.user_id)));
        }

        routine.id = self
            .routine_repo
            .create(&routine, &request.exercises, Some(creator.user_id))?;

        info!(
            "Created routine {} ({}) with {} exercises for user {}",
            routine.id,
            routine.name,
            request.exercises.len(),
            creator.user_id
        );
        self.event_bus.emit(RoutineCreated::new(
            routine.id,
            routine.name.clone(),
            creator.user_id,
            request.exercises.len(),
        ));

        self.query.get_composed_routine(routine.id)
    }

    /// Routine mutation is not restricted to the creator.
    pub fn update_routine(&self, request: UpdateRoutineRequest) -> AppResult<RoutineView> {
        let mut routine = self
            .routine_repo
            .get_by_id(request.routine_id)?
            .ok_or_else(|| AppError::not_found(format!("Routine {}", request.routine_id)))?;

        routine.update(request.name, request.description);

        validate_routine(&routine)?;
        self.routine_repo.update(&routine)?;

        self.event_bus.emit(RoutineUpdated::new(routine.id));

        self.query.get_composed_routine(routine.id)
    }

    /// Composition and enrollments are removed with the routine
    pub fn delete_routine(&self, routine_id: i64) -> AppResult<()> {
        if !self.routine_repo.delete(routine_id)? {
            return Err(AppError::not_found(format!("Routine {}", routine_id)));
        }

        info!("Deleted routine {}", routine_id);
        self.event_bus.emit(RoutineDeleted::new(routine_id));

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CompositionParams;
    use crate::repositories::{
        MockCategoryRepository, MockCompositionRepository, MockEnrollmentRepository,
        MockExerciseRepository, MockRoutineRepository, MockUserRepository,
    };
    use mockall::predicate::eq;

    fn query_with(routines: MockRoutineRepository) -> Arc<QueryService> {
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

    fn request(exercises: Vec<CompositionEntry>) -> CreateRoutineRequest {
        CreateRoutineRequest {
            name: "Push Day".to_string(),
            description: None,
            exercises,
        }
    }

    #[test]
    fn test_create_enrolls_creator() {
        let mut routines = MockRoutineRepository::new();
        routines
            .expect_create()
            .withf(|routine, entries, enroll| {
                routine.name == "Push Day" && entries.len() == 1 && *enroll == Some(4)
            })
            .times(1)
            .returning(|_, _, _| Ok(11));
        let mut exercises = MockExerciseRepository::new();
        exercises.expect_exists().with(eq(2)).returning(|_| Ok(true));
        let mut users = MockUserRepository::new();
        users.expect_exists().returning(|_| Ok(true));

        let mut read_side = MockRoutineRepository::new();
        read_side.expect_get_by_id().returning(|id| {
            let mut routine = Routine::new("Push Day".to_string(), None);
            routine.id = id;
            Ok(Some(routine))
        });

        let bus = Arc::new(EventBus::new());
        let service = RoutineService::new(
            Arc::new(routines),
            Arc::new(exercises),
            Arc::new(users),
            query_with(read_side),
            bus.clone(),
        );

        let view = service
            .create_routine(
                CurrentUser::new(4),
                request(vec![CompositionEntry {
                    exercise_id: 2,
                    params: CompositionParams::new(4, 10),
                }]),
            )
            .unwrap();

        assert_eq!(view.id, 11);
        assert_eq!(bus.get_event_log()[0].event_type, "RoutineCreated");
    }

    #[test]
    fn test_create_with_unknown_exercise_writes_nothing() {
        let mut routines = MockRoutineRepository::new();
        routines.expect_create().never();
        let mut exercises = MockExerciseRepository::new();
        exercises.expect_exists().returning(|id| Ok(id != 404));

        let service = RoutineService::new(
            Arc::new(routines),
            Arc::new(exercises),
            Arc::new(MockUserRepository::new()),
            query_with(MockRoutineRepository::new()),
            Arc::new(EventBus::new()),
        );

        let err = service
            .create_routine(
                CurrentUser::new(1),
                request(vec![
                    CompositionEntry {
                        exercise_id: 1,
                        params: CompositionParams::new(3, 10),
                    },
                    CompositionEntry {
                        exercise_id: 404,
                        params: CompositionParams::new(3, 10),
                    },
                ]),
            )
            .unwrap_err();

        assert!(err.is_validation());
    }

    #[test]
    fn test_create_with_bad_params_is_rejected() {
        let mut routines = MockRoutineRepository::new();
        routines.expect_create().never();

        let service = RoutineService::new(
            Arc::new(routines),
            Arc::new(MockExerciseRepository::new()),
            Arc::new(MockUserRepository::new()),
            query_with(MockRoutineRepository::new()),
            Arc::new(EventBus::new()),
        );

        let err = service
            .create_routine(
                CurrentUser::new(1),
                request(vec![CompositionEntry {
                    exercise_id: 1,
                    params: CompositionParams::new(3, 0),
                }]),
            )
            .unwrap_err();

        assert!(err.is_validation());
    }

    #[test]
    fn test_delete_missing_routine() {
        let mut routines = MockRoutineRepository::new();
        routines.expect_delete().returning(|_| Ok(false));

        let service = RoutineService::new(
            Arc::new(routines),
            Arc::new(MockExerciseRepository::new()),
            Arc::new(MockUserRepository::new()),
            query_with(MockRoutineRepository::new()),
            Arc::new(EventBus::new()),
        );

        assert!(matches!(
            service.delete_routine(3).unwrap_err(),
            AppError::NotFound(_)
        ));
    }
}

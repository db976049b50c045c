// src/services/enrollment_service.rs
//
// Enrollment Manager - who is subscribed to which routine
//
// The duplicate check is the insert itself (composite primary key), so two
// concurrent subscribes for the same pair cannot both succeed.

use std::sync::Arc;

use log::{info, warn};

use crate::domain::CurrentUser;
use crate::error::{AppError, AppResult};
use crate::events::{EventBus, UserSubscribed, UserUnsubscribed};
use crate::repositories::{EnrollmentRepository, RoutineRepository, UserRepository};
use crate::services::query_service::QueryService;
use crate::services::query_types::RoutineView;

pub struct EnrollmentService {
    routine_repo: Arc<dyn RoutineRepository>,
    user_repo: Arc<dyn UserRepository>,
    enrollment_repo: Arc<dyn EnrollmentRepository>,
    query: Arc<QueryService>,
    event_bus: Arc<EventBus>,
}

impl EnrollmentService {
    pub fn new(
        routine_repo: Arc<dyn RoutineRepository>,
        user_repo: Arc<dyn UserRepository>,
        enrollment_repo: Arc<dyn EnrollmentRepository>,
        query: Arc<QueryService>,
        event_bus: Arc<EventBus>,
    ) -> Self {
        Self {
            routine_repo,
            user_repo,
            enrollment_repo,
            query,
            event_bus,
        }
    }

    /// Subscribe the caller to a routine; a second subscribe is a Conflict.
    pub fn subscribe(&self, user: CurrentUser, routine_id: i64) -> AppResult<RoutineView> {
        if !self.routine_repo.exists(routine_id)? {
            return Err(AppError::not_found(format!("Routine {}", routine_id)));
        }
        if !self.user_repo.exists(user.user_id)? {
            return Err(AppError::not_found(format!("User {}", user.user_id)));
        }

        if !self.enrollment_repo.enroll(user.user_id, routine_id)? {
            warn!(
                "User {} is already subscribed to routine {}",
                user.user_id, routine_id
            );
            return Err(AppError::conflict(format!(
                "Already subscribed to routine {}",
                routine_id
            )));
        }

        info!("User {} subscribed to routine {}", user.user_id, routine_id);
        self.event_bus
            .emit(UserSubscribed::new(user.user_id, routine_id));

        self.query.get_composed_routine(routine_id)
    }

    pub fn unsubscribe(&self, user: CurrentUser, routine_id: i64) -> AppResult<()> {
        if !self.routine_repo.exists(routine_id)? {
            return Err(AppError::not_found(format!("Routine {}", routine_id)));
        }

        if !self.enrollment_repo.unenroll(user.user_id, routine_id)? {
            return Err(AppError::not_found(format!(
                "Subscription to routine {}",
                routine_id
            )));
        }

        info!(
            "User {} unsubscribed from routine {}",
            user.user_id, routine_id
        );
        self.event_bus
            .emit(UserUnsubscribed::new(user.user_id, routine_id));

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Routine;
    use crate::repositories::{
        MockCategoryRepository, MockCompositionRepository, MockEnrollmentRepository,
        MockExerciseRepository, MockRoutineRepository, MockUserRepository,
    };

    fn query() -> Arc<QueryService> {
        let mut routines = MockRoutineRepository::new();
        routines.expect_get_by_id().returning(|id| {
            let mut routine = Routine::new("Leg Day".to_string(), None);
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

    fn service(enrollments: MockEnrollmentRepository) -> (EnrollmentService, Arc<EventBus>) {
        let mut routines = MockRoutineRepository::new();
        routines.expect_exists().returning(|id| Ok(id == 1));
        let mut users = MockUserRepository::new();
        users.expect_exists().returning(|_| Ok(true));

        let bus = Arc::new(EventBus::new());
        let service = EnrollmentService::new(
            Arc::new(routines),
            Arc::new(users),
            Arc::new(enrollments),
            query(),
            bus.clone(),
        );
        (service, bus)
    }

    #[test]
    fn test_subscribe_returns_composed_routine() {
        let mut enrollments = MockEnrollmentRepository::new();
        enrollments.expect_enroll().times(1).returning(|_, _| Ok(true));

        let (service, bus) = service(enrollments);
        let view = service.subscribe(CurrentUser::new(2), 1).unwrap();

        assert_eq!(view.id, 1);
        assert_eq!(bus.get_event_log()[0].event_type, "UserSubscribed");
    }

    #[test]
    fn test_duplicate_subscribe_is_conflict() {
        let mut enrollments = MockEnrollmentRepository::new();
        enrollments.expect_enroll().returning(|_, _| Ok(false));

        let (service, bus) = service(enrollments);
        let err = service.subscribe(CurrentUser::new(2), 1).unwrap_err();

        assert!(matches!(err, AppError::Conflict(_)));
        assert!(bus.get_event_log().is_empty());
    }

    #[test]
    fn test_subscribe_to_missing_routine() {
        let mut enrollments = MockEnrollmentRepository::new();
        enrollments.expect_enroll().never();

        let (service, _bus) = service(enrollments);
        let err = service.subscribe(CurrentUser::new(2), 77).unwrap_err();

        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[test]
    fn test_unsubscribe_without_enrollment() {
        let mut enrollments = MockEnrollmentRepository::new();
        enrollments.expect_unenroll().returning(|_, _| Ok(false));

        let (service, _bus) = service(enrollments);
        let err = service.unsubscribe(CurrentUser::new(2), 1).unwrap_err();

        assert_eq!(err.to_string(), "Subscription to routine 1 not found");
    }
}

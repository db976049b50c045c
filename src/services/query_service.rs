// src/services/query_service.rs
//
// Catalog Query Service
//
// Read-only composition of categories, exercises and routines into views.
// No side effects, no events; safe to call concurrently.

use std::collections::HashMap;
use std::sync::Arc;

use log::debug;

use crate::domain::{Category, CurrentUser, Routine};
use crate::error::{AppError, AppResult};
use crate::repositories::{
    CategoryRepository, CompositionRepository, EnrollmentRepository, ExerciseRepository,
    RoutineRepository,
};
use crate::services::query_types::{
    CategoryView, ComposedExercise, ExerciseView, RoutineView, UserView,
};

pub struct QueryService {
    category_repo: Arc<dyn CategoryRepository>,
    exercise_repo: Arc<dyn ExerciseRepository>,
    routine_repo: Arc<dyn RoutineRepository>,
    composition_repo: Arc<dyn CompositionRepository>,
    enrollment_repo: Arc<dyn EnrollmentRepository>,
}

impl QueryService {
    pub fn new(
        category_repo: Arc<dyn CategoryRepository>,
        exercise_repo: Arc<dyn ExerciseRepository>,
        routine_repo: Arc<dyn RoutineRepository>,
        composition_repo: Arc<dyn CompositionRepository>,
        enrollment_repo: Arc<dyn EnrollmentRepository>,
    ) -> Self {
        Self {
            category_repo,
            exercise_repo,
            routine_repo,
            composition_repo,
            enrollment_repo,
        }
    }

    // ========================================================================
    // CATEGORIES
    // ========================================================================

    pub fn list_categories(&self) -> AppResult<Vec<CategoryView>> {
        let categories = self.category_repo.list_all()?;
        Ok(categories.into_iter().map(CategoryView::from).collect())
    }

    pub fn get_category(&self, category_id: i64) -> AppResult<CategoryView> {
        self.load_category(category_id).map(CategoryView::from)
    }

    pub fn list_category_exercises(&self, category_id: i64) -> AppResult<Vec<ExerciseView>> {
        let category = CategoryView::from(self.load_category(category_id)?);

        let exercises = self.exercise_repo.list_by_category(category_id)?;

        Ok(exercises
            .into_iter()
            .map(|exercise| ExerciseView::new(exercise, category.clone()))
            .collect())
    }

    // ========================================================================
    // EXERCISES
    // ========================================================================

    pub fn list_exercises(&self) -> AppResult<Vec<ExerciseView>> {
        let categories: HashMap<i64, CategoryView> = self
            .category_repo
            .list_all()?
            .into_iter()
            .map(|c| (c.id, CategoryView::from(c)))
            .collect();

        self.exercise_repo
            .list_all()?
            .into_iter()
            .map(|exercise| {
                let category = categories.get(&exercise.category_id).cloned().ok_or_else(|| {
                    AppError::Other(format!(
                        "Exercise {} references missing category {}",
                        exercise.id, exercise.category_id
                    ))
                })?;
                Ok(ExerciseView::new(exercise, category))
            })
            .collect()
    }

    pub fn get_exercise(&self, exercise_id: i64) -> AppResult<ExerciseView> {
        let exercise = self
            .exercise_repo
            .get_by_id(exercise_id)?
            .ok_or_else(|| AppError::not_found(format!("Exercise {}", exercise_id)))?;

        let category = self.load_category(exercise.category_id)?;

        Ok(ExerciseView::new(exercise, category.into()))
    }

    // ========================================================================
    // ROUTINES
    // ========================================================================

    /// Every routine with its composition; subscribers are not loaded
    pub fn list_routines(&self) -> AppResult<Vec<RoutineView>> {
        self.routine_repo
            .list_all()?
            .into_iter()
            .map(|routine| self.compose(routine))
            .collect()
    }

    /// A routine with its composition and enrolled users
    pub fn get_routine(&self, routine_id: i64) -> AppResult<RoutineView> {
        let routine = self.load_routine(routine_id)?;

        let users = self
            .enrollment_repo
            .list_users_for_routine(routine_id)?
            .into_iter()
            .map(UserView::from)
            .collect();

        Ok(self.compose(routine)?.with_users(users))
    }

    /// A routine with its composition, without subscribers
    pub fn get_composed_routine(&self, routine_id: i64) -> AppResult<RoutineView> {
        let routine = self.load_routine(routine_id)?;
        self.compose(routine)
    }

    /// Flattened composition, ordered by sequence
    pub fn list_routine_composition(&self, routine_id: i64) -> AppResult<Vec<ComposedExercise>> {
        if !self.routine_repo.exists(routine_id)? {
            return Err(AppError::not_found(format!("Routine {}", routine_id)));
        }

        self.composed_exercises(routine_id)
    }

    /// Routines the caller is enrolled in, each composed
    pub fn list_my_routines(&self, user: CurrentUser) -> AppResult<Vec<RoutineView>> {
        let routines = self.routine_repo.list_for_user(user.user_id)?;

        debug!(
            "User {} is enrolled in {} routines",
            user.user_id,
            routines.len()
        );

        routines
            .into_iter()
            .map(|routine| self.compose(routine))
            .collect()
    }

    // ========================================================================
    // HELPERS
    // ========================================================================

    fn load_category(&self, category_id: i64) -> AppResult<Category> {
        self.category_repo
            .get_by_id(category_id)?
            .ok_or_else(|| AppError::not_found(format!("Category {}", category_id)))
    }

    fn load_routine(&self, routine_id: i64) -> AppResult<Routine> {
        self.routine_repo
            .get_by_id(routine_id)?
            .ok_or_else(|| AppError::not_found(format!("Routine {}", routine_id)))
    }

    fn compose(&self, routine: Routine) -> AppResult<RoutineView> {
        let exercises = self.composed_exercises(routine.id)?;
        Ok(RoutineView::new(routine, exercises))
    }

    fn composed_exercises(&self, routine_id: i64) -> AppResult<Vec<ComposedExercise>> {
        let pairs = self.composition_repo.list_with_exercises(routine_id)?;

        Ok(pairs
            .into_iter()
            .map(|(exercise, record)| ComposedExercise::new(exercise, record))
            .collect())
    }
}

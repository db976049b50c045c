// src/services/catalog_service.rs
//
// Catalog Service - categories and exercises (reference data)
//
// validate -> persist -> emit. Reads go through QueryService.

use std::sync::Arc;

use log::{info, warn};

use crate::domain::{validate_category, validate_exercise, Category, DomainError, Exercise};
use crate::error::{AppError, AppResult};
use crate::events::{
    CategoryCreated, CategoryDeleted, CategoryUpdated, EventBus, ExerciseCreated, ExerciseDeleted,
    ExerciseUpdated,
};
use crate::repositories::{CategoryRepository, ExerciseRepository};

#[derive(Debug, Clone)]
pub struct CreateCategoryRequest {
    pub name: String,
}

#[derive(Debug, Clone)]
pub struct UpdateCategoryRequest {
    pub category_id: i64,
    pub name: String,
}

#[derive(Debug, Clone)]
pub struct CreateExerciseRequest {
    pub name: String,
    pub instruction: Option<String>,
    pub category_id: i64,
}

/// `None` leaves a field as stored; `instruction: Some(None)` clears it.
#[derive(Debug, Clone, Default)]
pub struct UpdateExerciseRequest {
    pub exercise_id: i64,
    pub name: Option<String>,
    pub instruction: Option<Option<String>>,
    pub category_id: Option<i64>,
}

pub struct CatalogService {
    category_repo: Arc<dyn CategoryRepository>,
    exercise_repo: Arc<dyn ExerciseRepository>,
    event_bus: Arc<EventBus>,
}

impl CatalogService {
    pub fn new(
        category_repo: Arc<dyn CategoryRepository>,
        exercise_repo: Arc<dyn ExerciseRepository>,
        event_bus: Arc<EventBus>,
    ) -> Self {
        Self {
            category_repo,
            exercise_repo,
            event_bus,
        }
    }

    // ========================================================================
    // CATEGORIES
    // ========================================================================

    pub fn create_category(&self, request: CreateCategoryRequest) -> AppResult<Category> {
        let mut category = Category::new(request.name);

        validate_category(&category)?;
        self.ensure_name_available(&category.name, None)?;

        category.id = self
            .category_repo
            .insert(&category)
            .map_err(|e| duplicate_name_or(e, &category.name))?;

        info!("Created category {} ({})", category.id, category.name);
        self.event_bus
            .emit(CategoryCreated::new(category.id, category.name.clone()));

        Ok(category)
    }

    pub fn update_category(&self, request: UpdateCategoryRequest) -> AppResult<Category> {
        let mut category = self
            .category_repo
            .get_by_id(request.category_id)?
            .ok_or_else(|| AppError::not_found(format!("Category {}", request.category_id)))?;

        category.rename(request.name);

        validate_category(&category)?;
        self.ensure_name_available(&category.name, Some(category.id))?;

        self.category_repo
            .update(&category)
            .map_err(|e| duplicate_name_or(e, &category.name))?;

        self.event_bus
            .emit(CategoryUpdated::new(category.id, category.name.clone()));

        Ok(category)
    }

    /// Refused while any exercise still belongs to the category
    pub fn delete_category(&self, category_id: i64) -> AppResult<()> {
        if !self.category_repo.exists(category_id)? {
            return Err(AppError::not_found(format!("Category {}", category_id)));
        }

        let in_use = self.exercise_repo.count_by_category(category_id)?;
        if in_use > 0 {
            warn!(
                "Refusing to delete category {}: {} exercises still reference it",
                category_id, in_use
            );
            return Err(AppError::conflict(format!(
                "Category {} still has {} exercises",
                category_id, in_use
            )));
        }

        self.category_repo.delete(category_id)?;

        info!("Deleted category {}", category_id);
        self.event_bus.emit(CategoryDeleted::new(category_id));

        Ok(())
    }

    fn ensure_name_available(&self, name: &str, current_id: Option<i64>) -> AppResult<()> {
        match self.category_repo.find_by_name(name)? {
            Some(existing) if Some(existing.id) != current_id => {
                Err(duplicate_category_name(name).into())
            }
            _ => Ok(()),
        }
    }

    // ========================================================================
    // EXERCISES
    // ========================================================================

    pub fn create_exercise(&self, request: CreateExerciseRequest) -> AppResult<Exercise> {
        let mut exercise = Exercise::new(request.name, request.instruction, request.category_id);

        validate_exercise(&exercise)?;
        self.ensure_category_exists(exercise.category_id)?;

        exercise.id = self.exercise_repo.insert(&exercise)?;

        info!(
            "Created exercise {} ({}) in category {}",
            exercise.id, exercise.name, exercise.category_id
        );
        self.event_bus.emit(ExerciseCreated::new(
            exercise.id,
            exercise.category_id,
            exercise.name.clone(),
        ));

        Ok(exercise)
    }

    pub fn update_exercise(&self, request: UpdateExerciseRequest) -> AppResult<Exercise> {
        let mut exercise = self
            .exercise_repo
            .get_by_id(request.exercise_id)?
            .ok_or_else(|| AppError::not_found(format!("Exercise {}", request.exercise_id)))?;

        exercise.update_details(request.name, request.instruction, request.category_id);

        validate_exercise(&exercise)?;
        if request.category_id.is_some() {
            self.ensure_category_exists(exercise.category_id)?;
        }

        self.exercise_repo.update(&exercise)?;

        self.event_bus
            .emit(ExerciseUpdated::new(exercise.id, exercise.category_id));

        Ok(exercise)
    }

    /// Also removes the exercise from every routine that contained it
    pub fn delete_exercise(&self, exercise_id: i64) -> AppResult<()> {
        if !self.exercise_repo.exists(exercise_id)? {
            return Err(AppError::not_found(format!("Exercise {}", exercise_id)));
        }

        self.exercise_repo.delete(exercise_id)?;

        info!("Deleted exercise {}", exercise_id);
        self.event_bus.emit(ExerciseDeleted::new(exercise_id));

        Ok(())
    }

    fn ensure_category_exists(&self, category_id: i64) -> AppResult<()> {
        if self.category_repo.exists(category_id)? {
            Ok(())
        } else {
            warn!("Rejected exercise: category {} does not exist", category_id);
            Err(DomainError::DanglingReference {
                entity: "Category",
                id: category_id,
            }
            .into())
        }
    }
}

fn duplicate_category_name(name: &str) -> DomainError {
    DomainError::InvariantViolation(format!("Category name already exists: {}", name))
}

/// A concurrent insert can still trip the UNIQUE index after the lookup
fn duplicate_name_or(err: AppError, name: &str) -> AppError {
    if err.is_unique_violation() {
        duplicate_category_name(name).into()
    } else {
        err
    }
}

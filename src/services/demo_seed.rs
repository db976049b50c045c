// src/services/demo_seed.rs
//
// Demo catalog for local development.
//
// Deterministic: the same empty database always ends up with the same
// rows. Goes through the services so every invariant and event applies.

use log::info;
use serde::Serialize;

use crate::domain::{CompositionEntry, CompositionParams, CurrentUser};
use crate::error::AppResult;
use crate::services::catalog_service::{
    CatalogService, CreateCategoryRequest, CreateExerciseRequest,
};
use crate::services::enrollment_service::EnrollmentService;
use crate::services::query_service::QueryService;
use crate::services::routine_service::{CreateRoutineRequest, RoutineService};
use crate::services::user_service::{RegisterUserRequest, UserService};

const CATALOG: [(&str, [(&str, &str); 4]); 3] = [
    (
        "Chest",
        [
            ("Bench Press", "Lower the bar to mid-chest, press to lockout."),
            ("Incline Dumbbell Press", "Bench at 30 degrees, elbows under the wrists."),
            ("Cable Fly", "Slight bend in the elbows, squeeze at the midline."),
            ("Push Up", "Body in one line, chest to the floor."),
        ],
    ),
    (
        "Back",
        [
            ("Deadlift", "Bar over mid-foot, push the floor away."),
            ("Pull Up", "Full hang to chin over the bar."),
            ("Barbell Row", "Hinge to 45 degrees, pull to the lower ribs."),
            ("Lat Pulldown", "Drive the elbows down and back."),
        ],
    ),
    (
        "Legs",
        [
            ("Back Squat", "Break at hips and knees together, hit depth."),
            ("Romanian Deadlift", "Soft knees, hinge until the hamstrings load."),
            ("Walking Lunge", "Long stride, back knee just above the floor."),
            ("Leg Press", "Feet shoulder width, do not lock the knees."),
        ],
    ),
];

const USERS: [(&str, &str); 3] = [
    ("Demo Athlete", "demo@routinehub.local"),
    ("Alex Lifter", "alex@routinehub.local"),
    ("Sam Runner", "sam@routinehub.local"),
];

/// What a seeding run did
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SeedReport {
    /// True when the catalog already had data and nothing was written
    pub skipped: bool,
    pub categories: usize,
    pub exercises: usize,
    pub users: usize,
    pub routines: usize,
    pub subscriptions: usize,
}

/// Training parameters for the n-th exercise of a sample routine
fn sample_params(position: usize) -> CompositionParams {
    let n = position as i64;
    CompositionParams::new(3 + n % 3, 8 + 2 * n).with_rest_seconds(60 + 15 * n)
}

/// Seed categories, exercises, users and sample routines.
///
/// Does nothing when any category exists.
pub fn seed_demo_catalog(
    catalog: &CatalogService,
    users: &UserService,
    routines: &RoutineService,
    enrollments: &EnrollmentService,
    query: &QueryService,
) -> AppResult<SeedReport> {
    if !query.list_categories()?.is_empty() {
        info!("Catalog already populated, skipping demo seed");
        return Ok(SeedReport {
            skipped: true,
            ..SeedReport::default()
        });
    }

    let mut report = SeedReport::default();

    // exercise ids grouped by category, in catalog order
    let mut by_category: Vec<Vec<i64>> = Vec::with_capacity(CATALOG.len());
    for (category_name, exercises) in CATALOG {
        let category = catalog.create_category(CreateCategoryRequest {
            name: category_name.to_string(),
        })?;
        report.categories += 1;

        let mut ids = Vec::with_capacity(exercises.len());
        for (name, instruction) in exercises {
            let exercise = catalog.create_exercise(CreateExerciseRequest {
                name: name.to_string(),
                instruction: Some(instruction.to_string()),
                category_id: category.id,
            })?;
            ids.push(exercise.id);
            report.exercises += 1;
        }
        by_category.push(ids);
    }

    let mut user_ids = Vec::with_capacity(USERS.len());
    for (name, email) in USERS {
        let user = users.register_user(RegisterUserRequest {
            name: name.to_string(),
            email: email.to_string(),
        })?;
        user_ids.push(user.id);
        report.users += 1;
    }

    let full_body: Vec<i64> = by_category.iter().map(|ids| ids[0]).collect();
    let plans = [
        ("Push Day", "Chest focused pressing session.", &by_category[0]),
        ("Pull Day", "Back and posterior chain.", &by_category[1]),
        ("Leg Day", "Squat pattern plus accessories.", &by_category[2]),
        ("Full Body", "One main lift per muscle group.", &full_body),
    ];

    let creator = CurrentUser::new(user_ids[0]);
    let mut routine_ids = Vec::with_capacity(plans.len());
    for (name, description, exercise_ids) in plans {
        let entries = exercise_ids
            .iter()
            .enumerate()
            .map(|(position, exercise_id)| CompositionEntry {
                exercise_id: *exercise_id,
                params: sample_params(position).with_sequence(position as i64 + 1),
            })
            .collect();

        let routine = routines.create_routine(
            creator,
            CreateRoutineRequest {
                name: name.to_string(),
                description: Some(description.to_string()),
                exercises: entries,
            },
        )?;
        routine_ids.push(routine.id);
        report.routines += 1;
        // creator enrollment
        report.subscriptions += 1;
    }

    // (user index, routine index)
    for (user, routine) in [(1, 0), (1, 2), (2, 3)] {
        enrollments.subscribe(CurrentUser::new(user_ids[user]), routine_ids[routine])?;
        report.subscriptions += 1;
    }

    info!(
        "Seeded demo catalog: {} categories, {} exercises, {} routines",
        report.categories, report.exercises, report.routines
    );

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_params_are_valid() {
        for position in 0..8 {
            let params = sample_params(position);
            assert!(crate::domain::validate_composition(&params).is_ok());
        }
        assert_eq!(sample_params(0).target_sets, 3);
        assert_eq!(sample_params(1).target_reps, 10);
        assert_eq!(sample_params(2).rest_seconds, Some(90));
    }
}

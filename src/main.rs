// src/main.rs
//
// routinehub CLI
//
// Every command prints JSON on stdout. Failures print an ErrorResponse and
// exit non-zero. Logs go to stderr (RUST_LOG, else --log-level).

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{anyhow, Context, Result};
use clap::{Args, Parser, Subcommand};
use dotenvy::dotenv;
use log::{debug, LevelFilter};
use serde::Serialize;

use routinehub::application::commands::*;
use routinehub::application::dto::{
    AckDto, CreateCategoryDto, CreateExerciseDto, CreateRoutineDto, RegisterUserDto,
    RoutineExerciseDto, UpdateCategoryDto, UpdateExerciseDto, UpdateRoutineDto,
};
use routinehub::application::{AppState, CommandResult};
use routinehub::logging::{init_logger, parse_level};
use routinehub::{AppConfig, CurrentUser};

#[derive(Parser, Debug)]
#[command(version, about = "RoutineHub - workout routine catalog", long_about = None)]
struct Cli {
    /// SQLite database file (overrides ROUTINEHUB_DATABASE_PATH)
    #[arg(long, global = true)]
    database: Option<PathBuf>,

    /// Identity to act as for routine and subscription commands
    #[arg(long, global = true, env = "ROUTINEHUB_USER_ID")]
    user: Option<i64>,

    /// Log level when RUST_LOG is unset (off, error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "info", value_parser = log_level)]
    log_level: LevelFilter,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create the database and apply the schema
    Init,
    /// Load the demo catalog into an empty database
    Seed,
    /// Row counts and file size
    Stats,
    /// Run SQLite's integrity check
    Integrity,
    #[command(subcommand)]
    Category(CategoryCommand),
    #[command(subcommand)]
    Exercise(ExerciseCommand),
    #[command(subcommand)]
    Routine(RoutineCommand),
    /// Routines the current user is subscribed to
    #[command(subcommand)]
    My(MyCommand),
    #[command(subcommand)]
    User(UserCommand),
}

#[derive(Subcommand, Debug)]
enum CategoryCommand {
    List,
    Get { id: i64 },
    Create { name: String },
    Update { id: i64, name: String },
    Delete { id: i64 },
    /// Exercises in the category
    Exercises { id: i64 },
}

#[derive(Subcommand, Debug)]
enum ExerciseCommand {
    List,
    Get {
        id: i64,
    },
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        category: i64,
        #[arg(long)]
        instruction: Option<String>,
    },
    Update {
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        category: Option<i64>,
        #[arg(long, conflicts_with = "clear_instruction")]
        instruction: Option<String>,
        #[arg(long)]
        clear_instruction: bool,
    },
    Delete {
        id: i64,
    },
}

#[derive(Args, Debug)]
struct CompositionArgs {
    #[arg(long)]
    exercise: i64,
    #[arg(long)]
    sets: i64,
    #[arg(long)]
    reps: i64,
    /// Seconds between sets (default 60)
    #[arg(long, allow_negative_numbers = true)]
    rest: Option<i64>,
    /// Position in the routine (default: append)
    #[arg(long)]
    sequence: Option<i64>,
}

#[derive(Subcommand, Debug)]
enum RoutineCommand {
    List,
    /// Routine with its composition and subscribers
    Get {
        id: i64,
    },
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        description: Option<String>,
        /// JSON array of {exercise_id, target_sets, target_reps, rest_seconds?, sequence?}
        #[arg(long)]
        exercises: Option<String>,
    },
    Update {
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long, conflicts_with = "clear_description")]
        description: Option<String>,
        #[arg(long)]
        clear_description: bool,
    },
    Delete {
        id: i64,
    },
    /// Ordered composition
    Exercises {
        id: i64,
    },
    /// Add an exercise, or change its parameters
    Add {
        id: i64,
        #[command(flatten)]
        composition: CompositionArgs,
    },
    Remove {
        id: i64,
        exercise: i64,
    },
}

#[derive(Subcommand, Debug)]
enum MyCommand {
    List,
    Subscribe { routine: i64 },
    Unsubscribe { routine: i64 },
}

#[derive(Subcommand, Debug)]
enum UserCommand {
    Register { name: String, email: String },
    Get { id: i64 },
    List,
}

fn main() -> Result<ExitCode> {
    dotenv().ok();
    let cli = Cli::parse();
    init_logger(cli.log_level);

    let mut config = AppConfig::from_env()?;
    if let Some(path) = cli.database.clone() {
        config = config.with_database_path(path);
    }
    debug!("Using configuration {:?}", config);

    let state = AppState::initialize(&config)
        .with_context(|| format!("opening {}", config.database_path.display()))?;

    run(&state, &cli, &config.database_path)
}

fn run(state: &AppState, cli: &Cli, database_path: &Path) -> Result<ExitCode> {
    match &cli.command {
        Command::Init => print(Ok(database_ready(database_path))),
        Command::Seed => print(seed_demo(state)),
        Command::Stats => print(database_stats(state)),
        Command::Integrity => print(check_integrity(state)),
        Command::Category(command) => run_category(state, command),
        Command::Exercise(command) => run_exercise(state, command),
        Command::Routine(command) => run_routine(state, cli, command),
        Command::My(command) => run_my(state, current_user(cli)?, command),
        Command::User(command) => run_user(state, command),
    }
}

fn run_category(state: &AppState, command: &CategoryCommand) -> Result<ExitCode> {
    match command {
        CategoryCommand::List => print(list_categories(state)),
        CategoryCommand::Get { id } => print(get_category(state, *id)),
        CategoryCommand::Create { name } => print(create_category(
            state,
            CreateCategoryDto { name: name.clone() },
        )),
        CategoryCommand::Update { id, name } => print(update_category(
            state,
            *id,
            UpdateCategoryDto { name: name.clone() },
        )),
        CategoryCommand::Delete { id } => print(delete_category(state, *id)),
        CategoryCommand::Exercises { id } => print(list_category_exercises(state, *id)),
    }
}

fn run_exercise(state: &AppState, command: &ExerciseCommand) -> Result<ExitCode> {
    match command {
        ExerciseCommand::List => print(list_exercises(state)),
        ExerciseCommand::Get { id } => print(get_exercise(state, *id)),
        ExerciseCommand::Create {
            name,
            category,
            instruction,
        } => print(create_exercise(
            state,
            CreateExerciseDto {
                name: name.clone(),
                instruction: instruction.clone(),
                category_id: *category,
            },
        )),
        ExerciseCommand::Update {
            id,
            name,
            category,
            instruction,
            clear_instruction,
        } => {
            let instruction = if *clear_instruction {
                Some(None)
            } else {
                instruction.clone().map(Some)
            };
            print(update_exercise(
                state,
                *id,
                UpdateExerciseDto {
                    name: name.clone(),
                    instruction,
                    category_id: *category,
                },
            ))
        }
        ExerciseCommand::Delete { id } => print(delete_exercise(state, *id)),
    }
}

fn run_routine(state: &AppState, cli: &Cli, command: &RoutineCommand) -> Result<ExitCode> {
    match command {
        RoutineCommand::List => print(list_routines(state)),
        RoutineCommand::Get { id } => print(get_routine(state, *id)),
        RoutineCommand::Create {
            name,
            description,
            exercises,
        } => {
            let exercises: Vec<RoutineExerciseDto> = match exercises {
                Some(raw) => serde_json::from_str(raw).context("parsing --exercises")?,
                None => Vec::new(),
            };
            print(create_routine(
                state,
                current_user(cli)?,
                CreateRoutineDto {
                    name: name.clone(),
                    description: description.clone(),
                    exercises,
                },
            ))
        }
        RoutineCommand::Update {
            id,
            name,
            description,
            clear_description,
        } => {
            let description = if *clear_description {
                Some(None)
            } else {
                description.clone().map(Some)
            };
            print(update_routine(
                state,
                *id,
                UpdateRoutineDto {
                    name: name.clone(),
                    description,
                },
            ))
        }
        RoutineCommand::Delete { id } => print(delete_routine(state, *id)),
        RoutineCommand::Exercises { id } => print(list_routine_composition(state, *id)),
        RoutineCommand::Add { id, composition } => print(add_exercise_to_routine(
            state,
            *id,
            RoutineExerciseDto {
                exercise_id: composition.exercise,
                target_sets: composition.sets,
                target_reps: composition.reps,
                rest_seconds: composition.rest,
                sequence: composition.sequence,
            },
        )),
        RoutineCommand::Remove { id, exercise } => {
            print(remove_exercise_from_routine(state, *id, *exercise))
        }
    }
}

fn run_my(state: &AppState, user: CurrentUser, command: &MyCommand) -> Result<ExitCode> {
    match command {
        MyCommand::List => print(list_my_routines(state, user)),
        MyCommand::Subscribe { routine } => print(subscribe(state, user, *routine)),
        MyCommand::Unsubscribe { routine } => print(unsubscribe(state, user, *routine)),
    }
}

fn run_user(state: &AppState, command: &UserCommand) -> Result<ExitCode> {
    match command {
        UserCommand::Register { name, email } => print(register_user(
            state,
            RegisterUserDto {
                name: name.clone(),
                email: email.clone(),
            },
        )),
        UserCommand::Get { id } => print(get_user(state, *id)),
        UserCommand::List => print(list_users(state)),
    }
}

fn current_user(cli: &Cli) -> Result<CurrentUser> {
    cli.user
        .map(CurrentUser::new)
        .ok_or_else(|| anyhow!("this command needs --user <ID> or ROUTINEHUB_USER_ID"))
}

fn database_ready(database_path: &Path) -> AckDto {
    AckDto::ok(format!("Database ready at {}", database_path.display()))
}

fn log_level(raw: &str) -> std::result::Result<LevelFilter, String> {
    parse_level(raw).ok_or_else(|| format!("unknown log level: {}", raw))
}

/// Print the result as JSON; errors exit with status 1
fn print<T: Serialize>(result: CommandResult<T>) -> Result<ExitCode> {
    match result {
        Ok(value) => {
            println!("{}", serde_json::to_string_pretty(&value)?);
            Ok(ExitCode::SUCCESS)
        }
        Err(error) => {
            println!("{}", serde_json::to_string_pretty(&error)?);
            Ok(ExitCode::FAILURE)
        }
    }
}

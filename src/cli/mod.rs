//! CLI argument parsing types.
//!
//! This module provides the command-line interface structure for the
//! `harvest` binary.

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};

use crate::models::{ClientParams, ExpenseParams, RoleParams, TaskParams};

/// Harvest API command-line interface.
#[derive(Parser, Debug)]
#[command(name = "harvest", about = "Harvest API CLI", version)]
pub struct Cli {
    /// Output results as JSON instead of a table.
    #[arg(long, global = true, default_value = "false")]
    pub json: bool,

    /// Log requests and responses to stderr.
    #[arg(short, long, global = true, default_value = "false")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Get a single entity by ID.
    Get {
        /// The type of entity to get.
        entity: Entity,

        /// The entity ID.
        id: u64,

        /// Owning user (required for cost rates).
        #[arg(long)]
        user: Option<u64>,
    },

    /// List entities with pagination.
    List {
        /// The type of entity to list.
        entity: Entity,

        /// Page number (1-indexed).
        #[arg(long)]
        page: Option<u32>,

        /// Number of items per page.
        #[arg(long)]
        per_page: Option<u32>,

        /// Filter by user (required for cost rates).
        #[arg(long)]
        user: Option<u64>,
    },

    /// Update an entity.
    Update {
        /// The type of entity to update.
        entity: Entity,

        /// The ID of the entity to update.
        id: u64,

        /// New name for the entity.
        #[arg(long)]
        name: Option<String>,

        /// Activate or archive the entity.
        #[arg(long)]
        active: Option<bool>,

        /// New notes (expenses only).
        #[arg(long)]
        notes: Option<String>,
    },

    /// Delete an entity.
    Delete {
        /// The type of entity to delete.
        entity: Entity,

        /// The ID of the entity to delete.
        id: u64,
    },

    /// Run a time or expense report.
    Report {
        /// Which report to run.
        kind: ReportKind,

        /// Grouping: clients, projects, tasks (time), categories (expenses) or team.
        #[arg(long, default_value = "clients")]
        group: String,

        /// First day of the range (YYYY-MM-DD).
        #[arg(long)]
        from: NaiveDate,

        /// Last day of the range (YYYY-MM-DD).
        #[arg(long)]
        to: NaiveDate,
    },
}

/// Entity types that can be operated on.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Entity {
    /// A client being billed for work.
    #[value(alias = "clients")]
    Client,
    /// A group of users.
    #[value(alias = "roles")]
    Role,
    /// A task time is tracked against.
    #[value(alias = "tasks")]
    Task,
    /// An expense recorded against a project.
    #[value(alias = "expenses")]
    Expense,
    /// A user's cost rate.
    #[value(alias = "cost-rates")]
    CostRate,
}

/// Report families.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReportKind {
    /// Tracked hours.
    Time,
    /// Recorded expenses.
    #[value(alias = "expense")]
    Expenses,
}

impl Entity {
    /// Name used on the command line.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Client => "client",
            Self::Role => "role",
            Self::Task => "task",
            Self::Expense => "expense",
            Self::CostRate => "cost-rate",
        }
    }
}

/// Update flags converted into the params for one entity.
#[derive(Debug, Clone)]
pub enum UpdateParams {
    Client(ClientParams),
    Role(RoleParams),
    Task(TaskParams),
    Expense(ExpenseParams),
}

/// Build the PATCH params for `entity` from the `update` flags.
///
/// # Errors
///
/// Fails when a flag does not apply to `entity`, when no flag was given, or
/// for entities the CLI cannot update.
pub fn update_params(
    entity: Entity,
    name: Option<String>,
    active: Option<bool>,
    notes: Option<String>,
) -> Result<UpdateParams, String> {
    let given = [
        ("--name", name.is_some()),
        ("--active", active.is_some()),
        ("--notes", notes.is_some()),
    ];

    match entity {
        Entity::Client => {
            check_flags(entity, &["--name", "--active"], &given)?;
            Ok(UpdateParams::Client(ClientParams {
                name,
                is_active: active,
                ..Default::default()
            }))
        }
        Entity::Role => {
            check_flags(entity, &["--name"], &given)?;
            Ok(UpdateParams::Role(RoleParams {
                name,
                ..Default::default()
            }))
        }
        Entity::Task => {
            check_flags(entity, &["--name", "--active"], &given)?;
            Ok(UpdateParams::Task(TaskParams {
                name,
                is_active: active,
                ..Default::default()
            }))
        }
        Entity::Expense => {
            check_flags(entity, &["--notes"], &given)?;
            Ok(UpdateParams::Expense(ExpenseParams {
                notes,
                ..Default::default()
            }))
        }
        Entity::CostRate => {
            Err("cost rates cannot be updated; create a new rate instead".to_string())
        }
    }
}

fn check_flags(entity: Entity, allowed: &[&str], given: &[(&str, bool)]) -> Result<(), String> {
    if let Some((flag, _)) = given
        .iter()
        .find(|(flag, set)| *set && !allowed.contains(flag))
    {
        return Err(format!(
            "{flag} does not apply to {}; use {}",
            entity.as_str(),
            allowed.join(" or ")
        ));
    }
    if !given.iter().any(|(_, set)| *set) {
        return Err(format!(
            "nothing to update; pass {} for {}",
            allowed.join(" or "),
            entity.as_str()
        ));
    }
    Ok(())
}

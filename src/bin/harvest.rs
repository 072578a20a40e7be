//! Harvest API CLI binary.
//!
//! A command-line interface for interacting with the Harvest API.

use clap::Parser;
use harvestapi::cli::{update_params, Cli, Command, Entity, ReportKind, UpdateParams};
use harvestapi::{
    expense_report, time_report, Client, ClientListQuery, CostRate, CostRateId, Delete, Expense,
    ExpenseListQuery, ExpenseReportGrouping, ExpenseReportQuery, ExpenseReportResult, Get,
    HarvestClient, HarvestError, List, NoFilter, Page, PrettyPrint, Role, Task, TaskListQuery,
    TimeReportGrouping, TimeReportQuery, TimeReportResult, Update, UserScope,
};
use serde::Serialize;
use std::process::ExitCode;
use tabled::{Table, Tabled};
use thiserror::Error;
use tracing::Level;

const DEFAULT_PER_PAGE: u32 = 20;

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Api(#[from] HarvestError),

    #[error("failed to render JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Usage(String),
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let client = match HarvestClient::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!("Hint: Set HARVEST_ACCESS_TOKEN and HARVEST_ACCOUNT_ID environment variables");
            return ExitCode::FAILURE;
        }
    };

    match run(&client, cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(client: &HarvestClient, cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::Get { entity, id, user } => handle_get(client, entity, id, user, cli.json).await,
        Command::List {
            entity,
            page,
            per_page,
            user,
        } => handle_list(client, entity, page, per_page, user, cli.json).await,
        Command::Update {
            entity,
            id,
            name,
            active,
            notes,
        } => handle_update(client, entity, id, name, active, notes, cli.json).await,
        Command::Delete { entity, id } => handle_delete(client, entity, id).await,
        Command::Report {
            kind,
            group,
            from,
            to,
        } => handle_report(client, kind, &group, from, to, cli.json).await,
    }
}

fn require_user(user: Option<u64>) -> Result<u64, CliError> {
    user.ok_or_else(|| CliError::Usage("--user is required for cost rates".to_string()))
}

async fn handle_get(
    client: &HarvestClient,
    entity: Entity,
    id: u64,
    user: Option<u64>,
    json: bool,
) -> Result<(), CliError> {
    match entity {
        Entity::Client => output_single(&Client::get(client, id).await?, json),
        Entity::Role => output_single(&Role::get(client, id).await?, json),
        Entity::Task => output_single(&Task::get(client, id).await?, json),
        Entity::Expense => output_single(&Expense::get(client, id).await?, json),
        Entity::CostRate => {
            let id = CostRateId {
                user_id: require_user(user)?,
                cost_rate_id: id,
            };
            output_single(&CostRate::get(client, id).await?, json)
        }
    }
}

async fn handle_list(
    client: &HarvestClient,
    entity: Entity,
    page: Option<u32>,
    per_page: Option<u32>,
    user: Option<u64>,
    json: bool,
) -> Result<(), CliError> {
    let page = page.unwrap_or(1);
    let per_page = per_page.unwrap_or(DEFAULT_PER_PAGE);

    match entity {
        Entity::Client => {
            let clients =
                Client::list_page(client, &ClientListQuery::default(), page, per_page).await?;
            output_page(&clients, json, |r| ClientRow::from(r))
        }
        Entity::Role => {
            let roles = Role::list_page(client, &NoFilter {}, page, per_page).await?;
            output_page(&roles, json, |r| RoleRow::from(r))
        }
        Entity::Task => {
            let tasks = Task::list_page(client, &TaskListQuery::default(), page, per_page).await?;
            output_page(&tasks, json, |r| TaskRow::from(r))
        }
        Entity::Expense => {
            let query = ExpenseListQuery {
                user_id: user,
                ..Default::default()
            };
            let expenses = Expense::list_page(client, &query, page, per_page).await?;
            output_page(&expenses, json, |r| ExpenseRow::from(r))
        }
        Entity::CostRate => {
            let scope = UserScope {
                user_id: require_user(user)?,
            };
            let rates = CostRate::list_page(client, &scope, page, per_page).await?;
            output_page(&rates, json, |r| CostRateRow::from(r))
        }
    }
}

async fn handle_update(
    client: &HarvestClient,
    entity: Entity,
    id: u64,
    name: Option<String>,
    active: Option<bool>,
    notes: Option<String>,
    json: bool,
) -> Result<(), CliError> {
    match update_params(entity, name, active, notes).map_err(CliError::Usage)? {
        UpdateParams::Client(params) => {
            output_single(&Client::update(client, id, params).await?, json)
        }
        UpdateParams::Role(params) => output_single(&Role::update(client, id, params).await?, json),
        UpdateParams::Task(params) => output_single(&Task::update(client, id, params).await?, json),
        UpdateParams::Expense(params) => {
            output_single(&Expense::update(client, id, params).await?, json)
        }
    }
}

async fn handle_delete(client: &HarvestClient, entity: Entity, id: u64) -> Result<(), CliError> {
    match entity {
        Entity::Client => Client::delete(client, id).await?,
        Entity::Role => Role::delete(client, id).await?,
        Entity::Task => Task::delete(client, id).await?,
        Entity::Expense => Expense::delete(client, id).await?,
        Entity::CostRate => {
            return Err(CliError::Usage("cost rates cannot be deleted".to_string()));
        }
    }
    eprintln!("Deleted {:?} {}", entity, id);
    Ok(())
}

async fn handle_report(
    client: &HarvestClient,
    kind: ReportKind,
    group: &str,
    from: chrono::NaiveDate,
    to: chrono::NaiveDate,
    json: bool,
) -> Result<(), CliError> {
    match kind {
        ReportKind::Time => {
            let grouping: TimeReportGrouping = group.parse().map_err(CliError::Usage)?;
            let query = TimeReportQuery {
                grouping,
                from,
                to,
                include_fixed_fee: None,
            };
            let rows = time_report(client, query).await?;
            output_rows(&rows, json, |r| TimeRow::from(r))
        }
        ReportKind::Expenses => {
            let grouping: ExpenseReportGrouping = group.parse().map_err(CliError::Usage)?;
            let query = ExpenseReportQuery { grouping, from, to };
            let rows = expense_report(client, query).await?;
            output_rows(&rows, json, |r| ExpenseTotalRow::from(r))
        }
    }
}

fn output_single<T: Serialize + PrettyPrint>(item: &T, json: bool) -> Result<(), CliError> {
    if json {
        println!("{}", serde_json::to_string_pretty(item)?);
    } else {
        println!("{}", item.pretty_print());
    }
    Ok(())
}

fn output_rows<T, R, F>(items: &[T], json: bool, to_row: F) -> Result<(), CliError>
where
    T: Serialize,
    R: Tabled,
    F: Fn(&T) -> R,
{
    if json {
        println!("{}", serde_json::to_string_pretty(items)?);
    } else {
        let rows: Vec<R> = items.iter().map(to_row).collect();
        println!("{}", Table::new(rows));
    }
    Ok(())
}

fn output_page<T, R, F>(page: &Page<T>, json: bool, to_row: F) -> Result<(), CliError>
where
    T: Serialize,
    R: Tabled,
    F: Fn(&T) -> R,
{
    output_rows(&page.items, json, to_row)?;
    if !json {
        println!(
            "\nPage {}/{} ({} total items)",
            page.page, page.total_pages, page.total_entries
        );
    }
    Ok(())
}

// Table row types for non-JSON output

#[derive(Tabled)]
struct ClientRow {
    id: u64,
    name: String,
    active: bool,
    currency: String,
}

impl From<&Client> for ClientRow {
    fn from(c: &Client) -> Self {
        Self {
            id: c.id,
            name: c.name.clone(),
            active: c.is_active,
            currency: c.currency.clone().unwrap_or_default(),
        }
    }
}

#[derive(Tabled)]
struct RoleRow {
    id: u64,
    name: String,
    users: usize,
}

impl From<&Role> for RoleRow {
    fn from(r: &Role) -> Self {
        Self {
            id: r.id,
            name: r.name.clone(),
            users: r.user_ids.len(),
        }
    }
}

#[derive(Tabled)]
struct TaskRow {
    id: u64,
    name: String,
    active: bool,
    billable: bool,
}

impl From<&Task> for TaskRow {
    fn from(t: &Task) -> Self {
        Self {
            id: t.id,
            name: t.name.clone(),
            active: t.is_active,
            billable: t.billable_by_default,
        }
    }
}

#[derive(Tabled)]
struct ExpenseRow {
    id: u64,
    date: String,
    project: String,
    category: String,
    total: String,
}

impl From<&Expense> for ExpenseRow {
    fn from(e: &Expense) -> Self {
        Self {
            id: e.id,
            date: e.spent_date.to_string(),
            project: e.project_name().unwrap_or_default().to_string(),
            category: e.category_name().unwrap_or_default().to_string(),
            total: format!("{:.2}", e.total_cost),
        }
    }
}

#[derive(Tabled)]
struct CostRateRow {
    id: u64,
    amount: String,
    start: String,
    end: String,
}

impl From<&CostRate> for CostRateRow {
    fn from(r: &CostRate) -> Self {
        Self {
            id: r.id,
            amount: format!("{:.2}", r.amount),
            start: r.start_date.map(|d| d.to_string()).unwrap_or_default(),
            end: r.end_date.map(|d| d.to_string()).unwrap_or_default(),
        }
    }
}

#[derive(Tabled)]
struct TimeRow {
    name: String,
    hours: String,
    billable_hours: String,
    billable_amount: String,
    currency: String,
}

impl From<&TimeReportResult> for TimeRow {
    fn from(r: &TimeReportResult) -> Self {
        Self {
            name: r.label().to_string(),
            hours: format!("{:.2}", r.total_hours),
            billable_hours: format!("{:.2}", r.billable_hours),
            billable_amount: format!("{:.2}", r.billable_amount),
            currency: r.currency.clone().unwrap_or_default(),
        }
    }
}

#[derive(Tabled)]
struct ExpenseTotalRow {
    name: String,
    total: String,
    billable: String,
    currency: String,
}

impl From<&ExpenseReportResult> for ExpenseTotalRow {
    fn from(r: &ExpenseReportResult) -> Self {
        Self {
            name: r.label().to_string(),
            total: format!("{:.2}", r.total_amount),
            billable: format!("{:.2}", r.billable_amount),
            currency: r.currency.clone().unwrap_or_default(),
        }
    }
}

//! Time and expense reports.
//!
//! Reports aggregate tracked hours or expenses over a date range, grouped by
//! client, project, task/category or team member. Both `from` and `to` are
//! required by the API.

use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::client::HarvestClient;
use crate::endpoint::Endpoint;
use crate::error::Result;
use crate::pagination::{Collection, Page, Paged};
use crate::request::{Method, PathParams, RequestOptions};
use crate::traits::List;

pub const TIME_REPORT: Endpoint<Paged<TimeReportQuery>, (), Page<TimeReportResult>> =
    Endpoint::json(
        Method::Get,
        "{+baseurl}/reports/time/{grouping}{?from,to,include_fixed_fee,page,per_page}",
    );
pub const EXPENSE_REPORT: Endpoint<Paged<ExpenseReportQuery>, (), Page<ExpenseReportResult>> =
    Endpoint::json(
        Method::Get,
        "{+baseurl}/reports/expenses/{grouping}{?from,to,page,per_page}",
    );

/// How time report rows are grouped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeReportGrouping {
    #[default]
    Clients,
    Projects,
    Tasks,
    Team,
}

impl TimeReportGrouping {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Clients => "clients",
            Self::Projects => "projects",
            Self::Tasks => "tasks",
            Self::Team => "team",
        }
    }
}

impl fmt::Display for TimeReportGrouping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeReportGrouping {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "clients" => Ok(Self::Clients),
            "projects" => Ok(Self::Projects),
            "tasks" => Ok(Self::Tasks),
            "team" => Ok(Self::Team),
            other => Err(format!(
                "unknown time report grouping '{other}' (expected clients, projects, tasks or team)"
            )),
        }
    }
}

/// How expense report rows are grouped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExpenseReportGrouping {
    #[default]
    Clients,
    Projects,
    Categories,
    Team,
}

impl ExpenseReportGrouping {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Clients => "clients",
            Self::Projects => "projects",
            Self::Categories => "categories",
            Self::Team => "team",
        }
    }
}

impl fmt::Display for ExpenseReportGrouping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExpenseReportGrouping {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "clients" => Ok(Self::Clients),
            "projects" => Ok(Self::Projects),
            "categories" => Ok(Self::Categories),
            "team" => Ok(Self::Team),
            other => Err(format!(
                "unknown expense report grouping '{other}' (expected clients, projects, categories or team)"
            )),
        }
    }
}

/// Query for a time report.
#[derive(Debug, Clone, Serialize)]
pub struct TimeReportQuery {
    /// Path segment selecting the grouping.
    #[serde(skip)]
    pub grouping: TimeReportGrouping,

    pub from: NaiveDate,

    pub to: NaiveDate,

    /// Include fixed-fee projects' amounts (Harvest defaults to `true`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_fixed_fee: Option<bool>,
}

/// Query for an expense report.
#[derive(Debug, Clone, Serialize)]
pub struct ExpenseReportQuery {
    #[serde(skip)]
    pub grouping: ExpenseReportGrouping,

    pub from: NaiveDate,

    pub to: NaiveDate,
}

/// One row of a time report.
///
/// Which identifying fields are set depends on the grouping.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeReportResult {
    #[serde(default)]
    pub client_id: Option<u64>,
    #[serde(default)]
    pub client_name: Option<String>,
    #[serde(default)]
    pub project_id: Option<u64>,
    #[serde(default)]
    pub project_name: Option<String>,
    #[serde(default)]
    pub task_id: Option<u64>,
    #[serde(default)]
    pub task_name: Option<String>,
    #[serde(default)]
    pub user_id: Option<u64>,
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub is_contractor: Option<bool>,

    pub total_hours: f64,

    #[serde(default)]
    pub billable_hours: f64,

    #[serde(default)]
    pub currency: Option<String>,

    #[serde(default)]
    pub billable_amount: f64,
}

impl TimeReportResult {
    /// Label of the grouped entity (client, project, task or user name).
    pub fn label(&self) -> &str {
        self.task_name
            .as_deref()
            .or(self.user_name.as_deref())
            .or(self.project_name.as_deref())
            .or(self.client_name.as_deref())
            .unwrap_or_default()
    }
}

impl Collection for TimeReportResult {
    const KEY: &'static str = "results";
}

/// One row of an expense report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpenseReportResult {
    #[serde(default)]
    pub client_id: Option<u64>,
    #[serde(default)]
    pub client_name: Option<String>,
    #[serde(default)]
    pub project_id: Option<u64>,
    #[serde(default)]
    pub project_name: Option<String>,
    #[serde(default)]
    pub expense_category_id: Option<u64>,
    #[serde(default)]
    pub expense_category_name: Option<String>,
    #[serde(default)]
    pub user_id: Option<u64>,
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub is_contractor: Option<bool>,

    pub total_amount: f64,

    #[serde(default)]
    pub billable_amount: f64,

    #[serde(default)]
    pub currency: Option<String>,
}

impl ExpenseReportResult {
    /// Label of the grouped entity.
    pub fn label(&self) -> &str {
        self.expense_category_name
            .as_deref()
            .or(self.user_name.as_deref())
            .or(self.project_name.as_deref())
            .or(self.client_name.as_deref())
            .unwrap_or_default()
    }
}

impl Collection for ExpenseReportResult {
    const KEY: &'static str = "results";
}

#[async_trait]
impl List for TimeReportResult {
    type Query = TimeReportQuery;

    #[tracing::instrument(skip(client))]
    async fn list_page(
        client: &HarvestClient,
        query: &Self::Query,
        page: u32,
        per_page: u32,
    ) -> Result<Page<Self>> {
        let path = PathParams::new().with("grouping", query.grouping);
        let params = Paged::new(query.clone(), page, per_page);
        client
            .call(&TIME_REPORT, &path, Some(&params), None, &RequestOptions::new())
            .await
    }
}

#[async_trait]
impl List for ExpenseReportResult {
    type Query = ExpenseReportQuery;

    #[tracing::instrument(skip(client))]
    async fn list_page(
        client: &HarvestClient,
        query: &Self::Query,
        page: u32,
        per_page: u32,
    ) -> Result<Page<Self>> {
        let path = PathParams::new().with("grouping", query.grouping);
        let params = Paged::new(query.clone(), page, per_page);
        client
            .call(&EXPENSE_REPORT, &path, Some(&params), None, &RequestOptions::new())
            .await
    }
}

/// Fetch every row of a time report.
///
/// # Example
///
/// ```ignore
/// use chrono::NaiveDate;
/// use harvestapi::{time_report, HarvestClient, TimeReportGrouping, TimeReportQuery};
///
/// let client = HarvestClient::from_env()?;
/// let rows = time_report(
///     &client,
///     TimeReportQuery {
///         grouping: TimeReportGrouping::Projects,
///         from: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
///         to: NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
///         include_fixed_fee: None,
///     },
/// ).await?;
/// ```
pub async fn time_report(
    client: &HarvestClient,
    query: TimeReportQuery,
) -> Result<Vec<TimeReportResult>> {
    TimeReportResult::list_all(client, &query).await
}

/// Fetch every row of an expense report.
pub async fn expense_report(
    client: &HarvestClient,
    query: ExpenseReportQuery,
) -> Result<Vec<ExpenseReportResult>> {
    ExpenseReportResult::list_all(client, &query).await
}

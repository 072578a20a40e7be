//! Expense model and trait implementations.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::client::HarvestClient;
use crate::endpoint::{Endpoint, NoContent};
use crate::error::Result;
use crate::pagination::{Collection, Page, Paged};
use crate::request::{Method, PathParams, RequestOptions};
use crate::traits::{Create, Delete, Get, List, Update};

pub const LIST_EXPENSES: Endpoint<Paged<ExpenseListQuery>, (), Page<Expense>> = Endpoint::json(
    Method::Get,
    "{+baseurl}/expenses{?user_id,client_id,project_id,is_billed,updated_since,from,to,page,per_page}",
);
pub const GET_EXPENSE: Endpoint<(), (), Expense> =
    Endpoint::json(Method::Get, "{+baseurl}/expenses/{expense_id}");
pub const CREATE_EXPENSE: Endpoint<(), ExpenseParams, Expense> =
    Endpoint::json(Method::Post, "{+baseurl}/expenses");
pub const UPDATE_EXPENSE: Endpoint<(), ExpenseParams, Expense> =
    Endpoint::json(Method::Patch, "{+baseurl}/expenses/{expense_id}");
pub const DELETE_EXPENSE: Endpoint<(), (), NoContent> =
    Endpoint::empty(Method::Delete, "{+baseurl}/expenses/{expense_id}");

/// An expense recorded against a project.
///
/// # Example
///
/// ```ignore
/// use chrono::NaiveDate;
/// use harvestapi::{HarvestClient, Expense, ExpenseListQuery, List};
///
/// let client = HarvestClient::from_env()?;
/// let query = ExpenseListQuery {
///     is_billed: Some(false),
///     from: NaiveDate::from_ymd_opt(2023, 4, 1),
///     to: NaiveDate::from_ymd_opt(2023, 4, 30),
///     ..Default::default()
/// };
/// let unbilled = Expense::list_all(&client, &query).await?;
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Expense {
    pub id: u64,

    #[serde(default)]
    pub notes: Option<String>,

    /// Total amount of the expense.
    #[serde(default)]
    pub total_cost: f64,

    /// Quantity of units, for unit-based expense categories.
    #[serde(default)]
    pub units: Option<f64>,

    /// Date the expense occurred.
    pub spent_date: NaiveDate,

    #[serde(default)]
    pub billable: bool,

    #[serde(default)]
    pub is_billed: bool,

    #[serde(default)]
    pub is_closed: bool,

    #[serde(default)]
    pub is_locked: bool,

    /// Why the expense is locked, if it is.
    #[serde(default)]
    pub locked_reason: Option<String>,

    #[serde(default)]
    pub receipt: Option<Receipt>,

    #[serde(default)]
    pub user: Option<NamedRef>,

    #[serde(default)]
    pub project: Option<ProjectRef>,

    #[serde(default)]
    pub expense_category: Option<ExpenseCategoryRef>,

    #[serde(default)]
    pub client: Option<ClientRef>,

    /// The invoice the expense was billed on.
    #[serde(default)]
    pub invoice: Option<InvoiceRef>,

    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Expense {
    /// Name of the project, if embedded.
    pub fn project_name(&self) -> Option<&str> {
        self.project.as_ref().map(|p| p.name.as_str())
    }

    /// Name of the expense category, if embedded.
    pub fn category_name(&self) -> Option<&str> {
        self.expense_category.as_ref().map(|c| c.name.as_str())
    }

    /// Whether the expense can still be edited.
    pub fn is_editable(&self) -> bool {
        !self.is_locked && !self.is_closed
    }
}

impl Collection for Expense {
    const KEY: &'static str = "expenses";
}

/// Receipt attached to an expense.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Receipt {
    pub url: String,
    #[serde(default)]
    pub file_name: Option<String>,
    #[serde(default)]
    pub file_size: Option<u64>,
    #[serde(default)]
    pub content_type: Option<String>,
}

/// A `{id, name}` reference to another resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedRef {
    pub id: u64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectRef {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub code: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpenseCategoryRef {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub unit_price: Option<f64>,
    #[serde(default)]
    pub unit_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientRef {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub currency: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceRef {
    pub id: u64,
    pub number: String,
}

/// Query parameters for listing expenses.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ExpenseListQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_id: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<u64>,

    /// Only return billed (`true`) or unbilled (`false`) expenses.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_billed: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_since: Option<DateTime<Utc>>,

    /// Only return expenses spent on or after this date.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<NaiveDate>,

    /// Only return expenses spent on or before this date.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<NaiveDate>,
}

/// Parameters for creating or updating an expense.
///
/// `project_id`, `expense_category_id` and `spent_date` are required when
/// creating.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ExpenseParams {
    /// Defaults to the authenticated user when omitted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub expense_category_id: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub spent_date: Option<NaiveDate>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub units: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_cost: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub billable: Option<bool>,
}

fn expense_path(id: u64) -> PathParams {
    PathParams::new().with("expense_id", id)
}

#[async_trait]
impl Get for Expense {
    type Id = u64;

    #[tracing::instrument(skip(client))]
    async fn get(client: &HarvestClient, id: u64) -> Result<Self> {
        client
            .call(&GET_EXPENSE, &expense_path(id), None, None, &RequestOptions::new())
            .await
    }
}

#[async_trait]
impl List for Expense {
    type Query = ExpenseListQuery;

    #[tracing::instrument(skip(client))]
    async fn list_page(
        client: &HarvestClient,
        query: &Self::Query,
        page: u32,
        per_page: u32,
    ) -> Result<Page<Self>> {
        let params = Paged::new(query.clone(), page, per_page);
        client
            .call(&LIST_EXPENSES, &PathParams::new(), Some(&params), None, &RequestOptions::new())
            .await
    }
}

#[async_trait]
impl Create for Expense {
    type Params = ExpenseParams;

    #[tracing::instrument(skip(client))]
    async fn create(client: &HarvestClient, params: Self::Params) -> Result<Self> {
        client
            .call(&CREATE_EXPENSE, &PathParams::new(), None, Some(&params), &RequestOptions::new())
            .await
    }
}

#[async_trait]
impl Update for Expense {
    type Id = u64;
    type Params = ExpenseParams;

    #[tracing::instrument(skip(client))]
    async fn update(client: &HarvestClient, id: u64, params: Self::Params) -> Result<Self> {
        client
            .call(&UPDATE_EXPENSE, &expense_path(id), None, Some(&params), &RequestOptions::new())
            .await
    }
}

#[async_trait]
impl Delete for Expense {
    type Id = u64;

    #[tracing::instrument(skip(client))]
    async fn delete(client: &HarvestClient, id: u64) -> Result<()> {
        client
            .call_empty(&DELETE_EXPENSE, &expense_path(id), None, None, &RequestOptions::new())
            .await
    }
}

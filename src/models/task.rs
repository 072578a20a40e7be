//! Task model and trait implementations.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::client::HarvestClient;
use crate::endpoint::{Endpoint, NoContent};
use crate::error::Result;
use crate::pagination::{Collection, Page, Paged};
use crate::request::{Method, PathParams, RequestOptions};
use crate::traits::{Create, Delete, Get, List, Update};

pub const LIST_TASKS: Endpoint<Paged<TaskListQuery>, (), Page<Task>> = Endpoint::json(
    Method::Get,
    "{+baseurl}/tasks{?is_active,updated_since,page,per_page}",
);
pub const GET_TASK: Endpoint<(), (), Task> =
    Endpoint::json(Method::Get, "{+baseurl}/tasks/{task_id}");
pub const CREATE_TASK: Endpoint<(), TaskParams, Task> =
    Endpoint::json(Method::Post, "{+baseurl}/tasks");
pub const UPDATE_TASK: Endpoint<(), TaskParams, Task> =
    Endpoint::json(Method::Patch, "{+baseurl}/tasks/{task_id}");
pub const DELETE_TASK: Endpoint<(), (), NoContent> =
    Endpoint::empty(Method::Delete, "{+baseurl}/tasks/{task_id}");

/// A task that time can be tracked against.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: u64,
    pub name: String,

    /// Whether new project assignments of this task default to billable.
    #[serde(default)]
    pub billable_by_default: bool,

    /// Default hourly rate for new project assignments.
    #[serde(default)]
    pub default_hourly_rate: Option<f64>,

    /// Whether the task is added to new projects automatically.
    #[serde(default)]
    pub is_default: bool,

    #[serde(default)]
    pub is_active: bool,

    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Collection for Task {
    const KEY: &'static str = "tasks";
}

/// Query parameters for listing tasks.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TaskListQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_since: Option<DateTime<Utc>>,
}

/// Parameters for creating or updating a task.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TaskParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub billable_by_default: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_hourly_rate: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_default: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

fn task_path(id: u64) -> PathParams {
    PathParams::new().with("task_id", id)
}

#[async_trait]
impl Get for Task {
    type Id = u64;

    #[tracing::instrument(skip(client))]
    async fn get(client: &HarvestClient, id: u64) -> Result<Self> {
        client
            .call(&GET_TASK, &task_path(id), None, None, &RequestOptions::new())
            .await
    }
}

#[async_trait]
impl List for Task {
    type Query = TaskListQuery;

    #[tracing::instrument(skip(client))]
    async fn list_page(
        client: &HarvestClient,
        query: &Self::Query,
        page: u32,
        per_page: u32,
    ) -> Result<Page<Self>> {
        let params = Paged::new(query.clone(), page, per_page);
        client
            .call(&LIST_TASKS, &PathParams::new(), Some(&params), None, &RequestOptions::new())
            .await
    }
}

#[async_trait]
impl Create for Task {
    type Params = TaskParams;

    #[tracing::instrument(skip(client))]
    async fn create(client: &HarvestClient, params: Self::Params) -> Result<Self> {
        client
            .call(&CREATE_TASK, &PathParams::new(), None, Some(&params), &RequestOptions::new())
            .await
    }
}

#[async_trait]
impl Update for Task {
    type Id = u64;
    type Params = TaskParams;

    #[tracing::instrument(skip(client))]
    async fn update(client: &HarvestClient, id: u64, params: Self::Params) -> Result<Self> {
        client
            .call(&UPDATE_TASK, &task_path(id), None, Some(&params), &RequestOptions::new())
            .await
    }
}

#[async_trait]
impl Delete for Task {
    type Id = u64;

    #[tracing::instrument(skip(client))]
    async fn delete(client: &HarvestClient, id: u64) -> Result<()> {
        client
            .call_empty(&DELETE_TASK, &task_path(id), None, None, &RequestOptions::new())
            .await
    }
}

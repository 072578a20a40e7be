//! Role model and trait implementations.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::client::HarvestClient;
use crate::endpoint::{Endpoint, NoContent};
use crate::error::Result;
use crate::pagination::{Collection, NoFilter, Page, Paged};
use crate::request::{Method, PathParams, RequestOptions};
use crate::traits::{Create, Delete, Get, List, Update};

pub const LIST_ROLES: Endpoint<Paged<NoFilter>, (), Page<Role>> =
    Endpoint::json(Method::Get, "{+baseurl}/roles{?page,per_page}");
pub const GET_ROLE: Endpoint<(), (), Role> =
    Endpoint::json(Method::Get, "{+baseurl}/roles/{role_id}");
pub const CREATE_ROLE: Endpoint<(), RoleParams, Role> =
    Endpoint::json(Method::Post, "{+baseurl}/roles");
pub const UPDATE_ROLE: Endpoint<(), RoleParams, Role> =
    Endpoint::json(Method::Patch, "{+baseurl}/roles/{role_id}");
pub const DELETE_ROLE: Endpoint<(), (), NoContent> =
    Endpoint::empty(Method::Delete, "{+baseurl}/roles/{role_id}");

/// A role groups users, e.g. by department or job title.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Role {
    pub id: u64,
    pub name: String,

    /// IDs of the users assigned to this role.
    #[serde(default)]
    pub user_ids: Vec<u64>,

    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Collection for Role {
    const KEY: &'static str = "roles";
}

/// Parameters for creating or updating a role.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RoleParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Replaces the full list of assigned users.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_ids: Option<Vec<u64>>,
}

fn role_path(id: u64) -> PathParams {
    PathParams::new().with("role_id", id)
}

#[async_trait]
impl Get for Role {
    type Id = u64;

    #[tracing::instrument(skip(client))]
    async fn get(client: &HarvestClient, id: u64) -> Result<Self> {
        client
            .call(&GET_ROLE, &role_path(id), None, None, &RequestOptions::new())
            .await
    }
}

#[async_trait]
impl List for Role {
    type Query = NoFilter;

    #[tracing::instrument(skip(client))]
    async fn list_page(
        client: &HarvestClient,
        query: &Self::Query,
        page: u32,
        per_page: u32,
    ) -> Result<Page<Self>> {
        let params = Paged::new(*query, page, per_page);
        client
            .call(&LIST_ROLES, &PathParams::new(), Some(&params), None, &RequestOptions::new())
            .await
    }
}

#[async_trait]
impl Create for Role {
    type Params = RoleParams;

    #[tracing::instrument(skip(client))]
    async fn create(client: &HarvestClient, params: Self::Params) -> Result<Self> {
        client
            .call(&CREATE_ROLE, &PathParams::new(), None, Some(&params), &RequestOptions::new())
            .await
    }
}

#[async_trait]
impl Update for Role {
    type Id = u64;
    type Params = RoleParams;

    #[tracing::instrument(skip(client))]
    async fn update(client: &HarvestClient, id: u64, params: Self::Params) -> Result<Self> {
        client
            .call(&UPDATE_ROLE, &role_path(id), None, Some(&params), &RequestOptions::new())
            .await
    }
}

#[async_trait]
impl Delete for Role {
    type Id = u64;

    #[tracing::instrument(skip(client))]
    async fn delete(client: &HarvestClient, id: u64) -> Result<()> {
        client
            .call_empty(&DELETE_ROLE, &role_path(id), None, None, &RequestOptions::new())
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_deserialize() {
        let json = r#"{
            "id": 617670,
            "name": "Designer",
            "user_ids": [1782959, 1782884],
            "created_at": "2017-06-26T22:34:41Z",
            "updated_at": "2017-06-26T22:34:52Z"
        }"#;

        let role: Role = serde_json::from_str(json).unwrap();
        assert_eq!(role.id, 617670);
        assert_eq!(role.user_ids, vec![1782959, 1782884]);
    }

    #[test]
    fn test_role_without_users() {
        let role: Role = serde_json::from_str(r#"{"id": 1, "name": "Empty"}"#).unwrap();
        assert!(role.user_ids.is_empty());
        assert!(role.created_at.is_none());
    }
}

//! Client model and trait implementations.
//!
//! A Harvest client is a customer the account tracks time and expenses for.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::client::HarvestClient;
use crate::endpoint::{Endpoint, NoContent};
use crate::error::Result;
use crate::pagination::{Collection, Page, Paged};
use crate::request::{Method, PathParams, RequestOptions};
use crate::traits::{Create, Delete, Get, List, Update};

pub const LIST_CLIENTS: Endpoint<Paged<ClientListQuery>, (), Page<Client>> = Endpoint::json(
    Method::Get,
    "{+baseurl}/clients{?is_active,updated_since,page,per_page}",
);
pub const GET_CLIENT: Endpoint<(), (), Client> =
    Endpoint::json(Method::Get, "{+baseurl}/clients/{client_id}");
pub const CREATE_CLIENT: Endpoint<(), ClientParams, Client> =
    Endpoint::json(Method::Post, "{+baseurl}/clients");
pub const UPDATE_CLIENT: Endpoint<(), ClientParams, Client> =
    Endpoint::json(Method::Patch, "{+baseurl}/clients/{client_id}");
pub const DELETE_CLIENT: Endpoint<(), (), NoContent> =
    Endpoint::empty(Method::Delete, "{+baseurl}/clients/{client_id}");

/// A Harvest client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Client {
    /// Unique ID for the client.
    pub id: u64,

    /// A textual description of the client.
    pub name: String,

    /// Whether the client is active or archived.
    #[serde(default)]
    pub is_active: bool,

    /// The physical address for the client.
    #[serde(default)]
    pub address: Option<String>,

    /// Used to build a URL to the client's statement.
    #[serde(default)]
    pub statement_key: Option<String>,

    /// ISO 4217 currency code used by the client's invoices and estimates.
    #[serde(default)]
    pub currency: Option<String>,

    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Collection for Client {
    const KEY: &'static str = "clients";
}

/// Query parameters for listing clients.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ClientListQuery {
    /// Only return active (`true`) or archived (`false`) clients.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,

    /// Only return clients updated since this instant.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_since: Option<DateTime<Utc>>,
}

/// Parameters for creating or updating a client.
///
/// `name` is required when creating.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ClientParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
}

fn client_path(id: u64) -> PathParams {
    PathParams::new().with("client_id", id)
}

#[async_trait]
impl Get for Client {
    type Id = u64;

    #[tracing::instrument(skip(client))]
    async fn get(client: &HarvestClient, id: u64) -> Result<Self> {
        client
            .call(&GET_CLIENT, &client_path(id), None, None, &RequestOptions::new())
            .await
    }
}

#[async_trait]
impl List for Client {
    type Query = ClientListQuery;

    #[tracing::instrument(skip(client))]
    async fn list_page(
        client: &HarvestClient,
        query: &Self::Query,
        page: u32,
        per_page: u32,
    ) -> Result<Page<Self>> {
        let params = Paged::new(query.clone(), page, per_page);
        client
            .call(&LIST_CLIENTS, &PathParams::new(), Some(&params), None, &RequestOptions::new())
            .await
    }
}

#[async_trait]
impl Create for Client {
    type Params = ClientParams;

    #[tracing::instrument(skip(client))]
    async fn create(client: &HarvestClient, params: Self::Params) -> Result<Self> {
        client
            .call(&CREATE_CLIENT, &PathParams::new(), None, Some(&params), &RequestOptions::new())
            .await
    }
}

#[async_trait]
impl Update for Client {
    type Id = u64;
    type Params = ClientParams;

    #[tracing::instrument(skip(client))]
    async fn update(client: &HarvestClient, id: u64, params: Self::Params) -> Result<Self> {
        client
            .call(&UPDATE_CLIENT, &client_path(id), None, Some(&params), &RequestOptions::new())
            .await
    }
}

#[async_trait]
impl Delete for Client {
    type Id = u64;

    #[tracing::instrument(skip(client))]
    async fn delete(client: &HarvestClient, id: u64) -> Result<()> {
        client
            .call_empty(&DELETE_CLIENT, &client_path(id), None, None, &RequestOptions::new())
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_deserialize() {
        let json = r#"{
            "id": 5735776,
            "name": "123 Industries",
            "is_active": true,
            "address": "123 Main St.\r\nAnytown, LA 71223",
            "statement_key": "0a39d3e33c8058cf7c3f8097d854c64e",
            "created_at": "2017-06-26T21:02:12Z",
            "updated_at": "2017-06-26T21:34:11Z",
            "currency": "EUR"
        }"#;

        let client: Client = serde_json::from_str(json).expect("Failed to deserialize client");
        assert_eq!(client.id, 5735776);
        assert_eq!(client.name, "123 Industries");
        assert!(client.is_active);
        assert_eq!(client.currency.as_deref(), Some("EUR"));
        assert!(client.created_at.is_some());
    }

    #[test]
    fn test_client_list_query_default() {
        let serialized = serde_qs::to_string(&ClientListQuery::default()).unwrap();
        assert!(serialized.is_empty());
    }

    #[test]
    fn test_client_params_skip_unset() {
        let params = ClientParams {
            name: Some("Acme".to_string()),
            ..Default::default()
        };
        assert_eq!(serde_json::to_value(&params).unwrap(), serde_json::json!({"name": "Acme"}));
    }

    #[test]
    fn test_list_clients_url() {
        let request = LIST_CLIENTS
            .request(
                &PathParams::new().with("baseurl", "https://api.harvestapp.com/v2"),
                Some(&Paged::new(
                    ClientListQuery {
                        is_active: Some(true),
                        ..Default::default()
                    },
                    1,
                    100,
                )),
                None,
                &RequestOptions::new(),
            )
            .unwrap();

        assert_eq!(
            request.url().as_str(),
            "https://api.harvestapp.com/v2/clients?is_active=true&page=1&per_page=100"
        );
    }
}

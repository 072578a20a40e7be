//! User cost rate model and trait implementations.
//!
//! Cost rates are nested under a user: every operation needs the user ID.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::client::HarvestClient;
use crate::endpoint::Endpoint;
use crate::error::Result;
use crate::pagination::{Collection, NoFilter, Page, Paged};
use crate::request::{Method, PathParams, RequestOptions};
use crate::traits::{Create, Get, List};

pub const LIST_COST_RATES: Endpoint<Paged<NoFilter>, (), Page<CostRate>> =
    Endpoint::json(Method::Get, "{+baseurl}/users/{user_id}/cost_rates{?page,per_page}");
pub const GET_COST_RATE: Endpoint<(), (), CostRate> =
    Endpoint::json(Method::Get, "{+baseurl}/users/{user_id}/cost_rates/{cost_rate_id}");
pub const CREATE_COST_RATE: Endpoint<(), CostRateParams, CostRate> =
    Endpoint::json(Method::Post, "{+baseurl}/users/{user_id}/cost_rates");

/// The cost of a user's time over a date range.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CostRate {
    pub id: u64,

    /// Hourly cost in the account currency.
    pub amount: f64,

    /// First day the rate applies; `None` for the initial rate.
    #[serde(default)]
    pub start_date: Option<NaiveDate>,

    /// Last day the rate applies; `None` for the current rate.
    #[serde(default)]
    pub end_date: Option<NaiveDate>,

    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl CostRate {
    /// Whether this is the rate currently in effect.
    pub fn is_current(&self) -> bool {
        self.end_date.is_none()
    }
}

impl Collection for CostRate {
    const KEY: &'static str = "cost_rates";
}

/// Identifies a single cost rate of a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CostRateId {
    pub user_id: u64,
    pub cost_rate_id: u64,
}

/// Scope for listing cost rates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserScope {
    pub user_id: u64,
}

/// Parameters for creating a cost rate.
///
/// Creating a rate ends the user's current one the day before `start_date`.
#[derive(Debug, Clone, Serialize)]
pub struct CostRateParams {
    /// The user the rate belongs to (path parameter, not sent in the body).
    #[serde(skip)]
    pub user_id: u64,

    pub amount: f64,

    /// Defaults to today when omitted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
}

#[async_trait]
impl Get for CostRate {
    type Id = CostRateId;

    #[tracing::instrument(skip(client))]
    async fn get(client: &HarvestClient, id: CostRateId) -> Result<Self> {
        let path = PathParams::new()
            .with("user_id", id.user_id)
            .with("cost_rate_id", id.cost_rate_id);
        client
            .call(&GET_COST_RATE, &path, None, None, &RequestOptions::new())
            .await
    }
}

#[async_trait]
impl List for CostRate {
    type Query = UserScope;

    #[tracing::instrument(skip(client))]
    async fn list_page(
        client: &HarvestClient,
        query: &Self::Query,
        page: u32,
        per_page: u32,
    ) -> Result<Page<Self>> {
        let path = PathParams::new().with("user_id", query.user_id);
        let params = Paged::new(NoFilter {}, page, per_page);
        client
            .call(&LIST_COST_RATES, &path, Some(&params), None, &RequestOptions::new())
            .await
    }
}

#[async_trait]
impl Create for CostRate {
    type Params = CostRateParams;

    #[tracing::instrument(skip(client))]
    async fn create(client: &HarvestClient, params: Self::Params) -> Result<Self> {
        let path = PathParams::new().with("user_id", params.user_id);
        client
            .call(&CREATE_COST_RATE, &path, None, Some(&params), &RequestOptions::new())
            .await
    }
}

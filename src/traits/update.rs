//! Partial updates.

use async_trait::async_trait;

use crate::client::HarvestClient;
use crate::error::Result;

/// `PATCH` a Harvest resource.
///
/// Only the fields set in `Params` go into the request body, so everything
/// left as `None` keeps its current value on the server.
///
/// ```ignore
/// use harvestapi::{HarvestClient, Task, TaskParams, Update};
///
/// let client = HarvestClient::from_env()?;
/// let task = Task::update(
///     &client,
///     8083800,
///     TaskParams {
///         default_hourly_rate: Some(120.0),
///         ..Default::default()
///     },
/// ).await?;
/// ```
#[async_trait]
pub trait Update: Sized {
    type Id: Send;

    /// Body fields; unset fields are omitted.
    type Params: Send;

    /// Returns the resource as Harvest stored it after the change.
    ///
    /// # Errors
    ///
    /// A 404 for an unknown ID and a 422 for rejected values both surface as
    /// [`HarvestError::HttpStatus`](crate::HarvestError::HttpStatus).
    async fn update(client: &HarvestClient, id: Self::Id, params: Self::Params) -> Result<Self>;
}

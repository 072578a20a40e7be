//! Single-resource lookups.

use async_trait::async_trait;

use crate::client::HarvestClient;
use crate::error::Result;

/// `GET` one Harvest resource by its ID.
///
/// Nested resources use a composite ID, e.g. [`CostRateId`](crate::CostRateId)
/// carries the owning user as well as the rate.
///
/// ```ignore
/// use harvestapi::{Client, Get, HarvestClient};
///
/// let client = HarvestClient::from_env()?;
/// let acme = Client::get(&client, 5735776).await?;
/// ```
#[async_trait]
pub trait Get: Sized {
    type Id: Send;

    /// An unknown ID comes back as [`HarvestError::HttpStatus`] with status 404.
    ///
    /// [`HarvestError::HttpStatus`]: crate::HarvestError::HttpStatus
    async fn get(client: &HarvestClient, id: Self::Id) -> Result<Self>;
}

//! Create trait for adding entities.

use async_trait::async_trait;

use crate::client::HarvestClient;
use crate::error::Result;

/// Create a new entity.
///
/// # Example
///
/// ```ignore
/// use harvestapi::{HarvestClient, Role, RoleParams, Create};
///
/// let client = HarvestClient::from_env()?;
/// let role = Role::create(
///     &client,
///     RoleParams {
///         name: Some("Designer".to_string()),
///         ..Default::default()
///     },
/// ).await?;
/// ```
#[async_trait]
pub trait Create: Sized {
    /// Parameters sent as the JSON body.
    type Params: Send;

    /// Create the entity and return it as stored by Harvest.
    ///
    /// # Errors
    ///
    /// Returns an error if Harvest rejects the parameters or the request fails.
    async fn create(client: &HarvestClient, params: Self::Params) -> Result<Self>;
}

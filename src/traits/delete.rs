//! Delete trait for removing entities.

use async_trait::async_trait;

use crate::client::HarvestClient;
use crate::error::Result;

/// Delete an entity.
///
/// Harvest answers a successful delete with `200 OK` and no meaningful body.
#[async_trait]
pub trait Delete {
    /// The ID type for this entity.
    type Id: Send;

    /// Delete the entity.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found, cannot be deleted
    /// (e.g. it has associated time entries), or the request fails.
    async fn delete(client: &HarvestClient, id: Self::Id) -> Result<()>;
}

//! List trait for fetching collections of entities.

use async_trait::async_trait;

use crate::client::HarvestClient;
use crate::error::Result;
use crate::pagination::{Collection, Page};

/// Default page size for list operations.
pub const DEFAULT_PAGE_SIZE: u32 = 100;

/// Maximum pages to fetch (safety limit).
const MAX_PAGES: u32 = 1000;

/// List/filter entities with pagination support.
///
/// Implement this trait for entity types that can be listed with
/// optional filtering and pagination.
///
/// # Example
///
/// ```ignore
/// use harvestapi::{HarvestClient, Client, ClientListQuery, List};
///
/// let client = HarvestClient::from_env()?;
///
/// // Fetch a single page
/// let page = Client::list_page(&client, &ClientListQuery::default(), 1, 50).await?;
///
/// // Fetch all pages
/// let all_clients = Client::list_all(&client, &ClientListQuery::default()).await?;
/// ```
#[async_trait]
pub trait List: Collection + Send {
    /// Query parameters for filtering.
    type Query: Send + Sync;

    /// List entities matching the query (single page).
    ///
    /// # Arguments
    ///
    /// * `client` - The Harvest API client
    /// * `query` - Query parameters for filtering
    /// * `page` - Page number (1-indexed)
    /// * `per_page` - Number of items per page (1-2000)
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    async fn list_page(
        client: &HarvestClient,
        query: &Self::Query,
        page: u32,
        per_page: u32,
    ) -> Result<Page<Self>>;

    /// List all entities matching the query (fetches all pages).
    ///
    /// Follows `next_page` until the server reports no further page.
    ///
    /// # Errors
    ///
    /// Returns an error if any page request fails.
    async fn list_all(client: &HarvestClient, query: &Self::Query) -> Result<Vec<Self>> {
        let mut all_items = Vec::new();
        let mut page = 1;

        loop {
            let result = Self::list_page(client, query, page, DEFAULT_PAGE_SIZE).await?;
            all_items.extend(result.items);

            match result.next_page {
                Some(next) if next > page => page = next,
                _ => break,
            }

            if page > MAX_PAGES {
                tracing::warn!(
                    "Reached pagination limit of {} pages, stopping",
                    MAX_PAGES
                );
                break;
            }
        }

        Ok(all_items)
    }
}

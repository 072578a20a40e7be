//! Harvest API client library.
//!
//! A Rust library for the Harvest v2 REST API. Every API operation is a
//! typed [`Endpoint`]: an HTTP method plus a URL template, with the query,
//! body and response types carried in the type. Entity types implement the
//! [`Get`], [`List`], [`Create`], [`Update`] and [`Delete`] traits on top of
//! those endpoints.
//!
//! # Quick Start
//!
//! ```no_run
//! use harvestapi::{Client, ClientListQuery, Get, HarvestClient, List, Role};
//!
//! #[tokio::main]
//! async fn main() -> harvestapi::Result<()> {
//!     // Create client from environment variables
//!     let client = HarvestClient::from_env()?;
//!
//!     // Get a role by ID
//!     let role = Role::get(&client, 617670).await?;
//!     println!("Role: {}", role.name);
//!
//!     // List all active clients
//!     let query = ClientListQuery {
//!         is_active: Some(true),
//!         ..Default::default()
//!     };
//!     let clients = Client::list_all(&client, &query).await?;
//!     println!("Found {} clients", clients.len());
//!
//!     Ok(())
//! }
//! ```
//!
//! # Lower-level access
//!
//! An endpoint can be turned into a [`RequestDescriptor`] without sending
//! anything, which is useful for inspecting the exact URL and headers:
//!
//! ```
//! use harvestapi::{NoFilter, Paged, PathParams, RequestOptions, LIST_ROLES};
//!
//! let request = LIST_ROLES
//!     .request(
//!         &PathParams::new().with("baseurl", "https://api.harvestapp.com/v2"),
//!         Some(&Paged::new(NoFilter {}, 2, 100)),
//!         None,
//!         &RequestOptions::new(),
//!     )
//!     .unwrap();
//! assert_eq!(
//!     request.url().as_str(),
//!     "https://api.harvestapp.com/v2/roles?page=2&per_page=100"
//! );
//! ```
//!
//! # Configuration
//!
//! The client reads configuration from environment variables:
//!
//! - `HARVEST_ACCESS_TOKEN` (required) - Personal access token
//! - `HARVEST_ACCOUNT_ID` (required) - Account the token operates on
//! - `HARVEST_API_URL` (optional) - Base URL (defaults to `https://api.harvestapp.com/v2`)

pub mod cli;
mod client;
mod endpoint;
mod error;
mod models;
mod output;
mod pagination;
pub mod query;
mod request;
mod template;
mod traits;
mod transport;

// Re-export core types
pub use client::HarvestClient;
pub use endpoint::{Endpoint, NoContent};
pub use error::{BoxError, HarvestError, Result};
pub use pagination::{Collection, NoFilter, Page, Paged, PaginationLinks, PaginationParams};
pub use request::{
    Method, PathParams, RequestDescriptor, RequestOptions, ResponseKind, Route, USER_AGENT,
};
pub use template::UrlTemplate;
pub use transport::{ReqwestTransport, Transport, TransportResponse};

// Re-export traits
pub use output::PrettyPrint;
pub use traits::{Create, Delete, Get, List, Update, DEFAULT_PAGE_SIZE};

// Re-export models and their endpoints
pub use models::*;

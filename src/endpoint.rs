//! Typed endpoint declarations.
//!
//! An [`Endpoint`] ties a [`Route`] to the query, body and response types it
//! accepts, so every resource shares one request builder while keeping
//! per-endpoint type checking.
//!
//! ```
//! use harvestapi::{Endpoint, Method, PaginationParams, PathParams, RequestOptions, Role, Page};
//!
//! const LIST_ROLES: Endpoint<PaginationParams, (), Page<Role>> =
//!     Endpoint::json(Method::Get, "{+baseurl}/roles{?page,per_page}");
//!
//! let request = LIST_ROLES
//!     .request(
//!         &PathParams::new().with("baseurl", "https://api.harvestapp.com/v2"),
//!         Some(&PaginationParams::for_page(2, 100)),
//!         None,
//!         &RequestOptions::new(),
//!     )
//!     .unwrap();
//! assert_eq!(
//!     request.url().as_str(),
//!     "https://api.harvestapp.com/v2/roles?page=2&per_page=100"
//! );
//! ```

use std::marker::PhantomData;

use serde::Serialize;

use crate::error::Result;
use crate::request::{Method, PathParams, RequestDescriptor, RequestOptions, ResponseKind, Route};

/// Response marker for endpoints that return no body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoContent;

/// An API operation: a route plus its query (`Q`), body (`B`) and
/// response (`R`) types. Use `()` for an unused query or body.
pub struct Endpoint<Q, B, R> {
    route: Route,
    _types: PhantomData<fn(&Q, &B) -> R>,
}

impl<Q, B, R> Endpoint<Q, B, R> {
    /// Endpoint whose response body is JSON deserialized into `R`.
    pub const fn json(method: Method, template: &'static str) -> Self {
        Self {
            route: Route {
                method,
                template,
                response: ResponseKind::Json,
            },
            _types: PhantomData,
        }
    }

    pub fn route(&self) -> &Route {
        &self.route
    }
}

impl<Q, B> Endpoint<Q, B, NoContent> {
    /// Endpoint whose response body is ignored.
    pub const fn empty(method: Method, template: &'static str) -> Self {
        Self {
            route: Route {
                method,
                template,
                response: ResponseKind::Empty,
            },
            _types: PhantomData,
        }
    }
}

impl<Q: Serialize, B: Serialize, R> Endpoint<Q, B, R> {
    /// Build the request descriptor for this endpoint.
    ///
    /// # Errors
    ///
    /// See [`RequestDescriptor::build`].
    pub fn request(
        &self,
        path: &PathParams,
        query: Option<&Q>,
        body: Option<&B>,
        options: &RequestOptions,
    ) -> Result<RequestDescriptor> {
        RequestDescriptor::build(&self.route, path, query, body, options)
    }
}

impl<Q, B, R> Clone for Endpoint<Q, B, R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<Q, B, R> Copy for Endpoint<Q, B, R> {}

impl<Q, B, R> std::fmt::Debug for Endpoint<Q, B, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Endpoint").field("route", &self.route).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DELETE_ROLE: Endpoint<(), (), NoContent> =
        Endpoint::empty(Method::Delete, "{+baseurl}/roles/{role_id}");

    #[test]
    fn test_empty_endpoint_route() {
        assert_eq!(DELETE_ROLE.route().response, ResponseKind::Empty);
        assert_eq!(DELETE_ROLE.route().method, Method::Delete);
    }

    #[test]
    fn test_endpoint_builds_request() {
        let request = DELETE_ROLE
            .request(
                &PathParams::new()
                    .with("baseurl", "https://api.harvestapp.com/v2")
                    .with("role_id", 7),
                None,
                None,
                &RequestOptions::new(),
            )
            .unwrap();
        assert_eq!(request.url().as_str(), "https://api.harvestapp.com/v2/roles/7");
        assert_eq!(request.method(), Method::Delete);
    }
}

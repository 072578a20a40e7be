//! Harvest API client.
//!
//! Sends [`RequestDescriptor`]s through a [`Transport`] and interprets the
//! responses. Higher-level operations are implemented via traits on entity
//! types.

use std::env;
use std::sync::Arc;

use futures::future::{AbortRegistration, Abortable};
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use crate::endpoint::{Endpoint, NoContent};
use crate::error::{HarvestError, Result};
use crate::request::{PathParams, RequestDescriptor, RequestOptions};
use crate::transport::{ReqwestTransport, Transport, TransportResponse};

const DEFAULT_API_URL: &str = "https://api.harvestapp.com/v2";

/// Harvest API client.
///
/// Handles configuration and response interpretation. Entity-specific
/// operations are implemented via the `Get`, `List`, `Create`, `Update` and
/// `Delete` traits on model types.
///
/// This struct is cheaply cloneable; clones share the same transport and
/// connection pool.
///
/// # Example
///
/// ```no_run
/// use harvestapi::HarvestClient;
///
/// # fn example() -> harvestapi::Result<()> {
/// // Create from environment variables
/// let client = HarvestClient::from_env()?;
///
/// // Or configure manually
/// let client = HarvestClient::new("your-token", "123456", "https://api.harvestapp.com/v2")?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct HarvestClient {
    transport: Arc<dyn Transport>,
    base_url: Arc<str>,
}

impl std::fmt::Debug for HarvestClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HarvestClient")
            .field("base_url", &self.base_url)
            .field("transport", &self.transport)
            .finish()
    }
}

impl HarvestClient {
    /// Create a client from environment variables.
    ///
    /// Uses `HARVEST_ACCESS_TOKEN` and `HARVEST_ACCOUNT_ID` for
    /// authentication and optionally `HARVEST_API_URL` for the base URL
    /// (defaults to `https://api.harvestapp.com/v2`).
    ///
    /// # Errors
    ///
    /// Returns an error if a required variable is not set.
    pub fn from_env() -> Result<Self> {
        let token = required_var("HARVEST_ACCESS_TOKEN")?;
        let account_id = required_var("HARVEST_ACCOUNT_ID")?;
        let base_url =
            env::var("HARVEST_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        Self::new(&token, &account_id, &base_url)
    }

    /// Create a new client with the provided credentials and base URL.
    ///
    /// # Arguments
    ///
    /// * `token` - Harvest personal access token
    /// * `account_id` - Harvest account ID
    /// * `base_url` - Base URL for the API (e.g., `https://api.harvestapp.com/v2`)
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid.
    pub fn new(token: &str, account_id: &str, base_url: &str) -> Result<Self> {
        let transport = ReqwestTransport::new(token, account_id)?;
        Self::with_transport(Arc::new(transport), base_url)
    }

    /// Create a client that sends requests through a custom transport.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is not an absolute URL.
    pub fn with_transport(transport: Arc<dyn Transport>, base_url: &str) -> Result<Self> {
        let base_url = base_url.trim_end_matches('/');
        Url::parse(base_url)?;

        Ok(Self {
            transport,
            base_url: Arc::from(base_url),
        })
    }

    /// Get the base URL, without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Path parameters pre-filled with `baseurl`.
    pub fn path_params(&self) -> PathParams {
        PathParams::new().with("baseurl", &*self.base_url)
    }

    /// Build and send a request for `endpoint`, deserializing the response.
    ///
    /// `path` is merged over [`HarvestClient::path_params`].
    ///
    /// # Errors
    ///
    /// Configuration errors are returned before any I/O; otherwise see
    /// [`HarvestClient::send`].
    pub async fn call<Q, B, R>(
        &self,
        endpoint: &Endpoint<Q, B, R>,
        path: &PathParams,
        query: Option<&Q>,
        body: Option<&B>,
        options: &RequestOptions,
    ) -> Result<R>
    where
        Q: Serialize,
        B: Serialize,
        R: DeserializeOwned,
    {
        let request = endpoint.request(&self.merged(path), query, body, options)?;
        self.send(&request).await
    }

    /// Build and send a request for an endpoint that returns no body.
    ///
    /// # Errors
    ///
    /// See [`HarvestClient::call`].
    pub async fn call_empty<Q, B>(
        &self,
        endpoint: &Endpoint<Q, B, NoContent>,
        path: &PathParams,
        query: Option<&Q>,
        body: Option<&B>,
        options: &RequestOptions,
    ) -> Result<()>
    where
        Q: Serialize,
        B: Serialize,
    {
        let request = endpoint.request(&self.merged(path), query, body, options)?;
        self.send_empty(&request).await
    }

    /// Send a request and deserialize the JSON response into `T`.
    ///
    /// # Errors
    ///
    /// - [`HarvestError::Transport`] if the server cannot be reached
    /// - [`HarvestError::HttpStatus`] for a non-2xx status
    /// - [`HarvestError::Deserialization`] if the body does not match `T`
    #[tracing::instrument(skip_all, fields(method = %request.method(), url = %request.url()))]
    pub async fn send<T: DeserializeOwned>(&self, request: &RequestDescriptor) -> Result<T> {
        let response = self.execute(request, None).await?;
        parse_body(response)
    }

    /// Send a request, ignoring any response body.
    ///
    /// # Errors
    ///
    /// See [`HarvestClient::send`].
    #[tracing::instrument(skip_all, fields(method = %request.method(), url = %request.url()))]
    pub async fn send_empty(&self, request: &RequestDescriptor) -> Result<()> {
        self.execute(request, None).await.map(drop)
    }

    /// Like [`HarvestClient::send`], aborting when the matching
    /// [`AbortHandle`](futures::future::AbortHandle) fires.
    ///
    /// # Errors
    ///
    /// Returns [`HarvestError::Cancelled`] if aborted before completion.
    #[tracing::instrument(skip_all, fields(method = %request.method(), url = %request.url()))]
    pub async fn send_cancellable<T: DeserializeOwned>(
        &self,
        request: &RequestDescriptor,
        cancel: AbortRegistration,
    ) -> Result<T> {
        let response = self.execute(request, Some(cancel)).await?;
        parse_body(response)
    }

    /// Like [`HarvestClient::send_empty`], aborting when the matching
    /// [`AbortHandle`](futures::future::AbortHandle) fires.
    ///
    /// # Errors
    ///
    /// Returns [`HarvestError::Cancelled`] if aborted before completion.
    #[tracing::instrument(skip_all, fields(method = %request.method(), url = %request.url()))]
    pub async fn send_empty_cancellable(
        &self,
        request: &RequestDescriptor,
        cancel: AbortRegistration,
    ) -> Result<()> {
        self.execute(request, Some(cancel)).await.map(drop)
    }

    /// Run the transport and check the status.
    async fn execute(
        &self,
        request: &RequestDescriptor,
        cancel: Option<AbortRegistration>,
    ) -> Result<TransportResponse> {
        let response = match cancel {
            Some(registration) => Abortable::new(self.transport.execute(request), registration)
                .await
                .map_err(|_| {
                    tracing::debug!("request aborted");
                    HarvestError::Cancelled
                })??,
            None => self.transport.execute(request).await?,
        };

        if response.is_success() {
            return Ok(response);
        }

        tracing::debug!(status = response.status, "request failed");
        Err(HarvestError::HttpStatus {
            status: response.status,
            body: response.body,
        })
    }

    fn merged(&self, path: &PathParams) -> PathParams {
        let mut merged = self.path_params();
        for (name, value) in path.iter() {
            merged.insert(name, value);
        }
        merged
    }
}

fn required_var(name: &str) -> Result<String> {
    env::var(name)
        .map_err(|_| HarvestError::ConfigMissing(format!("{name} environment variable not set")))
}

fn parse_body<T: DeserializeOwned>(response: TransportResponse) -> Result<T> {
    serde_json::from_str(&response.body).map_err(|source| HarvestError::Deserialization {
        source,
        body: response.body,
    })
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use futures::future::AbortHandle;

    use super::*;
    use crate::request::Method;

    #[derive(Debug)]
    struct Canned(TransportResponse);

    #[async_trait]
    impl Transport for Canned {
        async fn execute(&self, _request: &RequestDescriptor) -> Result<TransportResponse> {
            Ok(self.0.clone())
        }
    }

    fn canned(status: u16, body: &str) -> HarvestClient {
        let transport = Canned(TransportResponse {
            status,
            headers: Vec::new(),
            body: body.to_string(),
        });
        HarvestClient::with_transport(Arc::new(transport), "https://api.harvestapp.com/v2/")
            .unwrap()
    }

    const GET_ROLE: Endpoint<(), (), serde_json::Value> =
        Endpoint::json(Method::Get, "{+baseurl}/roles/{role_id}");

    #[test]
    fn test_client_debug() {
        let client = HarvestClient::new("test-token", "42", "https://api.harvestapp.com/v2").unwrap();
        let debug = format!("{:?}", client);
        assert!(debug.contains("HarvestClient"));
        assert!(debug.contains("base_url"));
        // Token should not be in debug output
        assert!(!debug.contains("test-token"));
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let client1 = HarvestClient::new("token", "1", "https://api.harvestapp.com/v2").unwrap();
        let client2 = HarvestClient::new("token", "1", "https://api.harvestapp.com/v2/").unwrap();
        assert_eq!(client1.base_url(), client2.base_url());
        assert_eq!(client1.base_url(), "https://api.harvestapp.com/v2");
    }

    #[test]
    fn test_relative_base_url_rejected() {
        let err = HarvestClient::new("token", "1", "/v2").unwrap_err();
        assert!(matches!(err, HarvestError::InvalidUrl(_)));
    }

    #[tokio::test]
    async fn test_call_deserializes_body() {
        let client = canned(200, r#"{"id": 7, "name": "Designer"}"#);
        let role = client
            .call(
                &GET_ROLE,
                &PathParams::new().with("role_id", 7),
                None,
                None,
                &RequestOptions::new(),
            )
            .await
            .unwrap();
        assert_eq!(role["name"], "Designer");
    }

    #[tokio::test]
    async fn test_non_success_status_keeps_body() {
        let client = canned(422, r#"{"message":"Name has already been taken"}"#);
        let err = client
            .call(
                &GET_ROLE,
                &PathParams::new().with("role_id", 7),
                None,
                None,
                &RequestOptions::new(),
            )
            .await
            .unwrap_err();

        match err {
            HarvestError::HttpStatus { status, body } => {
                assert_eq!(status, 422);
                assert!(body.contains("already been taken"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_malformed_body_is_deserialization_error() {
        let client = canned(200, "<html>oops</html>");
        let err = client
            .call(
                &GET_ROLE,
                &PathParams::new().with("role_id", 7),
                None,
                None,
                &RequestOptions::new(),
            )
            .await
            .unwrap_err();

        assert!(matches!(err, HarvestError::Deserialization { ref body, .. } if body.contains("oops")));
    }

    #[tokio::test]
    async fn test_missing_path_parameter_never_reaches_transport() {
        let client = canned(200, "{}");
        let err = client
            .call(&GET_ROLE, &PathParams::new(), None, None, &RequestOptions::new())
            .await
            .unwrap_err();
        assert!(err.is_configuration());
    }

    #[tokio::test]
    async fn test_cancel_before_send() {
        let client = canned(200, "{}");
        let request = GET_ROLE
            .request(
                &client.path_params().with("role_id", 1),
                None,
                None,
                &RequestOptions::new(),
            )
            .unwrap();

        let (handle, registration) = AbortHandle::new_pair();
        handle.abort();

        let err = client
            .send_cancellable::<serde_json::Value>(&request, registration)
            .await
            .unwrap_err();
        assert!(matches!(err, HarvestError::Cancelled));
    }
}

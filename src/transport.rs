//! HTTP transport.
//!
//! The [`Transport`] trait executes a [`RequestDescriptor`] and returns the
//! raw status, headers and body. Connection pooling, TLS, timeouts and
//! authentication belong to the transport; [`ReqwestTransport`] is the
//! default implementation.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION};
use reqwest::Client;

use crate::error::{HarvestError, Result};
use crate::request::{Method, RequestDescriptor};

/// Raw response returned by a [`Transport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl TransportResponse {
    /// Whether the status is in the 2xx range.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Executes resolved requests.
///
/// Implementations report network failures as [`HarvestError::Transport`];
/// any HTTP status, including errors, is a successful execution.
#[async_trait]
pub trait Transport: Send + Sync + fmt::Debug {
    async fn execute(&self, request: &RequestDescriptor) -> Result<TransportResponse>;
}

/// [`Transport`] backed by a shared `reqwest` connection pool.
///
/// Adds the Harvest authentication headers to every request.
#[derive(Clone)]
pub struct ReqwestTransport {
    http: Client,
    token: String,
    account_id: String,
}

impl fmt::Debug for ReqwestTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReqwestTransport")
            .field("account_id", &self.account_id)
            .finish_non_exhaustive()
    }
}

impl ReqwestTransport {
    /// Create a transport authenticating with a personal access token.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(token: &str, account_id: &str) -> Result<Self> {
        let http = Client::builder()
            .brotli(true)
            .gzip(true)
            .deflate(true)
            .timeout(Duration::from_secs(300))
            .build()?;

        Ok(Self {
            http,
            token: token.to_string(),
            account_id: account_id.to_string(),
        })
    }
}

impl ReqwestTransport {
    /// Authentication headers followed by the request's own headers.
    ///
    /// A request header replaces an authentication header of the same name.
    fn header_map(&self, request: &RequestDescriptor) -> Result<HeaderMap> {
        let mut auth = header_value("Authorization", &format!("Bearer {}", self.token))?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);
        headers.insert(
            HeaderName::from_static(ACCOUNT_HEADER),
            header_value(ACCOUNT_HEADER, &self.account_id)?,
        );
        for (name, value) in request.headers() {
            let header = HeaderName::from_bytes(name.as_bytes()).map_err(|e| {
                HarvestError::InvalidHeader {
                    name: name.clone(),
                    reason: e.to_string(),
                }
            })?;
            headers.insert(header, header_value(name, value)?);
        }
        Ok(headers)
    }
}

const ACCOUNT_HEADER: &str = "harvest-account-id";

fn header_value(name: &str, value: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value).map_err(|e| HarvestError::InvalidHeader {
        name: name.to_string(),
        reason: e.to_string(),
    })
}

#[async_trait]
impl Transport for ReqwestTransport {
    #[tracing::instrument(skip_all, fields(method = %request.method(), url = %request.url()))]
    async fn execute(&self, request: &RequestDescriptor) -> Result<TransportResponse> {
        let method = match request.method() {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Patch => reqwest::Method::PATCH,
            Method::Delete => reqwest::Method::DELETE,
        };

        let mut builder = self
            .http
            .request(method, request.url().clone())
            .headers(self.header_map(request)?);
        if let Some(body) = request.body() {
            builder = builder.body(body.to_string());
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        let body = response.text().await.map_err(HarvestError::from)?;

        tracing::debug!(status, bytes = body.len(), "received response");

        Ok(TransportResponse {
            status,
            headers,
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::{PathParams, RequestOptions, ResponseKind, Route};

    #[test]
    fn test_transport_debug_hides_token() {
        let transport = ReqwestTransport::new("secret-token", "123456").unwrap();
        let debug = format!("{transport:?}");
        assert!(debug.contains("123456"));
        assert!(!debug.contains("secret-token"));
    }

    fn descriptor(options: &RequestOptions) -> RequestDescriptor {
        let route = Route {
            method: Method::Get,
            template: "https://api.harvestapp.com/v2/roles",
            response: ResponseKind::Json,
        };
        RequestDescriptor::build::<(), ()>(&route, &PathParams::new(), None, None, options)
            .unwrap()
    }

    #[test]
    fn test_auth_headers_added() {
        let transport = ReqwestTransport::new("secret-token", "123456").unwrap();
        let headers = transport
            .header_map(&descriptor(&RequestOptions::new()))
            .unwrap();

        assert_eq!(headers[AUTHORIZATION], "Bearer secret-token");
        assert!(headers[AUTHORIZATION].is_sensitive());
        assert_eq!(headers["Harvest-Account-Id"], "123456");
        assert_eq!(headers["accept"], "application/json");
    }

    #[test]
    fn test_request_headers_replace_auth_headers() {
        let transport = ReqwestTransport::new("secret-token", "123456").unwrap();
        let options = RequestOptions::new()
            .header("Authorization", "Bearer other-token")
            .header("harvest-account-id", "999");

        let headers = transport.header_map(&descriptor(&options)).unwrap();

        assert_eq!(headers.get_all(AUTHORIZATION).iter().count(), 1);
        assert_eq!(headers[AUTHORIZATION], "Bearer other-token");
        assert_eq!(headers.get_all("harvest-account-id").iter().count(), 1);
        assert_eq!(headers["harvest-account-id"], "999");
    }

    #[test]
    fn test_invalid_token_is_configuration_error() {
        let transport = ReqwestTransport::new("bad\ntoken", "123456").unwrap();
        let err = transport
            .header_map(&descriptor(&RequestOptions::new()))
            .unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_success_range() {
        let response = |status| TransportResponse {
            status,
            headers: Vec::new(),
            body: String::new(),
        };
        assert!(response(200).is_success());
        assert!(response(204).is_success());
        assert!(!response(302).is_success());
        assert!(!response(404).is_success());
    }
}

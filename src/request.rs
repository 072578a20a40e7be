//! Request descriptors.
//!
//! A [`RequestDescriptor`] is a fully resolved HTTP request (method, URL,
//! headers, body) built without touching the network. A [`Transport`]
//! executes it.
//!
//! [`Transport`]: crate::Transport

use std::fmt;

use reqwest::header::{HeaderName, HeaderValue};
use serde::Serialize;
use url::Url;

use crate::error::{HarvestError, Result};
use crate::query;
use crate::template::UrlTemplate;

/// `User-Agent` sent with every request.
pub const USER_AGENT: &str = concat!("harvestapi/", env!("CARGO_PKG_VERSION"));

const JSON: &str = "application/json";

/// HTTP method of a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Patch,
    Delete,
}

impl Method {
    /// Upper-case method name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether an operation expects a JSON body in the response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseKind {
    Json,
    Empty,
}

/// The non-generic part of an endpoint: method, URL template and
/// expected response kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Route {
    pub method: Method,
    pub template: &'static str,
    pub response: ResponseKind,
}

/// Named values substituted into URL template placeholders.
///
/// Insertion order is preserved; inserting an existing name replaces its value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathParams {
    values: Vec<(String, String)>,
}

impl PathParams {
    /// Create an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a parameter, builder style.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl fmt::Display) -> Self {
        self.insert(name, value);
        self
    }

    /// Add or replace a parameter.
    pub fn insert(&mut self, name: impl Into<String>, value: impl fmt::Display) {
        let name = name.into();
        let value = value.to_string();
        match self.values.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.values.push((name, value)),
        }
    }

    /// Look up a parameter value.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Iterate over `(name, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }
}

/// Per-call configuration.
///
/// Headers listed here are layered over the defaults: a header with the same
/// (case-insensitive) name replaces the default, any other is appended.
///
/// ```
/// use harvestapi::RequestOptions;
///
/// let options = RequestOptions::new()
///     .header("User-Agent", "my-app (ops@example.com)")
///     .header("X-Request-Id", "42");
/// assert_eq!(options.headers().len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestOptions {
    headers: Vec<(String, String)>,
}

impl RequestOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a header.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// The configured headers, in insertion order.
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }
}

fn validate_header(name: &str, value: &str) -> Result<()> {
    let invalid = |reason: String| HarvestError::InvalidHeader {
        name: name.to_string(),
        reason,
    };
    HeaderName::from_bytes(name.as_bytes()).map_err(|e| invalid(e.to_string()))?;
    HeaderValue::from_str(value).map_err(|e| invalid(e.to_string()))?;
    Ok(())
}

/// A fully resolved HTTP request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestDescriptor {
    method: Method,
    url: Url,
    headers: Vec<(String, String)>,
    body: Option<String>,
}

impl RequestDescriptor {
    /// Build a request from a route.
    ///
    /// Path placeholders are filled from `path`, query placeholders from
    /// `query` (unset fields leave no trace), and `body`, when present, is
    /// serialized to JSON.
    ///
    /// # Errors
    ///
    /// Fails before any I/O with a configuration error when the template is
    /// malformed, a path parameter is missing or invalid, a caller header is
    /// not valid HTTP, the query or body cannot be serialized, or the result
    /// is not a valid URL.
    pub fn build<Q, B>(
        route: &Route,
        path: &PathParams,
        query: Option<&Q>,
        body: Option<&B>,
        options: &RequestOptions,
    ) -> Result<Self>
    where
        Q: Serialize + ?Sized,
        B: Serialize + ?Sized,
    {
        let template = UrlTemplate::parse(route.template)?;
        let pairs = match query {
            Some(query) => query::to_pairs(query)?,
            None => Vec::new(),
        };
        let url = Url::parse(&template.expand(path, &pairs)?)?;

        let body = body
            .map(serde_json::to_string)
            .transpose()
            .map_err(HarvestError::Serialization)?;

        let mut headers = vec![("User-Agent".to_string(), USER_AGENT.to_string())];
        if route.response == ResponseKind::Json {
            headers.push(("Accept".to_string(), JSON.to_string()));
        }
        if body.is_some() {
            headers.push(("Content-Type".to_string(), JSON.to_string()));
        }
        for (name, value) in options.headers() {
            validate_header(name, value)?;
            match headers
                .iter_mut()
                .find(|(existing, _)| existing.eq_ignore_ascii_case(name))
            {
                Some(slot) => slot.1.clone_from(value),
                None => headers.push((name.clone(), value.clone())),
            }
        }

        tracing::debug!(method = %route.method, %url, "built request");

        Ok(Self {
            method: route.method,
            url,
            headers,
            body,
        })
    }

    pub fn method(&self) -> Method {
        self.method
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Headers in the order they will be sent.
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// JSON body, if any.
    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }
}

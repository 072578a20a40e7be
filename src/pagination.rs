//! Pagination utilities for Harvest API responses.

use serde::de::{self, DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize};
use url::Url;

/// A resource returned by a paginated list endpoint.
///
/// Harvest wraps list results in an envelope whose item array is keyed by
/// the resource name (`"clients"`, `"roles"`, ...). `KEY` names that field.
pub trait Collection: DeserializeOwned {
    /// JSON key holding the items in a list response.
    const KEY: &'static str;
}

/// Navigation links of a paginated response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationLinks {
    #[serde(default)]
    pub first: Option<Url>,
    #[serde(default)]
    pub next: Option<Url>,
    #[serde(default)]
    pub previous: Option<Url>,
    #[serde(default)]
    pub last: Option<Url>,
}

/// A page of results from the Harvest API.
#[derive(Debug, Clone, Serialize)]
#[serde(bound = "T: Serialize")]
pub struct Page<T> {
    /// The items on this page.
    pub items: Vec<T>,
    /// Current page number (1-indexed).
    pub page: u32,
    /// Number of items per page.
    pub per_page: u32,
    /// Total number of pages.
    pub total_pages: u32,
    /// Total number of items across all pages.
    pub total_entries: u64,
    /// Next page number, if any.
    pub next_page: Option<u32>,
    /// Previous page number, if any.
    pub previous_page: Option<u32>,
    /// Navigation links.
    pub links: PaginationLinks,
}

impl<'de, T: Collection> Deserialize<'de> for Page<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct Envelope {
            #[serde(default = "first_page")]
            page: u32,
            #[serde(default)]
            per_page: u32,
            #[serde(default)]
            total_pages: u32,
            #[serde(default)]
            total_entries: u64,
            #[serde(default)]
            next_page: Option<u32>,
            #[serde(default)]
            previous_page: Option<u32>,
            #[serde(default)]
            links: PaginationLinks,
            #[serde(flatten)]
            rest: serde_json::Map<String, serde_json::Value>,
        }

        let mut envelope = Envelope::deserialize(deserializer)?;
        let items = envelope
            .rest
            .remove(T::KEY)
            .ok_or_else(|| de::Error::missing_field(T::KEY))?;
        let items = Vec::<T>::deserialize(items).map_err(de::Error::custom)?;

        Ok(Self {
            items,
            page: envelope.page,
            per_page: envelope.per_page,
            total_pages: envelope.total_pages,
            total_entries: envelope.total_entries,
            next_page: envelope.next_page,
            previous_page: envelope.previous_page,
            links: envelope.links,
        })
    }
}

fn first_page() -> u32 {
    1
}

impl<T> Page<T> {
    /// Whether the server reported a next page.
    #[must_use]
    pub fn has_more(&self) -> bool {
        self.next_page.is_some()
    }

    /// Map the items to a different type.
    #[must_use]
    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            per_page: self.per_page,
            total_pages: self.total_pages,
            total_entries: self.total_entries,
            next_page: self.next_page,
            previous_page: self.previous_page,
            links: self.links,
        }
    }

    /// Returns true if this page has no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the number of items on this page.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns an iterator over the items in this page.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }
}

impl<T> IntoIterator for Page<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Page<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Query parameters for paginated requests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationParams {
    /// Page number (1-indexed).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    /// Number of items per page (Harvest allows 1-2000).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,
}

impl PaginationParams {
    /// Create pagination params for a specific page.
    #[must_use]
    pub fn for_page(page: u32, per_page: u32) -> Self {
        Self {
            page: Some(page),
            per_page: Some(per_page),
        }
    }
}

/// A resource query combined with pagination, as sent by list endpoints.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Paged<Q> {
    #[serde(flatten)]
    pub query: Q,
    #[serde(flatten)]
    pub pagination: PaginationParams,
}

impl<Q> Paged<Q> {
    #[must_use]
    pub fn new(query: Q, page: u32, per_page: u32) -> Self {
        Self {
            query,
            pagination: PaginationParams::for_page(page, per_page),
        }
    }
}

/// Query set for list endpoints that only accept pagination.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct NoFilter {}

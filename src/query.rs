//! Query parameter serialization.
//!
//! Query parameter sets are plain `Serialize` structs. Fields are
//! `Option<_>` marked `skip_serializing_if = "Option::is_none"` so that unset
//! parameters never reach the URL.

use serde::Serialize;

use crate::error::{HarvestError, Result};

/// Serialize a query parameter set into ordered, decoded key/value pairs.
///
/// Dates come out as ISO-8601 (`NaiveDate` as `YYYY-MM-DD`, `DateTime<Utc>`
/// as RFC 3339), booleans as `true`/`false` and numbers as decimal literals.
///
/// # Errors
///
/// Returns [`HarvestError::InvalidQuery`] if the value is not a flat
/// struct or map of scalars.
pub fn to_pairs<Q: Serialize + ?Sized>(query: &Q) -> Result<Vec<(String, String)>> {
    let encoded =
        serde_urlencoded::to_string(query).map_err(|e| HarvestError::InvalidQuery(e.to_string()))?;
    Ok(url::form_urlencoded::parse(encoded.as_bytes())
        .into_owned()
        .collect())
}

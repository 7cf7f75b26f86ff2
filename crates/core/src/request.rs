//! Parsing of the decorated path segments sent by addon clients.
//!
//! Catalog requests carry the search term as `search=<term>.json` and meta
//! requests carry the id as `<provider>:<n>.json`. Anything else is rejected
//! with [`ApiError::BadRequest`].

use crate::error::ApiError;
use crate::types::Provider;

const SEARCH_PREFIX: &str = "search=";
const JSON_SUFFIX: &str = ".json";

/// Extract the search term from a `search=<term>.json` catalog extra.
pub fn parse_search_extra(raw: &str) -> Result<&str, ApiError> {
    let term = raw
        .strip_suffix(JSON_SUFFIX)
        .and_then(|s| s.strip_prefix(SEARCH_PREFIX))
        .ok_or_else(|| ApiError::BadRequest(format!("malformed search extra: {raw}")))?;

    if term.trim().is_empty() {
        return Err(ApiError::BadRequest("empty search term".into()));
    }
    Ok(term)
}

/// Parse a `<provider>:<n>.json` meta id, requiring the given provider prefix.
pub fn parse_meta_id(raw: &str, provider: Provider) -> Result<u64, ApiError> {
    let malformed = || ApiError::BadRequest(format!("malformed {provider} id: {raw}"));

    let (prefix, id) = raw
        .strip_suffix(JSON_SUFFIX)
        .and_then(|s| s.split_once(':'))
        .ok_or_else(malformed)?;

    if prefix != provider.as_str() {
        return Err(malformed());
    }
    id.parse().map_err(|_| malformed())
}

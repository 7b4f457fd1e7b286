//! Query parameter extraction.
//!
//! # Responsibilities
//! - Read every query parameter of a URI
//! - Lowercase parameter names, keep values verbatim
//!
//! # Design Decisions
//! - Repeated names (including names differing only by case): last value wins
//! - Values are percent-decoded once, as URI parsing defines; no type coercion
//! - A URI without a query yields an empty map

use std::collections::HashMap;
use url::Url;

/// Parameter under which the raw URI string of a resolved request is stored.
/// Always overrides a user parameter of the same name.
pub const RAW_URI_PARAM: &str = "router.raw_uri";

/// Extract the query parameters of `uri` into a case-normalized map.
pub fn extract(uri: &Url) -> HashMap<String, String> {
    let mut params = HashMap::new();
    for (name, value) in uri.query_pairs() {
        params.insert(name.to_lowercase(), value.into_owned());
    }
    params
}

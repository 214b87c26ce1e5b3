use std::collections::BTreeMap;

use serde::Serialize;

/// One table row. Keys come from the table header, so rows from the same
/// table usually share keys, but nothing enforces it — a short row simply
/// omits the trailing columns.
pub type ParamRow = BTreeMap<String, String>;

/// The fully assembled record for one documented endpoint: the descriptive
/// fields from the left column plus the code samples from the right column.
#[derive(Debug, Default, Serialize)]
pub struct Endpoint {
    pub title: String,

    // All prose before the next heading. No layout rule recognizes it yet.
    pub definition: String,

    pub authentication: String,
    pub authorization: String,

    /// Path component only; scheme, host and query string are discarded.
    pub url: String,
    pub method: String,

    pub pagination_support: String,

    pub required_query_params: Vec<ParamRow>,
    pub optional_query_params: Vec<ParamRow>,
    pub required_body_params: Vec<ParamRow>,
    pub optional_body_params: Vec<ParamRow>,
    pub return_values: Vec<ParamRow>,
    pub response_codes: Vec<ParamRow>,

    /// Outer HTML of each code-sample block, in document order.
    pub code_samples: Vec<String>,
}

#[derive(Debug, Default, Serialize)]
pub struct ApiDoc {
    pub endpoints: Vec<Endpoint>,
}

//! The GraphQL operation sent to the retailer.
//!
//! The document is a fixed wire contract captured from the storefront. It
//! selects far more than the feed needs; the extra fields are ignored on
//! decode.

use serde::Serialize;
use serde_json::{Map, Value};

pub const OPERATION_NAME: &str = "GET_ADVENTCALENDAR";

pub const CALENDAR_QUERY: &str = include_str!("query.graphql");

/// One operation in a batched GraphQL request.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphQlRequest<'a> {
    pub operation_name: &'a str,
    pub variables: Map<String, Value>,
    pub query: &'a str,
}

/// The batch the upstream expects: exactly one calendar operation with no
/// variables.
#[must_use]
pub fn calendar_batch() -> [GraphQlRequest<'static>; 1] {
    [GraphQlRequest {
        operation_name: OPERATION_NAME,
        variables: Map::new(),
        query: CALENDAR_QUERY,
    }]
}

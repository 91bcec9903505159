//! HTTP client for the retailer's advent calendar GraphQL endpoint.

use std::time::Duration;

use advent_core::StoreProfile;
use reqwest::{header, Client};

use crate::error::UpstreamError;
use crate::query::calendar_batch;
use crate::types::{CalendarSnapshot, ResponseEnvelope};

/// Whole-request timeout for the calendar fetch.
pub const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Error bodies longer than this are cut before being stored in
/// [`UpstreamError::UnexpectedStatus`].
const MAX_ERROR_BODY_CHARS: usize = 512;

/// Client for one store's `GET_ADVENTCALENDAR` endpoint.
///
/// The upstream only answers requests that look like they come from the
/// storefront itself, so every call carries browser-like `Accept*` headers,
/// the configured `User-Agent`, and the `x-dg-*` routing headers for the
/// store's portal.
///
/// There is no retry: a failed fetch is reported to the caller, and the next
/// feed request simply tries again.
pub struct UpstreamClient {
    client: Client,
    profile: StoreProfile,
}

impl UpstreamClient {
    /// Creates an `UpstreamClient` for `profile` with a 30 second timeout.
    ///
    /// # Errors
    ///
    /// Returns [`UpstreamError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed (e.g., invalid TLS config or `User-Agent`).
    pub fn new(profile: StoreProfile, user_agent: &str) -> Result<Self, UpstreamError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self { client, profile })
    }

    /// Fetches today's calendar.
    ///
    /// # Errors
    ///
    /// - [`UpstreamError::Encode`]: the request body could not be serialized.
    /// - [`UpstreamError::Http`]: network or TLS failure, or the timeout fired.
    /// - [`UpstreamError::UnexpectedStatus`]: any non-2xx status; carries the
    ///   (truncated) response body.
    /// - [`UpstreamError::Deserialize`]: the body is not a JSON array of
    ///   GraphQL envelopes.
    /// - [`UpstreamError::EmptyResponse`]: the array is empty.
    /// - [`UpstreamError::GraphQl`]: the first envelope has no `data`.
    pub async fn fetch_calendar(&self) -> Result<CalendarSnapshot, UpstreamError> {
        let body = serde_json::to_vec(&calendar_batch()).map_err(UpstreamError::Encode)?;
        let profile = &self.profile;

        tracing::debug!(url = %profile.api_url, store = %profile.name, "posting advent calendar query");

        let response = self
            .client
            .post(&profile.api_url)
            .header(header::ACCEPT, "*/*")
            .header(header::ACCEPT_LANGUAGE, "en-US,en;q=0.9")
            .header(header::CACHE_CONTROL, "no-cache")
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::ORIGIN, profile.base_url.as_str())
            .header(header::PRAGMA, "no-cache")
            .header("x-dg-graphql-client-name", "isomorph")
            .header("x-dg-language", "de-CH")
            .header("x-dg-portal", profile.portal_id.as_str())
            .header("x-dg-routename", "/advent-calendar")
            .header("x-dg-routeowner", "stellapolaris")
            .header("x-dg-team", "stellapolaris")
            .body(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), store = %profile.name, "advent calendar request rejected");
            return Err(UpstreamError::UnexpectedStatus {
                status: status.as_u16(),
                body: truncate_body(&body),
            });
        }

        let bytes = response.bytes().await?;
        parse_calendar_response(&bytes, &profile.name)
    }
}

/// Decodes the batched envelope array and returns the first operation's
/// calendar.
pub(crate) fn parse_calendar_response(
    bytes: &[u8],
    store_name: &str,
) -> Result<CalendarSnapshot, UpstreamError> {
    let envelopes: Vec<ResponseEnvelope> =
        serde_json::from_slice(bytes).map_err(|e| UpstreamError::Deserialize {
            context: format!("advent calendar response from {store_name}"),
            source: e,
        })?;

    let first = envelopes
        .into_iter()
        .next()
        .ok_or(UpstreamError::EmptyResponse)?;

    match first.data {
        Some(data) => Ok(data.advent_calendar),
        None => {
            let messages = first
                .errors
                .iter()
                .map(|e| e.message.as_str())
                .filter(|m| !m.is_empty())
                .collect::<Vec<_>>()
                .join("; ");
            Err(UpstreamError::GraphQl {
                messages: if messages.is_empty() {
                    "no error message".to_owned()
                } else {
                    messages
                },
            })
        }
    }
}

fn truncate_body(body: &str) -> String {
    if body.chars().count() <= MAX_ERROR_BODY_CHARS {
        return body.to_owned();
    }
    let mut cut: String = body.chars().take(MAX_ERROR_BODY_CHARS).collect();
    cut.push_str("...");
    cut
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;

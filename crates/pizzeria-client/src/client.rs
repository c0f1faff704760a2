//! HTTP client for the commerce ("power") API and the order tracker.
//!
//! Wraps `reqwest` with base-URL handling, JSON decoding, and detection of
//! the service's in-band failure status. Endpoint methods live next to the
//! concern they serve: [`crate::stores`], [`crate::commerce`],
//! [`crate::tracker`].

use std::time::Duration;

use pizzeria_core::{AppConfig, OrderAccumulator};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, StatusCode, Url};
use serde_json::Value;

use crate::error::CheckoutError;

/// In-band status value the commerce API uses for a failed request.
const STATUS_FAILURE: i64 = -1;

/// Client for the commerce and tracker endpoints.
///
/// Use [`PowerClient::from_config`] in the binary or
/// [`PowerClient::with_base_urls`] to point at a mock server in tests.
pub struct PowerClient {
    client: Client,
    api_base: Url,
    tracker_base: Url,
}

impl PowerClient {
    /// Creates a client from loaded application configuration.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`CheckoutError::InvalidBaseUrl`] if either
    /// configured base URL does not parse.
    pub fn from_config(config: &AppConfig) -> Result<Self, CheckoutError> {
        Self::with_base_urls(
            &config.api_base_url,
            &config.tracker_base_url,
            &config.user_agent,
            config.request_timeout_secs,
        )
    }

    /// Creates a client with explicit base URLs.
    ///
    /// With `timeout_secs == None` no request timeout is applied and a hung
    /// endpoint blocks the caller indefinitely.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`CheckoutError::InvalidBaseUrl`] if either
    /// base URL does not parse.
    pub fn with_base_urls(
        api_base: &str,
        tracker_base: &str,
        user_agent: &str,
        timeout_secs: Option<u64>,
    ) -> Result<Self, CheckoutError> {
        let mut builder = Client::builder().user_agent(user_agent);
        if let Some(secs) = timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build()?;

        Ok(Self {
            client,
            api_base: parse_base_url(api_base)?,
            tracker_base: parse_base_url(tracker_base)?,
        })
    }

    /// Builds a commerce API URL with percent-encoded query parameters.
    pub(crate) fn api_url(&self, path: &str, query: &[(&str, &str)]) -> Url {
        build_url(&self.api_base, path, query)
    }

    /// Builds a tracker URL with percent-encoded query parameters.
    pub(crate) fn tracker_url(&self, path: &str, query: &[(&str, &str)]) -> Url {
        build_url(&self.tracker_base, path, query)
    }

    /// Sends a GET request, asserts a 2xx status, and returns the body text.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::Http`] on network failure or a non-2xx status.
    pub(crate) async fn get_text(&self, url: &Url) -> Result<String, CheckoutError> {
        tracing::debug!(%url, "GET");
        let response = self.client.get(url.clone()).send().await?;
        let response = response.error_for_status()?;
        Ok(response.text().await?)
    }

    /// Sends a GET request and parses the response body as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::Http`] on network failure or a non-2xx status.
    /// Returns [`CheckoutError::Deserialize`] if the body is not valid JSON.
    pub(crate) async fn get_json(&self, url: &Url, context: &str) -> Result<Value, CheckoutError> {
        let body = self.get_text(url).await?;
        serde_json::from_str(&body).map_err(|e| CheckoutError::Deserialize {
            context: context.to_owned(),
            source: e,
        })
    }

    /// POSTs `{"Order": ...}` to a commerce endpoint and parses the JSON reply.
    ///
    /// `operation` names the endpoint path under `power/` and is used as the
    /// error context.
    ///
    /// # Errors
    ///
    /// - [`CheckoutError::Order`] if the order cannot be serialized.
    /// - [`CheckoutError::Http`] on network failure or a non-2xx status.
    /// - [`CheckoutError::Deserialize`] if the body is not valid JSON.
    ///
    /// A `"Status": -1` body is not an error here; its codes are logged and
    /// each caller decides what the response must contain.
    pub(crate) async fn post_order(
        &self,
        operation: &'static str,
        order: &OrderAccumulator,
    ) -> Result<(StatusCode, Value), CheckoutError> {
        let url = self.api_url(&format!("power/{operation}"), &[]);
        let body = order.to_request_body()?;
        tracing::debug!(%url, bytes = body.len(), "POST order");

        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await?;
        let response = response.error_for_status()?;
        let status = response.status();
        let text = response.text().await?;

        let value: Value = serde_json::from_str(&text).map_err(|e| CheckoutError::Deserialize {
            context: operation.to_owned(),
            source: e,
        })?;
        if let Some(codes) = failure_codes(&value) {
            tracing::warn!(operation, codes = %codes.join(", "), "service reported failure status");
        }
        Ok((status, value))
    }
}

/// Every `StatusItems[].Code` on the envelope and the echoed order when the
/// top-level `"Status"` is `-1`; `None` for any other status.
pub(crate) fn failure_codes(body: &Value) -> Option<Vec<String>> {
    if body.get("Status").and_then(Value::as_i64) != Some(STATUS_FAILURE) {
        return None;
    }

    let envelope_items = body.get("StatusItems");
    let order_items = body.get("Order").and_then(|o| o.get("StatusItems"));
    let codes: Vec<String> = [envelope_items, order_items]
        .into_iter()
        .flatten()
        .filter_map(Value::as_array)
        .flatten()
        .filter_map(|item| item.get("Code").and_then(Value::as_str))
        .map(str::to_owned)
        .collect();

    if codes.is_empty() {
        Some(vec!["unknown error".to_owned()])
    } else {
        Some(codes)
    }
}

/// Normalises `raw` to end in exactly one slash so relative joins append to
/// the base path instead of replacing its last segment.
fn parse_base_url(raw: &str) -> Result<Url, CheckoutError> {
    let normalised = format!("{}/", raw.trim_end_matches('/'));
    Url::parse(&normalised).map_err(|e| CheckoutError::InvalidBaseUrl {
        url: raw.to_owned(),
        reason: e.to_string(),
    })
}

fn build_url(base: &Url, path: &str, query: &[(&str, &str)]) -> Url {
    let mut url = base.clone();
    let full_path = format!(
        "{}/{}",
        base.path().trim_end_matches('/'),
        path.trim_start_matches('/')
    );
    url.set_path(&full_path);
    if !query.is_empty() {
        let mut pairs = url.query_pairs_mut();
        for (k, v) in query {
            pairs.append_pair(k, v);
        }
    }
    url
}

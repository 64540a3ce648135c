//! `ArcGIS` REST `FeatureServer` client.
//!
//! Queries `{service_url}/{layer}/query` with `f=json` and paginates
//! via `resultOffset`/`resultRecordCount`. `exceededTransferLimit` is
//! the canonical pagination signal — checking `count < page_size` is
//! unreliable because the server silently caps results at its own
//! `maxRecordCount`.

use async_trait::async_trait;

use crate::{FeatureQuery, FeatureRecord, GatewayError};

/// Max records per page request.
const DEFAULT_PAGE_SIZE: u64 = 1000;

/// A `FeatureServer` endpoint implementing [`FeatureQuery`].
pub struct ArcGisFeatureService {
    service_url: String,
    client: reqwest::Client,
    page_size: u64,
}

impl ArcGisFeatureService {
    /// Builds a client for the given `FeatureServer` base URL (no
    /// trailing layer index).
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError`] if the HTTP client cannot be built.
    pub fn new(service_url: impl Into<String>) -> Result<Self, GatewayError> {
        let client = reqwest::Client::builder().build()?;
        Ok(Self {
            service_url: service_url.into().trim_end_matches('/').to_string(),
            client,
            page_size: DEFAULT_PAGE_SIZE,
        })
    }

    /// Overrides the page size (some servers cap at lower values).
    #[must_use]
    pub const fn with_page_size(mut self, page_size: u64) -> Self {
        self.page_size = page_size;
        self
    }

    async fn fetch_page(
        &self,
        layer: u32,
        where_clause: &str,
        out_fields: &str,
        offset: u64,
    ) -> Result<serde_json::Value, GatewayError> {
        let url = format!("{}/{layer}/query", self.service_url);
        let page_size = self.page_size.to_string();
        let offset = offset.to_string();

        let response = self
            .client
            .get(&url)
            .query(&[
                ("where", where_clause),
                ("outFields", out_fields),
                ("returnGeometry", "false"),
                ("f", "json"),
                ("resultRecordCount", page_size.as_str()),
                ("resultOffset", offset.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(GatewayError::Service {
                message: format!(
                    "HTTP {status} from layer {layer}: {}",
                    truncate_for_log(&body, 500)
                ),
            });
        }

        let json: serde_json::Value = serde_json::from_str(&body)?;

        // ArcGIS reports failures inside a 200 response:
        // {"error": {"code": 400, "message": "..."}}
        if let Some(error_obj) = json.get("error") {
            let code = error_obj
                .get("code")
                .and_then(serde_json::Value::as_i64)
                .unwrap_or(0);
            let msg = error_obj
                .get("message")
                .and_then(serde_json::Value::as_str)
                .unwrap_or("unknown");
            return Err(GatewayError::Service {
                message: format!("ArcGIS error {code} on layer {layer}: {msg}"),
            });
        }

        Ok(json)
    }
}

#[async_trait]
impl FeatureQuery for ArcGisFeatureService {
    async fn query_features(
        &self,
        layer: u32,
        where_clause: &str,
        out_fields: &[&str],
    ) -> Result<Vec<FeatureRecord>, GatewayError> {
        let out_fields = out_fields.join(",");
        let mut all_records: Vec<FeatureRecord> = Vec::new();
        let mut offset = 0u64;

        loop {
            let json = self
                .fetch_page(layer, where_clause, &out_fields, offset)
                .await?;

            let features =
                json["features"]
                    .as_array()
                    .ok_or_else(|| GatewayError::Service {
                        message: format!(
                            "No features array in response for layer {layer} (offset={offset})"
                        ),
                    })?;

            if features.is_empty() {
                break;
            }

            // Features wrap attributes: { "attributes": {...} }
            for feature in features {
                if let Some(attrs) = feature.get("attributes") {
                    let record: FeatureRecord = serde_json::from_value(attrs.clone())?;
                    all_records.push(record);
                }
            }

            offset += u64::try_from(features.len()).unwrap_or(u64::MAX);

            let exceeded = json
                .get("exceededTransferLimit")
                .and_then(serde_json::Value::as_bool)
                .unwrap_or(false);
            if !exceeded {
                break;
            }

            log::info!(
                "layer {layer}: fetched {} records so far, fetching next page...",
                all_records.len()
            );
        }

        log::debug!(
            "layer {layer}: query complete — {} records for `{where_clause}`",
            all_records.len()
        );

        Ok(all_records)
    }
}

/// Truncates a string for logging, appending "..." if it exceeds
/// `max_len`.
fn truncate_for_log(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        s.to_string()
    } else {
        format!("{}...", &s[..max_len])
    }
}

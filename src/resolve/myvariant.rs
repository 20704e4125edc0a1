//! MyVariant.info batch client.

use std::time::Duration;

use reqwest::blocking::Client;
use serde::Deserialize;
use tracing::debug;

use crate::config::ResolverConfig;
use crate::error::GwasError;

use super::{Resolutions, VariantResolver};

/// Public MyVariant.info endpoint.
pub const DEFAULT_API_URL: &str = "https://myvariant.info/v1";

/// HTTP client for the MyVariant.info batch variant endpoint.
pub struct MyVariantResolver {
    client: Client,
    base_url: String,
}

/// One element of the batch response array.
#[derive(Debug, Deserialize)]
struct QueryHit {
    query: String,
    #[serde(rename = "_id")]
    id: Option<String>,
    #[serde(default)]
    notfound: bool,
}

impl MyVariantResolver {
    /// Create a client for `base_url` with a per-request timeout.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, GwasError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GwasError::Resolver {
                msg: format!("Failed to create HTTP client: {}", e),
            })?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Create a client from the `[resolver]` configuration section.
    pub fn from_config(config: &ResolverConfig) -> Result<Self, GwasError> {
        Self::new(
            &config.api_url,
            Duration::from_secs(config.timeout_seconds),
        )
    }

    /// Base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl VariantResolver for MyVariantResolver {
    fn resolve_batch(&self, ids: &[String]) -> Result<Resolutions, GwasError> {
        if ids.is_empty() {
            return Ok(Resolutions::new());
        }

        let url = format!("{}/variant", self.base_url);
        let joined = ids.join(",");
        debug!(url = %url, count = ids.len(), "Querying variant service");

        let response = self
            .client
            .post(&url)
            .form(&[("ids", joined.as_str()), ("fields", "_id")])
            .send()
            .map_err(|e| GwasError::Resolver {
                msg: format!("HTTP request to {} failed: {}", url, e),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(GwasError::Resolver {
                msg: format!("HTTP {} from {}", status, url),
            });
        }

        let body = response.text().map_err(|e| GwasError::Resolver {
            msg: format!("Failed to read response from {}: {}", url, e),
        })?;
        parse_response(&body)
    }

    fn name(&self) -> &str {
        "myvariant"
    }
}

/// Parse a batch response body into resolutions.
///
/// A query can appear several times (multi-allelic sites); a found hit
/// replaces an earlier miss and the last found hit wins.
pub(crate) fn parse_response(body: &str) -> Result<Resolutions, GwasError> {
    let hits: Vec<QueryHit> = serde_json::from_str(body).map_err(|e| GwasError::Resolver {
        msg: format!("Failed to parse resolver response: {}", e),
    })?;

    let mut resolutions = Resolutions::with_capacity(hits.len());
    for hit in hits {
        let canonical = if hit.notfound { None } else { hit.id };
        match canonical {
            Some(id) => {
                resolutions.insert(hit.query, Some(id));
            }
            None => {
                resolutions.entry(hit.query).or_insert(None);
            }
        }
    }
    Ok(resolutions)
}

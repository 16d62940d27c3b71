//! Drug label lookup against the public openFDA API.
//!
//! The response body is not interpreted: a 200 is handed back as-is inside
//! [`DrugRecords`], anything else becomes [`Error::FetchFailed`] with the status and raw body.
//! REF: https://open.fda.gov/apis/drug/label/

use crate::{Error, Result};
use derive_more::{Deref, From};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, instrument, warn};

// region:       -- Constants

pub const OPENFDA_LABEL_URL: &str = "https://api.fda.gov/drug/label.json";
pub const ENV_OPENFDA_API_KEY: &str = "OPENFDA_API_KEY";
pub const DEFAULT_LIMIT: u32 = 10;
// openFDA rejects larger pages.
const MAX_LIMIT: u32 = 1000;

// endregion:    -- Constants

// region:       -- DrugRecords

/// The openFDA response body, passed through untouched.
#[derive(Debug, Clone, PartialEq, From, Deref, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DrugRecords(Value);

impl DrugRecords {
    /// Length of the top-level `results` array, 0 if there is none.
    pub fn result_count(&self) -> usize {
        self.0
            .get("results")
            .and_then(Value::as_array)
            .map(Vec::len)
            .unwrap_or(0)
    }

    pub fn into_value(self) -> Value {
        self.0
    }
}

// endregion:    -- DrugRecords

// region:       -- DrugLabelClient

#[derive(Debug, Clone)]
pub struct DrugLabelClient {
    http: Client,
    endpoint: String,
    api_key: Option<String>,
}

impl DrugLabelClient {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            http: Client::new(),
            endpoint: OPENFDA_LABEL_URL.to_string(),
            api_key,
        }
    }

    /// Reads the key from `OPENFDA_API_KEY`. Without one, openFDA still answers
    /// but at a lower rate limit.
    pub fn from_env() -> Self {
        let api_key = std::env::var(ENV_OPENFDA_API_KEY).ok();
        if api_key.is_none() {
            warn!("no {ENV_OPENFDA_API_KEY} in env, querying openFDA without a key");
        }
        Self::new(api_key)
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Label records whose `indications_and_usage` matches `indication`, at most `limit`.
    #[instrument(skip(self))]
    pub async fn fetch(&self, indication: &str, limit: u32) -> Result<DrugRecords> {
        let indication = indication.trim();
        if indication.is_empty() {
            return Err(Error::EmptyIndication);
        }
        if limit == 0 || limit > MAX_LIMIT {
            return Err(Error::InvalidLimit(limit));
        }

        let mut query = vec![
            ("search", format!("indications_and_usage:{indication}")),
            ("limit", limit.to_string()),
        ];
        if let Some(api_key) = &self.api_key {
            query.push(("api_key", api_key.clone()));
        }

        let response = self.http.get(&self.endpoint).query(&query).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await?;
            warn!(status = status.as_u16(), "openFDA query failed");
            return Err(Error::FetchFailed {
                status: status.as_u16(),
                body,
            });
        }

        let records = DrugRecords(response.json::<Value>().await?);
        info!(results = records.result_count(), "openFDA records fetched");

        Ok(records)
    }
}

// endregion:    -- DrugLabelClient

// region:       -- Tests


// endregion:    -- Tests

/// SpaceX API client
use crate::domain::{Launch, PayloadRecord, ReferenceMaps};
use crate::errors::{ApiError, ApiResult};
use crate::utils::s_pick;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, warn};

/// HTTP client wrapper with common configuration
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    pub fn new(timeout_seconds: u64) -> ApiResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .user_agent("launch-dashboard/0.1")
            .build()?;
        Ok(Self { client })
    }

    pub fn get_client(&self) -> &Client {
        &self.client
    }
}

pub struct SpaceXClient {
    http_client: HttpClient,
    base_url: String,
}

impl SpaceXClient {
    pub fn new(base_url: String, timeout_seconds: u64) -> ApiResult<Self> {
        Ok(Self {
            http_client: HttpClient::new(timeout_seconds)?,
            base_url,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET `{base_url}/{resource}` and return its JSON array
    async fn fetch_array(&self, resource: &str) -> ApiResult<Vec<Value>> {
        let url = format!("{}/{}", self.base_url, resource);
        let resp = self
            .http_client
            .get_client()
            .get(&url)
            .send()
            .await?
            .error_for_status()?;

        let json: Value = resp.json().await?;
        match json {
            Value::Array(items) => {
                debug!("Fetched {} {}", items.len(), resource);
                Ok(items)
            }
            other => Err(ApiError::Internal(format!(
                "expected array from {}, got {}",
                url,
                json_kind(&other)
            ))),
        }
    }

    /// Fetch all launches
    pub async fn fetch_launches(&self) -> ApiResult<Vec<Launch>> {
        Ok(parse_records(self.fetch_array("launches").await?, "launch"))
    }

    pub async fn fetch_rockets(&self) -> ApiResult<Vec<Value>> {
        self.fetch_array("rockets").await
    }

    pub async fn fetch_launchpads(&self) -> ApiResult<Vec<Value>> {
        self.fetch_array("launchpads").await
    }

    pub async fn fetch_payloads(&self) -> ApiResult<Vec<PayloadRecord>> {
        Ok(parse_records(self.fetch_array("payloads").await?, "payload"))
    }

    /// Fetch launches and every reference table concurrently
    pub async fn fetch_all(&self) -> ApiResult<(Vec<Launch>, ReferenceMaps)> {
        let (launches, rockets, launchpads, payloads) = tokio::try_join!(
            self.fetch_launches(),
            self.fetch_rockets(),
            self.fetch_launchpads(),
            self.fetch_payloads(),
        )?;

        Ok((launches, build_maps(rockets, launchpads, payloads)))
    }
}

fn json_kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Decode each item on its own. Off-type fields read as absent, so only
/// items that are not objects at all get skipped.
pub fn parse_records<T: DeserializeOwned>(items: Vec<Value>, kind: &str) -> Vec<T> {
    items
        .into_iter()
        .enumerate()
        .filter_map(|(i, item)| match serde_json::from_value(item) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!("Skipping malformed {} at index {}: {}", kind, i, e);
                None
            }
        })
        .collect()
}

fn name_map(items: &[Value]) -> HashMap<String, String> {
    items
        .iter()
        .filter_map(|item| {
            let id = s_pick(item, &["id"])?;
            let name = s_pick(item, &["name", "full_name"])?;
            Some((id, name))
        })
        .collect()
}

/// Build id -> name / id -> record lookup tables; entries without an id are skipped
pub fn build_maps(
    rockets: Vec<Value>,
    launchpads: Vec<Value>,
    payloads: Vec<PayloadRecord>,
) -> ReferenceMaps {
    ReferenceMaps {
        rockets: name_map(&rockets),
        launchpads: name_map(&launchpads),
        payloads: payloads
            .into_iter()
            .filter_map(|p| p.id.clone().map(|id| (id, p)))
            .collect(),
    }
}

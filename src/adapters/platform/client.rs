//! Risk platform REST client
//!
//! Implements [`VendorStore`] over the platform's third-party API. The API token is
//! sent verbatim in the `Authorization` header.

use super::VendorStore;
use crate::adapters::retry::retry_request;
use crate::config::PlatformConfig;
use crate::domain::{PlatformError, Result, VendorSyncError};
use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, ClientBuilder, Method, RequestBuilder, Response};
use secrecy::ExposeSecret;
use serde_json::{json, Value};
use std::time::Duration;

const MERGE_PATCH_JSON: &str = "application/merge-patch+json";

/// Risk platform client
///
/// # Example
///
/// ```no_run
/// use vendorsync::adapters::platform::{RiskPlatformClient, VendorStore};
/// use vendorsync::config::PlatformConfig;
///
/// # async fn example() -> vendorsync::domain::Result<()> {
/// let client = RiskPlatformClient::new(PlatformConfig::default())?;
/// let third_parties = client.fetch_all().await?;
/// println!("{} third parties", third_parties.len());
/// # Ok(())
/// # }
/// ```
pub struct RiskPlatformClient {
    /// Base URL without trailing `/`
    base_url: String,

    /// HTTP client for making requests
    client: Client,

    /// Platform configuration
    config: PlatformConfig,
}

impl RiskPlatformClient {
    /// Create a new platform client
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built
    pub fn new(config: PlatformConfig) -> Result<Self> {
        let client = ClientBuilder::new()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .connect_timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| PlatformError::ConnectionFailed(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client,
            config,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorized(&self, method: Method, url: &str) -> RequestBuilder {
        let token = self.config.api_token.expose_secret().as_str().trim().to_string();
        self.client.request(method, url).header(AUTHORIZATION, token)
    }

    /// Send a request built by `build`, retrying, and decode the JSON body
    ///
    /// An empty body decodes to `null`.
    async fn execute<F>(&self, action: &str, build: F) -> Result<Value>
    where
        F: Fn() -> RequestBuilder + Send + Sync,
    {
        let build = &build;
        retry_request(&self.config.retry, || async move {
            let response = build()
                .send()
                .await
                .map_err(|e| PlatformError::ConnectionFailed(e.to_string()))?;

            decode(action, response).await
        })
        .await
    }

    async fn search(&self, field: &str, value: &str) -> Result<Vec<Value>> {
        let url = self.url("/v1/third-parties");
        let query = [(field, value)];

        tracing::debug!(field = %field, value = %value, "Searching third parties");

        let body = self
            .execute("search third parties", || {
                self.authorized(Method::GET, &url).query(&query)
            })
            .await?;

        Ok(items_of(body))
    }
}

async fn decode(action: &str, response: Response) -> Result<Value> {
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| PlatformError::InvalidResponse(e.to_string()))?;

    if !status.is_success() {
        let message = format!("Failed to {action}: {body}");
        let error = if status.is_server_error() {
            PlatformError::ServerError {
                status: status.as_u16(),
                message,
            }
        } else {
            PlatformError::ClientError {
                status: status.as_u16(),
                message,
            }
        };
        return Err(VendorSyncError::Platform(error));
    }

    if body.trim().is_empty() {
        return Ok(Value::Null);
    }

    serde_json::from_str(&body).map_err(|e| {
        VendorSyncError::Platform(PlatformError::InvalidResponse(format!(
            "Failed to {action}: {e}"
        )))
    })
}

/// The record list of a response: a bare list, or the `items` of a page
fn items_of(body: Value) -> Vec<Value> {
    match body {
        Value::Array(items) => items,
        Value::Object(mut page) => match page.remove("items") {
            Some(Value::Array(items)) => items,
            _ => Vec::new(),
        },
        _ => Vec::new(),
    }
}

#[async_trait]
impl VendorStore for RiskPlatformClient {
    async fn fetch_all(&self) -> Result<Vec<Value>> {
        let url = self.url("/bulk-v1/third-parties");
        let skip = self.config.skip_residual_risk.to_string();

        tracing::info!(url = %url, "Fetching third parties, this can take some time");

        let body = self
            .execute("fetch third parties", || {
                self.authorized(Method::GET, &url)
                    .query(&[("skip_residual_risk", skip.as_str())])
            })
            .await?;

        let records = items_of(body);
        tracing::info!(count = records.len(), "Fetched third parties");
        Ok(records)
    }

    async fn search_by_name(&self, name: &str) -> Result<Vec<Value>> {
        self.search("name", name).await
    }

    async fn search_by_domain(&self, domain: &str) -> Result<Vec<Value>> {
        self.search("domain", domain).await
    }

    async fn create(&self, record: &Value) -> Result<()> {
        let url = self.url("/v1/third-parties");

        self.execute("create third party", || {
            self.authorized(Method::POST, &url).json(record)
        })
        .await?;
        Ok(())
    }

    async fn put_custom_id(&self, uri: &str, custom_id: &str) -> Result<()> {
        let url = self.url(&format!("{uri}/custom-id"));
        let body = json!({"custom_id": custom_id});

        self.execute("submit custom_id", || {
            self.authorized(Method::PUT, &url).json(&body)
        })
        .await?;
        Ok(())
    }

    async fn patch_custom_metadata(&self, uri: &str, metadata: &Value) -> Result<()> {
        let url = self.url(&format!("{uri}/custom-metadata"));
        let payload = serde_json::to_vec(metadata)?;

        self.execute("submit custom_metadata", || {
            self.authorized(Method::PATCH, &url)
                .header(CONTENT_TYPE, MERGE_PATCH_JSON)
                .body(payload.clone())
        })
        .await?;
        Ok(())
    }

    async fn put_scoping(&self, third_party_id: &str, answers: &Value) -> Result<()> {
        let url = self.url(&format!("/v1/third-parties/{third_party_id}/scoping"));

        self.execute("submit scoping profile answers", || {
            self.authorized(Method::PUT, &url).json(answers)
        })
        .await?;
        Ok(())
    }

    fn base_url(&self) -> &str {
        &self.base_url
    }
}

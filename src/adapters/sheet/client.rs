//! Smartsheet REST client

use super::{SheetSource, SheetWriter};
use crate::adapters::retry::retry_request;
use crate::config::SheetConfig;
use crate::domain::{Result, RowUpdate, Sheet, SheetError, SheetId, SheetSummary, VendorSyncError};
use async_trait::async_trait;
use reqwest::{Client, ClientBuilder, Method, RequestBuilder, Response};
use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

/// Rows sent per update request
const ROW_UPDATE_BATCH_SIZE: usize = 400;

/// Client for the Smartsheet API
///
/// # Example
///
/// ```no_run
/// use vendorsync::adapters::sheet::{SheetSource, SmartsheetClient};
/// use vendorsync::config::SheetConfig;
/// use vendorsync::domain::SheetId;
///
/// # async fn example() -> vendorsync::domain::Result<()> {
/// let client = SmartsheetClient::new(SheetConfig::default())?;
/// let sheet = client.load_sheet(SheetId::new(4821)).await?;
/// println!("Loaded {} rows from {}", sheet.rows.len(), sheet.name);
/// # Ok(())
/// # }
/// ```
pub struct SmartsheetClient {
    base_url: String,
    client: Client,
    config: SheetConfig,
}

/// Paged listing returned by `GET /sheets`
#[derive(Debug, Deserialize)]
struct SheetListing {
    #[serde(default)]
    data: Vec<SheetSummary>,
}

/// Result envelope of write requests
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WriteResult {
    #[serde(default)]
    message: String,
    #[serde(default)]
    result_code: i64,
}

impl SmartsheetClient {
    /// Create a new sheet client
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built
    pub fn new(config: SheetConfig) -> Result<Self> {
        let client = ClientBuilder::new()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .connect_timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| SheetError::ConnectionFailed(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client,
            config,
        })
    }

    fn authorized(&self, method: Method, path: &str) -> RequestBuilder {
        self.client
            .request(method, format!("{}{}", self.base_url, path))
            .bearer_auth(self.config.access_token.expose_secret().as_str())
    }

    async fn execute<T, F>(&self, action: &str, build: F) -> Result<T>
    where
        T: DeserializeOwned,
        F: Fn() -> RequestBuilder + Send + Sync,
    {
        let build = &build;
        retry_request(&self.config.retry, || async move {
            let response = build()
                .send()
                .await
                .map_err(|e| SheetError::ConnectionFailed(e.to_string()))?;

            decode(action, response).await
        })
        .await
    }
}

async fn decode<T: DeserializeOwned>(action: &str, response: Response) -> Result<T> {
    let status = response.status();

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        let message = format!("Failed to {action}: {body}");
        let error = match status.as_u16() {
            404 => SheetError::SheetNotFound(message),
            code if status.is_server_error() => SheetError::ServerError {
                status: code,
                message,
            },
            code => SheetError::ClientError {
                status: code,
                message,
            },
        };
        return Err(VendorSyncError::Sheet(error));
    }

    response.json::<T>().await.map_err(|e| {
        VendorSyncError::Sheet(SheetError::InvalidResponse(format!(
            "Failed to {action}: {e}"
        )))
    })
}

#[async_trait]
impl SheetSource for SmartsheetClient {
    async fn list_sheets(&self) -> Result<Vec<SheetSummary>> {
        let listing: SheetListing = self
            .execute("list sheets", || {
                self.authorized(Method::GET, "/sheets")
                    .query(&[("includeAll", "true")])
            })
            .await?;

        Ok(listing.data)
    }

    async fn load_sheet(&self, sheet_id: SheetId) -> Result<Sheet> {
        let path = format!("/sheets/{sheet_id}");
        let sheet: Sheet = self
            .execute("load sheet", || self.authorized(Method::GET, &path))
            .await?;

        tracing::info!(
            sheet_id = %sheet.id,
            name = %sheet.name,
            rows = sheet.rows.len(),
            columns = sheet.columns.len(),
            "Loaded sheet"
        );

        Ok(sheet)
    }
}

#[async_trait]
impl SheetWriter for SmartsheetClient {
    async fn update_rows(&self, sheet_id: SheetId, updates: Vec<RowUpdate>) -> Result<()> {
        let path = format!("/sheets/{sheet_id}/rows");

        for batch in updates.chunks(ROW_UPDATE_BATCH_SIZE) {
            let result: WriteResult = self
                .execute("update rows", || {
                    self.authorized(Method::PUT, &path).json(batch)
                })
                .await?;

            if result.result_code != 0 {
                return Err(SheetError::UpdateFailed(format!(
                    "result code {}: {}",
                    result.result_code, result.message
                ))
                .into());
            }

            tracing::debug!(sheet_id = %sheet_id, rows = batch.len(), "Updated rows");
        }

        Ok(())
    }
}

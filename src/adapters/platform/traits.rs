//! Remote vendor store trait
//!
//! Abstracts the risk platform's third-party API so the sync coordinator can be
//! exercised against an in-memory store.

use crate::domain::Result;
use async_trait::async_trait;
use serde_json::Value;

/// Operations the sync needs from the risk platform
///
/// Records are exchanged as raw JSON; the schemas in
/// [`core::normalize`](crate::core::normalize) give them shape.
#[async_trait]
pub trait VendorStore: Send + Sync {
    /// Every third party visible to the token
    async fn fetch_all(&self) -> Result<Vec<Value>>;

    /// Third parties whose name matches `name`
    async fn search_by_name(&self, name: &str) -> Result<Vec<Value>>;

    /// Third parties registered under `domain`
    async fn search_by_domain(&self, domain: &str) -> Result<Vec<Value>>;

    /// Request a new third party
    async fn create(&self, record: &Value) -> Result<()>;

    /// Attach a custom id to the third party at `uri`
    async fn put_custom_id(&self, uri: &str, custom_id: &str) -> Result<()>;

    /// Merge-patch the custom metadata of the third party at `uri`
    async fn patch_custom_metadata(&self, uri: &str, metadata: &Value) -> Result<()>;

    /// Submit scoping answers for a third party
    async fn put_scoping(&self, third_party_id: &str, answers: &Value) -> Result<()>;

    /// Base URL of the store, for logging
    fn base_url(&self) -> &str;
}

//! Remote store backend
//!
//! The shared store is a filtered document table reached over REST. One
//! table holds every group's rows; queries always filter by `group_name`,
//! and a full sync for a group is delete-all-for-group followed by
//! insert-all. [`RemoteStore`] is the seam the sync store works against;
//! [`RestRemote`] is the production implementation.

use std::time::Duration;

use bosswatch_types::{RemoteRecord, RemoteSettings};

use super::error::RemoteError;

const TABLE: &str = "boss_tracker_data";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Backend operations the sync store needs from a remote document store.
#[async_trait::async_trait]
pub trait RemoteStore: Send + Sync {
    /// All rows for one group.
    async fn fetch_group(&self, group_slug: &str) -> Result<Vec<RemoteRecord>, RemoteError>;

    /// Delete every row for one group.
    async fn delete_group(&self, group_slug: &str) -> Result<(), RemoteError>;

    /// Insert rows. Empty input is a no-op.
    async fn insert_records(&self, records: &[RemoteRecord]) -> Result<(), RemoteError>;

    /// Every row in the table, for diagnostics.
    async fn fetch_all(&self) -> Result<Vec<RemoteRecord>, RemoteError>;
}

/// REST client for the shared table.
#[derive(Debug, Clone)]
pub struct RestRemote {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl RestRemote {
    pub fn new(settings: &RemoteSettings) -> Result<Self, RemoteError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            client,
            base_url: settings.url.trim_end_matches('/').to_string(),
            api_key: settings.api_key.clone(),
        })
    }

    fn table_url(&self) -> String {
        format!("{}/rest/v1/{TABLE}", self.base_url)
    }

    fn authed(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }
}

fn check_status(
    response: reqwest::Response,
    operation: &'static str,
) -> Result<reqwest::Response, RemoteError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(RemoteError::Status {
            operation,
            status: status.as_u16(),
        })
    }
}

#[async_trait::async_trait]
impl RemoteStore for RestRemote {
    async fn fetch_group(&self, group_slug: &str) -> Result<Vec<RemoteRecord>, RemoteError> {
        let filter = format!("eq.{group_slug}");
        let response = self
            .authed(self.client.get(self.table_url()))
            .query(&[("select", "*"), ("group_name", filter.as_str())])
            .send()
            .await?;
        let response = check_status(response, "select")?;
        response.json().await.map_err(RemoteError::Malformed)
    }

    async fn delete_group(&self, group_slug: &str) -> Result<(), RemoteError> {
        let filter = format!("eq.{group_slug}");
        let response = self
            .authed(self.client.delete(self.table_url()))
            .query(&[("group_name", filter.as_str())])
            .send()
            .await?;
        check_status(response, "delete")?;
        Ok(())
    }

    async fn insert_records(&self, records: &[RemoteRecord]) -> Result<(), RemoteError> {
        if records.is_empty() {
            return Ok(());
        }
        let response = self
            .authed(self.client.post(self.table_url()))
            .header("Prefer", "return=minimal")
            .json(&records)
            .send()
            .await?;
        check_status(response, "insert")?;
        Ok(())
    }

    async fn fetch_all(&self) -> Result<Vec<RemoteRecord>, RemoteError> {
        let response = self
            .authed(self.client.get(self.table_url()))
            .query(&[("select", "*"), ("order", "respawn_minutes.asc")])
            .send()
            .await?;
        let response = check_status(response, "select")?;
        response.json().await.map_err(RemoteError::Malformed)
    }
}

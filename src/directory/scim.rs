//! SCIM HTTP client for the SRAM group directory.
//!
//! `GET {base}/Groups/{id}` and `GET {base}/Groups`, bearer-authenticated.
//! The listing is paged with `startIndex`/`count` until `totalResults` is reached.

use reqwest::StatusCode;
use reqwest::header::ACCEPT;

use super::{DirectoryError, GroupDirectory, ScimGroup, ScimListResponse};
use crate::config::Config;

const SCIM_CONTENT_TYPE: &str = "application/scim+json";

/// `count` requested per listing page. Servers may return fewer.
const LIST_PAGE_SIZE: usize = 100;

/// Group directory backed by a SCIM v2 endpoint.
#[derive(Clone)]
pub struct ScimClient {
    http_client: reqwest::Client,
    base_url: String,
    api_token: String,
}

impl ScimClient {
    pub fn new(http_client: reqwest::Client, base_url: &str, api_token: &str) -> Self {
        Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_token: api_token.to_string(),
        }
    }

    pub fn from_config(http_client: reqwest::Client, config: &Config) -> Self {
        Self::new(http_client, &config.scim_base_url, &config.scim_api_token)
    }

    fn groups_url(&self) -> String {
        format!("{}/Groups", self.base_url)
    }

    fn get(&self, url: String) -> reqwest::RequestBuilder {
        self.http_client
            .get(url)
            .bearer_auth(&self.api_token)
            .header(ACCEPT, SCIM_CONTENT_TYPE)
    }

    /// One page of `GET /Groups`. `None` if the directory refused the listing.
    async fn list_page(
        &self,
        start_index: usize,
    ) -> Result<Option<ScimListResponse>, DirectoryError> {
        let resp = self
            .get(self.groups_url())
            .query(&[("startIndex", start_index), ("count", LIST_PAGE_SIZE)])
            .send()
            .await
            .map_err(|e| DirectoryError::Request(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            tracing::warn!(
                status = status.as_u16(),
                start_index,
                "SCIM group listing failed"
            );
            return Ok(None);
        }

        resp.json()
            .await
            .map(Some)
            .map_err(|e| DirectoryError::Decode(e.to_string()))
    }
}

impl GroupDirectory for ScimClient {
    async fn get_group(&self, id: &str) -> Result<Option<ScimGroup>, DirectoryError> {
        let resp = self
            .get(format!("{}/{}", self.groups_url(), id))
            .send()
            .await
            .map_err(|e| DirectoryError::Request(e.to_string()))?;

        let status = resp.status();
        if status == StatusCode::NOT_FOUND {
            tracing::debug!(group_id = id, "SCIM group not found");
            return Ok(None);
        }
        if !status.is_success() {
            return Err(DirectoryError::Status(status.as_u16()));
        }

        resp.json()
            .await
            .map(Some)
            .map_err(|e| DirectoryError::Decode(e.to_string()))
    }

    async fn list_all_groups(&self) -> Result<Option<Vec<ScimGroup>>, DirectoryError> {
        let mut groups: Vec<ScimGroup> = Vec::new();

        loop {
            // SCIM indices are 1-based
            let Some(page) = self.list_page(groups.len() + 1).await? else {
                return Ok(None);
            };
            let total_results = page.total_results;
            let returned = page.resources.len();
            groups.extend(page.resources);

            if groups.len() >= total_results {
                break;
            }
            if returned == 0 {
                // A partial listing must never stand in for the whole directory
                tracing::warn!(
                    total_results,
                    received = groups.len(),
                    "SCIM group listing ended before totalResults"
                );
                return Ok(None);
            }
        }

        tracing::debug!(returned = groups.len(), "Fetched SCIM group listing");
        Ok(Some(groups))
    }
}

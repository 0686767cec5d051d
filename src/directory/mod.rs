//! External group directory (SCIM).
//!
//! Provides the `GroupDirectory` trait consumed by the resolver, the SCIM
//! wire types it returns, and the HTTP client talking to SRAM.

pub mod mapping;
pub mod scim;

use serde::{Deserialize, Serialize};

/// A SCIM group resource as returned by the directory.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScimGroup {
    pub id: String,
    pub display_name: String,
    #[serde(default)]
    pub external_id: String,
    #[serde(default)]
    pub members: Vec<ScimMember>,
    #[serde(default)]
    pub meta: ScimMeta,
    /// SRAM group extension. SRAM sends it under its schema URN.
    #[serde(
        rename = "groupInfo",
        alias = "urn:mace:surf.nl:sram:scim:extension:Group",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub group_info: Option<ScimGroupInfo>,
}

impl ScimGroup {
    /// Directory-reported URN suffix (`org:collab[:group]`), if any.
    pub fn urn_suffix(&self) -> Option<&str> {
        self.group_info
            .as_ref()
            .map(|info| info.urn.as_str())
            .filter(|urn| !urn.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ScimMember {
    #[serde(default)]
    pub display: String,
    pub value: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScimMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ScimGroupInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub urn: String,
    #[serde(default)]
    pub links: Vec<ScimLink>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ScimLink {
    pub name: String,
    pub value: String,
}

/// SCIM `ListResponse` envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct ScimListResponse {
    #[serde(rename = "totalResults", default)]
    pub total_results: usize,
    #[serde(rename = "Resources", default)]
    pub resources: Vec<ScimGroup>,
}

/// Group directory consulted by the resolver.
///
/// Implementations must be `Send + Sync`; the resolver is shared across
/// Axum handlers.
pub trait GroupDirectory: Send + Sync {
    /// Fetch one group by directory id. `None` if the directory has no such group.
    fn get_group(
        &self,
        id: &str,
    ) -> impl std::future::Future<Output = Result<Option<ScimGroup>, DirectoryError>> + Send;

    /// Fetch every group. `None` means the directory could not produce a listing.
    fn list_all_groups(
        &self,
    ) -> impl std::future::Future<Output = Result<Option<Vec<ScimGroup>>, DirectoryError>> + Send;
}

#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    #[error("directory request failed: {0}")]
    Request(String),

    #[error("directory responded with status {0}")]
    Status(u16),

    #[error("failed to decode directory response: {0}")]
    Decode(String),
}

//! Resolver input and output types.

use serde::{Deserialize, Serialize};

use crate::urn::format_urn;

/// A collaboration (and some of its sub-groups) asserted for a user.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CollaborationRequest {
    pub organization: String,
    pub collaboration_name: String,
    #[serde(default)]
    pub group_ids: Vec<String>,
}

impl CollaborationRequest {
    pub fn new(
        organization: impl Into<String>,
        collaboration_name: impl Into<String>,
        group_ids: Vec<String>,
    ) -> Self {
        Self {
            organization: organization.into(),
            collaboration_name: collaboration_name.into(),
            group_ids,
        }
    }

    /// URN of the collaboration's own group.
    pub fn collaboration_urn(&self) -> String {
        format_urn(&self.organization, &self.collaboration_name, None)
    }

    /// URNs of the requested sub-groups, in request order.
    pub fn group_urns(&self) -> impl Iterator<Item = String> + '_ {
        self.group_ids
            .iter()
            .map(|group| format_urn(&self.organization, &self.collaboration_name, Some(group)))
    }
}

/// Persisted mapping from a group URN to the directory's id for that group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrnCacheEntry {
    pub urn: String,
    pub directory_id: String,
}

/// A directory group, resolved for a URN.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupRecord {
    pub id: String,
    pub urn: String,
    pub display_name: String,
    pub description: Option<String>,
    pub url: Option<String>,
    pub logo_url: Option<String>,
    pub external_id: String,
    pub members: Vec<GroupMember>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupMember {
    pub display_name: String,
    pub external_id: String,
}

/// One resolved collaboration per [`CollaborationRequest`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Collaboration {
    pub organization: String,
    pub collaboration_group: GroupRecord,
    pub groups: Vec<GroupRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_urns() {
        let request = CollaborationRequest::new("surf", "proj1", vec!["g1".into(), "g2".into()]);
        assert_eq!(request.collaboration_urn(), "urn:mace:surf.nl:sram:group:surf:proj1");
        let groups: Vec<String> = request.group_urns().collect();
        assert_eq!(
            groups,
            vec![
                "urn:mace:surf.nl:sram:group:surf:proj1:g1",
                "urn:mace:surf.nl:sram:group:surf:proj1:g2",
            ]
        );
    }

    #[test]
    fn test_request_deserializes_without_groups() {
        let request: CollaborationRequest = serde_json::from_value(serde_json::json!({
            "organization": "surf",
            "collaboration_name": "proj1"
        }))
        .unwrap();
        assert!(request.group_ids.is_empty());
        assert_eq!(request.group_urns().count(), 0);
    }
}

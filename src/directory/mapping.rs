//! SCIM group -> `GroupRecord` mapping.

use super::ScimGroup;
use crate::model::{GroupMember, GroupRecord};

/// Link name carrying the collaboration's page in the SRAM portal.
pub const LINK_SBS_URL: &str = "sbs_url";
/// Link name carrying the collaboration logo.
pub const LINK_LOGO: &str = "logo";

/// Map a directory group to the record returned for `urn`.
pub fn to_group_record(urn: &str, group: &ScimGroup) -> GroupRecord {
    let info = group.group_info.as_ref();

    GroupRecord {
        id: group.id.clone(),
        urn: urn.to_string(),
        display_name: group.display_name.clone(),
        description: info.and_then(|i| i.description.clone()),
        url: link_value(group, LINK_SBS_URL),
        logo_url: link_value(group, LINK_LOGO),
        external_id: group.external_id.clone(),
        members: group
            .members
            .iter()
            .map(|m| GroupMember {
                display_name: m.display.clone(),
                external_id: m.value.clone(),
            })
            .collect(),
    }
}

fn link_value(group: &ScimGroup, name: &str) -> Option<String> {
    group
        .group_info
        .as_ref()?
        .links
        .iter()
        .find(|link| link.name == name)
        .map(|link| link.value.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::{ScimGroupInfo, ScimLink, ScimMember, ScimMeta};

    fn group(links: Vec<ScimLink>) -> ScimGroup {
        ScimGroup {
            id: "scim-1".into(),
            display_name: "Project One".into(),
            external_id: "ext-1".into(),
            members: vec![
                ScimMember {
                    display: "Alice".into(),
                    value: "user-a".into(),
                },
                ScimMember {
                    display: "Bob".into(),
                    value: "user-b".into(),
                },
            ],
            meta: ScimMeta::default(),
            group_info: Some(ScimGroupInfo {
                description: Some("First project".into()),
                urn: "surf:proj1".into(),
                links,
            }),
        }
    }

    #[test]
    fn test_links_map_to_url_and_logo() {
        let g = group(vec![
            ScimLink {
                name: "sbs_url".into(),
                value: "https://sbs.example.org/collaborations/1".into(),
            },
            ScimLink {
                name: "logo".into(),
                value: "https://sbs.example.org/logo/1.png".into(),
            },
        ]);

        let record = to_group_record("urn:mace:surf.nl:sram:group:surf:proj1", &g);

        assert_eq!(record.url.as_deref(), Some("https://sbs.example.org/collaborations/1"));
        assert_eq!(record.logo_url.as_deref(), Some("https://sbs.example.org/logo/1.png"));
    }

    #[test]
    fn test_no_matching_links_leaves_both_empty() {
        let g = group(vec![ScimLink {
            name: "wiki".into(),
            value: "https://wiki.example.org".into(),
        }]);

        let record = to_group_record("urn:mace:surf.nl:sram:group:surf:proj1", &g);

        assert_eq!(record.url, None);
        assert_eq!(record.logo_url, None);
    }

    #[test]
    fn test_fields_copied_verbatim() {
        let record = to_group_record("urn:mace:surf.nl:sram:group:surf:proj1", &group(vec![]));

        assert_eq!(record.id, "scim-1");
        assert_eq!(record.urn, "urn:mace:surf.nl:sram:group:surf:proj1");
        assert_eq!(record.display_name, "Project One");
        assert_eq!(record.description.as_deref(), Some("First project"));
        assert_eq!(record.external_id, "ext-1");
        assert_eq!(
            record.members,
            vec![
                GroupMember {
                    display_name: "Alice".into(),
                    external_id: "user-a".into()
                },
                GroupMember {
                    display_name: "Bob".into(),
                    external_id: "user-b".into()
                },
            ]
        );
    }

    #[test]
    fn test_group_without_extension() {
        let mut g = group(vec![]);
        g.group_info = None;

        let record = to_group_record("urn:mace:surf.nl:sram:group:surf:proj1", &g);

        assert_eq!(record.description, None);
        assert_eq!(record.url, None);
        assert_eq!(record.logo_url, None);
    }
}

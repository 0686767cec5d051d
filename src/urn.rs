//! Group URN formatting and role-claim parsing.
//!
//! Group URNs follow the SRAM template
//! `urn:mace:surf.nl:sram:group:{organization}:{collaboration}[:{group}]`.
//! Role claims asserted by the identity provider carry the same URNs; the
//! parser turns each claim into a tagged [`ClaimMatch`] and
//! [`requests_from_roles`] folds those into one request per collaboration.

use regex::Regex;
use std::sync::LazyLock;

use crate::model::CollaborationRequest;

/// Fixed prefix shared by every group URN.
pub const URN_PREFIX: &str = "urn:mace:surf.nl:sram:group:";

static CLAIM_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^urn:mace:surf\.nl:sram:group:([a-z0-9_]+):([a-z0-9_]+)(?::([a-z0-9_]+))?$")
        .expect("claim pattern is a valid regex")
});

/// Build the URN for a collaboration, or for one of its sub-groups.
pub fn format_urn(organization: &str, collaboration: &str, group: Option<&str>) -> String {
    match group {
        Some(group) => format!("{URN_PREFIX}{organization}:{collaboration}:{group}"),
        None => format!("{URN_PREFIX}{organization}:{collaboration}"),
    }
}

/// Prefix a directory-reported URN suffix (`org:collab[:group]`).
pub fn urn_from_suffix(suffix: &str) -> String {
    format!("{URN_PREFIX}{suffix}")
}

/// Result of matching a single role claim against the group URN template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClaimMatch<'a> {
    Collaboration {
        organization: &'a str,
        collaboration: &'a str,
    },
    Group {
        organization: &'a str,
        collaboration: &'a str,
        group: &'a str,
    },
    NoMatch,
}

/// Parse a role claim. Anything that is not a well-formed group URN is `NoMatch`.
pub fn parse_claim(claim: &str) -> ClaimMatch<'_> {
    let Some(caps) = CLAIM_PATTERN.captures(claim) else {
        return ClaimMatch::NoMatch;
    };

    let (Some(organization), Some(collaboration)) = (caps.get(1), caps.get(2)) else {
        return ClaimMatch::NoMatch;
    };

    match caps.get(3) {
        Some(group) => ClaimMatch::Group {
            organization: organization.as_str(),
            collaboration: collaboration.as_str(),
            group: group.as_str(),
        },
        None => ClaimMatch::Collaboration {
            organization: organization.as_str(),
            collaboration: collaboration.as_str(),
        },
    }
}

/// Fold role claims into one request per collaboration.
///
/// Collaborations appear in the order they are first mentioned, and a
/// sub-group claim implies its collaboration even without a separate
/// collaboration claim. Duplicate sub-groups are dropped.
pub fn requests_from_roles<S: AsRef<str>>(roles: &[S]) -> Vec<CollaborationRequest> {
    let mut requests: Vec<CollaborationRequest> = Vec::new();

    for role in roles {
        let (organization, collaboration, group) = match parse_claim(role.as_ref()) {
            ClaimMatch::Collaboration {
                organization,
                collaboration,
            } => (organization, collaboration, None),
            ClaimMatch::Group {
                organization,
                collaboration,
                group,
            } => (organization, collaboration, Some(group)),
            ClaimMatch::NoMatch => continue,
        };

        let index = match requests.iter().position(|r| {
            r.organization == organization && r.collaboration_name == collaboration
        }) {
            Some(index) => index,
            None => {
                requests.push(CollaborationRequest::new(organization, collaboration, Vec::new()));
                requests.len() - 1
            }
        };

        if let Some(group) = group {
            let request = &mut requests[index];
            if !request.group_ids.iter().any(|g| g == group) {
                request.group_ids.push(group.to_string());
            }
        }
    }

    requests
}

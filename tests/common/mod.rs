//! Test utilities: SCIM fixtures, wiremock setup, test app builder.

#![allow(dead_code)]

use conflux::cache::AnyCache;
use conflux::cache::memory::InMemoryUrnCache;
use conflux::config::Config;
use conflux::directory::scim::ScimClient;
use conflux::resolver::CollaborationResolver;
use conflux::{AppState, create_app};
use serde_json::json;
use std::sync::Arc;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const SCIM_PATH: &str = "/scim/v2";

/// SRAM-style SCIM group resource.
pub fn scim_group(id: &str, urn_suffix: &str) -> serde_json::Value {
    json!({
        "schemas": [
            "urn:ietf:params:scim:schemas:core:2.0:Group",
            "urn:mace:surf.nl:sram:scim:extension:Group"
        ],
        "id": id,
        "displayName": format!("Group {urn_suffix}"),
        "externalId": format!("ext-{id}"),
        "members": [
            {"display": "Alice Example", "value": "user-alice"},
            {"display": "Bob Example", "value": "user-bob"}
        ],
        "meta": {"resourceType": "Group", "location": format!("/Groups/{id}")},
        "urn:mace:surf.nl:sram:scim:extension:Group": {
            "description": format!("Description of {urn_suffix}"),
            "urn": urn_suffix,
            "links": [
                {"name": "sbs_url", "value": format!("https://sbs.example.org/{id}")},
                {"name": "logo", "value": format!("https://sbs.example.org/logo/{id}.png")}
            ]
        }
    })
}

/// The standard directory: `surf:proj1` with sub-groups `g1`, `g2`, plus `uva:beta`.
pub fn directory_groups() -> Vec<serde_json::Value> {
    vec![
        scim_group("id-proj1", "surf:proj1"),
        scim_group("id-g1", "surf:proj1:g1"),
        scim_group("id-g2", "surf:proj1:g2"),
        scim_group("id-beta", "uva:beta"),
    ]
}

/// Mount `GET /Groups` returning `groups`, expected `times` times.
pub async fn mount_listing(server: &MockServer, groups: Vec<serde_json::Value>, times: u64) {
    Mock::given(method("GET"))
        .and(path(format!("{SCIM_PATH}/Groups")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "schemas": ["urn:ietf:params:scim:api:messages:2.0:ListResponse"],
            "totalResults": groups.len(),
            "Resources": groups
        })))
        .expect(times)
        .mount(server)
        .await;
}

/// Mount `GET /Groups/{id}` returning `group`, expected `times` times.
pub async fn mount_group(server: &MockServer, group: serde_json::Value, times: u64) {
    let id = group["id"].as_str().unwrap_or_default().to_string();
    Mock::given(method("GET"))
        .and(path(format!("{SCIM_PATH}/Groups/{id}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(group))
        .expect(times)
        .mount(server)
        .await;
}

/// Config pointing the SCIM client at the mock server.
pub fn test_config(server: &MockServer) -> Config {
    Config {
        scim_base_url: format!("{}{SCIM_PATH}", server.uri()),
        ..Config::test_default()
    }
}

/// Build a test app with an in-memory URN cache.
pub fn build_test_app(server: &MockServer) -> (axum::Router, Arc<AppState>) {
    build_test_app_with(test_config(server), AnyCache::Memory(InMemoryUrnCache::new()))
}

/// Build a test app with a custom Config and cache backend.
pub fn build_test_app_with(config: Config, cache: AnyCache) -> (axum::Router, Arc<AppState>) {
    let directory = ScimClient::from_config(reqwest::Client::new(), &config);

    let state = Arc::new(AppState {
        config,
        resolver: Arc::new(CollaborationResolver::new(directory, cache)),
    });

    let app = create_app(state.clone());
    (app, state)
}

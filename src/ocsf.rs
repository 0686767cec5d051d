//! OCSF (Open Cybersecurity Schema Framework) structured event logging.
//!
//! Group directory activity is reported as Group Management (3006) events,
//! emitted via `tracing::info!` on the `ocsf` target as structured JSON.
//! Never panics; serialization errors are silently dropped.

use serde_json::json;
use std::time::{SystemTime, UNIX_EPOCH};

// OCSF event class UIDs
pub const CLASS_GROUP_MANAGEMENT: u32 = 3006;

// Activity IDs
pub const ACTIVITY_OTHER: u32 = 99;

// Status IDs
pub const STATUS_SUCCESS: u32 = 1;
pub const STATUS_FAILURE: u32 = 2;

// Severity IDs
pub const SEVERITY_INFORMATIONAL: u32 = 1;
pub const SEVERITY_LOW: u32 = 2;
pub const SEVERITY_MEDIUM: u32 = 3;
pub const SEVERITY_HIGH: u32 = 4;

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

fn severity_name(id: u32) -> &'static str {
    match id {
        SEVERITY_INFORMATIONAL => "Informational",
        SEVERITY_LOW => "Low",
        SEVERITY_MEDIUM => "Medium",
        SEVERITY_HIGH => "High",
        5 => "Critical",
        _ => "Unknown",
    }
}

fn status_name(id: u32) -> &'static str {
    match id {
        STATUS_SUCCESS => "Success",
        _ => "Failure",
    }
}

fn emit(event: &serde_json::Value) {
    if let Ok(json) = serde_json::to_string(event) {
        tracing::info!(target: "ocsf", "{}", json);
    }
}

fn group_management_event(
    activity_name: &str,
    status_id: u32,
    severity_id: u32,
    group: Option<&str>,
    message: &str,
) -> serde_json::Value {
    let mut event = json!({
        "class_uid": CLASS_GROUP_MANAGEMENT,
        "class_name": "Group Management",
        "activity_id": ACTIVITY_OTHER,
        "activity_name": activity_name,
        "severity_id": severity_id,
        "severity": severity_name(severity_id),
        "status_id": status_id,
        "status": status_name(status_id),
        "time": now_millis(),
        "metadata": {
            "product": {
                "name": "conflux",
                "version": env!("CARGO_PKG_VERSION"),
                "vendor_name": "Conflux"
            }
        },
        "message": message,
    });

    if let Some(urn) = group {
        event["group"] = json!({ "uid": urn });
    }
    event
}

/// The URN cache was rebuilt from a full directory listing.
pub fn cache_refresh_event(cached: usize, skipped: usize) {
    emit(&group_management_event(
        "Cache Refresh",
        STATUS_SUCCESS,
        SEVERITY_INFORMATIONAL,
        None,
        &format!("URN cache rebuilt with {cached} groups ({skipped} without URN skipped)"),
    ));
}

/// A resolve call failed. `urn` is set when a specific group was missing.
pub fn resolution_failure_event(urn: Option<&str>, reason: &str) {
    let severity_id = if urn.is_some() {
        SEVERITY_MEDIUM
    } else {
        SEVERITY_HIGH
    };
    emit(&group_management_event(
        "Resolve",
        STATUS_FAILURE,
        severity_id,
        urn,
        reason,
    ));
}

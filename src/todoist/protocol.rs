//! Wire shapes of the Todoist Sync API.
//!
//! One endpoint serves both directions: a request carries a sync token plus
//! optional commands, the response carries the changed resources and a
//! per-command status map.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::reconcile::ItemUpdate;
use crate::types::{Item, ItemId, Label, LabelId, Project};

/// Resources requested on every sync call.
pub const RESOURCE_TYPES: &[&str] = &["projects", "items", "labels"];

/// Sync token asking for a full state dump.
pub const FULL_SYNC_TOKEN: &str = "*";

#[derive(Debug, Serialize)]
pub struct SyncRequest {
    pub sync_token: String,
    pub resource_types: Vec<&'static str>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub commands: Vec<Command>,
}

impl SyncRequest {
    pub fn new(sync_token: impl Into<String>, commands: Vec<Command>) -> Self {
        Self {
            sync_token: sync_token.into(),
            resource_types: RESOURCE_TYPES.to_vec(),
            commands,
        }
    }
}

/// A single queued mutation. The uuid keys the per-command status in the
/// response.
#[derive(Debug, Serialize)]
pub struct Command {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub uuid: String,
    pub args: ItemUpdateArgs,
}

#[derive(Debug, Serialize)]
pub struct ItemUpdateArgs {
    pub id: ItemId,
    pub labels: Vec<LabelId>,
}

impl Command {
    /// Rewrites one item's label array.
    pub fn item_update(update: &ItemUpdate) -> Self {
        Self {
            kind: "item_update",
            uuid: Uuid::new_v4().to_string(),
            args: ItemUpdateArgs {
                id: update.id,
                labels: update.labels.clone(),
            },
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SyncResponse {
    pub sync_token: String,
    #[serde(default)]
    pub full_sync: bool,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub items: Vec<Item>,
    #[serde(default)]
    pub labels: Vec<Label>,
    #[serde(default)]
    pub sync_status: HashMap<String, CommandStatus>,
}

/// Status of one command: the literal string `"ok"` or an error object.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum CommandStatus {
    Ok(String),
    Failed { error_code: i64, error: String },
}

impl CommandStatus {
    pub fn is_ok(&self) -> bool {
        matches!(self, CommandStatus::Ok(s) if s == "ok")
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            CommandStatus::Ok(_) => None,
            CommandStatus::Failed { error, .. } => Some(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn test_read_request_omits_commands() {
        let request = SyncRequest::new(FULL_SYNC_TOKEN, Vec::new());
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["sync_token"], "*");
        assert_eq!(
            json["resource_types"],
            serde_json::json!(["projects", "items", "labels"])
        );
        assert!(json.get("commands").is_none());
    }

    #[test]
    fn test_item_update_command_shape() {
        let command = Command::item_update(&ItemUpdate {
            id: 17,
            labels: vec![3, 42],
        });
        let json = serde_json::to_value(&command).unwrap();

        assert_eq!(json["type"], "item_update");
        assert_eq!(json["args"]["id"], 17);
        assert_eq!(json["args"]["labels"], serde_json::json!([3, 42]));
        // Well-formed v4 uuid, unique per command.
        assert_eq!(json["uuid"].as_str().unwrap().len(), 36);
        let second = Command::item_update(&ItemUpdate {
            id: 17,
            labels: vec![3, 42],
        });
        assert_ne!(command.uuid, second.uuid);
    }

    #[test]
    fn test_response_parses_minimal_body() {
        let response: SyncResponse =
            serde_json::from_str(r#"{"sync_token": "abc123"}"#).unwrap();

        assert_eq!(response.sync_token, "abc123");
        assert!(!response.full_sync);
        assert!(response.projects.is_empty());
        assert!(response.sync_status.is_empty());
    }

    #[test]
    fn test_sync_status_distinguishes_ok_from_error() {
        let response: SyncResponse = serde_json::from_str(
            r#"{
                "sync_token": "t",
                "sync_status": {
                    "aaaa": "ok",
                    "bbbb": {"error_code": 22, "error": "Item not found"}
                }
            }"#,
        )
        .unwrap();

        assert!(response.sync_status["aaaa"].is_ok());
        let failed = &response.sync_status["bbbb"];
        assert!(!failed.is_ok());
        assert_eq!(failed.error_message(), Some("Item not found"));
    }

    #[test]
    fn test_full_response_round_trip() {
        let raw = r#"{
            "sync_token": "next",
            "full_sync": true,
            "projects": [{"id": 1, "name": "Errands.", "is_deleted": 0, "is_archived": 0}],
            "items": [{
                "id": 10, "project_id": 1, "content": "Buy stamps",
                "child_order": 1, "checked": 0, "labels": [5], "is_deleted": 0
            }],
            "labels": [{"id": 5, "name": "next_action", "is_deleted": 0}]
        }"#;
        let response: SyncResponse = serde_json::from_str(raw).unwrap();

        assert!(response.full_sync);
        assert_eq!(response.projects[0].name, "Errands.");
        assert_eq!(response.items[0].labels, vec![5]);
        assert_eq!(response.labels[0].name, "next_action");
        let _: Value = serde_json::to_value(&response.items[0]).unwrap();
    }
}

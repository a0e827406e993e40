//! Core types for the next-action labeller.
//!
//! The wire shapes follow the Todoist Sync API: numeric ids, 0/1 integer
//! booleans, and the legacy `due_date_utc` timestamp format.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier of a project (task list).
pub type ProjectId = i64;

/// Identifier of an item (task).
pub type ItemId = i64;

/// Identifier of a label.
pub type LabelId = i64;

/// How the tasks of one sibling group are worked through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Discipline {
    /// One at a time, in sibling order.
    Serial,
    /// All at once, in any order.
    Parallel,
}

impl Discipline {
    pub fn as_str(&self) -> &'static str {
        match self {
            Discipline::Serial => "serial",
            Discipline::Parallel => "parallel",
        }
    }
}

/// A project as returned by the sync endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    #[serde(default, with = "int_bool")]
    pub is_deleted: bool,
    #[serde(default, with = "int_bool")]
    pub is_archived: bool,
}

/// An item (task) as returned by the sync endpoint.
///
/// `labels` is the only field this tool ever writes back; everything else is
/// read-only input to the propagation rules.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub project_id: ProjectId,
    #[serde(default)]
    pub parent_id: Option<ItemId>,
    pub content: String,
    /// Position among siblings sharing the same parent.
    #[serde(default)]
    pub child_order: i64,
    /// Completion flag (`checked` on the wire, 0 or 1).
    #[serde(default, with = "int_bool")]
    pub checked: bool,
    #[serde(default, with = "due_date")]
    pub due_date_utc: Option<DateTime<Utc>>,
    #[serde(default)]
    pub labels: Vec<LabelId>,
    #[serde(default, with = "int_bool")]
    pub is_deleted: bool,
}

impl Item {
    /// Items whose content starts with `*` are notes, not completable tasks,
    /// and are invisible to propagation.
    pub fn is_note(&self) -> bool {
        self.content.starts_with('*')
    }
}

/// A label as returned by the sync endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Label {
    pub id: LabelId,
    pub name: String,
    #[serde(default, with = "int_bool")]
    pub is_deleted: bool,
}

/// Serde adapter for the API's 0/1 integer booleans.
mod int_bool {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(i64::from(*value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        Ok(i64::deserialize(deserializer)? != 0)
    }
}

/// Serde adapter for the `due_date_utc` timestamp format, e.g.
/// `Mon 07 Aug 2017 20:59:59 +0000`.
///
/// An unparseable value degrades to "no due date" instead of failing the
/// whole sync response.
mod due_date {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%a %d %b %Y %H:%M:%S %z";

    pub fn serialize<S: Serializer>(
        value: &Option<DateTime<Utc>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(ts) => serializer.serialize_some(&ts.format(FORMAT).to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<DateTime<Utc>>, D::Error> {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        Ok(raw.and_then(|s| {
            DateTime::parse_from_str(&s, FORMAT)
                .ok()
                .map(|ts| ts.with_timezone(&Utc))
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn item_deserializes_wire_shape() {
        let item: Item = serde_json::from_str(
            r#"{
                "id": 101,
                "project_id": 7,
                "parent_id": null,
                "content": "Write the report",
                "child_order": 3,
                "checked": 0,
                "due_date_utc": "Mon 07 Aug 2017 20:59:59 +0000",
                "labels": [42, 7],
                "is_deleted": 0
            }"#,
        )
        .unwrap();

        assert_eq!(item.id, 101);
        assert_eq!(item.parent_id, None);
        assert!(!item.checked);
        assert_eq!(item.labels, vec![42, 7]);
        let due = item.due_date_utc.unwrap();
        assert_eq!(due, Utc.with_ymd_and_hms(2017, 8, 7, 20, 59, 59).unwrap());
    }

    #[test]
    fn item_tolerates_missing_optionals() {
        let item: Item =
            serde_json::from_str(r#"{"id": 1, "project_id": 2, "content": "Call the bank"}"#)
                .unwrap();

        assert_eq!(item.child_order, 0);
        assert!(!item.checked);
        assert!(item.due_date_utc.is_none());
        assert!(item.labels.is_empty());
        assert!(!item.is_deleted);
    }

    #[test]
    fn unparseable_due_date_degrades_to_none() {
        let item: Item = serde_json::from_str(
            r#"{"id": 1, "project_id": 2, "content": "x", "due_date_utc": "not a date"}"#,
        )
        .unwrap();

        assert!(item.due_date_utc.is_none());
    }

    #[test]
    fn due_date_round_trips_through_cache_format() {
        let item: Item = serde_json::from_str(
            r#"{"id": 1, "project_id": 2, "content": "x",
                "due_date_utc": "Tue 01 Jan 2030 00:00:00 +0000"}"#,
        )
        .unwrap();
        let json = serde_json::to_string(&item).unwrap();
        let back: Item = serde_json::from_str(&json).unwrap();

        assert_eq!(back.due_date_utc, item.due_date_utc);
    }

    #[test]
    fn note_marker_is_not_trimmed() {
        let note: Item =
            serde_json::from_str(r#"{"id": 1, "project_id": 2, "content": "* groceries"}"#)
                .unwrap();
        let task: Item =
            serde_json::from_str(r#"{"id": 2, "project_id": 2, "content": " * indented"}"#)
                .unwrap();

        assert!(note.is_note());
        assert!(!task.is_note());
    }
}

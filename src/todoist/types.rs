//! Todoist API v1 resource shapes.

use serde::{Deserialize, Deserializer, Serialize};

/// A project the user can pick as the standup source.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Project {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub color: Option<String>,
}

/// A named pipeline stage within a project.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Section {
    pub id: String,
    pub name: String,
    #[serde(rename = "section_order", alias = "order", default)]
    pub order: i64,
}

impl Section {
    pub fn new(id: impl Into<String>, name: impl Into<String>, order: i64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            order,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
pub struct Task {
    pub id: String,
    #[serde(default)]
    pub section_id: Option<String>,
    pub content: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, deserialize_with = "deserialize_checked")]
    pub checked: bool,
    #[serde(default)]
    pub labels: Vec<String>,
}

impl Task {
    pub fn new(id: impl Into<String>, section_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            section_id: Some(section_id.into()),
            content: content.into(),
            ..Default::default()
        }
    }
}

/// Request body for `POST /tasks`.
#[derive(Serialize, Clone, Debug)]
pub struct NewTask {
    pub content: String,
    pub description: String,
    pub project_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section_id: Option<String>,
    pub priority: u8,
}

/// Extra payload attached to an activity event.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
pub struct ActivityExtra {
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub labels: Option<Vec<String>>,
}

/// One audit-log entry from `GET /activities`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
pub struct ActivityEvent {
    #[serde(default)]
    pub id: String,
    pub object_id: String,
    pub object_type: String,
    pub event_type: String,
    #[serde(default)]
    pub event_date: String,
    #[serde(default)]
    pub parent_project_id: Option<String>,
    #[serde(default)]
    pub parent_item_id: Option<String>,
    #[serde(rename = "extra_data", default)]
    pub extra: Option<ActivityExtra>,
}

/// Paginated list envelope used by every v1 list endpoint.
#[derive(Deserialize, Debug)]
pub(crate) struct Page<T> {
    pub results: Vec<T>,
    #[serde(default)]
    pub next_cursor: Option<String>,
}

/// Older payloads sent `checked` as `"1"`/`"0"` or as an integer.
fn deserialize_checked<'de, D>(deserializer: D) -> std::result::Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Int(i64),
        Text(String),
    }

    Ok(match Option::<Flag>::deserialize(deserializer)? {
        None => false,
        Some(Flag::Bool(b)) => b,
        Some(Flag::Int(n)) => n != 0,
        Some(Flag::Text(s)) => matches!(s.trim(), "1" | "true" | "True"),
    })
}

//! Domain DTOs for the task API.
//!
//! # Design
//! These types mirror the mock-server's schema but are defined independently.
//! Integration tests catch any schema drift between the two crates.

use serde::{Deserialize, Serialize};

/// Status assigned to a new task when none is supplied.
pub const DEFAULT_STATUS: &str = "pending";

/// Conventional status values offered as table filter shortcuts. The `status`
/// field itself accepts any string.
pub const STATUS_FILTERS: [&str; 3] = ["pending", "in-progress", "completed"];

/// A single task returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Task {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub status: String,
}

impl Task {
    /// Merge the fields present in `patch` into this task. `id` never changes.
    pub fn apply(&mut self, patch: &TaskPatch) {
        if let Some(title) = &patch.title {
            self.title = title.clone();
        }
        if let Some(description) = &patch.description {
            self.description = description.clone();
        }
        if let Some(status) = &patch.status {
            self.status = status.clone();
        }
    }
}

/// Request payload for creating a new task.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewTask {
    pub title: String,
    pub description: String,
    #[serde(default = "default_status")]
    pub status: String,
}

impl NewTask {
    /// Build the record a store would hold under `id`, substituting the
    /// default status for a blank one.
    pub fn into_task(self, id: u64) -> Task {
        let status = if self.status.trim().is_empty() {
            DEFAULT_STATUS.to_string()
        } else {
            self.status
        };
        Task {
            id,
            title: self.title,
            description: self.description,
            status,
        }
    }
}

/// Request payload for updating an existing task. Only the fields present in
/// the JSON are applied; omitted fields remain unchanged on the server.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TaskPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl From<NewTask> for TaskPatch {
    fn from(input: NewTask) -> Self {
        Self {
            title: Some(input.title),
            description: Some(input.description),
            status: Some(input.status),
        }
    }
}

fn default_status() -> String {
    DEFAULT_STATUS.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Task {
        Task {
            id: 7,
            title: "task 7".to_string(),
            description: "backend".to_string(),
            status: "pending".to_string(),
        }
    }

    #[test]
    fn apply_only_touches_present_fields() {
        let mut task = sample();
        task.apply(&TaskPatch {
            status: Some("completed".to_string()),
            ..TaskPatch::default()
        });
        assert_eq!(task.id, 7);
        assert_eq!(task.title, "task 7");
        assert_eq!(task.description, "backend");
        assert_eq!(task.status, "completed");
    }

    #[test]
    fn new_task_defaults_missing_status() {
        let input: NewTask =
            serde_json::from_str(r#"{"title":"a","description":"b"}"#).unwrap();
        assert_eq!(input.status, "pending");
    }

    #[test]
    fn into_task_replaces_blank_status() {
        let input = NewTask {
            title: "a".to_string(),
            description: "b".to_string(),
            status: "  ".to_string(),
        };
        let task = input.into_task(3);
        assert_eq!(task.id, 3);
        assert_eq!(task.status, "pending");
    }

    #[test]
    fn empty_patch_serializes_to_empty_object() {
        let json = serde_json::to_string(&TaskPatch::default()).unwrap();
        assert_eq!(json, "{}");
    }
}

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// One entry of the to-do list.
///
/// Field names follow the persisted document (`createdAt`), so a task
/// written by an older build reads back without a mapping layer.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Task {
    pub id: Uuid,
    pub text: String,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

impl Task {
    pub fn new(text: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            text,
            completed: false,
            created_at: Utc::now(),
        }
    }

    pub fn toggle(&mut self) {
        self.completed = !self.completed;
    }

    /// First 8 characters of the id, as shown by the CLI.
    pub fn short_id(&self) -> String {
        let id = self.id.to_string();
        id[..8].to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_task_starts_active() {
        let task = Task::new("Buy milk".to_string());
        assert_eq!(task.text, "Buy milk");
        assert!(!task.completed);
        assert!(task.created_at <= Utc::now());
    }

    #[test]
    fn toggle_flips_completion() {
        let mut task = Task::new("x".to_string());
        task.toggle();
        assert!(task.completed);
        task.toggle();
        assert!(!task.completed);
    }

    #[test]
    fn serializes_created_at_as_camel_case_string() {
        let task = Task::new("x".to_string());
        let value = serde_json::to_value(&task).unwrap();
        assert!(value.get("createdAt").and_then(|v| v.as_str()).is_some());
        assert!(value.get("created_at").is_none());
    }

    #[test]
    fn short_id_is_prefix_of_id() {
        let task = Task::new("x".to_string());
        assert_eq!(task.short_id().len(), 8);
        assert!(task.id.to_string().starts_with(&task.short_id()));
    }
}

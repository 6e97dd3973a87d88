use crate::date_key::DateKey;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Opaque handle for a task in the current session.
///
/// Ids are assigned when a task is created or loaded and never written to
/// the store, so they are only meaningful against the list they came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(Uuid);

impl TaskId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for TaskId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Stored form of a task: exactly `{ "text": ..., "done": ... }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRecord {
    pub text: String,
    pub done: bool,
}

impl TaskRecord {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            done: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Task {
    pub id: TaskId,
    pub text: String,
    pub done: bool,
}

impl Task {
    pub fn new(text: impl Into<String>) -> Self {
        Self::from_record(TaskRecord::new(text))
    }

    pub fn from_record(record: TaskRecord) -> Self {
        Self {
            id: TaskId::new(),
            text: record.text,
            done: record.done,
        }
    }

    pub fn to_record(&self) -> TaskRecord {
        TaskRecord {
            text: self.text.clone(),
            done: self.done,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct AddTaskRequest {
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct SelectDateRequest {
    pub date: String,
}

#[derive(Debug, Deserialize)]
pub struct MoveTaskRequest {
    pub to: usize,
}

#[derive(Debug, Deserialize)]
pub struct ReorderRequest {
    pub order: Vec<TaskId>,
}

#[derive(Debug, Serialize)]
pub struct ListResponse {
    pub date: DateKey,
    pub is_today: bool,
    pub tasks: Vec<Task>,
    pub dates: Vec<DateKey>,
}

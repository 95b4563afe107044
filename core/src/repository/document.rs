//! Versioned on-disk shape of the task list.
//!
//! Version 1 is an object `{ "version": 1, "tasks": [...] }`. A bare array of
//! tasks is the unversioned shape written by the browser build and is
//! accepted as a legacy document.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use uuid::Uuid;

use crate::model::task::Task;

pub const CURRENT_VERSION: u64 = 1;

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("malformed task document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("task document has no version field")]
    MissingVersion,

    #[error("task document version is not a non-negative integer")]
    InvalidVersion,

    #[error("unsupported task document version {0}")]
    UnsupportedVersion(u64),

    #[error("task document must be an object or an array")]
    UnknownShape,

    #[error("duplicate task id {0}")]
    DuplicateId(Uuid),
}

/// Result of a successful decode, tagged with the shape it came from.
#[derive(Debug, Clone, PartialEq)]
pub enum Decoded {
    Current(Vec<Task>),
    Legacy(Vec<Task>),
}

impl Decoded {
    pub fn tasks(&self) -> &[Task] {
        match self {
            Decoded::Current(tasks) | Decoded::Legacy(tasks) => tasks,
        }
    }

    pub fn into_tasks(self) -> Vec<Task> {
        match self {
            Decoded::Current(tasks) | Decoded::Legacy(tasks) => tasks,
        }
    }
}

#[derive(Serialize)]
struct DocumentRef<'a> {
    version: u64,
    tasks: &'a [Task],
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct DocumentV1 {
    #[allow(dead_code)]
    version: u64,
    tasks: Vec<Task>,
}

pub fn encode(tasks: &[Task]) -> Result<String, DocumentError> {
    let doc = DocumentRef {
        version: CURRENT_VERSION,
        tasks,
    };
    Ok(serde_json::to_string_pretty(&doc)?)
}

/// Decodes stored bytes. Invalid UTF-8 is reported as malformed JSON.
pub fn decode(raw: impl AsRef<[u8]>) -> Result<Decoded, DocumentError> {
    let value: Value = serde_json::from_slice(raw.as_ref())?;

    let decoded = if value.is_array() {
        Decoded::Legacy(serde_json::from_value(value)?)
    } else if value.is_object() {
        let version = value
            .get("version")
            .ok_or(DocumentError::MissingVersion)?
            .as_u64()
            .ok_or(DocumentError::InvalidVersion)?;
        if version != CURRENT_VERSION {
            return Err(DocumentError::UnsupportedVersion(version));
        }
        let doc: DocumentV1 = serde_json::from_value(value)?;
        Decoded::Current(doc.tasks)
    } else {
        return Err(DocumentError::UnknownShape);
    };

    let mut seen = HashSet::new();
    for task in decoded.tasks() {
        if !seen.insert(task.id) {
            return Err(DocumentError::DuplicateId(task.id));
        }
    }

    Ok(decoded)
}

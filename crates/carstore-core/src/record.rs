//! The car record as tracked in provider state.

use serde::{Deserialize, Serialize};

/// A single car record.
///
/// The `id` is assigned by the remote API on creation and is never chosen
/// locally. A record without an id has not been created remotely; a record
/// with one is assumed to exist remotely until a read proves otherwise or a
/// delete succeeds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarRecord {
    /// Server-assigned identifier. Absent until the first successful create.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Car model, user-supplied.
    pub model: String,
    /// Model year, user-supplied.
    pub year: i64,
}

impl CarRecord {
    /// Creates a planned record that has not been created remotely yet.
    pub fn new(model: impl Into<String>, year: i64) -> Self {
        Self {
            id: None,
            model: model.into(),
            year,
        }
    }

    /// Sets the server-assigned id.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Returns the remote identifier, treating an empty string the same as
    /// a missing one.
    pub fn remote_id(&self) -> Option<&str> {
        self.id.as_deref().filter(|id| !id.is_empty())
    }
}

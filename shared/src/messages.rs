//! Wire messages exchanged with the pgpanel server
//!
//! Group forms are rendered server-side and travel as opaque HTML fragments;
//! the console never rebuilds them client-side. Migration tasks run on the
//! server and are observed through small JSON status snapshots.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Server-rendered form markup for the group modal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormFragment {
    /// HTML fragment, injected into the modal body as-is
    pub markup: String,
}

impl FormFragment {
    pub fn new(markup: impl Into<String>) -> Self {
        Self {
            markup: markup.into(),
        }
    }
}

/// Request to copy an instance group into a managed environment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MigrationRequest {
    pub group_name: String,
    pub environment: String,
}

/// Returned when the server accepts a migration request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MigrationLaunched {
    pub task_id: Uuid,
}

/// Lifecycle of a server-side migration task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MigrationState {
    Pending,
    Running,
    Done,
    Failed,
}

impl MigrationState {
    /// Whether the task has finished, successfully or not
    pub fn is_settled(&self) -> bool {
        matches!(self, MigrationState::Done | MigrationState::Failed)
    }
}

/// Snapshot of one migration task, as polled from the server
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MigrationTaskStatus {
    pub task_id: Uuid,
    pub state: MigrationState,
    /// Populated once the task fails
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

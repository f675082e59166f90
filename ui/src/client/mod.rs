//! Settings API client abstraction
//!
//! The console never talks to the server directly from components. All
//! settings traffic goes through the [`SettingsClient`] trait so the page
//! controller can be driven by the real HTTP client in the browser and by
//! scripted clients in tests.
//!
//! The server owns the markup of the add/edit/delete dialogs; the client
//! only moves fragments and group lists around.

mod http;

pub use http::HttpSettingsClient;

use async_trait::async_trait;
use uuid::Uuid;

use pgpanel_shared::{FormFragment, Group, GroupKind, MigrationLaunched, MigrationTaskStatus};

/// Error types for settings client operations
#[derive(Debug, thiserror::Error)]
pub enum SettingsClientError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Request timed out")]
    Timeout,
}

/// Trait for settings client implementations
///
/// `HttpSettingsClient` implements this against the pgpanel server; tests
/// implement it with scripted responses.
#[async_trait(?Send)]
pub trait SettingsClient {
    /// List the groups of a kind, for the table view
    async fn list_groups(&self, kind: GroupKind) -> Result<Vec<Group>, SettingsClientError>;

    /// Fetch the blank add-group form for a kind
    async fn add_group_form(&self, kind: GroupKind) -> Result<FormFragment, SettingsClientError>;

    /// Fetch the edit form for one group
    async fn edit_group_form(
        &self,
        kind: GroupKind,
        name: &str,
    ) -> Result<FormFragment, SettingsClientError>;

    /// Fetch the delete confirmation dialog for one group
    async fn delete_group_confirm(
        &self,
        kind: GroupKind,
        name: &str,
    ) -> Result<FormFragment, SettingsClientError>;

    /// Start a server-side migration of an instance group into an environment
    async fn launch_environment_migration(
        &self,
        group_name: &str,
        environment: &str,
    ) -> Result<MigrationLaunched, SettingsClientError>;

    /// Poll the status of a migration task
    async fn migration_status(
        &self,
        task_id: Uuid,
    ) -> Result<MigrationTaskStatus, SettingsClientError>;
}

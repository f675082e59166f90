//! HTTP implementation of the settings client
//!
//! Talks to the pgpanel server with plain fetch calls. Group forms come back
//! as HTML fragments rendered by the server; group lists and migration
//! statuses come back as JSON.

use async_trait::async_trait;
use futures::future::{self, Either};
use futures::pin_mut;
use gloo_net::http::{Request, Response};
use gloo_timers::future::TimeoutFuture;
use std::future::Future;
use uuid::Uuid;

use pgpanel_shared::{
    FormFragment, Group, GroupKind, MigrationLaunched, MigrationRequest, MigrationTaskStatus,
};

use super::{SettingsClient, SettingsClientError};

/// Abort a settings fetch after this long
const FETCH_TIMEOUT_MS: u32 = 15_000;

/// Settings client speaking to the pgpanel server over HTTP
pub struct HttpSettingsClient {
    base_url: String,
}

impl HttpSettingsClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Client for the origin the console was served from
    pub fn from_window_origin() -> Self {
        let origin = web_sys::window()
            .and_then(|window| window.location().origin().ok())
            .unwrap_or_default();
        Self::new(&origin)
    }

    fn groups_url(&self, kind: GroupKind) -> String {
        format!("{}/settings/{}/groups.json", self.base_url, kind)
    }

    fn add_form_url(&self, kind: GroupKind) -> String {
        format!("{}/settings/{}/groups/new", self.base_url, kind)
    }

    fn edit_form_url(&self, kind: GroupKind, name: &str) -> String {
        format!(
            "{}/settings/{}/groups/{}/edit",
            self.base_url,
            kind,
            encode_segment(name)
        )
    }

    fn delete_confirm_url(&self, kind: GroupKind, name: &str) -> String {
        format!(
            "{}/settings/{}/groups/{}/delete",
            self.base_url,
            kind,
            encode_segment(name)
        )
    }

    fn migrate_url(&self) -> String {
        format!("{}/settings/environments/migrate", self.base_url)
    }

    fn migration_status_url(&self, task_id: Uuid) -> String {
        format!("{}/settings/environments/migrate/{}", self.base_url, task_id)
    }

    /// Run one fetch with the client-side timeout applied
    async fn send_with_timeout(
        &self,
        request: impl Future<Output = Result<Response, gloo_net::Error>>,
    ) -> Result<Response, SettingsClientError> {
        let timeout = TimeoutFuture::new(FETCH_TIMEOUT_MS);
        pin_mut!(request, timeout);

        match future::select(request, timeout).await {
            Either::Left((result, _)) => {
                let response = result
                    .map_err(|err| SettingsClientError::ConnectionFailed(err.to_string()))?;
                if !response.ok() {
                    return Err(SettingsClientError::RequestFailed(format!(
                        "HTTP {}: {}",
                        response.status(),
                        response.status_text()
                    )));
                }
                Ok(response)
            }
            Either::Right(((), _)) => Err(SettingsClientError::Timeout),
        }
    }

    async fn fetch_fragment(&self, url: String) -> Result<FormFragment, SettingsClientError> {
        let response = self.send_with_timeout(Request::get(&url).send()).await?;
        let markup = response
            .text()
            .await
            .map_err(|err| SettingsClientError::InvalidResponse(err.to_string()))?;
        Ok(FormFragment::new(markup))
    }
}

/// Percent-encode one path segment, so group names with slashes or spaces
/// survive the round trip
fn encode_segment(name: &str) -> String {
    String::from(js_sys::encode_uri_component(name))
}

#[async_trait(?Send)]
impl SettingsClient for HttpSettingsClient {
    async fn list_groups(&self, kind: GroupKind) -> Result<Vec<Group>, SettingsClientError> {
        let response = self
            .send_with_timeout(Request::get(&self.groups_url(kind)).send())
            .await?;
        response
            .json()
            .await
            .map_err(|err| SettingsClientError::InvalidResponse(err.to_string()))
    }

    async fn add_group_form(&self, kind: GroupKind) -> Result<FormFragment, SettingsClientError> {
        self.fetch_fragment(self.add_form_url(kind)).await
    }

    async fn edit_group_form(
        &self,
        kind: GroupKind,
        name: &str,
    ) -> Result<FormFragment, SettingsClientError> {
        self.fetch_fragment(self.edit_form_url(kind, name)).await
    }

    async fn delete_group_confirm(
        &self,
        kind: GroupKind,
        name: &str,
    ) -> Result<FormFragment, SettingsClientError> {
        self.fetch_fragment(self.delete_confirm_url(kind, name)).await
    }

    async fn launch_environment_migration(
        &self,
        group_name: &str,
        environment: &str,
    ) -> Result<MigrationLaunched, SettingsClientError> {
        let body = MigrationRequest {
            group_name: group_name.to_string(),
            environment: environment.to_string(),
        };
        let request = Request::post(&self.migrate_url())
            .json(&body)
            .map_err(|err| SettingsClientError::RequestFailed(err.to_string()))?;
        let response = self.send_with_timeout(request.send()).await?;
        response
            .json()
            .await
            .map_err(|err| SettingsClientError::InvalidResponse(err.to_string()))
    }

    async fn migration_status(
        &self,
        task_id: Uuid,
    ) -> Result<MigrationTaskStatus, SettingsClientError> {
        let response = self
            .send_with_timeout(Request::get(&self.migration_status_url(task_id)).send())
            .await?;
        response
            .json()
            .await
            .map_err(|err| SettingsClientError::InvalidResponse(err.to_string()))
    }
}


#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::wasm_bindgen_test;

    #[wasm_bindgen_test]
    fn test_group_name_encoding() {
        let client = HttpSettingsClient::new("");
        assert_eq!(
            client.edit_form_url(GroupKind::Role, "read only"),
            "/settings/role/groups/read%20only/edit"
        );
        assert_eq!(
            client.delete_confirm_url(GroupKind::Instance, "prod/eu"),
            "/settings/instance/groups/prod%2Feu/delete"
        );
    }
}

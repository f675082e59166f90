//! Group list loading
//!
//! The table renders whatever this loader's signals hold. Every refresh
//! draws a token from its own arena and checks it before applying the
//! response, so two refreshes resolving out of order can never leave a
//! stale list on screen.

use futures::future::{FutureExt, LocalBoxFuture};
use leptos::*;
use std::rc::Rc;
use tracing::{debug, warn};

use pgpanel_shared::{Group, GroupKind};

use super::session::SessionArena;
use crate::client::SettingsClient;

/// Fetches the group list for one kind and keeps the page signals in step
#[derive(Clone)]
pub struct GroupListLoader {
    kind: GroupKind,
    client: Rc<dyn SettingsClient>,
    refreshes: SessionArena,
    groups: RwSignal<Vec<Group>>,
    loading: RwSignal<bool>,
    error: RwSignal<Option<String>>,
}

impl GroupListLoader {
    pub fn new(kind: GroupKind, client: Rc<dyn SettingsClient>) -> Self {
        Self {
            kind,
            client,
            refreshes: SessionArena::new(),
            groups: create_rw_signal(Vec::new()),
            loading: create_rw_signal(true),
            error: create_rw_signal(None),
        }
    }

    pub fn groups(&self) -> ReadSignal<Vec<Group>> {
        self.groups.read_only()
    }

    pub fn loading(&self) -> ReadSignal<bool> {
        self.loading.read_only()
    }

    /// Message of the last failed load, cleared by the next good one
    pub fn error(&self) -> ReadSignal<Option<String>> {
        self.error.read_only()
    }

    /// Fetch the list and return the future to drive
    ///
    /// A refresh issued while another is outstanding supersedes it; the
    /// older response is dropped on arrival, whichever order they land in.
    pub fn refresh(&self) -> LocalBoxFuture<'static, ()> {
        let token = self.refreshes.begin();
        self.loading.set(true);

        let loader = self.clone();
        async move {
            let result = loader.client.list_groups(loader.kind).await;
            if !loader.refreshes.is_current(token) {
                debug!(kind = %loader.kind, "dropping a superseded group list");
                return;
            }
            match result {
                Ok(list) => {
                    loader.groups.set(list);
                    loader.error.set(None);
                }
                Err(err) => {
                    warn!(kind = %loader.kind, error = %err, "failed to load groups");
                    loader.error.set(Some(err.to_string()));
                }
            }
            loader.loading.set(false);
        }
        .boxed_local()
    }
}

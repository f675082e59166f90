//! Environment migration driver
//!
//! Runs one migration attempt end to end: launch the server-side task, poll
//! its status until it settles, report the outcome through a phase signal
//! the dialog renders. The pause between polls is injected, so the loop can
//! be driven to completion without a browser timer.

use futures::future::{FutureExt, LocalBoxFuture};
use gloo_timers::future::TimeoutFuture;
use leptos::*;
use std::rc::Rc;
use tracing::warn;

use pgpanel_shared::MigrationState;

use crate::client::SettingsClient;

const POLL_INTERVAL_MS: u32 = 1_000;

/// Give up waiting after this many polls
const MAX_POLLS: u32 = 120;

/// Where the current migration attempt stands
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum MigrationPhase {
    #[default]
    Idle,
    Launching,
    Polling,
    Done,
    Failed(String),
}

type Pause = Rc<dyn Fn() -> LocalBoxFuture<'static, ()>>;

/// Launches a migration task and polls it until it settles
#[derive(Clone)]
pub struct MigrationRunner {
    client: Rc<dyn SettingsClient>,
    phase: RwSignal<MigrationPhase>,
    on_done: Callback<()>,
    pause: Pause,
}

impl MigrationRunner {
    pub fn new(client: Rc<dyn SettingsClient>, on_done: Callback<()>) -> Self {
        Self::with_pause(
            client,
            on_done,
            Rc::new(|| TimeoutFuture::new(POLL_INTERVAL_MS).boxed_local()),
        )
    }

    /// Runner with an explicit pause between polls, so tests control time
    pub fn with_pause(client: Rc<dyn SettingsClient>, on_done: Callback<()>, pause: Pause) -> Self {
        Self {
            client,
            phase: create_rw_signal(MigrationPhase::Idle),
            on_done,
            pause,
        }
    }

    /// Phase signal for the dialog to render
    pub fn phase(&self) -> RwSignal<MigrationPhase> {
        self.phase
    }

    /// Drop the outcome of the last attempt
    pub fn reset(&self) {
        self.phase.set(MigrationPhase::Idle);
    }

    /// Start migrating `group_name` and return the future to drive
    ///
    /// A blank environment name takes over the group's name. The launching
    /// phase is applied synchronously.
    pub fn begin(&self, group_name: String, environment: String) -> LocalBoxFuture<'static, ()> {
        let target = {
            let trimmed = environment.trim();
            if trimmed.is_empty() {
                group_name.clone()
            } else {
                trimmed.to_string()
            }
        };
        self.phase.set(MigrationPhase::Launching);

        let runner = self.clone();
        async move { runner.launch_and_poll(group_name, target).await }.boxed_local()
    }

    async fn launch_and_poll(&self, group_name: String, environment: String) {
        let launched = match self
            .client
            .launch_environment_migration(&group_name, &environment)
            .await
        {
            Ok(launched) => launched,
            Err(err) => {
                warn!(error = %err, "failed to launch the environment migration");
                self.phase.set(MigrationPhase::Failed(err.to_string()));
                return;
            }
        };

        self.phase.set(MigrationPhase::Polling);
        for _ in 0..MAX_POLLS {
            (self.pause)().await;
            match self.client.migration_status(launched.task_id).await {
                Ok(status) if status.state.is_settled() => {
                    if status.state == MigrationState::Done {
                        self.phase.set(MigrationPhase::Done);
                        self.on_done.call(());
                    } else {
                        let reason = status
                            .error
                            .unwrap_or_else(|| "the migration failed".to_string());
                        self.phase.set(MigrationPhase::Failed(reason));
                    }
                    return;
                }
                Ok(_) => {}
                Err(err) => {
                    warn!(error = %err, "failed to poll the migration status");
                    self.phase.set(MigrationPhase::Failed(err.to_string()));
                    return;
                }
            }
        }
        self.phase.set(MigrationPhase::Failed(
            "the migration did not settle in time".to_string(),
        ));
    }
}

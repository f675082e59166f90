//! Environment Migration Dialog
//!
//! Doorway from instance groups into the environments feature. The dialog
//! owns its visibility and renders in its own container, separate from the
//! group CRUD modal. It picks an instance group, names the target
//! environment, and hands the attempt to a [`MigrationRunner`], rendering
//! whatever phase the runner reports.

use leptos::*;
use std::rc::Rc;

use pgpanel_shared::Group;

use crate::client::SettingsClient;
use crate::components::common::*;
use crate::controller::{MigrationPhase, MigrationRunner};

/// Dialog that migrates an instance group into a managed environment
#[component]
pub fn EnvironmentMigrationDialog(
    client: Rc<dyn SettingsClient>,
    groups: ReadSignal<Vec<Group>>,
    open: RwSignal<bool>,
    #[prop(into)] on_done: Callback<()>,
) -> impl IntoView {
    let runner = store_value(MigrationRunner::new(client, on_done));
    let phase = runner.with_value(|r| r.phase());
    let (selected_group, set_selected_group) = create_signal(String::new());
    let (environment, set_environment) = create_signal(String::new());
    let (note, set_note) = create_signal(Option::<String>::None);

    let busy = move || {
        matches!(
            phase.get(),
            MigrationPhase::Launching | MigrationPhase::Polling
        )
    };

    let close = move |_| {
        runner.with_value(|r| r.reset());
        set_note.set(None);
        set_selected_group.set(String::new());
        set_environment.set(String::new());
        open.set(false);
    };

    let back_to_form = move |_| {
        runner.with_value(|r| r.reset());
        set_note.set(None);
    };

    let launch = move |_| {
        let group = selected_group.get_untracked();
        if group.is_empty() {
            set_note.set(Some("Pick a group to migrate".to_string()));
            return;
        }
        set_note.set(None);
        let run = runner.with_value(|r| r.begin(group, environment.get_untracked()));
        spawn_local(run);
    };

    view! {
        <Show when=move || open.get()>
            <div
                id="environment-migration-dialog"
                class="fixed inset-0 z-40 flex items-center justify-center"
            >
                <div class="absolute inset-0 bg-black/50"></div>
                <div class="relative z-50 w-full max-w-md rounded-xl border border-theme-border bg-theme-surface shadow-xl">
                    <div class="flex items-center justify-between border-b border-theme-border px-4 py-3">
                        <h2 class="text-lg font-semibold text-theme">"Migrate to an environment"</h2>
                        <button class="btn-ghost p-1" on:click=close>
                            <CloseIcon class="w-5 h-5" />
                        </button>
                    </div>
                    <div class="p-4">
                        {move || match phase.get() {
                            MigrationPhase::Done => view! {
                                <div class="p-4 text-center">
                                    <p class="text-green-400 font-medium">"Migration finished"</p>
                                    <p class="text-sm text-theme-muted mt-2">
                                        "The group's instances now live in the new environment."
                                    </p>
                                    <button class="btn-primary mt-4" on:click=close>"Close"</button>
                                </div>
                            }
                            .into_view(),
                            MigrationPhase::Failed(reason) => view! {
                                <div class="p-4 text-center">
                                    <p class="text-error font-medium">"Migration failed"</p>
                                    <p class="text-sm text-theme-muted mt-2">{reason}</p>
                                    <div class="flex items-center justify-center gap-2 mt-4">
                                        <button class="btn-ghost px-3 py-1.5" on:click=back_to_form>"Back"</button>
                                        <button class="btn-primary" on:click=close>"Close"</button>
                                    </div>
                                </div>
                            }
                            .into_view(),
                            _ => view! {
                                <div class="space-y-4">
                                    <div>
                                        <label class="block text-sm text-theme-secondary mb-1">"Instance group"</label>
                                        <select
                                            class="input w-full"
                                            prop:value=move || selected_group.get()
                                            on:change=move |e| set_selected_group.set(event_target_value(&e))
                                        >
                                            <option value="">"Select a group"</option>
                                            {move || {
                                                groups
                                                    .get()
                                                    .into_iter()
                                                    .map(|group| {
                                                        view! {
                                                            <option value=group.name.clone()>{group.name.clone()}</option>
                                                        }
                                                    })
                                                    .collect::<Vec<_>>()
                                            }}
                                        </select>
                                    </div>
                                    <div>
                                        <label class="block text-sm text-theme-secondary mb-1">"Environment name"</label>
                                        <input
                                            type="text"
                                            class="input w-full"
                                            placeholder="Defaults to the group name"
                                            prop:value=move || environment.get()
                                            on:input=move |e| set_environment.set(event_target_value(&e))
                                        />
                                    </div>
                                    {move || note.get().map(|text| view! {
                                        <p class="text-sm text-error">{text}</p>
                                    })}
                                    <div class="flex items-center justify-end gap-2">
                                        <button class="btn-ghost px-3 py-1.5" on:click=close disabled=busy>
                                            "Cancel"
                                        </button>
                                        <button class="btn-primary" on:click=launch disabled=busy>
                                            {move || match phase.get() {
                                                MigrationPhase::Launching => "Launching...",
                                                MigrationPhase::Polling => "Migrating...",
                                                _ => "Migrate",
                                            }}
                                        </button>
                                    </div>
                                </div>
                            }
                            .into_view(),
                        }}
                    </div>
                </div>
            </div>
        </Show>
    }
}

//! Groups Settings Page
//!
//! Owns the group list for one kind and wires the table, the action
//! dispatcher, the form loader, and the modal together. Instance pages also
//! host the doorway into the environments feature.

use leptos::*;
use std::rc::Rc;

use pgpanel_shared::GroupKind;

use crate::client::SettingsClient;
use crate::components::common::*;
use crate::components::groups::migration::EnvironmentMigrationDialog;
use crate::components::groups::modal::GroupFormModal;
use crate::components::groups::table::GroupsTable;
use crate::controller::{
    ActionDispatcher, FormLoader, GroupListLoader, ModalHandle, OperatorIntent, RowAction,
};
use crate::state::{StateStore, ViewStateStore};

/// Administration page for the groups of one kind
#[component]
pub fn GroupsPage(
    kind: GroupKind,
    client: Rc<dyn SettingsClient>,
    state_backend: Rc<dyn StateStore>,
) -> impl IntoView {
    let list = GroupListLoader::new(kind, client.clone());
    let groups = list.groups();
    let loading = list.loading();
    let load_error = list.error();

    let refresh_list = list.clone();
    let on_refresh = Callback::new(move |()| spawn_local(refresh_list.refresh()));

    // Initial load
    spawn_local(list.refresh());

    let modal = ModalHandle::new();
    let open_popover = create_rw_signal(Option::<String>::None);
    let loader = FormLoader::new(kind, client.clone(), modal, on_refresh);
    let close_popovers = Callback::new(move |()| open_popover.set(None));
    let dispatcher = ActionDispatcher::new(kind, loader.clone(), close_popovers);

    let row_dispatcher = dispatcher.clone();
    let on_row_action = Callback::new(move |action: RowAction| {
        if let Some(fetch) = row_dispatcher.dispatch(action.into()) {
            spawn_local(fetch);
        }
    });

    let migration_open = create_rw_signal(false);
    let dialog_client = client.clone();
    let state_store = ViewStateStore::new(state_backend, &format!("groups-{kind}"));

    view! {
        <div class="flex-1 overflow-auto p-6">
            <div class="max-w-5xl mx-auto">
                // Header
                <div class="flex items-center justify-between mb-6">
                    <div>
                        <h1 class="text-2xl font-bold text-theme">{kind.page_title()}</h1>
                        <p class="text-sm text-theme-secondary mt-1">
                            {format!(
                                "Organize your {}s for dashboards and access control",
                                kind.member_noun()
                            )}
                        </p>
                    </div>
                    <div class="flex items-center gap-2">
                        <Show when=move || kind == GroupKind::Instance>
                            <button
                                class="btn-ghost px-3 py-1.5"
                                on:click=move |_| migration_open.set(true)
                            >
                                "Migrate to environments"
                            </button>
                        </Show>
                        <button
                            id="button-add-group"
                            class="btn-primary"
                            on:click={
                                let dispatcher = dispatcher.clone();
                                move |_| {
                                    if let Some(fetch) = dispatcher.dispatch(OperatorIntent::Add) {
                                        spawn_local(fetch);
                                    }
                                }
                            }
                        >
                            <PlusIcon class="w-4 h-4" />
                            "Add group"
                        </button>
                    </div>
                </div>

                // A failed list load keeps the page usable
                {move || load_error.get().map(|message| view! {
                    <div class="mb-4 flex items-center justify-between rounded-lg border border-error/40 bg-error/10 px-4 py-3">
                        <span class="text-sm text-error">{message}</span>
                        <button class="btn-ghost px-2 py-1 text-sm" on:click=move |_| on_refresh.call(())>
                            "Retry"
                        </button>
                    </div>
                })}

                <Show
                    when=move || !loading.get()
                    fallback=|| view! {
                        <div class="p-8 text-center text-theme-secondary">"Loading groups..."</div>
                    }
                >
                    <GroupsTable
                        kind=kind
                        groups=groups
                        state_store=state_store.clone()
                        open_popover=open_popover
                        on_row_action=on_row_action
                    />
                </Show>

                <GroupFormModal loader=loader.clone() modal=modal />

                <Show when=move || kind == GroupKind::Instance>
                    <EnvironmentMigrationDialog
                        client=dialog_client.clone()
                        groups=groups
                        open=migration_open
                        on_done=on_refresh
                    />
                </Show>
            </div>
        </div>
    }
}

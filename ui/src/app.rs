//! Root Application Component
//!
//! Sets up routing and the shared service handles. The HTTP client and the
//! browser-backed state store are constructed once here and handed down
//! explicitly; pages never reach for globals.

use leptos::*;
use leptos_meta::*;
use leptos_router::*;

use std::rc::Rc;

use pgpanel_shared::GroupKind;

use crate::client::{HttpSettingsClient, SettingsClient};
use crate::components::groups::GroupsPage;
use crate::state::{BrowserStore, StateStore};

/// Root application component
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let client: Rc<dyn SettingsClient> = Rc::new(HttpSettingsClient::from_window_origin());
    let state_backend: Rc<dyn StateStore> = Rc::new(BrowserStore::new());

    view! {
        <Router>
            <div class="min-h-screen bg-theme-bg text-theme">
                <ConsoleHeader />
                <Routes>
                    <Route path="/" view=|| view! { <Redirect path="/settings/groups/instance" /> } />
                    <Route
                        path="/settings/groups/:kind"
                        view=move || view! {
                            <GroupsSettingsRoute
                                client=client.clone()
                                state_backend=state_backend.clone()
                            />
                        }
                    />

                    // Catch-all for 404
                    <Route path="/*" view=|| view! { <NotFoundPage /> } />
                </Routes>
            </div>
        </Router>
    }
}

/// Top navigation bar
#[component]
fn ConsoleHeader() -> impl IntoView {
    view! {
        <header class="border-b border-theme-border bg-theme-surface">
            <div class="mx-auto flex max-w-5xl items-center justify-between px-6 py-3">
                <a href="/" class="text-lg font-semibold text-theme">"pgpanel"</a>
                <nav class="flex items-center gap-4 text-sm">
                    <A href="/settings/groups/instance" class="text-theme-secondary hover:text-theme transition-colors">
                        "Instance groups"
                    </A>
                    <A href="/settings/groups/role" class="text-theme-secondary hover:text-theme transition-colors">
                        "Role groups"
                    </A>
                </nav>
            </div>
        </header>
    }
}

/// Resolves the kind segment of the groups route
#[component]
fn GroupsSettingsRoute(
    client: Rc<dyn SettingsClient>,
    state_backend: Rc<dyn StateStore>,
) -> impl IntoView {
    let params = use_params_map();

    move || {
        let raw = params.get().get("kind").cloned().unwrap_or_default();
        match raw.parse::<GroupKind>() {
            Ok(kind) => view! {
                <Title text=format!("{} | pgpanel", kind.page_title()) />
                <GroupsPage
                    kind=kind
                    client=client.clone()
                    state_backend=state_backend.clone()
                />
            }
            .into_view(),
            Err(_) => view! { <NotFoundPage /> }.into_view(),
        }
    }
}

/// 404 Not Found page
#[component]
fn NotFoundPage() -> impl IntoView {
    view! {
        <div class="flex items-center justify-center p-16">
            <div class="text-center">
                <h1 class="text-6xl font-bold text-theme-muted mb-4">"404"</h1>
                <p class="text-xl text-theme-secondary mb-6">"Page not found"</p>
                <a href="/settings/groups/instance" class="btn-primary">"Go to groups"</a>
            </div>
        </div>
    }
}

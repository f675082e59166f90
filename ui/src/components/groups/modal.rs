//! Group Form Modal Component
//!
//! Container for the add, edit, and delete dialogs. The container is
//! mounted for the lifetime of the page and toggled by the loader through
//! its handle; server markup carries its own heading and form controls.
//!
//! Server-rendered forms announce a successful submission by dispatching
//! the form-submitted event on the modal content. The listener is attached
//! once, when the content node first appears, and reports the submission to
//! the loader under the session that owns the modal.

use leptos::*;
use tracing::warn;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

use crate::components::common::*;
use crate::controller::{FormLoader, ModalContent, ModalHandle, FORM_SUBMITTED_EVENT};

/// Modal host for the group CRUD dialogs
#[component]
pub fn GroupFormModal(loader: FormLoader, modal: ModalHandle) -> impl IntoView {
    let visible = modal.visible_signal();
    let content = modal.content_signal();
    let content_ref = create_node_ref::<html::Div>();

    let bridge_loader = loader.clone();
    create_effect(move |attached: Option<bool>| {
        if attached == Some(true) {
            return true;
        }
        let Some(container) = content_ref.get() else {
            return false;
        };
        let loader = bridge_loader.clone();
        let callback = Closure::<dyn FnMut(web_sys::Event)>::new(move |_event: web_sys::Event| {
            if let Some(session) = loader.active_session() {
                loader.complete_submission(session.token);
            }
        });
        if let Err(err) = container
            .add_event_listener_with_callback(FORM_SUBMITTED_EVENT, callback.as_ref().unchecked_ref())
        {
            warn!(?err, "failed to attach the form submission listener");
        }
        callback.forget();
        true
    });

    let escape_loader = loader.clone();
    let escape_listener = window_event_listener(ev::keydown, move |ev| {
        if modal.is_visible() && ev.key() == "Escape" {
            escape_loader.dismiss();
        }
    });
    on_cleanup(move || escape_listener.remove());

    let backdrop_loader = loader.clone();
    let close_loader = loader.clone();

    view! {
        <div
            id="group-modal"
            class=move || {
                if visible.get() {
                    "fixed inset-0 z-40 flex items-center justify-center"
                } else {
                    "hidden"
                }
            }
        >
            <div
                class="absolute inset-0 bg-black/50"
                on:click=move |_| backdrop_loader.dismiss()
            ></div>
            <div class="relative z-50 w-full max-w-lg rounded-xl border border-theme-border bg-theme-surface shadow-xl">
                <button
                    class="btn-ghost absolute right-3 top-3 p-1"
                    on:click=move |_| close_loader.dismiss()
                >
                    <CloseIcon class="w-5 h-5" />
                </button>
                <div class="p-6" node_ref=content_ref>
                    {move || match content.get() {
                        ModalContent::Empty => ().into_view(),
                        ModalContent::Loading => view! {
                            <div class="flex flex-col items-center gap-3 p-8 text-theme-secondary">
                                <div class="spinner w-8 h-8"></div>
                                <p class="text-sm">"Loading form..."</p>
                            </div>
                        }
                        .into_view(),
                        ModalContent::Ready(fragment) => view! {
                            <div inner_html=fragment.markup></div>
                        }
                        .into_view(),
                        ModalContent::Failed(message) => view! {
                            <div class="p-6 text-center">
                                <p class="text-error font-medium">"The form could not be loaded"</p>
                                <p class="text-sm text-theme-muted mt-2">{message}</p>
                            </div>
                        }
                        .into_view(),
                    }}
                </div>
            </div>
        </div>
    }
}

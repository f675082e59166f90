//! Handle over the group modal widget
//!
//! The modal container stays mounted for the lifetime of the page; the form
//! loader drives it through this handle, and the view renders whatever the
//! two signals say.

use leptos::*;

use pgpanel_shared::FormFragment;

/// Body of the modal, in the order a normal load moves through
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ModalContent {
    /// Nothing to show, the modal is between sessions
    #[default]
    Empty,
    /// A form fetch is outstanding
    Loading,
    /// Server markup, ready to inject
    Ready(FormFragment),
    /// The fetch failed, the message stays visible until dismissal
    Failed(String),
}

/// Narrow interface the controller uses to drive the modal
#[derive(Clone, Copy)]
pub struct ModalHandle {
    visible: RwSignal<bool>,
    content: RwSignal<ModalContent>,
}

impl ModalHandle {
    pub fn new() -> Self {
        Self {
            visible: create_rw_signal(false),
            content: create_rw_signal(ModalContent::Empty),
        }
    }

    pub fn show(&self) {
        self.visible.set(true);
    }

    pub fn hide(&self) {
        self.visible.set(false);
    }

    pub fn set_content(&self, content: ModalContent) {
        self.content.set(content);
    }

    pub fn is_visible(&self) -> bool {
        self.visible.get_untracked()
    }

    pub fn content(&self) -> ModalContent {
        self.content.get_untracked()
    }

    /// Visibility signal for the view layer
    pub fn visible_signal(&self) -> RwSignal<bool> {
        self.visible
    }

    /// Content signal for the view layer
    pub fn content_signal(&self) -> RwSignal<ModalContent> {
        self.content
    }
}

impl Default for ModalHandle {
    fn default() -> Self {
        Self::new()
    }
}

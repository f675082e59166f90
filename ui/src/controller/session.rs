//! Modal session bookkeeping
//!
//! Every dialog request draws a fresh token from a shared arena. A token is
//! valid until the next request begins or the modal is dismissed, so a slow
//! response can be checked against the arena and dropped instead of
//! clobbering a newer dialog.

use std::cell::Cell;
use std::rc::Rc;

use pgpanel_shared::GroupKind;

/// CRUD operation behind a modal dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Add,
    Edit,
    Delete,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Add => "add",
            Operation::Edit => "edit",
            Operation::Delete => "delete",
        }
    }
}

/// A fully-resolved request for one dialog form
///
/// Edit and delete always carry the group they apply to; there is no way to
/// build a targeted request without a name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormRequest {
    Add,
    Edit(String),
    Delete(String),
}

impl FormRequest {
    pub fn operation(&self) -> Operation {
        match self {
            FormRequest::Add => Operation::Add,
            FormRequest::Edit(_) => Operation::Edit,
            FormRequest::Delete(_) => Operation::Delete,
        }
    }

    pub fn target(&self) -> Option<&str> {
        match self {
            FormRequest::Add => None,
            FormRequest::Edit(name) | FormRequest::Delete(name) => Some(name),
        }
    }
}

/// Identity of one dialog session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionToken(u64);

/// Issues session tokens and remembers which one is current
///
/// Tokens increase monotonically. Clones share the same counter, so the
/// loader and the submission path always agree on which session is live.
#[derive(Clone, Default)]
pub struct SessionArena {
    current: Rc<Cell<u64>>,
}

impl SessionArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new session, superseding any previous one
    pub fn begin(&self) -> SessionToken {
        let next = self.current.get() + 1;
        self.current.set(next);
        SessionToken(next)
    }

    /// Retire the current session without starting a new one
    pub fn invalidate(&self) {
        self.current.set(self.current.get() + 1);
    }

    pub fn is_current(&self, token: SessionToken) -> bool {
        self.current.get() == token.0
    }
}

/// The dialog session currently bound to the modal
#[derive(Debug, Clone)]
pub struct ModalSession {
    pub token: SessionToken,
    pub operation: Operation,
    pub kind: GroupKind,
    pub target: Option<String>,
    /// Cleared once the form fetch for this session settles
    pub request_in_flight: bool,
}

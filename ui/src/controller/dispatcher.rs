//! Operator action dispatch for the groups page
//!
//! The page-level add button and the per-row edit and delete buttons all
//! funnel through one dispatcher. It closes any open member popover first,
//! validates the trigger, and hands a form request to the loader. A trigger
//! without a usable group name is logged and dropped before any network or
//! modal work happens.

use futures::future::LocalBoxFuture;
use leptos::{Callable, Callback};
use tracing::warn;

use pgpanel_shared::GroupKind;

use super::loader::FormLoader;
use super::session::FormRequest;

/// Operations a table row can request on its group
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowOperation {
    Edit,
    Delete,
}

/// One action raised by a table row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowAction {
    pub operation: RowOperation,
    /// Name of the group the row renders, passed through verbatim
    pub group_name: String,
}

/// Anything an operator can trigger on the groups page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperatorIntent {
    Add,
    Row(RowAction),
}

impl From<RowAction> for OperatorIntent {
    fn from(action: RowAction) -> Self {
        OperatorIntent::Row(action)
    }
}

/// Resolves operator intents into form loads
#[derive(Clone)]
pub struct ActionDispatcher {
    kind: GroupKind,
    loader: FormLoader,
    close_popovers: Callback<()>,
}

impl ActionDispatcher {
    pub fn new(kind: GroupKind, loader: FormLoader, close_popovers: Callback<()>) -> Self {
        Self {
            kind,
            loader,
            close_popovers,
        }
    }

    /// Resolve an intent into a running form load
    ///
    /// Popovers close before anything else, including validation. Returns
    /// `None` when the trigger carried no usable group name, in which case
    /// the modal and the client are left untouched.
    pub fn dispatch(&self, intent: OperatorIntent) -> Option<LocalBoxFuture<'static, ()>> {
        self.close_popovers.call(());

        let request = match intent {
            OperatorIntent::Add => FormRequest::Add,
            OperatorIntent::Row(action) => {
                if action.group_name.trim().is_empty() {
                    warn!(
                        kind = %self.kind,
                        operation = ?action.operation,
                        "ignoring row action without a group name"
                    );
                    return None;
                }
                match action.operation {
                    RowOperation::Edit => FormRequest::Edit(action.group_name),
                    RowOperation::Delete => FormRequest::Delete(action.group_name),
                }
            }
        };

        Some(self.loader.begin(request))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::scripted::{ScriptedCall, ScriptedClient};
    use crate::client::SettingsClient;
    use crate::controller::modal::ModalHandle;
    use futures::executor::LocalPool;
    use futures::task::LocalSpawnExt;
    use leptos::create_runtime;
    use std::cell::Cell;
    use std::rc::Rc;

    struct Fixture {
        pool: LocalPool,
        client: Rc<ScriptedClient>,
        modal: ModalHandle,
        dispatcher: ActionDispatcher,
        popover_closes: Rc<Cell<u32>>,
    }

    fn fixture(kind: GroupKind) -> Fixture {
        let client = ScriptedClient::new();
        let modal = ModalHandle::new();
        let loader = FormLoader::new(
            kind,
            client.clone() as Rc<dyn SettingsClient>,
            modal,
            Callback::new(|()| {}),
        );
        let popover_closes = Rc::new(Cell::new(0));
        let counter = popover_closes.clone();
        let close_popovers = Callback::new(move |()| counter.set(counter.get() + 1));
        Fixture {
            pool: LocalPool::new(),
            client,
            modal,
            dispatcher: ActionDispatcher::new(kind, loader, close_popovers),
            popover_closes,
        }
    }

    #[test]
    fn test_add_intent_opens_modal_and_fetches() {
        let runtime = create_runtime();
        let mut fx = fixture(GroupKind::Instance);

        let fetch = fx.dispatcher.dispatch(OperatorIntent::Add);
        assert_eq!(fx.popover_closes.get(), 1);
        assert!(fx.modal.is_visible());

        fx.pool
            .spawner()
            .spawn_local(fetch.expect("add intent should produce a fetch"))
            .unwrap();
        fx.pool.run_until_stalled();
        assert_eq!(
            fx.client.form_calls(),
            vec![ScriptedCall::AddForm(GroupKind::Instance)]
        );

        runtime.dispose();
    }

    #[test]
    fn test_row_actions_carry_exact_group_name() {
        let runtime = create_runtime();
        let mut fx = fixture(GroupKind::Role);

        let fetch = fx.dispatcher.dispatch(
            RowAction {
                operation: RowOperation::Edit,
                group_name: "reporting".to_string(),
            }
            .into(),
        );
        fx.pool.spawner().spawn_local(fetch.unwrap()).unwrap();
        fx.pool.run_until_stalled();

        assert_eq!(
            fx.client.form_calls(),
            vec![ScriptedCall::EditForm(GroupKind::Role, "reporting".to_string())]
        );

        runtime.dispose();
    }

    #[test]
    fn test_trigger_without_group_name_dropped() {
        let runtime = create_runtime();
        let fx = fixture(GroupKind::Instance);

        for bad_name in ["", "   "] {
            let fetch = fx.dispatcher.dispatch(
                RowAction {
                    operation: RowOperation::Delete,
                    group_name: bad_name.to_string(),
                }
                .into(),
            );
            assert!(fetch.is_none());
        }

        // popovers were still closed by each attempt
        assert_eq!(fx.popover_closes.get(), 2);
        assert!(!fx.modal.is_visible());
        assert_eq!(fx.client.pending_count(), 0);
        assert!(fx.client.form_calls().is_empty());

        runtime.dispose();
    }
}

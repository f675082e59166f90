//! Modal form loading
//!
//! The loader owns the life cycle of the group modal:
//!
//! - The modal opens in a loading state the moment a form is requested;
//!   server markup is injected whenever it arrives.
//! - Only the most recently dispatched session may touch the modal. Older
//!   responses resolve into nothing, whichever order they land in.
//! - Dismissing the modal retires the session, so an in-flight fetch for it
//!   is dropped on arrival.
//! - A successful submission observed inside the modal refreshes the table
//!   and closes the modal exactly once.

use futures::future::{FutureExt, LocalBoxFuture};
use leptos::{Callable, Callback};
use std::cell::RefCell;
use std::rc::Rc;
use tracing::{debug, warn};

use pgpanel_shared::GroupKind;

use super::modal::{ModalContent, ModalHandle};
use super::session::{FormRequest, ModalSession, SessionArena, SessionToken};
use crate::client::SettingsClient;

/// DOM event dispatched by server-rendered forms when a submission succeeds
pub const FORM_SUBMITTED_EVENT: &str = "pgpanel:form-submitted";

/// Fetches dialog forms and injects them into the modal
#[derive(Clone)]
pub struct FormLoader {
    kind: GroupKind,
    client: Rc<dyn SettingsClient>,
    modal: ModalHandle,
    sessions: SessionArena,
    active: Rc<RefCell<Option<ModalSession>>>,
    on_refresh: Callback<()>,
}

impl FormLoader {
    pub fn new(
        kind: GroupKind,
        client: Rc<dyn SettingsClient>,
        modal: ModalHandle,
        on_refresh: Callback<()>,
    ) -> Self {
        Self {
            kind,
            client,
            modal,
            sessions: SessionArena::new(),
            active: Rc::new(RefCell::new(None)),
            on_refresh,
        }
    }

    /// Open the modal for `request` and return the fetch to drive
    ///
    /// The loading state is applied synchronously. The returned future
    /// performs the fetch and injects the markup only if this session is
    /// still current when the response lands.
    pub fn begin(&self, request: FormRequest) -> LocalBoxFuture<'static, ()> {
        let token = self.sessions.begin();
        *self.active.borrow_mut() = Some(ModalSession {
            token,
            operation: request.operation(),
            kind: self.kind,
            target: request.target().map(str::to_string),
            request_in_flight: true,
        });
        self.modal.set_content(ModalContent::Loading);
        self.modal.show();

        let loader = self.clone();
        async move { loader.fetch_and_inject(token, request).await }.boxed_local()
    }

    async fn fetch_and_inject(&self, token: SessionToken, request: FormRequest) {
        let result = match &request {
            FormRequest::Add => self.client.add_group_form(self.kind).await,
            FormRequest::Edit(name) => self.client.edit_group_form(self.kind, name).await,
            FormRequest::Delete(name) => self.client.delete_group_confirm(self.kind, name).await,
        };

        if !self.sessions.is_current(token) {
            debug!(
                operation = request.operation().as_str(),
                "dropping form response for a superseded session"
            );
            return;
        }

        if let Some(session) = self.active.borrow_mut().as_mut() {
            session.request_in_flight = false;
        }

        match result {
            Ok(fragment) => self.modal.set_content(ModalContent::Ready(fragment)),
            Err(err) => {
                warn!(
                    operation = request.operation().as_str(),
                    error = %err,
                    "failed to load group form"
                );
                self.modal.set_content(ModalContent::Failed(err.to_string()));
            }
        }
    }

    /// Close the modal and retire its session
    ///
    /// A fetch still in flight for the retired session resolves into
    /// nothing.
    pub fn dismiss(&self) {
        self.sessions.invalidate();
        *self.active.borrow_mut() = None;
        self.modal.set_content(ModalContent::Empty);
        self.modal.hide();
    }

    /// Record a successful form submission observed inside the modal
    ///
    /// The session is retired before anything else, so replays and
    /// superseded tokens can neither close a newer dialog nor refresh the
    /// table a second time.
    pub fn complete_submission(&self, token: SessionToken) {
        if !self.sessions.is_current(token) {
            debug!("ignoring a submission from a superseded session");
            return;
        }
        self.sessions.invalidate();
        *self.active.borrow_mut() = None;
        self.modal.set_content(ModalContent::Empty);
        self.modal.hide();
        self.on_refresh.call(());
    }

    /// Session currently bound to the modal, if any
    pub fn active_session(&self) -> Option<ModalSession> {
        self.active.borrow().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::scripted::{ScriptedCall, ScriptedClient};
    use crate::client::SettingsClientError;
    use futures::executor::LocalPool;
    use futures::task::LocalSpawnExt;
    use leptos::create_runtime;
    use pgpanel_shared::FormFragment;
    use std::cell::Cell;

    struct Fixture {
        pool: LocalPool,
        client: Rc<ScriptedClient>,
        modal: ModalHandle,
        loader: FormLoader,
        refreshes: Rc<Cell<u32>>,
    }

    fn fixture(kind: GroupKind) -> Fixture {
        let client = ScriptedClient::new();
        let modal = ModalHandle::new();
        let refreshes = Rc::new(Cell::new(0));
        let counter = refreshes.clone();
        let on_refresh = Callback::new(move |()| counter.set(counter.get() + 1));
        let loader = FormLoader::new(
            kind,
            client.clone() as Rc<dyn SettingsClient>,
            modal,
            on_refresh,
        );
        Fixture {
            pool: LocalPool::new(),
            client,
            modal,
            loader,
            refreshes,
        }
    }

    fn ready(markup: &str) -> ModalContent {
        ModalContent::Ready(FormFragment::new(markup))
    }

    #[test]
    fn test_modal_opens_loading_first() {
        let runtime = create_runtime();
        let mut fx = fixture(GroupKind::Instance);

        let fetch = fx.loader.begin(FormRequest::Add);
        assert!(fx.modal.is_visible());
        assert_eq!(fx.modal.content(), ModalContent::Loading);
        assert!(fx.loader.active_session().unwrap().request_in_flight);

        fx.pool.spawner().spawn_local(fetch).unwrap();
        fx.pool.run_until_stalled();
        assert_eq!(
            fx.client.form_calls(),
            vec![ScriptedCall::AddForm(GroupKind::Instance)]
        );
        assert_eq!(fx.modal.content(), ModalContent::Loading);

        fx.client.resolve(0, Ok(FormFragment::new("<form id=\"add\"></form>")));
        fx.pool.run_until_stalled();
        assert_eq!(fx.modal.content(), ready("<form id=\"add\"></form>"));
        assert!(!fx.loader.active_session().unwrap().request_in_flight);

        runtime.dispose();
    }

    #[test]
    fn test_last_dispatched_form_wins() {
        let runtime = create_runtime();
        let mut fx = fixture(GroupKind::Role);
        let spawner = fx.pool.spawner();

        spawner
            .spawn_local(fx.loader.begin(FormRequest::Edit("staging".to_string())))
            .unwrap();
        spawner
            .spawn_local(fx.loader.begin(FormRequest::Edit("reporting".to_string())))
            .unwrap();
        fx.pool.run_until_stalled();
        assert_eq!(fx.client.pending_count(), 2);
        assert_eq!(
            fx.client.form_calls(),
            vec![
                ScriptedCall::EditForm(GroupKind::Role, "staging".to_string()),
                ScriptedCall::EditForm(GroupKind::Role, "reporting".to_string()),
            ]
        );

        // the newer response lands first
        fx.client.resolve(1, Ok(FormFragment::new("reporting form")));
        fx.pool.run_until_stalled();
        assert_eq!(fx.modal.content(), ready("reporting form"));

        // the stale one arrives afterwards and changes nothing
        fx.client.resolve(0, Ok(FormFragment::new("staging form")));
        fx.pool.run_until_stalled();
        assert_eq!(fx.modal.content(), ready("reporting form"));

        runtime.dispose();
    }

    #[test]
    fn test_stale_response_cannot_fill_the_modal() {
        let runtime = create_runtime();
        let mut fx = fixture(GroupKind::Role);
        let spawner = fx.pool.spawner();

        spawner
            .spawn_local(fx.loader.begin(FormRequest::Edit("staging".to_string())))
            .unwrap();
        spawner
            .spawn_local(fx.loader.begin(FormRequest::Edit("reporting".to_string())))
            .unwrap();
        fx.pool.run_until_stalled();

        // the superseded response lands first, the modal keeps loading
        fx.client.resolve(0, Ok(FormFragment::new("staging form")));
        fx.pool.run_until_stalled();
        assert_eq!(fx.modal.content(), ModalContent::Loading);

        fx.client.resolve(0, Ok(FormFragment::new("reporting form")));
        fx.pool.run_until_stalled();
        assert_eq!(fx.modal.content(), ready("reporting form"));

        runtime.dispose();
    }

    #[test]
    fn test_dismissal_invalidates_outstanding_fetch() {
        let runtime = create_runtime();
        let mut fx = fixture(GroupKind::Instance);
        let spawner = fx.pool.spawner();

        spawner
            .spawn_local(fx.loader.begin(FormRequest::Edit("prod".to_string())))
            .unwrap();
        fx.pool.run_until_stalled();

        fx.loader.dismiss();
        assert!(!fx.modal.is_visible());
        assert!(fx.loader.active_session().is_none());

        fx.client.resolve(0, Ok(FormFragment::new("prod form")));
        fx.pool.run_until_stalled();
        assert!(!fx.modal.is_visible());
        assert_eq!(fx.modal.content(), ModalContent::Empty);

        runtime.dispose();
    }

    #[test]
    fn test_failed_fetch_shows_error_state() {
        let runtime = create_runtime();
        let mut fx = fixture(GroupKind::Instance);
        let spawner = fx.pool.spawner();

        spawner
            .spawn_local(fx.loader.begin(FormRequest::Delete("retired".to_string())))
            .unwrap();
        fx.pool.run_until_stalled();

        fx.client.resolve(
            0,
            Err(SettingsClientError::RequestFailed(
                "HTTP 500: Internal Server Error".to_string(),
            )),
        );
        fx.pool.run_until_stalled();

        assert!(fx.modal.is_visible());
        match fx.modal.content() {
            ModalContent::Failed(message) => assert!(message.contains("HTTP 500")),
            other => panic!("expected a failed state, got {other:?}"),
        }

        runtime.dispose();
    }

    #[test]
    fn test_submission_refreshes_and_closes_once() {
        let runtime = create_runtime();
        let mut fx = fixture(GroupKind::Instance);
        let spawner = fx.pool.spawner();

        spawner
            .spawn_local(fx.loader.begin(FormRequest::Delete("retired".to_string())))
            .unwrap();
        fx.pool.run_until_stalled();
        fx.client.resolve(0, Ok(FormFragment::new("confirm delete")));
        fx.pool.run_until_stalled();

        let token = fx.loader.active_session().unwrap().token;
        fx.loader.complete_submission(token);
        assert_eq!(fx.refreshes.get(), 1);
        assert!(!fx.modal.is_visible());
        assert_eq!(fx.modal.content(), ModalContent::Empty);

        // replaying the same token is inert
        fx.loader.complete_submission(token);
        assert_eq!(fx.refreshes.get(), 1);

        runtime.dispose();
    }

    #[test]
    fn test_superseded_submission_is_inert() {
        let runtime = create_runtime();
        let mut fx = fixture(GroupKind::Instance);
        let spawner = fx.pool.spawner();

        spawner
            .spawn_local(fx.loader.begin(FormRequest::Delete("first".to_string())))
            .unwrap();
        fx.pool.run_until_stalled();
        let stale = fx.loader.active_session().unwrap().token;

        spawner
            .spawn_local(fx.loader.begin(FormRequest::Delete("second".to_string())))
            .unwrap();
        fx.pool.run_until_stalled();

        fx.loader.complete_submission(stale);
        assert_eq!(fx.refreshes.get(), 0);
        assert!(fx.modal.is_visible());

        runtime.dispose();
    }
}

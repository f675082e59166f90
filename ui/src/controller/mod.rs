//! Controller for the groups settings page
//!
//! Everything behind the page that is not rendering lives here: resolving
//! operator actions, loading the group list and the modal forms with
//! supersession, driving migrations, and the session bookkeeping that keeps
//! slow responses from clobbering newer state.

pub mod dispatcher;
pub mod list;
pub mod loader;
pub mod migration;
pub mod modal;
pub mod session;

pub use dispatcher::{ActionDispatcher, OperatorIntent, RowAction, RowOperation};
pub use list::GroupListLoader;
pub use loader::{FormLoader, FORM_SUBMITTED_EVENT};
pub use migration::{MigrationPhase, MigrationRunner};
pub use modal::{ModalContent, ModalHandle};
pub use session::{FormRequest, ModalSession, Operation, SessionArena, SessionToken};

//! Group administration components

pub mod migration;
pub mod modal;
pub mod page;
pub mod table;

pub use page::GroupsPage;

//! UI Components
//!
//! This module contains all UI components organized by feature:
//! - `groups`: Group administration (table, dialogs, migration doorway)
//! - `common`: Shared/reusable components

pub mod common;
pub mod groups;

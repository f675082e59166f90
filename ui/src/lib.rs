//! pgpanel Console Library
//!
//! This crate provides the pgpanel administration console, the browser
//! frontend for managing a fleet of PostgreSQL instances.
//!
//! # Architecture
//!
//! The console is a client-side rendered application. Pages talk to the
//! pgpanel server through the [`client`] abstraction, keep their table view
//! state in the [`state`] stores, and run their dialog logic in the
//! [`controller`] so it stays testable off the browser.
//!
//! # Modules
//!
//! - [`app`]: Root application component and routing
//! - [`client`]: Settings API client (HTTP and test implementations)
//! - [`components`]: UI components (groups table, dialogs, icons)
//! - [`controller`]: Action dispatch, form loading, session bookkeeping
//! - [`state`]: View state persistence

pub mod app;
pub mod client;
pub mod components;
pub mod controller;
pub mod state;

pub use app::App;

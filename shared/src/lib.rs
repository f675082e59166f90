//! Shared types for the pgpanel console and server
//!
//! This crate contains common types used across the pgpanel platform:
//! - Group and group-kind definitions
//! - API message types for the settings endpoints
//! - Environment migration task types

pub mod groups;
pub mod messages;

pub use groups::*;
pub use messages::*;

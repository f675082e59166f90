//! Common/Shared UI Components
//!
//! Reusable components used throughout the console.

mod icons;

pub use icons::*;

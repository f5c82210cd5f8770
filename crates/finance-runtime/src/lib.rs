//! Runtime layer for the finance dashboard.
//!
//! Owns the change-aware table cache and the interactive session state the
//! terminal UI and the JSON output are driven from.

pub mod data_manager;
pub mod session;

pub use finance_core as core;
pub use finance_data as data;

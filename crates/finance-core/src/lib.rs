//! Core domain layer for the finance dashboard.
//!
//! Defines the spreadsheet model (transaction rows, month-keys, tables), the
//! derived month summary, the shared error type, number formatting and the
//! command-line settings.

pub mod calculations;
pub mod error;
pub mod formatting;
pub mod models;
pub mod settings;

pub use error::{FinanceError, Result};

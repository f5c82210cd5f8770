//! Data layer for the finance dashboard.
//!
//! Reads the budget spreadsheet into a [`finance_core::models::Table`],
//! aggregates it per month and derives the money-flow edges shown in the
//! details view.

pub mod aggregator;
pub mod flows;
pub mod reader;

pub use finance_core as core;

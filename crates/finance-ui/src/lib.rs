//! Terminal UI layer for the finance dashboard.
//!
//! Provides themes, header, indicator and bar components, the dashboard,
//! history and details views, and the application event loop built on top of
//! [`ratatui`].

pub mod app;
pub mod components;
pub mod dashboard_view;
pub mod details_view;
pub mod table_view;
pub mod themes;

pub use finance_core as core;

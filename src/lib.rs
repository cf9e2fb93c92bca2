//! formgate - dependency-aware field validation for interactive forms
//!
//! The [`state::Form`] engine keeps per-field values and validity,
//! revalidates a changed field together with its declared dependents in
//! one atomic step, and derives a single completeness flag. The rest of
//! the crate hosts two account forms on top of it in a Ratatui TUI.

pub mod app;
pub mod config;
pub mod error;
pub mod platform;
pub mod service;
pub mod state;
pub mod ui;

pub use error::FormError;

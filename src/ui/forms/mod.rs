//! Form rendering module
//!
//! - `field_renderer`: Field rendering utilities
//! - `account_form`: Sign-up and change-password forms

mod account_form;
mod field_renderer;

pub use account_form::draw_account_form;

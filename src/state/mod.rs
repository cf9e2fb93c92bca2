//! Application state module

mod app_state;
mod duplicate;
mod forms;
mod rules;

pub use app_state::*;
pub use duplicate::*;
pub use forms::*;
pub use rules::*;

//! Form domain layer
//!
//! Dependency-aware field validation: a fixed set of fields, one validator
//! per field, and one-hop revalidation edges between fields. All writes go
//! through [`Form::apply_change`], which publishes value and validity in a
//! single step.

mod change;
mod completeness;
mod dependencies;
mod engine;
mod field;
mod form_state;
mod validators;

pub use change::{FieldChange, TextEdit};
pub use completeness::is_complete;
pub use dependencies::DependencyGraph;
pub use engine::{Form, InitialValidity};
pub use field::{FieldName, FieldSpec, FieldState};
pub use form_state::{FieldValues, FormSnapshot, FormState};
pub use validators::{ValidatorFn, ValidatorRegistry};

//! Form completeness derived from per-field validity

use super::form_state::FormState;

/// True iff every field is currently valid.
///
/// A form with no fields is vacuously complete. Pages always declare at
/// least one field, so nothing should gate on that case.
pub fn is_complete(state: &FormState) -> bool {
    state.iter().all(|(_, field)| field.is_valid)
}

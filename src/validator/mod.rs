// validator/mod.rs - Field-level form validation
//
// Forms embed a `Validator` and call `check_field` once per rule. The first
// failing rule for a field wins; later failures on the same field are ignored.

use serde::Serialize;
use std::collections::HashMap;

/// Accumulates validation failures keyed by form field name
#[derive(Debug, Clone, Default, Serialize)]
pub struct Validator {
    pub field_errors: HashMap<String, String>,
}

impl Validator {
    /// True when no field has a recorded error
    pub fn valid(&self) -> bool {
        self.field_errors.is_empty()
    }

    /// Record `message` for `key` unless the field already has an error
    pub fn add_field_error(&mut self, key: impl Into<String>, message: impl Into<String>) {
        self.field_errors
            .entry(key.into())
            .or_insert_with(|| message.into());
    }

    /// Record `message` for `key` when `ok` is false
    pub fn check_field(&mut self, ok: bool, key: &str, message: &str) {
        if !ok {
            self.add_field_error(key, message);
        }
    }
}

/// True when the value contains something other than whitespace
pub fn not_blank(value: &str) -> bool {
    !value.trim().is_empty()
}

/// True when the value has at most `n` characters (Unicode scalar values, not bytes)
pub fn max_chars(value: &str, n: usize) -> bool {
    value.chars().count() <= n
}

/// True when the value appears in the allow-list
pub fn permitted_value<T: PartialEq>(value: &T, permitted: &[T]) -> bool {
    permitted.contains(value)
}

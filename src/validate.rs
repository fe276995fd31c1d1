use std::collections::HashMap;

/// Field name of the description input.
pub const FIELD_DESCRIPTION: &str = "description";

/// Localization keys of the two description errors.
pub const ERR_DESCRIPTION_EMPTY: &str = "DescErrorNoText";
pub const ERR_DESCRIPTION_MAX_LENGTH: &str = "DescErrorMaxLength";

/// Maximum description length, matching the database column.
pub const DESCRIPTION_MAX_LEN: usize = 2048;

/// Accumulates named errors per field.
///
/// Errors are stored as localization keys and translated at display time.
/// Every mutation that actually changes a field's error set bumps the change
/// counter, so callers can notice transitions without per-property
/// interception.
#[derive(Debug, Default)]
pub struct ErrorBag {
    errors: HashMap<String, Vec<String>>,
    changes: u64,
}

impl ErrorBag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an error to a field. Returns true if the set changed (the error
    /// was not already present).
    pub fn add(&mut self, field: &str, error: &str) -> bool {
        let list = self.errors.entry(field.to_string()).or_default();
        if list.iter().any(|e| e == error) {
            return false;
        }
        list.push(error.to_string());
        self.changes += 1;
        true
    }

    /// Remove an error from a field. Returns true if the set changed. A field
    /// whose last error is removed disappears from the bag entirely.
    pub fn remove(&mut self, field: &str, error: &str) -> bool {
        let Some(list) = self.errors.get_mut(field) else {
            return false;
        };
        let Some(pos) = list.iter().position(|e| e == error) else {
            return false;
        };
        list.remove(pos);
        if list.is_empty() {
            self.errors.remove(field);
        }
        self.changes += 1;
        true
    }

    /// Current errors of a field, in insertion order.
    pub fn errors_for(&self, field: &str) -> &[String] {
        self.errors.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    /// A field with one or more errors is invalid.
    pub fn has_errors(&self, field: &str) -> bool {
        self.errors.contains_key(field)
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Number of effective mutations so far. Increases exactly once per
    /// added or removed error.
    pub fn changes(&self) -> u64 {
        self.changes
    }
}

/// Re-validate the description input, replacing its previous findings.
///
/// Valid means: trimmed non-empty and at most [`DESCRIPTION_MAX_LEN`]
/// characters. The add action is only permitted while the description field
/// has no errors.
pub fn validate_description(bag: &mut ErrorBag, text: &str) {
    bag.remove(FIELD_DESCRIPTION, ERR_DESCRIPTION_EMPTY);
    bag.remove(FIELD_DESCRIPTION, ERR_DESCRIPTION_MAX_LENGTH);

    if text.trim().is_empty() {
        bag.add(FIELD_DESCRIPTION, ERR_DESCRIPTION_EMPTY);
    }
    if text.chars().count() > DESCRIPTION_MAX_LEN {
        bag.add(FIELD_DESCRIPTION, ERR_DESCRIPTION_MAX_LENGTH);
    }
}

//! Field validation rules and their presentation flags
//!
//! The rules are ordered: an empty required field fails before the length
//! ceiling is looked at. The two flags (`invalid` for the ceiling, `require`
//! for emptiness) are toggled independently and can both be set.

use crate::config::PresentationClasses;
use crate::dom::Document;
use crate::model::{Field, FieldConfig};

/// Outcome of evaluating a field's rules against its length
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Validity {
    Valid,
    /// Required field with no content
    Required,
    /// Content longer than the configured ceiling
    TooLong,
}

impl Validity {
    pub fn is_valid(self) -> bool {
        self == Validity::Valid
    }
}

/// Pure rule evaluation, no presentation side effects
pub fn evaluate(length: usize, config: &FieldConfig) -> Validity {
    if config.required && length == 0 {
        return Validity::Required;
    }
    match config.max_length {
        Some(max) if length > max => Validity::TooLong,
        _ => Validity::Valid,
    }
}

/// Evaluate `field`, refreshing the `invalid` flag when the ceiling is checked
pub fn validate(doc: &mut Document, field: &Field, classes: &PresentationClasses) -> bool {
    if field.config.required && field.length == 0 {
        return false;
    }
    if field.config.max_length.is_some() && check_max_length(doc, field, classes) {
        return false;
    }
    true
}

/// Toggle the `invalid` flag; returns whether the ceiling is exceeded
pub fn check_max_length(doc: &mut Document, field: &Field, classes: &PresentationClasses) -> bool {
    let exceeded = matches!(field.config.max_length, Some(max) if field.length > max);
    if exceeded {
        doc.add_class(field.element, &classes.invalid);
    } else {
        doc.remove_class(field.element, &classes.invalid);
    }
    exceeded
}

/// Toggle the `require` flag; returns whether the field is empty
pub fn check_required(doc: &mut Document, field: &Field, classes: &PresentationClasses) -> bool {
    let empty = field.length == 0;
    if empty {
        doc.add_class(field.element, &classes.require);
    } else {
        doc.remove_class(field.element, &classes.require);
    }
    empty
}

//! Input validation utilities for Panelkit API
//!
//! Request bodies derive `validator::Validate` for field-level rules and
//! implement [`Check`] for the structural rules a derive cannot express
//! (unique ids, nesting limits). Only the first failure is reported.

use std::collections::HashSet;

use panelkit_common::PanelError;
use validator::{ValidationErrors, ValidationErrorsKind};

/// Full validation of a request body
pub trait Check {
    fn check(&self) -> Result<(), PanelError>;
}

/// Render the first validation failure as `path: message`
///
/// Fields are visited in name order so the reported failure is stable.
pub fn first_validation_message(errors: &ValidationErrors) -> String {
    first_in(errors, "").unwrap_or_else(|| "invalid request".to_string())
}

fn first_in(errors: &ValidationErrors, prefix: &str) -> Option<String> {
    let mut fields: Vec<_> = errors.errors().iter().collect();
    fields.sort_by(|a, b| a.0.cmp(b.0));

    for (field, kind) in fields {
        let path = join_path(prefix, field);
        let found = match kind {
            ValidationErrorsKind::Field(errs) => errs.first().map(|e| {
                let message = e
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string());
                format!("{}: {}", path, message)
            }),
            ValidationErrorsKind::Struct(inner) => first_in(inner, &path),
            ValidationErrorsKind::List(items) => items
                .iter()
                .find_map(|(idx, inner)| first_in(inner, &format!("{}[{}]", path, idx))),
        };
        if found.is_some() {
            return found;
        }
    }
    None
}

fn join_path(prefix: &str, field: &str) -> String {
    if prefix.is_empty() {
        field.to_string()
    } else {
        format!("{}.{}", prefix, field)
    }
}

/// Convert derive-level failures into a `PanelError::Validation`
pub fn validate_fields<T: validator::Validate>(value: &T) -> Result<(), PanelError> {
    value
        .validate()
        .map_err(|e| PanelError::validation(first_validation_message(&e)))
}

/// Ensure ids are non-empty, well formed and unique within one list
pub fn ensure_unique_ids<'a, I>(scope: &str, ids: I) -> Result<(), PanelError>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen = HashSet::new();
    for (idx, id) in ids.into_iter().enumerate() {
        if !panelkit_common::is_valid_id(id) {
            return Err(PanelError::validation(format!(
                "{}[{}].id: '{}' is not a valid id",
                scope, idx, id
            )));
        }
        if !seen.insert(id) {
            return Err(PanelError::validation(format!(
                "{}[{}].id: duplicate id '{}'",
                scope, idx, id
            )));
        }
    }
    Ok(())
}

//! Reconciliation of caller-supplied metadata against declared placeholders.

use std::collections::{BTreeMap, BTreeSet};

use thiserror::Error;

/// Errors raised when supplied metadata does not satisfy a notification's
/// declared placeholder set.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MetadataError {
    #[error("metadata count mismatch: {expected} placeholder(s) declared, {supplied} value(s) supplied")]
    CountMismatch { expected: usize, supplied: usize },

    #[error("metadata key '{0}' does not match any declared placeholder")]
    UnknownKey(String),
}

/// Validate supplied metadata against the declared placeholders and build
/// the substitution map.
///
/// Declared names are trimmed and deduplicated before checking. The count
/// of supplied keys must equal the count of distinct declared names, and
/// every supplied key must name a declared placeholder. Key-set equality
/// then follows: each declared name maps to exactly one supplied value.
pub fn reconcile(
    declared: &[String],
    supplied: &BTreeMap<String, String>,
) -> Result<BTreeMap<String, String>, MetadataError> {
    let names: BTreeSet<&str> = declared.iter().map(|name| name.trim()).collect();

    if supplied.len() != names.len() {
        return Err(MetadataError::CountMismatch {
            expected: names.len(),
            supplied: supplied.len(),
        });
    }

    for key in supplied.keys() {
        if !names.contains(key.as_str()) {
            return Err(MetadataError::UnknownKey(key.clone()));
        }
    }

    let substitutions = names
        .into_iter()
        .map(|name| (name.to_string(), supplied[name].clone()))
        .collect();

    Ok(substitutions)
}

//! Default extraction and declared-type recovery.
//!
//! Property details arrive as free-text completion strings of the shape
//! `"name: type = default"`. Both parsers here are best-effort: a malformed
//! detail degrades to an empty default or an unknown type, never an error.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::PropertyDefinition;

/// Declared type recovered from a detail string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeclaredType {
    Known(String),

    /// The detail string carried no recoverable type.
    Unknown,
}

impl DeclaredType {
    pub fn as_str(&self) -> &str {
        match self {
            DeclaredType::Known(name) => name,
            DeclaredType::Unknown => "unknown",
        }
    }
}

impl fmt::Display for DeclaredType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Canonical default value for a property definition.
///
/// The default is everything after the first `=` in the detail string,
/// trimmed. Definitions with no visible default produce the empty string.
pub fn extract_default(definition: &PropertyDefinition) -> String {
    match definition.detail.split_once('=') {
        Some((_, default)) => default.trim().to_string(),
        None => String::new(),
    }
}

/// Declared type of a property: the substring between the first `:` and the
/// first `=` of the detail string, trimmed.
pub fn parse_declared_type(detail: &str) -> DeclaredType {
    let after_colon = match detail.split_once(':') {
        Some((_, rest)) => rest,
        None => return DeclaredType::Unknown,
    };
    let type_part = after_colon.split('=').next().unwrap_or("").trim();
    if type_part.is_empty() {
        DeclaredType::Unknown
    } else {
        DeclaredType::Known(type_part.to_string())
    }
}

//! Collaborator seams toward the persisted document.
//!
//! The editor never parses or rewrites document text itself. A
//! [`DocumentPatcher`] implementation owns that: it locates the property
//! assignment for a node and writes or removes the override. Both operations
//! must be idempotent for repeated identical calls.

use thiserror::Error;

/// Live view of the inspected node's persisted property values.
pub trait NodeHandle {
    /// Re-reads the node's current property values from the persisted
    /// document, ordered as they appear in the node body.
    ///
    /// Implementations derive this from the document on every call; the
    /// editor relies on it being authoritative, never cached.
    fn read_current_values(&self) -> Vec<(String, String)>;
}

/// One override write, as handed to the patcher.
#[derive(Debug, Clone, Copy)]
pub struct OverrideWrite<'a> {
    pub property_name: &'a str,
    pub new_value: &'a str,
    pub declared_type: &'a str,
    pub default_value: &'a str,
}

/// Rewrites property assignments in the persisted document.
pub trait DocumentPatcher {
    type Document;
    type Node: NodeHandle;

    /// Writes or updates the override for one property.
    ///
    /// The patcher decides whether `new_value` differs from `default_value`
    /// or must be stored verbatim; the editor does not second-guess that.
    fn update_override(
        &mut self,
        document: &mut Self::Document,
        node: &Self::Node,
        write: OverrideWrite<'_>,
    ) -> Result<(), PatchError>;

    /// Removes the override for one property, restoring the class default.
    ///
    /// Removing an absent override is a no-op, not an error.
    fn remove_override(
        &mut self,
        document: &mut Self::Document,
        node: &Self::Node,
        property_name: &str,
    ) -> Result<(), PatchError>;
}

/// Failures surfaced by a document patcher.
#[derive(Debug, Error)]
pub enum PatchError {
    #[error("node not found in document: {0}")]
    NodeNotFound(String),

    #[error("malformed value for `{property}`: {reason}")]
    MalformedValue { property: String, reason: String },

    #[error("failed to write document: {0}")]
    Write(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

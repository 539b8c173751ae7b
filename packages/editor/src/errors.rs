//! Error types for the editor

use thiserror::Error;

use crate::patcher::PatchError;

/// Failures a caller of the editor can observe.
///
/// Only patcher rejections surface here; a missing selection or a property
/// absent from the catalog are reported conditions, not errors.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("failed to update property `{property}`: {source}")]
    Update {
        property: String,
        #[source]
        source: PatchError,
    },

    #[error("failed to reset property `{property}`: {source}")]
    Reset {
        property: String,
        #[source]
        source: PatchError,
    },
}

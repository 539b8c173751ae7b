//! # Propview Editor
//!
//! Core property-state synchronization engine for Propview.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ catalog: definitions + observed values      │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: selection lifecycle + edit/reset    │
//! │  - Select/clear the inspected node          │
//! │  - Write overrides through the patcher      │
//! │  - Keep catalog values in step with writes  │
//! │  - Project state for the presentation layer │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ workspace: message transport host           │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **The document is source of truth**: only overrides are persisted;
//!    everything else reads back as its class default
//! 2. **The patcher decides what to write**: this crate never second-guesses
//!    whether a value differs from its default
//! 3. **Abort before mutate**: a failed write leaves the catalog untouched
//! 4. **Selection is all-or-nothing**: session state is replaced and cleared
//!    wholesale, never field-by-field
//!
//! ## Usage
//!
//! ```rust,ignore
//! use propview_editor::Inspector;
//!
//! let mut inspector = Inspector::new(patcher);
//! inspector.select_node("Player", node, document, catalog);
//!
//! inspector.edit_property("visible", "false", "bool")?;
//! inspector.reset_property("visible")?;
//!
//! let projection = inspector.project(&docs);
//! ```

mod errors;
mod patcher;
mod projection;
mod session;
mod synchronizer;

pub use errors::SyncError;
pub use patcher::{DocumentPatcher, NodeHandle, OverrideWrite, PatchError};
pub use projection::{ClassMap, DocumentationIndex, PropertySnapshot, ViewProjection};
pub use synchronizer::{Inspector, SyncOutcome};

// Re-export common types for convenience
pub use propview_catalog::{DeclaredType, PropertyCatalog, PropertyDefinition, PropertyEntry};

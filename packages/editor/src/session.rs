//! # Selection State
//!
//! Session state for the inspected node.
//!
//! Selection is an explicit state-machine value: either nothing is selected,
//! or the node handle, the document handle and the property catalog are all
//! present together. Transitions replace the whole value, so callers can
//! never observe a partially populated session.

use propview_catalog::PropertyCatalog;

#[derive(Debug)]
pub(crate) enum Session<D, N> {
    /// No node selected.
    Inactive,

    /// A node is selected and its catalog is live.
    Active(ActiveSession<D, N>),
}

#[derive(Debug)]
pub(crate) struct ActiveSession<D, N> {
    /// Node name as shown to the user.
    pub node_name: String,

    /// Handle used to re-read persisted values.
    pub node: N,

    /// Handle the patcher writes through.
    pub document: D,

    /// Definitions and observed values, grouped by owning class.
    pub catalog: PropertyCatalog,
}

impl<D, N> Session<D, N> {
    pub fn is_active(&self) -> bool {
        matches!(self, Session::Active(_))
    }
}

//! # Propview Workspace
//!
//! Transport host wiring a property panel to the editor.
//!
//! The host owns the synchronizer and both transport ends: panel requests
//! arrive as tagged JSON messages, projections flow back the same way, and
//! selection changes arrive from the embedding application. Everything runs
//! on one dispatch loop, one message at a time.

pub mod host;
pub mod messages;

pub use host::{DocumentationProvider, InspectorHost, LogNotifier, Notifier, SelectionEvent};
pub use messages::{decode, encode, InboundMessage, MessageError, OutboundMessage};

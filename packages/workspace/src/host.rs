//! Message dispatch for one inspector panel.
//!
//! The host owns the synchronizer and the transport ends. Messages are
//! handled strictly one at a time, each running to completion (including the
//! patcher call) before the next is taken, so no two edits ever interleave
//! within a session. Racing edits to the same property from outside that
//! loop are the embedder's problem to avoid.

use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use propview_catalog::PropertyCatalog;
use propview_editor::{DocumentPatcher, DocumentationIndex, Inspector, SyncError, SyncOutcome};

use crate::messages::{InboundMessage, OutboundMessage};

/// External documentation lookup plus the ability to open a reference page.
pub trait DocumentationProvider: DocumentationIndex {
    /// Opens the external reference page for `class_name`.
    fn open_documentation(&self, class_name: &str);
}

/// Sink for user-visible notifications.
pub trait Notifier {
    /// Shows a human-readable error to the user.
    fn error(&self, message: &str);
}

/// Notifier that only logs. Useful for headless hosts and tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn error(&self, message: &str) {
        error!("{message}");
    }
}

/// Selection change pushed by the embedding application.
pub enum SelectionEvent<P: DocumentPatcher> {
    Selected {
        node_name: String,
        node: P::Node,
        document: P::Document,
        catalog: PropertyCatalog,
    },
    Cleared,
}

/// Hosts one inspector panel: applies requests, pushes projections.
pub struct InspectorHost<P: DocumentPatcher> {
    inspector: Inspector<P>,
    docs: Box<dyn DocumentationProvider + Send + Sync>,
    notifier: Box<dyn Notifier + Send + Sync>,
    outbound: mpsc::Sender<OutboundMessage>,
}

impl<P: DocumentPatcher> InspectorHost<P> {
    pub fn new(
        patcher: P,
        docs: Box<dyn DocumentationProvider + Send + Sync>,
        notifier: Box<dyn Notifier + Send + Sync>,
        outbound: mpsc::Sender<OutboundMessage>,
    ) -> Self {
        Self {
            inspector: Inspector::new(patcher),
            docs,
            notifier,
            outbound,
        }
    }

    /// Name of the inspected node, if one is selected.
    pub fn selected_node_name(&self) -> Option<&str> {
        self.inspector.selected_node_name()
    }

    /// Replaces the inspected node and pushes a fresh projection.
    pub async fn select_node(
        &mut self,
        node_name: impl Into<String>,
        node: P::Node,
        document: P::Document,
        catalog: PropertyCatalog,
    ) {
        let node_name = node_name.into();
        info!(node = %node_name, "inspecting node");
        self.inspector.select_node(node_name, node, document, catalog);
        self.push_projection().await;
    }

    /// Clears the selection and tells the panel to remove itself.
    pub async fn clear_selection(&mut self) {
        debug!("selection cleared");
        self.inspector.clear_selection();
        self.push_projection().await;
    }

    /// Runs the dispatch loop until both channels close.
    ///
    /// The initial state is pushed first so a freshly attached panel renders
    /// something sensible before the first request arrives.
    pub async fn run(
        mut self,
        mut requests: mpsc::Receiver<InboundMessage>,
        mut selections: mpsc::Receiver<SelectionEvent<P>>,
    ) {
        self.push_projection().await;
        loop {
            tokio::select! {
                Some(event) = selections.recv() => match event {
                    SelectionEvent::Selected { node_name, node, document, catalog } => {
                        self.select_node(node_name, node, document, catalog).await;
                    }
                    SelectionEvent::Cleared => self.clear_selection().await,
                },
                Some(message) = requests.recv() => self.handle(message).await,
                else => break,
            }
        }
        debug!("transport channels closed; inspector host stopping");
    }

    /// Handles one panel request to completion.
    pub async fn handle(&mut self, message: InboundMessage) {
        match message {
            InboundMessage::Edit {
                property_name,
                new_value,
                declared_type,
            } => {
                let result = self
                    .inspector
                    .edit_property(&property_name, &new_value, &declared_type);
                self.finish_sync(result).await;
            }
            InboundMessage::Reset { property_name } => {
                let result = self.inspector.reset_property(&property_name);
                self.finish_sync(result).await;
            }
            InboundMessage::OpenDocs { class_name } => {
                info!(class = %class_name, "opening class documentation");
                self.docs.open_documentation(&class_name);
            }
        }
    }

    /// Converts an operation result into panel traffic.
    ///
    /// Failures stop here: they become a user notification and never reach
    /// the transport layer.
    async fn finish_sync(&mut self, result: Result<SyncOutcome, SyncError>) {
        match result {
            Ok(SyncOutcome::NoSelection) => {}
            Ok(_) => self.push_projection().await,
            Err(err) => {
                error!("{err}");
                self.notifier.error(&err.to_string());
            }
        }
    }

    async fn push_projection(&self) {
        let projection = self.inspector.project(&*self.docs);
        if self.outbound.send(projection).await.is_err() {
            warn!("presentation channel closed; dropping projection");
        }
    }
}

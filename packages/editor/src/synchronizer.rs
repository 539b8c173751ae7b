//! Edit and reset orchestration.
//!
//! The [`Inspector`] coordinates the three places a property value lives:
//! the catalog of definitions and observed values, the persisted document
//! (reached through the [`DocumentPatcher`]), and the node's live values.
//! Each operation resolves the property's default, lets the patcher commit
//! the document change, and only then moves the catalog, so a rejected
//! write never leaves a half-updated state behind.

use tracing::{debug, info, warn};

use propview_catalog::{DeclaredType, PropertyCatalog};

use crate::errors::SyncError;
use crate::patcher::{DocumentPatcher, NodeHandle, OverrideWrite};
use crate::projection::{project_catalog, DocumentationIndex, ViewProjection};
use crate::session::{ActiveSession, Session};

/// Result of an edit or reset request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    /// Override written and the catalog entry updated.
    Applied,

    /// Override written, but the property has no catalog entry to update.
    AppliedUntracked,

    /// No node is selected; the request was ignored.
    NoSelection,
}

/// Keeps the property catalog, the inspected node and the persisted document
/// in step as edits and resets arrive from the presentation layer.
pub struct Inspector<P: DocumentPatcher> {
    patcher: P,
    session: Session<P::Document, P::Node>,
}

impl<P: DocumentPatcher> Inspector<P> {
    pub fn new(patcher: P) -> Self {
        Self {
            patcher,
            session: Session::Inactive,
        }
    }

    /// Replaces the session wholesale with a newly selected node.
    pub fn select_node(
        &mut self,
        node_name: impl Into<String>,
        node: P::Node,
        document: P::Document,
        catalog: PropertyCatalog,
    ) {
        self.session = Session::Active(ActiveSession {
            node_name: node_name.into(),
            node,
            document,
            catalog,
        });
    }

    /// Clears the selection wholesale.
    pub fn clear_selection(&mut self) {
        self.session = Session::Inactive;
    }

    pub fn is_active(&self) -> bool {
        self.session.is_active()
    }

    /// Name of the inspected node, if one is selected.
    pub fn selected_node_name(&self) -> Option<&str> {
        match &self.session {
            Session::Active(active) => Some(&active.node_name),
            Session::Inactive => None,
        }
    }

    /// Applies a user edit to one property.
    ///
    /// The patcher is the authority on what gets persisted; on success the
    /// catalog's observed value follows the write. A patcher failure leaves
    /// the catalog untouched.
    pub fn edit_property(
        &mut self,
        property_name: &str,
        new_value: &str,
        declared_type: &str,
    ) -> Result<SyncOutcome, SyncError> {
        let Session::Active(active) = &mut self.session else {
            warn!(property = property_name, "ignoring edit: no node selected");
            return Ok(SyncOutcome::NoSelection);
        };

        info!(
            property = property_name,
            value = new_value,
            declared_type,
            node = %active.node_name,
            "applying property edit"
        );

        let default_value = match active.catalog.find_by_name(property_name) {
            Some(found) => found.entry.definition.default_value(),
            None => String::new(),
        };

        self.patcher
            .update_override(
                &mut active.document,
                &active.node,
                OverrideWrite {
                    property_name,
                    new_value,
                    declared_type,
                    default_value: &default_value,
                },
            )
            .map_err(|source| SyncError::Update {
                property: property_name.to_string(),
                source,
            })?;

        let tracked = active.catalog.set_observed_value(property_name, new_value);
        if !tracked {
            warn!(
                property = property_name,
                "property missing from catalog; override written without a catalog update"
            );
        }

        verify_persisted_value(&active.node, property_name, new_value, &default_value);

        Ok(if tracked {
            SyncOutcome::Applied
        } else {
            SyncOutcome::AppliedUntracked
        })
    }

    /// Resets one property to its class default by removing its override.
    ///
    /// The document never stores defaults, so removal and restoration are the
    /// same operation. Resetting an already-default property is harmless.
    pub fn reset_property(&mut self, property_name: &str) -> Result<SyncOutcome, SyncError> {
        let Session::Active(active) = &mut self.session else {
            warn!(property = property_name, "ignoring reset: no node selected");
            return Ok(SyncOutcome::NoSelection);
        };

        let (default_value, declared_type) = match active.catalog.find_by_name(property_name) {
            Some(found) => (
                found.entry.definition.default_value(),
                found.entry.definition.declared_type(),
            ),
            None => (String::new(), DeclaredType::Unknown),
        };

        info!(
            property = property_name,
            default = %default_value,
            declared_type = %declared_type,
            node = %active.node_name,
            "resetting property to default"
        );

        self.patcher
            .remove_override(&mut active.document, &active.node, property_name)
            .map_err(|source| SyncError::Reset {
                property: property_name.to_string(),
                source,
            })?;

        let tracked = active.catalog.set_observed_value(property_name, &default_value);
        if !tracked {
            warn!(
                property = property_name,
                "property missing from catalog; override removed without a catalog update"
            );
        }

        Ok(if tracked {
            SyncOutcome::Applied
        } else {
            SyncOutcome::AppliedUntracked
        })
    }

    /// Projects the current state for the presentation layer.
    pub fn project<D>(&self, docs: &D) -> ViewProjection
    where
        D: DocumentationIndex + ?Sized,
    {
        match &self.session {
            Session::Active(active) => project_catalog(&active.node_name, &active.catalog, docs),
            Session::Inactive => ViewProjection::Clear,
        }
    }
}

/// Diagnostic re-read after a write.
///
/// The patcher already committed the change, so a divergence here is logged
/// for investigation rather than propagated as a failure.
fn verify_persisted_value<N: NodeHandle>(
    node: &N,
    property_name: &str,
    expected: &str,
    default_value: &str,
) {
    let persisted = node.read_current_values();
    let observed = persisted
        .iter()
        .find(|(name, _)| name == property_name)
        .map(|(_, value)| value.as_str())
        // No override stored means the property reads back as its default.
        .unwrap_or(default_value);

    if observed == expected {
        debug!(
            property = property_name,
            count = persisted.len(),
            "re-read persisted values"
        );
    } else {
        warn!(
            property = property_name,
            expected, observed, "persisted value diverges from applied edit"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patcher::PatchError;
    use propview_catalog::{PropertyDefinition, PropertyEntry};
    use std::collections::BTreeMap;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::{Arc, Mutex};

    // Shared override store standing in for a parsed scene document.
    type Store = Arc<Mutex<BTreeMap<String, String>>>;

    struct MemoryDocument {
        overrides: Store,
    }

    struct MemoryNode {
        defaults: Vec<(String, String)>,
        overrides: Store,
    }

    impl NodeHandle for MemoryNode {
        fn read_current_values(&self) -> Vec<(String, String)> {
            let overrides = self.overrides.lock().unwrap();
            self.defaults
                .iter()
                .map(|(name, default)| {
                    let value = overrides.get(name).cloned().unwrap_or_else(|| default.clone());
                    (name.clone(), value)
                })
                .collect()
        }
    }

    struct MemoryPatcher {
        fail: Arc<AtomicBool>,
    }

    impl DocumentPatcher for MemoryPatcher {
        type Document = MemoryDocument;
        type Node = MemoryNode;

        fn update_override(
            &mut self,
            document: &mut MemoryDocument,
            _node: &MemoryNode,
            write: OverrideWrite<'_>,
        ) -> Result<(), PatchError> {
            if self.fail.load(Ordering::SeqCst) {
                return Err(PatchError::Other("injected write failure".to_string()));
            }
            let mut overrides = document.overrides.lock().unwrap();
            if write.new_value == write.default_value {
                overrides.remove(write.property_name);
            } else {
                overrides.insert(write.property_name.to_string(), write.new_value.to_string());
            }
            Ok(())
        }

        fn remove_override(
            &mut self,
            document: &mut MemoryDocument,
            _node: &MemoryNode,
            property_name: &str,
        ) -> Result<(), PatchError> {
            if self.fail.load(Ordering::SeqCst) {
                return Err(PatchError::Other("injected remove failure".to_string()));
            }
            document.overrides.lock().unwrap().remove(property_name);
            Ok(())
        }
    }

    struct Fixture {
        inspector: Inspector<MemoryPatcher>,
        overrides: Store,
        fail: Arc<AtomicBool>,
    }

    impl Fixture {
        fn node(&self) -> MemoryNode {
            MemoryNode {
                defaults: vec![("visible".to_string(), "true".to_string())],
                overrides: self.overrides.clone(),
            }
        }

        fn stored(&self, property: &str) -> Option<String> {
            self.overrides.lock().unwrap().get(property).cloned()
        }

        fn observed(&self, property: &str) -> String {
            let projection = self.inspector.project(&NoDocs);
            let ViewProjection::Update {
                properties_by_class, ..
            } = projection
            else {
                panic!("expected an active projection");
            };
            let value = properties_by_class
                .iter()
                .flat_map(|(_, properties)| properties)
                .find(|snapshot| snapshot.name == property)
                .map(|snapshot| snapshot.current_value.clone())
                .unwrap();
            value
        }
    }

    struct NoDocs;

    impl DocumentationIndex for NoDocs {
        fn has_documentation(&self, _class_name: &str) -> bool {
            false
        }
    }

    fn sprite_fixture() -> Fixture {
        let overrides: Store = Arc::default();
        let fail = Arc::new(AtomicBool::new(false));
        let mut inspector = Inspector::new(MemoryPatcher { fail: fail.clone() });

        let node = MemoryNode {
            defaults: vec![("visible".to_string(), "true".to_string())],
            overrides: overrides.clone(),
        };
        let document = MemoryDocument {
            overrides: overrides.clone(),
        };
        let catalog = PropertyCatalog::from_groups([(
            "Sprite2D",
            vec![PropertyEntry::new(
                PropertyDefinition::new("visible", "visible: bool = true"),
                "true",
            )],
        )]);

        inspector.select_node("Player", node, document, catalog);
        Fixture {
            inspector,
            overrides,
            fail,
        }
    }

    #[test]
    fn edit_writes_override_and_updates_catalog() {
        let mut fx = sprite_fixture();

        let outcome = fx.inspector.edit_property("visible", "false", "bool").unwrap();

        assert_eq!(outcome, SyncOutcome::Applied);
        assert_eq!(fx.stored("visible").as_deref(), Some("false"));
        assert_eq!(fx.observed("visible"), "false");
    }

    #[test]
    fn edit_back_to_default_drops_the_override() {
        let mut fx = sprite_fixture();
        fx.inspector.edit_property("visible", "false", "bool").unwrap();

        fx.inspector.edit_property("visible", "true", "bool").unwrap();

        // The patcher saw new value == default and removed the override.
        assert_eq!(fx.stored("visible"), None);
        assert_eq!(fx.observed("visible"), "true");
    }

    #[test]
    fn reset_restores_default_on_node_and_catalog() {
        let mut fx = sprite_fixture();
        fx.inspector.edit_property("visible", "false", "bool").unwrap();

        let outcome = fx.inspector.reset_property("visible").unwrap();

        assert_eq!(outcome, SyncOutcome::Applied);
        assert_eq!(fx.stored("visible"), None);
        assert_eq!(fx.observed("visible"), "true");
        // A fresh node re-read agrees with the catalog.
        assert_eq!(
            fx.node().read_current_values(),
            vec![("visible".to_string(), "true".to_string())]
        );
    }

    #[test]
    fn reset_is_idempotent() {
        let mut fx = sprite_fixture();
        fx.inspector.edit_property("visible", "false", "bool").unwrap();

        fx.inspector.reset_property("visible").unwrap();
        let once = fx.observed("visible");
        fx.inspector.reset_property("visible").unwrap();

        assert_eq!(fx.observed("visible"), once);
        assert_eq!(fx.stored("visible"), None);
    }

    #[test]
    fn edit_without_selection_is_reported_not_failed() {
        let fail = Arc::new(AtomicBool::new(false));
        let mut inspector = Inspector::new(MemoryPatcher { fail });

        let outcome = inspector.edit_property("visible", "false", "bool").unwrap();

        assert_eq!(outcome, SyncOutcome::NoSelection);
        assert!(!inspector.is_active());
    }

    #[test]
    fn reset_without_selection_is_reported_not_failed() {
        let fail = Arc::new(AtomicBool::new(false));
        let mut inspector = Inspector::new(MemoryPatcher { fail });

        let outcome = inspector.reset_property("visible").unwrap();
        assert_eq!(outcome, SyncOutcome::NoSelection);
    }

    #[test]
    fn failed_write_leaves_catalog_untouched() {
        let mut fx = sprite_fixture();
        fx.fail.store(true, Ordering::SeqCst);

        let err = fx.inspector.edit_property("visible", "false", "bool").unwrap_err();

        assert!(err.to_string().contains("visible"));
        assert_eq!(fx.observed("visible"), "true");
        assert_eq!(fx.stored("visible"), None);
    }

    #[test]
    fn failed_remove_leaves_catalog_untouched() {
        let mut fx = sprite_fixture();
        fx.inspector.edit_property("visible", "false", "bool").unwrap();
        fx.fail.store(true, Ordering::SeqCst);

        let err = fx.inspector.reset_property("visible").unwrap_err();

        assert!(err.to_string().contains("failed to reset"));
        assert_eq!(fx.observed("visible"), "false");
        assert_eq!(fx.stored("visible").as_deref(), Some("false"));
    }

    #[test]
    fn edit_of_untracked_property_still_writes() {
        let mut fx = sprite_fixture();

        let outcome = fx
            .inspector
            .edit_property("modulate", "Color(1, 0, 0, 1)", "Color")
            .unwrap();

        assert_eq!(outcome, SyncOutcome::AppliedUntracked);
        assert_eq!(fx.stored("modulate").as_deref(), Some("Color(1, 0, 0, 1)"));
        // Catalog has no entry for it, before or after.
        assert!(fx.inspector.project(&NoDocs) != ViewProjection::Clear);
    }

    #[test]
    fn duplicate_names_resolve_to_first_group() {
        let overrides: Store = Arc::default();
        let fail = Arc::new(AtomicBool::new(false));
        let mut inspector = Inspector::new(MemoryPatcher { fail });

        let node = MemoryNode {
            defaults: vec![("size".to_string(), "16".to_string())],
            overrides: overrides.clone(),
        };
        let document = MemoryDocument {
            overrides: overrides.clone(),
        };
        let catalog = PropertyCatalog::from_groups([
            (
                "Label",
                vec![PropertyEntry::new(
                    PropertyDefinition::new("size", "size: int = 16"),
                    "16",
                )],
            ),
            (
                "Control",
                vec![PropertyEntry::new(
                    PropertyDefinition::new("size", "size: Vector2 = Vector2(0, 0)"),
                    "Vector2(0, 0)",
                )],
            ),
        ]);
        inspector.select_node("Title", node, document, catalog);

        inspector.edit_property("size", "32", "int").unwrap();

        let projection = inspector.project(&NoDocs);
        let ViewProjection::Update {
            properties_by_class, ..
        } = projection
        else {
            panic!("expected an active projection");
        };
        // The most-derived group took the update; the shadowed one did not.
        assert_eq!(properties_by_class.get("Label").unwrap()[0].current_value, "32");
        assert_eq!(
            properties_by_class.get("Control").unwrap()[0].current_value,
            "Vector2(0, 0)"
        );
    }

    #[test]
    fn selection_replaces_state_wholesale() {
        let mut fx = sprite_fixture();
        assert_eq!(fx.inspector.selected_node_name(), Some("Player"));

        fx.inspector.clear_selection();
        assert!(!fx.inspector.is_active());
        assert_eq!(fx.inspector.selected_node_name(), None);
        assert_eq!(fx.inspector.project(&NoDocs), ViewProjection::Clear);
    }
}

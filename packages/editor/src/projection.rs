//! Transport-safe snapshots for the presentation layer.
//!
//! A projection is what the property panel renders: the catalog contents
//! keyed by owning class, the node identity, and the subset of classes with
//! external documentation. An empty catalog projects as [`ViewProjection::Clear`],
//! which tells the panel to remove itself; that is a different instruction
//! from an update carrying no properties, and the two are never conflated.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use propview_catalog::{PropertyCatalog, PropertyEntry};

/// External documentation lookup, used only to annotate projections.
pub trait DocumentationIndex {
    fn has_documentation(&self, class_name: &str) -> bool;
}

/// One property as the panel sees it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertySnapshot {
    pub name: String,
    pub detail: String,
    pub current_value: String,
    pub default_value: String,
}

/// Catalog contents keyed by owning class.
///
/// Serializes as a JSON object whose key order is catalog order; the panel
/// renders class sections in exactly this order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassMap(Vec<(String, Vec<PropertySnapshot>)>);

impl ClassMap {
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[PropertySnapshot])> {
        self.0
            .iter()
            .map(|(class, properties)| (class.as_str(), properties.as_slice()))
    }

    pub fn get(&self, class_name: &str) -> Option<&[PropertySnapshot]> {
        self.0
            .iter()
            .find(|(class, _)| class == class_name)
            .map(|(_, properties)| properties.as_slice())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for ClassMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (class, properties) in &self.0 {
            map.serialize_entry(class, properties)?;
        }
        map.end()
    }
}

/// Message pushed to the presentation layer after every state change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ViewProjection {
    /// Full panel contents for the selected node.
    #[serde(rename_all = "camelCase")]
    Update {
        node_name: String,
        properties_by_class: ClassMap,
        documented_classes: Vec<String>,
    },

    /// Remove any rendered panel. Distinct from an update with no data.
    Clear,
}

/// Projects a live catalog. An empty catalog yields `Clear`.
pub(crate) fn project_catalog<D>(
    node_name: &str,
    catalog: &PropertyCatalog,
    docs: &D,
) -> ViewProjection
where
    D: DocumentationIndex + ?Sized,
{
    if catalog.is_empty() {
        return ViewProjection::Clear;
    }

    let properties_by_class = ClassMap(
        catalog
            .classes()
            .map(|(class, entries)| {
                (
                    class.to_string(),
                    entries.iter().map(snapshot).collect::<Vec<_>>(),
                )
            })
            .collect(),
    );

    let documented_classes = catalog
        .owner_classes()
        .filter(|class| docs.has_documentation(class))
        .map(str::to_string)
        .collect();

    ViewProjection::Update {
        node_name: node_name.to_string(),
        properties_by_class,
        documented_classes,
    }
}

fn snapshot(entry: &PropertyEntry) -> PropertySnapshot {
    PropertySnapshot {
        name: entry.definition.name.clone(),
        detail: entry.definition.detail.clone(),
        current_value: entry.current_value.clone(),
        default_value: entry.definition.default_value(),
    }
}

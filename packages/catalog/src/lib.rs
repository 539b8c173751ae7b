//! # Propview Catalog
//!
//! Property definitions and the per-node property catalog.
//!
//! A catalog is the in-memory grouping of property definitions and observed
//! values for one inspected node, organized by owning class in hierarchy
//! resolution order (most-derived class first, by convention). The same
//! property name may appear once per owning class, and lookups resolve to the
//! first group in catalog order: a most-derived class shadows its ancestors.
//!
//! Definitions are immutable for the lifetime of a selection. The only
//! mutable state is each entry's observed value, which the editor keeps in
//! step with the persisted document.

pub mod defaults;

use serde::{Deserialize, Serialize};

pub use defaults::{extract_default, parse_declared_type, DeclaredType};

/// Immutable description of one property on one class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyDefinition {
    /// Property name, unique within its owning class.
    pub name: String,

    /// Declared type and optional embedded default expression,
    /// e.g. `"visible: bool = true"`.
    pub detail: String,
}

impl PropertyDefinition {
    pub fn new(name: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            detail: detail.into(),
        }
    }

    /// Canonical default value, derived from the detail string.
    ///
    /// Definitions with no visible default produce the empty string.
    pub fn default_value(&self) -> String {
        defaults::extract_default(self)
    }

    /// Declared type recovered from the detail string.
    pub fn declared_type(&self) -> DeclaredType {
        defaults::parse_declared_type(&self.detail)
    }
}

/// A definition paired with the value currently observed on the node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyEntry {
    pub definition: PropertyDefinition,
    pub current_value: String,
}

impl PropertyEntry {
    pub fn new(definition: PropertyDefinition, current_value: impl Into<String>) -> Self {
        Self {
            definition,
            current_value: current_value.into(),
        }
    }

    /// Entry whose observed value starts at the definition default.
    pub fn at_default(definition: PropertyDefinition) -> Self {
        let current_value = definition.default_value();
        Self {
            definition,
            current_value,
        }
    }
}

/// Resolved lookup result: the owning class and the matched entry.
#[derive(Debug, Clone, Copy)]
pub struct PropertyRef<'a> {
    pub owner_class: &'a str,
    pub entry: &'a PropertyEntry,
}

/// Ordered grouping of property entries by owning class.
///
/// Group order is supplied by the caller and preserved exactly; it determines
/// which class wins when names collide across an inheritance chain.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyCatalog {
    groups: Vec<ClassGroup>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct ClassGroup {
    class_name: String,
    entries: Vec<PropertyEntry>,
}

impl PropertyCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a catalog from `(class name, entries)` pairs, keeping their
    /// order.
    pub fn from_groups<C, I>(groups: I) -> Self
    where
        C: Into<String>,
        I: IntoIterator<Item = (C, Vec<PropertyEntry>)>,
    {
        let mut catalog = Self::new();
        for (class_name, entries) in groups {
            catalog.push_class(class_name, entries);
        }
        catalog
    }

    /// Appends a class group at the end of the resolution order.
    pub fn push_class(&mut self, class_name: impl Into<String>, entries: Vec<PropertyEntry>) {
        self.groups.push(ClassGroup {
            class_name: class_name.into(),
            entries,
        });
    }

    /// Finds the first entry named `name`, scanning groups in catalog order.
    ///
    /// Ties across classes are not an error; the first match wins
    /// deterministically.
    pub fn find_by_name(&self, name: &str) -> Option<PropertyRef<'_>> {
        self.groups.iter().find_map(|group| {
            group
                .entries
                .iter()
                .find(|entry| entry.definition.name == name)
                .map(|entry| PropertyRef {
                    owner_class: &group.class_name,
                    entry,
                })
        })
    }

    /// Updates the observed value of the first entry named `name`.
    ///
    /// Returns `false` when no entry matches; the catalog is left untouched
    /// in that case.
    pub fn set_observed_value(&mut self, name: &str, value: &str) -> bool {
        for group in &mut self.groups {
            if let Some(entry) = group
                .entries
                .iter_mut()
                .find(|entry| entry.definition.name == name)
            {
                entry.current_value = value.to_string();
                return true;
            }
        }
        false
    }

    /// Owning class names in catalog order.
    pub fn owner_classes(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(|group| group.class_name.as_str())
    }

    /// Class groups in catalog order.
    pub fn classes(&self) -> impl Iterator<Item = (&str, &[PropertyEntry])> {
        self.groups
            .iter()
            .map(|group| (group.class_name.as_str(), group.entries.as_slice()))
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

//! Revalidation dependencies between fields

use super::field::FieldName;
use std::collections::HashMap;

/// Directed edges `changed -> dependent`: when `changed` gets a new value,
/// `dependent` is revalidated in the same update.
///
/// Propagation is one hop. Dependents of dependents are not chased, which
/// also keeps cyclic declarations finite.
#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    edges: HashMap<FieldName, Vec<FieldName>>,
}

impl DependencyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare that changing `changed` requires revalidating each of `dependents`
    pub fn with_dependents<I, S>(mut self, changed: &str, dependents: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<FieldName>,
    {
        let entry = self.edges.entry(changed.to_string()).or_default();
        for dependent in dependents {
            let dependent = dependent.into();
            if !entry.contains(&dependent) {
                entry.push(dependent);
            }
        }
        self
    }

    /// Direct dependents of a field, empty if none were declared
    pub fn dependents_of(&self, field: &str) -> &[FieldName] {
        self.edges.get(field).map(Vec::as_slice).unwrap_or_default()
    }

    /// Fields to rerun validators on after `field` changes: the field
    /// itself first, then its direct dependents
    pub fn revalidation_set<'a>(&'a self, field: &'a str) -> Vec<&'a str> {
        let mut set = vec![field];
        for dependent in self.dependents_of(field) {
            if !set.contains(&dependent.as_str()) {
                set.push(dependent.as_str());
            }
        }
        set
    }

    /// Every field name mentioned on either side of an edge
    pub fn referenced_fields(&self) -> impl Iterator<Item = &str> {
        self.edges
            .iter()
            .flat_map(|(changed, dependents)| {
                std::iter::once(changed).chain(dependents.iter())
            })
            .map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.edges.values().all(Vec::is_empty)
    }
}

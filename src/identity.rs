//! Component identity side-table.
//!
//! Every component routed by the registry gets exactly one id,
//! `"{namespace}/{declared name}"`. That id is the join key between rendering
//! (`action_id` / `callback_id` props), dispatch and the stateful-control
//! protocol.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::element::{Component, ComponentKey};

/// Metadata the registry owns for one component.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComponentMeta {
    pub id: Option<String>,
    /// Set when the component hosts a state descriptor.
    pub stateful: bool,
}

/// Shared table of component metadata.
///
/// Cloning is cheap; clones share the same table.
#[derive(Debug, Clone, Default)]
pub struct IdentityTable {
    inner: Arc<RwLock<HashMap<ComponentKey, ComponentMeta>>>,
}

/// Derive the id a component gets inside `namespace`.
pub fn derive_id(namespace: &str, component: &Component) -> String {
    format!("{}/{}", namespace, component.name())
}

impl IdentityTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign the namespaced id and return it.
    ///
    /// Assigning the same namespace again yields the same id.
    pub fn assign(&self, namespace: &str, component: &Component) -> String {
        let id = derive_id(namespace, component);
        let mut table = self.inner.write();
        let meta = table.entry(component.key()).or_default();
        if let Some(existing) = meta.id.as_ref().filter(|existing| **existing != id) {
            tracing::warn!(
                component = component.name(),
                previous = %existing,
                id = %id,
                "Component registered under a second namespace; id reassigned"
            );
        }
        meta.id = Some(id.clone());
        id
    }

    pub fn id_of(&self, component: &Component) -> Option<String> {
        self.inner
            .read()
            .get(&component.key())
            .and_then(|meta| meta.id.clone())
    }

    pub fn mark_stateful(&self, component: &Component) {
        self.inner
            .write()
            .entry(component.key())
            .or_default()
            .stateful = true;
    }

    pub fn is_stateful(&self, component: &Component) -> bool {
        self.inner
            .read()
            .get(&component.key())
            .is_some_and(|meta| meta.stateful)
    }

    pub fn meta(&self, component: &Component) -> ComponentMeta {
        self.inner
            .read()
            .get(&component.key())
            .cloned()
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::Node;

    fn component(name: &str) -> Component {
        Component::new(name, |_, _| async { Ok(Node::Empty) })
    }

    #[test]
    fn assign_is_idempotent() {
        let table = IdentityTable::new();
        let add = component("AddTodo");
        assert_eq!(table.assign("todos", &add), "todos/AddTodo");
        assert_eq!(table.assign("todos", &add), "todos/AddTodo");
        assert_eq!(table.id_of(&add).as_deref(), Some("todos/AddTodo"));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn unknown_component_has_no_id() {
        let table = IdentityTable::new();
        assert_eq!(table.id_of(&component("Loose")), None);
        assert!(!table.is_stateful(&component("Loose")));
    }

    #[test]
    fn stateful_flag_survives_assignment() {
        let table = IdentityTable::new();
        let form = component("Form");
        table.mark_stateful(&form);
        table.assign("forms", &form);
        assert_eq!(
            table.meta(&form),
            ComponentMeta {
                id: Some("forms/Form".to_string()),
                stateful: true,
            }
        );
    }
}

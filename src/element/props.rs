//! Element and component props.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::element::{Component, Element, Node};

/// A single prop value.
#[derive(Clone)]
pub enum Prop {
    /// Renderable content, or a primitive passed through as-is.
    Node(Node),
    /// Plain data emitted unchanged (filters, dispatch configs, metadata).
    Json(Value),
    /// A component reference, resolved to its id in `action_id` / `callback_id`.
    Component(Component),
    /// An opaque host value for component props (callbacks, handles).
    Opaque(Arc<dyn Any + Send + Sync>),
}

impl Prop {
    pub fn opaque<T: Any + Send + Sync>(value: T) -> Self {
        Prop::Opaque(Arc::new(value))
    }

    /// Best-effort JSON view of primitive and data props.
    pub fn to_json(&self) -> Option<Value> {
        match self {
            Prop::Json(value) => Some(value.clone()),
            Prop::Node(node) => node_to_json(node),
            Prop::Component(_) | Prop::Opaque(_) => None,
        }
    }
}

fn node_to_json(node: &Node) -> Option<Value> {
    match node {
        Node::Empty => Some(Value::Null),
        Node::Bool(flag) => Some(Value::Bool(*flag)),
        Node::Text(text) => Some(Value::String(text.clone())),
        Node::Number(number) => Some(Value::Number(number.clone())),
        Node::List(items) => items
            .iter()
            .map(node_to_json)
            .collect::<Option<Vec<_>>>()
            .map(Value::Array),
        Node::Element(_) => None,
    }
}

impl fmt::Debug for Prop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Prop::Node(node) => f.debug_tuple("Node").field(node).finish(),
            Prop::Json(value) => f.debug_tuple("Json").field(value).finish(),
            Prop::Component(component) => f.debug_tuple("Component").field(component).finish(),
            Prop::Opaque(_) => f.write_str("Opaque(..)"),
        }
    }
}

impl From<Node> for Prop {
    fn from(node: Node) -> Self {
        Prop::Node(node)
    }
}

impl From<Element> for Prop {
    fn from(element: Element) -> Self {
        Prop::Node(Node::Element(element))
    }
}

impl From<Vec<Node>> for Prop {
    fn from(nodes: Vec<Node>) -> Self {
        Prop::Node(Node::List(nodes))
    }
}

impl From<Vec<Element>> for Prop {
    fn from(elements: Vec<Element>) -> Self {
        Prop::Node(Node::list(elements))
    }
}

impl From<&str> for Prop {
    fn from(text: &str) -> Self {
        Prop::Node(Node::from(text))
    }
}

impl From<String> for Prop {
    fn from(text: String) -> Self {
        Prop::Node(Node::Text(text))
    }
}

impl From<bool> for Prop {
    fn from(flag: bool) -> Self {
        Prop::Node(Node::Bool(flag))
    }
}

macro_rules! prop_from_number {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Prop {
                fn from(value: $ty) -> Self {
                    Prop::Node(Node::from(value))
                }
            }
        )*
    };
}

prop_from_number!(i32, i64, u32, u64, usize, f64);

impl From<Value> for Prop {
    fn from(value: Value) -> Self {
        Prop::Json(value)
    }
}

impl From<Component> for Prop {
    fn from(component: Component) -> Self {
        Prop::Component(component)
    }
}

impl From<&Component> for Prop {
    fn from(component: &Component) -> Self {
        Prop::Component(component.clone())
    }
}

impl<T: Into<Prop>> From<Option<T>> for Prop {
    fn from(value: Option<T>) -> Self {
        value.map_or(Prop::Node(Node::Empty), Into::into)
    }
}

/// Insertion-ordered prop map.
#[derive(Debug, Clone, Default)]
pub struct Props {
    entries: Vec<(String, Prop)>,
}

impl Props {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`Props::set`].
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Prop>) -> Self {
        self.set(key, value);
        self
    }

    /// Insert or replace a prop. A `children` list is flattened one level.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Prop>) {
        let key = key.into();
        let value = match value.into() {
            Prop::Node(node @ Node::List(_)) if key == "children" => {
                Prop::Node(Node::List(node.flatten_once()))
            }
            other => other,
        };
        match self.entries.iter_mut().find(|(existing, _)| *existing == key) {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((key, value)),
        }
    }

    pub(crate) fn push_child(&mut self, child: Node) {
        let merged = match self.remove("children") {
            None | Some(Prop::Node(Node::Empty)) => match child {
                Node::List(_) => Node::List(child.flatten_once()),
                other => other,
            },
            Some(Prop::Node(Node::List(mut items))) => {
                items.extend(child.flatten_once());
                Node::List(items)
            }
            Some(Prop::Node(existing)) => {
                let mut items = vec![existing];
                items.extend(child.flatten_once());
                Node::List(items)
            }
            // Non-node children are replaced wholesale.
            Some(_) => child,
        };
        self.entries.push(("children".to_string(), Prop::Node(merged)));
    }

    pub fn get(&self, key: &str) -> Option<&Prop> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, value)| value)
    }

    pub fn remove(&mut self, key: &str) -> Option<Prop> {
        let index = self.entries.iter().position(|(existing, _)| existing == key)?;
        Some(self.entries.remove(index).1)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Prop)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }

    /// Props from `other` override props in `self`.
    pub fn merge(mut self, other: Props) -> Props {
        for (key, value) in other.entries {
            self.set(key, value);
        }
        self
    }

    /// The `children` prop, or `Empty`.
    pub fn children(&self) -> Node {
        match self.get("children") {
            Some(Prop::Node(node)) => node.clone(),
            _ => Node::Empty,
        }
    }

    pub fn node(&self, key: &str) -> Option<&Node> {
        match self.get(key)? {
            Prop::Node(Node::Empty) => None,
            Prop::Node(node) => Some(node),
            _ => None,
        }
    }

    /// A string prop, given either as text or as a JSON string.
    pub fn text(&self, key: &str) -> Option<&str> {
        match self.get(key)? {
            Prop::Node(Node::Text(text)) => Some(text),
            Prop::Json(Value::String(text)) => Some(text),
            _ => None,
        }
    }

    pub fn flag(&self, key: &str) -> Option<bool> {
        match self.get(key)? {
            Prop::Node(Node::Bool(flag)) => Some(*flag),
            Prop::Json(Value::Bool(flag)) => Some(*flag),
            _ => None,
        }
    }

    /// A data prop as JSON. `Empty` and missing props are `None`.
    pub fn json(&self, key: &str) -> Option<Value> {
        match self.get(key)?.to_json()? {
            Value::Null => None,
            value => Some(value),
        }
    }

    pub fn component(&self, key: &str) -> Option<&Component> {
        match self.get(key)? {
            Prop::Component(component) => Some(component),
            _ => None,
        }
    }

    pub fn opaque<T: Any + Send + Sync>(&self, key: &str) -> Option<Arc<T>> {
        match self.get(key)? {
            Prop::Opaque(value) => value.clone().downcast::<T>().ok(),
            _ => None,
        }
    }
}

impl IntoIterator for Props {
    type Item = (String, Prop);
    type IntoIter = std::vec::IntoIter<(String, Prop)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn set_replaces_in_place() {
        let mut props = Props::new().with("a", 1).with("b", "two");
        props.set("a", "one");
        let keys: Vec<_> = props.iter().map(|(key, _)| key).collect();
        assert_eq!(keys, vec!["a", "b"]);
        assert_eq!(props.text("a"), Some("one"));
    }

    #[test]
    fn merge_overrides() {
        let base = Props::new().with("query", "old").with("keep", true);
        let merged = base.merge(Props::new().with("query", "new"));
        assert_eq!(merged.text("query"), Some("new"));
        assert_eq!(merged.flag("keep"), Some(true));
    }

    #[test]
    fn json_view_of_primitives() {
        let props = Props::new()
            .with("users", vec![Node::from("U1"), Node::from("U2")])
            .with("filter", json!({"include": ["im"]}))
            .with("missing", None::<&str>);
        assert_eq!(props.json("users"), Some(json!(["U1", "U2"])));
        assert_eq!(props.json("filter"), Some(json!({"include": ["im"]})));
        assert_eq!(props.json("missing"), None);
    }

    #[test]
    fn opaque_downcasts_by_type() {
        let props = Props::new().with("handle", Prop::opaque(42u8));
        assert_eq!(props.opaque::<u8>("handle").as_deref(), Some(&42));
        assert!(props.opaque::<String>("handle").is_none());
    }
}

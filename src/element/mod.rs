//! Element model: the tree-shaped vocabulary the evaluator consumes.
//!
//! ```text
//! Node ── Empty | Bool | Text | Number | List(Vec<Node>)
//!   └──── Element { kind, props }
//!            kind ── Intrinsic(tag) | Component | Fragment | Provider
//! ```

mod component;
mod intrinsic;
mod props;

pub use component::{Component, ComponentFuture, ComponentKey};
pub use intrinsic::{is_child_prop, is_multi_child_prop, Intrinsic, UnknownIntrinsic};
pub use props::{Prop, Props};

use serde_json::{Number, Value};

use crate::context::ProviderBinding;

/// A renderable tree value.
///
/// `Empty` and `Bool` render nothing inside lists, which keeps
/// conditional-inclusion idioms (`cond.then(|| ...)`) free of explicit
/// filtering.
#[derive(Debug, Clone, Default)]
pub enum Node {
    #[default]
    Empty,
    Bool(bool),
    Text(String),
    Number(Number),
    Element(Element),
    List(Vec<Node>),
}

impl Node {
    /// Build a list node from anything convertible to nodes.
    pub fn list<I, N>(items: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<Node>,
    {
        Node::List(items.into_iter().map(Into::into).collect())
    }

    /// `Empty` and booleans: markers that render nothing.
    pub fn renders_nothing(&self) -> bool {
        matches!(self, Node::Empty | Node::Bool(_))
    }

    /// Strings and numbers, which shorthand into `plain_text`.
    pub fn is_textual(&self) -> bool {
        matches!(self, Node::Text(_) | Node::Number(_))
    }

    /// Flatten nested lists one level. Non-list nodes become a one-item vec.
    pub fn flatten_once(self) -> Vec<Node> {
        match self {
            Node::List(items) => items
                .into_iter()
                .flat_map(|item| match item {
                    Node::List(inner) => inner,
                    other => vec![other],
                })
                .collect(),
            other => vec![other],
        }
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

impl From<&str> for Node {
    fn from(text: &str) -> Self {
        Node::Text(text.to_string())
    }
}

impl From<String> for Node {
    fn from(text: String) -> Self {
        Node::Text(text)
    }
}

impl From<bool> for Node {
    fn from(flag: bool) -> Self {
        Node::Bool(flag)
    }
}

impl From<()> for Node {
    fn from(_: ()) -> Self {
        Node::Empty
    }
}

macro_rules! node_from_int {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Node {
                fn from(value: $ty) -> Self {
                    Node::Number(Number::from(value))
                }
            }
        )*
    };
}

node_from_int!(i32, i64, u32, u64, usize);

impl From<f64> for Node {
    fn from(value: f64) -> Self {
        Number::from_f64(value).map_or(Node::Empty, Node::Number)
    }
}

impl<T: Into<Node>> From<Vec<T>> for Node {
    fn from(items: Vec<T>) -> Self {
        Node::list(items)
    }
}

impl<T: Into<Node>> From<Option<T>> for Node {
    fn from(value: Option<T>) -> Self {
        value.map_or(Node::Empty, Into::into)
    }
}

/// A number as it reads in text: whole floats print without a fraction.
pub fn number_text(number: &Number) -> String {
    match number.as_f64() {
        Some(value) if number.is_f64() => value.to_string(),
        _ => number.to_string(),
    }
}

/// What an element is.
#[derive(Debug, Clone)]
pub enum ElementKind {
    Intrinsic(Intrinsic),
    Component(Component),
    Fragment,
    Provider(ProviderBinding),
}

/// One immutable node of the UI tree.
#[derive(Debug, Clone)]
pub struct Element {
    kind: ElementKind,
    props: Props,
}

impl Element {
    pub fn new(kind: ElementKind, props: Props) -> Self {
        Self { kind, props }
    }

    pub fn intrinsic(kind: Intrinsic) -> Self {
        Self::new(ElementKind::Intrinsic(kind), Props::new())
    }

    pub fn component(component: &Component) -> Self {
        Self::new(ElementKind::Component(component.clone()), Props::new())
    }

    pub fn fragment(children: impl Into<Node>) -> Self {
        Self::new(ElementKind::Fragment, Props::new()).children(children)
    }

    /// A `raw` element: `value` is emitted verbatim, bypassing all shaping.
    pub fn raw(value: Value) -> Self {
        Self::intrinsic(Intrinsic::Raw).prop("value", value)
    }

    pub fn kind(&self) -> &ElementKind {
        &self.kind
    }

    pub fn props(&self) -> &Props {
        &self.props
    }

    pub fn into_parts(self) -> (ElementKind, Props) {
        (self.kind, self.props)
    }

    pub fn prop(mut self, key: impl Into<String>, value: impl Into<Prop>) -> Self {
        self.props.set(key, value);
        self
    }

    /// Replace `children`. A list is flattened one level.
    pub fn children(mut self, children: impl Into<Node>) -> Self {
        self.props.set("children", Prop::Node(children.into()));
        self
    }

    /// Append one child, the way a literal with several children would.
    ///
    /// The first child is stored bare; later ones turn `children` into a list.
    pub fn child(mut self, child: impl Into<Node>) -> Self {
        self.props.push_child(child.into());
        self
    }

    pub fn action_id(self, value: impl Into<Prop>) -> Self {
        self.prop("action_id", value)
    }

    pub fn callback_id(self, value: impl Into<Prop>) -> Self {
        self.prop("callback_id", value)
    }

    pub fn block_id(self, value: impl Into<String>) -> Self {
        self.prop("block_id", value.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn children_list_is_flattened_once_at_creation() {
        let element = Element::intrinsic(Intrinsic::Actions).children(Node::list([
            Node::list(["a", "b"]),
            Node::from("c"),
            Node::list([Node::list(["d"])]),
        ]));

        let Some(Prop::Node(Node::List(items))) = element.props().get("children") else {
            panic!("children should be a list");
        };
        assert_eq!(items.len(), 4);
        assert!(matches!(&items[3], Node::List(inner) if inner.len() == 1));
    }

    #[test]
    fn single_child_stays_bare() {
        let element = Element::intrinsic(Intrinsic::Button).child("Go");
        assert!(matches!(
            element.props().get("children"),
            Some(Prop::Node(Node::Text(text))) if text == "Go"
        ));

        let element = element.child("!");
        assert!(matches!(
            element.props().get("children"),
            Some(Prop::Node(Node::List(items))) if items.len() == 2
        ));
    }

    #[test]
    fn render_nothing_markers() {
        assert!(Node::Empty.renders_nothing());
        assert!(Node::from(false).renders_nothing());
        assert!(!Node::from("x").renders_nothing());
        assert!(Node::from(3).is_textual());
        assert!(matches!(Node::from(f64::NAN), Node::Empty));
        assert!(matches!(Node::from(None::<&str>), Node::Empty));
    }
}

//! Function components.
//!
//! A component is a named async function from [`Props`] to a [`Node`]. It owns
//! no state; identity metadata (the namespaced id and the stateful flag) lives
//! in the [`IdentityTable`](crate::identity::IdentityTable) side-table keyed by
//! [`ComponentKey`].

use std::fmt;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use futures_core::future::BoxFuture;

use crate::element::{Node, Props};
use crate::render::{RenderError, Scope};

static NEXT_KEY: AtomicU64 = AtomicU64::new(1);

/// Process-unique key of a component value. Clones share the key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComponentKey(u64);

/// Boxed future returned by every component invocation.
pub type ComponentFuture = BoxFuture<'static, Result<Node, RenderError>>;

type RenderFn = dyn Fn(Props, Scope) -> ComponentFuture + Send + Sync;

struct Inner {
    key: ComponentKey,
    name: String,
    render: Box<RenderFn>,
}

/// A function component.
#[derive(Clone)]
pub struct Component {
    inner: Arc<Inner>,
}

impl Component {
    /// Wrap an async function as a component with the given declared name.
    ///
    /// The name becomes the second half of the component's id
    /// (`"{namespace}/{name}"`) once it passes through the registry.
    pub fn new<F, Fut>(name: impl Into<String>, render: F) -> Self
    where
        F: Fn(Props, Scope) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Node, RenderError>> + Send + 'static,
    {
        let key = ComponentKey(NEXT_KEY.fetch_add(1, Ordering::Relaxed));
        Self {
            inner: Arc::new(Inner {
                key,
                name: name.into(),
                render: Box::new(move |props, scope| -> ComponentFuture {
                    Box::pin(render(props, scope))
                }),
            }),
        }
    }

    pub fn key(&self) -> ComponentKey {
        self.inner.key
    }

    /// Declared name, as given to [`Component::new`].
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    pub(crate) fn invoke(&self, props: Props, scope: Scope) -> ComponentFuture {
        (self.inner.render)(props, scope)
    }
}

impl PartialEq for Component {
    fn eq(&self, other: &Self) -> bool {
        self.inner.key == other.inner.key
    }
}

impl Eq for Component {}

impl fmt::Debug for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Component")
            .field("name", &self.inner.name)
            .field("key", &self.inner.key.0)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_key() {
        let a = Component::new("Greeting", |_, _| async { Ok(Node::Empty) });
        let b = a.clone();
        assert_eq!(a, b);
        assert_eq!(a.key(), b.key());
        assert_eq!(b.name(), "Greeting");
    }

    #[test]
    fn separate_components_differ() {
        let a = Component::new("Same", |_, _| async { Ok(Node::Empty) });
        let b = Component::new("Same", |_, _| async { Ok(Node::Empty) });
        assert_ne!(a, b);
    }
}

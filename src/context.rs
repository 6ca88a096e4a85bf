//! Contexts scoped to a single render pass.
//!
//! A [`Context`] is a typed key with a default value. A Provider element
//! binds a value for its subtree only: the evaluator threads an immutable
//! [`ContextSnapshot`] down the tree and each Provider derives a new snapshot
//! for its children. Concurrent render passes never share a snapshot, so a
//! value bound in one pass cannot be observed by another.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::element::{Element, ElementKind, Node, Props};

static NEXT_KEY: AtomicU64 = AtomicU64::new(1);

/// Identity of a context object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContextKey(u64);

type ErasedValue = Arc<dyn Any + Send + Sync>;

/// A typed context with a process-wide default.
pub struct Context<T> {
    key: ContextKey,
    default: Arc<T>,
}

impl<T: Send + Sync + 'static> Context<T> {
    pub fn new(default: T) -> Self {
        Self {
            key: ContextKey(NEXT_KEY.fetch_add(1, Ordering::Relaxed)),
            default: Arc::new(default),
        }
    }

    pub fn key(&self) -> ContextKey {
        self.key
    }

    pub fn default_value(&self) -> Arc<T> {
        self.default.clone()
    }

    /// A Provider element binding `value` for `children`.
    pub fn provide(&self, value: T, children: impl Into<Node>) -> Element {
        self.provide_shared(Arc::new(value), children)
    }

    pub fn provide_shared(&self, value: Arc<T>, children: impl Into<Node>) -> Element {
        let binding = ProviderBinding {
            key: self.key,
            value,
        };
        Element::new(ElementKind::Provider(binding), Props::new()).children(children)
    }
}

impl<T> fmt::Debug for Context<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context").field("key", &self.key).finish()
    }
}

/// The value a Provider element binds.
#[derive(Clone)]
pub struct ProviderBinding {
    key: ContextKey,
    value: ErasedValue,
}

impl ProviderBinding {
    pub fn key(&self) -> ContextKey {
        self.key
    }
}

impl fmt::Debug for ProviderBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderBinding")
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}

/// Immutable mapping from context to its value within one render pass.
///
/// Binding a value copies the map; the original stays valid for siblings.
#[derive(Clone, Default)]
pub struct ContextSnapshot {
    values: Arc<HashMap<ContextKey, ErasedValue>>,
}

impl ContextSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// A new snapshot with the provider's value bound.
    pub fn bind(&self, binding: &ProviderBinding) -> Self {
        let mut values = (*self.values).clone();
        values.insert(binding.key, binding.value.clone());
        Self {
            values: Arc::new(values),
        }
    }

    /// The value bound in this pass, or the context's default.
    pub fn read<T: Send + Sync + 'static>(&self, context: &Context<T>) -> Arc<T> {
        self.values
            .get(&context.key)
            .and_then(|value| value.clone().downcast::<T>().ok())
            .unwrap_or_else(|| context.default_value())
    }

    pub fn is_bound<T>(&self, context: &Context<T>) -> bool {
        self.values.contains_key(&context.key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl fmt::Debug for ContextSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContextSnapshot")
            .field("bound", &self.values.len())
            .finish()
    }
}

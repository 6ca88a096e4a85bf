//! Tree evaluator.
//!
//! ```text
//! Node ──► evaluate ──► serde_json::Value
//!            │
//!            ├─ List        → synthetic Fragment
//!            ├─ primitive   → as-is
//!            ├─ Intrinsic   → shaped object (see `shape`)
//!            ├─ Component   → invoke(props, scope) → evaluate(result)
//!            ├─ Fragment    → children, sequentially
//!            └─ Provider    → children under scope.bind(value)
//! ```
//!
//! Each top-level [`Renderer::render`] call is one render pass with its own
//! [`RenderPass`] token and context snapshot.

mod error;
mod evaluate;
mod shape;

pub use error::RenderError;

use std::fmt;
use std::sync::Arc;

use serde_json::Value;
use tracing::Instrument;
use uuid::Uuid;

use crate::context::{Context, ContextSnapshot, ProviderBinding};
use crate::element::Node;
use crate::identity::IdentityTable;

/// Token identifying one render pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RenderPass(Uuid);

impl RenderPass {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn id(&self) -> Uuid {
        self.0
    }
}

impl Default for RenderPass {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RenderPass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Entry point for rendering element trees.
#[derive(Debug, Clone, Default)]
pub struct Renderer {
    identities: IdentityTable,
}

impl Renderer {
    pub fn new(identities: IdentityTable) -> Self {
        Self { identities }
    }

    pub fn identities(&self) -> &IdentityTable {
        &self.identities
    }

    /// Render a tree in a fresh pass with no contexts bound.
    pub async fn render(&self, node: impl Into<Node>) -> Result<Value, RenderError> {
        self.render_with(ContextSnapshot::new(), node).await
    }

    /// Render a tree in a fresh pass starting from `snapshot`.
    pub async fn render_with(
        &self,
        snapshot: ContextSnapshot,
        node: impl Into<Node>,
    ) -> Result<Value, RenderError> {
        let pass = RenderPass::new();
        let scope = Scope {
            pass,
            snapshot,
            renderer: self.clone(),
        };
        let span = tracing::debug_span!("render", pass = %pass);
        let result = evaluate::evaluate(node.into(), scope).instrument(span).await;
        if let Err(err) = &result {
            tracing::debug!(pass = %pass, error = %err, "Render pass failed");
        }
        result
    }
}

/// What a component sees of the render pass invoking it.
#[derive(Debug, Clone)]
pub struct Scope {
    pass: RenderPass,
    snapshot: ContextSnapshot,
    renderer: Renderer,
}

impl Scope {
    pub fn pass(&self) -> RenderPass {
        self.pass
    }

    /// Current value of `context` in this pass.
    pub fn read<T: Send + Sync + 'static>(&self, context: &Context<T>) -> Arc<T> {
        self.snapshot.read(context)
    }

    pub fn snapshot(&self) -> &ContextSnapshot {
        &self.snapshot
    }

    pub fn identities(&self) -> &IdentityTable {
        &self.renderer.identities
    }

    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    /// Render a detached tree in a new pass that inherits this scope's
    /// contexts. Surfaces use this to serialize their children.
    pub async fn render_nested(&self, node: impl Into<Node>) -> Result<Value, RenderError> {
        self.renderer
            .render_with(self.snapshot.clone(), node)
            .await
    }

    pub(crate) fn bind(&self, binding: &ProviderBinding) -> Scope {
        Scope {
            pass: self.pass,
            snapshot: self.snapshot.bind(binding),
            renderer: self.renderer.clone(),
        }
    }
}

//! Recursive walker over nodes, components, fragments and providers.

use futures_core::future::BoxFuture;
use serde_json::Value;

use crate::element::{Element, ElementKind, Node};
use crate::render::{shape, RenderError, Scope};

/// Evaluate any node. Every call returns a boxed task so the caller's
/// executor decides how passes interleave.
pub(crate) fn evaluate(node: Node, scope: Scope) -> BoxFuture<'static, Result<Value, RenderError>> {
    Box::pin(async move {
        match node {
            Node::List(items) => evaluate_fragment(Node::List(items), scope).await,
            Node::Empty => Ok(Value::Null),
            Node::Bool(flag) => Ok(Value::Bool(flag)),
            Node::Text(text) => Ok(Value::String(text)),
            Node::Number(number) => Ok(Value::Number(number)),
            Node::Element(element) => evaluate_element(element, scope).await,
        }
    })
}

async fn evaluate_element(element: Element, scope: Scope) -> Result<Value, RenderError> {
    let (kind, props) = element.into_parts();
    match kind {
        ElementKind::Intrinsic(kind) => shape::shape_intrinsic(kind, props, scope).await,
        ElementKind::Component(component) => {
            tracing::trace!(component = component.name(), "Invoking component");
            let child = component.invoke(props, scope.clone()).await?;
            evaluate(child, scope).await
        }
        ElementKind::Fragment => evaluate_fragment(props.children(), scope).await,
        ElementKind::Provider(binding) => {
            let inner = scope.bind(&binding);
            evaluate(props.children(), inner).await
        }
    }
}

/// Children are evaluated one after another, never concurrently.
async fn evaluate_fragment(children: Node, scope: Scope) -> Result<Value, RenderError> {
    let children = match children {
        Node::List(items) => items,
        other => vec![other],
    };
    let mut rendered = Vec::with_capacity(children.len());
    for child in children.into_iter().filter(|child| !child.renders_nothing()) {
        rendered.push(evaluate(child, scope.clone()).await?);
    }
    Ok(Value::Array(rendered))
}

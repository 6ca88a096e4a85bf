//! Prop shaping for intrinsic elements.
//!
//! Child-bearing props are rendered recursively; everything else passes
//! through. The conventional `children` prop lands in the field named by
//! [`Intrinsic::children_field`].

use serde_json::{Map, Value};

use crate::element::{
    is_child_prop, is_multi_child_prop, number_text, Element, Intrinsic, Node, Prop, Props,
};
use crate::render::evaluate::evaluate;
use crate::render::{RenderError, Scope};

const IDENTITY_PROPS: [&str; 2] = ["action_id", "callback_id"];

pub(crate) async fn shape_intrinsic(
    kind: Intrinsic,
    props: Props,
    scope: Scope,
) -> Result<Value, RenderError> {
    if kind == Intrinsic::Raw {
        return Ok(props
            .get("value")
            .and_then(Prop::to_json)
            .unwrap_or(Value::Null));
    }

    let mut shaped = Map::new();
    if !kind.is_typeless() {
        shaped.insert("type".to_string(), Value::String(kind.as_str().to_string()));
    }
    for (key, prop) in props {
        if let Some((name, value)) = shape_prop(kind, key, prop, &scope).await? {
            shaped.insert(name, value);
        }
    }
    Ok(Value::Object(shaped))
}

async fn shape_prop(
    kind: Intrinsic,
    key: String,
    prop: Prop,
    scope: &Scope,
) -> Result<Option<(String, Value)>, RenderError> {
    let node = match prop {
        Prop::Component(component) if IDENTITY_PROPS.contains(&key.as_str()) => {
            let id = scope.identities().id_of(&component).ok_or_else(|| {
                RenderError::MissingIdentity {
                    component: component.name().to_string(),
                    prop: key.clone(),
                }
            })?;
            return Ok(Some((key, Value::String(id))));
        }
        Prop::Component(component) => {
            return Err(RenderError::UnexpectedComponent {
                kind,
                prop: key,
                component: component.name().to_string(),
            });
        }
        Prop::Opaque(_) => return Err(RenderError::UnexpectedOpaque { kind, prop: key }),
        Prop::Json(value) => return Ok(Some((destination(kind, key)?, value))),
        Prop::Node(Node::Empty) => return Ok(None),
        Prop::Node(node) => node,
    };

    if !is_child_prop(&key) {
        let value = evaluate_verbatim(node, scope).await?;
        return Ok(Some((key, value)));
    }

    let name = destination(kind, key)?;

    if kind.is_text() {
        let mut text = String::new();
        fold_text(kind, node, &mut text)?;
        return Ok(Some((name, Value::String(text))));
    }

    let children = match node {
        Node::List(items) => Node::List(
            items
                .into_iter()
                .filter(|item| !item.renders_nothing())
                .collect(),
        ),
        other => other,
    };

    let has_text = match &children {
        Node::List(items) => items.iter().any(Node::is_textual),
        other => other.is_textual(),
    };

    let child = if has_text {
        Element::intrinsic(Intrinsic::PlainText)
            .prop("text", children)
            .into()
    } else if is_multi_child_prop(&name) {
        Element::fragment(children).into()
    } else {
        children
    };

    let rendered = evaluate(child, scope.clone()).await?;
    Ok(Some((name, flatten_once(rendered))))
}

/// Output field for a prop: `children` lands where the kind keeps them.
fn destination(kind: Intrinsic, key: String) -> Result<String, RenderError> {
    if key != "children" {
        return Ok(key);
    }
    kind.children_field()
        .map(str::to_string)
        .ok_or(RenderError::CannotHaveChildren { kind })
}

/// Evaluate a plain prop. Lists keep every item, markers included.
async fn evaluate_verbatim(node: Node, scope: &Scope) -> Result<Value, RenderError> {
    match node {
        Node::List(items) => {
            let mut rendered = Vec::with_capacity(items.len());
            for item in items {
                rendered.push(evaluate(item, scope.clone()).await?);
            }
            Ok(Value::Array(rendered))
        }
        other => evaluate(other, scope.clone()).await,
    }
}

/// Concatenate strings and numbers; markers render nothing.
fn fold_text(kind: Intrinsic, node: Node, out: &mut String) -> Result<(), RenderError> {
    match node {
        Node::Text(text) => out.push_str(&text),
        Node::Number(number) => out.push_str(&number_text(&number)),
        Node::Empty | Node::Bool(_) => {}
        Node::List(items) => {
            for item in items {
                fold_text(kind, item, out)?;
            }
        }
        Node::Element(_) => return Err(RenderError::ElementInText { kind }),
    }
    Ok(())
}

/// Fragments nested in fragments come back as nested arrays.
fn flatten_once(value: Value) -> Value {
    match value {
        Value::Array(items) => Value::Array(
            items
                .into_iter()
                .flat_map(|item| match item {
                    Value::Array(inner) => inner,
                    other => vec![other],
                })
                .collect(),
        ),
        other => other,
    }
}

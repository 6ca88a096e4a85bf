use std::sync::LazyLock;

use serde_json::{Map, Value};

use crate::element::{Component, Element, Node, Props};
use crate::event::EventKind;
use crate::hooks::{use_args, ARGS};
use crate::render::{RenderError, Scope};
use crate::surface::SurfaceError;

/// Answers an options request with `{options: [...]}`.
pub static OPTIONS: LazyLock<Component> = LazyLock::new(|| {
    Component::new("Options", |props, scope| {
        answer(props, scope, "Options", "options")
    })
});

/// Answers an options request with `{option_groups: [...]}`.
pub static OPTION_GROUPS: LazyLock<Component> = LazyLock::new(|| {
    Component::new("OptionGroups", |props, scope| {
        answer(props, scope, "OptionGroups", "option_groups")
    })
});

async fn answer(
    props: Props,
    scope: Scope,
    surface: &'static str,
    field: &'static str,
) -> Result<Node, RenderError> {
    let args = use_args(&scope)?;
    if *args.kind() != EventKind::BlockSuggestion {
        return Err(SurfaceError::NotAnOptionsEvent { surface }.into());
    }

    let rendered = scope
        .render_nested(ARGS.provide(Some(args.clone()), Element::fragment(props.children())))
        .await?;
    let mut payload = Map::new();
    payload.insert(field.to_string(), rendered);
    args.ack(Some(Value::Object(payload))).await?;
    Ok(Node::Empty)
}

use std::sync::LazyLock;

use crate::element::{Component, Element, Intrinsic, Node, Props};
use crate::hooks::ARGS;
use crate::render::{RenderError, Scope};
use crate::surface::{resolve_client, SurfaceError};

/// Publishes a home tab.
///
/// Props: `user_id?`, `token?`, `external_id?`, `private_metadata?` (any JSON,
/// stored serialized), children as blocks.
pub static HOME: LazyLock<Component> = LazyLock::new(|| Component::new("Home", render_home));

async fn render_home(props: Props, scope: Scope) -> Result<Node, RenderError> {
    let (client, args) = resolve_client(&scope, &props)?;

    let user_id = props
        .text("user_id")
        .map(str::to_string)
        .or_else(|| args.as_ref().and_then(|args| args.user_id()).map(str::to_string))
        .ok_or(SurfaceError::MissingUser)?;

    let mut view = Element::intrinsic(Intrinsic::Home).children(props.children());
    if let Some(external_id) = props.text("external_id") {
        view = view.prop("external_id", external_id);
    }
    if let Some(metadata) = props.json("private_metadata") {
        view = view.prop("private_metadata", metadata.to_string());
    }

    let view = scope.render_nested(ARGS.provide(args, view)).await?;
    tracing::debug!(user_id = %user_id, "Publishing home view");
    client.publish_view(&user_id, view).await?;
    Ok(Node::Empty)
}

use std::sync::LazyLock;

use serde::Deserialize;
use serde_json::Value;

use crate::element::{Component, Element, Intrinsic, Node, Props};
use crate::event::EventKind;
use crate::hooks::{merge_metadata, use_args, ARGS};
use crate::render::{RenderError, Scope};
use crate::surface::SurfaceError;

const PASSTHROUGH_PROPS: [&str; 7] = [
    "title",
    "close",
    "submit",
    "callback_id",
    "notify_on_close",
    "clear_on_close",
    "external_id",
];

/// Opens a modal, or updates it when a control inside an open modal fired.
///
/// Props: `title`, `close?`, `submit?`, `callback_id?`, `notify_on_close?`,
/// `clear_on_close?`, `external_id?`, `private_metadata?`, children as blocks.
/// The stored metadata gains `"opened": true`, which is how the next block
/// action from this view knows to update instead of stacking a new modal.
pub static MODAL: LazyLock<Component> = LazyLock::new(|| Component::new("Modal", render_modal));

#[derive(Debug, Default, Deserialize)]
struct OpenedMarker {
    #[serde(default)]
    opened: bool,
}

async fn render_modal(props: Props, scope: Scope) -> Result<Node, RenderError> {
    let args = use_args(&scope)?;
    let trigger_id = args
        .trigger_id()
        .ok_or(SurfaceError::MissingTrigger)?
        .to_string();
    if !props.contains("title") {
        return Err(RenderError::MissingProp {
            component: "Modal".to_string(),
            prop: "title".to_string(),
        });
    }

    let mut view = Element::intrinsic(Intrinsic::Modal).children(props.children());
    for key in PASSTHROUGH_PROPS {
        if let Some(prop) = props.get(key) {
            view = view.prop(key, prop.clone());
        }
    }
    let metadata = merge_metadata(props.json("private_metadata"), ("opened", Value::Bool(true)));
    view = view.prop("private_metadata", metadata.to_string());

    let view = scope
        .render_nested(ARGS.provide(Some(args.clone()), view))
        .await?;

    let already_opened = *args.kind() == EventKind::BlockAction
        && args
            .private_metadata()
            .and_then(|raw| serde_json::from_str::<OpenedMarker>(raw).ok())
            .is_some_and(|marker| marker.opened);

    if !already_opened {
        tracing::debug!("Opening modal");
        args.client().open_view(&trigger_id, view).await?;
        return Ok(Node::Empty);
    }

    let current = args.view();
    if current.and_then(|view| view.get("type")).and_then(Value::as_str) != Some("modal") {
        return Err(SurfaceError::NotAModal.into());
    }
    let view_id = current
        .and_then(|view| view.get("id"))
        .and_then(Value::as_str)
        .ok_or(SurfaceError::MissingViewId)?;
    tracing::debug!(view_id = %view_id, "Updating modal");
    args.client().update_view(view_id, view).await?;
    Ok(Node::Empty)
}

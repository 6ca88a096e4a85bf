mod common;

use reslack::blocks::{actions, button, divider, section};
use reslack::element::{Component, Element, Intrinsic, Node, Prop};
use reslack::identity::IdentityTable;
use reslack::render::{RenderError, Renderer};
use serde_json::json;

/// Nested children lists evaluate like their flattened form.
#[tokio::test]
async fn test_text_fold_flattens_nested_children() {
    let renderer = Renderer::default();
    let text = Element::intrinsic(Intrinsic::PlainText).children(Node::list([
        Node::list([Node::from("a"), Node::Empty]),
        Node::list([Node::from("b")]),
    ]));

    let rendered = renderer.render(text).await.unwrap();
    assert_eq!(rendered, json!({"type": "plain_text", "text": "ab"}));
}

/// Markers interleaved with blocks render the same as the blocks alone.
#[tokio::test]
async fn test_markers_are_filtered_from_block_lists() {
    let renderer = Renderer::default();
    let with_markers = Element::intrinsic(Intrinsic::Modal)
        .prop("title", "Todos")
        .children(Node::list([
            Node::from(false),
            divider().into(),
            Node::Empty,
            Node::from(true),
            section().child("Hello").into(),
        ]));
    let without = Element::intrinsic(Intrinsic::Modal)
        .prop("title", "Todos")
        .children(vec![divider(), section().child("Hello")]);

    let a = renderer.render(with_markers).await.unwrap();
    let b = renderer.render(without).await.unwrap();
    assert_eq!(a, b);
    assert_eq!(
        a,
        json!({
            "type": "modal",
            "title": {"type": "plain_text", "text": "Todos"},
            "blocks": [
                {"type": "divider"},
                {"type": "section", "text": {"type": "plain_text", "text": "Hello"}},
            ],
        })
    );
}

/// Option, option group and confirm are emitted without a type tag.
#[tokio::test]
async fn test_typeless_leaves_omit_type() {
    let renderer = Renderer::default();
    let option = Element::intrinsic(Intrinsic::Option)
        .prop("value", "a")
        .child("A");
    let rendered = renderer.render(option).await.unwrap();
    assert!(rendered.get("type").is_none());
    assert_eq!(rendered["text"], json!({"type": "plain_text", "text": "A"}));

    let button = Element::intrinsic(Intrinsic::Button)
        .action_id("go")
        .child("Go");
    let rendered = renderer.render(button).await.unwrap();
    assert_eq!(rendered["type"], json!("button"));
    assert_eq!(rendered["text"], json!({"type": "plain_text", "text": "Go"}));
}

/// A raw element evaluates to exactly its value.
#[tokio::test]
async fn test_raw_escape_is_verbatim() {
    let renderer = Renderer::default();
    let value = json!({"type": "rich_text", "elements": [{"children": "untouched"}]});
    let rendered = renderer.render(Element::raw(value.clone())).await.unwrap();
    assert_eq!(rendered, value);
}

/// Fragments inside multi-child props are spliced one level.
#[tokio::test]
async fn test_nested_fragments_are_spliced() {
    let renderer = Renderer::default();
    let pair = Component::new("Pair", |_, _| async {
        Ok(Node::list([divider(), divider()]))
    });
    let home = Element::intrinsic(Intrinsic::Home).children(vec![
        Node::from(section().child("top")),
        Node::from(Element::component(&pair)),
        Node::from(Element::fragment(vec![divider()])),
    ]);

    let rendered = renderer.render(home).await.unwrap();
    let blocks = rendered["blocks"].as_array().unwrap();
    assert_eq!(blocks.len(), 4);
    assert!(blocks[1..].iter().all(|block| block == &json!({"type": "divider"})));
}

/// Registered components in action_id / callback_id become their ids.
#[tokio::test]
async fn test_identity_props_resolve_to_component_ids() {
    let identities = IdentityTable::new();
    let add = common::noop("AddTodo");
    identities.assign("todos", &add);
    let renderer = Renderer::new(identities);

    let block = actions().child(button(&add).child("Add"));
    let rendered = renderer.render(block).await.unwrap();
    assert_eq!(
        rendered,
        json!({
            "type": "actions",
            "elements": [{
                "type": "button",
                "action_id": "todos/AddTodo",
                "text": {"type": "plain_text", "text": "Add"},
            }],
        })
    );
}

/// An unregistered component cannot be used as an action id.
#[tokio::test]
async fn test_unregistered_component_fails_render() {
    let renderer = Renderer::default();
    let loose = common::noop("Loose");
    let err = renderer.render(button(&loose)).await.unwrap_err();
    assert!(matches!(
        err,
        RenderError::MissingIdentity { component, prop } if component == "Loose" && prop == "action_id"
    ));
}

/// Kinds without a children destination reject children.
#[tokio::test]
async fn test_divider_cannot_have_children() {
    let renderer = Renderer::default();
    let err = renderer.render(divider().child("nope")).await.unwrap_err();
    assert!(matches!(err, RenderError::CannotHaveChildren { kind: Intrinsic::Divider }));
}

/// JSON children land in the kind's children field, or are rejected.
#[tokio::test]
async fn test_json_children_follow_children_routing() {
    let renderer = Renderer::default();
    let row = Element::intrinsic(Intrinsic::Actions)
        .prop("children", json!([{"type": "button", "text": "Go"}]));
    assert_eq!(
        renderer.render(row).await.unwrap(),
        json!({"type": "actions", "elements": [{"type": "button", "text": "Go"}]})
    );

    let err = renderer
        .render(divider().prop("children", json!(["nope"])))
        .await
        .unwrap_err();
    assert!(matches!(err, RenderError::CannotHaveChildren { kind: Intrinsic::Divider }));
}

/// Lists in ordinary props keep their markers.
#[tokio::test]
async fn test_plain_list_props_pass_markers_through() {
    let renderer = Renderer::default();
    let block = section()
        .child("Flags")
        .prop("flags", Node::list([Node::from(true), Node::Empty, Node::from(false), Node::from("x")]));
    let rendered = renderer.render(block).await.unwrap();
    assert_eq!(rendered["flags"], json!([true, null, false, "x"]));
}

/// Whole floats read like integers in text.
#[tokio::test]
async fn test_text_prints_whole_floats_plainly() {
    let renderer = Renderer::default();
    let text = Element::intrinsic(Intrinsic::Mrkdwn)
        .children(Node::list([Node::from(2.0), Node::from(" of "), Node::from(3)]));
    assert_eq!(
        renderer.render(text).await.unwrap(),
        json!({"type": "mrkdwn", "text": "2 of 3"})
    );
}

/// Component failures reach the caller unchanged.
#[tokio::test]
async fn test_component_failure_propagates() {
    let renderer = Renderer::default();
    let broken = Component::new("Broken", |_, _| async {
        Err::<Node, _>(anyhow::anyhow!("backend down").into())
    });
    let tree = Element::intrinsic(Intrinsic::Modal)
        .prop("title", "x")
        .children(vec![Element::component(&broken)]);
    let err = renderer.render(tree).await.unwrap_err();
    assert_eq!(err.to_string(), "backend down");
}

/// Component props reach the component; JSON props pass through shaping.
#[tokio::test]
async fn test_props_flow_into_components() {
    let renderer = Renderer::default();
    let greeting = Component::new("Greeting", |props, _| async move {
        let name = props.text("name").unwrap_or("stranger").to_string();
        Ok(section()
            .child(format!("Hello, {name}"))
            .prop("fields", Prop::Json(json!([{"type": "mrkdwn", "text": "*x*"}])))
            .into())
    });
    let rendered = renderer
        .render(Element::component(&greeting).prop("name", "Ada"))
        .await
        .unwrap();
    assert_eq!(rendered["text"]["text"], json!("Hello, Ada"));
    assert_eq!(rendered["fields"], json!([{"type": "mrkdwn", "text": "*x*"}]));
}

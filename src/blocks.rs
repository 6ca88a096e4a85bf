//! Shorthand constructors for intrinsic elements.
//!
//! ```ignore
//! use reslack::blocks::*;
//!
//! section().child("Pick a city").prop("accessory", button(&PICK).child("Pick"))
//! ```

use crate::element::{Element, Intrinsic, Node, Prop};

pub fn section() -> Element {
    Element::intrinsic(Intrinsic::Section)
}

pub fn header(text: impl Into<Node>) -> Element {
    Element::intrinsic(Intrinsic::Header).children(text)
}

pub fn divider() -> Element {
    Element::intrinsic(Intrinsic::Divider)
}

pub fn actions() -> Element {
    Element::intrinsic(Intrinsic::Actions)
}

pub fn context() -> Element {
    Element::intrinsic(Intrinsic::Context)
}

/// An input block wrapping one control.
pub fn input(label: impl Into<Node>, element: Element) -> Element {
    Element::intrinsic(Intrinsic::Input)
        .prop("label", Prop::Node(label.into()))
        .children(element)
}

pub fn plain_text(text: impl Into<Node>) -> Element {
    Element::intrinsic(Intrinsic::PlainText).children(text)
}

pub fn mrkdwn(text: impl Into<Node>) -> Element {
    Element::intrinsic(Intrinsic::Mrkdwn).children(text)
}

/// A button; `action` is a registered component or a literal action id.
pub fn button(action: impl Into<Prop>) -> Element {
    Element::intrinsic(Intrinsic::Button).action_id(action)
}

pub fn option(text: impl Into<Node>, value: impl Into<String>) -> Element {
    Element::intrinsic(Intrinsic::Option)
        .prop("value", value.into())
        .children(text)
}

pub fn option_group(label: impl Into<Node>) -> Element {
    Element::intrinsic(Intrinsic::OptionGroup).prop("label", Prop::Node(label.into()))
}

pub fn confirm() -> Element {
    Element::intrinsic(Intrinsic::Confirm)
}

pub fn static_select(action: impl Into<Prop>) -> Element {
    Element::intrinsic(Intrinsic::StaticSelect).action_id(action)
}

pub fn external_select(action: impl Into<Prop>) -> Element {
    Element::intrinsic(Intrinsic::ExternalSelect).action_id(action)
}

pub fn plain_text_input(action: impl Into<Prop>) -> Element {
    Element::intrinsic(Intrinsic::PlainTextInput).action_id(action)
}

pub fn modal() -> Element {
    Element::intrinsic(Intrinsic::Modal)
}

pub fn home() -> Element {
    Element::intrinsic(Intrinsic::Home)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::Renderer;
    use serde_json::json;

    #[tokio::test]
    async fn helpers_shape_like_literals() {
        let renderer = Renderer::default();
        let block = input("Name", plain_text_input("name-input"));
        assert_eq!(
            renderer.render(block).await.unwrap(),
            json!({
                "type": "input",
                "label": {"type": "plain_text", "text": "Name"},
                "element": {"type": "plain_text_input", "action_id": "name-input"},
            })
        );

        let choice = option("Paris", "paris");
        assert_eq!(
            renderer.render(choice).await.unwrap(),
            json!({"value": "paris", "text": {"type": "plain_text", "text": "Paris"}})
        );
    }
}

use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, LazyLock};

use serde_json::{json, Map, Value};

use crate::element::{number_text, Component, Element, Node, Prop, Props};
use crate::event::ClientError;
use crate::hooks::ARGS;
use crate::render::{RenderError, Scope};
use crate::surface::{resolve_client, SurfaceError};

/// Posts, updates or responds with a message.
///
/// Props: `token?`, `channel?`, `message_ts?`, `response_type?`
/// (see [`ResponseType`]), `on_success?` ([`OnSuccess`]), `on_fail?`
/// ([`OnFail`]), children. Text children become `{text}`, anything else is
/// rendered into `{blocks}`.
///
/// Without a channel the message goes through the event's response URL.
/// With `message_ts` the existing message is updated.
pub static MESSAGE: LazyLock<Component> =
    LazyLock::new(|| Component::new("Message", render_message));

/// How a response-URL reply treats the original message.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ResponseType {
    InChannel,
    Ephemeral,
    #[default]
    Replace,
    Delete,
}

impl ResponseType {
    pub fn as_str(self) -> &'static str {
        match self {
            ResponseType::InChannel => "in_channel",
            ResponseType::Ephemeral => "ephemeral",
            ResponseType::Replace => "replace",
            ResponseType::Delete => "delete",
        }
    }

    fn response_fields(self) -> Map<String, Value> {
        let fields = match self {
            ResponseType::Delete => json!({"delete_original": true}),
            ResponseType::Replace => json!({"replace_original": true}),
            other => json!({"response_type": other.as_str(), "replace_original": false}),
        };
        match fields {
            Value::Object(map) => map,
            _ => Map::new(),
        }
    }
}

impl fmt::Display for ResponseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResponseType {
    type Err = SurfaceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "in_channel" => Ok(ResponseType::InChannel),
            "ephemeral" => Ok(ResponseType::Ephemeral),
            "replace" => Ok(ResponseType::Replace),
            "delete" => Ok(ResponseType::Delete),
            other => Err(SurfaceError::InvalidResponseType(other.to_string())),
        }
    }
}

/// Called with the platform response after the message went out.
#[derive(Clone)]
pub struct OnSuccess(Arc<dyn Fn(Value) + Send + Sync>);

impl OnSuccess {
    pub fn new(callback: impl Fn(Value) + Send + Sync + 'static) -> Self {
        Self(Arc::new(callback))
    }
}

/// Receives client failures instead of letting them fail the render.
#[derive(Clone)]
pub struct OnFail(Arc<dyn Fn(ClientError) + Send + Sync>);

impl OnFail {
    pub fn new(callback: impl Fn(ClientError) + Send + Sync + 'static) -> Self {
        Self(Arc::new(callback))
    }
}

impl From<OnSuccess> for Prop {
    fn from(callback: OnSuccess) -> Self {
        Prop::opaque(callback)
    }
}

impl From<OnFail> for Prop {
    fn from(callback: OnFail) -> Self {
        Prop::opaque(callback)
    }
}

async fn render_message(props: Props, scope: Scope) -> Result<Node, RenderError> {
    let (client, args) = resolve_client(&scope, &props)?;
    let channel = props.text("channel").map(str::to_string);
    let response_type = match props.text("response_type") {
        Some(value) => value.parse::<ResponseType>()?,
        None => ResponseType::default(),
    };

    let children = props.children();
    let message = if children.renders_nothing()
        || (channel.is_none() && response_type == ResponseType::Delete)
    {
        Map::new()
    } else if let Some(text) = text_content(&children) {
        let mut message = Map::new();
        message.insert("text".to_string(), Value::String(text));
        message
    } else {
        let rendered = scope
            .render_nested(ARGS.provide(args.clone(), Element::fragment(children)))
            .await?;
        let mut message = Map::new();
        message.insert("blocks".to_string(), Value::Array(blocks_of(rendered)));
        message
    };

    let result = match (channel, props.text("message_ts")) {
        (None, _) => {
            let responder = args
                .as_ref()
                .and_then(|args| args.responder())
                .ok_or(SurfaceError::MissingChannel)?;
            let mut payload = response_type.response_fields();
            payload.extend(message);
            responder.respond(Value::Object(payload)).await
        }
        (Some(channel), Some(ts)) => {
            client
                .update_message(&channel, ts, Value::Object(message))
                .await
        }
        (Some(channel), None) => client.post_message(&channel, Value::Object(message)).await,
    };

    match result {
        Ok(response) => {
            if let Some(on_success) = props.opaque::<OnSuccess>("on_success") {
                (on_success.0)(response);
            }
        }
        Err(err) => match props.opaque::<OnFail>("on_fail") {
            Some(on_fail) => (on_fail.0)(err),
            None => return Err(err.into()),
        },
    }
    Ok(Node::Empty)
}

/// Text children (a string, or a list holding any) joined into one string.
fn text_content(children: &Node) -> Option<String> {
    match children {
        Node::Text(text) => Some(text.clone()),
        Node::List(items) if items.iter().any(|item| matches!(item, Node::Text(_))) => {
            let mut text = String::new();
            for item in items {
                match item {
                    Node::Text(part) => text.push_str(part),
                    Node::Number(number) => text.push_str(&number_text(number)),
                    _ => {}
                }
            }
            Some(text)
        }
        _ => None,
    }
}

/// Blocks from a rendered fragment, without the markers components return.
fn blocks_of(rendered: Value) -> Vec<Value> {
    let items = match rendered {
        Value::Array(items) => items,
        other => vec![other],
    };
    items
        .into_iter()
        .filter(|item| !item.is_null() && !item.is_boolean())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_fields_by_type() {
        assert_eq!(
            Value::Object(ResponseType::Replace.response_fields()),
            json!({"replace_original": true})
        );
        assert_eq!(
            Value::Object(ResponseType::Ephemeral.response_fields()),
            json!({"response_type": "ephemeral", "replace_original": false})
        );
        assert!(matches!(
            "loud".parse::<ResponseType>(),
            Err(SurfaceError::InvalidResponseType(value)) if value == "loud"
        ));
    }

    #[test]
    fn text_children_are_joined() {
        let children = Node::list([Node::from("Added "), Node::from(3), Node::from(" items")]);
        assert_eq!(text_content(&children).as_deref(), Some("Added 3 items"));
        assert_eq!(text_content(&Node::from(3)), None);
    }

    #[test]
    fn blocks_drop_markers() {
        let rendered = json!([null, {"type": "divider"}, false]);
        assert_eq!(blocks_of(rendered), vec![json!({"type": "divider"})]);
    }
}

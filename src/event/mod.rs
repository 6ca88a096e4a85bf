//! Inbound platform events.
//!
//! An [`EventArgs`] wraps the raw JSON body of one event together with the
//! client capabilities needed to answer it. The body is kept as JSON: the
//! accessors below only reach into the few fields the core needs.

mod client;

pub use client::{Ack, ClientError, ClientFactory, PlatformClient, Respond};

use std::fmt;
use std::sync::Arc;

use serde_json::{Map, Value};
use thiserror::Error;

/// Errors raised while interpreting an event body.
#[derive(Debug, Error)]
pub enum EventError {
    #[error("unrecognized event body (type: {})", .kind.as_deref().unwrap_or("<missing>"))]
    Unrecognized { kind: Option<String> },

    #[error("event body is missing '{field}'")]
    MissingField { field: &'static str },
}

/// Shape of an inbound event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventKind {
    BlockAction,
    /// Options request for an external select.
    BlockSuggestion,
    ViewSubmission,
    ViewClosed,
    Command,
    Shortcut,
    Message,
    /// Any other Events API callback, by its `event.type`.
    Event(String),
}

impl EventKind {
    /// Discriminate a raw body.
    pub fn classify(body: &Value) -> Result<Self, EventError> {
        if body.get("command").and_then(Value::as_str).is_some() {
            return Ok(EventKind::Command);
        }
        let kind = body.get("type").and_then(Value::as_str);
        match kind {
            Some("block_actions") => Ok(EventKind::BlockAction),
            Some("block_suggestion") => Ok(EventKind::BlockSuggestion),
            Some("view_submission") => Ok(EventKind::ViewSubmission),
            Some("view_closed") => Ok(EventKind::ViewClosed),
            Some("shortcut") | Some("message_action") => Ok(EventKind::Shortcut),
            Some("event_callback") => {
                let event_type = body
                    .pointer("/event/type")
                    .and_then(Value::as_str)
                    .ok_or(EventError::MissingField {
                        field: "event.type",
                    })?;
                if event_type == "message" {
                    Ok(EventKind::Message)
                } else {
                    Ok(EventKind::Event(event_type.to_string()))
                }
            }
            other => Err(EventError::Unrecognized {
                kind: other.map(String::from),
            }),
        }
    }

    /// View submissions and closures.
    pub fn is_view(&self) -> bool {
        matches!(self, EventKind::ViewSubmission | EventKind::ViewClosed)
    }
}

/// One inbound event plus the capabilities to answer it.
#[derive(Clone)]
pub struct EventArgs {
    kind: EventKind,
    body: Value,
    client: Arc<dyn PlatformClient>,
    ack: Option<Arc<dyn Ack>>,
    respond: Option<Arc<dyn Respond>>,
}

impl EventArgs {
    /// Classify `body` and wrap it.
    pub fn new(body: Value, client: Arc<dyn PlatformClient>) -> Result<Self, EventError> {
        let kind = EventKind::classify(&body)?;
        Ok(Self::with_kind(kind, body, client))
    }

    pub fn with_kind(kind: EventKind, body: Value, client: Arc<dyn PlatformClient>) -> Self {
        Self {
            kind,
            body,
            client,
            ack: None,
            respond: None,
        }
    }

    pub fn with_ack(mut self, ack: Arc<dyn Ack>) -> Self {
        self.ack = Some(ack);
        self
    }

    pub fn with_responder(mut self, respond: Arc<dyn Respond>) -> Self {
        self.respond = Some(respond);
        self
    }

    pub fn kind(&self) -> &EventKind {
        &self.kind
    }

    pub fn body(&self) -> &Value {
        &self.body
    }

    pub fn client(&self) -> &Arc<dyn PlatformClient> {
        &self.client
    }

    pub fn responder(&self) -> Option<&Arc<dyn Respond>> {
        self.respond.as_ref()
    }

    /// Acknowledge the event. Events without an acknowledger are a no-op.
    pub async fn ack(&self, payload: Option<Value>) -> Result<(), ClientError> {
        match &self.ack {
            Some(ack) => ack.ack(payload).await,
            None => Ok(()),
        }
    }

    /// The acting user, wherever this event shape keeps it.
    pub fn user_id(&self) -> Option<&str> {
        ["/user/id", "/user_id", "/event/user", "/user"]
            .iter()
            .find_map(|pointer| self.body.pointer(pointer).and_then(Value::as_str))
    }

    pub fn trigger_id(&self) -> Option<&str> {
        self.str_at("/trigger_id")
    }

    /// The view this event originates from, if any.
    pub fn view(&self) -> Option<&Value> {
        let view = match &self.kind {
            EventKind::Event(_) => self.body.pointer("/event/view"),
            _ => self.body.get("view"),
        };
        view.filter(|view| view.is_object())
    }

    pub fn private_metadata(&self) -> Option<&str> {
        self.view()?.get("private_metadata")?.as_str()
    }

    /// The nested block → action id → control value mapping for this shape.
    pub fn state_values(&self) -> Option<&Map<String, Value>> {
        let values = match self.kind {
            EventKind::BlockAction => self
                .body
                .pointer("/view/state/values")
                .or_else(|| self.body.pointer("/state/values")),
            EventKind::BlockSuggestion | EventKind::ViewSubmission | EventKind::ViewClosed => {
                self.body.pointer("/view/state/values")
            }
            _ => None,
        };
        values.and_then(Value::as_object)
    }

    /// Action id of the control that fired this event.
    pub fn action_id(&self) -> Option<&str> {
        match self.kind {
            EventKind::BlockAction => self.str_at("/actions/0/action_id"),
            EventKind::BlockSuggestion => self.str_at("/action_id"),
            _ => None,
        }
    }

    pub fn callback_id(&self) -> Option<&str> {
        match self.kind {
            EventKind::ViewSubmission | EventKind::ViewClosed => {
                self.str_at("/view/callback_id")
            }
            EventKind::Shortcut => self.str_at("/callback_id"),
            _ => None,
        }
    }

    pub fn command(&self) -> Option<&str> {
        self.str_at("/command")
    }

    pub fn event_type(&self) -> Option<&str> {
        self.str_at("/event/type")
    }

    pub fn message_text(&self) -> Option<&str> {
        match self.kind {
            EventKind::Message => self.str_at("/event/text"),
            _ => None,
        }
    }

    /// Typed query of an options request.
    pub fn query(&self) -> Option<&str> {
        match self.kind {
            EventKind::BlockSuggestion => self.str_at("/value"),
            _ => None,
        }
    }

    fn str_at(&self, pointer: &str) -> Option<&str> {
        self.body.pointer(pointer).and_then(Value::as_str)
    }
}

impl fmt::Debug for EventArgs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventArgs")
            .field("kind", &self.kind)
            .field("body", &self.body)
            .field("ack", &self.ack.is_some())
            .field("respond", &self.respond.is_some())
            .finish_non_exhaustive()
    }
}

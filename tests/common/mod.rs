//! Shared test utilities and mock infrastructure.

#![allow(dead_code, unused_imports)]

pub mod mock_client;

use mock_client::{MockAck, MockClient, MockResponder};
use reslack::element::{Component, Node};
use reslack::event::EventArgs;
use serde_json::{json, Value};
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;

/// A component rendering nothing.
pub fn noop(name: &str) -> Component {
    Component::new(name, |_, _| async { Ok(Node::Empty) })
}

/// An event wired to fresh mocks.
pub struct TestEvent {
    pub args: EventArgs,
    pub client: Arc<MockClient>,
    pub ack: Arc<MockAck>,
    pub responder: Arc<MockResponder>,
}

pub fn event(body: Value) -> TestEvent {
    let client = MockClient::new();
    let ack = MockAck::new();
    let responder = MockResponder::new();
    let args = EventArgs::new(body, client.clone())
        .expect("test body should classify")
        .with_ack(ack.clone())
        .with_responder(responder.clone());
    TestEvent {
        args,
        client,
        ack,
        responder,
    }
}

pub fn block_action(action_id: &str, view: Option<Value>) -> Value {
    let mut body = json!({
        "type": "block_actions",
        "trigger_id": "T-1",
        "user": {"id": "U1"},
        "actions": [{"action_id": action_id, "value": "clicked"}],
    });
    if let Some(view) = view {
        body["view"] = view;
    }
    body
}

pub fn command(command: &str) -> Value {
    json!({
        "command": command,
        "text": "",
        "trigger_id": "T-1",
        "user_id": "U1",
        "channel_id": "C1",
    })
}

pub fn view_submission(callback_id: &str, values: Value) -> Value {
    json!({
        "type": "view_submission",
        "user": {"id": "U1"},
        "view": {
            "id": "V1",
            "type": "modal",
            "callback_id": callback_id,
            "private_metadata": "",
            "state": {"values": values},
        },
    })
}

pub fn block_suggestion(action_id: &str, value: &str) -> Value {
    json!({
        "type": "block_suggestion",
        "action_id": action_id,
        "value": value,
        "user": {"id": "U1"},
        "view": {"id": "V1", "type": "modal", "private_metadata": "", "state": {"values": {}}},
    })
}

/// Write `contents` to a `config.toml` inside a fresh temp dir.
pub fn temp_config(contents: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("config.toml");
    std::fs::write(&config_path, contents).expect("Failed to write config");
    (temp_dir, config_path)
}

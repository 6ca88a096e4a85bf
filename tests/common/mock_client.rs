//! Recording platform client for surface and dispatch tests.

#![allow(dead_code)]

use async_trait::async_trait;
use parking_lot::Mutex;
use reslack::event::{Ack, ClientError, PlatformClient, Respond};
use serde_json::{json, Value};
use std::sync::Arc;

/// A captured client call for assertions.
#[derive(Debug, Clone, PartialEq)]
pub struct CapturedCall {
    pub method: &'static str,
    /// Channel, user id, trigger id or view id, depending on the method.
    pub target: String,
    pub payload: Value,
}

/// Records every call and answers with `{"ok": true}` unless told to fail.
#[derive(Debug, Default)]
pub struct MockClient {
    calls: Mutex<Vec<CapturedCall>>,
    fail_with: Mutex<Option<String>>,
}

impl MockClient {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Make every following call fail with an API error.
    pub fn fail(&self, message: &str) {
        *self.fail_with.lock() = Some(message.to_string());
    }

    pub fn calls(&self) -> Vec<CapturedCall> {
        self.calls.lock().clone()
    }

    pub fn single_call(&self) -> CapturedCall {
        let calls = self.calls();
        assert_eq!(calls.len(), 1, "expected exactly one call, got {calls:?}");
        calls[0].clone()
    }

    fn record(&self, method: &'static str, target: &str, payload: Value) -> Result<Value, ClientError> {
        self.calls.lock().push(CapturedCall {
            method,
            target: target.to_string(),
            payload,
        });
        match self.fail_with.lock().clone() {
            Some(message) => Err(ClientError::Api {
                method: method.to_string(),
                message,
            }),
            None => Ok(json!({"ok": true})),
        }
    }
}

#[async_trait]
impl PlatformClient for MockClient {
    async fn post_message(&self, channel: &str, message: Value) -> Result<Value, ClientError> {
        self.record("chat.postMessage", channel, message)
    }

    async fn update_message(
        &self,
        channel: &str,
        ts: &str,
        message: Value,
    ) -> Result<Value, ClientError> {
        self.record("chat.update", &format!("{channel}@{ts}"), message)
    }

    async fn publish_view(&self, user_id: &str, view: Value) -> Result<Value, ClientError> {
        self.record("views.publish", user_id, view)
    }

    async fn open_view(&self, trigger_id: &str, view: Value) -> Result<Value, ClientError> {
        self.record("views.open", trigger_id, view)
    }

    async fn update_view(&self, view_id: &str, view: Value) -> Result<Value, ClientError> {
        self.record("views.update", view_id, view)
    }
}

/// Records acknowledgements.
#[derive(Debug, Default)]
pub struct MockAck {
    acks: Mutex<Vec<Option<Value>>>,
}

impl MockAck {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn acks(&self) -> Vec<Option<Value>> {
        self.acks.lock().clone()
    }
}

#[async_trait]
impl Ack for MockAck {
    async fn ack(&self, payload: Option<Value>) -> Result<(), ClientError> {
        self.acks.lock().push(payload);
        Ok(())
    }
}

/// Records response-URL replies.
#[derive(Debug, Default)]
pub struct MockResponder {
    replies: Mutex<Vec<Value>>,
}

impl MockResponder {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn replies(&self) -> Vec<Value> {
        self.replies.lock().clone()
    }
}

#[async_trait]
impl Respond for MockResponder {
    async fn respond(&self, message: Value) -> Result<Value, ClientError> {
        self.replies.lock().push(message);
        Ok(json!({"ok": true}))
    }
}

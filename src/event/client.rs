//! Client capabilities the core consumes from the platform SDK.
//!
//! The crate never talks to the network itself; the host application
//! implements these traits over its HTTP client of choice.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// Errors reported by client collaborators.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The platform API answered with an error
    #[error("{method} failed: {message}")]
    Api { method: String, message: String },

    /// The request never completed
    #[error("{method} transport failure: {source}")]
    Transport {
        method: String,
        #[source]
        source: anyhow::Error,
    },

    /// The event was already acknowledged or can no longer be answered
    #[error("event cannot be answered: {0}")]
    Unanswerable(String),
}

/// Outbound calls for publishing surfaces.
///
/// Every method returns the platform's JSON response on success.
#[async_trait]
pub trait PlatformClient: Send + Sync {
    async fn post_message(&self, channel: &str, message: Value) -> Result<Value, ClientError>;

    async fn update_message(
        &self,
        channel: &str,
        ts: &str,
        message: Value,
    ) -> Result<Value, ClientError>;

    /// Publish a home-tab view for a user.
    async fn publish_view(&self, user_id: &str, view: Value) -> Result<Value, ClientError>;

    /// Open a modal in response to a trigger.
    async fn open_view(&self, trigger_id: &str, view: Value) -> Result<Value, ClientError>;

    async fn update_view(&self, view_id: &str, view: Value) -> Result<Value, ClientError>;
}

/// Acknowledges an inbound event, optionally echoing a payload
/// (options/suggestion responses).
#[async_trait]
pub trait Ack: Send + Sync {
    async fn ack(&self, payload: Option<Value>) -> Result<(), ClientError>;
}

/// Replies through an event's response URL.
#[async_trait]
pub trait Respond: Send + Sync {
    async fn respond(&self, message: Value) -> Result<Value, ClientError>;
}

/// Builds a client from a bot token.
pub type ClientFactory = Arc<dyn Fn(&str) -> Arc<dyn PlatformClient> + Send + Sync>;

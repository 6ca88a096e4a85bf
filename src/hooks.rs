//! Accessors components use to reach the event being handled.
//!
//! The dispatcher binds [`ARGS`] (and [`CLIENT_FACTORY`] when the app has one)
//! around every handler invocation, so these read the values of the render
//! pass the component runs in.

use std::sync::LazyLock;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::context::Context;
use crate::event::{ClientFactory, EventArgs, EventKind};
use crate::render::{RenderError, Scope};
use crate::state::{State, StateDescriptor};

/// The event a handler was invoked for.
pub static ARGS: LazyLock<Context<Option<EventArgs>>> = LazyLock::new(|| Context::new(None));

/// Builds clients for surfaces rendered with an explicit token.
pub static CLIENT_FACTORY: LazyLock<Context<Option<ClientFactory>>> =
    LazyLock::new(|| Context::new(None));

/// The current event, if any handler bound one.
pub fn try_use_args(scope: &Scope) -> Option<EventArgs> {
    Option::clone(&scope.read(&*ARGS))
}

/// The current event.
///
/// Fails when the component is rendered outside a handler.
pub fn use_args(scope: &Scope) -> Result<EventArgs, RenderError> {
    try_use_args(scope).ok_or(RenderError::MissingContext {
        accessor: "use_args",
        provider: "an ARGS provider",
    })
}

pub fn use_client_factory(scope: &Scope) -> Option<ClientFactory> {
    Option::clone(&scope.read(&*CLIENT_FACTORY))
}

/// Decode the controls of `descriptor` from the current event's view state.
pub fn use_state(scope: &Scope, descriptor: &StateDescriptor) -> Result<State, RenderError> {
    let args = use_args(scope)?;
    let state = descriptor.decode(scope.identities(), args.state_values())?;
    Ok(state)
}

/// Parse the private metadata of the view the event came from.
///
/// Missing or malformed metadata decodes as `T::default()`. Events that
/// carry no view at all (commands, messages, most callbacks) are an error.
pub fn use_private_metadata<T>(scope: &Scope) -> Result<T, RenderError>
where
    T: DeserializeOwned + Default,
{
    let args = use_args(scope)?;
    let in_view_context = match args.kind() {
        EventKind::BlockAction | EventKind::BlockSuggestion => true,
        EventKind::ViewSubmission | EventKind::ViewClosed => true,
        EventKind::Event(event_type) => event_type == "app_home_opened",
        _ => false,
    };
    if !in_view_context {
        return Err(RenderError::MissingContext {
            accessor: "use_private_metadata",
            provider: "a view event",
        });
    }
    Ok(decode_metadata(args.private_metadata()))
}

fn decode_metadata<T: DeserializeOwned + Default>(raw: Option<&str>) -> T {
    let Some(raw) = raw.filter(|raw| !raw.is_empty()) else {
        return T::default();
    };
    match serde_json::from_str::<T>(raw) {
        Ok(value) => value,
        Err(err) => {
            tracing::debug!(error = %err, "Ignoring malformed private metadata");
            T::default()
        }
    }
}

/// Merge `extra` into an object, as the modal does with its `opened` marker.
pub(crate) fn merge_metadata(metadata: Option<Value>, extra: (&str, Value)) -> Value {
    let mut object = match metadata {
        Some(Value::Object(map)) => map,
        _ => serde_json::Map::new(),
    };
    object.insert(extra.0.to_string(), extra.1);
    Value::Object(object)
}

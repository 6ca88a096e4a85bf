//! Built-in components that render a subtree and publish it.
//!
//! Each surface serializes its children in a nested render pass that
//! inherits the caller's contexts, then hands the payload to the platform
//! client (or to the event's acknowledger for option lists).

mod home;
mod message;
mod modal;
mod options;

pub use home::HOME;
pub use message::{OnFail, OnSuccess, ResponseType, MESSAGE};
pub use modal::MODAL;
pub use options::{OPTIONS, OPTION_GROUPS};

use std::sync::Arc;

use thiserror::Error;

use crate::element::Props;
use crate::event::{EventArgs, PlatformClient};
use crate::hooks::{use_args, use_client_factory};
use crate::render::{RenderError, Scope};

/// Misuse of a surface component.
#[derive(Debug, Error)]
pub enum SurfaceError {
    #[error("Modal must be rendered in response to an event with a trigger_id")]
    MissingTrigger,

    #[error("there is no modal to update")]
    NotAModal,

    #[error("the view to update has no id")]
    MissingViewId,

    #[error("user_id prop is required when rendering Home outside of a handler")]
    MissingUser,

    #[error("channel prop is required when the event has no response URL")]
    MissingChannel,

    #[error("{surface} must be rendered in response to an options request")]
    NotAnOptionsEvent { surface: &'static str },

    #[error("a token was given but no client factory is bound")]
    MissingClientFactory,

    #[error("unknown response_type '{0}'")]
    InvalidResponseType(String),
}

/// The client to publish with: built from the `token` prop when given,
/// otherwise the current event's client. The event is returned alongside so
/// the nested pass can keep it bound.
fn resolve_client(
    scope: &Scope,
    props: &Props,
) -> Result<(Arc<dyn PlatformClient>, Option<EventArgs>), RenderError> {
    if let Some(token) = props.text("token") {
        let factory = use_client_factory(scope).ok_or(SurfaceError::MissingClientFactory)?;
        return Ok((factory(token), None));
    }
    let args = use_args(scope)?;
    Ok((args.client().clone(), Some(args)))
}

//! Errors raised while evaluating an element tree.

use thiserror::Error;

use crate::element::Intrinsic;
use crate::event::{ClientError, EventError};
use crate::state::StateError;
use crate::surface::SurfaceError;

/// Errors that can occur during a render pass.
///
/// The evaluator never recovers from these: a pass either produces one value
/// or fails with the first error raised anywhere in the tree.
#[derive(Debug, Error)]
pub enum RenderError {
    /// A `children` prop on a kind with no children destination
    #[error("{kind} cannot have children")]
    CannotHaveChildren { kind: Intrinsic },

    /// A component used as `action_id` / `callback_id` before registration
    #[error("component '{component}' used as {prop} has no id; register it in a namespace first")]
    MissingIdentity { component: String, prop: String },

    /// A component placed in a prop that does not carry identities
    #[error("prop '{prop}' of {kind} cannot hold component '{component}'")]
    UnexpectedComponent {
        kind: Intrinsic,
        prop: String,
        component: String,
    },

    /// An opaque host value reached an intrinsic element
    #[error("prop '{prop}' of {kind} holds an opaque value that cannot be serialized")]
    UnexpectedOpaque { kind: Intrinsic, prop: String },

    /// Text leaves only fold strings and numbers
    #[error("{kind} text cannot contain elements")]
    ElementInText { kind: Intrinsic },

    /// An accessor read a context no enclosing Provider supplied
    #[error("{accessor} must be used inside {provider}")]
    MissingContext {
        accessor: &'static str,
        provider: &'static str,
    },

    /// A required component prop was not given
    #[error("component '{component}' requires prop '{prop}'")]
    MissingProp { component: String, prop: String },

    #[error(transparent)]
    State(#[from] StateError),

    #[error(transparent)]
    Surface(#[from] SurfaceError),

    #[error(transparent)]
    Event(#[from] EventError),

    #[error(transparent)]
    Client(#[from] ClientError),

    /// Failure signalled by a component body
    #[error(transparent)]
    Component(#[from] anyhow::Error),
}

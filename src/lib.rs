//! Declarative element trees rendered into chat-platform block and view
//! payloads, with namespaced component identities and a handler registry.
//!
//! ```text
//! manifests / HandlersConfig ──► RegistryBuilder ──► Registry (routes + ids)
//!                                                        │
//! inbound event ──► App::dispatch ──► handler component ─┤
//!                                                        ▼
//!                              Renderer ──► serde_json::Value ──► PlatformClient
//! ```

pub mod app;
pub mod blocks;
pub mod config;
pub mod context;
pub mod element;
pub mod event;
pub mod hooks;
pub mod identity;
pub mod logging;
pub mod registry;
pub mod render;
pub mod state;
pub mod surface;

pub use app::{App, DispatchError, DispatchOutcome, Rerender};
pub use context::{Context, ContextSnapshot};
pub use element::{Component, Element, Intrinsic, Node, Prop, Props};
pub use event::{EventArgs, EventKind};
pub use identity::IdentityTable;
pub use registry::{Entry, HandlersConfig, Registry, RegistryBuilder};
pub use render::{RenderError, Renderer, Scope};
pub use state::{ControlKind, State, StateDescriptor};

//! Event dispatch.
//!
//! ```text
//! EventArgs ──► Category::of(kind) ──► subject (action id, callback id, ...)
//!                                         │
//!                   table.matching(category, subject)
//!                                         │
//!            ack once (options requests are acked by the handler)
//!                                         │
//!   for each route:  ARGS ⟶ CLIENT_FACTORY ⟶ <Handler query event_type rerender/>
//! ```

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use serde_json::Value;
use thiserror::Error;

use crate::config::{Config, ConfigError};
use crate::element::{Component, Element, ElementKind, Node, Prop, Props};
use crate::event::{ClientError, ClientFactory, EventArgs, EventError, EventKind};
use crate::hooks::{ARGS, CLIENT_FACTORY};
use crate::registry::{load_manifests, Category, ComponentCatalog, DispatchTable, Registry};
use crate::render::{RenderError, Renderer};

/// Errors surfaced by [`App::dispatch`].
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error(transparent)]
    Event(#[from] EventError),

    /// Acknowledging the event failed
    #[error("failed to acknowledge event: {0}")]
    Ack(#[source] ClientError),

    /// A handler's render pass failed
    #[error("handler '{component}' failed: {source}")]
    Handler {
        component: String,
        #[source]
        source: RenderError,
    },
}

/// What a dispatch did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchOutcome {
    /// Handlers invoked.
    pub matched: usize,
}

/// A built registry ready to receive events.
#[derive(Clone)]
pub struct App {
    registry: Arc<Registry>,
    renderer: Renderer,
    client_factory: Option<ClientFactory>,
}

impl App {
    pub fn new(registry: Registry) -> Self {
        let renderer = registry.renderer();
        Self {
            registry: Arc::new(registry),
            renderer,
            client_factory: None,
        }
    }

    /// Bind a factory so surfaces given a `token` can build their own client.
    pub fn with_client_factory(mut self, factory: ClientFactory) -> Self {
        self.client_factory = Some(factory);
        self
    }

    /// Load the manifests named by `config` and build an app from them.
    pub async fn load(config: &Config, catalog: &ComponentCatalog) -> Result<Self, ConfigError> {
        let modules = load_manifests(Path::new(&config.handlers.path), catalog).await?;
        let registry = Registry::builder().namespaces(modules).build()?;
        Ok(Self::new(registry))
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn routes(&self) -> &DispatchTable {
        self.registry.table()
    }

    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    /// Route one event to every matching handler, in registration order.
    pub async fn dispatch(&self, args: EventArgs) -> Result<DispatchOutcome, DispatchError> {
        let category = Category::of(args.kind());
        let Some(subject) = subject(&args, category) else {
            tracing::debug!(category = %category, "Event carries nothing to route on");
            return Ok(DispatchOutcome::default());
        };

        let handlers: Vec<Component> = self
            .routes()
            .matching(category, subject)
            .map(|route| route.component().clone())
            .collect();
        if handlers.is_empty() {
            tracing::debug!(category = %category, subject = %subject, "No route matched");
            return Ok(DispatchOutcome::default());
        }
        tracing::debug!(
            category = %category,
            subject = %subject,
            handlers = handlers.len(),
            "Dispatching event"
        );

        if category != Category::Option {
            args.ack(None).await.map_err(DispatchError::Ack)?;
        }

        for component in &handlers {
            let rerender = Rerender::new(self, component, args.clone());
            rerender
                .call(Props::new())
                .await
                .map_err(|source| DispatchError::Handler {
                    component: component.name().to_string(),
                    source,
                })?;
        }
        Ok(DispatchOutcome {
            matched: handlers.len(),
        })
    }
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("routes", &self.routes().len())
            .field("client_factory", &self.client_factory.is_some())
            .finish()
    }
}

/// The string a category's patterns are matched against.
fn subject(args: &EventArgs, category: Category) -> Option<&str> {
    match category {
        Category::Action | Category::Option => args.action_id(),
        Category::Submission | Category::ViewClosed | Category::Shortcut => args.callback_id(),
        Category::Command => args.command(),
        Category::Event => args.event_type(),
        Category::Message => args.message_text(),
    }
}

/// Re-renders a handler for the same event.
///
/// Handlers receive one as their `rerender` prop. Calling it invokes the
/// handler again in a fresh render pass, with the original props overridden
/// by `overrides`.
#[derive(Clone)]
pub struct Rerender {
    renderer: Renderer,
    component: Component,
    args: EventArgs,
    client_factory: Option<ClientFactory>,
    base: Props,
}

impl Rerender {
    fn new(app: &App, component: &Component, args: EventArgs) -> Self {
        let mut base = Props::new();
        if let Some(query) = args.query() {
            base.set("query", query);
        }
        match args.kind() {
            EventKind::ViewSubmission => base.set("event_type", "view_submission"),
            EventKind::ViewClosed => base.set("event_type", "view_closed"),
            _ => {}
        }
        Self {
            renderer: app.renderer.clone(),
            component: component.clone(),
            args,
            client_factory: app.client_factory.clone(),
            base,
        }
    }

    pub fn component(&self) -> &Component {
        &self.component
    }

    pub async fn call(&self, overrides: Props) -> Result<Value, RenderError> {
        let props = self
            .base
            .clone()
            .with("rerender", Prop::opaque(self.clone()))
            .merge(overrides);
        let handler = Element::new(ElementKind::Component(self.component.clone()), props);

        let mut tree: Node = ARGS.provide(Some(self.args.clone()), handler).into();
        if let Some(factory) = &self.client_factory {
            tree = CLIENT_FACTORY.provide(Some(factory.clone()), tree).into();
        }
        self.renderer.render(tree).await
    }
}

impl fmt::Debug for Rerender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rerender")
            .field("component", &self.component)
            .field("event", self.args.kind())
            .finish_non_exhaustive()
    }
}

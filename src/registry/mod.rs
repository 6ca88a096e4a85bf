//! Handler registry builder.
//!
//! Turns per-namespace [`HandlersConfig`]s into one [`DispatchTable`]:
//!
//! ```text
//! for each namespace, for each entry (actions, messages, shortcuts,
//! commands, options, events, submissions):
//!   id      = "{namespace}/{component name}"        (identity table)
//!   pattern = entry.pattern or id                   → route
//!   options / submissions / actions, pattern != id  → second route on id
//!   submission with handle_close                    → view_closed route per pattern
//!   stateful host, first time seen                  → action route /^state:{id}\./
//! ```
//!
//! Every host named in any namespace's `states` is marked stateful before the
//! first route is built, so declaration order across files does not matter.

mod handlers;
mod manifest;
mod pattern;
mod table;

pub use handlers::{Entry, HandlersConfig};
pub use manifest::{load_manifests, ComponentCatalog};
pub use pattern::Pattern;
pub use table::{Category, DispatchTable, Route};

use std::collections::HashSet;

use crate::config::ConfigError;
use crate::identity::IdentityTable;
use crate::render::Renderer;

/// Collects namespaces and builds a [`Registry`].
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    identities: IdentityTable,
    modules: Vec<(String, HandlersConfig)>,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register into an existing identity table.
    pub fn with_identities(identities: IdentityTable) -> Self {
        Self {
            identities,
            modules: Vec::new(),
        }
    }

    pub fn namespace(mut self, namespace: impl Into<String>, config: HandlersConfig) -> Self {
        self.modules.push((namespace.into(), config));
        self
    }

    pub fn namespaces<I, S>(mut self, modules: I) -> Self
    where
        I: IntoIterator<Item = (S, HandlersConfig)>,
        S: Into<String>,
    {
        self.modules
            .extend(modules.into_iter().map(|(namespace, config)| (namespace.into(), config)));
        self
    }

    pub fn build(self) -> Result<Registry, ConfigError> {
        self.validate()?;

        for (_, config) in &self.modules {
            for descriptor in config.states() {
                self.identities.mark_stateful(descriptor.host());
            }
        }

        let mut table = DispatchTable::new();
        let mut state_routes = HashSet::new();
        for (namespace, config) in &self.modules {
            let before = table.len();
            for (category, entries) in config.sections() {
                for entry in entries {
                    self.register(
                        &mut table,
                        &mut state_routes,
                        namespace,
                        category,
                        entry,
                    )?;
                }
            }
            tracing::debug!(
                namespace = %namespace,
                routes = table.len() - before,
                "Namespace registered"
            );
        }

        tracing::info!(
            namespaces = self.modules.len(),
            routes = table.len(),
            "Handler registry built"
        );
        Ok(Registry {
            table,
            identities: self.identities,
        })
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        for (namespace, _) in &self.modules {
            if namespace.is_empty() || namespace.contains('/') {
                return Err(ConfigError::ValidationError {
                    message: format!(
                        "Namespace '{namespace}' must be non-empty and must not contain '/'"
                    ),
                });
            }
            if !seen.insert(namespace.as_str()) {
                return Err(ConfigError::ValidationError {
                    message: format!("Namespace '{namespace}' is declared twice"),
                });
            }
        }
        Ok(())
    }

    fn register(
        &self,
        table: &mut DispatchTable,
        state_routes: &mut HashSet<String>,
        namespace: &str,
        category: Category,
        entry: &Entry,
    ) -> Result<(), ConfigError> {
        let component = &entry.component;
        let id = self.identities.assign(namespace, component);
        let pattern = entry
            .pattern
            .clone()
            .unwrap_or_else(|| Pattern::exact(id.as_str()));

        let mut patterns = vec![pattern];
        if category.binds_own_id() && !patterns[0].is_exact(&id) {
            patterns.push(Pattern::exact(id.as_str()));
        }

        for pattern in &patterns {
            insert(table, category, pattern.clone(), entry)?;
            if category == Category::Submission && entry.handle_close {
                insert(table, Category::ViewClosed, pattern.clone(), entry)?;
            }
        }

        if self.identities.is_stateful(component) && state_routes.insert(id.clone()) {
            let pattern = Pattern::state_prefix(&id).map_err(|err| invalid(&id, err))?;
            insert(table, Category::Action, pattern, entry)?;
        }
        Ok(())
    }
}

fn insert(
    table: &mut DispatchTable,
    category: Category,
    pattern: Pattern,
    entry: &Entry,
) -> Result<(), ConfigError> {
    let source = pattern.as_str().to_string();
    table
        .insert(category, pattern, &entry.component)
        .map_err(|err| invalid(&source, err))
}

fn invalid(pattern: &str, err: regex::Error) -> ConfigError {
    ConfigError::ValidationError {
        message: format!("Pattern '{pattern}' cannot be compiled: {err}"),
    }
}

/// The built dispatch table together with the identities it assigned.
#[derive(Debug, Clone)]
pub struct Registry {
    table: DispatchTable,
    identities: IdentityTable,
}

impl Registry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    pub fn table(&self) -> &DispatchTable {
        &self.table
    }

    pub fn identities(&self) -> &IdentityTable {
        &self.identities
    }

    /// A renderer resolving ids against this registry.
    pub fn renderer(&self) -> Renderer {
        Renderer::new(self.identities.clone())
    }
}

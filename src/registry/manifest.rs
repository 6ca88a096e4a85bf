//! Handler manifests on disk.
//!
//! Each `*.toml` file in the handlers directory declares one namespace, named
//! after the file stem:
//!
//! ```toml
//! commands = [{ component = "ListTodos", pattern = "/todos" }]
//! actions = ["AddTodo", { component = "Pick", pattern = { regex = "^pick-" } }]
//! submissions = [{ component = "SaveTodo", handle_close = true }]
//! events = [{ pattern = "app_home_opened", component = "HomeTab" }]
//!
//! [[states]]
//! host = "AddTodo"
//! fields = { title = "plain_text_input", city = { type = "external_select", options = "Cities" } }
//! ```
//!
//! Component names resolve through a [`ComponentCatalog`] the application
//! fills in; manifests cannot introduce code.

use std::collections::{BTreeMap, HashMap};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::config::ConfigError;
use crate::element::Component;
use crate::registry::handlers::{Entry, HandlersConfig};
use crate::registry::pattern::Pattern;
use crate::state::{Control, ControlKind, StateDescriptor};

/// Components a manifest may name, keyed by declared name.
#[derive(Debug, Clone, Default)]
pub struct ComponentCatalog {
    components: HashMap<String, Component>,
}

impl ComponentCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a component under its declared name.
    pub fn with(mut self, component: &Component) -> Self {
        self.insert(component);
        self
    }

    pub fn insert(&mut self, component: &Component) {
        self.components
            .insert(component.name().to_string(), component.clone());
    }

    pub fn get(&self, name: &str) -> Option<&Component> {
        self.components.get(name)
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}

impl<'a> FromIterator<&'a Component> for ComponentCatalog {
    fn from_iter<I: IntoIterator<Item = &'a Component>>(iter: I) -> Self {
        let mut catalog = ComponentCatalog::new();
        for component in iter {
            catalog.insert(component);
        }
        catalog
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct Manifest {
    #[serde(default)]
    actions: Vec<RawEntry>,
    #[serde(default)]
    messages: Vec<RawEntry>,
    #[serde(default)]
    shortcuts: Vec<RawEntry>,
    #[serde(default)]
    commands: Vec<RawEntry>,
    #[serde(default)]
    options: Vec<RawEntry>,
    #[serde(default)]
    submissions: Vec<RawEntry>,
    #[serde(default)]
    events: Vec<RawEventEntry>,
    #[serde(default)]
    states: Vec<RawState>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawEntry {
    Name(String),
    Table(RawEntryTable),
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawEntryTable {
    component: String,
    #[serde(default)]
    pattern: Option<RawPattern>,
    #[serde(default)]
    handle_close: bool,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawPattern {
    Exact(String),
    Regex { regex: String },
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawEventEntry {
    pattern: String,
    component: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawState {
    host: String,
    fields: BTreeMap<String, RawControl>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawControl {
    Kind(ControlKind),
    Spec {
        #[serde(rename = "type")]
        kind: ControlKind,
        #[serde(default)]
        options: Option<String>,
    },
}

/// Read every manifest in `dir`, in file-name order.
///
/// A missing directory yields no namespaces. Files without a `.toml`
/// extension are skipped.
pub async fn load_manifests(
    dir: impl AsRef<Path>,
    catalog: &ComponentCatalog,
) -> Result<Vec<(String, HandlersConfig)>, ConfigError> {
    let dir = dir.as_ref();
    let mut reader = match tokio::fs::read_dir(dir).await {
        Ok(reader) => reader,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            tracing::debug!(dir = %dir.display(), "Handlers directory not found");
            return Ok(Vec::new());
        }
        Err(err) => return Err(read_error(dir, err)),
    };

    let mut paths = Vec::new();
    while let Some(entry) = reader.next_entry().await.map_err(|err| read_error(dir, err))? {
        let path = entry.path();
        if path.extension().is_some_and(|ext| ext == "toml") {
            paths.push(path);
        }
    }
    paths.sort();

    let mut modules = Vec::with_capacity(paths.len());
    for path in paths {
        let Some(namespace) = path.file_stem().and_then(|stem| stem.to_str()) else {
            return Err(ConfigError::ValidationError {
                message: format!("Manifest '{}' has no usable file name", path.display()),
            });
        };
        let namespace = namespace.to_string();
        let content = tokio::fs::read_to_string(&path)
            .await
            .map_err(|err| read_error(&path, err))?;
        let config = parse_manifest(&path, &content, catalog)?;
        tracing::debug!(path = %path.display(), namespace = %namespace, "Manifest loaded");
        modules.push((namespace, config));
    }
    Ok(modules)
}

fn read_error(path: &Path, source: std::io::Error) -> ConfigError {
    ConfigError::ReadError {
        path: path.to_path_buf(),
        source,
    }
}

fn parse_manifest(
    path: &Path,
    content: &str,
    catalog: &ComponentCatalog,
) -> Result<HandlersConfig, ConfigError> {
    let manifest: Manifest = toml::from_str(content).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })?;
    let resolver = Resolver { path, catalog };

    let mut config = HandlersConfig::new();
    for raw in &manifest.actions {
        config = config.action(resolver.entry(raw)?);
    }
    for raw in &manifest.messages {
        config = config.message(resolver.entry(raw)?);
    }
    for raw in &manifest.shortcuts {
        config = config.shortcut(resolver.entry(raw)?);
    }
    for raw in &manifest.commands {
        config = config.command(resolver.entry(raw)?);
    }
    for raw in &manifest.options {
        config = config.option(resolver.entry(raw)?);
    }
    for raw in &manifest.submissions {
        config = config.submission(resolver.entry(raw)?);
    }
    for raw in &manifest.events {
        config = config.event(raw.pattern.clone(), resolver.component(&raw.component)?);
    }
    for raw in &manifest.states {
        config = config.state(resolver.state(raw)?);
    }
    Ok(config)
}

struct Resolver<'a> {
    path: &'a Path,
    catalog: &'a ComponentCatalog,
}

impl Resolver<'_> {
    fn component(&self, name: &str) -> Result<&Component, ConfigError> {
        self.catalog
            .get(name)
            .ok_or_else(|| ConfigError::UnknownComponent {
                path: self.path_buf(),
                name: name.to_string(),
            })
    }

    fn entry(&self, raw: &RawEntry) -> Result<Entry, ConfigError> {
        match raw {
            RawEntry::Name(name) => Ok(Entry::new(self.component(name)?)),
            RawEntry::Table(table) => {
                let mut entry =
                    Entry::new(self.component(&table.component)?).handle_close(table.handle_close);
                if let Some(pattern) = &table.pattern {
                    entry = entry.pattern(self.pattern(pattern)?);
                }
                Ok(entry)
            }
        }
    }

    fn pattern(&self, raw: &RawPattern) -> Result<Pattern, ConfigError> {
        match raw {
            RawPattern::Exact(value) => Ok(Pattern::exact(value.as_str())),
            RawPattern::Regex { regex } => {
                Pattern::regex(regex).map_err(|source| ConfigError::InvalidPattern {
                    path: self.path_buf(),
                    pattern: regex.clone(),
                    source,
                })
            }
        }
    }

    fn state(&self, raw: &RawState) -> Result<StateDescriptor, ConfigError> {
        let mut descriptor = StateDescriptor::new(self.component(&raw.host)?);
        for (key, control) in &raw.fields {
            let control = match control {
                RawControl::Kind(kind) => Control::new(*kind),
                RawControl::Spec {
                    kind,
                    options: Some(options),
                } => Control::with_options(*kind, self.component(options)?),
                RawControl::Spec {
                    kind,
                    options: None,
                } => Control::new(*kind),
            };
            descriptor = descriptor.field(key.as_str(), control);
        }
        Ok(descriptor)
    }

    fn path_buf(&self) -> PathBuf {
        self.path.to_path_buf()
    }
}

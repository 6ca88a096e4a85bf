mod common;

use std::fs;

use reslack::config::ConfigError;
use reslack::registry::{
    load_manifests, Category, ComponentCatalog, Entry, HandlersConfig, Pattern, Registry,
};
use reslack::state::{Control, ControlKind, StateDescriptor};
use tempfile::TempDir;

fn patterns(registry: &Registry, category: Category) -> Vec<String> {
    registry
        .table()
        .routes_for(category)
        .map(|route| route.pattern().to_string())
        .collect()
}

/// Registering the same component twice in one namespace keeps one id.
#[test]
fn test_identity_is_idempotent_across_entries() {
    let add = common::noop("AddTodo");
    let registry = Registry::builder()
        .namespace(
            "todos",
            HandlersConfig::new()
                .action(&add)
                .shortcut(Entry::new(&add).pattern("add-shortcut")),
        )
        .build()
        .unwrap();

    assert_eq!(registry.identities().id_of(&add).as_deref(), Some("todos/AddTodo"));
    assert_eq!(patterns(&registry, Category::Action), vec!["todos/AddTodo"]);
    assert_eq!(patterns(&registry, Category::Shortcut), vec!["add-shortcut"]);
}

/// A stateful host listed under several entries gets a single prefix route.
#[test]
fn test_state_prefix_route_is_deduplicated() {
    let form = common::noop("Form");
    let cities = common::noop("Cities");
    let descriptor = StateDescriptor::new(&form)
        .field("city", Control::with_options(ControlKind::ExternalSelect, &cities));

    let registry = Registry::builder()
        .namespace(
            "forms",
            HandlersConfig::new()
                .command(Entry::new(&form).pattern("/form"))
                .submission(Entry::new(&form).handle_close(true))
                .option(&cities)
                .state(descriptor),
        )
        .build()
        .unwrap();

    let state_routes: Vec<_> = registry
        .table()
        .routes_for(Category::Action)
        .filter(|route| route.pattern().is_regex())
        .collect();
    assert_eq!(state_routes.len(), 1);
    assert!(state_routes[0].matches("state:forms/Form.city_forms/Cities"));
    assert_eq!(patterns(&registry, Category::ViewClosed), vec!["forms/Form"]);

    // Options for the city control reach the options component through the
    // segment-wrapped pattern.
    let hits: Vec<_> = registry
        .table()
        .matching(Category::Option, "state:forms/Form.city_forms/Cities")
        .map(|route| route.component().name().to_string())
        .collect();
    assert_eq!(hits, vec!["Cities"]);
}

/// A regex pattern is kept as-is and the id route is added next to it.
#[test]
fn test_regex_action_pattern_binds_id_too() {
    let pick = common::noop("Pick");
    let registry = Registry::builder()
        .namespace(
            "todos",
            HandlersConfig::new().action(Entry::new(&pick).pattern(Pattern::regex("^pick-").unwrap())),
        )
        .build()
        .unwrap();

    assert_eq!(patterns(&registry, Category::Action), vec!["/^pick-/", "todos/Pick"]);
    assert_eq!(registry.table().matching(Category::Action, "pick-3").count(), 1);
}

/// Manifests load in file-name order and skip non-TOML files.
#[tokio::test]
async fn test_manifests_load_from_directory() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    fs::write(
        dir.path().join("todos.toml"),
        r#"
commands = [{ component = "ListTodos", pattern = "/todos" }]
actions = ["AddTodo"]
events = [{ pattern = "app_home_opened", component = "HomeTab" }]

[[states]]
host = "AddTodo"
fields = { title = "plain_text_input" }
"#,
    )
    .unwrap();
    fs::write(dir.path().join("admin.toml"), r#"shortcuts = ["Audit"]"#).unwrap();
    fs::write(dir.path().join("README.md"), "not a manifest").unwrap();

    let catalog: ComponentCatalog = [
        common::noop("ListTodos"),
        common::noop("AddTodo"),
        common::noop("HomeTab"),
        common::noop("Audit"),
    ]
    .iter()
    .collect();

    let modules = load_manifests(dir.path(), &catalog).await.unwrap();
    let namespaces: Vec<_> = modules.iter().map(|(namespace, _)| namespace.as_str()).collect();
    assert_eq!(namespaces, vec!["admin", "todos"]);

    let registry = Registry::builder().namespaces(modules).build().unwrap();
    assert_eq!(patterns(&registry, Category::Shortcut), vec!["admin/Audit"]);
    assert_eq!(patterns(&registry, Category::Command), vec!["/todos"]);
    assert_eq!(patterns(&registry, Category::Event), vec!["app_home_opened"]);
    assert_eq!(
        patterns(&registry, Category::Action),
        vec!["todos/AddTodo", r"/^state:todos/AddTodo\./"]
    );
}

/// A missing handlers directory yields no namespaces.
#[tokio::test]
async fn test_missing_manifest_directory_is_empty() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let modules = load_manifests(dir.path().join("absent"), &ComponentCatalog::new())
        .await
        .unwrap();
    assert!(modules.is_empty());
}

/// An unknown top-level key fails with the manifest path in the message.
#[tokio::test]
async fn test_unknown_manifest_key_names_the_file() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("broken.toml");
    fs::write(&path, r#"handlers = ["Nope"]"#).unwrap();

    let err = load_manifests(dir.path(), &ComponentCatalog::new())
        .await
        .unwrap_err();
    assert!(matches!(err, ConfigError::ParseError { .. }));
    assert!(err.to_string().contains(&path.display().to_string()));
}

/// Events must name the event type they listen for.
#[tokio::test]
async fn test_event_without_pattern_is_rejected() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    fs::write(dir.path().join("home.toml"), r#"events = ["HomeTab"]"#).unwrap();
    let catalog = ComponentCatalog::new().with(&common::noop("HomeTab"));

    let err = load_manifests(dir.path(), &catalog).await.unwrap_err();
    assert!(matches!(err, ConfigError::ParseError { .. }));
}

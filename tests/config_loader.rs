mod common;

use reslack::app::App;
use reslack::config::{Config, ConfigError};
use reslack::registry::ComponentCatalog;

/// Test that Config::default() produces the documented values.
#[test]
fn test_config_default_values() {
    let config = Config::default();
    assert_eq!(config.handlers.path, "app");
    assert_eq!(config.client.token_env, "SLACK_BOT_TOKEN");
    assert_eq!(config.logging.filter, "info");
    assert!(config.validate().is_ok());
}

#[test]
fn test_config_path_ends_with_expected() {
    assert!(Config::config_path().ends_with("reslack/config.toml"));
}

/// A missing file is not an error.
#[test]
fn test_load_missing_file_returns_default() {
    let temp_dir = tempfile::TempDir::new().unwrap();
    let config = Config::load_from(&temp_dir.path().join("absent.toml")).unwrap();
    assert_eq!(config, Config::default());
}

/// Partial files keep defaults for everything they leave out.
#[test]
fn test_load_partial_file() {
    let (_dir, path) = common::temp_config(
        r#"
[handlers]
path = "handlers"

[logging]
filter = "reslack=debug"
"#,
    );
    let config = Config::load_from(&path).unwrap();
    assert_eq!(config.handlers.path, "handlers");
    assert_eq!(config.client.token_env, "SLACK_BOT_TOKEN");
    assert_eq!(config.logging.filter, "reslack=debug");
}

#[test]
fn test_load_rejects_malformed_toml() {
    let (_dir, path) = common::temp_config("[handlers\npath = ");
    match Config::load_from(&path).unwrap_err() {
        ConfigError::ParseError { path: reported, .. } => assert_eq!(reported, path),
        other => panic!("Expected ParseError, got {other:?}"),
    }
}

#[test]
fn test_validation_fails_empty_handlers_path() {
    let (_dir, path) = common::temp_config("[handlers]\npath = \"  \"\n");
    match Config::load_from(&path).unwrap_err() {
        ConfigError::ValidationError { message } => assert!(message.contains("handlers.path")),
        other => panic!("Expected ValidationError, got {other:?}"),
    }
}

#[test]
fn test_validation_fails_empty_token_env() {
    let mut config = Config::default();
    config.client.token_env = String::new();
    assert!(matches!(
        config.validate(),
        Err(ConfigError::ValidationError { message }) if message.contains("token_env")
    ));
}

/// Token lookup ignores an unset or empty variable.
#[test]
fn test_token_from_environment() {
    let mut config = Config::default();
    config.client.token_env = "RESLACK_TEST_TOKEN_UNSET_1F2E".to_string();
    assert_eq!(config.token(), None);
}

/// The app builds its registry from the configured manifest directory.
#[tokio::test]
async fn test_app_load_from_manifest_dir() {
    let temp_dir = tempfile::TempDir::new().unwrap();
    std::fs::write(
        temp_dir.path().join("todos.toml"),
        r#"
commands = [{ component = "ListTodos", pattern = "/todos" }]
actions = ["AddTodo"]
"#,
    )
    .unwrap();
    let mut config = Config::default();
    config.handlers.path = temp_dir.path().to_string_lossy().into_owned();

    let list = common::noop("ListTodos");
    let add = common::noop("AddTodo");
    let catalog = ComponentCatalog::new().with(&list).with(&add);
    let app = App::load(&config, &catalog).await.unwrap();

    assert_eq!(app.routes().len(), 2);
    assert_eq!(app.registry().identities().id_of(&add).as_deref(), Some("todos/AddTodo"));
}

#[tokio::test]
async fn test_app_load_unknown_component() {
    let temp_dir = tempfile::TempDir::new().unwrap();
    std::fs::write(temp_dir.path().join("todos.toml"), r#"actions = ["Ghost"]"#).unwrap();
    let mut config = Config::default();
    config.handlers.path = temp_dir.path().to_string_lossy().into_owned();

    let err = App::load(&config, &ComponentCatalog::new()).await.unwrap_err();
    assert!(matches!(err, ConfigError::UnknownComponent { name, .. } if name == "Ghost"));
}

use serde::{Deserialize, Serialize};

/// Root configuration container.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub handlers: HandlersSettings,
    #[serde(default)]
    pub client: ClientConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Where handler manifests live.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HandlersSettings {
    /// Directory of `*.toml` manifests, one namespace per file (default: "app").
    #[serde(default = "default_handlers_path")]
    pub path: String,
}

/// Platform client settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Environment variable holding the bot token (default: "SLACK_BOT_TOKEN").
    #[serde(default = "default_token_env")]
    pub token_env: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `EnvFilter` directives used when `RUST_LOG` is unset (default: "info").
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

fn default_handlers_path() -> String {
    "app".to_string()
}

fn default_token_env() -> String {
    "SLACK_BOT_TOKEN".to_string()
}

fn default_log_filter() -> String {
    "info".to_string()
}

impl Default for HandlersSettings {
    fn default() -> Self {
        Self {
            path: default_handlers_path(),
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            token_env: default_token_env(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
        }
    }
}

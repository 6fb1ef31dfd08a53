use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use shopwise_core::config::{AppConfig, LoadOptions, DEFAULT_CONFIG_FILE};
use toml::Value;

use crate::commands::{CommandResult, EXIT_CONFIG, EXIT_OK};

pub fn run() -> CommandResult {
    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => {
            return CommandResult::failure(
                "config",
                "config_validation",
                format!("config validation failed: {error}"),
                EXIT_CONFIG,
            );
        }
    };

    CommandResult { exit_code: EXIT_OK, output: render(&config) }
}

pub fn render(config: &AppConfig) -> String {
    let config_file_path = detect_config_path();
    let config_file_doc = load_config_file_doc(config_file_path.as_deref());

    let fields: [(&str, &[&str], String); 13] = [
        ("database.url", &["SHOPWISE_DATABASE_URL"], config.database.url.clone()),
        (
            "database.max_connections",
            &["SHOPWISE_DATABASE_MAX_CONNECTIONS"],
            config.database.max_connections.to_string(),
        ),
        (
            "database.timeout_secs",
            &["SHOPWISE_DATABASE_TIMEOUT_SECS"],
            config.database.timeout_secs.to_string(),
        ),
        ("server.bind_address", &["SHOPWISE_SERVER_BIND_ADDRESS"], config.server.bind_address.clone()),
        ("server.port", &["SHOPWISE_SERVER_PORT"], config.server.port.to_string()),
        (
            "server.graceful_shutdown_secs",
            &["SHOPWISE_SERVER_GRACEFUL_SHUTDOWN_SECS"],
            config.server.graceful_shutdown_secs.to_string(),
        ),
        (
            "assistant.default_limit",
            &["SHOPWISE_ASSISTANT_DEFAULT_LIMIT"],
            config.assistant.default_limit.to_string(),
        ),
        (
            "assistant.chat_limit",
            &["SHOPWISE_ASSISTANT_CHAT_LIMIT"],
            config.assistant.chat_limit.to_string(),
        ),
        (
            "assistant.max_limit",
            &["SHOPWISE_ASSISTANT_MAX_LIMIT"],
            config.assistant.max_limit.to_string(),
        ),
        (
            "logging.level",
            &["SHOPWISE_LOGGING_LEVEL", "SHOPWISE_LOG_LEVEL"],
            config.logging.level.clone(),
        ),
        (
            "logging.format",
            &["SHOPWISE_LOGGING_FORMAT", "SHOPWISE_LOG_FORMAT"],
            format!("{:?}", config.logging.format).to_lowercase(),
        ),
        ("server.listen_address", &[], config.listen_address()),
        (
            "config.file",
            &[],
            config_file_path
                .as_deref()
                .map(|path| path.display().to_string())
                .unwrap_or_else(|| "<none>".to_string()),
        ),
    ];

    let mut lines = vec!["effective config (source precedence: env > file > default):".to_string()];
    for (key_path, env_keys, value) in fields {
        let source =
            field_source(key_path, env_keys, config_file_doc.as_ref(), config_file_path.as_deref());
        lines.push(format!("- {key_path} = {value} (source: {source})"));
    }
    lines.join("\n")
}

fn detect_config_path() -> Option<PathBuf> {
    [PathBuf::from(DEFAULT_CONFIG_FILE), PathBuf::from("config").join(DEFAULT_CONFIG_FILE)]
        .into_iter()
        .find(|path| path.exists())
}

fn load_config_file_doc(path: Option<&Path>) -> Option<Value> {
    let raw = fs::read_to_string(path?).ok()?;
    raw.parse::<Value>().ok()
}

fn field_source(
    key_path: &str,
    env_keys: &[&str],
    config_file_doc: Option<&Value>,
    config_file_path: Option<&Path>,
) -> String {
    if let Some(env_key) = env_keys.iter().find(|key| env::var_os(key).is_some()) {
        return format!("env ({env_key})");
    }

    if let Some(doc) = config_file_doc {
        if contains_path(doc, key_path) {
            let file_path = config_file_path
                .map(|path| path.display().to_string())
                .unwrap_or_else(|| "config file".to_string());
            return format!("file ({file_path})");
        }
    }

    if env_keys.is_empty() {
        "derived".to_string()
    } else {
        "default".to_string()
    }
}

fn contains_path(root: &Value, key_path: &str) -> bool {
    let mut current = root;
    for key in key_path.split('.') {
        let Some(next) = current.get(key) else {
            return false;
        };
        current = next;
    }
    true
}

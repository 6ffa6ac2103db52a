use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use storefront_core::config::{AppConfig, ConfigOverrides, LoadOptions};
use toml::Value;

struct Field {
    key_path: &'static str,
    value: String,
    env_keys: &'static [&'static str],
    flag: Option<&'static str>,
}

pub fn run(overrides: ConfigOverrides) -> String {
    let api_base_url_flag = overrides.api_base_url.is_some();
    let config = match AppConfig::load(LoadOptions { overrides, ..LoadOptions::default() }) {
        Ok(config) => config,
        Err(error) => return format!("config validation failed: {error}"),
    };

    let config_file_path = detect_config_path();
    let config_file_doc = load_config_file_doc(config_file_path.as_deref());

    let fields = [
        Field {
            key_path: "server.bind_address",
            value: config.server.bind_address.clone(),
            env_keys: &["STOREFRONT_SERVER_BIND_ADDRESS"],
            flag: None,
        },
        Field {
            key_path: "server.port",
            value: config.server.port.to_string(),
            env_keys: &["STOREFRONT_SERVER_PORT", "PORT"],
            flag: None,
        },
        Field {
            key_path: "server.graceful_shutdown_secs",
            value: config.server.graceful_shutdown_secs.to_string(),
            env_keys: &["STOREFRONT_SERVER_GRACEFUL_SHUTDOWN_SECS"],
            flag: None,
        },
        Field {
            key_path: "client.api_base_url",
            value: config.client.api_base_url.clone(),
            env_keys: &["STOREFRONT_CLIENT_API_BASE_URL"],
            flag: api_base_url_flag.then_some("--api-base-url"),
        },
        Field {
            key_path: "client.notification_ttl_ms",
            value: config.client.notification_ttl_ms.to_string(),
            env_keys: &["STOREFRONT_CLIENT_NOTIFICATION_TTL_MS"],
            flag: None,
        },
        Field {
            key_path: "logging.level",
            value: config.logging.level.clone(),
            env_keys: &["STOREFRONT_LOGGING_LEVEL", "STOREFRONT_LOG_LEVEL"],
            flag: None,
        },
        Field {
            key_path: "logging.format",
            value: format!("{:?}", config.logging.format),
            env_keys: &["STOREFRONT_LOGGING_FORMAT", "STOREFRONT_LOG_FORMAT"],
            flag: None,
        },
    ];

    let mut lines =
        vec!["effective config (source precedence: flag > env > file > default):".to_string()];
    for field in &fields {
        let source = field_source(
            field,
            config_file_doc.as_ref(),
            config_file_path.as_deref(),
        );
        lines.push(render_line(field.key_path, &field.value, source));
    }

    lines.join("\n")
}

fn detect_config_path() -> Option<PathBuf> {
    let root = PathBuf::from("storefront.toml");
    if root.exists() {
        return Some(root);
    }

    let nested = PathBuf::from("config/storefront.toml");
    if nested.exists() {
        return Some(nested);
    }

    None
}

fn load_config_file_doc(path: Option<&Path>) -> Option<Value> {
    let path = path?;
    let raw = fs::read_to_string(path).ok()?;
    raw.parse::<Value>().ok()
}

fn field_source(
    field: &Field,
    config_file_doc: Option<&Value>,
    config_file_path: Option<&Path>,
) -> String {
    if let Some(flag) = field.flag {
        return format!("flag ({flag})");
    }

    // first listed key takes precedence in the loader as well; blank values are unset there
    if let Some(env_key) = field
        .env_keys
        .iter()
        .find(|key| env::var(key).is_ok_and(|value| !value.trim().is_empty()))
    {
        return format!("env ({env_key})");
    }

    if let Some(doc) = config_file_doc {
        if contains_path(doc, field.key_path) {
            let file_path = config_file_path
                .map(|path| path.display().to_string())
                .unwrap_or_else(|| "config file".to_string());
            return format!("file ({file_path})");
        }
    }

    "default".to_string()
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

fn render_line(key: &str, value: &str, source: String) -> String {
    format!("- {key} = {value} (source: {source})")
}

pub mod config;
pub mod order;
pub mod products;

use std::future::Future;

use serde::Serialize;
use serde_json::Value;
use storefront_client::{HttpStorefrontApi, StoreState};
use storefront_core::config::{AppConfig, ConfigOverrides, LoadOptions};

pub const EXIT_RUNTIME: u8 = 1;
pub const EXIT_CONFIG: u8 = 2;
pub const EXIT_INVALID_INPUT: u8 = 3;
pub const EXIT_UNAVAILABLE: u8 = 4;
pub const EXIT_REJECTED: u8 = 5;

#[derive(Debug, Clone)]
pub struct CommandResult {
    pub exit_code: u8,
    pub output: String,
}

#[derive(Debug, Serialize)]
struct CommandOutcome {
    command: String,
    status: String,
    error_class: Option<String>,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<Value>,
}

impl CommandResult {
    pub fn success(command: &str, message: impl Into<String>) -> Self {
        Self::success_with_data(command, message, Value::Null)
    }

    pub fn success_with_data(command: &str, message: impl Into<String>, data: impl Serialize) -> Self {
        let data = serde_json::to_value(data).ok().filter(|value| !value.is_null());
        let payload = CommandOutcome {
            command: command.to_string(),
            status: "ok".to_string(),
            error_class: None,
            message: message.into(),
            data,
        };
        Self { exit_code: 0, output: serialize_payload(payload) }
    }

    pub fn failure(
        command: &str,
        error_class: &str,
        message: impl Into<String>,
        exit_code: u8,
    ) -> Self {
        let payload = CommandOutcome {
            command: command.to_string(),
            status: "error".to_string(),
            error_class: Some(error_class.to_string()),
            message: message.into(),
            data: None,
        };
        Self { exit_code, output: serialize_payload(payload) }
    }
}

/// Resolves the API client for a networked command from layered config.
pub(crate) fn api_client(
    command: &str,
    overrides: ConfigOverrides,
) -> Result<HttpStorefrontApi, CommandResult> {
    let config = load_config(command, overrides)?;
    Ok(HttpStorefrontApi::from_config(&config.client))
}

/// API client plus a fresh shop state, both configured from the `client` section.
pub fn client_session(
    command: &str,
    overrides: ConfigOverrides,
) -> Result<(HttpStorefrontApi, StoreState), CommandResult> {
    let config = load_config(command, overrides)?;
    Ok((HttpStorefrontApi::from_config(&config.client), StoreState::from_config(&config.client)))
}

fn load_config(command: &str, overrides: ConfigOverrides) -> Result<AppConfig, CommandResult> {
    AppConfig::load(LoadOptions { overrides, ..LoadOptions::default() }).map_err(|error| {
        CommandResult::failure(command, "config_validation", error.to_string(), EXIT_CONFIG)
    })
}

/// Drives one async command body to completion on a fresh current-thread runtime.
pub(crate) fn block_on<F>(command: &str, future: F) -> CommandResult
where
    F: Future<Output = CommandResult>,
{
    match tokio::runtime::Builder::new_current_thread().enable_all().build() {
        Ok(runtime) => runtime.block_on(future),
        Err(error) => CommandResult::failure(
            command,
            "runtime",
            format!("failed to start async runtime: {error}"),
            EXIT_RUNTIME,
        ),
    }
}

fn serialize_payload(payload: CommandOutcome) -> String {
    serde_json::to_string(&payload).unwrap_or_else(|error| {
        format!(
            "{{\"command\":\"unknown\",\"status\":\"error\",\"error_class\":\"serialization\",\"message\":\"{}\"}}",
            error.to_string().replace('\\', "\\\\").replace('"', "\\\"")
        )
    })
}

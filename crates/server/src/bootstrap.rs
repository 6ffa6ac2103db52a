use storefront_core::config::{AppConfig, ConfigError, LoadOptions};
use storefront_core::{Catalog, OrderIntake};
use thiserror::Error;
use tokio::net::TcpListener;
use tracing::info;

use crate::AppState;

pub struct Application {
    pub config: AppConfig,
    pub state: AppState,
    pub listener: TcpListener,
}

#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("could not bind listener on `{address}`: {source}")]
    Bind { address: String, source: std::io::Error },
}

pub async fn bootstrap(options: LoadOptions) -> Result<Application, BootstrapError> {
    let config = AppConfig::load(options)?;
    bootstrap_with_config(config).await
}

pub async fn bootstrap_with_config(config: AppConfig) -> Result<Application, BootstrapError> {
    info!(
        event_name = "system.bootstrap.start",
        correlation_id = "bootstrap",
        "starting application bootstrap"
    );

    let state = AppState::new(Catalog::reference(), OrderIntake::default());
    info!(
        event_name = "system.bootstrap.catalog_loaded",
        correlation_id = "bootstrap",
        product_count = state.catalog.len(),
        "catalog loaded"
    );

    let address = config.listen_address();
    let listener = TcpListener::bind(&address)
        .await
        .map_err(|source| BootstrapError::Bind { address: address.clone(), source })?;
    info!(
        event_name = "system.bootstrap.listener_bound",
        correlation_id = "bootstrap",
        bind_address = %address,
        "listener bound"
    );

    Ok(Application { config, state, listener })
}

#[cfg(test)]
mod tests {
    use storefront_core::config::{AppConfig, ConfigOverrides, LoadOptions};

    use crate::bootstrap::{bootstrap, bootstrap_with_config, BootstrapError};

    #[tokio::test]
    async fn bootstrap_fails_fast_on_invalid_config() {
        let result = bootstrap(LoadOptions {
            overrides: ConfigOverrides {
                api_base_url: Some("ftp://nowhere".to_string()),
                ..ConfigOverrides::default()
            },
            ..LoadOptions::default()
        })
        .await;

        let message = match result {
            Ok(_) => panic!("invalid config should not bootstrap"),
            Err(error) => error.to_string(),
        };
        assert!(message.contains("client.api_base_url"));
    }

    #[tokio::test]
    async fn bootstrap_reports_bind_failures_with_address() {
        let mut config = AppConfig::default();
        config.server.bind_address = "256.0.0.1".to_string();

        let result = bootstrap_with_config(config).await;

        assert!(matches!(
            result,
            Err(BootstrapError::Bind { ref address, .. }) if address == "256.0.0.1:3001"
        ));
    }

    #[tokio::test]
    async fn bootstrap_loads_reference_catalog() {
        let mut config = AppConfig::default();
        config.server.port = 0;

        let app = bootstrap_with_config(config).await.expect("bootstrap on ephemeral port");

        assert_eq!(app.state.catalog.len(), 6);
        assert!(app.listener.local_addr().expect("bound").port() > 0);
    }
}

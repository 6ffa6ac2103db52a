use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use storefront_core::config::ClientConfig;
use storefront_core::{ApiEnvelope, OrderConfirmation, OrderRequest, Product};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("server responded with status {status}")]
    Rejected { status: u16, message: Option<String> },
    #[error("unexpected response body: {0}")]
    Decode(String),
}

impl ClientError {
    /// Server-supplied reason for a rejection, when it sent one.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Rejected { message, .. } => message.as_deref(),
            _ => None,
        }
    }
}

/// Backend operations the client state depends on.
#[async_trait]
pub trait StorefrontApi: Send + Sync {
    async fn fetch_products(&self) -> Result<Vec<Product>, ClientError>;
    async fn submit_order(&self, request: &OrderRequest) -> Result<OrderConfirmation, ClientError>;
}

#[derive(Clone, Debug)]
pub struct HttpStorefrontApi {
    client: Client,
    base_url: String,
}

impl HttpStorefrontApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client: Client::new(), base_url }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(config.api_base_url.clone())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }
}

#[async_trait]
impl StorefrontApi for HttpStorefrontApi {
    async fn fetch_products(&self) -> Result<Vec<Product>, ClientError> {
        let response = self.client.get(self.url("products")).send().await?;
        let envelope: ApiEnvelope<Vec<Product>> = read_envelope(response).await?;
        Ok(envelope.into_data().unwrap_or_default())
    }

    async fn submit_order(&self, request: &OrderRequest) -> Result<OrderConfirmation, ClientError> {
        let response = self.client.post(self.url("orders")).json(request).send().await?;
        let envelope: ApiEnvelope<OrderConfirmation> = read_envelope(response).await?;
        envelope
            .into_data()
            .ok_or_else(|| ClientError::Decode("confirmation missing from response".to_string()))
    }
}

async fn read_envelope<T: DeserializeOwned>(response: Response) -> Result<ApiEnvelope<T>, ClientError> {
    let status = response.status();
    let bytes = response.bytes().await?;

    if !status.is_success() {
        let message = serde_json::from_slice::<ApiEnvelope<serde_json::Value>>(&bytes)
            .ok()
            .and_then(|envelope| envelope.message);
        return Err(ClientError::Rejected { status: status.as_u16(), message });
    }

    serde_json::from_slice(&bytes).map_err(|error| ClientError::Decode(error.to_string()))
}

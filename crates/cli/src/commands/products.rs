use serde::Serialize;
use storefront_client::{ClientError, StorefrontApi};
use storefront_core::config::ConfigOverrides;
use storefront_core::Product;

use crate::commands::{api_client, block_on, CommandResult, EXIT_REJECTED, EXIT_UNAVAILABLE};

const COMMAND: &str = "products";

#[derive(Debug, Serialize)]
struct ProductListing<'a> {
    count: usize,
    products: &'a [Product],
}

pub fn run(overrides: ConfigOverrides) -> CommandResult {
    let api = match api_client(COMMAND, overrides) {
        Ok(api) => api,
        Err(result) => return result,
    };
    block_on(COMMAND, execute(&api))
}

pub async fn execute<A>(api: &A) -> CommandResult
where
    A: StorefrontApi + ?Sized,
{
    match api.fetch_products().await {
        Ok(products) => CommandResult::success_with_data(
            COMMAND,
            format!("{} products available", products.len()),
            ProductListing { count: products.len(), products: &products },
        ),
        Err(ClientError::Rejected { status, message }) => CommandResult::failure(
            COMMAND,
            "catalog_rejected",
            message.unwrap_or_else(|| format!("catalog request returned status {status}")),
            EXIT_REJECTED,
        ),
        Err(error) => {
            tracing::warn!(error = %error, "catalog request failed");
            CommandResult::failure(COMMAND, "unavailable", error.to_string(), EXIT_UNAVAILABLE)
        }
    }
}

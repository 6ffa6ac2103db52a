use std::str::FromStr;

use clap::Args;
use serde::Serialize;
use storefront_client::{
    BlockReason, FormField, LoadOutcome, OrderOutcome, StoreState, StorefrontApi,
};
use storefront_core::config::ConfigOverrides;
use storefront_core::{OrderItem, ProductId};
use thiserror::Error;

use crate::commands::{
    block_on, client_session, CommandResult, EXIT_INVALID_INPUT, EXIT_REJECTED, EXIT_RUNTIME,
    EXIT_UNAVAILABLE,
};

const COMMAND: &str = "order";

#[derive(Clone, Debug, Args)]
pub struct OrderArgs {
    /// Customer first name
    #[arg(long)]
    pub first_name: String,

    /// Customer last name
    #[arg(long)]
    pub last_name: String,

    /// Shipping address
    #[arg(long)]
    pub address: String,

    /// Cart entry as PRODUCT_ID or PRODUCT_ID:QUANTITY; repeat for more lines
    #[arg(long = "item", value_name = "ID[:QTY]")]
    pub items: Vec<ItemSpec>,
}

/// One `--item` argument.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ItemSpec {
    pub product_id: ProductId,
    pub quantity: u32,
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ItemSpecError {
    #[error("invalid product id `{0}` in item spec")]
    ProductId(String),
    #[error("invalid quantity `{0}` in item spec (expected a positive integer)")]
    Quantity(String),
}

impl FromStr for ItemSpec {
    type Err = ItemSpecError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let (id, quantity) = match raw.split_once(':') {
            Some((id, quantity)) => (id.trim(), Some(quantity.trim())),
            None => (raw.trim(), None),
        };

        let product_id = id
            .parse::<u32>()
            .map(ProductId)
            .map_err(|_| ItemSpecError::ProductId(id.to_string()))?;
        let quantity = match quantity {
            None => 1,
            Some(value) => value
                .parse::<u32>()
                .ok()
                .filter(|quantity| *quantity > 0)
                .ok_or_else(|| ItemSpecError::Quantity(value.to_string()))?,
        };

        Ok(Self { product_id, quantity })
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PlacedOrder {
    order_id: String,
    status: &'static str,
    total: String,
    items: Vec<OrderItem>,
}

pub fn run(args: OrderArgs, overrides: ConfigOverrides) -> CommandResult {
    let (api, state) = match client_session(COMMAND, overrides) {
        Ok(session) => session,
        Err(result) => return result,
    };
    block_on(COMMAND, execute(&api, &args, state))
}

/// Loads the catalog into `state`, fills its cart and order form from `args`, then submits
/// once.
pub async fn execute<A>(api: &A, args: &OrderArgs, mut state: StoreState) -> CommandResult
where
    A: StorefrontApi + ?Sized,
{

    if !matches!(state.load_products(api).await, LoadOutcome::Loaded(_)) {
        return CommandResult::failure(
            COMMAND,
            "catalog_unavailable",
            latest_message(&state),
            EXIT_UNAVAILABLE,
        );
    }

    for spec in &args.items {
        let held = state.cart().line(spec.product_id).map_or(0, |line| line.quantity);
        if state.add_to_cart(spec.product_id).is_none() {
            return CommandResult::failure(
                COMMAND,
                "unknown_product",
                format!("product {} is not in the catalog", spec.product_id),
                EXIT_INVALID_INPUT,
            );
        }
        if spec.quantity > 1 {
            state.update_quantity(spec.product_id, i64::from(held) + i64::from(spec.quantity));
        }
    }

    state.set_form_field(FormField::FirstName, args.first_name.as_str());
    state.set_form_field(FormField::LastName, args.last_name.as_str());
    state.set_form_field(FormField::Address, args.address.as_str());

    let total = state.total_display();
    let items: Vec<OrderItem> = state.cart().order_items();

    match state.place_order(api).await {
        OrderOutcome::Placed(confirmation) => CommandResult::success_with_data(
            COMMAND,
            latest_message(&state),
            PlacedOrder {
                order_id: confirmation.order_id.to_string(),
                status: confirmation.status.as_str(),
                total,
                items,
            },
        ),
        OrderOutcome::Rejected { message, .. } => {
            CommandResult::failure(COMMAND, "order_rejected", message, EXIT_REJECTED)
        }
        OrderOutcome::Failed { message } => {
            CommandResult::failure(COMMAND, "unavailable", message, EXIT_UNAVAILABLE)
        }
        OrderOutcome::Blocked(BlockReason::EmptyCart) => CommandResult::failure(
            COMMAND,
            "empty_cart",
            "add at least one --item before placing an order",
            EXIT_INVALID_INPUT,
        ),
        OrderOutcome::Blocked(BlockReason::IncompleteForm) => CommandResult::failure(
            COMMAND,
            "invalid_input",
            latest_message(&state),
            EXIT_INVALID_INPUT,
        ),
        OrderOutcome::Blocked(BlockReason::Busy) => CommandResult::failure(
            COMMAND,
            "busy",
            "an order submission is already in progress",
            EXIT_RUNTIME,
        ),
    }
}

fn latest_message(state: &StoreState) -> String {
    state.notifications().latest().map(|entry| entry.message.clone()).unwrap_or_default()
}

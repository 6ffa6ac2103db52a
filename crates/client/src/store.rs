//! Client-side shop state: loaded products, cart, checkout form, submission flag and
//! pending notifications.
//!
//! Views read through the accessor methods; every user action goes through one of the
//! mutation methods, which also raise the matching notification.

use std::time::Duration;

use storefront_core::config::ClientConfig;
use storefront_core::{OrderConfirmation, OrderRequest, Product, ProductId};
use tracing::{debug, warn};

use crate::api::{ClientError, StorefrontApi};
use crate::cart::{parse_quantity_input, Cart, CartChange};
use crate::form::{FormField, OrderForm};
use crate::notify::{NotificationKind, NotificationQueue};

pub const MSG_PRODUCTS_LOADED: &str = "Products loaded successfully!";
pub const MSG_NO_PRODUCTS: &str = "No products are available!";
pub const MSG_PRODUCTS_FAILED: &str = "Failed to load products";
pub const MSG_FORM_INCOMPLETE: &str = "Please fill in all required fields.";
pub const MSG_ORDER_PLACED: &str = "Order placed successfully! Thank you for your purchase.";
pub const MSG_ORDER_FAILED: &str = "Failed to place order";
pub const MSG_NETWORK_ERROR: &str = "Network error. Please check if the server is running.";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmissionState {
    Idle,
    Submitting,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BlockReason {
    /// A previous submission from this state is still outstanding.
    Busy,
    /// Nothing to order; the request is never sent.
    EmptyCart,
    IncompleteForm,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OrderOutcome {
    Placed(OrderConfirmation),
    Rejected { status: u16, message: String },
    Failed { message: String },
    Blocked(BlockReason),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoadOutcome {
    Loaded(usize),
    Unavailable,
    Failed,
}

#[derive(Debug)]
pub struct StoreState {
    products: Vec<Product>,
    cart: Cart,
    form: OrderForm,
    submission: SubmissionState,
    notifications: NotificationQueue,
}

impl Default for StoreState {
    fn default() -> Self {
        Self::new(NotificationQueue::default())
    }
}

impl StoreState {
    pub fn new(notifications: NotificationQueue) -> Self {
        Self {
            products: Vec::new(),
            cart: Cart::default(),
            form: OrderForm::default(),
            submission: SubmissionState::Idle,
            notifications,
        }
    }

    pub fn with_notification_ttl(ttl: Duration) -> Self {
        Self::new(NotificationQueue::new(ttl))
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::with_notification_ttl(Duration::from_millis(config.notification_ttl_ms))
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn form(&self) -> &OrderForm {
        &self.form
    }

    pub fn submission(&self) -> SubmissionState {
        self.submission
    }

    pub fn is_submitting(&self) -> bool {
        self.submission == SubmissionState::Submitting
    }

    pub fn notifications(&self) -> &NotificationQueue {
        &self.notifications
    }

    pub fn total_display(&self) -> String {
        self.cart.total_display()
    }

    pub async fn load_products<A>(&mut self, api: &A) -> LoadOutcome
    where
        A: StorefrontApi + ?Sized,
    {
        match api.fetch_products().await {
            Ok(products) => {
                let count = products.len();
                self.products = products;
                self.notifications.push(NotificationKind::Success, MSG_PRODUCTS_LOADED);
                LoadOutcome::Loaded(count)
            }
            Err(ClientError::Rejected { status, .. }) => {
                debug!(status, "catalog request rejected");
                self.products.clear();
                self.notifications.push(NotificationKind::Warning, MSG_NO_PRODUCTS);
                LoadOutcome::Unavailable
            }
            Err(error) => {
                warn!(error = %error, "catalog request failed");
                self.notifications.push(NotificationKind::Error, MSG_PRODUCTS_FAILED);
                LoadOutcome::Failed
            }
        }
    }

    /// Adds one unit of a loaded product. Returns `None` for ids not in the product list.
    pub fn add_to_cart(&mut self, product_id: ProductId) -> Option<CartChange> {
        let product = self.products.iter().find(|product| product.id == product_id)?.clone();
        Some(self.add_product(&product))
    }

    pub fn add_product(&mut self, product: &Product) -> CartChange {
        let change = self.cart.add(product);
        let message = match &change {
            CartChange::Incremented { name, .. } => format!("Updated {name} quantity in cart"),
            _ => format!("{} added to cart!", product.name),
        };
        self.notifications.push(NotificationKind::Success, message);
        change
    }

    pub fn update_quantity(&mut self, product_id: ProductId, quantity: i64) -> Option<CartChange> {
        let change = self.cart.update_quantity(product_id, quantity)?;
        if let CartChange::Removed { name } = &change {
            self.notifications.push(NotificationKind::Info, format!("{name} removed from cart"));
        }
        Some(change)
    }

    /// Quantity typed as text; anything non-numeric becomes `0` and removes the line.
    pub fn update_quantity_input(&mut self, product_id: ProductId, raw: &str) -> Option<CartChange> {
        self.update_quantity(product_id, parse_quantity_input(raw))
    }

    pub fn set_form_field(&mut self, field: FormField, value: impl Into<String>) {
        self.form.set(field, value);
    }

    /// First half of an order submission: checks the busy flag, the cart and the form, then
    /// marks the state as submitting and returns the request to send.
    pub fn begin_order(&mut self) -> Result<OrderRequest, BlockReason> {
        if self.is_submitting() {
            return Err(BlockReason::Busy);
        }
        if self.cart.is_empty() {
            return Err(BlockReason::EmptyCart);
        }
        if !self.form.is_complete() {
            self.notifications.push(NotificationKind::Error, MSG_FORM_INCOMPLETE);
            return Err(BlockReason::IncompleteForm);
        }

        self.submission = SubmissionState::Submitting;
        Ok(OrderRequest {
            first_name: self.form.first_name.clone(),
            last_name: self.form.last_name.clone(),
            address: self.form.address.clone(),
            items: self.cart.order_items(),
            total: self.cart.total_display(),
        })
    }

    /// Second half: applies the server's answer. Only acceptance touches cart and form.
    pub fn finish_order(&mut self, result: Result<OrderConfirmation, ClientError>) -> OrderOutcome {
        self.submission = SubmissionState::Idle;

        match result {
            Ok(confirmation) => {
                debug!(order_id = %confirmation.order_id, "order placed");
                self.notifications.push(NotificationKind::Success, MSG_ORDER_PLACED);
                self.cart.clear();
                self.form.reset();
                OrderOutcome::Placed(confirmation)
            }
            Err(ClientError::Rejected { status, message }) => {
                let message = message.unwrap_or_else(|| MSG_ORDER_FAILED.to_string());
                self.notifications.push(NotificationKind::Error, message.clone());
                OrderOutcome::Rejected { status, message }
            }
            Err(error) => {
                warn!(error = %error, "order submission failed");
                self.notifications.push(NotificationKind::Error, MSG_NETWORK_ERROR);
                OrderOutcome::Failed { message: MSG_NETWORK_ERROR.to_string() }
            }
        }
    }

    /// Single attempt: no retry, no timeout, no cancellation.
    pub async fn place_order<A>(&mut self, api: &A) -> OrderOutcome
    where
        A: StorefrontApi + ?Sized,
    {
        let request = match self.begin_order() {
            Ok(request) => request,
            Err(reason) => return OrderOutcome::Blocked(reason),
        };

        let result = api.submit_order(&request).await;
        self.finish_order(result)
    }
}

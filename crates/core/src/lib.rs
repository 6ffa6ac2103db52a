pub mod catalog;
pub mod config;
pub mod domain;
pub mod errors;
pub mod intake;
pub mod pricing;
pub mod wire;

pub use catalog::Catalog;
pub use domain::order::{
    Order, OrderConfirmation, OrderId, OrderItem, OrderLine, OrderPayload, OrderRequest,
    OrderStatus,
};
pub use domain::product::{Product, ProductId};
pub use errors::{CatalogError, InterfaceError, OrderValidationError};
pub use intake::{validate_order, OrderIdGenerator, OrderIntake, ValidatedOrder};
pub use wire::ApiEnvelope;

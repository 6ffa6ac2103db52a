use thiserror::Error;

use crate::domain::product::ProductId;

/// Business validation failures for an incoming order, checked in declaration order.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum OrderValidationError {
    #[error("First name is required")]
    MissingFirstName,
    #[error("Last name is required")]
    MissingLastName,
    #[error("Address is required")]
    MissingAddress,
    #[error("Order must contain at least one item")]
    NoItems,
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("product id must be positive")]
    ZeroProductId,
    #[error("duplicate product id {0}")]
    DuplicateProductId(ProductId),
    #[error("product {0} has an empty name")]
    EmptyName(ProductId),
    #[error("product {0} has a negative price")]
    NegativePrice(ProductId),
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum InterfaceError {
    #[error("bad request: {message}")]
    BadRequest { message: String, correlation_id: String },
    #[error("not found: {message}")]
    NotFound { message: String },
    #[error("internal error: {message}")]
    Internal { message: String, correlation_id: String },
}

impl InterfaceError {
    pub fn not_found() -> Self {
        Self::NotFound { message: "API endpoint not found".to_owned() }
    }

    pub fn internal(message: impl Into<String>, correlation_id: impl Into<String>) -> Self {
        Self::Internal { message: message.into(), correlation_id: correlation_id.into() }
    }

    pub fn status_code(&self) -> u16 {
        match self {
            Self::BadRequest { .. } => 400,
            Self::NotFound { .. } => 404,
            Self::Internal { .. } => 500,
        }
    }

    /// Message safe to hand back to the caller. Internal details never leave the process.
    pub fn user_message(&self) -> &str {
        match self {
            Self::BadRequest { message, .. } | Self::NotFound { message } => message,
            Self::Internal { .. } => "Internal server error",
        }
    }
}

impl OrderValidationError {
    pub fn into_interface(self, correlation_id: impl Into<String>) -> InterfaceError {
        InterfaceError::BadRequest {
            message: self.to_string(),
            correlation_id: correlation_id.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::errors::{InterfaceError, OrderValidationError};

    #[test]
    fn validation_error_maps_to_bad_request_with_field_message() {
        let interface = OrderValidationError::MissingLastName.into_interface("req-1");

        assert!(matches!(
            interface,
            InterfaceError::BadRequest { ref correlation_id, .. } if correlation_id == "req-1"
        ));
        assert_eq!(interface.status_code(), 400);
        assert_eq!(interface.user_message(), "Last name is required");
    }

    #[test]
    fn internal_error_never_leaks_its_message() {
        let interface = InterfaceError::internal("catalog lock poisoned at src/x.rs:10", "req-2");

        assert_eq!(interface.status_code(), 500);
        assert_eq!(interface.user_message(), "Internal server error");
    }

    #[test]
    fn not_found_uses_fixed_message() {
        let interface = InterfaceError::not_found();

        assert_eq!(interface.status_code(), 404);
        assert_eq!(interface.user_message(), "API endpoint not found");
    }
}

//! JSON API routes.
//!
//! - `GET  /api/products`: full catalog, server-defined order
//! - `POST /api/orders`: validate and acknowledge an order (nothing is stored)
//!
//! Every response, success or failure, uses the [`ApiEnvelope`] shape.

use std::any::Any;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use storefront_core::{ApiEnvelope, InterfaceError, OrderConfirmation, OrderPayload};
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::AppState;

pub const ORDER_PLACED_MESSAGE: &str = "Order placed successfully";
pub const PANIC_MESSAGE: &str = "Something went wrong!";

/// Failure leaving the HTTP boundary. Status and body come from the wrapped
/// [`InterfaceError`].
#[derive(Debug)]
pub struct ApiError(pub InterfaceError);

impl From<InterfaceError> for ApiError {
    fn from(value: InterfaceError) -> Self {
        Self(value)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let InterfaceError::Internal { message, correlation_id } = &self.0 {
            error!(
                event_name = "api.internal_error",
                correlation_id = %correlation_id,
                error = %message,
                "request failed with internal error"
            );
        }

        let status =
            StatusCode::from_u16(self.0.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(ApiEnvelope::failure(self.0.user_message()))).into_response()
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/products", get(list_products))
        .route("/api/orders", post(place_order))
        .with_state(state)
}

pub async fn list_products(State(state): State<AppState>) -> Response {
    info!(
        event_name = "catalog.products.listed",
        product_count = state.catalog.len(),
        "fetching products"
    );
    Json(ApiEnvelope::success(state.catalog.list())).into_response()
}

pub async fn place_order(
    State(state): State<AppState>,
    body: Result<Json<OrderPayload>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiEnvelope<OrderConfirmation>>), ApiError> {
    let correlation_id = Uuid::new_v4().simple().to_string();

    let payload = match body {
        Ok(Json(payload)) => payload,
        // A body sent without a JSON content type is read as empty, so the caller gets
        // the first field-level message instead of a media-type error.
        Err(JsonRejection::MissingJsonContentType(_)) => OrderPayload::default(),
        Err(rejection) => {
            warn!(
                event_name = "order.intake.malformed",
                correlation_id = %correlation_id,
                reason = %rejection.body_text(),
                "order payload failed structural checks"
            );
            return Err(ApiError(InterfaceError::BadRequest {
                message: format!("Malformed order payload: {}", rejection.body_text()),
                correlation_id,
            }));
        }
    };

    let order = match state.intake.submit(&payload) {
        Ok(order) => order,
        Err(validation) => {
            warn!(
                event_name = "order.intake.rejected",
                correlation_id = %correlation_id,
                reason = %validation,
                "order payload failed validation"
            );
            return Err(ApiError(validation.into_interface(correlation_id)));
        }
    };

    if !order.total_matches_items() {
        warn!(
            event_name = "order.intake.total_mismatch",
            correlation_id = %correlation_id,
            order_id = %order.id,
            client_total = ?order.total,
            items_total = ?order.items_total(),
            "client-supplied total differs from item sum; keeping client value"
        );
    }

    info!(
        event_name = "order.intake.accepted",
        correlation_id = %correlation_id,
        order_id = %order.id,
        item_count = order.items.len(),
        "\n{}",
        order.summary()
    );

    Ok((
        StatusCode::CREATED,
        Json(ApiEnvelope::success_with_message(ORDER_PLACED_MESSAGE, order.confirmation())),
    ))
}

pub async fn not_found(method: Method, uri: Uri) -> ApiError {
    debug!(event_name = "api.route.unmatched", method = %method, path = %uri.path(), "no route");
    ApiError(InterfaceError::not_found())
}

/// Converts a panicking handler into the generic 500 envelope.
pub fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic payload");
    error!(event_name = "api.handler.panicked", detail = %detail, "request handler panicked");

    (StatusCode::INTERNAL_SERVER_ERROR, Json(ApiEnvelope::failure(PANIC_MESSAGE))).into_response()
}

//! Checkout endpoint error envelope.
//!
//! The checkout endpoints keep the storefront's `{success: false, error}`
//! body contract, with the status code carrying the error class so callers
//! can tell retryable failures from permanent ones.

use salvo::{http::StatusCode, oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use tracing::error;

use emporia_app::domain::checkout::CheckoutError;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CheckoutFailure {
    pub success: bool,
    pub error: String,
}

pub(crate) fn render_failure(res: &mut Response, error: &CheckoutError) {
    let (status, message) = classify(error);

    res.status_code(status);
    res.render(Json(CheckoutFailure {
        success: false,
        error: message,
    }));
}

fn classify(error: &CheckoutError) -> (StatusCode, String) {
    match error {
        CheckoutError::ProductUnavailable { name } => (
            StatusCode::NOT_FOUND,
            format!("Product {name} unavailable"),
        ),
        CheckoutError::InsufficientStock { name, available } => (
            StatusCode::CONFLICT,
            format!("Insufficient stock: {name} (Only {available} left)"),
        ),
        CheckoutError::InvalidQuantity { name } => (
            StatusCode::BAD_REQUEST,
            format!("Invalid quantity for {name}"),
        ),
        CheckoutError::EmptyOrder => (StatusCode::BAD_REQUEST, "Cart is empty".to_string()),
        CheckoutError::AmountOverflow => (
            StatusCode::BAD_REQUEST,
            "Order amount is too large".to_string(),
        ),
        CheckoutError::InvalidSignature => (
            StatusCode::UNAUTHORIZED,
            "Invalid Payment Signature".to_string(),
        ),
        CheckoutError::Gateway(source) => {
            error!("payment gateway call failed: {source}");

            (
                StatusCode::BAD_GATEWAY,
                "Payment gateway error".to_string(),
            )
        }
        CheckoutError::Products(source) => {
            error!("catalog read failed during checkout: {source}");

            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Order could not be processed".to_string(),
            )
        }
        CheckoutError::Orders(source) => {
            error!("order write failed: {source}");

            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Order could not be saved".to_string(),
            )
        }
    }
}

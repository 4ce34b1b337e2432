//! Verify Payment Handler
//!
//! The only integrity check between an attacker-supplied "payment succeeded"
//! claim and the order write: the callback signature must verify before
//! anything is persisted.

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use emporia_app::domain::checkout::PaymentConfirmation;

use crate::{
    checkout::{
        errors::{CheckoutFailure, render_failure},
        requests::{CheckoutItemRequest, DeliveryDetailsRequest},
    },
    state::State,
};

/// Order payload re-submitted with the payment callback. Items carry no
/// prices; the order writer re-prices them at write time.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct OrderDetailsRequest {
    pub items: Vec<CheckoutItemRequest>,
    pub delivery_details: DeliveryDetailsRequest,
}

/// Verify Payment Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct VerifyPaymentRequest {
    pub razorpay_order_id: String,
    pub razorpay_payment_id: String,
    pub razorpay_signature: String,

    #[serde(rename = "orderDetails")]
    pub order_details: OrderDetailsRequest,
}

impl From<VerifyPaymentRequest> for PaymentConfirmation {
    fn from(request: VerifyPaymentRequest) -> Self {
        PaymentConfirmation {
            gateway_order_id: request.razorpay_order_id,
            payment_id: request.razorpay_payment_id,
            signature: request.razorpay_signature,
            delivery: request.order_details.delivery_details.into(),
            lines: request
                .order_details
                .items
                .into_iter()
                .map(Into::into)
                .collect(),
        }
    }
}

/// Verify Payment Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct VerifyPaymentResponse {
    pub success: bool,

    /// Gateway order handle, which is also the stored order's key
    pub order_id: String,
}

/// Verify Payment Handler
#[endpoint(
    tags("checkout"),
    summary = "Verify Payment",
    responses(
        (status_code = StatusCode::OK, description = "Order written and stock decremented"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Invalid payment signature"),
        (status_code = StatusCode::CONFLICT, description = "Insufficient stock"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<VerifyPaymentRequest>,
    depot: &mut Depot,
    res: &mut Response,
) {
    let Ok(state) = depot.obtain::<Arc<State>>() else {
        res.status_code(StatusCode::INTERNAL_SERVER_ERROR);
        res.render(Json(CheckoutFailure {
            success: false,
            error: "Server misconfigured".to_string(),
        }));

        return;
    };

    match state
        .app
        .checkout
        .confirm_payment(json.into_inner().into())
        .await
    {
        Ok(placed) => res.render(Json(VerifyPaymentResponse {
            success: true,
            order_id: placed.order.gateway_order_id,
        })),
        Err(error) => render_failure(res, &error),
    }
}

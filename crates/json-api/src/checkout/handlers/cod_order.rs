//! Cash-on-Delivery Order Handler
//!
//! Places a COD order directly: no gateway round-trip, order starts Pending
//! with the COD surcharge applied, same atomic write and stock decrement.

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use emporia_app::domain::{checkout::QuoteRequest, orders::records::PaymentMethod};

use crate::{
    checkout::{
        errors::{CheckoutFailure, render_failure},
        requests::{CheckoutItemRequest, DeliveryDetailsRequest},
    },
    state::State,
};

/// COD Order Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CodOrderRequest {
    pub items: Vec<CheckoutItemRequest>,
    pub delivery_details: DeliveryDetailsRequest,
}

impl From<CodOrderRequest> for QuoteRequest {
    fn from(request: CodOrderRequest) -> Self {
        QuoteRequest {
            lines: request.items.into_iter().map(Into::into).collect(),
            delivery: request.delivery_details.into(),
            payment_method: PaymentMethod::Cod,
        }
    }
}

/// COD Order Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CodOrderResponse {
    pub success: bool,

    /// Stored order key
    pub order_id: String,
}

/// COD Order Handler
#[endpoint(
    tags("checkout"),
    summary = "Place COD Order",
    responses(
        (status_code = StatusCode::OK, description = "Order written and stock decremented"),
        (status_code = StatusCode::NOT_FOUND, description = "A cart product is unavailable"),
        (status_code = StatusCode::CONFLICT, description = "Insufficient stock"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CodOrderRequest>,
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
        .place_cod_order(json.into_inner().into())
        .await
    {
        Ok(placed) => res.render(Json(CodOrderResponse {
            success: true,
            order_id: placed.order.gateway_order_id,
        })),
        Err(error) => render_failure(res, &error),
    }
}

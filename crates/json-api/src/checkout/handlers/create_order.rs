//! Create Order Handler
//!
//! Prices the submitted cart from the catalog and opens a gateway order for
//! the authoritative total. Nothing is persisted here.

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use emporia_app::domain::checkout::{Quote, QuoteRequest};

use crate::{
    checkout::{
        errors::{CheckoutFailure, render_failure},
        requests::{
            CheckoutItemRequest, DeliveryDetailsRequest, PaymentMethodRequest,
            PricedItemResponse,
        },
    },
    state::State,
};

/// Create Order Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreateOrderRequest {
    pub items: Vec<CheckoutItemRequest>,
    pub delivery_details: DeliveryDetailsRequest,
    #[serde(default)]
    pub payment_method: PaymentMethodRequest,
}

impl From<CreateOrderRequest> for QuoteRequest {
    fn from(request: CreateOrderRequest) -> Self {
        QuoteRequest {
            lines: request.items.into_iter().map(Into::into).collect(),
            delivery: request.delivery_details.into(),
            payment_method: request.payment_method.into(),
        }
    }
}

/// Create Order Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreateOrderResponse {
    pub success: bool,

    /// Gateway order handle to collect payment against
    pub order_id: String,

    /// Authoritative amount in minor currency units
    pub amount: u64,

    pub currency: String,

    /// Server-priced line items
    pub items: Vec<PricedItemResponse>,
}

impl From<Quote> for CreateOrderResponse {
    fn from(quote: Quote) -> Self {
        CreateOrderResponse {
            success: true,
            order_id: quote.gateway_order_id,
            amount: quote.amount,
            currency: quote.currency,
            items: quote.lines.into_iter().map(Into::into).collect(),
        }
    }
}

/// Create Order Handler
#[endpoint(
    tags("checkout"),
    summary = "Create Order",
    responses(
        (status_code = StatusCode::OK, description = "Server-priced quote with gateway order handle"),
        (status_code = StatusCode::NOT_FOUND, description = "A cart product is unavailable"),
        (status_code = StatusCode::CONFLICT, description = "Insufficient stock"),
        (status_code = StatusCode::BAD_GATEWAY, description = "Payment gateway error"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateOrderRequest>,
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

    match state.app.checkout.quote(json.into_inner().into()).await {
        Ok(quote) => res.render(Json(CreateOrderResponse::from(quote))),
        Err(error) => render_failure(res, &error),
    }
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;
    use uuid::Uuid;

    use emporia_app::domain::{
        checkout::{CheckoutError, MockCheckoutService, pricing::{OrderTotals, PricedLine}},
        orders::records::PaymentMethod,
    };

    use crate::test_helpers::checkout_service;

    use super::*;

    fn make_service(checkout: MockCheckoutService) -> Service {
        checkout_service(checkout, Router::with_path("createOrder").post(handler))
    }

    fn quote(product: Uuid) -> Quote {
        Quote {
            gateway_order_id: "order_abc".to_string(),
            amount: 100_000,
            currency: "INR".to_string(),
            totals: OrderTotals {
                subtotal: 100_000,
                shipping_fee: 0,
                cod_fee: 0,
                total: 100_000,
            },
            lines: vec![PricedLine {
                product: product.into(),
                name: "Katan Silk".to_string(),
                unit_price: 50_000,
                quantity: 2,
                image_url: None,
                selected_options: vec![],
            }],
        }
    }

    #[tokio::test]
    async fn test_create_order_returns_server_priced_quote() -> TestResult {
        let product = Uuid::now_v7();

        let mut checkout = MockCheckoutService::new();

        checkout
            .expect_quote()
            .once()
            .withf(move |request| {
                request.lines.len() == 1
                    && request.lines[0].quantity == 2
                    && request.payment_method == PaymentMethod::Online
            })
            .return_once(move |_| Ok(quote(product)));

        checkout.expect_confirm_payment().never();
        checkout.expect_place_cod_order().never();

        let mut res = TestClient::post("http://example.com/createOrder")
            .json(&json!({
                "items": [{ "id": product, "quantity": 2 }],
                "deliveryDetails": {
                    "email": "asha@example.com",
                    "firstName": "Asha",
                    "address": "12 Dashashwamedh Road",
                    "city": "Varanasi",
                    "state": "Uttar Pradesh",
                    "pincode": "221001"
                }
            }))
            .send(&make_service(checkout))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: CreateOrderResponse = res.take_json().await?;

        assert!(body.success);
        assert_eq!(body.order_id, "order_abc");
        assert_eq!(body.amount, 100_000);
        assert_eq!(body.currency, "INR");
        assert_eq!(body.items.len(), 1);
        assert_eq!(body.items[0].price, 50_000);

        Ok(())
    }

    #[tokio::test]
    async fn test_insufficient_stock_returns_failure_envelope() -> TestResult {
        let mut checkout = MockCheckoutService::new();

        checkout.expect_quote().once().return_once(|_| {
            Err(CheckoutError::InsufficientStock {
                name: "Katan Silk".to_string(),
                available: 1,
            })
        });

        checkout.expect_confirm_payment().never();
        checkout.expect_place_cod_order().never();

        let mut res = TestClient::post("http://example.com/createOrder")
            .json(&json!({
                "items": [{ "id": Uuid::now_v7(), "quantity": 2 }],
                "deliveryDetails": {
                    "email": "asha@example.com",
                    "firstName": "Asha",
                    "address": "12 Dashashwamedh Road",
                    "city": "Varanasi",
                    "state": "Uttar Pradesh",
                    "pincode": "221001"
                }
            }))
            .send(&make_service(checkout))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));

        let body: CheckoutFailure = res.take_json().await?;

        assert!(!body.success);
        assert!(
            body.error.contains("Insufficient stock"),
            "error was {:?}",
            body.error
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_unavailable_product_returns_404_envelope() -> TestResult {
        let mut checkout = MockCheckoutService::new();

        checkout.expect_quote().once().return_once(|_| {
            Err(CheckoutError::ProductUnavailable {
                name: "Katan Silk".to_string(),
            })
        });

        checkout.expect_confirm_payment().never();
        checkout.expect_place_cod_order().never();

        let mut res = TestClient::post("http://example.com/createOrder")
            .json(&json!({
                "items": [{ "id": Uuid::now_v7(), "quantity": 1 }],
                "deliveryDetails": {
                    "email": "asha@example.com",
                    "firstName": "Asha",
                    "address": "12 Dashashwamedh Road",
                    "city": "Varanasi",
                    "state": "Uttar Pradesh",
                    "pincode": "221001"
                }
            }))
            .send(&make_service(checkout))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        let body: CheckoutFailure = res.take_json().await?;

        assert!(body.error.contains("unavailable"), "error was {:?}", body.error);

        Ok(())
    }
}

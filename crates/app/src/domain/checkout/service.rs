//! Checkout service.
//!
//! The quote path prices a cart from the catalog and opens a gateway order
//! for the grand total; the confirmation path verifies the gateway's callback
//! signature and hands the order to the order writer. Nothing persists until
//! the signature has been verified.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::{
    domain::{
        checkout::{
            errors::CheckoutError,
            pricing::{self, OrderTotals, PricedLine},
        },
        orders::{
            OrdersService,
            data::{OrderLine, PlaceOrder, PlacedOrder},
            records::{DeliveryDetails, PaymentMethod},
        },
        products::{ProductsService, ProductsServiceError},
    },
    payments::{GatewaySecret, PaymentGateway, signature},
};

/// A cart submitted for checkout. Lines carry no prices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteRequest {
    pub lines: Vec<OrderLine>,
    pub delivery: DeliveryDetails,
    pub payment_method: PaymentMethod,
}

/// Server-priced quote with an open gateway order handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quote {
    pub gateway_order_id: String,
    pub amount: u64,
    pub currency: String,
    pub totals: OrderTotals,
    pub lines: Vec<PricedLine>,
}

/// Gateway payment callback to verify and persist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentConfirmation {
    pub gateway_order_id: String,
    pub payment_id: String,
    pub signature: String,
    pub delivery: DeliveryDetails,
    pub lines: Vec<OrderLine>,
}

#[automock]
#[async_trait]
pub trait CheckoutService: Send + Sync {
    /// Price the cart from the catalog and open a gateway order for the
    /// grand total. Any unavailable or under-stocked line fails the whole
    /// request; nothing is persisted.
    async fn quote(&self, request: QuoteRequest) -> Result<Quote, CheckoutError>;

    /// Verify the callback signature, then atomically write the order and
    /// decrement stock. Replays of the same gateway handle return the prior
    /// order.
    async fn confirm_payment(
        &self,
        confirmation: PaymentConfirmation,
    ) -> Result<PlacedOrder, CheckoutError>;

    /// Place a cash-on-delivery order directly, without a gateway round-trip.
    async fn place_cod_order(&self, request: QuoteRequest)
    -> Result<PlacedOrder, CheckoutError>;
}

pub struct GatewayCheckoutService {
    products: Arc<dyn ProductsService>,
    orders: Arc<dyn OrdersService>,
    gateway: Arc<dyn PaymentGateway>,
    key_secret: GatewaySecret,
}

impl GatewayCheckoutService {
    #[must_use]
    pub fn new(
        products: Arc<dyn ProductsService>,
        orders: Arc<dyn OrdersService>,
        gateway: Arc<dyn PaymentGateway>,
        key_secret: GatewaySecret,
    ) -> Self {
        Self {
            products,
            orders,
            gateway,
            key_secret,
        }
    }

    async fn price_lines(&self, lines: &[OrderLine]) -> Result<Vec<PricedLine>, CheckoutError> {
        if lines.is_empty() {
            return Err(CheckoutError::EmptyOrder);
        }

        let mut priced = Vec::with_capacity(lines.len());

        for line in lines {
            let product = match self.products.get_product(line.product).await {
                Ok(product) => product,
                Err(ProductsServiceError::NotFound) => {
                    return Err(CheckoutError::ProductUnavailable {
                        name: line.product.to_string(),
                    });
                }
                Err(error) => return Err(CheckoutError::Products(error)),
            };

            priced.push(pricing::price_line(
                &product,
                line.quantity,
                &line.selected_options,
            )?);
        }

        Ok(priced)
    }
}

impl std::fmt::Debug for GatewayCheckoutService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayCheckoutService").finish_non_exhaustive()
    }
}

#[async_trait]
impl CheckoutService for GatewayCheckoutService {
    async fn quote(&self, request: QuoteRequest) -> Result<Quote, CheckoutError> {
        let priced = self.price_lines(&request.lines).await?;

        let subtotal = pricing::subtotal(&priced)?;
        let totals = pricing::order_totals(subtotal, request.payment_method)?;

        let receipt = format!("receipt_{}", Uuid::now_v7().simple());

        let gateway_order = self
            .gateway
            .create_order(
                totals.total,
                pricing::CURRENCY,
                &receipt,
                &request.delivery.email,
            )
            .await?;

        Ok(Quote {
            gateway_order_id: gateway_order.id,
            amount: gateway_order.amount,
            currency: gateway_order.currency,
            totals,
            lines: priced,
        })
    }

    async fn confirm_payment(
        &self,
        confirmation: PaymentConfirmation,
    ) -> Result<PlacedOrder, CheckoutError> {
        let valid = signature::verify_payment_signature(
            &self.key_secret,
            &confirmation.gateway_order_id,
            &confirmation.payment_id,
            &confirmation.signature,
        );

        if !valid {
            return Err(CheckoutError::InvalidSignature);
        }

        let placed = self
            .orders
            .place_order(PlaceOrder {
                gateway_order_id: confirmation.gateway_order_id,
                payment_id: Some(confirmation.payment_id),
                payment_method: PaymentMethod::Online,
                delivery: confirmation.delivery,
                lines: confirmation.lines,
            })
            .await?;

        Ok(placed)
    }

    async fn place_cod_order(
        &self,
        request: QuoteRequest,
    ) -> Result<PlacedOrder, CheckoutError> {
        let gateway_order_id = format!("cod_{}", Uuid::now_v7().simple());

        let placed = self
            .orders
            .place_order(PlaceOrder {
                gateway_order_id,
                payment_id: None,
                payment_method: PaymentMethod::Cod,
                delivery: request.delivery,
                lines: request.lines,
            })
            .await?;

        Ok(placed)
    }
}

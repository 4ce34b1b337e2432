//! Orders Data

use crate::domain::{
    orders::records::{DeliveryDetails, OrderItemRecord, OrderRecord, PaymentMethod},
    products::records::ProductUuid,
};

/// One requested line of an order, before server-side pricing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderLine {
    pub product: ProductUuid,
    pub quantity: u64,
    pub selected_options: Vec<String>,
}

/// Place Order Data
///
/// Lines carry no prices; every amount is recomputed from the catalog inside
/// the order transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceOrder {
    pub gateway_order_id: String,
    pub payment_id: Option<String>,
    pub payment_method: PaymentMethod,
    pub delivery: DeliveryDetails,
    pub lines: Vec<OrderLine>,
}

/// Order with its line items.
#[derive(Debug, Clone)]
pub struct OrderWithItems {
    pub order: OrderRecord,
    pub items: Vec<OrderItemRecord>,
}

/// Result of placing an order.
///
/// `already_placed` marks an idempotent replay: the gateway order handle was
/// seen before and the prior order is returned untouched.
#[derive(Debug, Clone)]
pub struct PlacedOrder {
    pub order: OrderRecord,
    pub items: Vec<OrderItemRecord>,
    pub already_placed: bool,
}

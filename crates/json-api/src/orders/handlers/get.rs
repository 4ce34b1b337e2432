//! Get Order Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use emporia_app::domain::orders::records::{OrderItemRecord, OrderRecord};

use crate::{extensions::*, orders::errors::into_status_error, state::State};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderItemResponse {
    pub uuid: Uuid,
    pub product_uuid: Uuid,

    /// Name snapshot taken at order time
    pub name: String,

    /// Unit price snapshot in minor currency units
    pub unit_price: u64,

    pub quantity: u64,
    pub image_url: Option<String>,
    pub selected_options: Vec<String>,
}

impl From<OrderItemRecord> for OrderItemResponse {
    fn from(item: OrderItemRecord) -> Self {
        OrderItemResponse {
            uuid: item.uuid.into(),
            product_uuid: item.product_uuid.into(),
            name: item.name,
            unit_price: item.unit_price,
            quantity: item.quantity,
            image_url: item.image_url,
            selected_options: item.selected_options,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct DeliveryResponse {
    pub email: String,
    pub first_name: String,
    pub last_name: Option<String>,
    pub address: String,
    pub apartment: Option<String>,
    pub city: String,
    pub state: String,
    pub pincode: String,
    pub phone: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderResponse {
    /// Gateway order handle, also the stored order's key
    pub order_id: String,

    pub payment_id: Option<String>,
    pub status: String,
    pub payment_status: String,
    pub payment_method: String,
    pub delivery: DeliveryResponse,

    /// All amounts in minor currency units
    pub subtotal: u64,
    pub shipping_fee: u64,
    pub cod_fee: u64,
    pub total: u64,

    pub email_sent: bool,
    pub created_at: String,

    /// Absent on the list endpoint
    #[serde(default)]
    pub items: Vec<OrderItemResponse>,
}

impl OrderResponse {
    pub(crate) fn from_record(order: OrderRecord, items: Vec<OrderItemRecord>) -> Self {
        OrderResponse {
            order_id: order.gateway_order_id,
            payment_id: order.payment_id,
            status: order.status.as_str().to_string(),
            payment_status: order.payment_status.as_str().to_string(),
            payment_method: order.payment_method.as_str().to_string(),
            delivery: DeliveryResponse {
                email: order.delivery.email,
                first_name: order.delivery.first_name,
                last_name: order.delivery.last_name,
                address: order.delivery.address,
                apartment: order.delivery.apartment,
                city: order.delivery.city,
                state: order.delivery.state,
                pincode: order.delivery.pincode,
                phone: order.delivery.phone,
            },
            subtotal: order.subtotal,
            shipping_fee: order.shipping_fee,
            cod_fee: order.cod_fee,
            total: order.total,
            email_sent: order.email_sent,
            created_at: order.created_at.to_string(),
            items: items.into_iter().map(Into::into).collect(),
        }
    }
}

/// Get Order Handler
///
/// Returns an order with its line items.
#[endpoint(tags("orders"), summary = "Get Order", security(("bearer_auth" = [])))]
pub(crate) async fn handler(
    order: PathParam<String>,
    depot: &mut Depot,
) -> Result<Json<OrderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let order = state
        .app
        .orders
        .get_order(&order.into_inner())
        .await
        .map_err(into_status_error)?;

    Ok(Json(OrderResponse::from_record(order.order, order.items)))
}

//! Checkout wire payloads.
//!
//! Field names match the storefront's checkout client: camelCase for cart
//! and delivery fields, gateway-prefixed snake case for callback fields.

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use emporia_app::domain::{
    checkout::pricing::PricedLine,
    orders::{
        data::OrderLine,
        records::{DeliveryDetails, PaymentMethod},
    },
};

/// One cart line as submitted by the storefront. Prices are never read from
/// the client.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CheckoutItemRequest {
    pub id: Uuid,
    pub quantity: u64,
    #[serde(default)]
    pub selected_options: Vec<String>,
}

impl From<CheckoutItemRequest> for OrderLine {
    fn from(request: CheckoutItemRequest) -> Self {
        OrderLine {
            product: request.id.into(),
            quantity: request.quantity,
            selected_options: request.selected_options,
        }
    }
}

/// Delivery address fields.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct DeliveryDetailsRequest {
    pub email: String,
    pub first_name: String,
    #[serde(default)]
    pub last_name: Option<String>,
    pub address: String,
    #[serde(default)]
    pub apartment: Option<String>,
    pub city: String,
    pub state: String,
    pub pincode: String,
    #[serde(default)]
    pub phone: Option<String>,
}

impl From<DeliveryDetailsRequest> for DeliveryDetails {
    fn from(request: DeliveryDetailsRequest) -> Self {
        DeliveryDetails {
            email: request.email,
            first_name: request.first_name,
            last_name: request.last_name,
            address: request.address,
            apartment: request.apartment,
            city: request.city,
            state: request.state,
            pincode: request.pincode,
            phone: request.phone,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, ToSchema)]
pub(crate) enum PaymentMethodRequest {
    #[default]
    #[serde(rename = "ONLINE")]
    Online,

    #[serde(rename = "COD")]
    Cod,
}

impl From<PaymentMethodRequest> for PaymentMethod {
    fn from(request: PaymentMethodRequest) -> Self {
        match request {
            PaymentMethodRequest::Online => PaymentMethod::Online,
            PaymentMethodRequest::Cod => PaymentMethod::Cod,
        }
    }
}

/// A server-priced line echoed back to the storefront.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PricedItemResponse {
    pub product_id: Uuid,
    pub name: String,
    /// Unit price in minor currency units
    pub price: u64,
    pub quantity: u64,
    pub image: String,
    pub selected_options: Vec<String>,
}

impl From<PricedLine> for PricedItemResponse {
    fn from(line: PricedLine) -> Self {
        PricedItemResponse {
            product_id: line.product.into(),
            name: line.name,
            price: line.unit_price,
            quantity: line.quantity,
            image: line.image_url.unwrap_or_default(),
            selected_options: line.selected_options,
        }
    }
}

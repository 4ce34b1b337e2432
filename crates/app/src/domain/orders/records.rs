//! Order Records

use std::str::FromStr;

use jiff::Timestamp;
use thiserror::Error;

use crate::{domain::products::records::ProductUuid, uuids::TypedUuid};

/// Order Item UUID
pub type OrderItemUuid = TypedUuid<OrderItemRecord>;

/// Order Record
///
/// Keyed by the payment gateway's order handle. Amounts are minor currency
/// units. The delivery snapshot and all amounts are immutable after creation;
/// only `email_sent` (and administrative status changes) may flip later.
#[derive(Debug, Clone)]
pub struct OrderRecord {
    pub gateway_order_id: String,
    pub payment_id: Option<String>,
    pub status: OrderStatus,
    pub payment_status: PaymentStatus,
    pub payment_method: PaymentMethod,
    pub delivery: DeliveryDetails,
    pub subtotal: u64,
    pub shipping_fee: u64,
    pub cod_fee: u64,
    pub total: u64,
    pub email_sent: bool,
    pub created_at: Timestamp,
}

/// Order Line Item Record
///
/// Name, unit price, selected options, and image are snapshots taken at
/// order-write time from the then-current catalog row.
#[derive(Debug, Clone)]
pub struct OrderItemRecord {
    pub uuid: OrderItemUuid,
    pub gateway_order_id: String,
    pub product_uuid: ProductUuid,
    pub name: String,
    pub unit_price: u64,
    pub quantity: u64,
    pub image_url: Option<String>,
    pub selected_options: Vec<String>,
}

/// Delivery address snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DeliveryDetails {
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

#[derive(Debug, Error)]
#[error("unrecognized value: {0}")]
pub struct UnknownValue(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderStatus {
    Pending,
    Paid,
}

impl OrderStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Paid => "Paid",
        }
    }
}

impl FromStr for OrderStatus {
    type Err = UnknownValue;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "Pending" => Ok(Self::Pending),
            "Paid" => Ok(Self::Paid),
            other => Err(UnknownValue(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentStatus {
    Pending,
    Paid,
}

impl PaymentStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Paid => "Paid",
        }
    }
}

impl FromStr for PaymentStatus {
    type Err = UnknownValue;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "Pending" => Ok(Self::Pending),
            "Paid" => Ok(Self::Paid),
            other => Err(UnknownValue(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentMethod {
    Online,
    Cod,
}

impl PaymentMethod {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Online => "ONLINE",
            Self::Cod => "COD",
        }
    }
}

impl FromStr for PaymentMethod {
    type Err = UnknownValue;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "ONLINE" => Ok(Self::Online),
            "COD" => Ok(Self::Cod),
            other => Err(UnknownValue(other.to_string())),
        }
    }
}

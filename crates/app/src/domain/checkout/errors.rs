//! Checkout errors.

use thiserror::Error;

use crate::{
    domain::{
        checkout::pricing::PricingError,
        orders::errors::OrdersServiceError,
        products::errors::ProductsServiceError,
    },
    payments::GatewayError,
};

#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error("product {name} unavailable")]
    ProductUnavailable { name: String },

    #[error("insufficient stock: {name} ({available} left)")]
    InsufficientStock { name: String, available: u64 },

    #[error("invalid quantity for {name}")]
    InvalidQuantity { name: String },

    #[error("order has no items")]
    EmptyOrder,

    #[error("order amount overflow")]
    AmountOverflow,

    #[error("invalid payment signature")]
    InvalidSignature,

    #[error("payment gateway error")]
    Gateway(#[from] GatewayError),

    #[error("catalog error")]
    Products(#[source] ProductsServiceError),

    #[error("order storage error")]
    Orders(#[source] OrdersServiceError),
}

impl From<PricingError> for CheckoutError {
    fn from(error: PricingError) -> Self {
        match error {
            PricingError::InvalidQuantity { name } => Self::InvalidQuantity { name },
            PricingError::InsufficientStock { name, available } => {
                Self::InsufficientStock { name, available }
            }
            PricingError::AmountOverflow => Self::AmountOverflow,
        }
    }
}

impl From<OrdersServiceError> for CheckoutError {
    fn from(error: OrdersServiceError) -> Self {
        match error {
            OrdersServiceError::ProductUnavailable { name } => Self::ProductUnavailable { name },
            OrdersServiceError::InsufficientStock { name, available } => {
                Self::InsufficientStock { name, available }
            }
            OrdersServiceError::InvalidQuantity { name } => Self::InvalidQuantity { name },
            OrdersServiceError::EmptyOrder => Self::EmptyOrder,
            OrdersServiceError::AmountOverflow => Self::AmountOverflow,
            other => Self::Orders(other),
        }
    }
}

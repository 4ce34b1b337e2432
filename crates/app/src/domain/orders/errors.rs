//! Orders service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OrdersServiceError {
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

    #[error("order not found")]
    NotFound,

    #[error("related resource not found")]
    InvalidReference,

    #[error("missing required data")]
    MissingRequiredData,

    #[error("invalid data")]
    InvalidData,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<crate::domain::checkout::pricing::PricingError> for OrdersServiceError {
    fn from(error: crate::domain::checkout::pricing::PricingError) -> Self {
        use crate::domain::checkout::pricing::PricingError;

        match error {
            PricingError::InvalidQuantity { name } => Self::InvalidQuantity { name },
            PricingError::InsufficientStock { name, available } => {
                Self::InsufficientStock { name, available }
            }
            PricingError::AmountOverflow => Self::AmountOverflow,
        }
    }
}

impl From<Error> for OrdersServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::ForeignKeyViolation) => Self::InvalidReference,
            Some(ErrorKind::NotNullViolation) => Self::MissingRequiredData,
            Some(ErrorKind::UniqueViolation | ErrorKind::CheckViolation) => Self::InvalidData,
            Some(ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}

//! Server-side pricing.
//!
//! Pure functions over catalog rows, shared by the quote path and the order
//! transaction so both always agree. Client-supplied prices never enter here.

use thiserror::Error;

use crate::domain::{
    orders::records::PaymentMethod,
    products::records::{ProductRecord, ProductUuid},
};

/// Settlement currency for every gateway order.
pub const CURRENCY: &str = "INR";

/// Orders strictly above this subtotal ship free (minor units).
pub const FREE_SHIPPING_THRESHOLD: u64 = 49_900;

/// Flat shipping fee below the free-shipping threshold (minor units).
pub const SHIPPING_FEE: u64 = 9_900;

/// Cash-on-delivery surcharge (minor units).
pub const COD_FEE: u64 = 4_900;

/// One order line after pricing against the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PricedLine {
    pub product: ProductUuid,
    pub name: String,
    pub unit_price: u64,
    pub quantity: u64,
    pub image_url: Option<String>,
    pub selected_options: Vec<String>,
}

/// Order amounts, all minor units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderTotals {
    pub subtotal: u64,
    pub shipping_fee: u64,
    pub cod_fee: u64,
    pub total: u64,
}

#[derive(Debug, Error)]
pub enum PricingError {
    #[error("invalid quantity for {name}")]
    InvalidQuantity { name: String },

    #[error("insufficient stock: {name} ({available} left)")]
    InsufficientStock { name: String, available: u64 },

    #[error("order amount overflow")]
    AmountOverflow,
}

/// Price one line against the current catalog row.
///
/// The unit price is the base price plus the surcharge of every selected
/// option the product actually offers; option names the product does not
/// carry are dropped from the snapshot rather than rejected.
///
/// # Errors
///
/// Fails when the quantity is zero, exceeds the available stock, or the
/// amounts overflow.
pub fn price_line(
    product: &ProductRecord,
    quantity: u64,
    selected_options: &[String],
) -> Result<PricedLine, PricingError> {
    if quantity == 0 {
        return Err(PricingError::InvalidQuantity {
            name: product.name.clone(),
        });
    }

    if product.stock < quantity {
        return Err(PricingError::InsufficientStock {
            name: product.name.clone(),
            available: product.stock,
        });
    }

    let mut unit_price = product.price;
    let mut kept_options = Vec::new();

    for option in selected_options {
        if let Some(surcharge) = product.options.get(option) {
            unit_price = unit_price
                .checked_add(*surcharge)
                .ok_or(PricingError::AmountOverflow)?;

            kept_options.push(option.clone());
        }
    }

    Ok(PricedLine {
        product: product.uuid,
        name: product.name.clone(),
        unit_price,
        quantity,
        image_url: product.featured_image_url.clone(),
        selected_options: kept_options,
    })
}

/// Sum `unit_price × quantity` across all lines.
///
/// # Errors
///
/// Fails when the subtotal overflows.
pub fn subtotal(lines: &[PricedLine]) -> Result<u64, PricingError> {
    lines.iter().try_fold(0_u64, |acc, line| {
        line.unit_price
            .checked_mul(line.quantity)
            .and_then(|line_total| acc.checked_add(line_total))
            .ok_or(PricingError::AmountOverflow)
    })
}

/// Derive shipping and surcharge amounts from the subtotal and payment method.
///
/// # Errors
///
/// Fails when the grand total overflows.
pub fn order_totals(subtotal: u64, method: PaymentMethod) -> Result<OrderTotals, PricingError> {
    let shipping_fee = if subtotal > FREE_SHIPPING_THRESHOLD {
        0
    } else {
        SHIPPING_FEE
    };

    let cod_fee = match method {
        PaymentMethod::Cod => COD_FEE,
        PaymentMethod::Online => 0,
    };

    let total = subtotal
        .checked_add(shipping_fee)
        .and_then(|t| t.checked_add(cod_fee))
        .ok_or(PricingError::AmountOverflow)?;

    Ok(OrderTotals {
        subtotal,
        shipping_fee,
        cod_fee,
        total,
    })
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use jiff::Timestamp;

    use super::*;

    fn product(price: u64, stock: u64, options: &[(&str, u64)]) -> ProductRecord {
        ProductRecord {
            uuid: ProductUuid::new(),
            name: "Katan Silk".to_string(),
            description: None,
            category: None,
            price,
            stock,
            featured_image_url: Some("https://img.example/katan.jpg".to_string()),
            gallery_image_urls: vec![],
            detail_image_urls: vec![],
            options: options
                .iter()
                .map(|(name, surcharge)| ((*name).to_string(), *surcharge))
                .collect::<BTreeMap<_, _>>(),
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
            deleted_at: None,
        }
    }

    #[test]
    fn unit_price_is_base_price_without_options() {
        let line = price_line(&product(50_000, 5, &[]), 2, &[]).unwrap();

        assert_eq!(line.unit_price, 50_000);
        assert_eq!(line.quantity, 2);
    }

    #[test]
    fn selected_options_add_their_surcharges() {
        let p = product(50_000, 5, &[("fallPico", 15_000), ("tassels", 25_000)]);

        let line = price_line(
            &p,
            1,
            &["fallPico".to_string(), "tassels".to_string()],
        )
        .unwrap();

        assert_eq!(line.unit_price, 90_000);
        assert_eq!(line.selected_options, vec!["fallPico", "tassels"]);
    }

    #[test]
    fn unknown_options_are_ignored() {
        let p = product(50_000, 5, &[("fallPico", 15_000)]);

        let line = price_line(&p, 1, &["blouseStitching".to_string()]).unwrap();

        assert_eq!(line.unit_price, 50_000);
        assert!(line.selected_options.is_empty(), "unknown option must be dropped");
    }

    #[test]
    fn quantity_above_stock_is_rejected() {
        let result = price_line(&product(50_000, 1, &[]), 2, &[]);

        assert!(
            matches!(
                result,
                Err(PricingError::InsufficientStock { available: 1, .. })
            ),
            "expected InsufficientStock, got {result:?}"
        );
    }

    #[test]
    fn zero_quantity_is_rejected() {
        let result = price_line(&product(50_000, 5, &[]), 0, &[]);

        assert!(
            matches!(result, Err(PricingError::InvalidQuantity { .. })),
            "expected InvalidQuantity, got {result:?}"
        );
    }

    #[test]
    fn subtotal_sums_across_lines() {
        let p = product(50_000, 5, &[]);
        let lines = vec![
            price_line(&p, 2, &[]).unwrap(),
            price_line(&product(10_000, 5, &[]), 3, &[]).unwrap(),
        ];

        assert_eq!(subtotal(&lines).unwrap(), 130_000);
    }

    #[test]
    fn subtotal_overflow_is_an_error() {
        let line = price_line(&product(u64::MAX, u64::MAX, &[]), 2, &[]);

        assert!(
            matches!(
                line.map(|l| subtotal(&[l])),
                Ok(Err(PricingError::AmountOverflow))
            ),
            "expected AmountOverflow"
        );
    }

    #[test]
    fn shipping_is_charged_at_the_threshold() {
        let totals = order_totals(FREE_SHIPPING_THRESHOLD, PaymentMethod::Online).unwrap();

        assert_eq!(totals.shipping_fee, SHIPPING_FEE);
        assert_eq!(totals.total, FREE_SHIPPING_THRESHOLD + SHIPPING_FEE);
    }

    #[test]
    fn shipping_is_free_above_the_threshold() {
        let totals = order_totals(FREE_SHIPPING_THRESHOLD + 1, PaymentMethod::Online).unwrap();

        assert_eq!(totals.shipping_fee, 0);
        assert_eq!(totals.total, FREE_SHIPPING_THRESHOLD + 1);
    }

    #[test]
    fn cod_orders_carry_the_surcharge() {
        let totals = order_totals(100_000, PaymentMethod::Cod).unwrap();

        assert_eq!(totals.cod_fee, COD_FEE);
        assert_eq!(totals.total, 100_000 + COD_FEE);
    }

    #[test]
    fn online_orders_carry_no_cod_surcharge() {
        let totals = order_totals(100_000, PaymentMethod::Online).unwrap();

        assert_eq!(totals.cod_fee, 0);
    }
}

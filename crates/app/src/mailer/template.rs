//! Order confirmation template.

use std::fmt::Write as _;

use crate::domain::orders::records::{OrderItemRecord, OrderRecord};

/// Short human-facing order reference: uppercased first eight characters of
/// the gateway handle.
#[must_use]
pub fn short_reference(gateway_order_id: &str) -> String {
    gateway_order_id.to_uppercase().chars().take(8).collect()
}

#[must_use]
pub fn confirmation_subject(order: &OrderRecord) -> String {
    format!(
        "Order Confirmed #{}",
        short_reference(&order.gateway_order_id)
    )
}

/// Render the confirmation body: greeting, item table, total, shipping block.
#[must_use]
pub fn render_confirmation(
    site_name: &str,
    order: &OrderRecord,
    items: &[OrderItemRecord],
) -> String {
    let mut rows = String::new();

    for item in items {
        let name = &item.name;
        let quantity = item.quantity;
        let price = format_inr(item.unit_price);

        let _ = write!(
            rows,
            r#"
          <tr>
            <td style="padding: 10px; border-bottom: 1px solid #eee;">{name}</td>
            <td style="padding: 10px; border-bottom: 1px solid #eee;">{quantity}</td>
            <td style="padding: 10px; border-bottom: 1px solid #eee; text-align: right;">&#8377;{price}</td>
          </tr>"#,
        );
    }

    let first_name = &order.delivery.first_name;
    let reference = short_reference(&order.gateway_order_id);
    let total = format_inr(order.total);
    let address = &order.delivery.address;
    let city = &order.delivery.city;
    let state = &order.delivery.state;
    let pincode = &order.delivery.pincode;

    format!(
        r#"<html>
      <body style="font-family: Arial, sans-serif; color: #333; max-width: 600px; margin: 0 auto; border: 1px solid #eee; padding: 20px;">
        <div style="border-bottom: 2px solid #B08D55; padding-bottom: 10px; margin-bottom: 20px;">
          <h2 style="color: #B08D55; margin: 0;">{site_name}</h2>
        </div>

        <h3>Namaste {first_name},</h3>
        <p>Your order <strong>#{reference}</strong> has been confirmed.</p>

        <table style="width: 100%; border-collapse: collapse; margin-top: 15px;">
          <tr style="background: #f9f9f9; text-align: left;">
            <th style="padding: 10px; border-bottom: 1px solid #ddd;">Item</th>
            <th style="padding: 10px; border-bottom: 1px solid #ddd;">Qty</th>
            <th style="padding: 10px; border-bottom: 1px solid #ddd; text-align: right;">Price</th>
          </tr>{rows}
        </table>

        <div style="text-align: right; margin-top: 20px;">
          <p style="font-size: 18px; font-weight: bold;">Total: &#8377;{total}</p>
        </div>

        <div style="margin-top: 30px; font-size: 14px; color: #555;">
          <strong>Shipping To:</strong><br/>
          {address}, {city}<br/>
          {state} - {pincode}
        </div>
      </body>
      </html>"#,
    )
}

/// Format minor units as rupees with Indian digit grouping, e.g.
/// `12_34_567_89` minor units render as `12,34,567.89`.
#[must_use]
pub fn format_inr(minor_units: u64) -> String {
    let rupees = minor_units / 100;
    let paise = minor_units % 100;

    format!("{}.{paise:02}", group_indian(&rupees.to_string()))
}

fn group_indian(digits: &str) -> String {
    let reversed: Vec<char> = digits.chars().rev().collect();
    let mut out: Vec<char> = Vec::with_capacity(reversed.len() + reversed.len() / 2);

    for (i, c) in reversed.into_iter().enumerate() {
        // Indian grouping: a group of three, then groups of two.
        if i == 3 || (i > 3 && (i - 3) % 2 == 0) {
            out.push(',');
        }

        out.push(c);
    }

    out.into_iter().rev().collect()
}

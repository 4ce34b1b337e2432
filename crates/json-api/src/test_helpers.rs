//! Test helpers.

use std::{collections::BTreeMap, sync::Arc};

use jiff::Timestamp;
use salvo::{affix_state::inject, prelude::*};
use sha2::{Digest, Sha256};

use emporia_app::{
    context::AppContext,
    domain::{
        checkout::MockCheckoutService,
        orders::{
            MockOrdersService,
            records::{
                DeliveryDetails, OrderRecord, OrderStatus, PaymentMethod, PaymentStatus,
            },
        },
        products::{
            MockProductsService,
            records::{ProductRecord, ProductUuid},
        },
    },
    preview::MockPreviewService,
};

use crate::state::State;

pub(crate) const TEST_ADMIN_TOKEN: &str = "em_test_admin_token";

fn admin_digest() -> String {
    hex::encode(Sha256::digest(TEST_ADMIN_TOKEN.as_bytes()))
}

fn strict_products_mock() -> MockProductsService {
    let mut products = MockProductsService::new();

    products.expect_list_products().never();
    products.expect_get_product().never();
    products.expect_create_product().never();
    products.expect_update_product().never();
    products.expect_delete_product().never();

    products
}

fn strict_orders_mock() -> MockOrdersService {
    let mut orders = MockOrdersService::new();

    orders.expect_place_order().never();
    orders.expect_get_order().never();
    orders.expect_list_orders().never();
    orders.expect_mark_email_sent().never();

    orders
}

fn strict_checkout_mock() -> MockCheckoutService {
    let mut checkout = MockCheckoutService::new();

    checkout.expect_quote().never();
    checkout.expect_confirm_payment().never();
    checkout.expect_place_cod_order().never();

    checkout
}

fn strict_preview_mock() -> MockPreviewService {
    let mut preview = MockPreviewService::new();

    preview.expect_render().never();

    preview
}

fn make_state(
    products: MockProductsService,
    orders: MockOrdersService,
    checkout: MockCheckoutService,
    preview: MockPreviewService,
) -> Arc<State> {
    State::shared(
        AppContext {
            products: Arc::new(products),
            orders: Arc::new(orders),
            checkout: Arc::new(checkout),
            preview: Arc::new(preview),
        },
        admin_digest(),
    )
}

pub(crate) fn empty_state() -> Arc<State> {
    make_state(
        strict_products_mock(),
        strict_orders_mock(),
        strict_checkout_mock(),
        strict_preview_mock(),
    )
}

pub(crate) fn state_with_products(products: MockProductsService) -> Arc<State> {
    make_state(
        products,
        strict_orders_mock(),
        strict_checkout_mock(),
        strict_preview_mock(),
    )
}

pub(crate) fn state_with_orders(orders: MockOrdersService) -> Arc<State> {
    make_state(
        strict_products_mock(),
        orders,
        strict_checkout_mock(),
        strict_preview_mock(),
    )
}

pub(crate) fn state_with_checkout(checkout: MockCheckoutService) -> Arc<State> {
    make_state(
        strict_products_mock(),
        strict_orders_mock(),
        checkout,
        strict_preview_mock(),
    )
}

pub(crate) fn state_with_preview(preview: MockPreviewService) -> Arc<State> {
    make_state(
        strict_products_mock(),
        strict_orders_mock(),
        strict_checkout_mock(),
        preview,
    )
}

pub(crate) fn products_service(products: MockProductsService, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state_with_products(products)))
            .push(route),
    )
}

pub(crate) fn orders_service(orders: MockOrdersService, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state_with_orders(orders)))
            .push(route),
    )
}

pub(crate) fn checkout_service(checkout: MockCheckoutService, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state_with_checkout(checkout)))
            .push(route),
    )
}

pub(crate) fn preview_service(preview: MockPreviewService, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state_with_preview(preview)))
            .push(route),
    )
}

pub(crate) fn make_product(uuid: ProductUuid, price: u64, stock: u64) -> ProductRecord {
    ProductRecord {
        uuid,
        name: "Organza".to_string(),
        description: Some("Handwoven Banarasi weave".to_string()),
        category: Some("sarees".to_string()),
        price,
        stock,
        featured_image_url: Some("https://img.example/organza.jpg".to_string()),
        gallery_image_urls: vec![],
        detail_image_urls: vec![],
        options: BTreeMap::new(),
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
        deleted_at: None,
    }
}

pub(crate) fn make_order(gateway_order_id: &str) -> OrderRecord {
    OrderRecord {
        gateway_order_id: gateway_order_id.to_string(),
        payment_id: Some("pay_123".to_string()),
        status: OrderStatus::Paid,
        payment_status: PaymentStatus::Paid,
        payment_method: PaymentMethod::Online,
        delivery: DeliveryDetails {
            email: "asha@example.com".to_string(),
            first_name: "Asha".to_string(),
            address: "12 Dashashwamedh Road".to_string(),
            city: "Varanasi".to_string(),
            state: "Uttar Pradesh".to_string(),
            pincode: "221001".to_string(),
            ..DeliveryDetails::default()
        },
        subtotal: 52_000,
        shipping_fee: 0,
        cod_fee: 0,
        total: 52_000,
        email_sent: false,
        created_at: Timestamp::UNIX_EPOCH,
    }
}

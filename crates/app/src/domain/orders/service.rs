//! Orders service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::{
        checkout::pricing,
        orders::{
            data::{OrderWithItems, PlaceOrder, PlacedOrder},
            errors::OrdersServiceError,
            records::{
                OrderItemRecord, OrderItemUuid, OrderRecord, OrderStatus, PaymentMethod,
                PaymentStatus,
            },
            repository::{NewOrderRow, PgOrdersRepository},
        },
        products::repository::PgProductsRepository,
    },
    mailer::OrderNotifier,
};

#[derive(Debug, Clone)]
pub struct PgOrdersService {
    db: Db,
    orders: PgOrdersRepository,
    products: PgProductsRepository,
    notifier: OrderNotifier,
}

impl PgOrdersService {
    #[must_use]
    pub fn new(db: Db, notifier: OrderNotifier) -> Self {
        Self {
            db,
            orders: PgOrdersRepository::new(),
            products: PgProductsRepository::new(),
            notifier,
        }
    }
}

#[async_trait]
impl OrdersService for PgOrdersService {
    async fn place_order(&self, order: PlaceOrder) -> Result<PlacedOrder, OrdersServiceError> {
        if order.lines.is_empty() {
            return Err(OrdersServiceError::EmptyOrder);
        }

        let mut tx = self.db.begin().await?;

        // Re-price every line from the catalog rows visible to this
        // transaction. Client-supplied amounts never reach this point.
        let mut priced = Vec::with_capacity(order.lines.len());

        for line in &order.lines {
            let product = match self.products.get_product(&mut tx, line.product).await {
                Ok(product) => product,
                Err(sqlx::Error::RowNotFound) => {
                    return Err(OrdersServiceError::ProductUnavailable {
                        name: line.product.to_string(),
                    });
                }
                Err(error) => return Err(error.into()),
            };

            priced.push(pricing::price_line(
                &product,
                line.quantity,
                &line.selected_options,
            )?);
        }

        let subtotal = pricing::subtotal(&priced)?;
        let totals = pricing::order_totals(subtotal, order.payment_method)?;

        let (status, payment_status) = match order.payment_method {
            PaymentMethod::Online => (OrderStatus::Paid, PaymentStatus::Paid),
            PaymentMethod::Cod => (OrderStatus::Pending, PaymentStatus::Pending),
        };

        let inserted = self
            .orders
            .create_order(
                &mut tx,
                &NewOrderRow {
                    gateway_order_id: &order.gateway_order_id,
                    payment_id: order.payment_id.as_deref(),
                    status,
                    payment_status,
                    payment_method: order.payment_method,
                    delivery: &order.delivery,
                    totals: &totals,
                },
            )
            .await?;

        if !inserted {
            // The gateway handle was seen before: a client retry or a
            // replayed callback. Return the prior order untouched.
            let existing = self.orders.get_order(&mut tx, &order.gateway_order_id).await?;
            let items = self
                .orders
                .get_order_items(&mut tx, &order.gateway_order_id)
                .await?;

            tx.commit().await?;

            return Ok(PlacedOrder {
                order: existing,
                items,
                already_placed: true,
            });
        }

        let mut items = Vec::with_capacity(priced.len());

        for line in &priced {
            let item = OrderItemRecord {
                uuid: OrderItemUuid::new(),
                gateway_order_id: order.gateway_order_id.clone(),
                product_uuid: line.product,
                name: line.name.clone(),
                unit_price: line.unit_price,
                quantity: line.quantity,
                image_url: line.image_url.clone(),
                selected_options: line.selected_options.clone(),
            };

            self.orders.create_order_item(&mut tx, &item).await?;
            items.push(item);
        }

        for line in &priced {
            let rows_affected = self
                .products
                .decrement_stock(&mut tx, line.product, line.quantity)
                .await?;

            if rows_affected == 0 {
                // A concurrent checkout won the stock between our read and
                // the guarded decrement. Dropping the transaction rolls the
                // whole order back.
                return Err(match self.products.get_product(&mut tx, line.product).await {
                    Ok(product) => OrdersServiceError::InsufficientStock {
                        name: product.name,
                        available: product.stock,
                    },
                    Err(_) => OrdersServiceError::ProductUnavailable {
                        name: line.product.to_string(),
                    },
                });
            }
        }

        let record = self.orders.get_order(&mut tx, &order.gateway_order_id).await?;

        tx.commit().await?;

        self.notifier.order_placed(&record.gateway_order_id);

        Ok(PlacedOrder {
            order: record,
            items,
            already_placed: false,
        })
    }

    async fn get_order(&self, gateway_order_id: &str) -> Result<OrderWithItems, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let order = self.orders.get_order(&mut tx, gateway_order_id).await?;
        let items = self.orders.get_order_items(&mut tx, gateway_order_id).await?;

        tx.commit().await?;

        Ok(OrderWithItems { order, items })
    }

    async fn list_orders(&self) -> Result<Vec<OrderRecord>, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let orders = self.orders.list_orders(&mut tx).await?;

        tx.commit().await?;

        Ok(orders)
    }

    async fn mark_email_sent(&self, gateway_order_id: &str) -> Result<(), OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self.orders.mark_email_sent(&mut tx, gateway_order_id).await?;

        if rows_affected == 0 {
            return Err(OrdersServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Atomically write the order and decrement stock for every line; both
    /// effects commit together or not at all. A repeated gateway handle
    /// returns the prior order instead of writing twice.
    async fn place_order(&self, order: PlaceOrder) -> Result<PlacedOrder, OrdersServiceError>;

    /// Retrieve a single order with its line items.
    async fn get_order(&self, gateway_order_id: &str)
    -> Result<OrderWithItems, OrdersServiceError>;

    /// Retrieve all orders, newest first.
    async fn list_orders(&self) -> Result<Vec<OrderRecord>, OrdersServiceError>;

    /// Flip the order's confirmation-email flag.
    async fn mark_email_sent(&self, gateway_order_id: &str) -> Result<(), OrdersServiceError>;
}

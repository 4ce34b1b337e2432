//! Orders Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{
    FromRow, Postgres, Row, Transaction,
    postgres::PgRow,
    query, query_as,
    types::Json,
};

use crate::domain::{
    checkout::pricing::OrderTotals,
    orders::records::{
        DeliveryDetails, OrderItemRecord, OrderItemUuid, OrderRecord, OrderStatus, PaymentMethod,
        PaymentStatus,
    },
    products::{records::ProductUuid, repository::try_get_amount},
};

const CREATE_ORDER_SQL: &str = include_str!("sql/create_order.sql");
const GET_ORDER_SQL: &str = include_str!("sql/get_order.sql");
const LIST_ORDERS_SQL: &str = include_str!("sql/list_orders.sql");
const CREATE_ORDER_ITEM_SQL: &str = include_str!("sql/create_order_item.sql");
const GET_ORDER_ITEMS_SQL: &str = include_str!("sql/get_order_items.sql");
const MARK_EMAIL_SENT_SQL: &str = include_str!("sql/mark_email_sent.sql");

/// Order row as inserted at placement time; `email_sent` and `created_at`
/// come from column defaults.
#[derive(Debug)]
pub(crate) struct NewOrderRow<'a> {
    pub gateway_order_id: &'a str,
    pub payment_id: Option<&'a str>,
    pub status: OrderStatus,
    pub payment_status: PaymentStatus,
    pub payment_method: PaymentMethod,
    pub delivery: &'a DeliveryDetails,
    pub totals: &'a OrderTotals,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PgOrdersRepository;

impl PgOrdersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Insert the order row. Returns `false` when an order with the same
    /// gateway handle already exists (idempotent replay).
    pub(crate) async fn create_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: &NewOrderRow<'_>,
    ) -> Result<bool, sqlx::Error> {
        let rows_affected = query(CREATE_ORDER_SQL)
            .bind(order.gateway_order_id)
            .bind(order.payment_id)
            .bind(order.status.as_str())
            .bind(order.payment_status.as_str())
            .bind(order.payment_method.as_str())
            .bind(&order.delivery.email)
            .bind(&order.delivery.first_name)
            .bind(&order.delivery.last_name)
            .bind(&order.delivery.address)
            .bind(&order.delivery.apartment)
            .bind(&order.delivery.city)
            .bind(&order.delivery.state)
            .bind(&order.delivery.pincode)
            .bind(&order.delivery.phone)
            .bind(to_db_amount(order.totals.subtotal, "subtotal")?)
            .bind(to_db_amount(order.totals.shipping_fee, "shipping_fee")?)
            .bind(to_db_amount(order.totals.cod_fee, "cod_fee")?)
            .bind(to_db_amount(order.totals.total, "total")?)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected > 0)
    }

    pub(crate) async fn get_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        gateway_order_id: &str,
    ) -> Result<OrderRecord, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(GET_ORDER_SQL)
            .bind(gateway_order_id)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_orders(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<OrderRecord>, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(LIST_ORDERS_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn create_order_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        item: &OrderItemRecord,
    ) -> Result<(), sqlx::Error> {
        query(CREATE_ORDER_ITEM_SQL)
            .bind(item.uuid.into_uuid())
            .bind(&item.gateway_order_id)
            .bind(item.product_uuid.into_uuid())
            .bind(&item.name)
            .bind(to_db_amount(item.unit_price, "unit_price")?)
            .bind(to_db_amount(item.quantity, "quantity")?)
            .bind(&item.image_url)
            .bind(Json(&item.selected_options))
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    pub(crate) async fn get_order_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        gateway_order_id: &str,
    ) -> Result<Vec<OrderItemRecord>, sqlx::Error> {
        query_as::<Postgres, OrderItemRecord>(GET_ORDER_ITEMS_SQL)
            .bind(gateway_order_id)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn mark_email_sent(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        gateway_order_id: &str,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(MARK_EMAIL_SENT_SQL)
            .bind(gateway_order_id)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

fn to_db_amount(value: u64, index: &str) -> Result<i64, sqlx::Error> {
    i64::try_from(value).map_err(|e| sqlx::Error::ColumnDecode {
        index: index.to_string(),
        source: Box::new(e),
    })
}

fn try_parse<T>(row: &PgRow, col: &str) -> Result<T, sqlx::Error>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let raw: String = row.try_get(col)?;

    raw.parse().map_err(|e| sqlx::Error::ColumnDecode {
        index: col.to_string(),
        source: Box::new(e),
    })
}

impl<'r> FromRow<'r, PgRow> for OrderRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            gateway_order_id: row.try_get("gateway_order_id")?,
            payment_id: row.try_get("payment_id")?,
            status: try_parse(row, "status")?,
            payment_status: try_parse(row, "payment_status")?,
            payment_method: try_parse(row, "payment_method")?,
            delivery: DeliveryDetails {
                email: row.try_get("email")?,
                first_name: row.try_get("first_name")?,
                last_name: row.try_get("last_name")?,
                address: row.try_get("address")?,
                apartment: row.try_get("apartment")?,
                city: row.try_get("city")?,
                state: row.try_get("state")?,
                pincode: row.try_get("pincode")?,
                phone: row.try_get("phone")?,
            },
            subtotal: try_get_amount(row, "subtotal")?,
            shipping_fee: try_get_amount(row, "shipping_fee")?,
            cod_fee: try_get_amount(row, "cod_fee")?,
            total: try_get_amount(row, "total")?,
            email_sent: row.try_get("email_sent")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for OrderItemRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let selected_options: Json<Vec<String>> = row.try_get("selected_options")?;

        Ok(Self {
            uuid: OrderItemUuid::from_uuid(row.try_get("uuid")?),
            gateway_order_id: row.try_get("gateway_order_id")?,
            product_uuid: ProductUuid::from_uuid(row.try_get("product_uuid")?),
            name: row.try_get("name")?,
            unit_price: try_get_amount(row, "unit_price")?,
            quantity: try_get_amount(row, "quantity")?,
            image_url: row.try_get("image_url")?,
            selected_options: selected_options.0,
        })
    }
}

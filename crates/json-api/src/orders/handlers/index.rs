//! Order Index Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{extensions::*, orders::get::OrderResponse, state::State};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrdersResponse {
    /// The list of orders, newest first
    pub orders: Vec<OrderResponse>,
}

/// Order Index Handler
///
/// Returns all orders, newest first.
#[endpoint(tags("orders"), summary = "List Orders", security(("bearer_auth" = [])))]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<OrdersResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let orders = state
        .app
        .orders
        .list_orders()
        .await
        .or_500("failed to fetch orders")?;

    Ok(Json(OrdersResponse {
        orders: orders
            .into_iter()
            .map(|order| OrderResponse::from_record(order, vec![]))
            .collect(),
    }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use emporia_app::domain::orders::{MockOrdersService, OrdersServiceError};

    use crate::test_helpers::{make_order, orders_service};

    use super::*;

    fn make_service(repo: MockOrdersService) -> Service {
        orders_service(repo, Router::with_path("orders").get(handler))
    }

    #[tokio::test]
    async fn test_index_returns_orders() -> TestResult {
        let mut repo = MockOrdersService::new();

        repo.expect_list_orders()
            .once()
            .return_once(|| Ok(vec![make_order("order_a"), make_order("order_b")]));

        repo.expect_get_order().never();
        repo.expect_place_order().never();
        repo.expect_mark_email_sent().never();

        let response: OrdersResponse = TestClient::get("http://example.com/orders")
            .send(&make_service(repo))
            .await
            .take_json()
            .await?;

        assert_eq!(response.orders.len(), 2);
        assert_eq!(response.orders[0].order_id, "order_a");

        Ok(())
    }

    #[tokio::test]
    async fn test_index_storage_error_returns_500() -> TestResult {
        let mut repo = MockOrdersService::new();

        repo.expect_list_orders()
            .once()
            .return_once(|| Err(OrdersServiceError::InvalidData));

        repo.expect_get_order().never();
        repo.expect_place_order().never();
        repo.expect_mark_email_sent().never();

        let res = TestClient::get("http://example.com/orders")
            .send(&make_service(repo))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::INTERNAL_SERVER_ERROR));

        Ok(())
    }
}

//! Test context for service-level integration tests.

use crate::{
    database::Db,
    domain::{orders::PgOrdersService, products::PgProductsService},
    mailer::OrderNotifier,
};

use super::db::TestDb;

pub struct TestContext {
    pub db: TestDb,
    pub products: PgProductsService,
    pub orders: PgOrdersService,
}

impl TestContext {
    pub async fn new() -> Self {
        let test_db = TestDb::new().await;
        let db = Db::new(test_db.pool().clone());

        Self {
            products: PgProductsService::new(db.clone()),
            orders: PgOrdersService::new(db, OrderNotifier::disabled()),
            db: test_db,
        }
    }
}

//! App Context

use std::sync::Arc;

use thiserror::Error;

use crate::{
    database::{self, Db},
    domain::{
        checkout::{CheckoutService, GatewayCheckoutService},
        orders::{OrdersService, PgOrdersService},
        products::{PgProductsService, ProductsService},
    },
    mailer::{MailSender, MailerClient, MailerConfig, OrderNotifier, spawn_dispatcher},
    payments::{GatewayClient, GatewayConfig, PaymentGateway},
    preview::{HtmlPreviewRenderer, PreviewConfig, PreviewService},
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),
}

#[derive(Clone)]
pub struct AppContext {
    pub products: Arc<dyn ProductsService>,
    pub orders: Arc<dyn OrdersService>,
    pub checkout: Arc<dyn CheckoutService>,
    pub preview: Arc<dyn PreviewService>,
}

impl AppContext {
    /// Build application context from a database URL and external-service
    /// configuration. Spawns the confirmation-email dispatcher as a detached
    /// background task.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection fails.
    pub async fn from_database_url(
        url: &str,
        gateway: GatewayConfig,
        mailer: MailerConfig,
        preview: PreviewConfig,
        site_name: String,
    ) -> Result<Self, AppInitError> {
        let pool = database::connect(url)
            .await
            .map_err(AppInitError::Database)?;

        let db = Db::new(pool);

        let products: Arc<dyn ProductsService> = Arc::new(PgProductsService::new(db.clone()));

        let (notifier, receiver) = OrderNotifier::channel();

        let orders: Arc<dyn OrdersService> = Arc::new(PgOrdersService::new(db, notifier));

        let mail_sender: Arc<dyn MailSender> = Arc::new(MailerClient::new(mailer));

        drop(spawn_dispatcher(
            receiver,
            orders.clone(),
            mail_sender,
            site_name.clone(),
        ));

        let key_secret = gateway.key_secret.clone();
        let gateway_client: Arc<dyn PaymentGateway> = Arc::new(GatewayClient::new(gateway));

        let checkout: Arc<dyn CheckoutService> = Arc::new(GatewayCheckoutService::new(
            products.clone(),
            orders.clone(),
            gateway_client,
            key_secret,
        ));

        let preview: Arc<dyn PreviewService> = Arc::new(HtmlPreviewRenderer::new(
            products.clone(),
            preview,
            site_name,
        ));

        Ok(Self {
            products,
            orders,
            checkout,
            preview,
        })
    }
}

//! Order-placed notification dispatch.
//!
//! The order writer emits the gateway handle of every newly committed order
//! onto an unbounded channel; a background task consumes it, renders the
//! confirmation email, sends it, and flips the order's `email_sent` flag.
//! Delivery is fire-once and best-effort: failures are logged and the flag
//! stays false with no retry scheduling.

use std::sync::Arc;

use thiserror::Error;
use tokio::{
    sync::mpsc::{self, UnboundedReceiver, UnboundedSender},
    task::JoinHandle,
};
use tracing::{info, warn};

use crate::{
    domain::orders::{
        OrdersService, OrdersServiceError,
        data::OrderWithItems,
    },
    mailer::{
        client::{MailSender, MailerError, OutboundEmail},
        template,
    },
};

/// Sending half handed to the order writer.
#[derive(Debug, Clone)]
pub struct OrderNotifier {
    sender: Option<UnboundedSender<String>>,
}

impl OrderNotifier {
    /// Create a connected notifier and the receiving half for the dispatcher.
    #[must_use]
    pub fn channel() -> (Self, UnboundedReceiver<String>) {
        let (sender, receiver) = mpsc::unbounded_channel();

        (
            Self {
                sender: Some(sender),
            },
            receiver,
        )
    }

    /// A notifier that drops every event. For contexts without a dispatcher.
    #[must_use]
    pub fn disabled() -> Self {
        Self { sender: None }
    }

    pub(crate) fn order_placed(&self, gateway_order_id: &str) {
        let Some(sender) = &self.sender else {
            return;
        };

        if sender.send(gateway_order_id.to_string()).is_err() {
            warn!("order notification for {gateway_order_id} dropped: dispatcher is gone");
        }
    }
}

/// Spawn the background confirmation-email task.
pub fn spawn_dispatcher(
    receiver: UnboundedReceiver<String>,
    orders: Arc<dyn OrdersService>,
    mailer: Arc<dyn MailSender>,
    site_name: String,
) -> JoinHandle<()> {
    tokio::spawn(run(receiver, orders, mailer, site_name))
}

async fn run(
    mut receiver: UnboundedReceiver<String>,
    orders: Arc<dyn OrdersService>,
    mailer: Arc<dyn MailSender>,
    site_name: String,
) {
    while let Some(order_id) = receiver.recv().await {
        if let Err(error) = dispatch(&*orders, &*mailer, &site_name, &order_id).await {
            warn!("order confirmation email for {order_id} failed: {error}");
        }
    }
}

async fn dispatch(
    orders: &dyn OrdersService,
    mailer: &dyn MailSender,
    site_name: &str,
    order_id: &str,
) -> Result<(), DispatchError> {
    let OrderWithItems { order, items } = orders.get_order(order_id).await?;

    if order.email_sent {
        return Ok(());
    }

    let email = OutboundEmail {
        to: order.delivery.email.clone(),
        subject: template::confirmation_subject(&order),
        html: template::render_confirmation(site_name, &order, &items),
    };

    mailer.send(&email).await?;
    orders.mark_email_sent(order_id).await?;

    info!("order confirmation for {order_id} sent to {}", email.to);

    Ok(())
}

#[derive(Debug, Error)]
enum DispatchError {
    #[error("order lookup failed")]
    Orders(#[from] OrdersServiceError),

    #[error("mail delivery failed")]
    Mail(#[from] MailerError),
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use testresult::TestResult;

    use crate::{
        domain::orders::{
            MockOrdersService,
            records::{
                DeliveryDetails, OrderRecord, OrderStatus, PaymentMethod, PaymentStatus,
            },
        },
        mailer::client::MockMailSender,
    };

    use super::*;

    fn paid_order(email_sent: bool) -> OrderRecord {
        OrderRecord {
            gateway_order_id: "order_abc".to_string(),
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
            email_sent,
            created_at: Timestamp::UNIX_EPOCH,
        }
    }

    #[tokio::test]
    async fn successful_send_flips_the_email_flag() -> TestResult {
        let mut orders = MockOrdersService::new();
        let mut mailer = MockMailSender::new();

        orders
            .expect_get_order()
            .once()
            .withf(|id| id == "order_abc")
            .return_once(|_| {
                Ok(OrderWithItems {
                    order: paid_order(false),
                    items: vec![],
                })
            });

        mailer
            .expect_send()
            .once()
            .withf(|email| email.to == "asha@example.com")
            .return_once(|_| Ok(()));

        orders
            .expect_mark_email_sent()
            .once()
            .withf(|id| id == "order_abc")
            .return_once(|_| Ok(()));

        dispatch(&orders, &mailer, "Emporia", "order_abc").await?;

        Ok(())
    }

    #[tokio::test]
    async fn failed_send_leaves_the_flag_untouched() {
        let mut orders = MockOrdersService::new();
        let mut mailer = MockMailSender::new();

        orders.expect_get_order().once().return_once(|_| {
            Ok(OrderWithItems {
                order: paid_order(false),
                items: vec![],
            })
        });

        mailer.expect_send().once().return_once(|_| {
            Err(MailerError::UnexpectedResponse("boom".to_string()))
        });

        orders.expect_mark_email_sent().never();

        let result = dispatch(&orders, &mailer, "Emporia", "order_abc").await;

        assert!(
            matches!(result, Err(DispatchError::Mail(_))),
            "expected Mail error, got {result:?}"
        );
    }

    #[tokio::test]
    async fn already_sent_order_is_skipped() -> TestResult {
        let mut orders = MockOrdersService::new();
        let mut mailer = MockMailSender::new();

        orders.expect_get_order().once().return_once(|_| {
            Ok(OrderWithItems {
                order: paid_order(true),
                items: vec![],
            })
        });

        mailer.expect_send().never();
        orders.expect_mark_email_sent().never();

        dispatch(&orders, &mailer, "Emporia", "order_abc").await?;

        Ok(())
    }

    #[tokio::test]
    async fn disabled_notifier_drops_events_silently() {
        OrderNotifier::disabled().order_placed("order_abc");
    }

    #[tokio::test]
    async fn channel_notifier_delivers_the_handle() {
        let (notifier, mut receiver) = OrderNotifier::channel();

        notifier.order_placed("order_abc");

        assert_eq!(receiver.recv().await.as_deref(), Some("order_abc"));
    }
}

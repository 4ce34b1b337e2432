//! App Router

use salvo::Router;

use crate::{auth, checkout, orders, preview, products};

pub(crate) fn app_router() -> Router {
    Router::new()
        .push(Router::with_path("createOrder").post(checkout::create_order::handler))
        .push(Router::with_path("verifyPayment").post(checkout::verify_payment::handler))
        .push(Router::with_path("serveProduct/{product}").get(preview::serve::handler))
        .push(
            Router::with_path("orders")
                .post(checkout::cod_order::handler)
                .push(
                    Router::new()
                        .hoop(auth::middleware::handler)
                        .get(orders::index::handler)
                        .push(Router::with_path("{order}").get(orders::get::handler)),
                ),
        )
        .push(
            Router::with_path("products")
                .get(products::index::handler)
                .push(Router::with_path("{product}").get(products::get::handler))
                .push(
                    Router::new()
                        .hoop(auth::middleware::handler)
                        .post(products::create::handler)
                        .push(
                            Router::with_path("{product}")
                                .put(products::update::handler)
                                .delete(products::delete::handler),
                        ),
                ),
        )
}

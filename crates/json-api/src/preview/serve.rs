//! Serve Product Preview Handler
//!
//! Returns the site shell with product meta tags substituted, so link
//! unfurlers see real product metadata. Unknown products, and any render
//! failure, redirect to the site root.

use std::sync::Arc;

use salvo::{
    http::header::{CACHE_CONTROL, HeaderValue},
    prelude::*,
    writing::{Redirect, Text},
};
use tracing::error;
use uuid::Uuid;

use crate::state::State;

const CACHE_LIFETIME: &str = "public, max-age=300, s-maxage=600";

#[salvo::handler]
pub(crate) async fn handler(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let Some(product) = req.param::<Uuid>("product") else {
        res.render(Redirect::found("/"));

        return;
    };

    let Ok(state) = depot.obtain::<Arc<State>>() else {
        res.render(StatusError::internal_server_error());

        return;
    };

    match state.app.preview.render(product.into()).await {
        Ok(Some(html)) => {
            res.headers_mut()
                .insert(CACHE_CONTROL, HeaderValue::from_static(CACHE_LIFETIME));
            res.render(Text::Html(html));
        }
        Ok(None) => res.render(Redirect::found("/")),
        Err(err) => {
            error!("preview render for {product} failed: {err}");

            res.render(Redirect::found("/"));
        }
    }
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use emporia_app::preview::{MockPreviewService, PreviewError};

    use crate::test_helpers::preview_service;

    use super::*;

    fn make_service(preview: MockPreviewService) -> Service {
        preview_service(
            preview,
            Router::with_path("serveProduct/{product}").get(handler),
        )
    }

    #[tokio::test]
    async fn test_known_product_returns_html_with_cache_header() -> TestResult {
        let uuid = Uuid::now_v7();

        let mut preview = MockPreviewService::new();

        preview
            .expect_render()
            .once()
            .withf(move |p| p.into_uuid() == uuid)
            .return_once(|_| Ok(Some("<html><title>Katan Silk</title></html>".to_string())));

        let mut res = TestClient::get(format!("http://example.com/serveProduct/{uuid}"))
            .send(&make_service(preview))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(
            res.headers()
                .get(CACHE_CONTROL)
                .and_then(|v| v.to_str().ok()),
            Some(CACHE_LIFETIME)
        );

        let body = res.take_string().await?;

        assert!(body.contains("Katan Silk"));

        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_product_redirects_to_root() -> TestResult {
        let mut preview = MockPreviewService::new();

        preview.expect_render().once().return_once(|_| Ok(None));

        let res = TestClient::get(format!(
            "http://example.com/serveProduct/{}",
            Uuid::now_v7()
        ))
        .send(&make_service(preview))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::FOUND));
        assert_eq!(
            res.headers().get("location").and_then(|v| v.to_str().ok()),
            Some("/")
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_render_failure_redirects_to_root() -> TestResult {
        let mut preview = MockPreviewService::new();

        preview.expect_render().once().return_once(|_| {
            Err(PreviewError::UnexpectedResponse("shell 500".to_string()))
        });

        let res = TestClient::get(format!(
            "http://example.com/serveProduct/{}",
            Uuid::now_v7()
        ))
        .send(&make_service(preview))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::FOUND));

        Ok(())
    }

    #[tokio::test]
    async fn test_non_uuid_product_redirects_to_root() -> TestResult {
        let mut preview = MockPreviewService::new();

        preview.expect_render().never();

        let res = TestClient::get("http://example.com/serveProduct/not-a-uuid")
            .send(&make_service(preview))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::FOUND));

        Ok(())
    }
}

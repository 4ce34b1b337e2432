//! Emporia JSON API Server

use std::{process, time::Duration};

use salvo::{
    affix_state::inject,
    oapi::{
        OpenApi,
        security::{Http, HttpAuthScheme, SecurityScheme},
        swagger_ui::SwaggerUi,
    },
    prelude::*,
    trailing_slash::remove_slash,
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use emporia_app::{
    context::AppContext,
    mailer::MailerConfig,
    payments::{GatewayConfig, GatewaySecret},
    preview::PreviewConfig,
};

use crate::{config::ServerConfig, state::State};

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod auth;
mod checkout;
mod config;
mod extensions;
mod healthcheck;
mod orders;
mod preview;
mod products;
mod router;
mod shutdown;
mod state;
#[cfg(test)]
mod test_helpers;

/// Emporia JSON API Server entry point
///
/// # Panics
///
/// Panics if the server fails to bind or serve requests
#[tokio::main]
pub async fn main() {
    // Load configuration from .env and CLI arguments
    let config = ServerConfig::load().unwrap_or_else(|e| {
        #[expect(
            clippy::print_stderr,
            reason = "logging not initialized yet, must use eprintln for config errors"
        )]
        {
            eprintln!("Configuration error: {e}");
        }

        process::exit(1);
    });

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.log_level)),
        )
        .init();

    let addr = config.socket_addr();

    info!("Starting server on {addr}");

    // Bind server
    let listener = TcpListener::new(addr).bind().await;

    let gateway = GatewayConfig {
        base_url: config.gateway.base_url.clone(),
        key_id: config.gateway.key_id.clone(),
        key_secret: GatewaySecret::new(config.gateway.key_secret.clone()),
    };

    let mailer = MailerConfig {
        base_url: config.mailer.base_url.clone(),
        api_token: config.mailer.api_token.clone(),
        from_address: config.mailer.from_address.clone(),
        admin_address: config.mailer.admin_address.clone(),
    };

    let preview = PreviewConfig {
        shell_url: config.preview.shell_url.clone(),
        fallback_description: config.preview.fallback_description.clone(),
        fallback_image_url: config.preview.fallback_image_url.clone(),
        cache_ttl: Duration::from_secs(config.preview.cache_ttl_secs),
    };

    let app = match AppContext::from_database_url(
        &config.database.database_url,
        gateway,
        mailer,
        preview,
        config.site_name.clone(),
    )
    .await
    {
        Ok(app) => app,
        Err(init_error) => {
            error!("failed to initialize app context: {init_error}");

            process::exit(1);
        }
    };

    let router = Router::new()
        .hoop(CatchPanic::new())
        .hoop(remove_slash())
        .hoop(inject(State::shared(
            app,
            config.auth.admin_token_digest.clone(),
        )))
        .push(Router::with_path("healthcheck").get(healthcheck::handler))
        .push(router::app_router());

    let doc = OpenApi::new("Emporia API", "0.3.0")
        .add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        )
        .merge_router(&router);

    let router = router
        .push(doc.into_router("/api-doc/openapi.json"))
        .push(SwaggerUi::new("/api-doc/openapi.json").into_router("docs"));

    let server = Server::new(listener);

    let handle = server.handle();

    // Listen for shutdown signal
    tokio::spawn(async move {
        if let Err(error) = shutdown::listen(handle).await {
            error!("failed to listen for shutdown signal: {error}");
        }
    });

    // Start serving requests
    server.serve(router).await;
}

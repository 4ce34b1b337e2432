//! Server configuration module

use clap::Parser;

use crate::config::{
    auth::AuthConfig,
    db::DatabaseConfig,
    gateway::GatewayConfig,
    logging::LoggingConfig,
    mailer::MailerConfig,
    preview::PreviewConfig,
    server::ServerRuntimeConfig,
};

pub(crate) mod auth;
pub(crate) mod db;
pub(crate) mod gateway;
pub(crate) mod logging;
pub(crate) mod mailer;
pub(crate) mod preview;
pub(crate) mod server;

/// Emporia JSON API Server configuration
#[derive(Debug, Parser)]
#[command(name = "emporia-json", about = "Emporia JSON API Server", long_about = None)]
pub(crate) struct ServerConfig {
    /// Storefront display name, used in page titles and emails.
    #[arg(long, env = "SITE_NAME", default_value = "Emporia")]
    pub site_name: String,

    /// Server network settings.
    #[command(flatten)]
    pub server: ServerRuntimeConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Application database settings.
    #[command(flatten)]
    pub database: DatabaseConfig,

    /// Payment gateway settings.
    #[command(flatten)]
    pub gateway: GatewayConfig,

    /// Outbound mail settings.
    #[command(flatten)]
    pub mailer: MailerConfig,

    /// Social preview settings.
    #[command(flatten)]
    pub preview: PreviewConfig,

    /// Admin authentication settings.
    #[command(flatten)]
    pub auth: AuthConfig,
}

impl ServerConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    /// Get the socket address for binding
    #[must_use]
    pub fn socket_addr(&self) -> String {
        self.server.socket_addr()
    }
}

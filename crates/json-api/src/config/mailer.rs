//! Outbound Mail Config

use clap::Args;

/// Outbound mail settings.
#[derive(Debug, Args)]
pub struct MailerConfig {
    /// Mail API base address
    #[arg(long, env = "MAILER_BASE_URL")]
    pub base_url: String,

    /// Mail API bearer token
    #[arg(long, env = "MAILER_API_TOKEN", hide_env_values = true)]
    pub api_token: String,

    /// Sender address for outbound mail
    #[arg(long, env = "MAIL_FROM_ADDRESS")]
    pub from_address: String,

    /// Admin address blind-copied on order confirmations
    #[arg(long, env = "MAIL_ADMIN_ADDRESS")]
    pub admin_address: String,
}

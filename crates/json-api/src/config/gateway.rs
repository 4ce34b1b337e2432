//! Payment Gateway Config

use clap::Args;

/// Payment gateway settings.
#[derive(Debug, Args)]
pub struct GatewayConfig {
    /// Gateway key id
    #[arg(long, env = "RAZORPAY_KEY_ID")]
    pub key_id: String,

    /// Gateway key secret
    #[arg(long, env = "RAZORPAY_KEY_SECRET", hide_env_values = true)]
    pub key_secret: String,

    /// Gateway API base address
    #[arg(long, env = "RAZORPAY_BASE_URL", default_value = "https://api.razorpay.com")]
    pub base_url: String,
}

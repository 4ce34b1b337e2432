//! Auth Config

use clap::Args;

/// Admin authentication settings.
#[derive(Debug, Args)]
pub struct AuthConfig {
    /// SHA-256 hex digest of the admin API token
    #[arg(long, env = "ADMIN_TOKEN_DIGEST", hide_env_values = true)]
    pub admin_token_digest: String,
}

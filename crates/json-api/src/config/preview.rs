//! Social Preview Config

use clap::Args;

/// Social preview settings.
#[derive(Debug, Args)]
pub struct PreviewConfig {
    /// Address of the live shell document served to crawlers
    #[arg(long, env = "SHELL_URL")]
    pub shell_url: String,

    /// Meta description used when a product has none
    #[arg(
        long,
        env = "PREVIEW_FALLBACK_DESCRIPTION",
        default_value = "Authentic handloom silks"
    )]
    pub fallback_description: String,

    /// Open Graph image used when a product has none
    #[arg(long, env = "PREVIEW_FALLBACK_IMAGE_URL")]
    pub fallback_image_url: String,

    /// Shell document cache lifetime in seconds
    #[arg(long, env = "PREVIEW_CACHE_TTL_SECS", default_value = "300")]
    pub cache_ttl_secs: u64,
}

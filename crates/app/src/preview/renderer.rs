//! Link-preview document renderer.
//!
//! Serves the site's static shell with the `<title>` and Open Graph meta tags
//! swapped for a product's name, description, and image, so crawlers that do
//! not execute scripts see real product metadata. Read-only and safe to cache.

use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use mockall::automock;
use once_cell::sync::Lazy;
use regex::{NoExpand, Regex};
use reqwest::Client;
use thiserror::Error;

use crate::{
    cache::TtlCache,
    domain::products::{
        ProductsService, ProductsServiceError,
        records::{ProductRecord, ProductUuid},
    },
};

/// Longest product description carried into the meta tags.
const MAX_DESCRIPTION_CHARS: usize = 150;

/// Configuration for the preview renderer.
#[derive(Debug, Clone)]
pub struct PreviewConfig {
    /// Address of the live shell document, e.g.
    /// `"https://shop.example.com/index.html"`.
    pub shell_url: String,

    /// Description used when the product has none.
    pub fallback_description: String,

    /// Image used when the product has no featured image.
    pub fallback_image_url: String,

    /// How long a fetched shell document stays fresh.
    pub cache_ttl: Duration,
}

#[derive(Debug, Error)]
pub enum PreviewError {
    /// An HTTP transport error occurred while fetching the shell.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// Hosting returned a non-2xx response for the shell document.
    #[error("unexpected response from hosting: {0}")]
    UnexpectedResponse(String),

    /// The catalog read failed for a reason other than a missing product.
    #[error("catalog error")]
    Products(#[source] ProductsServiceError),
}

#[automock]
#[async_trait]
pub trait PreviewService: Send + Sync {
    /// Render the preview document for a product. `None` means the product
    /// does not exist and the caller should redirect to the site root.
    async fn render(&self, product: ProductUuid) -> Result<Option<String>, PreviewError>;
}

pub struct HtmlPreviewRenderer {
    products: Arc<dyn ProductsService>,
    http: Client,
    shell: TtlCache<String>,
    config: PreviewConfig,
    site_name: String,
}

impl HtmlPreviewRenderer {
    #[must_use]
    pub fn new(products: Arc<dyn ProductsService>, config: PreviewConfig, site_name: String) -> Self {
        Self {
            products,
            http: Client::new(),
            shell: TtlCache::new(config.cache_ttl),
            config,
            site_name,
        }
    }

    fn page_meta(&self, product: &ProductRecord) -> PageMeta {
        let description = product
            .description
            .as_deref()
            .filter(|d| !d.is_empty())
            .map_or_else(
                || self.config.fallback_description.clone(),
                |d| truncate_chars(d, MAX_DESCRIPTION_CHARS),
            );

        let image = product
            .featured_image_url
            .clone()
            .unwrap_or_else(|| self.config.fallback_image_url.clone());

        PageMeta {
            title: format!("{} | {}", product.name, self.site_name),
            description,
            image,
        }
    }
}

impl std::fmt::Debug for HtmlPreviewRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HtmlPreviewRenderer")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl PreviewService for HtmlPreviewRenderer {
    async fn render(&self, product: ProductUuid) -> Result<Option<String>, PreviewError> {
        let product = match self.products.get_product(product).await {
            Ok(product) => product,
            Err(ProductsServiceError::NotFound) => return Ok(None),
            Err(error) => return Err(PreviewError::Products(error)),
        };

        let shell = self
            .shell
            .get_or_refresh(|| fetch_shell(&self.http, &self.config.shell_url))
            .await?;

        Ok(Some(inject_meta_tags(&shell, &self.page_meta(&product))))
    }
}

async fn fetch_shell(http: &Client, url: &str) -> Result<String, PreviewError> {
    let response = http.get(url).send().await?;

    if !response.status().is_success() {
        let status = response.status();

        return Err(PreviewError::UnexpectedResponse(format!(
            "shell request failed with status {status}"
        )));
    }

    Ok(response.text().await?)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PageMeta {
    pub title: String,
    pub description: String,
    pub image: String,
}

static TITLE_RE: Lazy<Regex> = Lazy::new(|| tag_pattern(r"<title>.*</title>"));

static DESCRIPTION_RE: Lazy<Regex> =
    Lazy::new(|| tag_pattern(r#"<meta name="description" content=".*" />"#));

static OG_TITLE_RE: Lazy<Regex> =
    Lazy::new(|| tag_pattern(r#"<meta property="og:title" content=".*" />"#));

static OG_DESCRIPTION_RE: Lazy<Regex> =
    Lazy::new(|| tag_pattern(r#"<meta property="og:description" content=".*" />"#));

static OG_IMAGE_RE: Lazy<Regex> =
    Lazy::new(|| tag_pattern(r#"<meta property="og:image" content=".*" />"#));

fn tag_pattern(pattern: &str) -> Regex {
    #[expect(clippy::expect_used, reason = "patterns are compile-time constants")]
    let regex = Regex::new(pattern).expect("tag pattern must compile");

    regex
}

pub(crate) fn inject_meta_tags(html: &str, meta: &PageMeta) -> String {
    let title = &meta.title;
    let description = &meta.description;
    let image = &meta.image;

    let html = TITLE_RE.replace(html, NoExpand(&format!("<title>{title}</title>")));
    let html = DESCRIPTION_RE.replace(
        &html,
        NoExpand(&format!(r#"<meta name="description" content="{description}" />"#)),
    );
    let html = OG_TITLE_RE.replace(
        &html,
        NoExpand(&format!(r#"<meta property="og:title" content="{title}" />"#)),
    );
    let html = OG_DESCRIPTION_RE.replace(
        &html,
        NoExpand(&format!(
            r#"<meta property="og:description" content="{description}" />"#
        )),
    );
    let html = OG_IMAGE_RE.replace(
        &html,
        NoExpand(&format!(r#"<meta property="og:image" content="{image}" />"#)),
    );

    html.into_owned()
}

fn truncate_chars(value: &str, max_chars: usize) -> String {
    value.chars().take(max_chars).collect()
}

//! Product wire payloads.

use std::collections::BTreeMap;

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};

use emporia_app::domain::products::data::ProductDetails;

/// Product fields shared by create and update requests.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductDetailsRequest {
    pub name: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub category: Option<String>,

    /// Base price in minor currency units
    pub price: u64,

    pub stock: u64,

    #[serde(default)]
    pub featured_image_url: Option<String>,

    #[serde(default)]
    pub gallery_image_urls: Vec<String>,

    #[serde(default)]
    pub detail_image_urls: Vec<String>,

    /// Option name to surcharge in minor currency units
    #[serde(default)]
    pub options: BTreeMap<String, u64>,
}

impl From<ProductDetailsRequest> for ProductDetails {
    fn from(request: ProductDetailsRequest) -> Self {
        ProductDetails {
            name: request.name,
            description: request.description,
            category: request.category,
            price: request.price,
            stock: request.stock,
            featured_image_url: request.featured_image_url,
            gallery_image_urls: request.gallery_image_urls,
            detail_image_urls: request.detail_image_urls,
            options: request.options,
        }
    }
}

//! Get Product Handler

use std::{collections::BTreeMap, string::ToString, sync::Arc};

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use emporia_app::domain::products::records::ProductRecord;

use crate::{extensions::*, products::errors::into_status_error, state::State};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductResponse {
    /// The unique identifier of the product
    pub uuid: Uuid,

    /// Display name
    pub name: String,

    /// Long-form description
    pub description: Option<String>,

    /// Category slug
    pub category: Option<String>,

    /// Base price in minor currency units
    pub price: u64,

    /// Units currently in stock
    pub stock: u64,

    /// Featured image address
    pub featured_image_url: Option<String>,

    /// Gallery image addresses
    pub gallery_image_urls: Vec<String>,

    /// Detail image addresses
    pub detail_image_urls: Vec<String>,

    /// Option name to surcharge in minor currency units
    pub options: BTreeMap<String, u64>,

    /// The date and time the product was created
    pub created_at: String,

    /// The date and time the product was last updated
    pub updated_at: String,

    /// The date and time the product was deleted
    pub deleted_at: Option<String>,
}

impl From<ProductRecord> for ProductResponse {
    fn from(product: ProductRecord) -> Self {
        ProductResponse {
            uuid: product.uuid.into(),
            name: product.name,
            description: product.description,
            category: product.category,
            price: product.price,
            stock: product.stock,
            featured_image_url: product.featured_image_url,
            gallery_image_urls: product.gallery_image_urls,
            detail_image_urls: product.detail_image_urls,
            options: product.options,
            created_at: product.created_at.to_string(),
            updated_at: product.updated_at.to_string(),
            deleted_at: product.deleted_at.as_ref().map(ToString::to_string),
        }
    }
}

/// Get Product Handler
///
/// Returns a product.
#[endpoint(tags("products"), summary = "Get Product")]
pub(crate) async fn handler(
    product: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<ProductResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let product = state
        .app
        .products
        .get_product(product.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(product.into()))
}

//! Products Data

use std::collections::BTreeMap;

use crate::domain::products::records::ProductUuid;

/// Product detail fields, shared by create and update payloads.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProductDetails {
    pub name: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub price: u64,
    pub stock: u64,
    pub featured_image_url: Option<String>,
    pub gallery_image_urls: Vec<String>,
    pub detail_image_urls: Vec<String>,
    pub options: BTreeMap<String, u64>,
}

/// New Product Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProduct {
    pub uuid: ProductUuid,
    pub details: ProductDetails,
}

/// Product Update Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductUpdate {
    pub details: ProductDetails,
}

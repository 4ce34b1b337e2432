//! Product Records

use std::collections::BTreeMap;

use jiff::Timestamp;

use crate::uuids::TypedUuid;

/// Product UUID
pub type ProductUuid = TypedUuid<ProductRecord>;

/// Product Record
///
/// All amounts are integer minor currency units (paise). `options` maps an
/// add-on name to its fixed surcharge.
#[derive(Debug, Clone)]
pub struct ProductRecord {
    pub uuid: ProductUuid,
    pub name: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub price: u64,
    pub stock: u64,
    pub featured_image_url: Option<String>,
    pub gallery_image_urls: Vec<String>,
    pub detail_image_urls: Vec<String>,
    pub options: BTreeMap<String, u64>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub deleted_at: Option<Timestamp>,
}

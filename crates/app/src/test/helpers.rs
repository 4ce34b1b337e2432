//! Shared fixture builders.

use crate::domain::{orders::records::DeliveryDetails, products::data::ProductDetails};

pub(crate) fn saree(name: &str, price: u64, stock: u64) -> ProductDetails {
    ProductDetails {
        name: name.to_string(),
        description: Some("Handwoven Banarasi weave".to_string()),
        category: Some("sarees".to_string()),
        price,
        stock,
        featured_image_url: Some("https://img.example/saree.jpg".to_string()),
        gallery_image_urls: vec!["https://img.example/saree-2.jpg".to_string()],
        detail_image_urls: vec![],
        options: std::collections::BTreeMap::new(),
    }
}

pub(crate) fn delivery() -> DeliveryDetails {
    DeliveryDetails {
        email: "asha@example.com".to_string(),
        first_name: "Asha".to_string(),
        last_name: Some("Gupta".to_string()),
        address: "12 Dashashwamedh Road".to_string(),
        apartment: None,
        city: "Varanasi".to_string(),
        state: "Uttar Pradesh".to_string(),
        pincode: "221001".to_string(),
        phone: Some("+91 99999 00000".to_string()),
    }
}

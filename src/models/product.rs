// src/models/product.rs

//! Product record data structure.

use serde::{Deserialize, Serialize};

/// Sentinel substituted when a detail page has no description.
pub const NO_DESCRIPTION: &str = "No Description";

/// One product assembled from a listing item and its detail page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProductRecord {
    /// Sequence number, 1-based, restarting for each listing page
    pub id: u32,

    /// Detail page URL as found on the listing item
    pub href: String,

    /// Thumbnail image reference (empty if the item has no usable image)
    pub thumbnail: String,

    /// Product name decoded from the thumbnail alt attribute
    pub name: String,

    /// Gallery image references, with the thumbnail appended last
    pub product_images: Vec<String>,

    /// Detail page description text
    pub description: String,

    /// Brand decoded from the thumbnail alt attribute
    pub brand: String,

    /// Category decoded from the thumbnail alt attribute
    pub category: String,
}

use std::collections::HashMap;

use liquid::Object;
use serde::{Deserialize, Serialize};

/// SEO and social-card fields for one page
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageMetadata {
    pub title: Option<String>,
    pub description: Option<String>,
    pub canonical_url: Option<String>,
    pub image_url: Option<String>,

    /// Open Graph content type, e.g. `website`
    #[serde(rename = "type")]
    pub og_type: Option<String>,

    /// Twitter card type, e.g. `summary_large_image`
    pub twitter_card: Option<String>,

    pub image_width: Option<u32>,
    pub image_height: Option<u32>,
    pub keywords: Option<Vec<String>>,
}

impl PageMetadata {
    /// Convert to a Liquid object for the `page_meta` template variable
    pub fn to_liquid(&self) -> Object {
        match liquid::to_object(self) {
            Ok(obj) => obj,
            Err(e) => {
                log::warn!("Failed to convert page metadata for templates: {}", e);
                Object::new()
            }
        }
    }
}

/// Page metadata keyed by logical page name
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MetadataMap {
    pages: HashMap<String, PageMetadata>,
}

impl MetadataMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, page_name: &str, metadata: PageMetadata) {
        self.pages.insert(page_name.to_string(), metadata);
    }

    /// Metadata for a page, empty when the page has none
    pub fn get(&self, page_name: &str) -> PageMetadata {
        self.pages.get(page_name).cloned().unwrap_or_default()
    }

    /// Layer `other` on top of this map, replacing whole entries
    pub fn merge(&mut self, other: MetadataMap) {
        self.pages.extend(other.pages);
    }
}

impl FromIterator<(String, PageMetadata)> for MetadataMap {
    fn from_iter<I: IntoIterator<Item = (String, PageMetadata)>>(iter: I) -> Self {
        MetadataMap { pages: iter.into_iter().collect() }
    }
}

mod model;
mod metadata;
pub mod site;

pub use model::{ChangeFrequency, PageEntry, PageMap};
pub use metadata::{MetadataMap, PageMetadata};

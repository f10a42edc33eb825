//! Image tooling for the static assets: WebP siblings, placeholders for
//! referenced-but-missing images, favicon sets, explicit `<img>` sizes and
//! responsive `<picture>` markup.

pub mod dimensions;
pub mod favicon;
pub mod placeholder;
pub mod responsive;
pub mod webp;

pub use dimensions::process_directory;
pub use favicon::generate_favicons;
pub use placeholder::create_missing;
pub use webp::convert_directory;

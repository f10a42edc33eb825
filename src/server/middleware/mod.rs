pub mod security;

pub use security::{security_headers_layer, ContentSecurityPolicy};

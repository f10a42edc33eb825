mod absolute_url;
mod static_url;
mod responsive_image;

use liquid::ParserBuilder;

pub use static_url::STATIC_PREFIX;

/// Register custom filters for use in Liquid templates
pub fn register_filters(parser_builder: ParserBuilder, site_url: &str) -> ParserBuilder {
    parser_builder
        .filter(absolute_url::AbsoluteUrlFilterParser {
            site_url: site_url.to_string(),
        })
        .filter(static_url::StaticUrlFilterParser)
        .filter(responsive_image::ResponsiveImage)
}

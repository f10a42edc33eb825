//! The pages this site ships with and their default social metadata.

use crate::pages::metadata::{MetadataMap, PageMetadata};
use crate::pages::model::{ChangeFrequency, PageEntry};

/// Built-in page list, in render order
pub fn default_pages() -> Vec<PageEntry> {
    vec![
        PageEntry::new("landing.html", "index.html", true, ChangeFrequency::Weekly, 1.0),
        PageEntry::new("privacy.html", "privacy.html", true, ChangeFrequency::Monthly, 0.5),
        PageEntry::new("terms.html", "terms.html", true, ChangeFrequency::Monthly, 0.5),
        PageEntry::new("contact.html", "contact.html", true, ChangeFrequency::Monthly, 0.7),
        PageEntry::new("thanks.html", "thanks.html", false, ChangeFrequency::Monthly, 0.3),
    ]
}

fn page(
    base_url: &str,
    path: &str,
    title: &str,
    description: &str,
    image: &str,
) -> PageMetadata {
    PageMetadata {
        title: Some(title.to_string()),
        description: Some(description.to_string()),
        canonical_url: Some(format!("{}{}", base_url, path)),
        image_url: Some(format!("{}/static/img/{}", base_url, image)),
        og_type: Some("website".to_string()),
        twitter_card: Some("summary_large_image".to_string()),
        image_width: Some(1200),
        image_height: Some(630),
        keywords: None,
    }
}

/// Default metadata for the built-in pages, with absolute URLs under `base_url`
pub fn default_metadata(base_url: &str, site_name: &str) -> MetadataMap {
    let base = base_url.trim_end_matches('/');
    let mut map = MetadataMap::new();

    let mut landing = page(
        base,
        "/",
        &format!("{} | Understand what your customers feel", site_name),
        "Sentiment analysis for customer conversations. Join the waitlist for early access.",
        "og-cover.png",
    );
    landing.keywords = Some(vec![
        "sentiment analysis".to_string(),
        "customer feedback".to_string(),
        "AI".to_string(),
    ]);
    map.insert("landing", landing);

    map.insert("privacy", page(
        base,
        "/privacy.html",
        &format!("Privacy Policy | {}", site_name),
        "How we collect, use and protect your personal information.",
        "og-cover.png",
    ));
    map.insert("terms", page(
        base,
        "/terms.html",
        &format!("Terms of Service | {}", site_name),
        "The terms that govern use of our website and services.",
        "og-cover.png",
    ));
    map.insert("contact", page(
        base,
        "/contact.html",
        &format!("Contact | {}", site_name),
        "Questions, partnerships or press: get in touch with the team.",
        "og-cover.png",
    ));
    map.insert("thanks", page(
        base,
        "/thanks.html",
        &format!("You're on the list | {}", site_name),
        "Thanks for joining the waitlist. We'll be in touch soon.",
        "og-thanks.png",
    ));

    map
}

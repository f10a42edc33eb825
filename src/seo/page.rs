use once_cell::sync::Lazy;
use regex::Regex;

use crate::seo::og::extract_meta_tags;

static TITLE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?is)<title[^>]*>(.*?)</title>").unwrap());
static CANONICAL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?i)<link\b[^>]*rel\s*=\s*["']canonical["']"#).unwrap());
static IMG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?is)<img\b[^>]*>").unwrap());
static ALT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\balt\s*=").unwrap());

/// On-page basics: title length, description, a single H1, canonical link
/// and alt text on images
pub fn basic_issues(html: &str) -> Vec<String> {
    let mut issues = Vec::new();
    let meta = extract_meta_tags(html);

    match TITLE_RE.captures(html) {
        None => issues.push("Missing title tag".to_string()),
        Some(cap) => {
            let title = cap[1].trim().chars().count();
            if title > 60 {
                issues.push(format!("Title too long ({} chars)", title));
            } else if title < 10 {
                issues.push(format!("Title too short ({} chars)", title));
            }
        }
    }

    if !meta.contains_key("description") {
        issues.push("Missing meta description".to_string());
    }

    let h1_count = html.to_ascii_lowercase().matches("<h1").count();
    if h1_count == 0 {
        issues.push("Missing H1 heading".to_string());
    } else if h1_count > 1 {
        issues.push(format!("Multiple H1 headings ({})", h1_count));
    }

    if !CANONICAL_RE.is_match(html) {
        issues.push("Missing canonical link".to_string());
    }

    let without_alt = IMG_RE.find_iter(html).filter(|m| !ALT_RE.is_match(m.as_str())).count();
    if without_alt > 0 {
        issues.push(format!("{} image(s) missing alt text", without_alt));
    }

    issues
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_page() {
        let html = r#"<title>Acme waitlist for teams</title>
<meta name="description" content="Join">
<link rel="canonical" href="https://example.com/">
<h1>Acme</h1><img src="a.png" alt="A">"#;
        assert!(basic_issues(html).is_empty());
    }

    #[test]
    fn test_problems_reported() {
        let html = "<title>Hi</title><h1>A</h1><h1>B</h1><img src=\"a.png\">";
        let issues = basic_issues(html);
        assert!(issues.contains(&"Title too short (2 chars)".to_string()));
        assert!(issues.contains(&"Missing meta description".to_string()));
        assert!(issues.contains(&"Multiple H1 headings (2)".to_string()));
        assert!(issues.contains(&"Missing canonical link".to_string()));
        assert!(issues.contains(&"1 image(s) missing alt text".to_string()));
    }
}

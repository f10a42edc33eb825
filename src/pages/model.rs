use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::utils::error::SiteError;

/// Output filename that maps to the site root
pub const INDEX_OUTPUT: &str = "index.html";

/// Sitemap change-frequency hint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeFrequency {
    Always,
    Hourly,
    Daily,
    Weekly,
    Monthly,
    Yearly,
    Never,
}

impl ChangeFrequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeFrequency::Always => "always",
            ChangeFrequency::Hourly => "hourly",
            ChangeFrequency::Daily => "daily",
            ChangeFrequency::Weekly => "weekly",
            ChangeFrequency::Monthly => "monthly",
            ChangeFrequency::Yearly => "yearly",
            ChangeFrequency::Never => "never",
        }
    }
}

impl fmt::Display for ChangeFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChangeFrequency {
    type Err = SiteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "always" => Ok(ChangeFrequency::Always),
            "hourly" => Ok(ChangeFrequency::Hourly),
            "daily" => Ok(ChangeFrequency::Daily),
            "weekly" => Ok(ChangeFrequency::Weekly),
            "monthly" => Ok(ChangeFrequency::Monthly),
            "yearly" => Ok(ChangeFrequency::Yearly),
            "never" => Ok(ChangeFrequency::Never),
            other => Err(SiteError::Config(format!("Unknown change frequency: {}", other))),
        }
    }
}

/// One page of the site: which template renders it and where the result goes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageEntry {
    /// Template identifier, e.g. `landing.html`
    pub template: String,

    /// Output filename relative to the output directory
    pub output: String,

    /// Whether the page appears in the sitemap
    #[serde(default = "default_indexable")]
    pub indexable: bool,

    #[serde(default = "default_changefreq")]
    pub changefreq: ChangeFrequency,

    #[serde(default = "default_priority")]
    pub priority: f32,
}

fn default_indexable() -> bool {
    true
}

fn default_changefreq() -> ChangeFrequency {
    ChangeFrequency::Monthly
}

fn default_priority() -> f32 {
    0.5
}

impl PageEntry {
    pub fn new(
        template: &str,
        output: &str,
        indexable: bool,
        changefreq: ChangeFrequency,
        priority: f32,
    ) -> Self {
        PageEntry {
            template: template.to_string(),
            output: output.to_string(),
            indexable,
            changefreq,
            priority,
        }
    }

    /// Logical page name used to look up metadata (`landing.html` -> `landing`)
    pub fn page_name(&self) -> &str {
        self.template.strip_suffix(".html").unwrap_or(&self.template)
    }

    pub fn is_index(&self) -> bool {
        self.output == INDEX_OUTPUT
    }

    /// Request path the page is served under
    pub fn request_path(&self) -> String {
        if self.is_index() {
            "/".to_string()
        } else {
            format!("/{}", self.output)
        }
    }

    /// Page-type label injected into templates for structured data
    pub fn page_type(&self) -> &str {
        if self.is_index() {
            "home"
        } else {
            self.output.strip_suffix(".html").unwrap_or(&self.output)
        }
    }
}

/// Ordered, validated list of pages
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageMap {
    entries: Vec<PageEntry>,
}

impl PageMap {
    /// Build a page map, checking that outputs are unique and exactly one
    /// entry renders the site root. An empty map is accepted.
    pub fn new(entries: Vec<PageEntry>) -> Result<Self, SiteError> {
        let mut outputs = HashSet::new();
        for entry in &entries {
            if !outputs.insert(entry.output.as_str()) {
                return Err(SiteError::Config(format!(
                    "Duplicate output filename: {}", entry.output
                )));
            }
            if !(0.0..=1.0).contains(&entry.priority) {
                return Err(SiteError::Config(format!(
                    "Priority for page '{}' must be between 0.0 and 1.0, got {}",
                    entry.page_name(), entry.priority
                )));
            }
        }

        let index_count = entries.iter().filter(|e| e.is_index()).count();
        if !entries.is_empty() && index_count != 1 {
            return Err(SiteError::Config(format!(
                "Exactly one page must output {}, found {}", INDEX_OUTPUT, index_count
            )));
        }

        Ok(PageMap { entries })
    }

    pub fn entries(&self) -> &[PageEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PageEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn indexable(&self) -> impl Iterator<Item = &PageEntry> {
        self.entries.iter().filter(|e| e.indexable)
    }

    pub fn non_indexable(&self) -> impl Iterator<Item = &PageEntry> {
        self.entries.iter().filter(|e| !e.indexable)
    }

    /// Find the page served under a request path, accepting `/privacy` for `/privacy.html`
    pub fn find_by_path(&self, path: &str) -> Option<&PageEntry> {
        self.entries.iter().find(|e| {
            let request_path = e.request_path();
            request_path == path
                || request_path.strip_suffix(".html").map_or(false, |p| p == path)
        })
    }
}

impl<'a> IntoIterator for &'a PageMap {
    type Item = &'a PageEntry;
    type IntoIter = std::slice::Iter<'a, PageEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn landing() -> PageEntry {
        PageEntry::new("landing.html", "index.html", true, ChangeFrequency::Weekly, 1.0)
    }

    fn thanks() -> PageEntry {
        PageEntry::new("thanks.html", "thanks.html", false, ChangeFrequency::Monthly, 0.3)
    }

    #[test]
    fn test_request_path_and_page_type() {
        assert_eq!(landing().request_path(), "/");
        assert_eq!(landing().page_type(), "home");
        assert_eq!(thanks().request_path(), "/thanks.html");
        assert_eq!(thanks().page_type(), "thanks");
        assert_eq!(thanks().page_name(), "thanks");
    }

    #[test]
    fn test_rejects_duplicate_outputs() {
        let dup = PageEntry::new("other.html", "thanks.html", true, ChangeFrequency::Daily, 0.1);
        let err = PageMap::new(vec![landing(), thanks(), dup]).unwrap_err();
        assert!(err.to_string().contains("thanks.html"));
    }

    #[test]
    fn test_requires_single_index() {
        assert!(PageMap::new(vec![thanks()]).is_err());
        let second = PageEntry::new("home.html", "index.html", true, ChangeFrequency::Daily, 0.9);
        assert!(PageMap::new(vec![landing(), second]).is_err());
        assert!(PageMap::new(Vec::new()).unwrap().is_empty());
    }

    #[test]
    fn test_rejects_priority_out_of_range() {
        let mut bad = thanks();
        bad.priority = 1.5;
        assert!(PageMap::new(vec![landing(), bad]).is_err());
    }

    #[test]
    fn test_find_by_path() {
        let map = PageMap::new(vec![landing(), thanks()]).unwrap();
        assert_eq!(map.find_by_path("/").unwrap().template, "landing.html");
        assert_eq!(map.find_by_path("/thanks").unwrap().template, "thanks.html");
        assert_eq!(map.find_by_path("/thanks.html").unwrap().template, "thanks.html");
        assert!(map.find_by_path("/missing").is_none());
    }

    #[test]
    fn test_changefreq_parsing() {
        assert_eq!("Weekly".parse::<ChangeFrequency>().unwrap(), ChangeFrequency::Weekly);
        assert!("fortnightly".parse::<ChangeFrequency>().is_err());
        assert_eq!(ChangeFrequency::Monthly.to_string(), "monthly");
    }
}

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::config::defaults;
use crate::pages::{site, MetadataMap, PageEntry, PageMap};
use crate::utils::error::SiteError;

/// Mailing-list provider credentials
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MailingListConfig {
    /// Provider API key; the datacenter is the suffix after the last `-`
    #[serde(default)]
    pub api_key: Option<String>,

    /// Audience/list identifier
    #[serde(default)]
    pub list_id: Option<String>,
}

impl MailingListConfig {
    pub fn is_configured(&self) -> bool {
        self.api_key.as_deref().map_or(false, |k| !k.is_empty())
            && self.list_id.as_deref().map_or(false, |l| !l.is_empty())
    }
}

/// Web server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServeSettings {
    #[serde(default = "defaults::default_host")]
    pub host: String,

    #[serde(default = "defaults::default_port")]
    pub port: u16,
}

impl Default for ServeSettings {
    fn default() -> Self {
        ServeSettings {
            host: defaults::default_host(),
            port: defaults::default_port(),
        }
    }
}

/// Site configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Project root every relative path is resolved against
    #[serde(skip)]
    pub root: PathBuf,

    /// Absolute URL of the deployed site
    #[serde(default = "defaults::default_base_url")]
    pub base_url: String,

    #[serde(default = "defaults::default_site_name")]
    pub site_name: String,

    /// Analytics tracking code; absent disables the snippet
    #[serde(default)]
    pub tracking_code: Option<String>,

    #[serde(default = "defaults::default_templates_dir")]
    pub templates_dir: PathBuf,

    #[serde(default = "defaults::default_output_dir")]
    pub output_dir: PathBuf,

    #[serde(default = "defaults::default_static_dir")]
    pub static_dir: PathBuf,

    #[serde(default = "defaults::default_subscriber_log")]
    pub subscriber_log: PathBuf,

    #[serde(default = "defaults::default_pages")]
    pub pages: Vec<PageEntry>,

    /// Per-page metadata, layered over the built-in defaults
    #[serde(default)]
    pub metadata: MetadataMap,

    #[serde(default)]
    pub mailing_list: MailingListConfig,

    #[serde(default)]
    pub server: ServeSettings,
}

impl Default for SiteConfig {
    fn default() -> Self {
        SiteConfig {
            root: PathBuf::from("."),
            base_url: defaults::default_base_url(),
            site_name: defaults::default_site_name(),
            tracking_code: None,
            templates_dir: defaults::default_templates_dir(),
            output_dir: defaults::default_output_dir(),
            static_dir: defaults::default_static_dir(),
            subscriber_log: defaults::default_subscriber_log(),
            pages: defaults::default_pages(),
            metadata: MetadataMap::new(),
            mailing_list: MailingListConfig::default(),
            server: ServeSettings::default(),
        }
    }
}

impl SiteConfig {
    /// Base URL without a trailing slash
    pub fn base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    pub fn templates_path(&self) -> PathBuf {
        self.root.join(&self.templates_dir)
    }

    pub fn output_path(&self) -> PathBuf {
        self.root.join(&self.output_dir)
    }

    pub fn static_path(&self) -> PathBuf {
        self.root.join(&self.static_dir)
    }

    pub fn subscriber_log_path(&self) -> PathBuf {
        self.root.join(&self.subscriber_log)
    }

    /// Tracking code, treating an empty value as absent
    pub fn tracking_code(&self) -> Option<&str> {
        self.tracking_code.as_deref().filter(|c| !c.trim().is_empty())
    }

    pub fn page_map(&self) -> Result<PageMap, SiteError> {
        PageMap::new(self.pages.clone())
    }

    /// Built-in metadata with any configured entries layered on top
    pub fn metadata_map(&self) -> MetadataMap {
        let mut map = site::default_metadata(self.base_url(), &self.site_name);
        map.merge(self.metadata.clone());
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_tracking_code_is_absent() {
        let mut config = SiteConfig::default();
        config.tracking_code = Some("  ".to_string());
        assert!(config.tracking_code().is_none());
        config.tracking_code = Some("G-ABC123".to_string());
        assert_eq!(config.tracking_code(), Some("G-ABC123"));
    }

    #[test]
    fn test_configured_metadata_overrides_defaults() {
        let mut config = SiteConfig::default();
        config.metadata = serde_yaml::from_str("terms:\n  title: Legal\n").unwrap();
        let map = config.metadata_map();
        assert_eq!(map.get("terms").title.as_deref(), Some("Legal"));
        assert!(map.get("landing").title.is_some());
    }

    #[test]
    fn test_base_url_trims_slash() {
        let mut config = SiteConfig::default();
        config.base_url = "https://example.com/".to_string();
        assert_eq!(config.base_url(), "https://example.com");
    }
}

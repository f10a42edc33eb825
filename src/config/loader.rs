use std::fs;
use std::path::{Path, PathBuf};

use log::debug;

use crate::config::types::SiteConfig;
use crate::config::validation;
use crate::utils::error::SiteError;

/// Configuration file names to look for
const CONFIG_FILES: [&str; 3] = ["_config.yml", "_config.yaml", "_config.toml"];

/// Environment variables that override file settings
pub const ENV_TRACKING_CODE: &str = "GA_TRACKING_CODE";
pub const ENV_SITE_URL: &str = "SITE_URL";
pub const ENV_PORT: &str = "PORT";
pub const ENV_MAILCHIMP_API_KEY: &str = "MAILCHIMP_API_KEY";
pub const ENV_MAILCHIMP_LIST_ID: &str = "MAILCHIMP_LIST_ID";

/// Load site configuration from the project root.
///
/// An explicit `config_file` wins; otherwise the first of `_config.yml`,
/// `_config.yaml` or `_config.toml` found in `root` is used, and without any
/// file the built-in defaults apply. Environment variables are applied last.
pub fn load_config<P: AsRef<Path>>(
    root: P,
    config_file: Option<PathBuf>,
) -> Result<SiteConfig, SiteError> {
    let root = root.as_ref();

    let path = match config_file {
        Some(path) => Some(path),
        None => find_default_config_file(root),
    };

    let mut config = match path {
        Some(path) => {
            debug!("Loading configuration from {}", path.display());
            parse_config_file(&path)?
        }
        None => {
            debug!("No configuration file found in {}, using defaults", root.display());
            SiteConfig::default()
        }
    };
    config.root = root.to_path_buf();

    apply_env_overrides(&mut config, |key| std::env::var(key).ok());

    validation::validate_config(&config)?;

    debug!("Configuration loaded: {:?}", config);
    Ok(config)
}

/// Find the first default configuration file present in `root`
fn find_default_config_file(root: &Path) -> Option<PathBuf> {
    CONFIG_FILES
        .iter()
        .map(|name| root.join(name))
        .find(|path| path.exists())
}

/// Parse a configuration file based on its extension
fn parse_config_file(path: &Path) -> Result<SiteConfig, SiteError> {
    if !path.exists() {
        return Err(SiteError::Config(format!(
            "Configuration file not found: {}", path.display()
        )));
    }

    let content = fs::read_to_string(path)
        .map_err(|e| SiteError::Config(format!(
            "Failed to read configuration file {}: {}", path.display(), e
        )))?;

    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_else(|| "yml".to_string());

    match ext.as_str() {
        "yml" | "yaml" => serde_yaml::from_str(&content).map_err(|e| SiteError::Config(format!(
            "Failed to parse YAML configuration ({}): {}", path.display(), e
        ))),
        "toml" => toml::from_str(&content).map_err(|e| SiteError::Config(format!(
            "Failed to parse TOML configuration ({}): {}", path.display(), e
        ))),
        "json" => serde_json::from_str(&content).map_err(|e| SiteError::Config(format!(
            "Failed to parse JSON configuration ({}): {}", path.display(), e
        ))),
        other => Err(SiteError::Config(format!(
            "Unsupported configuration file format: {}", other
        ))),
    }
}

/// Apply environment overrides using `lookup` to read variables
pub fn apply_env_overrides<F>(config: &mut SiteConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(code) = lookup(ENV_TRACKING_CODE) {
        debug!("Tracking code taken from {}", ENV_TRACKING_CODE);
        config.tracking_code = Some(code);
    }

    if let Some(url) = lookup(ENV_SITE_URL).filter(|u| !u.is_empty()) {
        config.base_url = url;
    }

    if let Some(port) = lookup(ENV_PORT) {
        match port.parse() {
            Ok(port) => config.server.port = port,
            Err(_) => log::warn!("Ignoring invalid {} value: {}", ENV_PORT, port),
        }
    }

    if let Some(key) = lookup(ENV_MAILCHIMP_API_KEY) {
        config.mailing_list.api_key = Some(key);
    }

    if let Some(list) = lookup(ENV_MAILCHIMP_LIST_ID) {
        config.mailing_list.list_id = Some(list);
    }
}

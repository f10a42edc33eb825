use std::net::SocketAddr;
use std::path::PathBuf;

use crate::config::SiteConfig;
use crate::utils::error::SiteError;

/// Options for the development/production HTTP server
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind to (e.g. "127.0.0.1", "0.0.0.0")
    pub address: String,

    pub port: u16,

    /// Directory served under `/static`
    pub static_dir: PathBuf,

    /// SSL certificate path
    pub ssl_cert: Option<PathBuf>,

    /// SSL key path
    pub ssl_key: Option<PathBuf>,
}

impl ServerConfig {
    pub fn new(address: &str, port: u16, static_dir: PathBuf) -> Self {
        ServerConfig {
            address: address.to_string(),
            port,
            static_dir,
            ssl_cert: None,
            ssl_key: None,
        }
    }

    /// Server options from the site configuration, with optional overrides
    /// from the command line
    pub fn from_site(config: &SiteConfig, address: Option<&str>, port: Option<u16>) -> Self {
        ServerConfig::new(
            address.unwrap_or(&config.server.host),
            port.unwrap_or(config.server.port),
            config.static_path(),
        )
    }

    pub fn address_string(&self) -> String {
        format!("{}:{}", self.address, self.port)
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, SiteError> {
        self.address_string()
            .parse()
            .map_err(|e| SiteError::Server(format!("Invalid address {}: {}", self.address_string(), e)))
    }

    pub fn url(&self) -> String {
        let scheme = if self.ssl_cert.is_some() { "https" } else { "http" };
        format!("{}://{}:{}", scheme, self.address, self.port)
    }
}

use std::path::PathBuf;
use std::sync::Arc;

use crate::builder::SystemClock;
use crate::config::SiteConfig;
use crate::server::{self, ServerConfig};
use crate::utils::error::BoxResult;

/// Handle the serve command
pub async fn handle_serve_command(
    config: SiteConfig,
    host: Option<&str>,
    port: Option<u16>,
    ssl_cert: Option<&PathBuf>,
    ssl_key: Option<&PathBuf>,
) -> BoxResult<()> {
    let mut server_config = ServerConfig::from_site(&config, host, port);
    server_config.ssl_cert = ssl_cert.cloned();
    server_config.ssl_key = ssl_key.cloned();

    server::serve(&server_config, &config, Arc::new(SystemClock)).await?;
    Ok(())
}

use std::sync::Arc;

use log::{error, info};
use tokio::signal;

use crate::builder::Clock;
use crate::config::SiteConfig;
use crate::liquid::TemplateEngine;
use crate::server::app::build_router;
use crate::server::config::ServerConfig;
use crate::server::state::AppState;
use crate::subscribe::service_from_config;
use crate::utils::error::SiteError;

/// Serve the site until the process receives Ctrl+C
pub async fn serve(
    server_config: &ServerConfig,
    config: &SiteConfig,
    clock: Arc<dyn Clock>,
) -> Result<(), SiteError> {
    let pages = config.page_map()?;
    let templates = TemplateEngine::load(config.templates_path(), config.base_url())?;
    let subscriptions = service_from_config(config);

    if !server_config.static_dir.is_dir() {
        log::warn!("Static directory {} does not exist", server_config.static_dir.display());
    }

    let state = AppState::new(config.clone(), pages, templates, subscriptions, clock);
    let app = build_router(state, server_config);
    let addr = server_config.socket_addr()?;

    info!("Starting server at {}", server_config.url());
    info!("Templates: {}", config.templates_path().display());
    info!("Subscriber log: {}", config.subscriber_log_path().display());

    if let (Some(cert_path), Some(key_path)) = (&server_config.ssl_cert, &server_config.ssl_key) {
        #[cfg(feature = "tls")]
        {
            use axum_server::tls_rustls::RustlsConfig;

            let tls_config = RustlsConfig::from_pem_file(cert_path, key_path)
                .await
                .map_err(|e| SiteError::Server(format!("TLS configuration error: {}", e)))?;
            let server = axum_server::bind_rustls(addr, tls_config).serve(app.into_make_service());
            print_server_banner(server_config);

            tokio::select! {
                result = server => {
                    if let Err(e) = result {
                        error!("Server error: {}", e);
                        return Err(SiteError::Server(e.to_string()));
                    }
                    info!("Server stopped");
                },
                _ = signal::ctrl_c() => {
                    info!("Shutting down server (received Ctrl+C)...");
                },
            }
            return Ok(());
        }

        #[cfg(not(feature = "tls"))]
        {
            let _ = (cert_path, key_path);
            return Err(SiteError::Server(
                "TLS support was not enabled at build time; rebuild with the 'tls' feature".to_string(),
            ));
        }
    }

    let server = axum_server::bind(addr).serve(app.into_make_service());
    print_server_banner(server_config);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                error!("Server error: {}", e);
                return Err(SiteError::Server(e.to_string()));
            }
            info!("Server stopped");
        },
        _ = signal::ctrl_c() => {
            info!("Shutting down server (received Ctrl+C)...");
        },
    }

    Ok(())
}

fn print_server_banner(server_config: &ServerConfig) {
    println!("\n{}", "-".repeat(60));
    println!(" Sitepress Server");
    println!(" - URL: {}", server_config.url());
    println!(" - Static files: {}", server_config.static_dir.display());
    println!(" - Press Ctrl+C to stop");
    println!("{}\n", "-".repeat(60));
}

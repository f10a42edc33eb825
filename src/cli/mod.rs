pub mod commands;
pub mod logging;
pub mod types;

use clap::Parser;
use std::path::PathBuf;

use crate::config;
use crate::utils::error::BoxResult;

/// Run the command-line interface and return the process exit code
pub async fn run() -> i32 {
    let cli = types::Cli::parse();

    logging::init_logging(logging::level_for(cli.debug, cli.quiet));

    match dispatch(&cli).await {
        Ok(()) => 0,
        Err(e) => {
            log::error!("{}", e);
            1
        }
    }
}

async fn dispatch(cli: &types::Cli) -> BoxResult<()> {
    let root = cli.source.clone().unwrap_or_else(|| PathBuf::from("."));
    let config = config::load_config(&root, cli.config.clone())?;

    match &cli.command {
        Some(types::Commands::Build { output, base_url }) => {
            commands::handle_build_command(config, output.as_ref(), base_url.as_ref())
        }
        Some(types::Commands::Serve { host, port, ssl_cert, ssl_key }) => {
            commands::handle_serve_command(
                config,
                host.as_deref(),
                *port,
                ssl_cert.as_ref(),
                ssl_key.as_ref(),
            )
            .await
        }
        Some(types::Commands::CheckOg { dir, url, pages, verbose }) => {
            commands::handle_check_og_command(&config, dir.as_ref(), url.as_deref(), pages, *verbose).await
        }
        Some(types::Commands::Images { action }) => commands::handle_images_command(&config, action),
        None => {
            // Default to build command if none provided
            commands::handle_build_command(config, None, None)
        }
    }
}

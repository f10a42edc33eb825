use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Main CLI parser structure
#[derive(Parser, Debug)]
#[command(name = "sitepress")]
#[command(about = "Builds and serves a small marketing site", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Project root holding _config.yml and the templates (defaults to ./)
    #[arg(short, long, value_name = "DIR", global = true)]
    pub source: Option<PathBuf>,

    /// Custom configuration file
    #[arg(short, long, value_name = "CONFIG_FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose debugging
    #[arg(short = 'g', long, default_value_t = false, global = true)]
    pub debug: bool,

    /// Only print errors
    #[arg(short, long, default_value_t = false, global = true)]
    pub quiet: bool,
}

/// Subcommands for the CLI
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render every page, sitemap.xml and robots.txt (the default)
    #[command(alias = "b")]
    Build {
        /// Output directory (overrides output_dir from the config)
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,

        /// Absolute site URL (overrides base_url and SITE_URL)
        #[arg(short, long, value_name = "URL")]
        base_url: Option<String>,
    },

    /// Serve the site with the waitlist endpoint
    #[command(alias = "s", alias = "server")]
    Serve {
        /// Host to bind to
        #[arg(short = 'H', long, value_name = "HOST")]
        host: Option<String>,

        /// Port to listen on (defaults to PORT or 5000)
        #[arg(short = 'P', long, value_name = "PORT")]
        port: Option<u16>,

        /// SSL certificate (requires the `tls` feature)
        #[arg(long, value_name = "FILE", requires = "ssl_key")]
        ssl_cert: Option<PathBuf>,

        /// SSL private key (requires the `tls` feature)
        #[arg(long, value_name = "FILE", requires = "ssl_cert")]
        ssl_key: Option<PathBuf>,
    },

    /// Check Open Graph and Twitter card tags of rendered pages
    #[command(name = "check-og")]
    CheckOg {
        /// Build output directory to read pages from
        #[arg(long, value_name = "DIR", conflicts_with = "url")]
        dir: Option<PathBuf>,

        /// Base URL of a running site to fetch pages from
        #[arg(long, value_name = "URL")]
        url: Option<String>,

        /// Request paths to check (defaults to every configured page)
        #[arg(long, value_name = "PATH", num_args = 1..)]
        pages: Vec<String>,

        /// List every tag found
        #[arg(short = 'V', long, default_value_t = false)]
        verbose: bool,
    },

    /// Image asset tools
    Images {
        #[command(subcommand)]
        action: ImageCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum ImageCommands {
    /// Create .webp siblings for PNG/JPEG images
    Webp {
        /// Directory to scan (defaults to the static directory)
        dir: Option<PathBuf>,

        /// Re-encode images that already have a WebP sibling
        #[arg(short, long, default_value_t = false)]
        force: bool,
    },

    /// Create placeholders for referenced images that don't exist yet
    Placeholders,

    /// Generate favicons, touch icons and the web manifest
    Favicons {
        /// Source image, ideally square and at least 512px
        source: PathBuf,

        /// Output directory (defaults to <static>/img/icons)
        #[arg(short, long, value_name = "DIR")]
        out: Option<PathBuf>,
    },

    /// Add width/height attributes to <img> tags in HTML files
    Dimensions {
        /// Directory of HTML files (defaults to the output directory)
        dir: Option<PathBuf>,

        /// Directory root-relative image paths resolve against (defaults to the project root)
        #[arg(short, long, value_name = "DIR")]
        base: Option<PathBuf>,
    },
}

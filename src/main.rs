// Module declarations
mod builder;
mod cli;
mod config;
mod images;
mod liquid;
mod pages;
mod seo;
mod server;
mod subscribe;
mod utils;

#[tokio::main]
async fn main() {
    let code = cli::run().await;
    std::process::exit(code);
}

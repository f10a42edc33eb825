pub mod app;
pub mod config;
pub mod handlers;
pub mod middleware;
pub mod serve;
pub mod state;

pub use config::ServerConfig;
pub use serve::serve;

mod pages;
mod subscribe;

pub use pages::{handle_page, handle_robots, handle_sitemap};
pub use subscribe::handle_subscribe;

#[cfg(test)]
pub use subscribe::SubscribeReply;

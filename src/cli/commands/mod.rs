mod build;
mod check_og;
mod images;
mod serve;

pub use build::handle_build_command;
pub use check_og::handle_check_og_command;
pub use images::handle_images_command;
pub use serve::handle_serve_command;

//! CLI command implementations.

mod build;
mod dev;
mod excerpt;
mod init;

pub use build::build_site;
pub use dev::dev_server;
pub use excerpt::print_excerpt;
pub use init::init_site;

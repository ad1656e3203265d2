//! Subcommand implementations.

mod crawl;
mod fetch;

pub use crawl::run_crawl;
pub use fetch::run_fetch;

pub(crate) use crawl::crawl_phase;

//! Static site building for fig.
//!
//! Discovers markdown pages under a source directory and renders each one to
//! an HTML file under an output directory. Pages are rendered in parallel;
//! each page gets its own directive registers, so per-page counters such as
//! `figure_number` restart on every page.

mod builder;
mod page;
mod scanner;

pub use builder::{BuildError, BuildOptions, BuildReport, SiteBuilder};
pub use page::wrap_page;

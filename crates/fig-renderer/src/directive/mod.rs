//! Pluggable inline directives.
//!
//! Directives are named placeholders written as `:name` (optionally followed
//! by `[content]{attrs}`) that are replaced with computed text before the page
//! is rendered to HTML.
//!
//! # Architecture
//!
//! - [`DirectiveRegistry`]: handlers registered once per process, by name.
//! - [`DirectiveProcessor`]: created per page; scans the source in document
//!   order and invokes the matching handler for each occurrence.
//! - [`DirectiveContext`]: what a handler sees for one occurrence, including
//!   a mutable borrow of the page's [`PageRegisters`].
//!
//! Per-page state lives in the registers, never in handlers, so a registry
//! can be shared across threads while every page keeps its own counters.
//!
//! # Example
//!
//! ```
//! use fig_renderer::directive::{
//!     DirectiveArgs, DirectiveContext, DirectiveOutput, DirectiveProcessor,
//!     DirectiveRegistry, InlineDirective,
//! };
//!
//! struct KbdDirective;
//!
//! impl InlineDirective for KbdDirective {
//!     fn name(&self) -> &str { "kbd" }
//!
//!     fn process(&self, args: DirectiveArgs, _ctx: &mut DirectiveContext) -> DirectiveOutput {
//!         DirectiveOutput::html(format!("<kbd>{}</kbd>", args.content))
//!     }
//! }
//!
//! let registry = DirectiveRegistry::standard().with_inline(KbdDirective);
//! let mut processor = DirectiveProcessor::new(&registry);
//!
//! let output = processor.process("Figure :figure_number: press :kbd[Ctrl+C].");
//! assert_eq!(output, "Figure 2: press <kbd>Ctrl+C</kbd>.");
//! ```

mod args;
mod context;
mod inline;
mod output;
mod parser;
mod processor;
mod registers;
mod registry;

pub use args::DirectiveArgs;
pub use context::DirectiveContext;
pub use inline::InlineDirective;
pub use output::DirectiveOutput;
pub use processor::DirectiveProcessor;
pub use registers::PageRegisters;
pub use registry::DirectiveRegistry;

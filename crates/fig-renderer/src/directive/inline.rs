//! Inline directive trait.
//!
//! Inline directives use single-colon syntax: `:name` or `:name[content]{attrs}`

use super::{DirectiveArgs, DirectiveContext, DirectiveOutput};

/// Handler for inline directives.
///
/// A handler is registered once in a [`DirectiveRegistry`](super::DirectiveRegistry)
/// and invoked for every occurrence of its name, in document order.
///
/// # Thread Safety
///
/// Handlers are `Send + Sync` and take `&self`: one registry serves every
/// page, including pages rendered in parallel. State that must carry from one
/// occurrence to the next belongs in [`DirectiveContext::page`], which is
/// scoped to the page being rendered.
///
/// # Example
///
/// ```
/// use fig_renderer::directive::{DirectiveArgs, DirectiveContext, DirectiveOutput, InlineDirective};
///
/// struct KbdDirective;
///
/// impl InlineDirective for KbdDirective {
///     fn name(&self) -> &str { "kbd" }
///
///     fn process(&self, args: DirectiveArgs, _ctx: &mut DirectiveContext) -> DirectiveOutput {
///         DirectiveOutput::html(format!("<kbd>{}</kbd>", args.content))
///     }
/// }
/// ```
pub trait InlineDirective: Send + Sync {
    /// Directive name, matched against `:name`.
    fn name(&self) -> &str;

    /// Process one occurrence of the directive.
    fn process(&self, args: DirectiveArgs, ctx: &mut DirectiveContext) -> DirectiveOutput;
}

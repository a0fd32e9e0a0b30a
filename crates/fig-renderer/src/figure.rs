//! The `figure_number` directive.

use serde_json::Value;

use crate::directive::{DirectiveArgs, DirectiveContext, DirectiveOutput, InlineDirective};

/// Directive name and the page register it counts in.
pub const FIGURE_NUMBER: &str = "figure_number";

/// Emits a per-page figure number: `:figure_number`.
///
/// Each occurrence sets the page's `figure_number` register to 1 if it is
/// unset, increments it, and substitutes the new value. The first figure on a
/// page is therefore numbered **2**, then 3, 4, and so on. This matches the
/// numbering of existing sites built with the same tag and is kept as is;
/// seed the register with 0 to start at 1.
///
/// Arguments are accepted and ignored. If the register holds something other
/// than a non-negative integer the occurrence is left as written and a page
/// warning is recorded.
///
/// # Example
///
/// ```
/// use fig_renderer::FigureNumberDirective;
/// use fig_renderer::directive::{DirectiveArgs, DirectiveContext, InlineDirective, PageRegisters};
///
/// let mut registers = PageRegisters::new();
/// let mut warnings = Vec::new();
/// let mut ctx = DirectiveContext::new(&mut registers, &mut warnings);
///
/// let first = FigureNumberDirective.process(DirectiveArgs::default(), &mut ctx);
/// let second = FigureNumberDirective.process(DirectiveArgs::default(), &mut ctx);
///
/// assert_eq!(format!("{first:?} {second:?}"), r#"Html("2") Html("3")"#);
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct FigureNumberDirective;

impl InlineDirective for FigureNumberDirective {
    fn name(&self) -> &str {
        FIGURE_NUMBER
    }

    fn process(&self, _args: DirectiveArgs, ctx: &mut DirectiveContext) -> DirectiveOutput {
        let current = match ctx.page.get(FIGURE_NUMBER).map(Value::as_u64) {
            None => 1,
            Some(Some(n)) => n,
            Some(None) => {
                ctx.warn(format!("{FIGURE_NUMBER} register is not a number"));
                return DirectiveOutput::Skip;
            }
        };

        let Some(next) = current.checked_add(1) else {
            ctx.warn(format!("{FIGURE_NUMBER} register overflowed"));
            return DirectiveOutput::Skip;
        };

        ctx.page.insert(FIGURE_NUMBER, next);
        DirectiveOutput::html(next.to_string())
    }
}

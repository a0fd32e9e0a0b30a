//! Directive invocation context.
//!
//! Carries source location and the page's mutable registers into handlers.

use std::path::Path;

use super::PageRegisters;

/// Context passed to a directive handler for one invocation.
///
/// Created by [`DirectiveProcessor`](super::DirectiveProcessor) for each
/// directive occurrence. The `page` field is an exclusive borrow of the
/// registers belonging to the page being rendered; writes made here are
/// visible to later invocations on the same page only.
///
/// # Example
///
/// ```
/// use std::path::Path;
/// use fig_renderer::directive::{DirectiveContext, PageRegisters};
///
/// let mut registers = PageRegisters::new();
/// let mut warnings = Vec::new();
/// let mut ctx = DirectiveContext::new(&mut registers, &mut warnings)
///     .with_source_path(Path::new("docs/guide.md"))
///     .with_line(12);
///
/// ctx.page.insert("seen", true);
/// ctx.warn("something odd");
///
/// assert!(registers.contains("seen"));
/// assert_eq!(warnings, vec!["docs/guide.md:12: something odd"]);
/// ```
pub struct DirectiveContext<'a> {
    /// Path to the source file being rendered (if known).
    pub source_path: Option<&'a Path>,
    /// Line number where the directive appears (1-indexed).
    pub line: usize,
    /// Registers of the page being rendered.
    pub page: &'a mut PageRegisters,
    warnings: &'a mut Vec<String>,
}

impl<'a> DirectiveContext<'a> {
    /// Create a context over the given page registers and warning sink.
    pub fn new(page: &'a mut PageRegisters, warnings: &'a mut Vec<String>) -> Self {
        Self {
            source_path: None,
            line: 1,
            page,
            warnings,
        }
    }

    /// Set the source path.
    #[must_use]
    pub fn with_source_path(mut self, source_path: &'a Path) -> Self {
        self.source_path = Some(source_path);
        self
    }

    /// Set the line number.
    #[must_use]
    pub fn with_line(mut self, line: usize) -> Self {
        self.line = line;
        self
    }

    /// Record a page warning, prefixed with the directive's location.
    pub fn warn(&mut self, message: impl AsRef<str>) {
        let message = message.as_ref();
        let warning = match self.source_path {
            Some(path) => format!("{}:{}: {message}", path.display(), self.line),
            None => format!("line {}: {message}", self.line),
        };
        self.warnings.push(warning);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let mut registers = PageRegisters::new();
        let mut warnings = Vec::new();
        let ctx = DirectiveContext::new(&mut registers, &mut warnings);

        assert_eq!(ctx.source_path, None);
        assert_eq!(ctx.line, 1);
    }

    #[test]
    fn test_warn_without_path() {
        let mut registers = PageRegisters::new();
        let mut warnings = Vec::new();
        let mut ctx = DirectiveContext::new(&mut registers, &mut warnings).with_line(7);

        ctx.warn("bad value");

        assert_eq!(warnings, vec!["line 7: bad value"]);
    }

    #[test]
    fn test_page_writes_reach_registers() {
        let mut registers = PageRegisters::new();
        let mut warnings = Vec::new();
        {
            let ctx = DirectiveContext::new(&mut registers, &mut warnings);
            ctx.page.insert("figure_number", 5);
        }
        assert_eq!(registers.get_u64("figure_number"), Some(5));
    }
}

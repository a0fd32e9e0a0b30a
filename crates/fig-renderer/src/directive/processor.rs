//! Per-page directive expansion.

use std::path::PathBuf;

use crate::fence::FenceTracker;

use super::parser::{ParsedDirective, find_inline};
use super::{DirectiveContext, DirectiveOutput, DirectiveRegistry, PageRegisters};

/// Expands inline directives in one page's source.
///
/// A processor is created for every page render and owns that page's
/// [`PageRegisters`]. Directives are dispatched one at a time in document
/// order; fenced code blocks and code spans are copied through untouched.
///
/// # Example
///
/// ```
/// use fig_renderer::directive::{DirectiveProcessor, DirectiveRegistry};
///
/// let registry = DirectiveRegistry::standard();
/// let mut processor = DirectiveProcessor::new(&registry);
///
/// let output = processor.process("Figure :figure_number, Figure :figure_number");
/// assert_eq!(output, "Figure 2, Figure 3");
/// ```
pub struct DirectiveProcessor<'r> {
    registry: &'r DirectiveRegistry,
    source_path: Option<PathBuf>,
    registers: PageRegisters,
    fence: FenceTracker,
    warnings: Vec<String>,
}

impl<'r> DirectiveProcessor<'r> {
    /// Create a processor with empty page registers.
    #[must_use]
    pub fn new(registry: &'r DirectiveRegistry) -> Self {
        Self {
            registry,
            source_path: None,
            registers: PageRegisters::new(),
            fence: FenceTracker::new(),
            warnings: Vec::new(),
        }
    }

    /// Start from pre-seeded page registers.
    #[must_use]
    pub fn with_registers(mut self, registers: PageRegisters) -> Self {
        self.registers = registers;
        self
    }

    /// Set the path of the page being processed (used in warnings).
    #[must_use]
    pub fn with_source_path(mut self, source_path: impl Into<PathBuf>) -> Self {
        self.source_path = Some(source_path.into());
        self
    }

    /// Expand every directive in `input`.
    ///
    /// Line endings are kept as written. Consecutive non-blank lines outside
    /// fences are scanned as one block, so a code span that wraps onto the
    /// next line still hides the directives inside it.
    #[must_use]
    pub fn process(&mut self, input: &str) -> String {
        let mut output = String::with_capacity(input.len());
        // Byte offset and line number where the pending block starts.
        let mut block: Option<(usize, usize)> = None;
        let mut offset = 0;

        for (idx, raw) in input.split_inclusive('\n').enumerate() {
            let line = strip_line_ending(raw);
            let fence_line = self.fence.update(line);

            if fence_line || self.fence.in_fence() || line.trim().is_empty() {
                if let Some((start, line_num)) = block.take() {
                    self.expand_block(&input[start..offset], line_num, &mut output);
                }
                output.push_str(raw);
            } else if block.is_none() {
                block = Some((offset, idx + 1));
            }

            offset += raw.len();
        }

        if let Some((start, line_num)) = block {
            self.expand_block(&input[start..], line_num, &mut output);
        }

        output
    }

    fn expand_block(&mut self, block: &str, first_line: usize, output: &mut String) {
        let mut consumed = 0;

        while let Some((directive, start, end)) = find_inline(&block[consumed..]) {
            let (start, end) = (consumed + start, consumed + end);
            output.push_str(&block[consumed..start]);

            let line_num = first_line + block[..start].matches('\n').count();
            match self.dispatch(directive, line_num) {
                DirectiveOutput::Html(html) => output.push_str(&html),
                DirectiveOutput::Skip => output.push_str(&block[start..end]),
            }

            consumed = end;
        }

        output.push_str(&block[consumed..]);
    }

    fn dispatch(&mut self, directive: ParsedDirective, line_num: usize) -> DirectiveOutput {
        let registry = self.registry;
        let Some(handler) = registry.get(&directive.name) else {
            return DirectiveOutput::Skip;
        };

        let mut ctx =
            DirectiveContext::new(&mut self.registers, &mut self.warnings).with_line(line_num);
        if let Some(path) = self.source_path.as_deref() {
            ctx = ctx.with_source_path(path);
        }

        handler.process(directive.args, &mut ctx)
    }

    /// Page registers as left by the directives processed so far.
    #[must_use]
    pub fn registers(&self) -> &PageRegisters {
        &self.registers
    }

    /// Warnings recorded by directives on this page.
    #[must_use]
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Consume the processor, returning the page registers and warnings.
    #[must_use]
    pub fn into_parts(self) -> (PageRegisters, Vec<String>) {
        (self.registers, self.warnings)
    }
}

/// `line` without its trailing `\n` or `\r\n`.
fn strip_line_ending(line: &str) -> &str {
    let line = line.strip_suffix('\n').unwrap_or(line);
    line.strip_suffix('\r').unwrap_or(line)
}

//! Page rendering: directive expansion followed by markdown to HTML.

use std::path::Path;

use pulldown_cmark::{Event, HeadingLevel, Options, Parser, Tag, TagEnd, html};

use crate::directive::{DirectiveProcessor, DirectiveRegistry, PageRegisters};

/// Result of rendering one page.
#[derive(Clone, Debug)]
pub struct RenderResult {
    /// Rendered HTML fragment.
    pub html: String,
    /// Title extracted from the first H1 heading (if extraction was enabled).
    pub title: Option<String>,
    /// Warnings recorded by directives on this page.
    pub warnings: Vec<String>,
}

/// Renders markdown pages using a shared directive registry.
///
/// Every call to [`render`](Self::render) gets fresh [`PageRegisters`], so
/// directive state such as figure numbers never carries from one page to the
/// next. The renderer itself holds no per-page state and can be shared across
/// threads.
#[derive(Clone, Copy, Debug)]
pub struct PageRenderer<'r> {
    registry: &'r DirectiveRegistry,
    gfm: bool,
    extract_title: bool,
}

impl<'r> PageRenderer<'r> {
    /// Create a renderer with GFM enabled and title extraction disabled.
    #[must_use]
    pub fn new(registry: &'r DirectiveRegistry) -> Self {
        Self {
            registry,
            gfm: true,
            extract_title: false,
        }
    }

    /// Enable or disable GitHub Flavored Markdown (tables, strikethrough, task lists).
    #[must_use]
    pub fn with_gfm(mut self, enabled: bool) -> Self {
        self.gfm = enabled;
        self
    }

    /// Extract the first H1 heading's text as the page title.
    #[must_use]
    pub fn with_title_extraction(mut self) -> Self {
        self.extract_title = true;
        self
    }

    fn parser_options(&self) -> Options {
        if self.gfm {
            Options::ENABLE_TABLES
                | Options::ENABLE_STRIKETHROUGH
                | Options::ENABLE_TASKLISTS
                | Options::ENABLE_GFM
        } else {
            Options::empty()
        }
    }

    /// Render a page with empty registers.
    #[must_use]
    pub fn render(&self, source: &str, source_path: Option<&Path>) -> RenderResult {
        self.render_with_registers(source, source_path, PageRegisters::new())
            .0
    }

    /// Render a page starting from the given registers.
    ///
    /// Returns the registers as the page's directives left them.
    #[must_use]
    pub fn render_with_registers(
        &self,
        source: &str,
        source_path: Option<&Path>,
        registers: PageRegisters,
    ) -> (RenderResult, PageRegisters) {
        let mut processor = DirectiveProcessor::new(self.registry).with_registers(registers);
        if let Some(path) = source_path {
            processor = processor.with_source_path(path);
        }

        let expanded = processor.process(source);
        let (registers, warnings) = processor.into_parts();

        let mut title = TitleCollector::new(self.extract_title);
        let mut html = String::with_capacity(expanded.len() * 3 / 2);
        let events = Parser::new_ext(&expanded, self.parser_options()).inspect(|e| title.observe(e));
        html::push_html(&mut html, events);

        let result = RenderResult {
            html,
            title: title.finish(),
            warnings,
        };
        (result, registers)
    }
}

/// Collects the plain text of the first H1 heading.
struct TitleCollector {
    enabled: bool,
    active: bool,
    text: String,
    done: bool,
}

impl TitleCollector {
    fn new(enabled: bool) -> Self {
        Self {
            enabled,
            active: false,
            text: String::new(),
            done: false,
        }
    }

    fn observe(&mut self, event: &Event<'_>) {
        if !self.enabled || self.done {
            return;
        }
        match event {
            Event::Start(Tag::Heading {
                level: HeadingLevel::H1,
                ..
            }) => self.active = true,
            Event::End(TagEnd::Heading(HeadingLevel::H1)) => {
                self.active = false;
                self.done = true;
            }
            Event::Text(text) | Event::Code(text) if self.active => self.text.push_str(text),
            _ => {}
        }
    }

    fn finish(self) -> Option<String> {
        let title = self.text.trim();
        (self.done && !title.is_empty()).then(|| title.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FigureNumberDirective;
    use pretty_assertions::assert_eq;

    fn registry() -> DirectiveRegistry {
        DirectiveRegistry::new().with_inline(FigureNumberDirective)
    }

    #[test]
    fn test_three_figures_in_document_order() {
        let registry = registry();
        let source = "\
# Guide

Figure :figure_number: first

Figure :figure_number: second

Figure :figure_number: third
";
        let result = PageRenderer::new(&registry).render(source, None);

        assert_eq!(
            result.html,
            "<h1>Guide</h1>\n<p>Figure 2: first</p>\n<p>Figure 3: second</p>\n<p>Figure 4: third</p>\n"
        );
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_each_render_starts_fresh() {
        let registry = registry();
        let renderer = PageRenderer::new(&registry);

        let first = renderer.render(":figure_number :figure_number", None);
        let second = renderer.render(":figure_number", None);

        assert_eq!(first.html, "<p>2 3</p>\n");
        assert_eq!(second.html, "<p>2</p>\n");
    }

    #[test]
    fn test_title_extraction() {
        let registry = registry();
        let renderer = PageRenderer::new(&registry).with_title_extraction();

        let result = renderer.render("# The `fig` Guide\n\n# Second\n", None);
        assert_eq!(result.title.as_deref(), Some("The fig Guide"));
    }

    #[test]
    fn test_title_disabled_by_default() {
        let registry = registry();
        let result = PageRenderer::new(&registry).render("# Title\n", None);
        assert_eq!(result.title, None);
    }

    #[test]
    fn test_no_h1_no_title() {
        let registry = registry();
        let result = PageRenderer::new(&registry)
            .with_title_extraction()
            .render("## Only H2\n", None);
        assert_eq!(result.title, None);
    }

    #[test]
    fn test_code_block_untouched() {
        let registry = registry();
        let result = PageRenderer::new(&registry).render("```\n:figure_number\n```\n", None);
        assert_eq!(result.html, "<pre><code>:figure_number\n</code></pre>\n");
    }

    #[test]
    fn test_code_span_wrapping_lines_untouched() {
        let registry = registry();
        let result = PageRenderer::new(&registry).render("Use `the\n:figure_number` tag", None);

        assert!(result.html.contains(":figure_number</code>"));
        assert!(!result.html.contains('2'));
    }

    #[test]
    fn test_crlf_source() {
        let registry = registry();
        let result = PageRenderer::new(&registry).render("# T\r\n\r\nFigure :figure_number\r\n", None);
        assert_eq!(result.html, "<h1>T</h1>\n<p>Figure 2</p>\n");
    }

    #[test]
    fn test_gfm_toggle() {
        let registry = registry();
        let source = "| a |\n|---|\n| :figure_number |\n";

        let gfm = PageRenderer::new(&registry).render(source, None);
        assert!(gfm.html.contains("<td>2</td>"));

        let plain = PageRenderer::new(&registry).with_gfm(false).render(source, None);
        assert!(!plain.html.contains("<table>"));
    }

    #[test]
    fn test_render_with_registers() {
        let registry = registry();
        let mut seeded = PageRegisters::new();
        seeded.insert("figure_number", 0);

        let (result, registers) = PageRenderer::new(&registry).render_with_registers(
            ":figure_number",
            Some(Path::new("a.md")),
            seeded,
        );

        assert_eq!(result.html, "<p>1</p>\n");
        assert_eq!(registers.get_u64("figure_number"), Some(1));
    }

    #[test]
    fn test_warnings_carry_source_path() {
        let registry = registry();
        let mut seeded = PageRegisters::new();
        seeded.insert("figure_number", "x");

        let (result, _) = PageRenderer::new(&registry).render_with_registers(
            "\nFigure :figure_number",
            Some(Path::new("docs/page.md")),
            seeded,
        );

        assert_eq!(result.html, "<p>Figure :figure_number</p>\n");
        assert_eq!(
            result.warnings,
            vec!["docs/page.md:2: figure_number register is not a number"]
        );
    }
}

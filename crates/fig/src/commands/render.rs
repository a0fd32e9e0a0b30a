//! `fig render` command implementation.

use std::io::Write;
use std::path::{Path, PathBuf};

use clap::Args;
use fig_config::Config;
use fig_renderer::PageRenderer;
use fig_renderer::directive::DirectiveRegistry;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// Markdown file to render.
    file: PathBuf,

    /// Print only the HTML fragment, without the document wrapper.
    #[arg(long)]
    fragment: bool,

    /// Path to configuration file (default: auto-discover fig.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl RenderArgs {
    /// Execute the render command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or the file cannot be read.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = Config::load(self.config.as_deref(), None)?;
        let source = std::fs::read_to_string(&self.file)?;

        let html = render_page(&config, &source, &self.file, self.fragment, &output);
        std::io::stdout().lock().write_all(html.as_bytes())?;
        Ok(())
    }
}

/// Render `source` and report its warnings on stderr.
fn render_page(config: &Config, source: &str, path: &Path, fragment: bool, output: &Output) -> String {
    let registry = DirectiveRegistry::standard();
    let mut renderer = PageRenderer::new(&registry).with_gfm(config.render.gfm);
    if config.render.extract_title {
        renderer = renderer.with_title_extraction();
    }
    let result = renderer.render(source, Some(path));

    for warning in &result.warnings {
        output.warning(&format!("Warning: {warning}"));
    }

    if fragment {
        return result.html;
    }
    let title = result.title.unwrap_or_else(|| {
        path.file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default()
    });
    fig_site::wrap_page(&title, &result.html)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_render_fragment() {
        let html = render_page(
            &Config::default(),
            "Figure :figure_number, Figure :figure_number\n",
            Path::new("page.md"),
            true,
            &Output::new(),
        );
        assert_eq!(html, "<p>Figure 2, Figure 3</p>\n");
    }

    #[test]
    fn test_render_full_page_uses_heading_title() {
        let html = render_page(
            &Config::default(),
            "# Diagrams\n\n:figure_number\n",
            Path::new("page.md"),
            false,
            &Output::new(),
        );
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>Diagrams</title>"));
        assert!(html.contains("<p>2</p>"));
    }

    #[test]
    fn test_render_full_page_falls_back_to_file_stem() {
        let html = render_page(
            &Config::default(),
            ":figure_number\n",
            Path::new("guide/intro.md"),
            false,
            &Output::new(),
        );
        assert!(html.contains("<title>intro</title>"));
    }
}

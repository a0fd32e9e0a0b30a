//! Static site builder.

use std::fs;
use std::path::{Path, PathBuf};

use fig_renderer::PageRenderer;
use fig_renderer::directive::DirectiveRegistry;
use rayon::prelude::*;

use crate::page::wrap_page;
use crate::scanner::{PageRef, Scanner};

/// Options for a site build.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BuildOptions {
    /// Page file extension, without the leading dot.
    pub extension: String,
    /// Enable GitHub Flavored Markdown.
    pub gfm: bool,
    /// Use the first H1 as the document title.
    pub extract_title: bool,
    /// Render threads (rayon's global pool when unset).
    pub threads: Option<usize>,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            extension: "md".to_owned(),
            gfm: true,
            extract_title: true,
            threads: None,
        }
    }
}

/// Error returned by the site builder.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// Source directory does not exist or is not a directory.
    #[error("Source directory not found: {}", .0.display())]
    MissingSource(PathBuf),

    /// Reading a page or writing its output failed.
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        /// File or directory the operation was on.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The render thread pool could not be created.
    #[error("Failed to create thread pool: {0}")]
    ThreadPool(String),
}

/// Summary of a completed build.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct BuildReport {
    /// Written output files, relative to the output directory, sorted.
    pub pages: Vec<PathBuf>,
    /// Page warnings, prefixed with the page's relative source path.
    pub warnings: Vec<String>,
}

/// Rendered page waiting to be reported.
struct BuiltPage {
    output: PathBuf,
    warnings: Vec<String>,
}

/// Renders every page in a source tree to HTML.
///
/// The directive registry is shared by all pages; each page render owns its
/// own registers.
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use fig_renderer::directive::DirectiveRegistry;
/// use fig_site::{BuildOptions, SiteBuilder};
///
/// let builder = SiteBuilder::new(DirectiveRegistry::standard(), BuildOptions::default());
/// let report = builder.build(Path::new("docs"), Path::new("site")).unwrap();
/// println!("{} pages", report.pages.len());
/// ```
pub struct SiteBuilder {
    registry: DirectiveRegistry,
    options: BuildOptions,
}

impl SiteBuilder {
    /// Create a builder.
    #[must_use]
    pub fn new(registry: DirectiveRegistry, options: BuildOptions) -> Self {
        Self { registry, options }
    }

    /// Render all pages under `source_dir` into `output_dir`.
    ///
    /// `guide/setup.md` is written to `guide/setup.html`.
    ///
    /// # Errors
    ///
    /// Returns an error if the source directory is missing, a page cannot be
    /// read or written, or the thread pool cannot be created.
    pub fn build(&self, source_dir: &Path, output_dir: &Path) -> Result<BuildReport, BuildError> {
        if !source_dir.is_dir() {
            return Err(BuildError::MissingSource(source_dir.to_path_buf()));
        }

        let pages = Scanner::new(source_dir, &self.options.extension)
            .scan()
            .map_err(|source| BuildError::Io {
                path: source_dir.to_path_buf(),
                source,
            })?;

        tracing::info!(
            pages = pages.len(),
            source = %source_dir.display(),
            output = %output_dir.display(),
            "Building site"
        );

        let results: Vec<Result<BuiltPage, BuildError>> = match self.options.threads {
            Some(threads) => {
                let pool = rayon::ThreadPoolBuilder::new()
                    .num_threads(threads)
                    .build()
                    .map_err(|e| BuildError::ThreadPool(e.to_string()))?;
                pool.install(|| self.render_all(&pages, output_dir))
            }
            None => self.render_all(&pages, output_dir),
        };

        let mut report = BuildReport::default();
        for result in results {
            let page = result?;
            report.pages.push(page.output);
            report.warnings.extend(page.warnings);
        }

        tracing::info!(
            pages = report.pages.len(),
            warnings = report.warnings.len(),
            "Site build completed"
        );

        Ok(report)
    }

    fn render_all(&self, pages: &[PageRef], output_dir: &Path) -> Vec<Result<BuiltPage, BuildError>> {
        let mut renderer = PageRenderer::new(&self.registry).with_gfm(self.options.gfm);
        if self.options.extract_title {
            renderer = renderer.with_title_extraction();
        }

        pages
            .par_iter()
            .map(|page| render_one(&renderer, page, output_dir))
            .collect()
    }
}

fn render_one(
    renderer: &PageRenderer<'_>,
    page: &PageRef,
    output_dir: &Path,
) -> Result<BuiltPage, BuildError> {
    let source = fs::read_to_string(&page.path).map_err(io_error(&page.path))?;
    let result = renderer.render(&source, Some(&page.relative));

    let title = result.title.unwrap_or_else(|| {
        page.relative
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default()
    });

    let relative_output = page.relative.with_extension("html");
    let output_path = output_dir.join(&relative_output);
    if let Some(parent) = output_path.parent() {
        fs::create_dir_all(parent).map_err(io_error(parent))?;
    }
    fs::write(&output_path, wrap_page(&title, &result.html)).map_err(io_error(&output_path))?;

    tracing::debug!(page = %page.relative.display(), "Rendered page");

    Ok(BuiltPage {
        output: relative_output,
        warnings: result.warnings,
    })
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> BuildError {
    let path = path.to_path_buf();
    move |source| BuildError::Io { path, source }
}

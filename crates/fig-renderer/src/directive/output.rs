//! Directive output types.

/// Output from a directive invocation.
///
/// - [`Html`](Self::Html): text substituted at the directive's location
/// - [`Skip`](Self::Skip): leave the directive text in place unchanged
///
/// # Example
///
/// ```
/// use fig_renderer::directive::DirectiveOutput;
///
/// let output = DirectiveOutput::html("2");
/// assert_eq!(output, DirectiveOutput::Html("2".to_owned()));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DirectiveOutput {
    /// Replacement text. Passes through markdown rendering as inline HTML.
    Html(String),
    /// Don't handle this occurrence (pass through unchanged).
    Skip,
}

impl DirectiveOutput {
    /// Create an HTML output.
    #[must_use]
    pub fn html(s: impl Into<String>) -> Self {
        Self::Html(s.into())
    }
}

//! Markdown page rendering with per-page inline directives.
//!
//! This crate provides the [`figure_number`](FigureNumberDirective) directive,
//! the directive framework that hosts it, and a [`PageRenderer`] that expands
//! directives and renders the result to HTML with pulldown-cmark.
//!
//! # Example
//!
//! ```
//! use fig_renderer::PageRenderer;
//! use fig_renderer::directive::DirectiveRegistry;
//!
//! let registry = DirectiveRegistry::standard();
//! let result = PageRenderer::new(&registry).render(
//!     "Figure :figure_number. Overview\n\nFigure :figure_number. Detail",
//!     None,
//! );
//!
//! assert!(result.html.contains("Figure 2. Overview"));
//! assert!(result.html.contains("Figure 3. Detail"));
//! ```

pub mod directive;
mod fence;
mod figure;
mod renderer;

pub use figure::{FIGURE_NUMBER, FigureNumberDirective};
pub use renderer::{PageRenderer, RenderResult};

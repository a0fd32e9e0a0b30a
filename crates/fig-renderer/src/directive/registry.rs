//! Directive registration.

use std::fmt;

use super::InlineDirective;
use crate::FigureNumberDirective;

/// Named directive handlers, registered once and shared by every page.
///
/// Handlers are kept in registration order. Registering a name that is
/// already present replaces the earlier handler.
///
/// # Example
///
/// ```
/// use fig_renderer::directive::DirectiveRegistry;
///
/// let registry = DirectiveRegistry::standard();
/// assert!(registry.get("figure_number").is_some());
/// assert!(registry.get("unknown").is_none());
/// ```
#[derive(Default)]
pub struct DirectiveRegistry {
    inline_handlers: Vec<Box<dyn InlineDirective>>,
}

impl DirectiveRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with the built-in directives (`figure_number`).
    #[must_use]
    pub fn standard() -> Self {
        Self::new().with_inline(FigureNumberDirective)
    }

    /// Register an inline directive handler.
    #[must_use]
    pub fn with_inline<D: InlineDirective + 'static>(mut self, handler: D) -> Self {
        self.register(handler);
        self
    }

    /// Register an inline directive handler in place.
    pub fn register<D: InlineDirective + 'static>(&mut self, handler: D) {
        let name = handler.name().to_owned();

        match self.inline_handlers.iter().position(|h| h.name() == name) {
            Some(idx) => {
                tracing::warn!(directive = %name, "Replacing previously registered directive");
                self.inline_handlers[idx] = Box::new(handler);
            }
            None => self.inline_handlers.push(Box::new(handler)),
        }

        tracing::info!(directive = %name, "Custom directive '{name}' loaded successfully");
    }

    /// Look up a handler by directive name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&dyn InlineDirective> {
        self.inline_handlers
            .iter()
            .find(|h| h.name() == name)
            .map(|h| &**h)
    }

    /// Registered directive names, in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.inline_handlers.iter().map(|h| h.name())
    }

    /// Number of registered directives.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inline_handlers.len()
    }

    /// Whether no directives are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inline_handlers.is_empty()
    }
}

impl fmt::Debug for DirectiveRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

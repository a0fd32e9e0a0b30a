//! Directive argument parsing.
//!
//! Parses the optional `[content]{#id .class key="value"}` tail of a directive.

use std::collections::HashMap;

/// Arguments written after a directive name.
///
/// Directives that take no arguments (such as `figure_number`) receive an
/// empty value and ignore it.
///
/// # Example
///
/// ```
/// use fig_renderer::directive::DirectiveArgs;
///
/// let args = DirectiveArgs::parse("Overview", r#"#fig-1 .wide caption="System overview""#);
/// assert_eq!(args.content, "Overview");
/// assert_eq!(args.id.as_deref(), Some("fig-1"));
/// assert_eq!(args.classes, vec!["wide"]);
/// assert_eq!(args.get("caption"), Some("System overview"));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DirectiveArgs {
    /// Text from brackets: `[content]`.
    pub content: String,
    /// `#id` attribute.
    pub id: Option<String>,
    /// `.class` attributes, in source order.
    pub classes: Vec<String>,
    /// `key=value` attributes.
    pub attrs: HashMap<String, String>,
}

impl DirectiveArgs {
    /// Parse bracket content and the attribute string (without braces).
    #[must_use]
    pub fn parse(content: &str, attrs_str: &str) -> Self {
        let mut args = Self {
            content: content.to_owned(),
            ..Self::default()
        };

        for token in tokenize(attrs_str) {
            args.apply_token(token);
        }

        args
    }

    /// Whether the directive was written without any arguments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
            && self.id.is_none()
            && self.classes.is_empty()
            && self.attrs.is_empty()
    }

    /// Get an attribute value by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.attrs.get(key).map(String::as_str)
    }

    fn apply_token(&mut self, token: &str) {
        if let Some((key, value)) = token.split_once('=') {
            if !key.is_empty() {
                self.attrs.insert(key.to_owned(), unquote(value).to_owned());
            }
            return;
        }

        // Shorthand run such as `#id.class1.class2`
        let mut rest = token;
        while let Some(marker) = rest.chars().next() {
            let body = &rest[marker.len_utf8()..];
            let end = body.find(['#', '.']).unwrap_or(body.len());
            let name = &body[..end];
            if !name.is_empty() {
                match marker {
                    '#' => self.id = Some(name.to_owned()),
                    '.' => self.classes.push(name.to_owned()),
                    _ => {}
                }
            }
            rest = &body[end..];
        }
    }
}

/// Split an attribute string on whitespace, keeping quoted values intact.
fn tokenize(s: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut start = None;
    let mut quote = None;

    for (i, c) in s.char_indices() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') => {
                quote = Some(c);
                start.get_or_insert(i);
            }
            (None, c) if c.is_whitespace() => {
                if let Some(s0) = start.take() {
                    tokens.push(&s[s0..i]);
                }
            }
            (None, _) => {
                start.get_or_insert(i);
            }
        }
    }

    if let Some(s0) = start {
        tokens.push(&s[s0..]);
    }

    tokens
}

fn unquote(value: &str) -> &str {
    for q in ['"', '\''] {
        if let Some(inner) = value.strip_prefix(q).and_then(|v| v.strip_suffix(q)) {
            return inner;
        }
    }
    value
}

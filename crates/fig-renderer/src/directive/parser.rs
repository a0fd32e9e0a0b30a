//! Inline directive syntax scanning.
//!
//! Finds `:name[content]{attrs}` occurrences in a block of markdown text. Colon
//! runs of two or more (`::name`, `:::`) and anything inside a code span are
//! not inline directives and are left alone. A directive never spans a line
//! break, but a code span may.

use super::DirectiveArgs;

/// Inline directive found in a block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ParsedDirective {
    pub name: String,
    pub args: DirectiveArgs,
}

/// Find the first inline directive in `text`.
///
/// Returns the directive with its byte span `(start, end)` within `text`.
pub(crate) fn find_inline(text: &str) -> Option<(ParsedDirective, usize, usize)> {
    let bytes = text.as_bytes();
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'`' => i = skip_code_span(bytes, i),
            b':' => {
                let run = run_len(bytes, i, b':');
                if run == 1
                    && let Some((directive, end)) = parse_at(text, i)
                {
                    return Some((directive, i, end));
                }
                i += run;
            }
            _ => i += 1,
        }
    }

    None
}

/// Parse a directive whose colon sits at byte offset `colon`.
fn parse_at(text: &str, colon: usize) -> Option<(ParsedDirective, usize)> {
    let after = &text[colon + 1..];
    if !after.starts_with(is_name_char) {
        return None;
    }

    let name_len = after
        .find(|c: char| !is_name_char(c))
        .unwrap_or(after.len());
    let name = &after[..name_len];
    let mut pos = colon + 1 + name_len;

    let (content, consumed) = parse_delimited(&text[pos..], '[', ']');
    pos += consumed;

    let (attrs, consumed) = parse_delimited(&text[pos..], '{', '}');
    pos += consumed;

    let directive = ParsedDirective {
        name: name.to_owned(),
        args: DirectiveArgs::parse(content, attrs),
    };
    Some((directive, pos))
}

/// Directive names are ASCII alphanumerics, hyphens and underscores.
fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

/// Parse a balanced `open ... close` group at the start of `s`.
///
/// Returns the inner text and the bytes consumed, or `("", 0)` when `s` does
/// not start with a group that closes on the same line.
fn parse_delimited(s: &str, open: char, close: char) -> (&str, usize) {
    if !s.starts_with(open) {
        return ("", 0);
    }

    let mut depth = 0usize;
    for (i, c) in s.char_indices() {
        if c == '\n' {
            break;
        } else if c == open {
            depth += 1;
        } else if c == close {
            depth -= 1;
            if depth == 0 {
                return (&s[open.len_utf8()..i], i + close.len_utf8());
            }
        }
    }

    ("", 0)
}

fn run_len(bytes: &[u8], start: usize, byte: u8) -> usize {
    bytes[start..].iter().take_while(|&&b| b == byte).count()
}

/// Skip a backtick code span starting at `start`.
///
/// A span closes at the next backtick run of the same length. An unmatched
/// opening run is literal text and only the run itself is skipped.
fn skip_code_span(bytes: &[u8], start: usize) -> usize {
    let open = run_len(bytes, start, b'`');
    let mut j = start + open;

    while j < bytes.len() {
        if bytes[j] == b'`' {
            let close = run_len(bytes, j, b'`');
            if close == open {
                return j + close;
            }
            j += close;
        } else {
            j += 1;
        }
    }

    start + open
}

//! Code fence tracking.
//!
//! Directive syntax inside fenced code blocks is literal text, so the
//! directive processor asks this tracker before expanding a line.

/// Tracks fenced code block state during line-by-line processing.
///
/// Fences use three or more backticks or tildes. A closing fence must use the
/// same character, be at least as long as the opening one, and carry nothing
/// but whitespace after it.
#[derive(Debug, Default)]
pub(crate) struct FenceTracker {
    open: Option<(char, usize)>,
}

impl FenceTracker {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Whether the last line seen was inside (or opened) a fenced block.
    pub(crate) fn in_fence(&self) -> bool {
        self.open.is_some()
    }

    /// Feed the next line. Returns `true` if it opened or closed a fence.
    pub(crate) fn update(&mut self, line: &str) -> bool {
        let trimmed = line.trim_start();

        match self.open {
            Some((ch, len)) => {
                let closes = fence_run(trimmed)
                    .is_some_and(|(c, n)| c == ch && n >= len && trimmed[n..].trim().is_empty());
                if closes {
                    self.open = None;
                }
                closes
            }
            None => {
                self.open = fence_run(trimmed);
                self.open.is_some()
            }
        }
    }
}

/// Leading run of three or more backticks or tildes.
fn fence_run(trimmed: &str) -> Option<(char, usize)> {
    let first = trimmed.chars().next().filter(|c| matches!(c, '`' | '~'))?;
    let count = trimmed.chars().take_while(|&c| c == first).count();
    (count >= 3).then_some((first, count))
}

//! Page discovery by filesystem walking.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// A page source file found under the source directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PageRef {
    /// Absolute (or source-dir-joined) path to the page file.
    pub path: PathBuf,
    /// Path relative to the source directory.
    pub relative: PathBuf,
}

/// Finds page files with a given extension.
pub(crate) struct Scanner<'a> {
    source_dir: &'a Path,
    extension: &'a str,
}

impl<'a> Scanner<'a> {
    pub(crate) fn new(source_dir: &'a Path, extension: &'a str) -> Self {
        Self {
            source_dir,
            extension,
        }
    }

    /// Walk the source directory and return every page, sorted by relative path.
    ///
    /// Hidden entries (names starting with `.`) are skipped.
    pub(crate) fn scan(&self) -> io::Result<Vec<PageRef>> {
        let mut pages = Vec::new();
        self.scan_directory(self.source_dir, &mut pages)?;
        pages.sort_by(|a, b| a.relative.cmp(&b.relative));
        Ok(pages)
    }

    fn scan_directory(&self, dir: &Path, pages: &mut Vec<PageRef>) -> io::Result<()> {
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            if entry.file_name().to_string_lossy().starts_with('.') {
                continue;
            }

            let path = entry.path();
            if entry.file_type()?.is_dir() {
                self.scan_directory(&path, pages)?;
            } else if path
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case(self.extension))
            {
                let relative = path
                    .strip_prefix(self.source_dir)
                    .unwrap_or(&path)
                    .to_path_buf();
                pages.push(PageRef { path, relative });
            }
        }
        Ok(())
    }
}

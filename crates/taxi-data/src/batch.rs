use std::path::{Path, PathBuf};

use crate::feedback::Feedback;
use crate::locator::Locator;

/// One completed retrieval within a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchEntry {
    /// Position of the locator in the original request, 0-based.
    pub index: usize,
    pub locator: Locator,
    pub path: PathBuf,
}

/// Outcome of a fully successful batch. Entries follow request order,
/// whatever order the retrievals actually finished in.
#[derive(Debug, Clone, Default)]
pub struct BatchResult {
    pub entries: Vec<BatchEntry>,
    /// Non-fatal notices, e.g. retried attempts.
    pub feedback: Vec<Feedback>,
}

impl BatchResult {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        self.entries.iter().map(|entry| entry.path.as_path())
    }

    /// One progress line per file, numbered by result order.
    pub fn progress_lines(&self) -> Vec<String> {
        let total = self.entries.len();
        self.entries
            .iter()
            .enumerate()
            .map(|(i, entry)| format_progress(i + 1, total, &entry.path))
            .collect()
    }
}

/// Render `<position>/<total> | Downloaded file: <path>`, with both numbers
/// zero-padded to the digit width of `total`.
pub fn format_progress(position: usize, total: usize, path: &Path) -> String {
    let width = total.to_string().len();
    format!(
        "{position:0width$}/{total:0width$} | Downloaded file: {}",
        path.display()
    )
}

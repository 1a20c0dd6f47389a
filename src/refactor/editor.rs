//! Text edits against one file's contents

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::analysis::TextEdit;
use crate::error::{InjectLintError, Result};

/// Result of applying a batch of edits
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditOutcome {
    pub content: String,
    /// Edits that were applied, after whitespace expansion, in file order
    pub applied: Vec<TextEdit>,
    pub skipped: Vec<TextEdit>,
}

impl EditOutcome {
    pub fn changed(&self) -> bool {
        !self.applied.is_empty()
    }
}

pub struct FileEditor {
    path: PathBuf,
    content: String,
}

impl FileEditor {
    pub fn new(path: PathBuf, content: String) -> Self {
        Self { path, content }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content =
            std::fs::read_to_string(path).map_err(|e| InjectLintError::io(path, e))?;
        Ok(Self::new(path.to_path_buf(), content))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// 1-based line of a byte offset
    pub fn line_of(&self, offset: usize) -> usize {
        let end = offset.min(self.content.len());
        self.content.as_bytes()[..end]
            .iter()
            .filter(|b| **b == b'\n')
            .count()
            + 1
    }

    /// Apply `edits` without touching the file on disk.
    ///
    /// Identical edits collapse into one; an edit overlapping one already
    /// accepted is skipped. Insertions at the same offset keep their order.
    pub fn apply(&self, edits: &[TextEdit]) -> EditOutcome {
        let mut seen = HashSet::new();
        let mut candidates: Vec<TextEdit> = Vec::new();
        let mut skipped = Vec::new();

        for edit in edits {
            if edit.start > edit.end
                || edit.end > self.content.len()
                || !self.content.is_char_boundary(edit.start)
                || !self.content.is_char_boundary(edit.end)
            {
                warn!(
                    "Edit {}..{} is outside {}, skipping",
                    edit.start,
                    edit.end,
                    self.path.display()
                );
                skipped.push(edit.clone());
                continue;
            }
            let edit = self.expand_deletion(edit);
            if seen.insert((edit.start, edit.end, edit.replacement.clone())) {
                candidates.push(edit);
            }
        }

        // Stable: same-offset insertions stay in the order they were proposed
        candidates.sort_by_key(|e| (e.start, e.end));

        let mut applied: Vec<TextEdit> = Vec::new();
        let mut covered_until = 0;
        for edit in candidates {
            if edit.start < covered_until {
                warn!(
                    "Overlapping edit at {}:{} skipped",
                    self.path.display(),
                    self.line_of(edit.start)
                );
                skipped.push(edit);
                continue;
            }
            covered_until = covered_until.max(edit.end);
            applied.push(edit);
        }

        let mut content = self.content.clone();
        for edit in applied.iter().rev() {
            content.replace_range(edit.start..edit.end, &edit.replacement);
        }

        EditOutcome {
            content,
            applied,
            skipped,
        }
    }

    /// A pure deletion also takes the trailing blanks and line break, and
    /// the indentation when it empties its line
    fn expand_deletion(&self, edit: &TextEdit) -> TextEdit {
        if !edit.replacement.is_empty() || edit.is_insertion() {
            return edit.clone();
        }
        let bytes = self.content.as_bytes();

        let mut end = edit.end;
        while end < bytes.len() && (bytes[end] == b' ' || bytes[end] == b'\t') {
            end += 1;
        }
        let mut took_newline = false;
        if bytes.get(end) == Some(&b'\r') && bytes.get(end + 1) == Some(&b'\n') {
            end += 2;
            took_newline = true;
        } else if bytes.get(end) == Some(&b'\n') {
            end += 1;
            took_newline = true;
        }

        let mut start = edit.start;
        if took_newline {
            let line_start = self.content[..start].rfind('\n').map_or(0, |i| i + 1);
            if self.content[line_start..start]
                .bytes()
                .all(|b| b == b' ' || b == b'\t')
            {
                start = line_start;
            }
        }

        TextEdit::replace(edit.file.clone(), start, end, String::new())
    }
}

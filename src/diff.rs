//! Line diff used to preview proposed changes.
//!
//! The scan keeps one cursor per side and never looks ahead. When a line is
//! inserted or deleted the two sides stay shifted for the rest of the file,
//! so everything after the edit renders as removed/added pairs. Callers that
//! want a minimal diff should not use this module; the preview output shape
//! depends on the position-synchronized behavior.

use std::fmt;

/// One rendered row of a diff view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiffLine<'a> {
    /// Line present at the same position on both sides.
    Unchanged(&'a str),
    /// Line only in the old text.
    Removed(&'a str),
    /// Line only in the new text.
    Added(&'a str),
}

impl<'a> DiffLine<'a> {
    /// Text of the line without any marker.
    #[must_use]
    pub fn text(&self) -> &'a str {
        match *self {
            Self::Unchanged(text) | Self::Removed(text) | Self::Added(text) => text,
        }
    }

    /// Marker prefix used when printing the line.
    #[must_use]
    pub fn marker(&self) -> &'static str {
        match self {
            Self::Unchanged(_) => "  ",
            Self::Removed(_) => "- ",
            Self::Added(_) => "+ ",
        }
    }
}

impl fmt::Display for DiffLine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.marker(), self.text())
    }
}

/// Splits text into lines on `\n`.
///
/// A trailing newline yields a trailing empty line. The empty string has no
/// lines at all.
#[must_use]
pub fn split_lines(text: &str) -> Vec<&str> {
    if text.is_empty() {
        Vec::new()
    } else {
        text.split('\n').collect()
    }
}

/// Lazy iterator over the diff of two texts.
#[derive(Debug, Clone)]
pub struct LineDiff<'a> {
    old: Vec<&'a str>,
    new: Vec<&'a str>,
    i: usize,
    j: usize,
    // Set after a removal so the paired addition (if any) comes next.
    pending_added: bool,
}

impl<'a> LineDiff<'a> {
    /// Creates an iterator comparing `old` against `new`.
    #[must_use]
    pub fn new(old: &'a str, new: &'a str) -> Self {
        Self { old: split_lines(old), new: split_lines(new), i: 0, j: 0, pending_added: false }
    }
}

impl<'a> Iterator for LineDiff<'a> {
    type Item = DiffLine<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if std::mem::take(&mut self.pending_added) {
            if let Some(&line) = self.new.get(self.j) {
                self.j += 1;
                return Some(DiffLine::Added(line));
            }
        }

        match (self.old.get(self.i).copied(), self.new.get(self.j).copied()) {
            (Some(old), Some(new)) if old == new => {
                self.i += 1;
                self.j += 1;
                Some(DiffLine::Unchanged(old))
            }
            (Some(old), _) => {
                self.i += 1;
                self.pending_added = true;
                Some(DiffLine::Removed(old))
            }
            (None, Some(new)) => {
                self.j += 1;
                Some(DiffLine::Added(new))
            }
            (None, None) => None,
        }
    }
}

/// Computes the full diff of `old` against `new`.
#[must_use]
pub fn diff_lines<'a>(old: &'a str, new: &'a str) -> Vec<DiffLine<'a>> {
    LineDiff::new(old, new).collect()
}

/// Line counts per kind for a diff.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiffStats {
    /// Lines shown unchanged.
    pub unchanged: usize,
    /// Lines shown as removed.
    pub removed: usize,
    /// Lines shown as added.
    pub added: usize,
}

impl DiffStats {
    /// Tallies the given diff lines.
    #[must_use]
    pub fn from_lines(lines: &[DiffLine<'_>]) -> Self {
        lines.iter().fold(Self::default(), |mut stats, line| {
            match line {
                DiffLine::Unchanged(_) => stats.unchanged += 1,
                DiffLine::Removed(_) => stats.removed += 1,
                DiffLine::Added(_) => stats.added += 1,
            }
            stats
        })
    }

    /// Returns `true` when the diff contains no removed or added lines.
    #[must_use]
    pub fn is_identical(&self) -> bool {
        self.removed == 0 && self.added == 0
    }
}

impl fmt::Display for DiffStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "+{} -{} ={}", self.added, self.removed, self.unchanged)
    }
}

/// Renders diff lines as text, one marked line per row.
#[must_use]
pub fn render(lines: &[DiffLine<'_>]) -> String {
    lines.iter().map(ToString::to_string).collect::<Vec<_>>().join("\n")
}

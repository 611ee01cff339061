//! Preview panel state for a selected change.

use crate::changes::CodeChange;
use crate::diff::{diff_lines, DiffLine};

/// A change being previewed together with the store content it would replace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preview {
    /// The selected change.
    pub change: CodeChange,
    /// Content of the file in the store when the preview opened; the diff's old side.
    pub current_content: String,
}

/// Preview panel: closed, or showing one change.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PreviewState {
    /// Nothing selected.
    #[default]
    Closed,
    /// A change is selected.
    Previewing(Preview),
}

/// What selecting a change does to the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// The same path was selected again; the panel closes.
    Close,
    /// A different path (or nothing) was previewed; the panel opens on the new change.
    Open,
}

impl PreviewState {
    /// The change currently previewed, if any.
    #[must_use]
    pub fn change(&self) -> Option<&CodeChange> {
        match self {
            Self::Closed => None,
            Self::Previewing(preview) => Some(&preview.change),
        }
    }

    /// Returns `true` while a change is previewed.
    #[must_use]
    pub fn is_open(&self) -> bool {
        matches!(self, Self::Previewing(_))
    }

    /// Decides the transition for selecting `change`.
    ///
    /// Selection is keyed on the file path: reselecting any change to the
    /// previewed path toggles the panel closed.
    #[must_use]
    pub fn on_select(&self, change: &CodeChange) -> Selection {
        match self.change() {
            Some(current) if current.file_path == change.file_path => Selection::Close,
            _ => Selection::Open,
        }
    }

    /// What the panel shows, as a diff or as the raw proposed content.
    #[must_use]
    pub fn view(&self, diff_mode: bool) -> Option<PreviewView<'_>> {
        let Self::Previewing(preview) = self else {
            return None;
        };
        Some(if diff_mode {
            PreviewView::Diff(diff_lines(&preview.current_content, &preview.change.content))
        } else {
            PreviewView::Plain(&preview.change.content)
        })
    }
}

/// Rendered preview body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreviewView<'a> {
    /// Proposed content as plain text.
    Plain(&'a str),
    /// Diff of the current store content against the proposed content.
    Diff(Vec<DiffLine<'a>>),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::changes::ChangeKind;
    use chrono::{TimeZone, Utc};

    fn change(path: &str, content: &str, secs: i64) -> CodeChange {
        CodeChange::new(path, content, ChangeKind::Update, Utc.timestamp_opt(secs, 0).unwrap())
    }

    fn previewing(change: CodeChange, current: &str) -> PreviewState {
        PreviewState::Previewing(Preview { change, current_content: current.to_string() })
    }

    #[test]
    fn closed_panel_opens_on_select() {
        assert_eq!(PreviewState::Closed.on_select(&change("a.py", "", 1)), Selection::Open);
    }

    #[test]
    fn same_path_closes_even_for_a_different_change() {
        let state = previewing(change("a.py", "one", 1), "");
        assert_eq!(state.on_select(&change("a.py", "two", 2)), Selection::Close);
    }

    #[test]
    fn other_path_switches() {
        let state = previewing(change("a.py", "one", 1), "");
        assert_eq!(state.on_select(&change("b.py", "two", 2)), Selection::Open);
    }

    #[test]
    fn view_is_plain_or_diff() {
        let state = previewing(change("a.py", "a\nx", 1), "a\nb");
        assert_eq!(state.view(false), Some(PreviewView::Plain("a\nx")));
        assert_eq!(
            state.view(true),
            Some(PreviewView::Diff(vec![
                DiffLine::Unchanged("a"),
                DiffLine::Removed("b"),
                DiffLine::Added("x"),
            ]))
        );
        assert_eq!(PreviewState::Closed.view(true), None);
    }
}

use std::fmt;

use thiserror::Error;

/// One heading occurrence in a note, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadingEntry {
    /// Heading level (1-6).
    pub level: u8,
    /// Heading text content.
    pub text: String,
    /// Byte offset where the heading starts.
    pub start_offset: usize,
    /// Byte offset where the heading's last line ends (terminator excluded).
    pub end_offset: usize,
    /// 0-based line index of the heading's first line.
    pub start_line: usize,
}

/// Why a note is left untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The note already has a single, non-blank level-1 heading.
    HasTitle,
    /// Headings cannot be demoted because one is already at level 6.
    TooDeep,
}

/// Edit that gives a note exactly one level-1 heading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RewritePlan {
    /// Insert the title at `offset` (the end of the frontmatter).
    Insert { title: String, offset: usize },
    /// Replace the blank level-1 heading spanning `start..end`.
    Replace { title: String, start: usize, end: usize },
    /// Demote the headings starting on `lines`, then insert at `offset`.
    Shift { title: String, lines: Vec<usize>, offset: usize },
    /// Leave the note as it is.
    Skip(SkipReason),
}

impl RewritePlan {
    pub fn is_skip(&self) -> bool {
        matches!(self, Self::Skip(_))
    }

    /// Short route name, used in logs and CLI output.
    pub fn route(&self) -> &'static str {
        match self {
            Self::Insert { .. } => "insert",
            Self::Replace { .. } => "replace",
            Self::Shift { .. } => "shift",
            Self::Skip(_) => "skip",
        }
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HasTitle => f.write_str("note already has a title"),
            Self::TooDeep => f.write_str("a level-6 heading prevents demoting headings"),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum HeadingError {
    #[error("heading span {start}..{end} does not fit the note text")]
    InvalidHeadingSpan { start: usize, end: usize },

    #[error("heading level {0} is outside 1..=6")]
    InvalidHeadingLevel(u8),

    #[error("heading line {line} is past the end of a text of {lines} lines")]
    InvalidHeadingLine { line: usize, lines: usize },

    #[error("line {0} does not start a heading")]
    NotAHeading(usize),
}

//! Row-level parse errors

/// Reasons a listing table row is skipped
///
/// These never abort a whole page; the parser logs them and moves on.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RowError {
    /// The row has no cells, or its first cell has no content
    #[error("first cell is empty")]
    EmptyFirstCell,

    /// The advisory link in the first cell has no target
    #[error("advisory link has no href")]
    MissingHref,

    /// The column the release filter reads is not there
    #[error("column {index} is missing")]
    MissingColumn { index: usize },
}

use super::Error;

/// Error when two persisted fields of one model map to the same column name.
#[derive(Debug)]
pub(super) struct DuplicateColumnError {
    model: Box<str>,
    column: Box<str>,
    first: Box<str>,
    second: Box<str>,
}

impl std::error::Error for DuplicateColumnError {}

impl core::fmt::Display for DuplicateColumnError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "duplicate column `{}` in model `{}`: fields `{}` and `{}`",
            self.column, self.model, self.first, self.second
        )
    }
}

impl Error {
    /// Creates a duplicate column error. `first` is the field that claimed
    /// `column` earlier in declaration order.
    pub fn duplicate_column(
        model: impl Into<String>,
        column: impl Into<String>,
        first: impl Into<String>,
        second: impl Into<String>,
    ) -> Error {
        Error::from(super::ErrorKind::DuplicateColumn(DuplicateColumnError {
            model: model.into().into(),
            column: column.into().into(),
            first: first.into().into(),
            second: second.into().into(),
        }))
    }

    /// Returns `true` if the root cause of this error is a duplicate column.
    pub fn is_duplicate_column(&self) -> bool {
        matches!(self.root_kind(), super::ErrorKind::DuplicateColumn(_))
    }
}

use super::Error;

/// Error when a field's annotation string cannot be split into `key` / `key:value` tokens.
#[derive(Debug)]
pub(super) struct UnparsableAnnotationError {
    model: Box<str>,
    field: Box<str>,
    token: Box<str>,
    reason: Box<str>,
}

impl std::error::Error for UnparsableAnnotationError {}

impl core::fmt::Display for UnparsableAnnotationError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "unparsable annotation on `{}.{}`: `{}`: {}",
            self.model, self.field, self.token, self.reason
        )
    }
}

impl Error {
    /// Creates an unparsable annotation error for `model.field`.
    ///
    /// `token` is the offending piece of the annotation string.
    pub fn unparsable_annotation(
        model: impl Into<String>,
        field: impl Into<String>,
        token: impl Into<String>,
        reason: impl Into<String>,
    ) -> Error {
        Error::from(super::ErrorKind::UnparsableAnnotation(
            UnparsableAnnotationError {
                model: model.into().into(),
                field: field.into().into(),
                token: token.into().into(),
                reason: reason.into().into(),
            },
        ))
    }

    /// Returns `true` if the root cause of this error is an unparsable annotation.
    pub fn is_unparsable_annotation(&self) -> bool {
        matches!(self.root_kind(), super::ErrorKind::UnparsableAnnotation(_))
    }
}

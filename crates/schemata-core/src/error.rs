mod adhoc;
mod duplicate_column;
mod invalid_model_type;
mod unparsable_annotation;

use adhoc::AdhocError;
use duplicate_column::DuplicateColumnError;
use invalid_model_type::InvalidModelTypeError;
use std::sync::Arc;
use unparsable_annotation::UnparsableAnnotationError;

/// Creates an ad-hoc [`Error`] from a format string.
#[macro_export]
macro_rules! err {
    ($($arg:tt)*) => {
        $crate::Error::from_args(format_args!($($arg)*))
    };
}

/// An error raised while reflecting a model into a schema.
#[derive(Clone)]
pub struct Error {
    inner: Option<Arc<ErrorInner>>,
}

#[derive(Debug)]
struct ErrorInner {
    kind: ErrorKind,
    cause: Option<Error>,
}

impl Error {
    /// Adds context to this error.
    ///
    /// Context is displayed in reverse order: the most recently added context is shown first,
    /// followed by earlier context, ending with the root cause.
    #[inline(always)]
    pub fn context(self, consequent: impl IntoError) -> Error {
        self.context_impl(consequent.into_error())
    }

    #[inline(never)]
    #[cold]
    fn context_impl(self, consequent: Error) -> Error {
        let (kind, cause) = match consequent.inner {
            Some(inner) => match Arc::try_unwrap(inner) {
                Ok(inner) => (inner.kind, inner.cause),
                // Shared consequent: keep its message, drop its identity.
                Err(shared) => (
                    ErrorKind::Adhoc(AdhocError::new(shared.kind.to_string())),
                    shared.cause.clone(),
                ),
            },
            None => (ErrorKind::Unknown, None),
        };

        // A consequent with its own chain keeps it; `self` goes below its root.
        let cause = match cause {
            Some(cause) => self.context_impl(cause),
            None => self,
        };

        Error {
            inner: Some(Arc::new(ErrorInner {
                kind,
                cause: Some(cause),
            })),
        }
    }

    /// The innermost error in the context chain.
    fn root(&self) -> &Error {
        let mut err = self;
        while let Some(cause) = err.inner.as_ref().and_then(|inner| inner.cause.as_ref()) {
            err = cause;
        }
        err
    }

    fn chain(&self) -> impl Iterator<Item = &Error> {
        let mut err = self;
        core::iter::once(err).chain(core::iter::from_fn(move || {
            err = err.inner.as_ref().and_then(|inner| inner.cause.as_ref())?;
            Some(err)
        }))
    }

    fn kind(&self) -> &ErrorKind {
        self.inner
            .as_ref()
            .map(|inner| &inner.kind)
            .unwrap_or(&ErrorKind::Unknown)
    }

    fn root_kind(&self) -> &ErrorKind {
        self.root().kind()
    }
}

// `Display` already renders the whole context chain.
impl std::error::Error for Error {}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        let mut it = self.chain().peekable();
        while let Some(err) = it.next() {
            core::fmt::Display::fmt(err.kind(), f)?;
            if it.peek().is_some() {
                f.write_str(": ")?;
            }
        }
        Ok(())
    }
}

impl core::fmt::Debug for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        if !f.alternate() {
            core::fmt::Display::fmt(self, f)
        } else {
            let Some(ref inner) = self.inner else {
                return f.debug_struct("Error").field("kind", &"None").finish();
            };
            f.debug_struct("Error")
                .field("kind", &inner.kind)
                .field("cause", &inner.cause)
                .finish()
        }
    }
}

#[derive(Debug)]
enum ErrorKind {
    Adhoc(AdhocError),
    InvalidModelType(InvalidModelTypeError),
    UnparsableAnnotation(UnparsableAnnotationError),
    DuplicateColumn(DuplicateColumnError),
    Unknown,
}

impl core::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        use self::ErrorKind::*;

        match self {
            Adhoc(err) => core::fmt::Display::fmt(err, f),
            InvalidModelType(err) => core::fmt::Display::fmt(err, f),
            UnparsableAnnotation(err) => core::fmt::Display::fmt(err, f),
            DuplicateColumn(err) => core::fmt::Display::fmt(err, f),
            Unknown => f.write_str("unknown schemata error"),
        }
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Error {
        Error {
            inner: Some(Arc::new(ErrorInner { kind, cause: None })),
        }
    }
}

/// Trait for types that can be converted into an Error.
pub trait IntoError {
    /// Converts this type into an Error.
    fn into_error(self) -> Error;
}

impl IntoError for Error {
    #[inline(always)]
    fn into_error(self) -> Error {
        self
    }
}

impl IntoError for String {
    fn into_error(self) -> Error {
        Error::from(ErrorKind::Adhoc(AdhocError::new(self)))
    }
}

impl IntoError for &str {
    fn into_error(self) -> Error {
        self.to_string().into_error()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_size() {
        // Ensure Error stays at one word (size of pointer/Arc)
        let expected_size = core::mem::size_of::<usize>();
        assert_eq!(expected_size, core::mem::size_of::<Error>());
    }

    #[test]
    fn error_from_args() {
        let err = Error::from_args(format_args!("test error: {}", 42));
        assert_eq!(err.to_string(), "test error: 42");
    }

    #[test]
    fn error_chain_display() {
        let root = Error::from_args(format_args!("root cause"));
        let chained = root.context(err!("middle context")).context("top context");

        assert_eq!(
            chained.to_string(),
            "top context: middle context: root cause"
        );
    }

    #[test]
    fn shared_consequent_keeps_message() {
        let consequent = err!("while parsing `User`");
        let _keep = consequent.clone();

        let err = Error::duplicate_column("User", "email", "Email", "EMail").context(consequent);
        assert_eq!(
            err.to_string(),
            "while parsing `User`: duplicate column `email` in model `User`: fields `Email` and `EMail`"
        );
    }

    #[test]
    fn chained_consequent_keeps_its_chain() {
        let err = Error::duplicate_column("User", "email", "Email", "EMail")
            .context(err!("inner").context(err!("outer")));

        assert_eq!(
            err.to_string(),
            "outer: inner: duplicate column `email` in model `User`: fields `Email` and `EMail`"
        );
        assert!(err.is_duplicate_column());
    }

    #[test]
    fn chain_is_not_repeated_through_source() {
        let err = Error::invalid_model_type("u32", "not a record type").context("parsing `User`");

        assert!(std::error::Error::source(&err).is_none());
        assert_eq!(
            err.to_string(),
            "parsing `User`: invalid model type `u32`: not a record type"
        );
    }

    #[test]
    fn predicates_look_through_context() {
        let err = Error::invalid_model_type("u32", "not a record type")
            .context(err!("embedded field `base` of `Product`"));

        assert!(err.is_invalid_model_type());
        assert!(!err.is_duplicate_column());
        assert!(!err.is_unparsable_annotation());
    }

    #[test]
    fn invalid_model_type_display() {
        let err = Error::invalid_model_type("u32", "not a record type");
        assert_eq!(err.to_string(), "invalid model type `u32`: not a record type");
    }

    #[test]
    fn unparsable_annotation_display() {
        let err = Error::unparsable_annotation("User", "name", ":foo", "empty key");
        assert_eq!(
            err.to_string(),
            "unparsable annotation on `User.name`: `:foo`: empty key"
        );
        assert!(err.is_unparsable_annotation());
    }

    #[test]
    fn duplicate_column_display() {
        let err = Error::duplicate_column("User", "name", "name", "full_name");
        assert_eq!(
            err.to_string(),
            "duplicate column `name` in model `User`: fields `name` and `full_name`"
        );
        assert!(err.is_duplicate_column());
    }
}

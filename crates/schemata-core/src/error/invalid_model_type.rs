use super::Error;

/// Error when a type handed to the reflector cannot be enumerated as a record.
///
/// This occurs when:
/// - The model itself is a scalar (`u32`, `String`, `Box<u32>`, ...)
/// - An `#[embed]` field points at a scalar type
/// - A record embeds itself, directly or through another record
#[derive(Debug)]
pub(super) struct InvalidModelTypeError {
    ty: Box<str>,
    reason: Box<str>,
}

impl std::error::Error for InvalidModelTypeError {}

impl core::fmt::Display for InvalidModelTypeError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "invalid model type `{}`: {}", self.ty, self.reason)
    }
}

impl Error {
    /// Creates an invalid model type error.
    pub fn invalid_model_type(ty: impl Into<String>, reason: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::InvalidModelType(InvalidModelTypeError {
            ty: ty.into().into(),
            reason: reason.into().into(),
        }))
    }

    /// Returns `true` if the root cause of this error is an invalid model type.
    pub fn is_invalid_model_type(&self) -> bool {
        matches!(self.root_kind(), super::ErrorKind::InvalidModelType(_))
    }
}

mod error;
pub use error::{Error, IntoError};

pub mod reflect;
pub use reflect::Reflect;

pub mod schema;
pub use schema::{Schema, SchemaCache};

/// A Result type alias that uses the crate's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;

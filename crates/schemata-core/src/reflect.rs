//! Static field metadata describing model types.
//!
//! Model types describe themselves through [`Reflect`], normally generated by
//! `#[derive(Model)]`. The descriptors here are plain data; turning them into
//! a [`Schema`](crate::Schema) is the job of the schema module.

use std::any::TypeId;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;
use std::sync::Arc;

/// A type that can describe its fields to the schema reflector.
pub trait Reflect: 'static {
    /// Describes the type's fields, or reports that it is not a record.
    fn model_type() -> ModelType;

    /// Identity used to key the schema cache.
    ///
    /// Pointer-like wrappers forward to the pointee so that `Box<User>` and
    /// `User` share one cached schema.
    fn type_key() -> TypeKey {
        TypeKey::of::<Self>()
    }
}

/// Identifies a model type.
///
/// Two keys are equal when they refer to the same Rust type; the name is
/// carried for diagnostics only.
#[derive(Copy, Clone)]
pub struct TypeKey {
    id: TypeId,
    name: &'static str,
}

#[derive(Debug, Clone)]
pub struct ModelType {
    pub key: TypeKey,
    pub kind: TypeKind,
}

#[derive(Debug, Clone)]
pub enum TypeKind {
    /// A struct with named fields, in declaration order.
    Record(Vec<FieldDecl>),

    /// Anything without enumerable fields.
    Scalar,
}

/// One declared field of a record.
#[derive(Clone)]
pub struct FieldDecl {
    /// Name as declared in the model
    pub name: String,

    /// Raw annotation string, if the field carries one
    pub tag: Option<String>,

    /// Declared type, for diagnostics
    pub ty: &'static str,

    /// Set when the field's record type is flattened into the parent
    pub embed: Option<fn() -> ModelType>,
}

impl TypeKey {
    pub fn of<T: ?Sized + 'static>() -> TypeKey {
        TypeKey {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    /// Full type path, e.g. `my_app::models::User`.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Last path segment of the type name, generics stripped.
    pub fn short_name(&self) -> &'static str {
        let base = self.name.split('<').next().unwrap_or(self.name);
        base.rsplit("::").next().unwrap_or(base)
    }
}

impl PartialEq for TypeKey {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeKey {}

impl Hash for TypeKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for TypeKey {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "TypeKey({})", self.name)
    }
}

impl fmt::Display for TypeKey {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.write_str(self.name)
    }
}

impl ModelType {
    /// A record model for `T` with the given fields.
    pub fn record<T: ?Sized + 'static>(fields: Vec<FieldDecl>) -> ModelType {
        ModelType {
            key: TypeKey::of::<T>(),
            kind: TypeKind::Record(fields),
        }
    }

    /// A non-record type.
    pub fn scalar<T: ?Sized + 'static>() -> ModelType {
        ModelType {
            key: TypeKey::of::<T>(),
            kind: TypeKind::Scalar,
        }
    }

    pub fn is_record(&self) -> bool {
        matches!(self.kind, TypeKind::Record(_))
    }

    pub fn fields(&self) -> Option<&[FieldDecl]> {
        match &self.kind {
            TypeKind::Record(fields) => Some(fields),
            TypeKind::Scalar => None,
        }
    }
}

impl FieldDecl {
    pub fn new(name: impl Into<String>, ty: &'static str) -> FieldDecl {
        FieldDecl {
            name: name.into(),
            tag: None,
            ty,
            embed: None,
        }
    }

    /// Declares a field of type `T`.
    pub fn of<T: ?Sized>(name: impl Into<String>) -> FieldDecl {
        FieldDecl::new(name, std::any::type_name::<T>())
    }

    pub fn tag(mut self, tag: impl Into<String>) -> FieldDecl {
        self.tag = Some(tag.into());
        self
    }

    pub fn embed(mut self, model_type: fn() -> ModelType) -> FieldDecl {
        self.embed = Some(model_type);
        self
    }
}

impl fmt::Debug for FieldDecl {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.debug_struct("FieldDecl")
            .field("name", &self.name)
            .field("tag", &self.tag)
            .field("ty", &self.ty)
            .field("embed", &self.embed.is_some())
            .finish()
    }
}

macro_rules! impl_reflect_scalar {
    ( $($t:ty),+ ) => {
        $(
            impl Reflect for $t {
                fn model_type() -> ModelType {
                    ModelType::scalar::<Self>()
                }
            }
        )+
    };
}

impl_reflect_scalar!(
    i8,
    i16,
    i32,
    i64,
    i128,
    isize,
    u8,
    u16,
    u32,
    u64,
    u128,
    usize,
    f32,
    f64,
    bool,
    char,
    String,
    &'static str
);

macro_rules! impl_reflect_pointer {
    ( $($p:ident),+ ) => {
        $(
            impl<T: Reflect> Reflect for $p<T> {
                fn model_type() -> ModelType {
                    T::model_type()
                }

                fn type_key() -> TypeKey {
                    T::type_key()
                }
            }
        )+
    };
}

impl_reflect_pointer!(Box, Arc, Rc);

mod annotations;
pub use annotations::Annotations;

mod builder;

mod cache;
pub use cache::SchemaCache;

mod field;
pub use field::Field;

mod naming;
pub use naming::{Namer, NamingStrategy};

use crate::reflect::{ModelType, Reflect, TypeKey};
use crate::Result;

use indexmap::IndexMap;
use std::sync::Arc;
use tracing::debug;

/// The reflected description of one model type.
///
/// Built once per type by [`Schema::parse`] and shared through a
/// [`SchemaCache`]; immutable afterwards.
#[derive(Debug)]
pub struct Schema {
    /// The model type this schema describes
    key: TypeKey,

    /// Model name
    name: String,

    /// Table name produced by the naming strategy
    table: String,

    /// All fields in declaration order, embedded records flattened in place
    fields: Vec<Field>,

    /// Column names of persisted fields, in field order
    db_names: Vec<String>,

    /// Declared name -> field index, for every field
    by_name: IndexMap<String, usize>,

    /// Column name -> field index, for persisted fields
    by_db_name: IndexMap<String, usize>,

    primary_fields: Vec<usize>,

    prioritized_primary_field: Option<usize>,
}

impl Schema {
    /// Reflects `T`, or returns its cached schema.
    ///
    /// On a cache miss the schema is built without holding any lock and then
    /// offered to the cache; if another caller stored a schema for `T` first,
    /// that one is returned instead. A failed parse leaves the cache untouched.
    ///
    /// ```
    /// # use schemata_core::{reflect::{FieldDecl, ModelType, Reflect}, Schema, SchemaCache};
    /// # use schemata_core::schema::NamingStrategy;
    /// struct User;
    ///
    /// impl Reflect for User {
    ///     fn model_type() -> ModelType {
    ///         ModelType::record::<Self>(vec![
    ///             FieldDecl::of::<u64>("ID").tag("primaryKey"),
    ///             FieldDecl::of::<String>("FullName").tag("virtual"),
    ///         ])
    ///     }
    /// }
    ///
    /// let cache = SchemaCache::new();
    /// let schema = Schema::parse::<User>(&cache, &NamingStrategy::default()).unwrap();
    ///
    /// assert_eq!(schema.db_names(), ["id"]);
    /// assert!(schema.look_up_field("FullName").is_some());
    /// ```
    pub fn parse<T: Reflect>(
        cache: &SchemaCache,
        namer: &(impl Namer + ?Sized),
    ) -> Result<Arc<Schema>> {
        let key = T::type_key();

        if let Some(schema) = cache.get(&key) {
            debug!(model = key.name(), "schema cache hit");
            return Ok(schema);
        }

        Self::parse_model_type(&T::model_type(), cache, namer)
    }

    /// Reflects an already obtained model description, or returns its cached schema.
    pub fn parse_model_type(
        model_type: &ModelType,
        cache: &SchemaCache,
        namer: &(impl Namer + ?Sized),
    ) -> Result<Arc<Schema>> {
        let key = model_type.key;

        if let Some(schema) = cache.get(&key) {
            debug!(model = key.name(), "schema cache hit");
            return Ok(schema);
        }

        debug!(model = key.name(), "schema cache miss; reflecting");
        let built = Arc::new(builder::build(model_type, namer)?);

        let stored = cache.get_or_insert(key, built.clone());
        if !Arc::ptr_eq(&stored, &built) {
            debug!(model = key.name(), "schema stored concurrently; discarding ours");
        }

        Ok(stored)
    }

    pub fn key(&self) -> TypeKey {
        self.key
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Column names of every persisted field, in declaration order.
    pub fn db_names(&self) -> &[String] {
        &self.db_names
    }

    /// Finds a field by declared name, falling back to column name.
    ///
    /// Virtual fields are found like any other field.
    pub fn look_up_field(&self, name: &str) -> Option<&Field> {
        self.by_name
            .get(name)
            .or_else(|| self.by_db_name.get(name))
            .map(|&index| &self.fields[index])
    }

    pub fn field_by_db_name(&self, db_name: &str) -> Option<&Field> {
        self.by_db_name
            .get(db_name)
            .map(|&index| &self.fields[index])
    }

    pub fn persisted_fields(&self) -> impl Iterator<Item = &Field> + '_ {
        self.fields.iter().filter(|field| !field.is_virtual)
    }

    pub fn virtual_fields(&self) -> impl Iterator<Item = &Field> + '_ {
        self.fields.iter().filter(|field| field.is_virtual)
    }

    /// Fields making up the primary key, in declaration order.
    pub fn primary_fields(&self) -> impl ExactSizeIterator<Item = &Field> + '_ {
        self.primary_fields.iter().map(|&index| &self.fields[index])
    }

    /// The primary key field, when the key is a single field.
    ///
    /// If no field is annotated as a key, a persisted field with column `id` is used.
    pub fn prioritized_primary_field(&self) -> Option<&Field> {
        self.prioritized_primary_field
            .map(|index| &self.fields[index])
    }
}

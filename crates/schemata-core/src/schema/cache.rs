use super::Schema;
use crate::reflect::{Reflect, TypeKey};

use dashmap::DashMap;
use std::fmt;
use std::sync::Arc;

/// Process-wide memo of reflected schemas, keyed by model type.
///
/// The map is sharded; reading one model's schema never waits on another
/// model being reflected, because reflection happens outside the map.
#[derive(Default)]
pub struct SchemaCache {
    schemas: DashMap<TypeKey, Arc<Schema>>,
}

impl SchemaCache {
    pub fn new() -> SchemaCache {
        SchemaCache::default()
    }

    pub fn get(&self, key: &TypeKey) -> Option<Arc<Schema>> {
        self.schemas.get(key).map(|entry| entry.value().clone())
    }

    pub fn contains<T: Reflect>(&self) -> bool {
        self.schemas.contains_key(&T::type_key())
    }

    /// Stores `schema` unless another schema for `key` got there first.
    ///
    /// Returns whichever schema ends up in the cache.
    pub fn get_or_insert(&self, key: TypeKey, schema: Arc<Schema>) -> Arc<Schema> {
        self.schemas.entry(key).or_insert(schema).value().clone()
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}

impl fmt::Debug for SchemaCache {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut models: Vec<_> = self.schemas.iter().map(|entry| entry.key().name()).collect();
        models.sort_unstable();

        fmt.debug_struct("SchemaCache")
            .field("models", &models)
            .finish()
    }
}

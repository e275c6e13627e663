//! Reflects model structs into column mappings.
//!
//! ```
//! use schemata::{Model, NamingStrategy, Schema, SchemaCache};
//!
//! #[derive(Model)]
//! struct User {
//!     #[tag("primaryKey")]
//!     id: u64,
//!     email: String,
//!     #[tag("virtual")]
//!     display_name: String,
//! }
//!
//! let cache = SchemaCache::new();
//! let schema = Schema::parse::<User>(&cache, &NamingStrategy::default())?;
//!
//! assert_eq!(schema.db_names(), ["id", "email"]);
//! assert!(schema.look_up_field("display_name").unwrap().is_virtual());
//! # Ok::<(), schemata::Error>(())
//! ```

pub use schemata_core::schema::{Annotations, Field, Namer, NamingStrategy};
pub use schemata_core::{reflect, schema, Error, Reflect, Result, Schema, SchemaCache};

pub use schemata_macros::Model;

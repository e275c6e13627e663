use pretty_assertions::assert_eq;
use schemata_core::reflect::{FieldDecl, ModelType, Reflect};
use schemata_core::schema::NamingStrategy;
use schemata_core::{Schema, SchemaCache};

struct User;

impl Reflect for User {
    fn model_type() -> ModelType {
        ModelType::record::<Self>(vec![
            FieldDecl::of::<u32>("ID").tag("primaryKey"),
            FieldDecl::of::<String>("Name"),
            FieldDecl::of::<String>("Email"),
            FieldDecl::of::<String>("ComputedField").tag("virtual"),
            FieldDecl::of::<i64>("AnotherHelper").tag("virtual"),
        ])
    }
}

struct BaseModel;

impl Reflect for BaseModel {
    fn model_type() -> ModelType {
        ModelType::record::<Self>(vec![
            FieldDecl::of::<u32>("ID").tag("primaryKey"),
            FieldDecl::of::<u64>("CreatedAt"),
            FieldDecl::of::<u64>("UpdatedAt"),
            FieldDecl::of::<Option<u64>>("DeletedAt").tag("index"),
        ])
    }
}

struct Product;

impl Reflect for Product {
    fn model_type() -> ModelType {
        ModelType::record::<Self>(vec![
            FieldDecl::of::<BaseModel>("Model").embed(BaseModel::model_type),
            FieldDecl::of::<String>("Name"),
            FieldDecl::of::<f64>("Price"),
            FieldDecl::of::<f64>("CachedTotal").tag("virtual"),
            FieldDecl::of::<String>("DisplayString").tag("virtual"),
        ])
    }
}

fn parse<T: Reflect>() -> std::sync::Arc<Schema> {
    Schema::parse::<T>(&SchemaCache::new(), &NamingStrategy::default()).unwrap()
}

#[test]
fn virtual_fields_are_not_columns() {
    let schema = parse::<User>();

    assert_eq!(schema.db_names(), ["id", "name", "email"]);

    for column in ["computed_field", "another_helper"] {
        assert!(!schema.db_names().iter().any(|db_name| db_name == column));
        assert!(schema.field_by_db_name(column).is_none());
    }
}

#[test]
fn virtual_fields_can_be_looked_up() {
    let schema = parse::<User>();

    let field = schema.look_up_field("ComputedField").unwrap();
    assert!(field.is_virtual());
    assert_eq!(field.db_name(), None);
    assert_eq!(field.ty, std::any::type_name::<String>());

    assert!(schema.look_up_field("AnotherHelper").unwrap().is_virtual());
    assert!(schema.look_up_field("Missing").is_none());
}

#[test]
fn every_field_looks_up_to_itself() {
    for schema in [parse::<User>(), parse::<Product>()] {
        for field in schema.fields() {
            assert_eq!(schema.look_up_field(&field.name), Some(field));
        }
    }
}

#[test]
fn column_count_matches_persisted_fields() {
    for schema in [parse::<User>(), parse::<Product>()] {
        assert_eq!(schema.db_names().len(), schema.persisted_fields().count());

        for field in schema.virtual_fields() {
            assert!(field.db_name.is_none());
            assert!(!field.primary_key);
        }
    }
}

#[test]
fn embedded_record_is_flattened() {
    let schema = parse::<Product>();

    assert_eq!(
        schema.db_names(),
        ["id", "created_at", "updated_at", "deleted_at", "name", "price"]
    );

    let names: Vec<_> = schema.fields().iter().map(|field| field.name()).collect();
    assert_eq!(
        names,
        [
            "ID",
            "CreatedAt",
            "UpdatedAt",
            "DeletedAt",
            "Name",
            "Price",
            "CachedTotal",
            "DisplayString"
        ]
    );

    let created_at = schema.look_up_field("CreatedAt").unwrap();
    assert!(created_at.is_embedded());
    assert_eq!(created_at.path(), "Model.CreatedAt");
    assert_eq!(created_at.index, 1);

    for name in ["CachedTotal", "DisplayString"] {
        assert!(schema.look_up_field(name).unwrap().is_virtual());
    }
    for column in ["cached_total", "display_string"] {
        assert!(!schema.db_names().iter().any(|db_name| db_name == column));
    }
}

#[test]
fn look_up_falls_back_to_column_name() {
    let schema = parse::<Product>();

    let field = schema.look_up_field("created_at").unwrap();
    assert_eq!(field.name, "CreatedAt");

    // Virtual fields have no column to fall back to.
    assert!(schema.look_up_field("cached_total").is_none());
}

#[test]
fn primary_key_from_annotation() {
    let schema = parse::<Product>();

    let pk: Vec<_> = schema.primary_fields().map(|field| field.name()).collect();
    assert_eq!(pk, ["ID"]);
    assert_eq!(schema.prioritized_primary_field().unwrap().name, "ID");
}

#[test]
fn table_name_from_naming_strategy() {
    assert_eq!(parse::<User>().table(), "users");
    assert_eq!(parse::<Product>().table(), "products");
    assert_eq!(parse::<Product>().name(), "Product");
}

#[test]
fn annotations_are_kept_on_fields() {
    let schema = parse::<Product>();

    let deleted_at = schema.look_up_field("DeletedAt").unwrap();
    assert!(deleted_at.annotations.is_set("index"));
    assert!(schema.look_up_field("Name").unwrap().annotations.is_empty());
}

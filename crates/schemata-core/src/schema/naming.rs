use heck::ToSnakeCase;
use serde::Deserialize;

/// Converts model and field names into table and column names.
///
/// Implementations must be deterministic: the schema cache assumes that the
/// same model always reflects to the same columns.
pub trait Namer {
    fn table_name(&self, model: &str) -> String;

    fn column_name(&self, table: &str, field: &str) -> String;
}

/// The default naming rules.
///
/// ```
/// # use schemata_core::schema::{Namer, NamingStrategy};
/// let naming = NamingStrategy::default();
/// assert_eq!(naming.table_name("OrderItem"), "order_items");
/// assert_eq!(naming.column_name("order_items", "CreatedAt"), "created_at");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct NamingStrategy {
    /// Prepended to every table name
    pub table_prefix: String,

    /// Do not pluralize table names
    pub singular_table: bool,

    /// Use declared field names as column names, unchanged
    pub no_lower_case: bool,
}

impl Namer for NamingStrategy {
    fn table_name(&self, model: &str) -> String {
        let snake = model.to_snake_case();

        let name = if self.singular_table {
            snake
        } else {
            pluralize_last_word(&snake)
        };

        format!("{}{}", self.table_prefix, name)
    }

    fn column_name(&self, _table: &str, field: &str) -> String {
        if self.no_lower_case {
            field.to_string()
        } else {
            field.to_snake_case()
        }
    }
}

impl<F> Namer for F
where
    F: Fn(&str) -> String,
{
    fn table_name(&self, model: &str) -> String {
        model.to_snake_case()
    }

    fn column_name(&self, _table: &str, field: &str) -> String {
        self(field)
    }
}

fn pluralize_last_word(snake: &str) -> String {
    match snake.rsplit_once('_') {
        Some((head, last)) => format!("{head}_{}", pluralizer::pluralize(last, 2, false)),
        None => pluralizer::pluralize(snake, 2, false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_names_are_snake_case() {
        let naming = NamingStrategy::default();

        for (field, column) in [
            ("ID", "id"),
            ("Name", "name"),
            ("CreatedAt", "created_at"),
            ("ComputedField", "computed_field"),
            ("UserID", "user_id"),
            ("display_string", "display_string"),
        ] {
            assert_eq!(naming.column_name("users", field), column, "field={field}");
        }
    }

    #[test]
    fn table_names_are_plural() {
        let naming = NamingStrategy::default();
        assert_eq!(naming.table_name("User"), "users");
        assert_eq!(naming.table_name("Product"), "products");
        assert_eq!(naming.table_name("OrderItem"), "order_items");
    }

    #[test]
    fn singular_table_with_prefix() {
        let naming = NamingStrategy {
            table_prefix: "app_".to_string(),
            singular_table: true,
            ..NamingStrategy::default()
        };
        assert_eq!(naming.table_name("OrderItem"), "app_order_item");
    }

    #[test]
    fn no_lower_case_keeps_declared_names() {
        let naming = NamingStrategy {
            no_lower_case: true,
            ..NamingStrategy::default()
        };
        assert_eq!(naming.column_name("users", "CreatedAt"), "CreatedAt");
    }

    #[test]
    fn closures_name_columns() {
        let upper = |field: &str| field.to_uppercase();
        assert_eq!(upper.column_name("users", "Name"), "NAME");
        assert_eq!(upper.table_name("OrderItem"), "order_item");
    }

    #[test]
    fn deserialize_from_json() {
        let naming: NamingStrategy =
            serde_json::from_str(r#"{ "table_prefix": "t_", "singular_table": true }"#).unwrap();

        assert_eq!(naming.table_prefix, "t_");
        assert!(naming.singular_table);
        assert!(!naming.no_lower_case);
        assert_eq!(naming.table_name("User"), "t_user");
    }

    #[test]
    fn deserialize_empty_uses_defaults() {
        let naming: NamingStrategy = serde_json::from_str("{}").unwrap();
        assert_eq!(naming, NamingStrategy::default());
    }
}

use super::Annotations;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    /// Position of the field within [`Schema::fields`](super::Schema::fields)
    pub index: usize,

    /// The field name, as declared in the model
    pub name: String,

    /// Settings parsed from the field's annotation string
    pub annotations: Annotations,

    /// True if the field is excluded from persistence
    pub is_virtual: bool,

    /// Column the field maps to. Always `None` for virtual fields.
    pub db_name: Option<String>,

    /// True if the field is part of the primary key
    pub primary_key: bool,

    /// Declared type name
    pub ty: &'static str,

    /// Embedding fields this field was flattened through, outermost first
    pub embedded_in: Vec<String>,
}

impl Field {
    /// Gets the name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Gets the column name, if the field is persisted.
    pub fn db_name(&self) -> Option<&str> {
        self.db_name.as_deref()
    }

    pub fn is_virtual(&self) -> bool {
        self.is_virtual
    }

    pub fn is_persisted(&self) -> bool {
        !self.is_virtual
    }

    pub fn primary_key(&self) -> bool {
        self.primary_key
    }

    /// Returns true if the field was contributed by an embedded record.
    pub fn is_embedded(&self) -> bool {
        !self.embedded_in.is_empty()
    }

    /// Dotted path from the model root, e.g. `base.created_at`.
    pub fn path(&self) -> String {
        let mut path = self.embedded_in.join(".");
        if !path.is_empty() {
            path.push('.');
        }
        path.push_str(&self.name);
        path
    }
}

use super::{Annotations, Field, Namer, Schema};
use crate::reflect::{FieldDecl, ModelType, TypeKey, TypeKind};
use crate::{err, Error, Result};

use indexmap::IndexMap;
use tracing::trace;

/// Used to track state while reflecting one model
struct BuildSchema<'a, N: ?Sized> {
    namer: &'a N,

    /// Short name of the root model, used in error messages
    model: &'static str,

    table: String,

    fields: Vec<Field>,

    /// Column name -> index of the field that claimed it
    columns: IndexMap<String, usize>,

    /// Records currently being flattened, root first
    stack: Vec<TypeKey>,
}

/// Prefix, path and virtual marker inherited from the embedding fields
#[derive(Default, Clone)]
struct Embedding {
    prefix: String,
    path: Vec<String>,

    /// Set when any enclosing embed field is virtual
    is_virtual: bool,
}

pub(super) fn build<N: Namer + ?Sized>(model_type: &ModelType, namer: &N) -> Result<Schema> {
    let TypeKind::Record(decls) = &model_type.kind else {
        return Err(Error::invalid_model_type(
            model_type.key.name(),
            "not a record type",
        ));
    };

    let model = model_type.key.short_name();

    let mut builder = BuildSchema {
        namer,
        model,
        table: namer.table_name(model),
        fields: vec![],
        columns: IndexMap::new(),
        stack: vec![model_type.key],
    };

    builder.flatten(decls, &Embedding::default())?;

    let BuildSchema {
        table,
        mut fields,
        columns,
        ..
    } = builder;

    let mut by_name = IndexMap::with_capacity(fields.len());
    for field in &fields {
        by_name.entry(field.name.clone()).or_insert(field.index);
    }

    let db_names = columns.keys().cloned().collect();

    let mut primary_fields: Vec<usize> = fields
        .iter()
        .filter(|field| field.primary_key)
        .map(|field| field.index)
        .collect();

    let prioritized_primary_field = match primary_fields.len() {
        1 => Some(primary_fields[0]),
        0 => {
            // Without an explicit key, a persisted `id` column is the key,
            // unless that field opted out with a falsy `primaryKey`.
            let fallback = columns
                .get("id")
                .copied()
                .filter(|&index| !fields[index].annotations.declares_primary_key());
            if let Some(index) = fallback {
                fields[index].primary_key = true;
                primary_fields.push(index);
            }
            fallback
        }
        _ => None,
    };

    Ok(Schema {
        key: model_type.key,
        name: model.to_string(),
        table,
        fields,
        db_names,
        by_name,
        by_db_name: columns,
        primary_fields,
        prioritized_primary_field,
    })
}

impl<N: Namer + ?Sized> BuildSchema<'_, N> {
    fn flatten(&mut self, decls: &[FieldDecl], embedding: &Embedding) -> Result<()> {
        for decl in decls {
            let tag = decl.tag.as_deref().unwrap_or("");
            let annotations = Annotations::parse(tag).map_err(|syntax| {
                Error::unparsable_annotation(self.model, &decl.name, syntax.token, syntax.reason)
            })?;

            match decl.embed {
                Some(model_type) => {
                    self.flatten_embedded(decl, model_type(), &annotations, embedding)?
                }
                None => self.push_field(decl, annotations, embedding)?,
            }
        }

        Ok(())
    }

    fn flatten_embedded(
        &mut self,
        decl: &FieldDecl,
        model_type: ModelType,
        annotations: &Annotations,
        embedding: &Embedding,
    ) -> Result<()> {
        let context = || err!("embedded field `{}` of `{}`", decl.name, self.model);

        let TypeKind::Record(decls) = &model_type.kind else {
            return Err(
                Error::invalid_model_type(model_type.key.name(), "not a record type")
                    .context(context()),
            );
        };

        if self.stack.contains(&model_type.key) {
            return Err(
                Error::invalid_model_type(model_type.key.name(), "record embeds itself")
                    .context(context()),
            );
        }

        // An embed field contributes no column of its own.
        for (present, token) in [
            (annotations.column().is_some(), "column"),
            (annotations.declares_primary_key(), "primaryKey"),
        ] {
            if present {
                return Err(Error::unparsable_annotation(
                    self.model,
                    &decl.name,
                    token,
                    "not allowed on an embedded field",
                ));
            }
        }

        let mut nested = embedding.clone();
        nested.path.push(decl.name.clone());
        nested.is_virtual |= annotations.is_virtual();
        if let Some(prefix) = annotations.embedded_prefix() {
            nested.prefix.push_str(prefix);
        }

        self.stack.push(model_type.key);
        self.flatten(decls, &nested)?;
        self.stack.pop();

        Ok(())
    }

    fn push_field(
        &mut self,
        decl: &FieldDecl,
        annotations: Annotations,
        embedding: &Embedding,
    ) -> Result<()> {
        let index = self.fields.len();
        let is_virtual = embedding.is_virtual || annotations.is_virtual();

        // Virtual wins over every other setting.
        let db_name = if is_virtual {
            None
        } else {
            let column = match annotations.column() {
                Some(column) => column.to_string(),
                None => self.namer.column_name(&self.table, &decl.name),
            };
            Some(format!("{}{}", embedding.prefix, column))
        };

        if let Some(column) = &db_name {
            if let Some(&first) = self.columns.get(column) {
                return Err(Error::duplicate_column(
                    self.model,
                    column,
                    self.fields[first].path(),
                    path_of(embedding, &decl.name),
                ));
            }
            self.columns.insert(column.clone(), index);
        }

        trace!(
            model = self.model,
            field = %decl.name,
            column = db_name.as_deref().unwrap_or("<virtual>"),
            "reflected field"
        );

        self.fields.push(Field {
            index,
            name: decl.name.clone(),
            primary_key: !is_virtual && annotations.is_primary_key(),
            annotations,
            is_virtual,
            db_name,
            ty: decl.ty,
            embedded_in: embedding.path.clone(),
        });

        Ok(())
    }
}

fn path_of(embedding: &Embedding, name: &str) -> String {
    let mut path = embedding.path.join(".");
    if !path.is_empty() {
        path.push('.');
    }
    path.push_str(name);
    path
}

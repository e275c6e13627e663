use super::{ErrorSet, Field};

#[derive(Debug)]
pub(crate) struct Model {
    /// Type identifier
    pub(crate) ident: syn::Ident,

    /// Type generics
    pub(crate) generics: syn::Generics,

    /// Model fields, in declaration order
    pub(crate) fields: Vec<Field>,
}

impl Model {
    pub(crate) fn from_ast(ast: &syn::ItemStruct) -> syn::Result<Self> {
        let syn::Fields::Named(node) = &ast.fields else {
            return Err(syn::Error::new_spanned(
                &ast.fields,
                "model field list must be a struct with named fields",
            ));
        };

        let mut errs = ErrorSet::new();

        if let Some(lifetime) = ast.generics.lifetimes().next() {
            errs.push(syn::Error::new_spanned(
                lifetime,
                "models cannot have lifetime parameters",
            ));
        }

        let mut fields = vec![];

        for field in &node.named {
            match Field::from_ast(field) {
                Ok(field) => fields.push(field),
                Err(err) => errs.push(err),
            }
        }

        errs.into_result(Model {
            ident: ast.ident.clone(),
            generics: ast.generics.clone(),
            fields,
        })
    }
}

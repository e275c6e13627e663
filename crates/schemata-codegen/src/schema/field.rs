use super::ErrorSet;

use syn::ext::IdentExt;

#[derive(Debug)]
pub(crate) struct Field {
    /// Field name, as it will appear in the schema
    pub(crate) name: String,

    /// Field attributes
    pub(crate) attrs: FieldAttr,

    /// Field type
    pub(crate) ty: syn::Type,
}

#[derive(Debug)]
pub(crate) struct FieldAttr {
    /// Raw annotation string from `#[tag("...")]`
    pub(crate) tag: Option<syn::LitStr>,

    /// True if the field is annotated with `#[embed]`
    pub(crate) embed: bool,
}

impl Field {
    pub(super) fn from_ast(field: &syn::Field) -> syn::Result<Self> {
        let Some(ident) = &field.ident else {
            return Err(syn::Error::new_spanned(field, "model fields must be named"));
        };

        let mut errs = ErrorSet::new();
        let mut attrs = FieldAttr {
            tag: None,
            embed: false,
        };

        for attr in &field.attrs {
            if attr.path().is_ident("tag") {
                if attrs.tag.is_some() {
                    errs.push(syn::Error::new_spanned(attr, "duplicate #[tag] attribute"));
                    continue;
                }

                match attr.parse_args::<syn::LitStr>() {
                    Ok(tag) => attrs.tag = Some(tag),
                    Err(_) => errs.push(syn::Error::new_spanned(
                        attr,
                        "expected a string literal, e.g. #[tag(\"primaryKey, virtual\")]",
                    )),
                }
            } else if attr.path().is_ident("embed") {
                if attrs.embed {
                    errs.push(syn::Error::new_spanned(
                        attr,
                        "duplicate #[embed] attribute",
                    ));
                } else if let Err(err) = attr.meta.require_path_only() {
                    errs.push(err);
                } else {
                    attrs.embed = true;
                }
            }
        }

        errs.into_result(Field {
            name: ident.unraw().to_string(),
            attrs,
            ty: field.ty.clone(),
        })
    }
}

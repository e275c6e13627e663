use crate::schema::{Field, Model};

use proc_macro2::TokenStream;
use quote::quote;

pub(super) fn model(model: &Model) -> TokenStream {
    let schemata = quote!(_schemata);
    let model_ident = &model.ident;

    let mut generics = model.generics.clone();
    {
        // `Reflect` keys the schema cache by `TypeId`.
        let type_params: Vec<_> = generics
            .type_params()
            .map(|param| param.ident.clone())
            .collect();
        let where_clause = generics.make_where_clause();
        for ident in type_params {
            where_clause
                .predicates
                .push(syn::parse_quote!(#ident: 'static));
        }
    }
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let fields = model
        .fields
        .iter()
        .map(|field| expand_field(&schemata, field));

    wrap_in_const(quote! {
        impl #impl_generics #schemata::Reflect for #model_ident #ty_generics #where_clause {
            fn model_type() -> #schemata::reflect::ModelType {
                #schemata::reflect::ModelType::record::<Self>(vec![
                    #( #fields ),*
                ])
            }
        }
    })
}

fn expand_field(schemata: &TokenStream, field: &Field) -> TokenStream {
    let name = &field.name;
    let ty = &field.ty;

    let tag = field
        .attrs
        .tag
        .as_ref()
        .map(|tag| quote!(.tag(#tag)));

    let embed = field
        .attrs
        .embed
        .then(|| quote!(.embed(<#ty as #schemata::Reflect>::model_type)));

    quote! {
        #schemata::reflect::FieldDecl::of::<#ty>(#name) #tag #embed
    }
}

fn wrap_in_const(code: TokenStream) -> TokenStream {
    quote! {
        const _: () = {
            use schemata as _schemata;
            #code
        };
    }
}

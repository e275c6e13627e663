extern crate proc_macro;

use proc_macro::TokenStream;

/// Implements `Reflect` for a struct with named fields.
///
/// Field attributes:
///
/// - `#[tag("primaryKey, column:user_id, virtual")]`: annotation string,
///   parsed when the schema is reflected.
/// - `#[embed]`: flatten the field's record type into this model.
#[proc_macro_derive(Model, attributes(tag, embed))]
pub fn derive_model(input: TokenStream) -> TokenStream {
    match schemata_codegen::generate(input.into()) {
        Ok(output) => output.into(),
        Err(e) => e.to_compile_error().into(),
    }
}

mod derive_model;

use derive_model::DeriveModel;
use proc_macro::TokenStream;
use quote::ToTokens;
use syn::parse_macro_input;

/// Derive macro implementing the [Model](https://docs.rs/macroable/latest/macroable/model/trait.Model.html) trait.
///
/// The `#[model(name = "...")]` attribute can be specified to change the model's
/// [Model::model_name](https://docs.rs/macroable/latest/macroable/model/trait.Model.html#method.model_name).
/// The default value is the model's ident.
///
/// # Example
///
/// ```ignore
/// use macroable::Model;
///
/// #[derive(Model)]
/// #[model(name = "users")]
/// struct User { }
///
/// assert_eq!(User::model_name(), "users");
/// ```
#[proc_macro_derive(Model, attributes(model))]
pub fn derive_model(input: TokenStream) -> TokenStream {
    let derive_model = parse_macro_input!(input as DeriveModel);
    TokenStream::from(derive_model.into_token_stream())
}

use quote::{quote, ToTokens};
use syn::{
    custom_keyword,
    parse::{Parse, ParseStream},
    punctuated::Punctuated,
    spanned::Spanned,
    DeriveInput, Generics, Ident, LitStr, Token,
};

pub struct DeriveModel {
    attrs: DeriveModelAttrs,
    ident: Ident,
    generics: Generics,
}

impl ToTokens for DeriveModel {
    fn to_tokens(&self, tokens: &mut proc_macro2::TokenStream) {
        let Self {
            attrs,
            ident,
            generics,
        } = self;
        let name = match &attrs.name {
            Some(s) => s.value(),
            None => ident.to_string(),
        };
        let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

        tokens.extend(quote! {
            #[automatically_derived]
            impl #impl_generics ::macroable::model::Model for #ident #ty_generics #where_clause {
                fn model_name() -> ::macroable::model::ModelName {
                    ::std::borrow::Cow::Borrowed(#name)
                }
            }
        });
    }
}

impl Parse for DeriveModel {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let input: DeriveInput = input.parse()?;
        let ident = input.ident;
        let generics = input.generics;
        let mut attrs = None;
        for attr in input.attrs {
            if attr.path().is_ident("model") {
                if attrs.is_some() {
                    return Err(syn::Error::new(
                        attr.span(),
                        "model attribute already specified",
                    ));
                }
                attrs = Some(attr.parse_args_with(DeriveModelAttrs::parse)?);
            }
        }

        Ok(DeriveModel {
            attrs: attrs.unwrap_or_default(),
            ident,
            generics,
        })
    }
}

#[derive(Default)]
struct DeriveModelAttrs {
    name: Option<LitStr>,
}

impl Parse for DeriveModelAttrs {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let attrs: Punctuated<(name, LitStr), Token![,]> =
            Punctuated::parse_terminated_with(input, |input| {
                let lookahead = input.lookahead1();
                if lookahead.peek(name) {
                    let key: name = input.parse()?;
                    let _: Token![=] = input.parse()?;
                    let value: LitStr = input.parse()?;
                    Ok((key, value))
                } else {
                    Err(lookahead.error())
                }
            })?;

        let mut name = None;
        for (key, value) in attrs {
            if name.is_none() {
                name = Some(value);
            } else {
                return Err(syn::Error::new(key.span, "name already set"));
            }
        }

        Ok(DeriveModelAttrs { name })
    }
}

custom_keyword!(name);

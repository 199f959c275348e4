/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

use crate::cg;
use darling::FromVariant;
use proc_macro2::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Fields};

#[derive(Default, FromVariant)]
#[darling(attributes(keyword), default)]
pub struct KeywordVariantAttrs {
    /// Comma-separated list of extra identifiers parsed as this variant.
    pub aliases: Option<String>,
}

pub fn derive(input: DeriveInput) -> TokenStream {
    let name = &input.ident;
    let variants = match input.data {
        Data::Enum(ref data) => &data.variants,
        _ => panic!("Keyword can only be derived for enums"),
    };

    let mut match_body = quote!();
    let mut to_css_body = quote!();
    for variant in variants {
        assert!(
            matches!(variant.fields, Fields::Unit),
            "Keyword is only supported for unit variants"
        );

        let attrs = cg::parse_variant_attrs::<KeywordVariantAttrs>(variant);
        let ident = &variant.ident;
        let identifier = cg::to_css_identifier(&ident.to_string());

        match_body.extend(quote! {
            #identifier => ::std::option::Option::Some(#name::#ident),
        });
        to_css_body.extend(quote! {
            #name::#ident => #identifier,
        });

        let aliases = match attrs.aliases {
            Some(aliases) => aliases,
            None => continue,
        };
        for alias in aliases.split(',') {
            let alias = alias.trim().to_ascii_lowercase();
            match_body.extend(quote! {
                #alias => ::std::option::Option::Some(#name::#ident),
            });
        }
    }

    quote! {
        impl #name {
            /// Parses this keyword from an identifier, ignoring ASCII case.
            #[inline]
            pub fn from_ident(ident: &str) -> ::std::option::Option<Self> {
                ::cssparser::match_ignore_ascii_case! { ident.trim(),
                    #match_body
                    _ => ::std::option::Option::None,
                }
            }

            /// The canonical identifier of this keyword.
            #[inline]
            pub fn as_str(&self) -> &'static str {
                match *self {
                    #to_css_body
                }
            }
        }
    }
}

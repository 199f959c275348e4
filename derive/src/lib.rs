/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

extern crate proc_macro;

use proc_macro::TokenStream;

mod cg;
mod keyword;

#[proc_macro_derive(Keyword, attributes(keyword))]
pub fn derive_keyword(stream: TokenStream) -> TokenStream {
    let input = syn::parse_macro_input!(stream as syn::DeriveInput);
    keyword::derive(input).into()
}

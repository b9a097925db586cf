use crate::attributes::CapabilityAttributes;
use crate::bean::{expand_bean, register_capability, register_injectable};
use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput, Error, Item, ItemTrait};

mod attributes;
mod bean;

#[proc_macro_derive(Bean, attributes(bean))]
pub fn generate_bean(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand_bean(&input)
        .unwrap_or_else(Error::into_compile_error)
        .into()
}

#[proc_macro_attribute]
pub fn capability(args: TokenStream, input: TokenStream) -> TokenStream {
    let mut attributes = CapabilityAttributes::default();
    let parser = syn::meta::parser(|meta| attributes.parse(meta));
    parse_macro_input!(args with parser);

    let item = parse_macro_input!(input as Item);
    register_capability(&item, &attributes)
        .unwrap_or_else(Error::into_compile_error)
        .into()
}

#[proc_macro_attribute]
pub fn injectable(_args: TokenStream, input: TokenStream) -> TokenStream {
    let item = parse_macro_input!(input as ItemTrait);
    register_injectable(&item)
        .unwrap_or_else(Error::into_compile_error)
        .into()
}

use crate::attributes::{BeanAttributes, CapabilityAttributes, DefaultDefinition, FieldAttributes};
use convert_case::{Case, Casing};
use itertools::Itertools;
use proc_macro2::{Ident, TokenStream};
use quote::quote;
use std::ops::Deref;
use syn::spanned::Spanned;
use syn::{
    Attribute, Data, DataStruct, DeriveInput, Error, Expr, ExprArray, ExprLit, Field, Fields,
    GenericArgument, Index, Item, ItemTrait, Lit, Member, PathArguments, Result, Type,
};

const BEAN: &str = "bean";

/// Returns `T` for fields declared as `Inject<T>`.
fn slot_type(ty: &Type) -> Option<&Type> {
    let Type::Path(path) = ty else {
        return None;
    };

    let segment = path.path.segments.last()?;
    if segment.ident != "Inject" {
        return None;
    }

    let PathArguments::AngleBracketed(arguments) = &segment.arguments else {
        return None;
    };

    arguments
        .args
        .iter()
        .exactly_one()
        .ok()
        .and_then(|argument| match argument {
            GenericArgument::Type(ty) => Some(ty),
            _ => None,
        })
}

fn extract_field_attributes(field: &Field) -> Result<Option<FieldAttributes>> {
    field
        .attrs
        .iter()
        .filter(|attribute| attribute.path().is_ident(BEAN))
        .map(FieldAttributes::try_from)
        .next()
        .transpose()
}

fn extract_bean_attributes(attributes: &[Attribute]) -> Result<Option<BeanAttributes>> {
    attributes
        .iter()
        .filter_map(|attribute| {
            if attribute.path().is_ident(BEAN) {
                Some(BeanAttributes::try_from(attribute))
            } else {
                None
            }
        })
        .next()
        .transpose()
}

fn member(index: usize, field: &Field) -> Member {
    field
        .ident
        .clone()
        .map(Member::Named)
        .unwrap_or_else(|| {
            Member::Unnamed(Index {
                index: index as u32,
                span: field.span(),
            })
        })
}

fn generate_initialization(field: &Field) -> Result<TokenStream> {
    if slot_type(&field.ty).is_some() {
        return Ok(quote!(sprig_di::instance::Inject::new()));
    }

    let attributes = extract_field_attributes(field)?;
    if attributes.as_ref().map(|attributes| attributes.inject) == Some(true) {
        return Err(Error::new(
            field.span(),
            "Only Inject<T> fields can be marked for injection!",
        ));
    }

    Ok(match attributes.and_then(|attributes| attributes.default) {
        Some(DefaultDefinition::Expr(path)) => quote!(#path()),
        Some(DefaultDefinition::Default) | None => quote!(std::default::Default::default()),
    })
}

fn generate_construction(ident: &Ident, fields: &Fields) -> Result<TokenStream> {
    let initializers: Vec<_> = fields
        .iter()
        .enumerate()
        .map(|(index, field)| -> Result<TokenStream> {
            let member = member(index, field);
            let value = generate_initialization(field)?;
            Ok(quote!(#member: #value))
        })
        .try_collect()?;

    Ok(quote! {
        Ok(#ident {
            #(#initializers),*
        })
    })
}

fn generate_field_descriptors(ident: &Ident, fields: &Fields) -> Result<Vec<TokenStream>> {
    fields
        .iter()
        .enumerate()
        .filter_map(|(index, field)| slot_type(&field.ty).map(|ty| (index, field, ty)))
        .map(|(index, field, ty)| -> Result<TokenStream> {
            let member = member(index, field);
            let name = match &member {
                Member::Named(ident) => ident.to_string(),
                Member::Unnamed(index) => index.index.to_string(),
            };
            let is_marked = extract_field_attributes(field)?
                .map(|attributes| attributes.inject)
                .unwrap_or(false);

            Ok(quote! {
                .with_field(sprig_di::descriptor::FieldDescriptor {
                    name: #name,
                    declared_type: sprig_di::descriptor::TypeKey::of::<#ty>(),
                    is_marked: #is_marked,
                    assign: |owner, value| {
                        owner
                            .downcast_ref::<#ident>()
                            .ok_or(sprig_di::error::SlotError::IncompatibleOwner(
                                sprig_di::descriptor::TypeKey::of::<#ident>(),
                            ))?
                            .#member
                            .assign(value)
                    },
                })
            })
        })
        .try_collect()
}

fn generate_markers(markers: Option<ExprArray>) -> Result<Vec<String>> {
    markers
        .map(|markers| {
            markers
                .elems
                .iter()
                .map(|elem| {
                    if let Expr::Lit(ExprLit {
                        lit: Lit::Str(string),
                        ..
                    }) = elem
                    {
                        Ok(string.value())
                    } else {
                        Err(Error::new(elem.span(), "Markers must be string literals!"))
                    }
                })
                .try_collect()
        })
        .unwrap_or_else(|| Ok(vec![]))
}

pub fn expand_bean(input: &DeriveInput) -> Result<TokenStream> {
    let Data::Struct(DataStruct { fields, .. }) = &input.data else {
        return Err(Error::new(input.span(), "Can only derive Bean on structs!"));
    };

    if !input.generics.params.is_empty() {
        return Err(Error::new(
            input.generics.span(),
            "Generic beans are not supported!",
        ));
    }

    let ident = &input.ident;
    let (name, markers, constructor) = match extract_bean_attributes(&input.attrs)? {
        Some(BeanAttributes {
            name,
            markers,
            constructor,
        }) => (name.map(|name| name.value()), markers, constructor),
        None => (None, None, None),
    };

    let name = name.unwrap_or_else(|| ident.to_string().to_case(Case::Snake));
    let markers = generate_markers(markers)?;
    let construction = if let Some(constructor) = constructor {
        quote!(#constructor())
    } else {
        generate_construction(ident, fields)?
    };
    let field_descriptors = generate_field_descriptors(ident, fields)?;

    Ok(quote! {
        #[automatically_derived]
        impl sprig_di::bean::Injectable for #ident {}

        #[automatically_derived]
        impl sprig_di::bean::Bean for #ident {
            fn descriptor() -> sprig_di::descriptor::TypeDescriptor {
                fn construct() -> Result<sprig_di::instance::BeanInstanceAnyPtr, sprig_di::instance::ErrorPtr> {
                    let instance: Result<#ident, sprig_di::instance::ErrorPtr> = #construction;
                    instance.map(|instance| {
                        sprig_di::instance::BeanInstancePtr::new(instance)
                            as sprig_di::instance::BeanInstanceAnyPtr
                    })
                }

                let mut descriptor = sprig_di::descriptor::TypeDescriptor::new(
                    sprig_di::descriptor::TypeKey::of::<#ident>(),
                    sprig_di::bean::cast_to_self::<#ident>,
                )
                .with_name(#name)
                .with_constructor(construct)
                #(.with_marker(#markers))*
                #(#field_descriptors)*;

                descriptor.capabilities =
                    sprig_di::descriptor::registered_capabilities(std::any::TypeId::of::<#ident>());
                descriptor
            }
        }

        const _: () = {
            fn register() -> sprig_di::descriptor::TypeDescriptor {
                <#ident as sprig_di::bean::Bean>::descriptor()
            }

            sprig_di::descriptor::internal::submit! {
                sprig_di::descriptor::internal::BeanRegisterer {
                    module_path: module_path!(),
                    register,
                }
            };
        };
    })
}

pub fn register_capability(item: &Item, args: &CapabilityAttributes) -> Result<TokenStream> {
    let Item::Impl(item_impl) = item else {
        return Err(Error::new(
            item.span(),
            "Registering capabilities is possible only on trait implementations!",
        ));
    };

    let trait_type = item_impl
        .trait_
        .as_ref()
        .map(|(_, path, ..)| path)
        .ok_or_else(|| Error::new(item.span(), "Missing trait identifier!"))?;

    let target_type = if let Type::Path(path) = item_impl.self_ty.deref() {
        &path.path
    } else {
        return Err(Error::new(
            item.span(),
            "Registering capabilities is only available for Beans!",
        ));
    };

    let is_primary = args.is_primary;

    Ok(quote! {
        #item

        const _: () = {
            fn cast(
                source: sprig_di::instance::BeanInstanceAnyPtr,
            ) -> Result<Box<dyn std::any::Any>, sprig_di::instance::BeanInstanceAnyPtr> {
                source.downcast::<#target_type>().map(|p| {
                    Box::new(p as sprig_di::instance::BeanInstancePtr<dyn #trait_type + Send + Sync>)
                        as Box<dyn std::any::Any>
                })
            }

            fn register() -> sprig_di::descriptor::internal::CapabilityDefinition {
                sprig_di::descriptor::internal::CapabilityDefinition {
                    target: std::any::TypeId::of::<#target_type>(),
                    capability: sprig_di::descriptor::CapabilityDescriptor {
                        type_key: sprig_di::descriptor::TypeKey::of::<dyn #trait_type + Send + Sync>(),
                        is_primary: #is_primary,
                        cast,
                    },
                }
            }

            sprig_di::descriptor::internal::submit! {
                sprig_di::descriptor::internal::CapabilityRegisterer {
                    register
                }
            };
        };
    })
}

pub fn register_injectable(item: &ItemTrait) -> Result<TokenStream> {
    if !item.generics.params.is_empty() {
        return Err(Error::new(
            item.generics.span(),
            "Generic injectable traits are not supported!",
        ));
    }

    let ident = &item.ident;

    Ok(quote! {
        #item

        #[automatically_derived]
        impl sprig_di::bean::Injectable for dyn #ident + Send + Sync {}
    })
}

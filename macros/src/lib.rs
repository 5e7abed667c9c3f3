//! Derive macros for Groundwork
//!
//! This crate provides procedural macros that remove the boilerplate of
//! declaring entity records.
//!
//! # Available Macros
//!
//! - `#[derive(Entity)]` - Implements `Entity` (and `Stateful` when a status
//!   field is marked) and generates the matching patch struct
//!
//! # Example
//!
//! ```ignore
//! use groundwork_macros::Entity;
//!
//! #[derive(Entity, Clone, Debug, PartialEq)]
//! pub struct Tender {
//!     #[id]
//!     pub id: TenderId,
//!     pub title: String,
//!     #[status]
//!     pub status: TenderStatus,
//! }
//!
//! // Generated:
//! let patch = TenderPatch::default().title("Steel package");
//! tender.apply(patch);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use proc_macro::TokenStream;
use quote::{format_ident, quote};
use syn::{Attribute, Data, DeriveInput, Field, Fields, parse_macro_input};

/// Derive macro for entity records
///
/// Generates, for a struct `Name` with named fields:
/// - `NamePatch`: one `Option<T>` per non-id field, with a builder method per
///   field and `is_empty()`
/// - `impl Entity for Name` using the `#[id]` field and `NamePatch`
/// - `impl Stateful for Name` when a field is marked `#[status]`
///
/// The id field is not part of the patch, so applying a patch can never
/// change an entity's identity.
///
/// # Attributes
///
/// - `#[id]` - Marks the identifier field (exactly one required)
/// - `#[status]` - Marks the status field (at most one)
///
/// # Panics
///
/// This macro will produce a compile error (not a runtime panic) if:
/// - Applied to anything but a non-generic struct with named fields
/// - The struct has no `#[id]` field, or more than one
/// - The struct has more than one `#[status]` field
///
/// # Example
///
/// ```ignore
/// #[derive(Entity, Clone, Debug, PartialEq)]
/// struct Employee {
///     #[id]
///     id: EmployeeId,
///     name: String,
///     #[status]
///     status: EmployeeStatus,
/// }
///
/// let patch = EmployeePatch::default().status(EmployeeStatus::Active);
/// assert!(!patch.is_empty());
/// ```
#[proc_macro_derive(Entity, attributes(id, status))]
pub fn derive_entity(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match expand_entity(&input) {
        Ok(expanded) => TokenStream::from(expanded),
        Err(error) => error.to_compile_error().into(),
    }
}

fn expand_entity(input: &DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let name = &input.ident;
    let vis = &input.vis;

    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "#[derive(Entity)] does not support generic structs",
        ));
    }

    let Data::Struct(data_struct) = &input.data else {
        return Err(syn::Error::new_spanned(
            input,
            "#[derive(Entity)] can only be used on structs",
        ));
    };

    let Fields::Named(fields) = &data_struct.fields else {
        return Err(syn::Error::new_spanned(
            &data_struct.fields,
            "#[derive(Entity)] requires named fields",
        ));
    };

    let id_fields: Vec<&Field> = fields
        .named
        .iter()
        .filter(|field| has_attribute(&field.attrs, "id"))
        .collect();

    let [id_field] = id_fields.as_slice() else {
        return Err(syn::Error::new_spanned(
            name,
            "#[derive(Entity)] requires exactly one #[id] field",
        ));
    };

    let status_fields: Vec<&Field> = fields
        .named
        .iter()
        .filter(|field| has_attribute(&field.attrs, "status"))
        .collect();

    if status_fields.len() > 1 {
        return Err(syn::Error::new_spanned(
            name,
            "#[derive(Entity)] allows at most one #[status] field",
        ));
    }

    let id_ident = &id_field.ident;
    let id_ty = &id_field.ty;
    let patch_name = format_ident!("{}Patch", name);
    let patch_doc = format!("Partial update for [`{name}`]; `None` fields are left untouched");

    let patch_fields: Vec<&Field> = fields
        .named
        .iter()
        .filter(|field| !has_attribute(&field.attrs, "id"))
        .collect();
    let patch_idents: Vec<_> = patch_fields.iter().map(|field| &field.ident).collect();
    let patch_types: Vec<_> = patch_fields.iter().map(|field| &field.ty).collect();
    let field_docs: Vec<String> = patch_fields
        .iter()
        .filter_map(|field| field.ident.as_ref())
        .map(|ident| format!("New value for `{ident}`"))
        .collect();
    let setter_docs: Vec<String> = patch_fields
        .iter()
        .filter_map(|field| field.ident.as_ref())
        .map(|ident| format!("Set `{ident}` in this patch"))
        .collect();

    let status_impl = match status_fields.first() {
        Some(field) => {
            let status_ident = &field.ident;
            let status_ty = &field.ty;
            quote! {
                impl ::groundwork_core::entity::Stateful for #name {
                    type Status = #status_ty;

                    fn status(&self) -> &Self::Status {
                        &self.#status_ident
                    }

                    fn set_status(&mut self, status: Self::Status) {
                        self.#status_ident = status;
                    }
                }
            }
        },
        None => quote! {},
    };

    Ok(quote! {
        #[doc = #patch_doc]
        #[derive(Clone, Debug, Default, PartialEq)]
        #vis struct #patch_name {
            #(
                #[doc = #field_docs]
                pub #patch_idents: ::core::option::Option<#patch_types>,
            )*
        }

        impl #patch_name {
            #(
                #[doc = #setter_docs]
                #[must_use]
                pub fn #patch_idents(mut self, value: impl ::core::convert::Into<#patch_types>) -> Self {
                    self.#patch_idents = ::core::option::Option::Some(value.into());
                    self
                }
            )*

            /// Returns true if the patch sets no field
            #[must_use]
            pub const fn is_empty(&self) -> bool {
                true #( && self.#patch_idents.is_none() )*
            }
        }

        impl ::groundwork_core::entity::Entity for #name {
            type Id = #id_ty;
            type Patch = #patch_name;

            fn id(&self) -> &Self::Id {
                &self.#id_ident
            }

            fn apply(&mut self, patch: Self::Patch) {
                #(
                    if let ::core::option::Option::Some(value) = patch.#patch_idents {
                        self.#patch_idents = value;
                    }
                )*
            }
        }

        #status_impl
    })
}

/// Helper function to check if an attribute list contains a specific attribute
fn has_attribute(attrs: &[Attribute], name: &str) -> bool {
    attrs.iter().any(|attr| attr.path().is_ident(name))
}

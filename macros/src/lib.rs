//! Derive macros for Pocket Store
//!
//! # Available Macros
//!
//! - `#[derive(Action)]` - Generates naming and slice-ownership helpers for action enums
//!
//! # Example
//!
//! ```ignore
//! use pocket_macros::Action;
//!
//! #[derive(Action, Clone, Debug)]
//! enum AppAction {
//!     #[slice(ui)]
//!     ToggleDarkMode,
//!
//!     #[slice(todos)]
//!     RemoveTodo { id: TodoId },
//! }
//!
//! // Generated methods:
//! assert_eq!(AppAction::ToggleDarkMode.action_type(), "ToggleDarkMode");
//! assert_eq!(AppAction::ToggleDarkMode.slice(), Some("ui"));
//! assert!(AppAction::ToggleDarkMode.is_owned_by("ui"));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{Attribute, Data, DeriveInput, Fields, Ident, parse_macro_input};

/// Derive macro for Action enums
///
/// Generates:
/// - `action_type()` - The variant name, for logs and diagnostics
/// - `slice()` - The state slice that owns this variant, if tagged
/// - `is_owned_by(slice)` - True if the variant is tagged with `slice`
///
/// # Attributes
///
/// - `#[slice(name)]` - Mark a variant as owned by the slice `name`
///
/// # Errors
///
/// Produces a compile error if:
/// - Applied to a non-enum type
/// - A variant carries more than one `#[slice(..)]` attribute
/// - The attribute argument is not a single identifier
#[proc_macro_derive(Action, attributes(slice))]
pub fn derive_action(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match expand_action(&input) {
        Ok(tokens) => tokens.into(),
        Err(error) => error.to_compile_error().into(),
    }
}

fn expand_action(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let Data::Enum(data_enum) = &input.data else {
        return Err(syn::Error::new_spanned(
            input,
            "#[derive(Action)] can only be used on enums",
        ));
    };

    let mut type_arms = Vec::new();
    let mut slice_arms = Vec::new();

    for variant in &data_enum.variants {
        let variant_name = &variant.ident;
        let pattern = match &variant.fields {
            Fields::Named(_) => quote! { Self::#variant_name { .. } },
            Fields::Unnamed(_) => quote! { Self::#variant_name(..) },
            Fields::Unit => quote! { Self::#variant_name },
        };

        let type_name = variant_name.to_string();
        type_arms.push(quote! { #pattern => #type_name, });

        if let Some(slice) = slice_of(&variant.attrs)? {
            let slice_name = slice.to_string();
            slice_arms.push(quote! { #pattern => ::core::option::Option::Some(#slice_name), });
        }
    }

    Ok(quote! {
        impl #impl_generics #name #ty_generics #where_clause {
            /// Returns the variant name of this action
            #[must_use]
            pub const fn action_type(&self) -> &'static str {
                match self {
                    #(#type_arms)*
                }
            }

            /// Returns the state slice that owns this action, if tagged
            #[must_use]
            #[allow(unreachable_patterns)]
            pub const fn slice(&self) -> ::core::option::Option<&'static str> {
                match self {
                    #(#slice_arms)*
                    _ => ::core::option::Option::None,
                }
            }

            /// Returns true if this action is owned by `slice`
            #[must_use]
            pub fn is_owned_by(&self, slice: &str) -> bool {
                self.slice() == ::core::option::Option::Some(slice)
            }
        }
    })
}

/// Read the single `#[slice(name)]` attribute of a variant, if present
fn slice_of(attrs: &[Attribute]) -> syn::Result<Option<Ident>> {
    let mut found: Option<Ident> = None;

    for attr in attrs.iter().filter(|attr| attr.path().is_ident("slice")) {
        if found.is_some() {
            return Err(syn::Error::new_spanned(
                attr,
                "A variant can belong to only one #[slice(..)]",
            ));
        }
        found = Some(attr.parse_args::<Ident>()?);
    }

    Ok(found)
}

//! Procedural macros for flux-dispatch

use std::collections::HashSet;

use darling::{FromDeriveInput, FromVariant};
use proc_macro::TokenStream;
use quote::{format_ident, quote};
use syn::{parse_macro_input, DeriveInput};

/// Container-level input for #[derive(Action)]
#[derive(Debug, FromDeriveInput)]
#[darling(attributes(action), supports(enum_any))]
struct ActionOpts {
    ident: syn::Ident,
    data: darling::ast::Data<ActionVariant, ()>,
}

/// Variant-level attributes
#[derive(Debug, FromVariant)]
#[darling(attributes(action))]
struct ActionVariant {
    ident: syn::Ident,

    /// Wire tag for this variant (defaults to the variant name)
    #[darling(default)]
    tag: Option<String>,

    /// Not a wire action: excluded from `TAGS` and gets no tag constant
    #[darling(default)]
    skip: bool,
}

/// Convert PascalCase to SCREAMING_SNAKE_CASE
fn to_screaming_snake_case(s: &str) -> String {
    let mut result = String::new();
    for (i, ch) in s.chars().enumerate() {
        if ch.is_uppercase() && i > 0 {
            result.push('_');
        }
        result.extend(ch.to_uppercase());
    }
    result
}

/// Derive macro for the Action trait
///
/// Generates a `name()` method returning each variant's wire tag. The tag is
/// the variant name unless overridden with `#[action(tag = "...")]`.
///
/// Also generates, on the enum itself:
/// - `{VARIANT}_TAG` constants for every non-skipped variant
/// - `TAGS`, the list of all wire tags in declaration order
/// - `is_known_tag(&str)`
///
/// Variants marked `#[action(skip)]` keep their variant name as `name()` but
/// are left out of `TAGS`. Duplicate tags are a compile error.
///
/// # Example
/// ```ignore
/// #[derive(Action, Clone, Debug)]
/// enum TodoAction {
///     #[action(tag = "Fetch todo list from server")]
///     FetchList,
///     #[action(tag = "remove todo from server")]
///     Remove(TodoId),
///     #[action(skip)]
///     Unrecognized(RawAction),
/// }
///
/// assert_eq!(TodoAction::FetchList.name(), "Fetch todo list from server");
/// assert_eq!(TodoAction::FETCH_LIST_TAG, "Fetch todo list from server");
/// assert_eq!(TodoAction::TAGS.len(), 2);
/// ```
#[proc_macro_derive(Action, attributes(action))]
pub fn derive_action(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    let opts = match ActionOpts::from_derive_input(&input) {
        Ok(opts) => opts,
        Err(e) => return e.write_errors().into(),
    };

    let name = &opts.ident;

    let variants = match &opts.data {
        darling::ast::Data::Enum(variants) => variants,
        _ => {
            return syn::Error::new_spanned(&input, "Action can only be derived for enums")
                .to_compile_error()
                .into();
        }
    };

    let mut seen = HashSet::new();
    let mut name_arms = Vec::new();
    let mut tag_consts = Vec::new();
    let mut tag_values = Vec::new();

    for v in variants.iter() {
        let variant_name = &v.ident;
        let tag = v.tag.clone().unwrap_or_else(|| variant_name.to_string());

        if v.skip {
            if v.tag.is_some() {
                return syn::Error::new_spanned(
                    variant_name,
                    "`tag` has no effect on a skipped variant",
                )
                .to_compile_error()
                .into();
            }
        } else {
            if !seen.insert(tag.clone()) {
                return syn::Error::new_spanned(
                    variant_name,
                    format!("duplicate action tag {:?}", tag),
                )
                .to_compile_error()
                .into();
            }

            let const_name = format_ident!(
                "{}_TAG",
                to_screaming_snake_case(&variant_name.to_string())
            );
            let doc = format!("Wire tag of [`{}::{}`].", name, variant_name);
            tag_consts.push(quote! {
                #[doc = #doc]
                pub const #const_name: &'static str = #tag;
            });
            tag_values.push(tag.clone());
        }

        // Wildcard struct pattern matches unit, tuple and struct variants alike
        name_arms.push(quote! {
            #name::#variant_name { .. } => #tag
        });
    }

    let expanded = quote! {
        impl flux_dispatch::Action for #name {
            fn name(&self) -> &'static str {
                match self {
                    #(#name_arms),*
                }
            }
        }

        impl #name {
            #(#tag_consts)*

            /// Every wire tag, in declaration order.
            pub const TAGS: &'static [&'static str] = &[#(#tag_values),*];

            /// Returns true if `tag` is the wire tag of one of the variants.
            pub fn is_known_tag(tag: &str) -> bool {
                Self::TAGS.contains(&tag)
            }
        }
    };

    TokenStream::from(expanded)
}

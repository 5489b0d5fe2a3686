//! Procedural macros for greeter-core

use darling::{FromDeriveInput, FromVariant};
use proc_macro::TokenStream;
use proc_macro2::Ident;
use quote::{format_ident, quote};
use std::collections::BTreeMap;
use syn::{parse_macro_input, DeriveInput};

/// Container-level attributes for #[derive(Action)]
#[derive(Debug, FromDeriveInput)]
#[darling(attributes(action), supports(enum_any))]
struct ActionOpts {
    ident: syn::Ident,
    data: darling::ast::Data<ActionVariant, ()>,

    /// Infer a category for each variant from its name prefix
    #[darling(default)]
    infer_categories: bool,
}

/// Variant-level attributes
#[derive(Debug, FromVariant)]
#[darling(attributes(action))]
struct ActionVariant {
    ident: syn::Ident,
    fields: darling::ast::Fields<()>,

    /// Explicit category override
    #[darling(default)]
    category: Option<String>,

    /// Leave this variant uncategorized
    #[darling(default)]
    skip_category: bool,
}

// Verbs that END an action name. The parts before the verb form the category.
const ACTION_VERBS: &[&str] = &[
    // Two-phase updates
    "Stage", "Commit", "Submit", "Cancel", "Reset", "Clear", "Set", "Update",
    // Focus
    "Focus", "Blur", "Next", "Prev", // Lifecycle
    "Start", "Open", "Close", "Load", "Save", // Visibility
    "Show", "Hide", "Toggle",
];

/// Split a PascalCase string into parts
fn split_pascal_case(s: &str) -> Vec<String> {
    let mut parts = Vec::new();
    let mut current = String::new();

    for ch in s.chars() {
        if ch.is_uppercase() && !current.is_empty() {
            parts.push(std::mem::take(&mut current));
        }
        current.push(ch);
    }
    if !current.is_empty() {
        parts.push(current);
    }
    parts
}

/// Convert PascalCase to snake_case
fn to_snake_case(s: &str) -> String {
    let mut result = String::new();
    for (i, ch) in s.chars().enumerate() {
        if ch.is_uppercase() {
            if i > 0 {
                result.push('_');
            }
            result.extend(ch.to_lowercase());
        } else {
            result.push(ch);
        }
    }
    result
}

/// Infer a category from a variant name.
///
/// `GreetingStage` -> `greeting`, `FocusNext` -> `None` (starts with a verb),
/// `Quit` -> `None` (single word).
fn infer_category(name: &str) -> Option<String> {
    let parts = split_pascal_case(name);
    if parts.len() < 2 || ACTION_VERBS.contains(&parts[0].as_str()) {
        return None;
    }

    let verb_at = parts
        .iter()
        .skip(1)
        .position(|part| ACTION_VERBS.contains(&part.as_str()))?
        + 1;

    Some(to_snake_case(&parts[..verb_at].concat()))
}

/// Derive macro for the `Action` trait
///
/// Generates `name()` returning the variant name.
///
/// With `#[action(infer_categories)]`, also implements `ActionCategory` and adds
/// an `is_{category}()` predicate per discovered category. Variants can
/// override the inferred value with `#[action(category = "...")]` or opt out
/// with `#[action(skip_category)]`.
///
/// # Example
/// ```ignore
/// #[derive(Action, Clone, Debug)]
/// #[action(infer_categories)]
/// enum Action {
///     GreetingStage { greeting: String },
///     GreetingCommit,
///     Quit,
/// }
///
/// assert_eq!(Action::GreetingCommit.name(), "GreetingCommit");
/// assert_eq!(Action::GreetingCommit.category(), Some("greeting"));
/// assert!(Action::GreetingCommit.is_greeting());
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

    let name_arms = variants.iter().map(|v| {
        let variant_name = &v.ident;
        let variant_str = variant_name.to_string();

        match &v.fields.style {
            darling::ast::Style::Unit => quote! {
                #name::#variant_name => #variant_str
            },
            darling::ast::Style::Tuple => quote! {
                #name::#variant_name(..) => #variant_str
            },
            darling::ast::Style::Struct => quote! {
                #name::#variant_name { .. } => #variant_str
            },
        }
    });

    let mut expanded = quote! {
        impl ::greeter_core::Action for #name {
            fn name(&self) -> &'static str {
                match self {
                    #(#name_arms),*
                }
            }
        }
    };

    if opts.infer_categories {
        let mut categories: BTreeMap<String, Vec<&Ident>> = BTreeMap::new();

        let category_arms: Vec<_> = variants
            .iter()
            .map(|v| {
                let cat = if v.skip_category {
                    None
                } else {
                    v.category
                        .clone()
                        .or_else(|| infer_category(&v.ident.to_string()))
                };

                if let Some(ref c) = cat {
                    categories.entry(c.clone()).or_default().push(&v.ident);
                }

                let variant = &v.ident;
                let cat_expr = match cat {
                    Some(c) => quote! { ::core::option::Option::Some(#c) },
                    None => quote! { ::core::option::Option::None },
                };
                quote! { #name::#variant { .. } => #cat_expr }
            })
            .collect();

        let predicates = categories.iter().map(|(cat, members)| {
            let predicate_name = format_ident!("is_{}", cat);
            let patterns: Vec<_> = members.iter().map(|v| quote! { #name::#v { .. } }).collect();
            let doc = format!("Returns true if this action belongs to the `{}` category.", cat);
            quote! {
                #[doc = #doc]
                pub fn #predicate_name(&self) -> bool {
                    matches!(self, #(#patterns)|*)
                }
            }
        });

        expanded.extend(quote! {
            impl ::greeter_core::ActionCategory for #name {
                fn category(&self) -> ::core::option::Option<&'static str> {
                    match self {
                        #(#category_arms),*
                    }
                }
            }

            impl #name {
                #(#predicates)*
            }
        });
    }

    expanded.into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_pascal_case() {
        assert_eq!(split_pascal_case("GreetingStage"), vec!["Greeting", "Stage"]);
        assert_eq!(split_pascal_case("Quit"), vec!["Quit"]);
    }

    #[test]
    fn test_infer_category() {
        assert_eq!(infer_category("GreetingStage"), Some("greeting".into()));
        assert_eq!(infer_category("GreetingCommit"), Some("greeting".into()));
        assert_eq!(infer_category("UiFocusNext"), Some("ui".into()));
        assert_eq!(infer_category("DraftGreetingClear"), Some("draft_greeting".into()));
    }

    #[test]
    fn test_infer_category_uncategorized() {
        assert_eq!(infer_category("Quit"), None);
        assert_eq!(infer_category("FocusNext"), None);
        assert_eq!(infer_category("GreetingText"), None);
    }
}

//! Derive macros for the Concierge console
//!
//! # Available Macros
//!
//! - `#[derive(Operation)]` - Generates a domain's operation enum from its
//!   success-payload enum
//!
//! # Example
//!
//! ```ignore
//! use concierge_macros::Operation;
//!
//! #[derive(Operation, Clone, Debug, PartialEq)]
//! #[operation(name = "VisitorOperation")]
//! enum VisitorSuccess {
//!     CreateVisitor(Visitor),
//!     FetchVisitors(ListPayload<Visitor>),
//!     DeleteVisitor,
//! }
//!
//! // Generated:
//! assert_eq!(VisitorOperation::CreateVisitor.name(), "createVisitor");
//! assert_eq!(VisitorOperation::ALL.len(), 3);
//! assert_eq!(VisitorSuccess::DeleteVisitor.operation(), VisitorOperation::DeleteVisitor);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use proc_macro::TokenStream;
use quote::{format_ident, quote};
use syn::{parse_macro_input, Attribute, Data, DeriveInput, Fields, Ident, LitStr};

/// Derive macro for success-payload enums
///
/// For an enum `XSuccess` it generates:
/// - a `Copy` unit enum (named by `#[operation(name = "...")]`, default
///   `XOperation`) with one variant per success variant
/// - `name()` returning the camel-case action name (`CreateVisitor` → `"createVisitor"`)
/// - `ALL`, every operation in declaration order
/// - `Display` printing `name()`
/// - `concierge_core::resource::Outcome` for the success enum
///
/// # Attributes
///
/// - `#[operation(name = "VisitorOperation")]` - Name of the generated enum
///
/// # Panics
///
/// This macro will produce a compile error (not a runtime panic) if:
/// - Applied to a non-enum type
/// - The `operation` attribute is malformed
#[proc_macro_derive(Operation, attributes(operation))]
pub fn derive_operation(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let name = &input.ident;
    let vis = &input.vis;

    let Data::Enum(data_enum) = &input.data else {
        return syn::Error::new_spanned(name, "#[derive(Operation)] can only be used on enums")
            .to_compile_error()
            .into();
    };

    let operation_name = match operation_enum_name(&input.attrs, name) {
        Ok(ident) => ident,
        Err(error) => return error.to_compile_error().into(),
    };

    let variants: Vec<&Ident> = data_enum.variants.iter().map(|v| &v.ident).collect();

    let names = variants.iter().map(|variant| {
        let action_name = camel_case(&variant.to_string());
        quote! { Self::#variant => #action_name, }
    });

    let operation_arms = data_enum.variants.iter().map(|variant| {
        let ident = &variant.ident;
        match &variant.fields {
            Fields::Named(_) => quote! { Self::#ident { .. } => #operation_name::#ident, },
            Fields::Unnamed(_) => quote! { Self::#ident(..) => #operation_name::#ident, },
            Fields::Unit => quote! { Self::#ident => #operation_name::#ident, },
        }
    });

    let doc = format!("Operations answered by [`{name}`]");

    let expanded = quote! {
        #[doc = #doc]
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        #vis enum #operation_name {
            #(
                #[allow(missing_docs)]
                #variants,
            )*
        }

        impl #operation_name {
            /// Every operation, in declaration order
            pub const ALL: &'static [Self] = &[#(Self::#variants),*];

            /// Camel-case action name
            #[must_use]
            pub const fn name(self) -> &'static str {
                match self {
                    #(#names)*
                }
            }
        }

        impl ::std::fmt::Display for #operation_name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.name())
            }
        }

        impl concierge_core::resource::Outcome for #name {
            type Operation = #operation_name;

            fn operation(&self) -> #operation_name {
                match self {
                    #(#operation_arms)*
                }
            }
        }
    };

    TokenStream::from(expanded)
}

/// Read `#[operation(name = "...")]`, defaulting to `<Enum minus "Success">Operation`
fn operation_enum_name(attrs: &[Attribute], enum_name: &Ident) -> syn::Result<Ident> {
    let mut custom = None;

    for attr in attrs.iter().filter(|attr| attr.path().is_ident("operation")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("name") {
                let value: LitStr = meta.value()?.parse()?;
                custom = Some(value.parse::<Ident>()?);
                Ok(())
            } else {
                Err(meta.error("expected `name = \"...\"`"))
            }
        })?;
    }

    Ok(custom.unwrap_or_else(|| {
        let base = enum_name.to_string();
        let base = base.strip_suffix("Success").unwrap_or(&base);
        format_ident!("{}Operation", base)
    }))
}

/// `CreateVisitor` → `createVisitor`
fn camel_case(variant: &str) -> String {
    let mut chars = variant.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_lowercase().chain(chars).collect()
    })
}

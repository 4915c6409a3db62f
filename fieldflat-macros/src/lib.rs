//! fieldflat Macros
//!
//! Procedural macros for opting types into the record capability.
//!
//! ## Macros
//!
//! - `#[derive(Record)]` - Implement `Record` and `Node` for a struct with named fields

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use std::collections::HashSet;
use syn::ext::IdentExt;
use syn::{Data, DeriveInput, Fields, parse_macro_input};

// ============================================================================
// Attribute Parsing Helpers
// ============================================================================

mod attr {
    use syn::meta::ParseNestedMeta;

    /// Get the attribute name as a string
    pub fn name(meta: &ParseNestedMeta) -> String {
        meta.path
            .get_ident()
            .map(|i| i.to_string())
            .unwrap_or_default()
    }

    /// Parse a string literal attribute: `attr = "value"`
    pub fn string(meta: &ParseNestedMeta) -> syn::Result<String> {
        let value: syn::LitStr = meta.value()?.parse()?;
        Ok(value.value())
    }

    /// Accept a bare flag attribute: `attr`
    pub fn flag(meta: &ParseNestedMeta, name: &str) -> syn::Result<bool> {
        if meta.input.peek(syn::Token![=]) || meta.input.peek(syn::token::Paren) {
            return Err(meta.error(format!("`{}` does not take a value", name)));
        }
        Ok(true)
    }

    /// Create an unknown attribute error
    pub fn unknown(meta: &ParseNestedMeta, name: &str) -> syn::Error {
        meta.error(format!("unknown attribute: {}", name))
    }
}

const RECORD: &str = "record";

/// Implement the record capability for a struct.
///
/// Fields are exposed in declaration order. Field values must implement
/// `fieldflat::Node`; nested structs that also derive `Record` are descended
/// into, everything else is a leaf.
///
/// # Example
///
/// ```ignore
/// #[derive(Record)]
/// struct ElectionOptions {
///     ping_period: Duration,
///     no_ping_timeout_min: Duration,
/// }
///
/// #[derive(Record)]
/// struct LeaderOptions {
///     #[record(rename = "stutter_every")]
///     stutter: u32,
///     election_options: ElectionOptions,
///     #[record(leaf)]
///     raw_election_options: ElectionOptions,
///     #[record(skip)]
///     scratch: Vec<u8>,
/// }
/// ```
///
/// Field attributes:
/// - `rename = "name"` - use `name` as the field name
/// - `skip` - leave the field out
/// - `leaf` - never descend into the field, even if it is a record
#[proc_macro_derive(Record, attributes(record))]
pub fn derive_record(item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);

    record_impl(input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}

#[derive(Debug, Default, PartialEq)]
struct FieldConfig {
    rename: Option<String>,
    skip: bool,
    leaf: bool,
}

fn parse_field_config(attrs: &[syn::Attribute]) -> syn::Result<FieldConfig> {
    let mut config = FieldConfig::default();

    for attribute in attrs {
        if !attribute.path().is_ident(RECORD) {
            continue;
        }
        attribute.parse_nested_meta(|meta| {
            let name = attr::name(&meta);
            match name.as_str() {
                "rename" => config.rename = Some(attr::string(&meta)?),
                "skip" => config.skip = attr::flag(&meta, &name)?,
                "leaf" => config.leaf = attr::flag(&meta, &name)?,
                _ => return Err(attr::unknown(&meta, &name)),
            }
            Ok(())
        })?;
    }

    if config.skip && (config.leaf || config.rename.is_some()) {
        return Err(syn::Error::new(
            proc_macro2::Span::call_site(),
            "fieldflat: `skip` cannot be combined with other field attributes",
        ));
    }

    Ok(config)
}

fn record_impl(input: DeriveInput) -> Result<TokenStream2, syn::Error> {
    if let Some(attribute) = input.attrs.iter().find(|a| a.path().is_ident(RECORD)) {
        return Err(syn::Error::new_spanned(
            attribute,
            "fieldflat: #[record(...)] attributes belong on fields",
        ));
    }

    let fields: Vec<&syn::Field> = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => named.named.iter().collect(),
            Fields::Unit => Vec::new(),
            Fields::Unnamed(_) => {
                return Err(syn::Error::new_spanned(
                    &input.ident,
                    "fieldflat: Record requires named fields; tuple structs have no field names",
                ));
            }
        },
        Data::Enum(_) | Data::Union(_) => {
            return Err(syn::Error::new_spanned(
                &input.ident,
                "fieldflat: Record can only be derived for structs",
            ));
        }
    };

    let mut seen = HashSet::new();
    let mut field_exprs = Vec::with_capacity(fields.len());

    for field in fields {
        let config = parse_field_config(&field.attrs)?;
        if config.skip {
            continue;
        }

        let ident = field
            .ident
            .as_ref()
            .ok_or_else(|| syn::Error::new_spanned(field, "fieldflat: unnamed field"))?;
        let field_name = config
            .rename
            .unwrap_or_else(|| ident.unraw().to_string());

        if field_name.is_empty() {
            return Err(syn::Error::new_spanned(
                field,
                "fieldflat: field name cannot be empty",
            ));
        }
        if !seen.insert(field_name.clone()) {
            return Err(syn::Error::new_spanned(
                field,
                format!("fieldflat: duplicate field name `{}`", field_name),
            ));
        }

        let constructor = if config.leaf {
            quote! { leaf }
        } else {
            quote! { new }
        };
        field_exprs.push(quote! {
            ::fieldflat::Field::#constructor(#field_name, &self.#ident)
        });
    }

    let name = &input.ident;
    let mut generics = input.generics.clone();
    for param in generics.type_params_mut() {
        param.bounds.push(syn::parse_quote!(::fieldflat::Node));
    }
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics ::fieldflat::Record for #name #ty_generics #where_clause {
            fn fields(&self) -> ::std::vec::Vec<::fieldflat::Field<'_>> {
                ::std::vec![#(#field_exprs),*]
            }
        }

        impl #impl_generics ::fieldflat::Node for #name #ty_generics #where_clause {
            fn as_record(&self) -> ::std::option::Option<&dyn ::fieldflat::Record> {
                ::std::option::Option::Some(self)
            }

            fn to_value(&self) -> ::fieldflat::Value {
                ::fieldflat::Value::Record(::fieldflat::RecordValue::from_record(self))
            }
        }
    })
}

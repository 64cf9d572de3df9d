use proc_macro::TokenStream;
use quote::quote;
use syn::{
    Data, DeriveInput, Error, Expr, ExprRange, Fields, RangeLimits, Result, Type,
    parse_macro_input,
};

/// Derive macro that generates `Default` and range clamping for
/// configuration structs whose fields are UI-bound parameters.
///
/// Every field carries a `#[param(...)]` attribute with a mandatory
/// `default = <expr>` and an optional inclusive `range = <lo>..=<hi>`.
/// String fields accept string literals as defaults.
///
/// Besides `Default`, the macro generates an inherent
/// `clamp_to_ranges(&mut self) -> Vec<&'static str>` that pulls every ranged
/// field back into its range and returns the names of the fields it touched.
/// A ranged value that is neither below nor above its range (a NaN) is
/// replaced by the field's default.
///
/// # Example
/// ```
/// use phasekit_macros::ConfigDefaults;
///
/// #[derive(ConfigDefaults, Debug)]
/// pub struct OscillatorConfig {
///     #[param(default = 1.0, range = 0.1..=5.0)]
///     pub mass: f64,
///
///     #[param(default = 240, range = 50..=240)]
///     pub trail_capacity: usize,
///
///     #[param(default = "midpoint")]
///     pub integrator: String,
/// }
///
/// let mut config = OscillatorConfig::default();
/// assert_eq!(config.mass, 1.0);
/// assert_eq!(config.integrator, "midpoint");
///
/// config.mass = 12.0;
/// assert_eq!(config.clamp_to_ranges(), vec!["mass"]);
/// assert_eq!(config.mass, 5.0);
/// ```
///
/// # Errors
///
/// The macro produces a compile error if:
/// - Applied to anything other than a struct with named fields
/// - Any field is missing `#[param(default = ...)]`
/// - A `range` is not a closed range with both bounds
/// - An unknown key appears inside `#[param(...)]`
#[proc_macro_derive(ConfigDefaults, attributes(param))]
pub fn config_defaults(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match expand(input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

/// Parsed contents of one field's `#[param(...)]` attribute
struct FieldParam {
    default: Expr,
    range: Option<(Expr, Expr)>,
}

fn expand(input: DeriveInput) -> Result<proc_macro2::TokenStream> {
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(Error::new_spanned(
                    &input,
                    "ConfigDefaults only supports structs with named fields",
                ));
            }
        },
        _ => {
            return Err(Error::new_spanned(
                &input,
                "ConfigDefaults can only be derived for structs",
            ));
        }
    };

    let mut initializers = Vec::with_capacity(fields.len());
    let mut clamps = Vec::new();

    for field in fields {
        let Some(ident) = field.ident.as_ref() else {
            continue;
        };
        let param = parse_field_param(field)?;
        let default = default_tokens(&field.ty, &param.default);

        initializers.push(quote! { #ident: #default });

        if let Some((lo, hi)) = &param.range {
            let field_name = ident.to_string();
            clamps.push(quote! {
                if !(#lo..=#hi).contains(&self.#ident) {
                    self.#ident = if self.#ident < #lo {
                        #lo
                    } else if self.#ident > #hi {
                        #hi
                    } else {
                        #default
                    };
                    adjusted.push(#field_name);
                }
            });
        }
    }

    Ok(quote! {
        #[automatically_derived]
        impl #impl_generics ::core::default::Default for #name #ty_generics #where_clause {
            fn default() -> Self {
                Self {
                    #(#initializers),*
                }
            }
        }

        #[automatically_derived]
        impl #impl_generics #name #ty_generics #where_clause {
            /// Pull every ranged parameter back into its declared range.
            ///
            /// Returns the names of the fields that were adjusted.
            #[allow(clippy::manual_range_contains)]
            pub fn clamp_to_ranges(&mut self) -> ::std::vec::Vec<&'static str> {
                #[allow(unused_mut)]
                let mut adjusted = ::std::vec::Vec::new();
                #(#clamps)*
                adjusted
            }
        }
    })
}

/// String fields get `&str -> String` conversion; everything else relies on inference
fn default_tokens(ty: &Type, default: &Expr) -> proc_macro2::TokenStream {
    if is_string_type(ty) {
        quote! { ::std::convert::Into::into(#default) }
    } else {
        quote! { #default }
    }
}

fn is_string_type(ty: &Type) -> bool {
    match ty {
        Type::Path(type_path) => type_path
            .path
            .segments
            .last()
            .is_some_and(|segment| segment.ident == "String"),
        _ => false,
    }
}

fn parse_field_param(field: &syn::Field) -> Result<FieldParam> {
    let field_name = field
        .ident
        .as_ref()
        .map(|ident| ident.to_string())
        .unwrap_or_else(|| "unnamed field".to_string());

    let Some(attr) = field.attrs.iter().find(|attr| attr.path().is_ident("param")) else {
        return Err(Error::new_spanned(
            field,
            format!("Field '{field_name}' must have a #[param(default = ...)] attribute"),
        ));
    };

    let mut default = None;
    let mut range = None;

    attr.parse_nested_meta(|meta| {
        if meta.path.is_ident("default") {
            default = Some(meta.value()?.parse::<Expr>()?);
            Ok(())
        } else if meta.path.is_ident("range") {
            let expr = meta.value()?.parse::<Expr>()?;
            range = Some(closed_range_bounds(expr)?);
            Ok(())
        } else {
            Err(meta.error("unsupported key in #[param(...)]; expected `default` or `range`"))
        }
    })?;

    let default = default.ok_or_else(|| {
        Error::new_spanned(
            attr,
            format!("Field '{field_name}' has no `default = ...` in its #[param(...)] attribute"),
        )
    })?;

    Ok(FieldParam { default, range })
}

fn closed_range_bounds(expr: Expr) -> Result<(Expr, Expr)> {
    match expr {
        Expr::Range(ExprRange {
            start: Some(start),
            limits: RangeLimits::Closed(_),
            end: Some(end),
            ..
        }) => Ok((*start, *end)),
        other => Err(Error::new_spanned(
            other,
            "expected a closed range with both bounds, like `0.0..=1.0`",
        )),
    }
}

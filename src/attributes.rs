//! Reading markers from Rust attributes.
//!
//! Recognized attributes (matched on the last path segment, so
//! `#[docs::api_method]` also works):
//!
//! - `#[api_description("text")]`, `#[api_description(text = "text")]`,
//!   `#[api_description = "text"]`, or bare `#[api_description]` (text unset)
//! - `#[api_method]`
//! - `#[api_required]`, `#[api_required(true)]`, `#[api_required(false)]`
//! - `#[api_int_validation(min = -5, max = 10)]`, either key optional
//! - `#[api_return(description = "..", required, min = 0, max = 10)]` on an
//!   operation, describing its return slot
//!
//! Malformed attributes are logged and skipped. Whatever could be read
//! before the error is kept.

use crate::declaration::attach_marker;
use crate::marker::{Marker, MarkerSet, MarkerTarget};
use log::warn;
use syn::parse::ParseStream;
use syn::{Attribute, Expr, Lit, LitBool, LitInt, LitStr, Meta, Token};

pub const DESCRIPTION: &str = "api_description";
pub const METHOD: &str = "api_method";
pub const REQUIRED: &str = "api_required";
pub const INT_VALIDATION: &str = "api_int_validation";
pub const RETURN: &str = "api_return";

/// Last path segment of an attribute, e.g. `api_method` for `#[docs::api_method]`.
pub fn attribute_name(attr: &Attribute) -> Option<String> {
    attr.path().segments.last().map(|s| s.ident.to_string())
}

/// Collects the markers found in `attrs` for a site of kind `target`.
///
/// `#[api_return]` is not a marker of its own; use [`parse_return_markers`].
pub fn parse_markers(attrs: &[Attribute], target: MarkerTarget, site: &str) -> MarkerSet {
    let mut markers = MarkerSet::new();

    for attr in attrs {
        let Some(name) = attribute_name(attr) else {
            continue;
        };

        let marker = match name.as_str() {
            DESCRIPTION => parse_description(attr),
            METHOD => Ok(Marker::Method),
            REQUIRED => parse_required(attr),
            INT_VALIDATION => Ok(parse_int_validation(attr, site)),
            RETURN => {
                if target != MarkerTarget::Operation {
                    warn!("Ignoring #[{}] on {}: only operations have a return slot", RETURN, site);
                }
                continue;
            }
            _ => continue,
        };

        match marker {
            Ok(marker) => {
                attach_marker(&mut markers, marker, target, site);
            }
            Err(e) => warn!("Ignoring malformed #[{}] on {}: {}", name, site, e),
        }
    }

    markers
}

/// Collects the return-slot markers declared through `#[api_return(..)]`.
pub fn parse_return_markers(attrs: &[Attribute], site: &str) -> MarkerSet {
    let mut markers = MarkerSet::new();

    for attr in attrs.iter().filter(|a| attribute_name(a).as_deref() == Some(RETURN)) {
        let mut description = None;
        let mut required = None;
        let mut min = None;
        let mut max = None;

        let result = match &attr.meta {
            Meta::List(_) => attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("description") {
                    let text: LitStr = meta.value()?.parse()?;
                    description = Some(text.value());
                } else if meta.path.is_ident("required") {
                    required = Some(if meta.input.peek(Token![=]) {
                        meta.value()?.parse::<LitBool>()?.value
                    } else {
                        true
                    });
                } else if meta.path.is_ident("min") {
                    min = Some(parse_int(meta.value()?)?);
                } else if meta.path.is_ident("max") {
                    max = Some(parse_int(meta.value()?)?);
                } else {
                    return Err(meta.error("expected `description`, `required`, `min` or `max`"));
                }
                Ok(())
            }),
            _ => Ok(()),
        };
        if let Err(e) = result {
            warn!("Malformed #[{}] on {}: {}", RETURN, site, e);
        }

        if let Some(text) = description {
            attach_marker(&mut markers, Marker::Description(Some(text)), MarkerTarget::Return, site);
        }
        if let Some(required) = required {
            attach_marker(&mut markers, Marker::Required(required), MarkerTarget::Return, site);
        }
        if min.is_some() || max.is_some() {
            attach_marker(&mut markers, Marker::IntValidation { min, max }, MarkerTarget::Return, site);
        }
    }

    markers
}

fn parse_description(attr: &Attribute) -> syn::Result<Marker> {
    match &attr.meta {
        Meta::Path(_) => Ok(Marker::Description(None)),
        Meta::NameValue(nv) => match &nv.value {
            Expr::Lit(expr_lit) => match &expr_lit.lit {
                Lit::Str(text) => Ok(Marker::Description(Some(text.value()))),
                other => Err(syn::Error::new(other.span(), "expected a string literal")),
            },
            _ => Err(syn::Error::new_spanned(&nv.value, "expected a string literal")),
        },
        Meta::List(_) => {
            if let Ok(text) = attr.parse_args::<LitStr>() {
                return Ok(Marker::Description(Some(text.value())));
            }
            let mut text = None;
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("text") {
                    text = Some(meta.value()?.parse::<LitStr>()?.value());
                    Ok(())
                } else {
                    Err(meta.error("expected a string literal or `text = \"..\"`"))
                }
            })?;
            Ok(Marker::Description(text))
        }
    }
}

fn parse_required(attr: &Attribute) -> syn::Result<Marker> {
    match &attr.meta {
        Meta::Path(_) => Ok(Marker::Required(true)),
        Meta::List(_) => Ok(Marker::Required(attr.parse_args::<LitBool>()?.value)),
        Meta::NameValue(nv) => Err(syn::Error::new_spanned(
            nv,
            "expected `#[api_required]` or `#[api_required(true|false)]`",
        )),
    }
}

fn parse_int_validation(attr: &Attribute, site: &str) -> Marker {
    let mut min = None;
    let mut max = None;

    if let Meta::List(_) = &attr.meta {
        let result = attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("min") {
                min = Some(parse_int(meta.value()?)?);
            } else if meta.path.is_ident("max") {
                max = Some(parse_int(meta.value()?)?);
            } else {
                return Err(meta.error("expected `min` or `max`"));
            }
            Ok(())
        });
        if let Err(e) = result {
            warn!("Malformed #[{}] on {}: {}", INT_VALIDATION, site, e);
        }
    }

    Marker::IntValidation { min, max }
}

/// Parses an integer literal with an optional leading minus sign.
fn parse_int(input: ParseStream) -> syn::Result<i64> {
    let negative = input.peek(Token![-]);
    if negative {
        input.parse::<Token![-]>()?;
    }
    let lit: LitInt = input.parse()?;
    let value: i64 = lit.base10_parse()?;
    Ok(if negative { -value } else { value })
}

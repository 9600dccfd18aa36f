// Licensed under the Apache-2.0 license

//! Rendering of settings units into Rust source and writing them out.
//!
//! ## Generated Code Structure
//!
//! A closed value set becomes a `u32`-backed enum:
//!
//! ```text
//! #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
//! #[repr(u32)]
//! pub enum VerticalSync {
//!     /// Description, when the header has one.
//!     Passive = 0x6000_0001,
//!     ForceOn = 0x4765_4c01,
//! }
//! impl VerticalSync {
//!     pub const Default: Self = Self::Passive;      // repeated discriminant
//!     pub fn description(self) -> Option<&'static str> { ... }
//! }
//! impl From<VerticalSync> for u32 { ... }
//! impl TryFrom<u32> for VerticalSync { ... }
//! ```
//!
//! An open value set becomes a unit struct with string constants:
//!
//! ```text
//! pub struct CustomSetting;
//! impl CustomSetting {
//!     pub const Low: &'static str = "1";
//! }
//! ```

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context, Result};
use drs_settings_header::Value;
use proc_macro2::{Ident, Span, TokenStream};
use quote::quote;
use syn::LitInt;
use walkdir::WalkDir;

use crate::manifest::Manifest;
use crate::names::NameRules;
use crate::util::{hex_const, is_rust_ident, safe_ident, snake_case};

/// Prepended to every generated file.
pub const GENERATED_HEADER: &str =
    "// Licensed under the Apache-2.0 license\n//\n// Generated by xtask settings-gen. Do not edit.\n\n";

/// One unit to render: a name and its ordered members, keyed by raw header
/// names.
#[derive(Clone, Debug, Default)]
pub struct UnitSource {
    pub name: String,
    pub doc: Option<String>,
    pub members: Vec<(String, Value)>,
    /// Member descriptions, keyed like `members`.
    pub descriptions: HashMap<String, String>,
}

/// A rendered unit, ready to be written.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratedUnit {
    pub file_name: String,
    pub code: String,
}

struct Member<'a> {
    ident: Ident,
    value: &'a Value,
    doc: Option<&'a str>,
}

/// Normalizes member names, dropping those that are not identifiers or
/// that repeat an earlier name.
fn members<'a>(unit: &'a UnitSource, rules: &NameRules) -> Vec<Member<'a>> {
    let mut seen = HashSet::new();
    unit.members
        .iter()
        .filter_map(|(key, value)| {
            let Some(name) = safe_ident(&rules.normalize(key)) else {
                log::debug!("{}: `{key}` does not normalize to an identifier", unit.name);
                return None;
            };
            if !seen.insert(name.clone()) {
                log::debug!("{}: dropping `{key}`, `{name}` is already taken", unit.name);
                return None;
            }
            Some(Member {
                ident: Ident::new(&name, Span::call_site()),
                value,
                doc: unit.descriptions.get(key).map(String::as_str),
            })
        })
        .collect()
}

fn doc_attr(doc: Option<&str>) -> TokenStream {
    match doc {
        Some(doc) => {
            let doc = format!(" {doc}");
            quote! { #[doc = #doc] }
        }
        None => quote! {},
    }
}

fn unit_ident(name: &str) -> Result<Ident> {
    safe_ident(name)
        .map(|name| Ident::new(&name, Span::call_site()))
        .ok_or_else(|| anyhow!("`{name}` cannot be used as a type name"))
}

/// Splits `a::b` or `a.b` into snake_case module names.
pub fn namespace_modules(namespace: &str) -> Result<Vec<Ident>> {
    namespace
        .split("::")
        .flat_map(|segment| segment.split('.'))
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(|segment| {
            let module = snake_case(segment);
            if !is_rust_ident(&module) {
                bail!("namespace segment `{segment}` is not a valid module name");
            }
            Ok(Ident::new(&module, Span::call_site()))
        })
        .collect()
}

fn finish(name: &Ident, items: TokenStream, namespace: Option<&str>) -> Result<GeneratedUnit> {
    let mut items = items;
    if let Some(namespace) = namespace {
        for module in namespace_modules(namespace)?.into_iter().rev() {
            items = quote! {
                pub mod #module {
                    #items
                }
            };
        }
    }
    let file: syn::File = syn::parse2(items)
        .with_context(|| format!("generated code for `{name}` does not parse"))?;
    Ok(GeneratedUnit {
        file_name: format!("{}.rs", snake_case(&name.to_string())),
        code: format!("{GENERATED_HEADER}{}", prettyplease::unparse(&file)),
    })
}

/// Renders a closed value set as a `#[repr(u32)]` enum.
///
/// Members whose value does not fit a `u32` discriminant are left out.
/// A member repeating an earlier discriminant becomes an associated
/// constant aliasing the earlier variant.
pub fn generate_enum(
    unit: &UnitSource,
    rules: &NameRules,
    namespace: Option<&str>,
) -> Result<GeneratedUnit> {
    let name = unit_ident(&unit.name)?;
    let mut variants = Vec::new();
    let mut discriminants: Vec<(Ident, LitInt)> = Vec::new();
    let mut aliases = Vec::new();
    let mut described: Vec<(Ident, &str)> = Vec::new();
    let mut by_value: HashMap<u32, Ident> = HashMap::new();

    for member in members(unit, rules) {
        let ident = &member.ident;
        let Some(value) = member.value.as_u32() else {
            log::debug!("{name}: `{ident}` has no u32 value ({})", member.value);
            continue;
        };
        let doc = doc_attr(member.doc);
        if let Some(target) = by_value.get(&value) {
            aliases.push(quote! {
                #doc
                pub const #ident: Self = Self::#target;
            });
            continue;
        }
        let lit = LitInt::new(&hex_const(value), Span::call_site());
        variants.push(quote! { #doc #ident = #lit, });
        if let Some(doc) = member.doc {
            described.push((ident.clone(), doc));
        }
        by_value.insert(value, ident.clone());
        discriminants.push((ident.clone(), lit));
    }

    let unit_doc = doc_attr(unit.doc.as_deref());
    let repr = if discriminants.is_empty() {
        quote! {}
    } else {
        quote! { #[repr(u32)] }
    };
    let mut items = quote! {
        #unit_doc
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        #repr
        pub enum #name {
            #(#variants)*
        }
    };

    let description = if described.is_empty() {
        quote! {}
    } else {
        let (idents, texts): (Vec<_>, Vec<_>) = described.into_iter().unzip();
        quote! {
            /// Description of the value as given in the header.
            #[allow(unreachable_patterns)]
            pub fn description(self) -> Option<&'static str> {
                match self {
                    #(Self::#idents => Some(#texts),)*
                    _ => None,
                }
            }
        }
    };
    if !aliases.is_empty() || !description.is_empty() {
        items.extend(quote! {
            #[allow(non_upper_case_globals)]
            impl #name {
                #(#aliases)*
                #description
            }
        });
    }

    if !discriminants.is_empty() {
        let (idents, lits): (Vec<_>, Vec<_>) = discriminants.into_iter().unzip();
        items.extend(quote! {
            impl From<#name> for u32 {
                fn from(value: #name) -> u32 {
                    value as u32
                }
            }

            impl TryFrom<u32> for #name {
                type Error = u32;

                fn try_from(value: u32) -> Result<Self, u32> {
                    match value {
                        #(#lits => Ok(Self::#idents),)*
                        _ => Err(value),
                    }
                }
            }
        });
    }

    finish(&name, items, namespace)
}

/// Renders an open value set as a unit struct with `&'static str` constants.
pub fn generate_constants(
    unit: &UnitSource,
    rules: &NameRules,
    namespace: Option<&str>,
) -> Result<GeneratedUnit> {
    let name = unit_ident(&unit.name)?;
    let mut constants = Vec::new();
    let mut described: Vec<(String, &str)> = Vec::new();

    for member in members(unit, rules) {
        let ident = &member.ident;
        if *member.value == Value::Unrepresentable {
            log::debug!("{name}: `{ident}` has no representable value");
            continue;
        }
        let text = member.value.to_string();
        let doc = doc_attr(member.doc);
        constants.push(quote! {
            #doc
            pub const #ident: &'static str = #text;
        });
        if let Some(doc) = member.doc {
            described.push((ident.to_string(), doc));
        }
    }

    let description = if described.is_empty() {
        quote! {}
    } else {
        let (names, texts): (Vec<_>, Vec<_>) = described.into_iter().unzip();
        quote! {
            /// Description of the named constant as given in the header.
            pub fn description(member: &str) -> Option<&'static str> {
                match member {
                    #(#names => Some(#texts),)*
                    _ => None,
                }
            }
        }
    };

    let unit_doc = doc_attr(unit.doc.as_deref());
    let items = quote! {
        #unit_doc
        #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
        pub struct #name;

        #[allow(non_upper_case_globals)]
        impl #name {
            #(#constants)*
            #description
        }
    };
    finish(&name, items, namespace)
}

/// Writes `unit` into `dir`, recording an overwrite as a removal plus an
/// addition.
pub fn write_unit(dir: &Path, unit: &GeneratedUnit, manifest: &mut Manifest) -> Result<PathBuf> {
    let path = dir.join(&unit.file_name);
    if path.exists() {
        manifest.remove(&path);
    }
    fs::write(&path, &unit.code).with_context(|| format!("failed to write {}", path.display()))?;
    manifest.add(&path);
    Ok(path)
}

/// Deletes everything below `dir`, recording each removed file. `dir`
/// itself is kept.
pub fn clear_dir(dir: &Path, manifest: &mut Manifest) -> Result<()> {
    if !dir.exists() {
        return Ok(());
    }
    for entry in WalkDir::new(dir).min_depth(1).contents_first(true) {
        let entry = entry?;
        let path = entry.path();
        if entry.file_type().is_dir() {
            fs::remove_dir(path)
                .with_context(|| format!("failed to remove {}", path.display()))?;
        } else {
            fs::remove_file(path)
                .with_context(|| format!("failed to remove {}", path.display()))?;
            manifest.remove(path);
        }
    }
    Ok(())
}

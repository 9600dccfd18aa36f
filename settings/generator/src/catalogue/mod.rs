// Licensed under the Apache-2.0 license

//! Reads a parsed settings header as a catalogue of settings and turns it
//! into units.
//!
//! The header is expected to look like this:
//!
//! ```text
//! #define VSYNCMODE_STRING L"Vertical Sync"      // description
//! enum EValues_VSYNCMODE {                       // closed value set
//!     VSYNCMODE_PASSIVE = 0x60925292,
//!     VSYNCMODE_NUM_VALUES = 1,                  // count sentinel, ignored
//! };
//! #define CUSTOM_SETTING_LOW 1                   // open value set
//! enum ESetting {                                // root enumeration
//!     VSYNCMODE_ID = 0x00A879CF,
//!     CUSTOM_SETTING_ID = 0x10,
//! };
//! ```

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::Result;
use drs_settings_header::{Document, NodeIdx, Value};
use thiserror::Error;

use crate::config::CatalogueConfig;
use crate::manifest::Manifest;
use crate::output::{clear_dir, generate_constants, generate_enum, write_unit, GeneratedUnit, UnitSource};
use crate::util::safe_ident;
use crate::GeneratorOptions;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogueError {
    #[error("header has no root-level enumeration named `{0}`")]
    MissingRootEnum(String),
    #[error("root enumeration `{0}` has no members")]
    EmptyRootEnum(String),
}

/// Where a setting's values came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValueSource {
    /// The setting's values enumeration.
    Closed,
    /// Root-level defines sharing the setting's base name.
    Custom,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Setting {
    /// Id enumerator name without the id suffix.
    pub base_name: String,
    /// Resolved id, if the enumerator has a value.
    pub id: Option<Value>,
    pub description: Option<String>,
    /// Values keyed by raw name, with the redundant base-name prefix removed.
    pub values: Vec<(String, Value)>,
    pub source: ValueSource,
}

/// The settings listed by a header's root enumeration, in header order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Catalogue {
    pub settings: Vec<Setting>,
}

/// Rendered units, not yet written.
#[derive(Clone, Debug)]
pub struct RenderedCatalogue {
    pub master: GeneratedUnit,
    pub values: Vec<GeneratedUnit>,
}

fn describe(value: Value) -> Option<String> {
    match value {
        Value::Text(text) => Some(text),
        Value::Unrepresentable => None,
        other => Some(other.to_string()),
    }
}

/// Named, valued nodes among `nodes` whose name passes `keep`.
fn resolved(
    doc: &Document,
    nodes: impl Iterator<Item = NodeIdx>,
    keep: impl Fn(&str) -> bool,
) -> Vec<(String, Value)> {
    nodes
        .filter_map(|idx| {
            let name = doc.tree.get(idx)?.name()?;
            if !keep(name) {
                return None;
            }
            match doc.tree.resolve(idx) {
                Some(value) => Some((name.to_string(), value)),
                None => {
                    log::debug!("{name} has no value");
                    None
                }
            }
        })
        .collect()
}

/// Drops a leading `base_` from `key`, ignoring case, unless nothing would
/// remain.
fn strip_base_prefix<'a>(key: &'a str, base: &str) -> &'a str {
    let prefix_len = base.len() + 1;
    match (key.get(..base.len()), key.get(base.len()..prefix_len)) {
        (Some(head), Some("_")) if head.eq_ignore_ascii_case(base) && key.len() > prefix_len => {
            &key[prefix_len..]
        }
        _ => key,
    }
}

impl Catalogue {
    /// Interprets `doc` according to `config`.
    pub fn extract(doc: &Document, config: &CatalogueConfig) -> Result<Catalogue, CatalogueError> {
        let tree = &doc.tree;
        let root_enum = doc
            .find_enum(&config.root_enum, true)
            .ok_or_else(|| CatalogueError::MissingRootEnum(config.root_enum.clone()))?;
        if tree.children(root_enum).next().is_none() {
            return Err(CatalogueError::EmptyRootEnum(config.root_enum.clone()));
        }

        let mut settings = Vec::new();
        for (idx, node) in tree.children(root_enum) {
            let Some(base) = node.name().and_then(|name| config.base_name(name)) else {
                log::debug!("{:?} is not a setting id", node.name());
                continue;
            };
            let id = tree.resolve(idx);
            if !id.as_ref().is_some_and(Value::is_integral) {
                log::warn!("setting {base} has no integer id ({id:?})");
            }
            let description = tree
                .find_child(tree.root(), &config.description_name(base), false)
                .filter(|&idx| tree.get(idx).is_some_and(|node| node.is_define()))
                .and_then(|idx| tree.resolve(idx))
                .and_then(describe);
            let (values, source) = match Self::closed_values(doc, config, base) {
                Some(values) => (values, ValueSource::Closed),
                None => (Self::custom_values(doc, config, base), ValueSource::Custom),
            };
            let values = values
                .into_iter()
                .map(|(key, value)| (strip_base_prefix(&key, base).to_string(), value))
                .collect();

            settings.push(Setting {
                base_name: base.to_string(),
                id,
                description,
                values,
                source,
            });
        }
        Ok(Catalogue { settings })
    }

    /// Members of the setting's values enumeration, or `None` if it is
    /// missing or has no usable member.
    fn closed_values(
        doc: &Document,
        config: &CatalogueConfig,
        base: &str,
    ) -> Option<Vec<(String, Value)>> {
        let values_enum = doc.find_enum(&config.values_enum_name(base), true)?;
        let members = doc.tree.children(values_enum).map(|(idx, _)| idx);
        let values = resolved(doc, members, |name| !config.is_count_sentinel(name));
        (!values.is_empty()).then_some(values)
    }

    /// Root-level defines named after the setting.
    fn custom_values(doc: &Document, config: &CatalogueConfig, base: &str) -> Vec<(String, Value)> {
        let defines = doc.tree.defines().map(|(idx, _)| idx);
        resolved(doc, defines, |name| {
            name.starts_with(base)
                && !config.is_count_sentinel(name)
                && !name.ends_with(config.description_suffix.as_str())
        })
    }

    /// Renders the master unit and one unit per setting with values.
    pub fn render(&self, options: &GeneratorOptions) -> Result<RenderedCatalogue> {
        let rules = &options.rules;
        let namespace = options.namespace.as_deref();

        let mut master = UnitSource {
            name: options.catalogue.master_unit.clone(),
            doc: Some("Driver settings known to the header, by id.".to_string()),
            ..Default::default()
        };
        let mut values = Vec::new();
        let mut file_names = HashMap::new();

        for setting in &self.settings {
            if let Some(id) = &setting.id {
                master.members.push((setting.base_name.clone(), id.clone()));
            }
            if let Some(description) = &setting.description {
                master
                    .descriptions
                    .insert(setting.base_name.clone(), description.clone());
            }
            if setting.values.is_empty() {
                log::debug!("{}: no possible values", setting.base_name);
                continue;
            }

            let name = rules.normalize(&setting.base_name);
            if safe_ident(&name).is_none() {
                log::warn!("{}: `{name}` is not a usable type name", setting.base_name);
                continue;
            }
            let source = UnitSource {
                name,
                doc: setting
                    .description
                    .as_ref()
                    .map(|description| format!("Values of the `{description}` setting.")),
                members: setting.values.clone(),
                descriptions: HashMap::new(),
            };
            let unit = match setting.source {
                ValueSource::Closed => generate_enum(&source, rules, namespace)?,
                ValueSource::Custom => generate_constants(&source, rules, namespace)?,
            };
            match file_names.entry(unit.file_name.clone()) {
                Entry::Occupied(first) => {
                    log::warn!(
                        "{}: {} is already generated for {}, skipping",
                        setting.base_name,
                        unit.file_name,
                        first.get()
                    );
                    continue;
                }
                Entry::Vacant(slot) => {
                    slot.insert(&setting.base_name);
                }
            }
            log::debug!("{}: {:?} unit {}", setting.base_name, setting.source, unit.file_name);
            values.push(unit);
        }

        Ok(RenderedCatalogue {
            master: generate_enum(&master, rules, namespace)?,
            values,
        })
    }
}

impl RenderedCatalogue {
    /// Replaces the contents of the values directory and overwrites the
    /// master unit.
    pub fn write(&self, out_dir: &Path, config: &CatalogueConfig) -> Result<Manifest> {
        let mut manifest = Manifest::default();
        let values_dir = out_dir.join(&config.values_dir);
        clear_dir(&values_dir, &mut manifest)?;
        fs::create_dir_all(&values_dir)?;
        for unit in &self.values {
            write_unit(&values_dir, unit, &mut manifest)?;
        }
        write_unit(out_dir, &self.master, &mut manifest)?;
        Ok(manifest)
    }
}

#[cfg(test)]
#[path = "tests.rs"]
mod tests;

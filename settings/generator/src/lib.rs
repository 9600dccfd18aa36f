// Licensed under the Apache-2.0 license

//! Driver settings header to Rust code generator.
//!
//! This crate turns the settings catalogue of a driver settings header
//! (read by `drs-settings-header`) into Rust source: one master enum mapping
//! every setting to its id, plus one enum or constant group per setting
//! listing its possible values.
//!
//! ## Usage
//!
//! ```no_run
//! use std::path::Path;
//! use drs_settings_generator::{generate_settings_from_file, GeneratorOptions, NameRules};
//!
//! let options = GeneratorOptions {
//!     rules: NameRules::with_defaults().replace("NV", "NVIDIA"),
//!     namespace: Some("nvapi::drs".to_string()),
//!     ..Default::default()
//! };
//! let manifest = generate_settings_from_file(
//!     Path::new("sdk/include"),
//!     Path::new("generated"),
//!     &options,
//! ).unwrap();
//! for (change, path) in manifest.changes() {
//!     println!("{change} {}", path.display());
//! }
//! ```
//!
//! ## Module Organization
//!
//! - [`util`]: Identifier helpers (snake_case, keyword escaping, hex formatting)
//! - [`names`]: Raw token normalization ([`NameRules`])
//! - [`config`]: Header and output naming conventions ([`CatalogueConfig`])
//! - [`catalogue`]: Settings extraction from a parsed header ([`Catalogue`])
//! - [`output`]: Unit rendering and file writing
//! - [`manifest`]: Added and removed files ([`Manifest`])

pub mod catalogue;
pub mod config;
pub mod manifest;
pub mod names;
pub mod output;
pub mod util;

use std::path::Path;

use anyhow::{bail, Context, Result};
use drs_settings_header::{parse_file, Document};

pub use catalogue::{Catalogue, CatalogueError, Setting, ValueSource};
pub use config::CatalogueConfig;
pub use manifest::{Change, Manifest};
pub use names::NameRules;

/// Everything that shapes a generation run besides its paths.
#[derive(Clone, Debug)]
pub struct GeneratorOptions {
    pub catalogue: CatalogueConfig,
    pub rules: NameRules,
    /// Module path (`a::b` or `a.b`) wrapping every unit.
    pub namespace: Option<String>,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            catalogue: CatalogueConfig::default(),
            rules: NameRules::with_defaults(),
            namespace: None,
        }
    }
}

/// Generates every unit for `doc` into `out_dir`.
///
/// All units are rendered before anything is written, so a header without
/// a usable root enumeration leaves `out_dir` untouched.
pub fn generate_settings(doc: &Document, out_dir: &Path, options: &GeneratorOptions) -> Result<Manifest> {
    let catalogue = Catalogue::extract(doc, &options.catalogue)?;
    let rendered = catalogue.render(options)?;
    let manifest = rendered.write(out_dir, &options.catalogue)?;
    log::info!(
        "{} settings, {} value units, {} files written, {} removed",
        catalogue.settings.len(),
        rendered.values.len(),
        manifest.added().len(),
        manifest.removed().len()
    );
    Ok(manifest)
}

/// Reads the configured header from `input_dir` and generates into
/// `out_dir`.
pub fn generate_settings_from_file(
    input_dir: &Path,
    out_dir: &Path,
    options: &GeneratorOptions,
) -> Result<Manifest> {
    let header = input_dir.join(&options.catalogue.header_file);
    if !header.is_file() {
        bail!("settings header not found: {}", header.display());
    }
    let doc = parse_file(&header)?;
    generate_settings(&doc, out_dir, options)
        .with_context(|| format!("failed to generate settings from {}", header.display()))
}

// Licensed under the Apache-2.0 license

//! `cargo xtask settings-gen`: regenerate the settings bindings, or check
//! that the checked-in ones are current.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Result};
use clap::Args;
use drs_settings_generator::{generate_settings_from_file, GeneratorOptions, NameRules};
use walkdir::WalkDir;

#[derive(Args, Debug)]
pub struct SettingsGenArgs {
    /// Directory containing NvApiDriverSettings.h
    #[arg(long, value_name = "DIR", default_value = ".")]
    input_dir: PathBuf,

    /// Directory receiving the generated files
    #[arg(long, value_name = "DIR", default_value = "generated")]
    output_dir: PathBuf,

    /// Module path wrapping the generated code, e.g. `nvapi::drs`
    #[arg(long)]
    namespace: Option<String>,

    /// TOML file with extra name rules
    #[arg(long, value_name = "FILE")]
    rules: Option<PathBuf>,

    /// Only use the rules from --rules
    #[arg(long)]
    no_default_rules: bool,

    /// Fail if the output directory is not up to date instead of writing it
    #[arg(long)]
    check: bool,
}

impl SettingsGenArgs {
    fn options(&self) -> Result<GeneratorOptions> {
        let mut rules = if self.no_default_rules {
            NameRules::none()
        } else {
            NameRules::with_defaults()
        };
        if let Some(path) = &self.rules {
            rules = rules.extend(NameRules::from_file(path)?);
        }
        Ok(GeneratorOptions {
            rules,
            namespace: self.namespace.clone(),
            ..Default::default()
        })
    }
}

pub(crate) fn run(args: &SettingsGenArgs) -> Result<()> {
    let options = args.options()?;
    if args.check {
        return check(args, &options);
    }

    let manifest = generate_settings_from_file(&args.input_dir, &args.output_dir, &options)?;
    for (change, path) in manifest.changes() {
        println!("{change} {}", path.display());
    }
    Ok(())
}

/// Generates into a scratch directory and compares it with the output
/// directory without touching the latter.
fn check(args: &SettingsGenArgs, options: &GeneratorOptions) -> Result<()> {
    let scratch = tempfile::tempdir()?;
    generate_settings_from_file(&args.input_dir, scratch.path(), options)?;

    let mut problems = Vec::new();
    for file in generated_files(scratch.path())? {
        let current = args.output_dir.join(&file);
        let expected = fs::read(scratch.path().join(&file))?;
        match fs::read(&current) {
            Ok(contents) if contents == expected => {}
            Ok(_) => problems.push(format!("stale {}", current.display())),
            Err(_) => problems.push(format!("missing {}", current.display())),
        }
    }
    let values_dir = args.output_dir.join(&options.catalogue.values_dir);
    if values_dir.is_dir() {
        for file in generated_files(&args.output_dir)? {
            if file.starts_with(&options.catalogue.values_dir) && !scratch.path().join(&file).exists() {
                problems.push(format!("extra {}", args.output_dir.join(&file).display()));
            }
        }
    }

    if !problems.is_empty() {
        for problem in &problems {
            println!("{problem}");
        }
        bail!(
            "{} settings files are out of date; run `cargo xtask settings-gen`",
            problems.len()
        );
    }
    println!("{} is up to date", args.output_dir.display());
    Ok(())
}

/// Files below `root`, relative to it.
fn generated_files(root: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry?;
        if entry.file_type().is_file() {
            files.push(entry.path().strip_prefix(root)?.to_path_buf());
        }
    }
    Ok(files)
}

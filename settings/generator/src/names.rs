// Licensed under the Apache-2.0 license

//! Raw header token to CamelCase identifier normalization.
//!
//! A raw name such as `OGL_AA_LINE_GAMMA` is split into fragments on `_`,
//! space, `-` and `|`. Each fragment may be expanded (case-insensitively) into
//! further fragments, dropped, or kept with a fixed spelling; everything else
//! is title-cased. The fragments are then concatenated.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Context;
use serde::Deserialize;

const DELIMITERS: [char; 4] = ['_', ' ', '-', '|'];

fn fragments(s: &str) -> impl Iterator<Item = &str> {
    s.split(DELIMITERS).filter(|f| !f.is_empty())
}

/// An immutable set of name translation rules.
///
/// # Example
///
/// ```
/// use drs_settings_generator::NameRules;
///
/// let rules = NameRules::none()
///     .replace("AA", "ANTI_ALIASING")
///     .replace("NV", "NVIDIA");
/// assert_eq!(rules.normalize("NV_MAX_AA"), "NvidiaMaxAntiAliasing");
///
/// let rules = NameRules::none().fixed_case("SLI").remove("MODE");
/// assert_eq!(rules.normalize("sli_mode_x"), "SLIX");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NameRules {
    /// Fragment expansions, matched case-insensitively.
    replace: BTreeMap<String, String>,
    /// Fragments dropped from the output, matched case-insensitively.
    remove: Vec<String>,
    /// Fragments emitted with exactly this spelling.
    fixed_case: Vec<String>,
}

impl NameRules {
    /// Rules for the vendor vocabulary found in driver settings headers.
    pub fn with_defaults() -> Self {
        Self::none()
            .replace("OGL", "OpenGL")
            .replace("AA", "ANTI_ALIASING")
            .fixed_case("OpenGL")
            .fixed_case("SLI")
            .fixed_case("GPU")
            .fixed_case("CUDA")
            .fixed_case("FXAA")
            .fixed_case("TXAA")
            .fixed_case("MFAA")
            .fixed_case("HDR")
            .fixed_case("DX")
            .fixed_case("VR")
            .fixed_case("API")
            .fixed_case("FPS")
            .fixed_case("3D")
            .fixed_case("PhysX")
            .fixed_case("CPL")
    }

    /// Rules that only title-case.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn replace(mut self, token: &str, expansion: &str) -> Self {
        self.replace.retain(|t, _| !t.eq_ignore_ascii_case(token));
        self.replace.insert(token.to_string(), expansion.to_string());
        self
    }

    pub fn remove(mut self, token: &str) -> Self {
        self.remove.push(token.to_string());
        self
    }

    pub fn fixed_case(mut self, token: &str) -> Self {
        self.fixed_case.push(token.to_string());
        self
    }

    /// Adds every rule of `other`; its expansions win on conflicts.
    pub fn extend(mut self, other: NameRules) -> Self {
        for (token, expansion) in &other.replace {
            self = self.replace(token, expansion);
        }
        self.remove.extend(other.remove);
        self.fixed_case.extend(other.fixed_case);
        self
    }

    /// Parses rules from TOML:
    ///
    /// ```toml
    /// remove = ["NV"]
    /// fixed_case = ["PhysX"]
    ///
    /// [replace]
    /// OGL = "OpenGL"
    /// ```
    pub fn from_toml_str(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read rules file {}", path.display()))?;
        Self::from_toml_str(&text)
            .with_context(|| format!("invalid rules file {}", path.display()))
    }

    /// Normalizes a raw token into a CamelCase name. The result may be empty
    /// or start with a digit; making it a valid symbol is up to the caller.
    pub fn normalize(&self, raw: &str) -> String {
        let mut out = String::new();
        for fragment in fragments(raw.trim()) {
            match self.expansion(fragment) {
                Some(expansion) => fragments(expansion).for_each(|piece| self.push(&mut out, piece)),
                None => self.push(&mut out, fragment),
            }
        }
        out
    }

    fn expansion(&self, fragment: &str) -> Option<&str> {
        self.replace
            .iter()
            .find(|(token, _)| token.eq_ignore_ascii_case(fragment))
            .map(|(_, expansion)| expansion.as_str())
    }

    fn push(&self, out: &mut String, piece: &str) {
        if self.remove.iter().any(|r| r.eq_ignore_ascii_case(piece)) {
            return;
        }
        if let Some(fixed) = self.fixed_case.iter().find(|f| f.eq_ignore_ascii_case(piece)) {
            out.push_str(fixed);
            return;
        }
        let mut chars = piece.chars();
        if let Some(first) = chars.next() {
            out.extend(first.to_uppercase());
            out.push_str(&chars.as_str().to_lowercase());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replacement_is_split_again() {
        let rules = NameRules::none()
            .replace("AA", "ANTI_ALIASING")
            .replace("NV", "NVIDIA");
        assert_eq!(rules.normalize("NV_MAX_AA"), "NvidiaMaxAntiAliasing");
        assert_eq!(rules.normalize("nv-max aa"), "NvidiaMaxAntiAliasing");
    }

    #[test]
    fn test_replacement_is_one_level() {
        let rules = NameRules::none().replace("A", "B_A").replace("B", "C");
        assert_eq!(rules.normalize("A"), "BA");
    }

    #[test]
    fn test_title_case() {
        let rules = NameRules::none();
        assert_eq!(rules.normalize("  VSYNCMODE_PASSIVE  "), "VsyncmodePassive");
        assert_eq!(rules.normalize("x_y"), "XY");
        assert_eq!(rules.normalize("a||b--c"), "ABC");
        assert_eq!(rules.normalize("___"), "");
        assert_eq!(rules.normalize("MODE_2X"), "Mode2x");
    }

    #[test]
    fn test_remove_applies_after_expansion() {
        let rules = NameRules::none()
            .replace("OGL", "OPENGL_LEGACY")
            .remove("legacy");
        assert_eq!(rules.normalize("OGL_THREAD"), "OpenglThread");
    }

    #[test]
    fn test_fixed_case() {
        let rules = NameRules::none().fixed_case("PhysX").fixed_case("3D");
        assert_eq!(rules.normalize("PHYSX_3d_INDICATOR"), "PhysX3DIndicator");
    }

    #[test]
    fn test_defaults() {
        let rules = NameRules::with_defaults();
        assert_eq!(rules.normalize("OGL_AA_LINE_GAMMA"), "OpenGLAntiAliasingLineGamma");
        assert_eq!(rules.normalize("SLI_GPU_COUNT"), "SLIGPUCount");
        assert_eq!(rules.normalize("FXAA_ALLOW"), "FXAAAllow");
    }

    #[test]
    fn test_from_toml() {
        let rules = NameRules::from_toml_str(
            r#"
remove = ["NV"]
fixed_case = ["PhysX"]

[replace]
ogl = "OpenGL"
"#,
        )
        .unwrap();
        assert_eq!(rules.normalize("NV_OGL_PHYSX"), "OpenglPhysX");
        assert_eq!(NameRules::from_toml_str("").unwrap(), NameRules::none());
        assert!(NameRules::from_toml_str("rename = []").is_err());
    }

    #[test]
    fn test_extend() {
        let rules = NameRules::with_defaults().extend(NameRules::none().replace("ogl", "GL"));
        assert_eq!(rules.normalize("OGL_AA"), "GlAntiAliasing");
    }
}

// Licensed under the Apache-2.0 license

//! Fixed names that tie a header to the generated catalogue.

/// Naming conventions of the settings header and of the generated layout.
///
/// # Example
///
/// ```
/// use drs_settings_generator::CatalogueConfig;
///
/// let config = CatalogueConfig::default();
/// assert_eq!(config.root_enum, "ESetting");
/// assert_eq!(config.values_enum_name("VSYNCMODE"), "EValues_VSYNCMODE");
///
/// let config = CatalogueConfig::default()
///     .with_master_unit("SettingId")
///     .with_values_dir("values");
/// assert_eq!(config.master_unit, "SettingId");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CatalogueConfig {
    /// Header file looked up in the input directory.
    pub header_file: String,
    /// Root-level enumeration listing every setting id.
    pub root_enum: String,
    /// Suffix marking a setting id in the root enumeration.
    pub id_suffix: String,
    /// Suffix of the define holding a setting's description.
    pub description_suffix: String,
    /// Prefix of the enumeration listing a setting's values.
    pub values_enum_prefix: String,
    /// Suffix of count sentinels, which are never values.
    pub count_suffix: String,
    /// Unit mapping every setting to its id.
    pub master_unit: String,
    /// Directory, relative to the output directory, holding one unit per
    /// setting. It is cleared on every run.
    pub values_dir: String,
}

impl Default for CatalogueConfig {
    fn default() -> Self {
        Self {
            header_file: "NvApiDriverSettings.h".to_string(),
            root_enum: "ESetting".to_string(),
            id_suffix: "_ID".to_string(),
            description_suffix: "_STRING".to_string(),
            values_enum_prefix: "EValues_".to_string(),
            count_suffix: "_NUM_VALUES".to_string(),
            master_unit: "KnownSettingId".to_string(),
            values_dir: "setting_values".to_string(),
        }
    }
}

impl CatalogueConfig {
    pub fn with_header_file(mut self, name: &str) -> Self {
        self.header_file = name.to_string();
        self
    }

    pub fn with_root_enum(mut self, name: &str) -> Self {
        self.root_enum = name.to_string();
        self
    }

    pub fn with_master_unit(mut self, name: &str) -> Self {
        self.master_unit = name.to_string();
        self
    }

    pub fn with_values_dir(mut self, dir: &str) -> Self {
        self.values_dir = dir.to_string();
        self
    }

    /// Strips the id suffix, returning the setting's base name.
    pub fn base_name<'a>(&self, id_name: &'a str) -> Option<&'a str> {
        id_name
            .strip_suffix(self.id_suffix.as_str())
            .filter(|base| !base.is_empty())
    }

    pub fn description_name(&self, base: &str) -> String {
        format!("{base}{}", self.description_suffix)
    }

    pub fn values_enum_name(&self, base: &str) -> String {
        format!("{}{base}", self.values_enum_prefix)
    }

    pub fn is_count_sentinel(&self, name: &str) -> bool {
        name.ends_with(self.count_suffix.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names() {
        let config = CatalogueConfig::default();
        assert_eq!(config.base_name("VSYNCMODE_ID"), Some("VSYNCMODE"));
        assert_eq!(config.base_name("_ID"), None);
        assert_eq!(config.base_name("VSYNCMODE"), None);
        assert_eq!(config.description_name("VSYNCMODE"), "VSYNCMODE_STRING");
        assert!(config.is_count_sentinel("VSYNCMODE_NUM_VALUES"));
        assert!(!config.is_count_sentinel("VSYNCMODE_PASSIVE"));
    }

    #[test]
    fn test_builder() {
        let config = CatalogueConfig::default()
            .with_header_file("Settings.h")
            .with_root_enum("ESettingId");
        assert_eq!(config.header_file, "Settings.h");
        assert_eq!(config.root_enum, "ESettingId");
        assert_eq!(config.id_suffix, "_ID");
    }
}

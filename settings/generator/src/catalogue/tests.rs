// Licensed under the Apache-2.0 license

//! Tests for settings extraction and rendering.

mod test {
    use super::super::{strip_base_prefix, Catalogue, CatalogueError, ValueSource};
    use crate::{CatalogueConfig, GeneratorOptions, NameRules};
    use drs_settings_header::{parse, Value};

    const HEADER: &str = r#"
#define OGL_AA_LINE_GAMMA_STRING        L"Antialiasing - Line gamma"
#define VSYNCMODE_STRING                L"Vertical Sync"
#define CUSTOM_SETTING_STRING           L"Custom"
#define NUMERIC_STRING                  42

#define CUSTOM_SETTING_LOW              1
#define CUSTOM_SETTING_HIGH             L"High"
#define CUSTOM_SETTING_NUM_VALUES       2

enum EValues_OGL_AA_LINE_GAMMA {
    OGL_AA_LINE_GAMMA_DISABLED          = 0x10,
    OGL_AA_LINE_GAMMA_ENABLED           = 0x23,
    OGL_AA_LINE_GAMMA_NUM_VALUES        = 2,
    OGL_AA_LINE_GAMMA_DEFAULT           = OGL_AA_LINE_GAMMA_DISABLED
};

enum EValues_VSYNCMODE {
    VSYNCMODE_NUM_VALUES = 0,
};

typedef enum _ESetting {
    OGL_AA_LINE_GAMMA_ID                = 0x2089BF6C,
    VSYNCMODE_ID                        = 0x00A879CF,
    CUSTOM_SETTING_ID                   = 0x10,
    NUMERIC_ID                          = 0x10,
    TOTAL_SETTINGS                      = 4,
} ESetting;
"#;

    fn catalogue() -> Catalogue {
        let doc = parse(HEADER).unwrap();
        Catalogue::extract(&doc, &CatalogueConfig::default()).unwrap()
    }

    #[test]
    fn test_extract_settings() {
        let catalogue = catalogue();
        let names: Vec<_> = catalogue
            .settings
            .iter()
            .map(|s| s.base_name.as_str())
            .collect();
        assert_eq!(names, ["OGL_AA_LINE_GAMMA", "VSYNCMODE", "CUSTOM_SETTING", "NUMERIC"]);

        let gamma = &catalogue.settings[0];
        assert_eq!(gamma.id, Some(Value::UnsignedInt(0x2089_BF6C)));
        assert_eq!(gamma.description.as_deref(), Some("Antialiasing - Line gamma"));
        assert_eq!(gamma.source, ValueSource::Closed);
        assert_eq!(
            gamma.values,
            [
                ("DISABLED".to_string(), Value::UnsignedInt(0x10)),
                ("ENABLED".to_string(), Value::UnsignedInt(0x23)),
                ("DEFAULT".to_string(), Value::UnsignedInt(0x10)),
            ]
        );
    }

    #[test]
    fn test_sentinel_only_enum_falls_back_to_defines() {
        let vsync = &catalogue().settings[1];
        assert_eq!(vsync.description.as_deref(), Some("Vertical Sync"));
        assert_eq!(vsync.source, ValueSource::Custom);
        assert!(vsync.values.is_empty());
    }

    #[test]
    fn test_custom_values() {
        let custom = &catalogue().settings[2];
        assert_eq!(custom.source, ValueSource::Custom);
        assert_eq!(
            custom.values,
            [
                ("LOW".to_string(), Value::SignedInt(1)),
                ("HIGH".to_string(), Value::Text("High".into())),
            ]
        );
    }

    #[test]
    fn test_non_text_description() {
        let numeric = &catalogue().settings[3];
        assert_eq!(numeric.description.as_deref(), Some("42"));
    }

    #[test]
    fn test_root_enum_errors() {
        let config = CatalogueConfig::default();
        let doc = parse("#define X_ID 1\nenum Other { A };").unwrap();
        assert_eq!(
            Catalogue::extract(&doc, &config),
            Err(CatalogueError::MissingRootEnum("ESetting".into()))
        );

        let doc = parse("enum esetting { };").unwrap();
        assert_eq!(
            Catalogue::extract(&doc, &config),
            Err(CatalogueError::EmptyRootEnum("ESetting".into()))
        );
    }

    #[test]
    fn test_strip_base_prefix() {
        assert_eq!(strip_base_prefix("VSYNCMODE_PASSIVE", "VSYNCMODE"), "PASSIVE");
        assert_eq!(strip_base_prefix("vsyncmode_passive", "VSYNCMODE"), "passive");
        assert_eq!(strip_base_prefix("VSYNCMODE_", "VSYNCMODE"), "VSYNCMODE_");
        assert_eq!(strip_base_prefix("VSYNCMODEX", "VSYNCMODE"), "VSYNCMODEX");
        assert_eq!(strip_base_prefix("OTHER", "VSYNCMODE"), "OTHER");
    }

    #[test]
    fn test_render() {
        let options = GeneratorOptions {
            rules: NameRules::with_defaults(),
            ..Default::default()
        };
        let rendered = catalogue().render(&options).unwrap();

        assert_eq!(rendered.master.file_name, "known_setting_id.rs");
        let master = &rendered.master.code;
        assert!(master.contains("pub enum KnownSettingId {"));
        assert!(master.contains("OpenGLAntiAliasingLineGamma = 0x2089_bf6c,"));
        assert!(master.contains("/// Vertical Sync"));
        assert!(master.contains("Vsyncmode = 0xa8_79cf,"));
        // Same id as CUSTOM_SETTING_ID: an alias, not a second variant.
        assert!(master.contains("CustomSetting = 0x10,"));
        assert!(master.contains("pub const Numeric: Self = Self::CustomSetting;"));
        assert!(master.contains("Self::Vsyncmode => Some(\"Vertical Sync\"),"));

        let files: Vec<_> = rendered.values.iter().map(|u| u.file_name.as_str()).collect();
        assert_eq!(files, ["open_glanti_aliasing_line_gamma.rs", "custom_setting.rs"]);

        let gamma = &rendered.values[0].code;
        assert!(gamma.contains("pub enum OpenGLAntiAliasingLineGamma {"));
        assert!(gamma.contains("Disabled = 0x10,"));
        assert!(gamma.contains("Enabled = 0x23,"));
        assert!(gamma.contains("pub const Default: Self = Self::Disabled;"));

        let custom = &rendered.values[1].code;
        assert!(custom.contains("pub struct CustomSetting;"));
        assert!(custom.contains("pub const Low: &'static str = \"1\";"));
        assert!(custom.contains("pub const High: &'static str = \"High\";"));
    }
}

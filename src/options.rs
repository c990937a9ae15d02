//! Generation options and the member/variable names the templates use.
use std::path::Path;
use serde::{Deserialize, Serialize};

use crate::error::GenError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GenerationOptions {
    /// `return new User(...)` instead of `return User(...)`.
    pub use_new_keyword: bool,
    /// Thread an optional `keyMapper` through `toMap`/`fromMap`.
    pub add_key_mapper: bool,
    /// Cast every top-level scalar read explicitly (`map['age'] as int`).
    pub no_implicit_casts: bool,
}

/// Fixed method and variable names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MemberNames {
    pub to_map: String,
    pub from_map: String,
    pub apply: String,
    pub to_string: String,
    pub map_variable: String,
    pub key_mapper: String,
    pub key_variable: String,
}

impl Default for MemberNames {
    fn default() -> Self {
        Self {
            to_map: "toMap".into(),
            from_map: "fromMap".into(),
            apply: "apply".into(),
            to_string: "toString".into(),
            map_variable: "map".into(),
            key_mapper: "keyMapper".into(),
            key_variable: "key".into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GeneratorConfig {
    pub options: GenerationOptions,
    pub names: MemberNames,
}

impl GeneratorConfig {
    pub fn new(options: GenerationOptions) -> Self {
        Self { options, names: MemberNames::default() }
    }

    pub fn from_json_str(src: &str) -> Result<Self, GenError> {
        crate::path_de::from_str_with_path(src, "<config>")
    }

    pub fn load(path: &Path) -> Result<Self, GenError> {
        let origin = path.display().to_string();
        let src = std::fs::read_to_string(path).map_err(|error| GenError::Document {
            path: origin.clone(),
            message: error.to_string(),
        })?;
        crate::path_de::from_str_with_path(&src, &origin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_keeps_defaults() {
        let cfg = GeneratorConfig::from_json_str(r#"{ "options": { "addKeyMapper": true } }"#).unwrap();
        assert!(cfg.options.add_key_mapper);
        assert!(!cfg.options.no_implicit_casts);
        assert_eq!(cfg.names, MemberNames::default());
    }

    #[test]
    fn renamed_members_are_read() {
        let cfg = GeneratorConfig::from_json_str(r#"{ "names": { "toMap": "toJson", "fromMap": "fromJson" } }"#).unwrap();
        assert_eq!(cfg.names.to_map, "toJson");
        assert_eq!(cfg.names.from_map, "fromJson");
        assert_eq!(cfg.names.map_variable, "map");
    }

    #[test]
    fn type_errors_report_json_path() {
        let err = GeneratorConfig::from_json_str(r#"{ "options": { "useNewKeyword": "yes" } }"#).unwrap_err();
        assert!(err.to_string().contains("options.useNewKeyword"), "{err}");
    }
}

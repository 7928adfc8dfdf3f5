//! Conversion configuration loaded from TOML.
//!
//! ```toml
//! [layout]
//! builtin = "g1_23_to_29"      # or explicit `name`, `source`, `target`
//!
//! [fields]
//! root_pos = "root_trans_offset"
//! root_rot = "root_rot"
//! dof = "dof"
//! fps = "fps"
//!
//! [output]
//! default_fps = 30.0
//! precision = 8
//! ```
//!
//! Every table is optional; a missing file section falls back to the defaults above.

use crate::core::error::JointmapError;
use crate::core::layout::JointLayout;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Names of built-in layouts accepted by `[layout] builtin = ...`.
pub const BUILTIN_LAYOUTS: &[&str] = &["g1_23_to_29"];

pub fn builtin_layout(name: &str) -> Option<JointLayout> {
    match name {
        "g1_23_to_29" => Some(JointLayout::g1_23_to_29()),
        _ => None,
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct LayoutSection {
    pub builtin: Option<String>,
    pub name: Option<String>,
    pub source: Option<Vec<String>>,
    pub target: Option<Vec<String>>,
}

/// Record field names inside a motion archive.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct FieldNames {
    pub root_pos: String,
    pub root_rot: String,
    pub dof: String,
    pub fps: String,
}

impl Default for FieldNames {
    fn default() -> Self {
        Self {
            root_pos: "root_trans_offset".to_string(),
            root_rot: "root_rot".to_string(),
            dof: "dof".to_string(),
            fps: "fps".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct OutputSection {
    /// Frame rate assumed when a record carries none.
    pub default_fps: f64,
    /// Fixed decimal places per value.
    pub precision: usize,
}

impl Default for OutputSection {
    fn default() -> Self {
        Self {
            default_fps: 30.0,
            precision: 8,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
struct RawConfig {
    layout: LayoutSection,
    fields: FieldNames,
    output: OutputSection,
}

/// Resolved configuration for one conversion run.
#[derive(Debug, Clone)]
pub struct ConvertConfig {
    pub layout: JointLayout,
    pub fields: FieldNames,
    pub output: OutputSection,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            layout: JointLayout::g1_23_to_29(),
            fields: FieldNames::default(),
            output: OutputSection::default(),
        }
    }
}

impl ConvertConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, JointmapError> {
        let raw: RawConfig =
            toml::from_str(content).map_err(|e| JointmapError::ConfigError(e.to_string()))?;
        let layout = resolve_layout(raw.layout)?;
        layout.validate()?;
        if raw.output.precision > 17 {
            return Err(JointmapError::ConfigError(format!(
                "output.precision {} exceeds 17 decimal places",
                raw.output.precision
            )));
        }
        Ok(Self {
            layout,
            fields: raw.fields,
            output: raw.output,
        })
    }

    pub fn load(path: &Path) -> Result<Self, JointmapError> {
        let content = fs::read_to_string(path).map_err(JointmapError::IoError)?;
        Self::from_toml_str(&content).map_err(|e| match e {
            JointmapError::ConfigError(msg) => {
                JointmapError::ConfigError(format!("{}: {}", path.display(), msg))
            }
            other => other,
        })
    }

    /// Load from `path` when given, otherwise the built-in defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, JointmapError> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }
}

fn resolve_layout(section: LayoutSection) -> Result<JointLayout, JointmapError> {
    match (section.builtin, section.source, section.target) {
        (Some(_), Some(_), _) | (Some(_), _, Some(_)) => Err(JointmapError::ConfigError(
            "layout: `builtin` cannot be combined with explicit `source`/`target`".into(),
        )),
        (Some(builtin), None, None) => builtin_layout(&builtin).ok_or_else(|| {
            JointmapError::ConfigError(format!(
                "unknown builtin layout '{}' (available: {})",
                builtin,
                BUILTIN_LAYOUTS.join(", ")
            ))
        }),
        (None, Some(source), Some(target)) => Ok(JointLayout {
            name: section.name.unwrap_or_else(|| "custom".to_string()),
            source,
            target,
        }),
        (None, None, None) => Ok(JointLayout::g1_23_to_29()),
        (None, _, _) => Err(JointmapError::ConfigError(
            "layout: `source` and `target` must be given together".into(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let cfg = ConvertConfig::from_toml_str("").unwrap();
        assert_eq!(cfg.layout, JointLayout::g1_23_to_29());
        assert_eq!(cfg.fields, FieldNames::default());
        assert_eq!(cfg.output.precision, 8);
        assert_eq!(cfg.output.default_fps, 30.0);
    }

    #[test]
    fn test_explicit_layout_and_fields() {
        let cfg = ConvertConfig::from_toml_str(
            r#"
[layout]
name = "toy"
source = ["a", "b", "c"]
target = ["a", "x", "b", "c", "y"]

[fields]
dof = "joints"

[output]
default_fps = 50.0
"#,
        )
        .unwrap();
        assert_eq!(cfg.layout.name, "toy");
        assert_eq!(cfg.layout.index_map().entries(), &[0, -1, 1, 2, -1]);
        assert_eq!(cfg.fields.dof, "joints");
        assert_eq!(cfg.fields.root_rot, "root_rot");
        assert_eq!(cfg.output.default_fps, 50.0);
    }

    #[test]
    fn test_builtin_layout_by_name() {
        let cfg = ConvertConfig::from_toml_str("[layout]\nbuiltin = \"g1_23_to_29\"\n").unwrap();
        assert_eq!(cfg.layout.target.len(), 29);
        assert!(ConvertConfig::from_toml_str("[layout]\nbuiltin = \"h1\"\n").is_err());
    }

    #[test]
    fn test_half_layout_is_rejected() {
        let err = ConvertConfig::from_toml_str("[layout]\nsource = [\"a\"]\n").unwrap_err();
        assert!(matches!(err, JointmapError::ConfigError(_)));
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let err = ConvertConfig::from_toml_str(
            "[layout]\nsource = [\"a\"]\ntarget = [\"a\", \"a\"]\n",
        )
        .unwrap_err();
        assert!(err.to_string().contains("duplicate target joint 'a'"));
    }
}

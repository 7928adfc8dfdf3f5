//! Motion archives: insertion-ordered collections of named motion records.
//!
//! On disk an archive is a JSON object keyed by record identifier. Each record
//! holds per-frame arrays for root position `(T, 3)`, root orientation `(T, 4)`
//! and joint angles `(T, N)`, plus an optional frame rate. Field names come
//! from [`FieldNames`] so datasets with other conventions can be read as-is.

use crate::core::config::FieldNames;
use crate::core::error::JointmapError;
use crate::core::matrix::Matrix;
use serde_json::{Map, Value as JsonValue};
use std::fs;
use std::path::Path;

/// A fully parsed motion record.
#[derive(Debug, Clone, PartialEq)]
pub struct MotionRecord {
    pub root_pos: Matrix<f64>,
    /// Quaternion per frame, stored in the component order of the dataset.
    pub root_rot: Matrix<f64>,
    pub dof: Matrix<f64>,
    pub fps: Option<f64>,
}

impl MotionRecord {
    pub fn frames(&self) -> usize {
        self.dof.rows()
    }
}

/// Per-record summary used by list mode.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct RecordSummary {
    pub key: String,
    pub frames: usize,
    pub fps: Option<f64>,
}

#[derive(Debug, Clone)]
pub struct MotionArchive {
    records: Map<String, JsonValue>,
}

impl MotionArchive {
    pub fn from_json_str(content: &str) -> Result<Self, JointmapError> {
        let value: JsonValue = serde_json::from_str(content)?;
        match value {
            JsonValue::Object(records) => Ok(Self { records }),
            _ => Err(JointmapError::ValidationError(
                "motion archive must be a JSON object keyed by record id".into(),
            )),
        }
    }

    pub fn load(path: &Path) -> Result<Self, JointmapError> {
        let content = fs::read_to_string(path).map_err(JointmapError::IoError)?;
        let archive = Self::from_json_str(&content)?;
        tracing::debug!(
            path = %path.display(),
            records = archive.len(),
            "loaded motion archive"
        );
        Ok(archive)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Record identifiers in file order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.records.keys().map(String::as_str)
    }

    pub fn first_key(&self) -> Option<&str> {
        self.keys().next()
    }

    fn raw(&self, key: &str) -> Result<&Map<String, JsonValue>, JointmapError> {
        let value = self
            .records
            .get(key)
            .ok_or_else(|| JointmapError::NotFound(format!("motion key '{}'", key)))?;
        value.as_object().ok_or_else(|| {
            JointmapError::ValidationError(format!("motion '{}' is not an object", key))
        })
    }

    /// Frame count and frame rate of every record, without parsing root arrays.
    pub fn summaries(&self, fields: &FieldNames) -> Result<Vec<RecordSummary>, JointmapError> {
        self.keys()
            .map(|key| {
                let raw = self.raw(key)?;
                let dof = required(raw, key, &fields.dof)?;
                let frames = dof.as_array().map(Vec::len).ok_or_else(|| {
                    JointmapError::ShapeError(format!(
                        "motion '{}' field '{}' is not an array",
                        key, fields.dof
                    ))
                })?;
                Ok(RecordSummary {
                    key: key.to_string(),
                    frames,
                    fps: fps_of(raw, key, &fields.fps)?,
                })
            })
            .collect()
    }

    /// Parse one record. An empty joint array comes back as `0 x 0`.
    pub fn record(&self, key: &str, fields: &FieldNames) -> Result<MotionRecord, JointmapError> {
        let raw = self.raw(key)?;
        let root_pos = Matrix::from_json(
            required(raw, key, &fields.root_pos)?,
            &fields.root_pos,
            Some(3),
        )?;
        let root_rot = Matrix::from_json(
            required(raw, key, &fields.root_rot)?,
            &fields.root_rot,
            Some(4),
        )?;
        let dof = Matrix::from_json(required(raw, key, &fields.dof)?, &fields.dof, None)?;
        Ok(MotionRecord {
            root_pos,
            root_rot,
            dof,
            fps: fps_of(raw, key, &fields.fps)?,
        })
    }
}

fn required<'a>(
    raw: &'a Map<String, JsonValue>,
    key: &str,
    field: &str,
) -> Result<&'a JsonValue, JointmapError> {
    raw.get(field)
        .ok_or_else(|| JointmapError::NotFound(format!("field '{}' in motion '{}'", field, key)))
}

/// `None` only when the field is absent; a present non-numeric rate is an error.
fn fps_of(
    raw: &Map<String, JsonValue>,
    key: &str,
    field: &str,
) -> Result<Option<f64>, JointmapError> {
    match raw.get(field) {
        None => Ok(None),
        Some(value) => value.as_f64().map(Some).ok_or_else(|| {
            JointmapError::ValidationError(format!(
                "motion '{}' field '{}' is not a number: {}",
                key, field, value
            ))
        }),
    }
}

/// Render a frame rate the way list mode prints it.
pub fn fps_label(fps: Option<f64>) -> String {
    match fps {
        Some(v) => format_number(v),
        None => "?".to_string(),
    }
}

/// Integral rates print without a fractional part (`30`, not `30.0`).
pub fn format_number(v: f64) -> String {
    format!("{}", v)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ARCHIVE: &str = r#"{
        "walk": {
            "root_trans_offset": [[0.0, 0.0, 0.8], [0.1, 0.0, 0.8]],
            "root_rot": [[0.0, 0.0, 0.0, 1.0], [0.0, 0.0, 0.0, 1.0]],
            "dof": [[1.0, 2.0], [3.0, 4.0]],
            "fps": 30
        },
        "alpha": {
            "root_trans_offset": [],
            "root_rot": [],
            "dof": []
        }
    }"#;

    #[test]
    fn test_keys_keep_file_order() {
        let archive = MotionArchive::from_json_str(ARCHIVE).unwrap();
        assert_eq!(archive.keys().collect::<Vec<_>>(), vec!["walk", "alpha"]);
        assert_eq!(archive.first_key(), Some("walk"));
    }

    #[test]
    fn test_summaries() {
        let archive = MotionArchive::from_json_str(ARCHIVE).unwrap();
        let summaries = archive.summaries(&FieldNames::default()).unwrap();
        assert_eq!(summaries[0].frames, 2);
        assert_eq!(summaries[0].fps, Some(30.0));
        assert_eq!(summaries[1].frames, 0);
        assert_eq!(summaries[1].fps, None);
    }

    #[test]
    fn test_record_parses_shapes() {
        let archive = MotionArchive::from_json_str(ARCHIVE).unwrap();
        let rec = archive.record("walk", &FieldNames::default()).unwrap();
        assert_eq!(rec.root_pos.shape(), (2, 3));
        assert_eq!(rec.root_rot.shape(), (2, 4));
        assert_eq!(rec.dof.shape(), (2, 2));
        assert_eq!(rec.frames(), 2);

        let empty = archive.record("alpha", &FieldNames::default()).unwrap();
        assert_eq!(empty.dof.shape(), (0, 0));
        assert_eq!(empty.root_rot.shape(), (0, 4));
    }

    #[test]
    fn test_unknown_key_is_not_found() {
        let archive = MotionArchive::from_json_str(ARCHIVE).unwrap();
        let err = archive.record("run", &FieldNames::default()).unwrap_err();
        assert!(matches!(err, JointmapError::NotFound(_)));
    }

    #[test]
    fn test_missing_field_is_not_found() {
        let archive = MotionArchive::from_json_str(r#"{"m": {"dof": [[1.0]]}}"#).unwrap();
        let err = archive.record("m", &FieldNames::default()).unwrap_err();
        assert!(err.to_string().contains("root_trans_offset"));
    }

    #[test]
    fn test_non_object_archive_rejected() {
        assert!(MotionArchive::from_json_str("[1, 2]").is_err());
        assert!(MotionArchive::from_json_str("{not json").is_err());
    }

    #[test]
    fn test_fps_label() {
        assert_eq!(fps_label(Some(30.0)), "30");
        assert_eq!(fps_label(Some(29.97)), "29.97");
        assert_eq!(fps_label(None), "?");
        assert_eq!(fps_label(Some(1e20)), "100000000000000000000");
    }
}

//! Joint layouts and the source → target column remap.
//!
//! A layout pairs an ordered source joint set (the columns a dataset was
//! recorded with) and an ordered target joint set (the canonical columns a
//! consumer expects). The index map derived from the pair drives a pure
//! gather-or-zero-fill over columns.

use crate::core::error::JointmapError;
use crate::core::matrix::Matrix;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Marks a target joint with no source column.
pub const MISSING: i32 = -1;

/// 23-DOF ordering used by the retargeted G1 motion datasets (no wrist joints).
pub const G1_DOF23_NAMES: [&str; 23] = [
    "left_hip_pitch",
    "left_hip_roll",
    "left_hip_yaw",
    "left_knee",
    "left_ankle_pitch",
    "left_ankle_roll",
    "right_hip_pitch",
    "right_hip_roll",
    "right_hip_yaw",
    "right_knee",
    "right_ankle_pitch",
    "right_ankle_roll",
    "waist_yaw",
    "waist_roll",
    "waist_pitch",
    "left_shoulder_pitch",
    "left_shoulder_roll",
    "left_shoulder_yaw",
    "left_elbow",
    "right_shoulder_pitch",
    "right_shoulder_roll",
    "right_shoulder_yaw",
    "right_elbow",
];

/// 29-joint ordering expected by the CSV → NPZ motion converter.
pub const G1_DOF29_NAMES: [&str; 29] = [
    "left_hip_pitch",
    "left_hip_roll",
    "left_hip_yaw",
    "left_knee",
    "left_ankle_pitch",
    "left_ankle_roll",
    "right_hip_pitch",
    "right_hip_roll",
    "right_hip_yaw",
    "right_knee",
    "right_ankle_pitch",
    "right_ankle_roll",
    "waist_yaw",
    "waist_roll",
    "waist_pitch",
    "left_shoulder_pitch",
    "left_shoulder_roll",
    "left_shoulder_yaw",
    "left_elbow",
    "left_wrist_roll",
    "left_wrist_pitch",
    "left_wrist_yaw",
    "right_shoulder_pitch",
    "right_shoulder_roll",
    "right_shoulder_yaw",
    "right_elbow",
    "right_wrist_roll",
    "right_wrist_pitch",
    "right_wrist_yaw",
];

/// A named pair of ordered joint sets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JointLayout {
    #[serde(default)]
    pub name: String,
    pub source: Vec<String>,
    pub target: Vec<String>,
}

impl JointLayout {
    pub fn new(name: &str, source: &[&str], target: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            source: source.iter().map(|s| s.to_string()).collect(),
            target: target.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// The built-in G1 23 → 29 layout.
    pub fn g1_23_to_29() -> Self {
        Self::new("g1_23_to_29", &G1_DOF23_NAMES, &G1_DOF29_NAMES)
    }

    /// Reject layouts with repeated names in either joint set.
    pub fn validate(&self) -> Result<(), JointmapError> {
        for (label, names) in [("source", &self.source), ("target", &self.target)] {
            let mut seen: FxHashMap<&str, usize> = FxHashMap::default();
            for (i, name) in names.iter().enumerate() {
                if let Some(first) = seen.insert(name.as_str(), i) {
                    return Err(JointmapError::ConfigError(format!(
                        "layout '{}': duplicate {} joint '{}' at positions {} and {}",
                        self.name, label, name, first, i
                    )));
                }
            }
        }
        Ok(())
    }

    pub fn index_map(&self) -> JointIndexMap {
        JointIndexMap::build(&self.source, &self.target)
    }
}

/// For each target joint, its column in the source array or [`MISSING`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JointIndexMap {
    entries: Vec<i32>,
    source_len: usize,
}

impl JointIndexMap {
    /// Names are expected to be unique within each set; for a repeated source
    /// name the first occurrence wins.
    pub fn build<S: AsRef<str>, T: AsRef<str>>(source: &[S], target: &[T]) -> Self {
        let mut positions: FxHashMap<&str, i32> = FxHashMap::default();
        for (i, name) in source.iter().enumerate() {
            positions.entry(name.as_ref()).or_insert(i as i32);
        }
        let entries = target
            .iter()
            .map(|name| positions.get(name.as_ref()).copied().unwrap_or(MISSING))
            .collect();
        Self {
            entries,
            source_len: source.len(),
        }
    }

    pub fn entries(&self) -> &[i32] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of source joints the map was built against.
    pub fn source_len(&self) -> usize {
        self.source_len
    }

    pub fn source_index(&self, target: usize) -> Option<usize> {
        match self.entries.get(target) {
            Some(&i) if i >= 0 => Some(i as usize),
            _ => None,
        }
    }

    /// Target positions that receive zero-fill.
    pub fn missing(&self) -> impl Iterator<Item = usize> + '_ {
        self.entries
            .iter()
            .enumerate()
            .filter(|(_, i)| **i == MISSING)
            .map(|(t, _)| t)
    }

    /// Gather source columns into target order, zero-filling missing joints.
    ///
    /// Values are copied unmodified. Fails if the map references a column the
    /// source array does not have.
    pub fn remap<T: Copy + Default>(
        &self,
        source: &Matrix<T>,
    ) -> Result<Matrix<T>, JointmapError> {
        if let Some(max) = self.entries.iter().copied().max()
            && max >= 0
            && max as usize >= source.cols()
        {
            return Err(JointmapError::ShapeError(format!(
                "index map references source column {} but the joint array has {} columns",
                max,
                source.cols()
            )));
        }

        let mut out = Matrix::zeros(source.rows(), self.entries.len());
        for (t, entry) in self.entries.iter().enumerate() {
            if *entry < 0 {
                continue;
            }
            let s = *entry as usize;
            for r in 0..source.rows() {
                out.set(r, t, source.get(r, s));
            }
        }
        Ok(out)
    }
}

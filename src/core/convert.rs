//! Motion archive → CSV conversion.
//!
//! One linear pass: load archive, pick a record, build the index map,
//! remap joints, assemble the table, write it.

use crate::core::config::ConvertConfig;
use crate::core::error::JointmapError;
use crate::core::matrix::Matrix;
use crate::core::motion::{MotionArchive, RecordSummary, format_number};
use crate::core::table;
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize)]
pub struct ConversionReport {
    pub motion_key: String,
    /// True when no key was requested and the first record was used.
    pub key_defaulted: bool,
    pub layout: String,
    pub frames: usize,
    pub fps: f64,
    pub root_pos_shape: (usize, usize),
    pub root_rot_shape: (usize, usize),
    pub dof_shape: (usize, usize),
    pub output_path: PathBuf,
    pub output_shape: (usize, usize),
    pub zero_filled: Vec<String>,
    pub sha256: String,
    pub next_step: String,
}

/// Pick the record to convert: the requested key, or the first one in the archive.
pub fn select_key(
    archive: &MotionArchive,
    motion_key: Option<&str>,
) -> Result<(String, bool), JointmapError> {
    match motion_key {
        Some(k) => Ok((k.to_string(), false)),
        None => archive
            .first_key()
            .map(|k| (k.to_string(), true))
            .ok_or_else(|| JointmapError::NotFound("motion archive contains no records".into())),
    }
}

/// Convert an in-memory archive and write the table to `output`.
pub fn convert_archive(
    archive: &MotionArchive,
    output: &Path,
    motion_key: Option<&str>,
    config: &ConvertConfig,
) -> Result<ConversionReport, JointmapError> {
    let (key, key_defaulted) = select_key(archive, motion_key)?;
    let record = archive.record(&key, &config.fields)?;
    let fps = record.fps.unwrap_or(config.output.default_fps);

    let map = config.layout.index_map();
    let dof = if record.dof.shape() == (0, 0) {
        Matrix::zeros(0, map.source_len())
    } else {
        record.dof.clone()
    };
    if dof.cols() > map.source_len() {
        tracing::warn!(
            key = %key,
            columns = dof.cols(),
            expected = map.source_len(),
            "joint array is wider than the source layout; extra columns are ignored"
        );
    }

    let joints = map.remap(&dof)?;
    let csv = table::assemble(&record.root_pos, &record.root_rot, &joints)?;
    let sha256 = table::save_csv(&csv, config.output.precision, output)?;

    tracing::info!(
        key = %key,
        frames = csv.rows(),
        columns = csv.cols(),
        "converted motion"
    );

    Ok(ConversionReport {
        motion_key: key,
        key_defaulted,
        layout: config.layout.name.clone(),
        frames: csv.rows(),
        fps,
        root_pos_shape: record.root_pos.shape(),
        root_rot_shape: record.root_rot.shape(),
        dof_shape: dof.shape(),
        output_path: output.to_path_buf(),
        output_shape: csv.shape(),
        zero_filled: map.missing().map(|t| config.layout.target[t].clone()).collect(),
        sha256,
        next_step: next_step_command(output, fps),
    })
}

pub fn convert(
    input: &Path,
    output: &Path,
    motion_key: Option<&str>,
    config: &ConvertConfig,
) -> Result<ConversionReport, JointmapError> {
    let archive = MotionArchive::load(input)?;
    convert_archive(&archive, output, motion_key, config)
}

/// Enumerate records without converting anything.
pub fn list_records(
    input: &Path,
    config: &ConvertConfig,
) -> Result<Vec<RecordSummary>, JointmapError> {
    MotionArchive::load(input)?.summaries(&config.fields)
}

/// Downstream CSV → NPZ invocation for the written file.
pub fn next_step_command(output: &Path, fps: f64) -> String {
    format!(
        "uv run python -m mjlab.scripts.csv_to_npz --input-file {} --input-fps {} --output-name my_motion",
        output.display(),
        format_number(fps)
    )
}

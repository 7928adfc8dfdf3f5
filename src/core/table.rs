//! Output table assembly and CSV serialization.
//!
//! Column order is fixed: root position (3), root orientation (4), then the
//! remapped joints. Values are written with a fixed number of decimals, one
//! row per frame, no header.

use crate::core::error::JointmapError;
use crate::core::matrix::Matrix;
use sha2::{Digest, Sha256};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

pub const ROOT_POS_COLS: usize = 3;
pub const ROOT_ROT_COLS: usize = 4;

/// Concatenate `[root_pos, root_rot, joints]` column-wise.
pub fn assemble(
    root_pos: &Matrix<f64>,
    root_rot: &Matrix<f64>,
    joints: &Matrix<f64>,
) -> Result<Matrix<f64>, JointmapError> {
    if root_pos.cols() != ROOT_POS_COLS || root_rot.cols() != ROOT_ROT_COLS {
        return Err(JointmapError::ShapeError(format!(
            "root arrays must be (T, 3) and (T, 4), got {:?} and {:?}",
            root_pos.shape(),
            root_rot.shape()
        )));
    }
    Matrix::hstack(&[root_pos, root_rot, joints])
}

/// Format one value like C's `%.Nf`: `nan` for NaN, `inf`/`-inf` for infinities.
pub fn format_value(v: f64, precision: usize) -> String {
    if v.is_nan() {
        "nan".to_string()
    } else if v == f64::INFINITY {
        "inf".to_string()
    } else if v == f64::NEG_INFINITY {
        "-inf".to_string()
    } else {
        format!("{:.*}", precision, v)
    }
}

/// Write the table as comma-separated rows to any sink.
pub fn write_csv<W: Write>(
    table: &Matrix<f64>,
    precision: usize,
    mut out: W,
) -> Result<(), JointmapError> {
    for row in table.iter_rows() {
        let line = row
            .iter()
            .map(|v| format_value(*v, precision))
            .collect::<Vec<_>>()
            .join(",");
        writeln!(out, "{}", line).map_err(JointmapError::IoError)?;
    }
    out.flush().map_err(JointmapError::IoError)?;
    Ok(())
}

/// Render the table to an in-memory CSV string.
pub fn to_csv_string(table: &Matrix<f64>, precision: usize) -> Result<String, JointmapError> {
    let mut buf = Vec::new();
    write_csv(table, precision, &mut buf)?;
    String::from_utf8(buf).map_err(|e| JointmapError::ValidationError(e.to_string()))
}

/// Write the table to `path`, creating parent directories and replacing any
/// existing file. Returns the SHA-256 of the bytes written.
pub fn save_csv(
    table: &Matrix<f64>,
    precision: usize,
    path: &Path,
) -> Result<String, JointmapError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(JointmapError::IoError)?;
    }
    let csv = to_csv_string(table, precision)?;
    let file = File::create(path).map_err(JointmapError::IoError)?;
    let mut writer = BufWriter::new(file);
    writer
        .write_all(csv.as_bytes())
        .map_err(JointmapError::IoError)?;
    writer.flush().map_err(JointmapError::IoError)?;
    tracing::debug!(path = %path.display(), bytes = csv.len(), "wrote csv");
    Ok(sha256_hex(csv.as_bytes()))
}

pub fn sha256_hex(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    format!("{:x}", hasher.finalize())
}

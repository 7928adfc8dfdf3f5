//! Row-major 2-D numeric arrays.
//!
//! Motion data is always `(frames, columns)`. A matrix with zero rows still
//! carries its column count, so an empty record keeps a well-defined shape.

use crate::core::error::JointmapError;
use serde_json::Value as JsonValue;

#[derive(Debug, Clone, PartialEq)]
pub struct Matrix<T> {
    rows: usize,
    cols: usize,
    data: Vec<T>,
}

impl<T: Copy + Default> Matrix<T> {
    /// A `rows x cols` matrix filled with `T::default()` (zero for numeric types).
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![T::default(); rows * cols],
        }
    }

    /// Build from nested rows. Every row must have exactly `cols` entries.
    pub fn from_rows(rows: &[Vec<T>], cols: usize) -> Result<Self, JointmapError> {
        let mut data = Vec::with_capacity(rows.len() * cols);
        for (i, row) in rows.iter().enumerate() {
            if row.len() != cols {
                return Err(JointmapError::ShapeError(format!(
                    "row {} has {} columns, expected {}",
                    i,
                    row.len(),
                    cols
                )));
            }
            data.extend_from_slice(row);
        }
        Ok(Self {
            rows: rows.len(),
            cols,
            data,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn row(&self, r: usize) -> &[T] {
        &self.data[r * self.cols..(r + 1) * self.cols]
    }

    pub fn get(&self, r: usize, c: usize) -> T {
        self.data[r * self.cols + c]
    }

    pub fn set(&mut self, r: usize, c: usize, value: T) {
        self.data[r * self.cols + c] = value;
    }

    pub fn iter_rows(&self) -> impl Iterator<Item = &[T]> {
        (0..self.rows).map(move |r| self.row(r))
    }

    /// Concatenate along the column axis. All parts must share a row count.
    pub fn hstack(parts: &[&Matrix<T>]) -> Result<Self, JointmapError> {
        let rows = parts.first().map(|m| m.rows).unwrap_or(0);
        if let Some(bad) = parts.iter().find(|m| m.rows != rows) {
            return Err(JointmapError::ShapeError(format!(
                "cannot concatenate: {} rows vs {} rows",
                rows, bad.rows
            )));
        }
        let cols = parts.iter().map(|m| m.cols).sum();
        let mut data = Vec::with_capacity(rows * cols);
        for r in 0..rows {
            for part in parts {
                data.extend_from_slice(part.row(r));
            }
        }
        Ok(Self { rows, cols, data })
    }
}

impl Matrix<f64> {
    /// Parse a JSON array of numeric arrays.
    ///
    /// An empty outer array yields a `0 x expected_cols` matrix when a column
    /// count is known, otherwise `0 x 0`. Otherwise the first row fixes the width.
    pub fn from_json(
        value: &JsonValue,
        field: &str,
        expected_cols: Option<usize>,
    ) -> Result<Self, JointmapError> {
        let outer = value.as_array().ok_or_else(|| {
            JointmapError::ShapeError(format!("field '{}' is not an array of rows", field))
        })?;

        let mut rows = Vec::with_capacity(outer.len());
        for (i, row) in outer.iter().enumerate() {
            let cells = row.as_array().ok_or_else(|| {
                JointmapError::ShapeError(format!("field '{}' row {} is not an array", field, i))
            })?;
            let parsed = cells
                .iter()
                .enumerate()
                .map(|(j, cell)| {
                    cell.as_f64().ok_or_else(|| {
                        JointmapError::ShapeError(format!(
                            "field '{}' [{}][{}] is not a number",
                            field, i, j
                        ))
                    })
                })
                .collect::<Result<Vec<f64>, _>>()?;
            rows.push(parsed);
        }

        let cols = rows
            .first()
            .map(Vec::len)
            .or(expected_cols)
            .unwrap_or(0);
        if let Some(expected) = expected_cols
            && cols != expected
        {
            return Err(JointmapError::ShapeError(format!(
                "field '{}' has {} columns, expected {}",
                field, cols, expected
            )));
        }
        Self::from_rows(&rows, cols).map_err(|e| match e {
            JointmapError::ShapeError(msg) => {
                JointmapError::ShapeError(format!("field '{}': {}", field, msg))
            }
            other => other,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zeros_shape() {
        let m: Matrix<f64> = Matrix::zeros(2, 3);
        assert_eq!(m.shape(), (2, 3));
        assert!(m.iter_rows().all(|r| r.iter().all(|v| *v == 0.0)));
    }

    #[test]
    fn test_from_rows_rejects_ragged() {
        let err = Matrix::from_rows(&[vec![1.0, 2.0], vec![3.0]], 2).unwrap_err();
        assert!(matches!(err, JointmapError::ShapeError(_)));
    }

    #[test]
    fn test_hstack_orders_columns() {
        let a = Matrix::from_rows(&[vec![1, 2], vec![3, 4]], 2).unwrap();
        let b = Matrix::from_rows(&[vec![9], vec![8]], 1).unwrap();
        let m = Matrix::hstack(&[&a, &b]).unwrap();
        assert_eq!(m.row(0), &[1, 2, 9]);
        assert_eq!(m.row(1), &[3, 4, 8]);
    }

    #[test]
    fn test_hstack_rejects_row_mismatch() {
        let a: Matrix<i32> = Matrix::zeros(2, 1);
        let b: Matrix<i32> = Matrix::zeros(3, 1);
        assert!(Matrix::hstack(&[&a, &b]).is_err());
    }

    #[test]
    fn test_hstack_empty_rows_keeps_width() {
        let a: Matrix<f64> = Matrix::zeros(0, 3);
        let b: Matrix<f64> = Matrix::zeros(0, 4);
        let m = Matrix::hstack(&[&a, &b]).unwrap();
        assert_eq!(m.shape(), (0, 7));
    }

    #[test]
    fn test_from_json_width_checks() {
        let v = serde_json::json!([[1.0, 2.0, 3.0]]);
        assert!(Matrix::from_json(&v, "root_pos", Some(3)).is_ok());
        assert!(Matrix::from_json(&v, "root_rot", Some(4)).is_err());

        let empty = serde_json::json!([]);
        let m = Matrix::from_json(&empty, "dof", Some(23)).unwrap();
        assert_eq!(m.shape(), (0, 23));
    }

    #[test]
    fn test_from_json_rejects_non_numeric() {
        let v = serde_json::json!([[1.0, "x"]]);
        let err = Matrix::from_json(&v, "dof", None).unwrap_err();
        assert!(err.to_string().contains("dof"));
    }
}

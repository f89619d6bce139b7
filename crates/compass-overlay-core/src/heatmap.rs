use serde::{Deserialize, Serialize};

use crate::grid::{CellIndex, Direction};
use crate::transform::GRID_DIM;

/// Dataset validation errors raised at the input boundary.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum DatasetError {
    #[error("expected {expected} rows, got {got}")]
    RowCount { expected: usize, got: usize },
    #[error("row {row}: expected {expected} columns, got {got}")]
    ColumnCount {
        row: usize,
        expected: usize,
        got: usize,
    },
    #[error("value at ({row}, {col}) is not finite")]
    NonFinite { row: usize, col: usize },
    #[error("value at ({row}, {col}) is negative: {value}")]
    Negative { row: usize, col: usize, value: f64 },
    #[error("unknown direction label {label:?}")]
    UnknownDirection { label: String },
}

/// Immutable `N×N` intensity matrix in canonical orientation.
///
/// Row 0 is the canonical top (north). Values are finite and non-negative.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<f64>>", into = "Vec<Vec<f64>>")]
pub struct HeatmapDataset {
    values: [[f64; GRID_DIM]; GRID_DIM],
}

impl HeatmapDataset {
    pub fn from_matrix(values: [[f64; GRID_DIM]; GRID_DIM]) -> Result<Self, DatasetError> {
        for (row, r) in values.iter().enumerate() {
            for (col, &value) in r.iter().enumerate() {
                if !value.is_finite() {
                    return Err(DatasetError::NonFinite { row, col });
                }
                if value < 0.0 {
                    return Err(DatasetError::Negative { row, col, value });
                }
            }
        }
        Ok(Self { values })
    }

    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self, DatasetError> {
        if rows.len() != GRID_DIM {
            return Err(DatasetError::RowCount {
                expected: GRID_DIM,
                got: rows.len(),
            });
        }
        let mut values = [[0.0; GRID_DIM]; GRID_DIM];
        for (row, r) in rows.iter().enumerate() {
            if r.len() != GRID_DIM {
                return Err(DatasetError::ColumnCount {
                    row,
                    expected: GRID_DIM,
                    got: r.len(),
                });
            }
            values[row].copy_from_slice(r);
        }
        Self::from_matrix(values)
    }

    /// Build the canonical matrix from direction-labelled values.
    ///
    /// Directions that do not appear stay at zero; a repeated direction keeps
    /// its last value.
    pub fn from_directions<I>(entries: I) -> Result<Self, DatasetError>
    where
        I: IntoIterator<Item = (Direction, f64)>,
    {
        let mut values = [[0.0; GRID_DIM]; GRID_DIM];
        for (dir, value) in entries {
            let c = dir.cell();
            values[c.row][c.col] = value;
        }
        Self::from_matrix(values)
    }

    /// Like [`Self::from_directions`], with labels parsed by
    /// [`Direction::from_label`] (`"N"`, `"se"`, `"Center"`, ...).
    pub fn from_labels<I, S>(entries: I) -> Result<Self, DatasetError>
    where
        I: IntoIterator<Item = (S, f64)>,
        S: AsRef<str>,
    {
        let parsed = entries
            .into_iter()
            .map(|(label, value)| {
                let label = label.as_ref();
                Direction::from_label(label)
                    .map(|dir| (dir, value))
                    .ok_or_else(|| DatasetError::UnknownDirection {
                        label: label.to_owned(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_directions(parsed)
    }

    #[inline]
    pub fn get(&self, cell: CellIndex) -> f64 {
        self.values[cell.row][cell.col]
    }
}

impl TryFrom<Vec<Vec<f64>>> for HeatmapDataset {
    type Error = DatasetError;

    fn try_from(rows: Vec<Vec<f64>>) -> Result<Self, Self::Error> {
        Self::from_rows(&rows)
    }
}

impl From<HeatmapDataset> for Vec<Vec<f64>> {
    fn from(d: HeatmapDataset) -> Self {
        d.values.iter().map(|r| r.to_vec()).collect()
    }
}

//! WMS gridded dataset records.
//!
//! A dataset file is one header followed by a sequence of time steps. Each
//! time step is a flattened row-major array of one value per grid cell,
//! optionally preceded by an equal-sized status array. The grid's column
//! count is not in the file; it is supplied externally (from the mask
//! raster) and used to reshape the flat array.

/// A parsed WMS dataset file.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct WmsDataset {
    pub kind: DatasetKind,
    pub object_id: Option<i64>,
    pub number_data: i64,
    pub number_cells: i64,
    pub name: String,
    pub time_steps: Vec<TimeStep>,
}

/// Scalar vs vector discriminant, with the matching type card.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum DatasetKind {
    /// `BEGSCL` dataset; carries the `OBJTYPE` value.
    Scalar { object_type: String },
    /// `BEGVEC` dataset; carries the `VECTYPE` value.
    Vector { vector_type: String },
}

/// One `TS` block: status flag, timestamp, optional status array and the
/// cell values reshaped into rows of the externally supplied column count.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TimeStep {
    pub i_status: i64,
    pub timestamp: f64,
    /// Per-cell status values; empty when `i_status` is 0.
    pub status: Vec<i64>,
    /// Row-major grid of cell values.
    pub values: Vec<Vec<f64>>,
}

impl TimeStep {
    /// Total number of cell values across all rows.
    pub fn cell_count(&self) -> usize {
        self.values.iter().map(Vec::len).sum()
    }
}

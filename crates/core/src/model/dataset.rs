use serde::{Deserialize, Serialize};

use crate::model::row::{InvalidRowError, TableRow};
use crate::model::unit::ValueUnit;

/// Maxima across an unfiltered dataset, used to scale proportional bars.
///
/// Zero on an empty dataset: no proportional scaling is possible, so callers
/// render zero-width bars instead of dividing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Maxima {
    pub max_self: f64,
    pub max_total: f64,
}

/// A row dropped by [`TableDataset::sanitize`], with its position in the
/// incoming payload.
#[derive(Debug)]
pub struct RejectedRow {
    pub index: usize,
    pub error: InvalidRowError,
}

/// One full dataset snapshot. Replaced wholesale on every dataset change,
/// never patched incrementally.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableDataset {
    pub unit: ValueUnit,
    pub rows: Vec<TableRow>,
}

impl TableDataset {
    /// Wrap rows that are already known to satisfy the cost invariants.
    pub fn new(unit: ValueUnit, rows: Vec<TableRow>) -> Self {
        Self { unit, rows }
    }

    /// Validate rows, dropping malformed ones.
    ///
    /// A bad row is reported in the rejects and the rest of the dataset ranks
    /// normally; a single malformed row never aborts the snapshot.
    pub fn sanitize(unit: ValueUnit, rows: Vec<TableRow>) -> (Self, Vec<RejectedRow>) {
        let mut kept = Vec::with_capacity(rows.len());
        let mut rejected = Vec::new();
        for (index, row) in rows.into_iter().enumerate() {
            match row.validate() {
                Ok(()) => kept.push(row),
                Err(error) => rejected.push(RejectedRow { index, error }),
            }
        }
        (Self::new(unit, kept), rejected)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Maxima over the unfiltered rows. Bar scale stays stable under search
    /// because filtered views never recompute this.
    pub fn maxima(&self) -> Maxima {
        Maxima {
            max_self: self.rows.iter().map(|r| r.self_value).fold(0.0, f64::max),
            max_total: self.rows.iter().map(|r| r.total).fold(0.0, f64::max),
        }
    }
}

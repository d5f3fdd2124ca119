use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::color::Swatch;

/// Stable row identifier. Backends send either numbers or strings; both are
/// accepted and compared verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RowId {
    Num(u64),
    Str(String),
}

impl From<u64> for RowId {
    fn from(id: u64) -> Self {
        RowId::Num(id)
    }
}

impl From<&str> for RowId {
    fn from(id: &str) -> Self {
        RowId::Str(id.to_string())
    }
}

/// Tag for rows that exist on only one side of a comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mark {
    Added,
    Removed,
}

/// One profiling sample — the atomic unit of the ranked table.
///
/// Costs are in the dataset's [`ValueUnit`](crate::model::ValueUnit).
/// `baseline`/`comparison`/`mark`/`diff` are filled by
/// [`compare_datasets`](crate::views::compare_datasets) and absent otherwise;
/// `diff` is computed once there and stored, never recomputed per render.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableRow {
    /// Unique id within one dataset snapshot.
    pub id: RowId,
    /// Display label (function name, source location, etc.).
    pub name: String,
    /// Cost attributed directly to this row, excluding callees.
    #[serde(rename = "self")]
    pub self_value: f64,
    /// Cost including all descendant calls; always >= `self`.
    pub total: f64,
    /// Baseline-side cost, comparison mode only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub baseline: Option<f64>,
    /// Comparison-side cost, comparison mode only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comparison: Option<f64>,
    /// Set when the row exists on only one side of a comparison.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mark: Option<Mark>,
    /// Signed fractional change `(comparison - baseline) / baseline`.
    /// Meaningful only when both sides are present and `mark` is absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diff: Option<f64>,
    /// Deterministic palette color for this row's name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Swatch>,
}

/// Per-row contract violation. Local to the offending row — the rest of the
/// dataset keeps ranking.
#[derive(Debug, Error)]
pub enum InvalidRowError {
    #[error("row name is empty")]
    EmptyName,
    #[error("{field} is negative: {value}")]
    NegativeCost { field: &'static str, value: f64 },
    #[error("{field} is not a finite number")]
    NonFiniteCost { field: &'static str },
    #[error("total {total} is less than self {self_value}")]
    TotalBelowSelf { total: f64, self_value: f64 },
    #[error("row does not decode: {0}")]
    Undecodable(String),
}

impl TableRow {
    pub fn new(id: impl Into<RowId>, name: impl Into<String>, self_value: f64, total: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            self_value,
            total,
            baseline: None,
            comparison: None,
            mark: None,
            diff: None,
            color: None,
        }
    }

    /// Check the cost invariants: non-empty name, finite non-negative costs,
    /// `total >= self`.
    pub fn validate(&self) -> Result<(), InvalidRowError> {
        if self.name.is_empty() {
            return Err(InvalidRowError::EmptyName);
        }

        let costs = [
            ("self", Some(self.self_value)),
            ("total", Some(self.total)),
            ("baseline", self.baseline),
            ("comparison", self.comparison),
        ];
        for (field, value) in costs {
            let Some(value) = value else { continue };
            if !value.is_finite() {
                return Err(InvalidRowError::NonFiniteCost { field });
            }
            if value < 0.0 {
                return Err(InvalidRowError::NegativeCost { field, value });
            }
        }

        if self.total < self.self_value {
            return Err(InvalidRowError::TotalBelowSelf {
                total: self.total,
                self_value: self.self_value,
            });
        }

        Ok(())
    }

    /// Categorical color decision for the Diff column.
    pub fn diff_class(&self) -> DiffClass {
        match self.mark {
            Some(Mark::Added) => DiffClass::Added,
            Some(Mark::Removed) => DiffClass::Removed,
            None => match self.diff {
                Some(d) if d > 0.0 => DiffClass::Regression,
                Some(d) if d < 0.0 => DiffClass::Improvement,
                _ => DiffClass::Unchanged,
            },
        }
    }

    /// Display string for the Diff column: the mark word, `0%`, or the
    /// fractional change as a percentage.
    pub fn diff_label(&self) -> String {
        match self.mark {
            Some(Mark::Added) => "added".to_string(),
            Some(Mark::Removed) => "removed".to_string(),
            None => match self.diff {
                Some(d) if d != 0.0 => format!("{:.2}%", d * 100.0),
                _ => "0%".to_string(),
            },
        }
    }
}

/// How the Diff column should be styled: a cost that grew is a regression
/// (red), one that shrank an improvement (green), no change grey.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiffClass {
    Regression,
    Improvement,
    Unchanged,
    Added,
    Removed,
}

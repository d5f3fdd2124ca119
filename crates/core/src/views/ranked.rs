use tracing::debug;

use crate::color::assign_colors;
use crate::model::{
    Mark, Maxima, SortDirection, SortKey, SortSpec, TableDataset, TableRow, ValueUnit,
};

/// Minimum visible width for a non-zero proportional bar.
const MIN_BAR_WIDTH: f64 = 2.0;

/// An immutable ranked snapshot: filtered + sorted rows plus the scale data
/// the caller needs for proportional bars.
///
/// Holds no independent state; recompute it synchronously whenever the
/// dataset, filter keyword, or sort spec change.
#[derive(Debug, Clone, serde::Serialize)]
pub struct RankedView {
    pub rows: Vec<TableRow>,
    /// Maximum self cost across the *unfiltered* dataset.
    pub max_self: f64,
    /// Maximum total cost across the *unfiltered* dataset.
    pub max_total: f64,
    pub unit: ValueUnit,
}

/// Hover detail for one row, formatted against the view's unit.
#[derive(Debug, Clone, serde::Serialize)]
pub struct RowSummary {
    pub name: String,
    pub self_text: String,
    pub total_text: String,
    /// Self cost relative to the view's top row.
    pub self_percent: String,
    /// Total cost relative to the view's top row.
    pub total_percent: String,
    pub baseline_text: Option<String>,
    pub comparison_text: Option<String>,
    pub diff_label: String,
}

/// Build the ranked table for one input state: filter, assign colors, sort.
///
/// Maxima always come from the unfiltered dataset so bar scale is stable
/// while the user types a search keyword.
pub fn ranked_view(dataset: &TableDataset, keyword: &str, spec: SortSpec) -> RankedView {
    let Maxima {
        max_self,
        max_total,
    } = dataset.maxima();

    let mut rows = filter_rows(&dataset.rows, keyword);
    assign_colors(&mut rows);
    sort_rows(&mut rows, spec);

    debug!(
        total = dataset.rows.len(),
        shown = rows.len(),
        ?spec,
        "ranked view recomputed"
    );

    RankedView {
        rows,
        max_self,
        max_total,
        unit: dataset.unit,
    }
}

/// Case-insensitive substring filter on the row name. An empty keyword keeps
/// every row in its original order.
pub fn filter_rows(rows: &[TableRow], keyword: &str) -> Vec<TableRow> {
    if keyword.is_empty() {
        return rows.to_vec();
    }
    let needle = keyword.to_lowercase();
    rows.iter()
        .filter(|row| row.name.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

/// Stable sort on the spec'd column.
///
/// `Direction::None` leaves the natural (insertion) order untouched, and
/// sorting is never cumulative: each call starts from whatever snapshot the
/// caller passes in. Descending reverses the comparison rather than the
/// sorted output, so tie groups keep their original relative order in both
/// directions.
pub fn sort_rows(rows: &mut [TableRow], spec: SortSpec) {
    if spec.direction == SortDirection::None {
        return;
    }

    rows.sort_by(|a, b| {
        let ordering = match spec.key {
            SortKey::Name => a.name.cmp(&b.name),
            SortKey::SelfValue => a.self_value.total_cmp(&b.self_value),
            SortKey::Total => a.total.total_cmp(&b.total),
            SortKey::Baseline => a
                .baseline
                .unwrap_or(0.0)
                .total_cmp(&b.baseline.unwrap_or(0.0)),
            SortKey::Comparison => a
                .comparison
                .unwrap_or(0.0)
                .total_cmp(&b.comparison.unwrap_or(0.0)),
            SortKey::Diff => diff_rank(a).total_cmp(&diff_rank(b)),
        };
        match spec.direction {
            SortDirection::Descending => ordering.reverse(),
            _ => ordering,
        }
    });
}

/// Numeric rank for the Diff column. Added rows grew out of a zero baseline,
/// so they outrank any finite ratio; removed rows sort below any shrinkage.
fn diff_rank(row: &TableRow) -> f64 {
    match row.mark {
        Some(Mark::Added) => f64::INFINITY,
        Some(Mark::Removed) => f64::NEG_INFINITY,
        None => row.diff.unwrap_or(0.0),
    }
}

/// Percentage display with a guarded denominator: a zero or degenerate total
/// yields `"0.00%"`, never NaN.
pub fn percent_of(value: f64, total: f64) -> String {
    if total == 0.0 {
        return "0.00%".to_string();
    }
    let ratio = value / total * 100.0;
    if !ratio.is_finite() {
        return "0.00%".to_string();
    }
    format!("{ratio:.2}%")
}

/// Width of a proportional cell bar in the caller's units.
///
/// Non-zero values keep a minimum visible width; a zero maximum means no
/// scaling is possible and every bar is zero wide.
pub fn bar_width(value: f64, max: f64, column_width: f64) -> f64 {
    if max <= 0.0 || value <= 0.0 {
        return 0.0;
    }
    let width = (value / max) * column_width;
    width.clamp(MIN_BAR_WIDTH.min(column_width), column_width)
}

impl RankedView {
    /// Hover detail for the row at `index`. Percentages are relative to the
    /// view's top row.
    pub fn summary(&self, index: usize) -> Option<RowSummary> {
        let row = self.rows.get(index)?;
        let top = self.rows.first()?;
        Some(RowSummary {
            name: row.name.clone(),
            self_text: self.unit.format_value(row.self_value),
            total_text: self.unit.format_value(row.total),
            self_percent: percent_of(row.self_value, top.self_value),
            total_percent: percent_of(row.total, top.total),
            baseline_text: row.baseline.map(|v| self.unit.format_value(v)),
            comparison_text: row.comparison.map(|v| self.unit.format_value(v)),
            diff_label: row.diff_label(),
        })
    }
}

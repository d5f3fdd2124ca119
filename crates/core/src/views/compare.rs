use std::collections::HashMap;

use tracing::debug;

use crate::model::{Mark, RowId, TableDataset, TableRow};

/// Outcome of diffing one row's two costs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DiffOutcome {
    /// Fractional change relative to the baseline.
    Changed(f64),
    /// Grew out of a zero baseline — tagged, not a ratio.
    Added,
}

/// Fractional change between a baseline and a comparison cost.
///
/// A positive baseline yields `(comparison - baseline) / baseline`. A zero
/// baseline with a non-zero comparison is an addition, not a ratio — there is
/// no division by zero here. Two zeros diff to zero. Pure: same inputs, same
/// outcome.
pub fn compute_diff(baseline: f64, comparison: f64) -> DiffOutcome {
    if baseline > 0.0 {
        DiffOutcome::Changed((comparison - baseline) / baseline)
    } else if comparison > 0.0 {
        DiffOutcome::Added
    } else {
        DiffOutcome::Changed(0.0)
    }
}

/// Align two dataset snapshots by row name and produce the merged comparison
/// dataset.
///
/// Shared names get a stored `diff`; names on only one side get a `mark`.
/// Row order follows the baseline, with comparison-only rows appended in
/// their incoming order. Merged rows carry fresh sequential ids (the two
/// snapshots' ids may collide) and the comparison side's `self`/`total`, so
/// the normal columns still render; removed rows keep the baseline's with a
/// zero comparison. The diff is computed once here and treated as stable data
/// from then on.
pub fn compare_datasets(baseline: &TableDataset, comparison: &TableDataset) -> TableDataset {
    // First occurrence wins on duplicate names within a snapshot.
    let mut unmatched: HashMap<&str, &TableRow> = HashMap::new();
    for row in comparison.rows.iter().rev() {
        unmatched.insert(row.name.as_str(), row);
    }

    let mut rows: Vec<TableRow> = Vec::with_capacity(baseline.rows.len());

    for base in &baseline.rows {
        let id = rows.len() as u64;
        match unmatched.remove(base.name.as_str()) {
            Some(current) => {
                let (diff, mark) = match compute_diff(base.total, current.total) {
                    DiffOutcome::Changed(d) => (Some(d), None),
                    DiffOutcome::Added => (None, Some(Mark::Added)),
                };
                rows.push(merged_row(
                    id,
                    &base.name,
                    current.self_value,
                    current.total,
                    base.total,
                    current.total,
                    mark,
                    diff,
                ));
            }
            None => {
                rows.push(merged_row(
                    id,
                    &base.name,
                    base.self_value,
                    base.total,
                    base.total,
                    0.0,
                    Some(Mark::Removed),
                    None,
                ));
            }
        }
    }

    for current in &comparison.rows {
        if unmatched.remove(current.name.as_str()).is_none() {
            continue;
        }
        let id = rows.len() as u64;
        let (diff, mark) = match compute_diff(0.0, current.total) {
            DiffOutcome::Changed(d) => (Some(d), None),
            DiffOutcome::Added => (None, Some(Mark::Added)),
        };
        rows.push(merged_row(
            id,
            &current.name,
            current.self_value,
            current.total,
            0.0,
            current.total,
            mark,
            diff,
        ));
    }

    debug!(
        baseline = baseline.rows.len(),
        comparison = comparison.rows.len(),
        merged = rows.len(),
        "datasets compared"
    );

    TableDataset::new(comparison.unit, rows)
}

#[allow(clippy::too_many_arguments)]
fn merged_row(
    id: u64,
    name: &str,
    self_value: f64,
    total: f64,
    baseline: f64,
    comparison: f64,
    mark: Option<Mark>,
    diff: Option<f64>,
) -> TableRow {
    TableRow {
        id: RowId::Num(id),
        name: name.to_string(),
        self_value,
        total,
        baseline: Some(baseline),
        comparison: Some(comparison),
        mark,
        diff,
        color: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ValueUnit;

    fn dataset(rows: Vec<TableRow>) -> TableDataset {
        TableDataset::new(ValueUnit::Nanoseconds, rows)
    }

    fn find<'a>(data: &'a TableDataset, name: &str) -> &'a TableRow {
        data.rows
            .iter()
            .find(|r| r.name == name)
            .unwrap_or_else(|| panic!("row {name} missing"))
    }

    #[test]
    fn compute_diff_is_pure_and_signed() {
        assert_eq!(compute_diff(10.0, 5.0), DiffOutcome::Changed(-0.5));
        assert_eq!(compute_diff(10.0, 20.0), DiffOutcome::Changed(1.0));
        assert_eq!(compute_diff(10.0, 10.0), DiffOutcome::Changed(0.0));
        // Repeated calls agree.
        assert_eq!(compute_diff(10.0, 5.0), compute_diff(10.0, 5.0));
    }

    #[test]
    fn zero_baseline_with_growth_is_added_not_a_ratio() {
        assert_eq!(compute_diff(0.0, 5.0), DiffOutcome::Added);
        assert_eq!(compute_diff(0.0, 0.0), DiffOutcome::Changed(0.0));
    }

    #[test]
    fn shared_rows_get_a_stored_diff() {
        let merged = compare_datasets(
            &dataset(vec![TableRow::new(1, "foo", 5.0, 10.0)]),
            &dataset(vec![TableRow::new(9, "foo", 2.0, 5.0)]),
        );
        let foo = find(&merged, "foo");
        assert_eq!(foo.baseline, Some(10.0));
        assert_eq!(foo.comparison, Some(5.0));
        assert_eq!(foo.diff, Some(-0.5));
        assert!(foo.mark.is_none());
        assert_eq!(foo.diff_label(), "-50.00%");
        // Normal columns show the comparison side.
        assert!((foo.total - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn one_sided_rows_get_marks() {
        let merged = compare_datasets(
            &dataset(vec![TableRow::new(1, "gone", 1.0, 4.0)]),
            &dataset(vec![TableRow::new(2, "fresh", 2.0, 6.0)]),
        );
        assert_eq!(merged.len(), 2);

        let gone = find(&merged, "gone");
        assert_eq!(gone.mark, Some(Mark::Removed));
        assert_eq!(gone.baseline, Some(4.0));
        assert_eq!(gone.comparison, Some(0.0));
        assert!(gone.diff.is_none());

        let fresh = find(&merged, "fresh");
        assert_eq!(fresh.mark, Some(Mark::Added));
        assert_eq!(fresh.baseline, Some(0.0));
        assert_eq!(fresh.comparison, Some(6.0));
        assert!(fresh.diff.is_none());
    }

    #[test]
    fn baseline_zero_total_on_shared_name_is_added() {
        let merged = compare_datasets(
            &dataset(vec![TableRow::new(1, "foo", 0.0, 0.0)]),
            &dataset(vec![TableRow::new(1, "foo", 2.0, 5.0)]),
        );
        let foo = find(&merged, "foo");
        assert_eq!(foo.mark, Some(Mark::Added));
        assert!(foo.diff.is_none());
    }

    #[test]
    fn order_is_baseline_then_new_rows() {
        let merged = compare_datasets(
            &dataset(vec![
                TableRow::new(1, "a", 1.0, 1.0),
                TableRow::new(2, "b", 1.0, 1.0),
            ]),
            &dataset(vec![
                TableRow::new(1, "c", 1.0, 1.0),
                TableRow::new(2, "b", 1.0, 1.0),
                TableRow::new(3, "d", 1.0, 1.0),
            ]),
        );
        let names: Vec<_> = merged.rows.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn merged_ids_are_fresh_and_unique() {
        let merged = compare_datasets(
            &dataset(vec![
                TableRow::new(7, "a", 1.0, 1.0),
                TableRow::new(7, "b", 1.0, 1.0),
            ]),
            &dataset(vec![TableRow::new(7, "c", 1.0, 1.0)]),
        );
        let ids: Vec<_> = merged.rows.iter().map(|r| r.id.clone()).collect();
        assert_eq!(
            ids,
            vec![RowId::Num(0), RowId::Num(1), RowId::Num(2)]
        );
    }

    #[test]
    fn empty_sides_still_merge() {
        let merged = compare_datasets(
            &dataset(vec![]),
            &dataset(vec![TableRow::new(1, "only", 1.0, 2.0)]),
        );
        assert_eq!(merged.len(), 1);
        assert_eq!(find(&merged, "only").mark, Some(Mark::Added));

        let merged = compare_datasets(&dataset(vec![]), &dataset(vec![]));
        assert!(merged.is_empty());
    }
}

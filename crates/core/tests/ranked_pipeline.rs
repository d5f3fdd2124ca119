//! Integration test: ingest two query payloads, merge them into a comparison
//! dataset, and drive the ranked view through filter and sort changes the way
//! an interactive caller would.

use hotseat_core::model::{Mark, SortDirection, SortKey, SortSpec, ValueUnit};
use hotseat_core::views::{compare_datasets, ranked_view};
use hotseat_core::{DiffClass, parse_table_payload};

#[test]
fn ingest_compare_and_rank_end_to_end() {
    let baseline_payload = include_bytes!("fixtures/cpu_baseline.json");
    let current_payload = include_bytes!("fixtures/cpu_current.json");

    // Ingest both snapshots. The baseline fixture carries one row with an
    // inverted cost invariant; it must be reported and skipped, not fatal.
    let (baseline, rejected) =
        parse_table_payload(baseline_payload).expect("baseline payload should parse");
    assert_eq!(baseline.unit, ValueUnit::Nanoseconds);
    assert_eq!(rejected.len(), 1, "exactly the corrupt row is rejected");
    assert_eq!(rejected[0].index, 5);
    assert_eq!(baseline.len(), 5);
    assert!(baseline.rows.iter().all(|r| r.name != "corrupt.sample"));

    let (current, rejected) =
        parse_table_payload(current_payload).expect("current payload should parse");
    assert!(rejected.is_empty());
    assert_eq!(current.len(), 5);

    // Merge into one comparison dataset.
    let merged = compare_datasets(&baseline, &current);
    assert_eq!(merged.len(), 6);
    println!(
        "merged {} baseline + {} current rows into {}",
        baseline.len(),
        current.len(),
        merged.len()
    );

    let row = |name: &str| {
        merged
            .rows
            .iter()
            .find(|r| r.name == name)
            .unwrap_or_else(|| panic!("merged dataset should contain {name}"))
    };

    // mallocgc halved: improvement. Marshal doubled: regression.
    let mallocgc = row("runtime.mallocgc");
    assert_eq!(mallocgc.diff, Some(-0.5));
    assert_eq!(mallocgc.diff_class(), DiffClass::Improvement);
    assert_eq!(mallocgc.diff_label(), "-50.00%");

    let marshal = row("encoding/json.Marshal");
    assert_eq!(marshal.diff, Some(1.0));
    assert_eq!(marshal.diff_class(), DiffClass::Regression);
    assert_eq!(marshal.diff_label(), "100.00%");

    assert_eq!(row("net/http.(*conn).serve").diff, Some(0.0));
    assert_eq!(row("net/http.(*conn).serve").diff_label(), "0%");

    assert_eq!(row("render.legacyTemplate").mark, Some(Mark::Removed));
    assert_eq!(row("render.templateFast").mark, Some(Mark::Added));

    // Rank by diff, worst first: the added row outranks every finite ratio,
    // the removed row sinks below every shrinkage.
    let view = ranked_view(
        &merged,
        "",
        SortSpec {
            key: SortKey::Diff,
            direction: SortDirection::Descending,
        },
    );
    let names: Vec<_> = view.rows.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names[0], "render.templateFast");
    assert_eq!(names[1], "encoding/json.Marshal");
    assert_eq!(names[5], "render.legacyTemplate");

    // The filter narrows the rows but never the bar scale.
    let filtered = ranked_view(
        &merged,
        "RENDER.",
        SortSpec {
            key: SortKey::Diff,
            direction: SortDirection::Descending,
        },
    );
    let names: Vec<_> = filtered.rows.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["render.templateFast", "render.legacyTemplate"]);
    assert_eq!(filtered.max_total, view.max_total);

    // Every visible row carries a deterministic swatch; the same name maps to
    // the same color in both views.
    let swatch = |rows: &[hotseat_core::TableRow], name: &str| {
        rows.iter()
            .find(|r| r.name == name)
            .and_then(|r| r.color)
            .unwrap_or_else(|| panic!("{name} should have a color"))
    };
    assert_eq!(
        swatch(&view.rows, "render.templateFast"),
        swatch(&filtered.rows, "render.templateFast"),
    );

    // Hover summary of the top row formats against the dataset unit.
    let summary = view.summary(0).expect("top row summary");
    assert_eq!(summary.name, "render.templateFast");
    assert_eq!(summary.diff_label, "added");
    assert_eq!(summary.comparison_text.as_deref(), Some("300µs"));

    println!("top regression: {} ({})", names[0], summary.diff_label);
}

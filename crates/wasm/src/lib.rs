use std::sync::Mutex;

use hotseat_core::model::{SortDirection, SortKey, SortSpec, TableDataset};
use hotseat_core::views::{compare_datasets, ranked_view};
use wasm_bindgen::prelude::*;

static DATASETS: Mutex<Vec<TableDataset>> = Mutex::new(Vec::new());

/// Parse a dataset payload from bytes (JSON). Returns a handle (index) for
/// later use. Malformed rows are dropped, matching the ingest policy.
#[wasm_bindgen]
pub fn load_dataset(data: &[u8]) -> Result<usize, JsError> {
    let (dataset, _rejected) =
        hotseat_core::parse_table_payload(data).map_err(|e| JsError::new(&e.to_string()))?;
    let mut datasets = DATASETS.lock().unwrap();
    let idx = datasets.len();
    datasets.push(dataset);
    Ok(idx)
}

/// Merge two loaded datasets into a comparison dataset. Returns a new handle.
#[wasm_bindgen]
pub fn compare_loaded(baseline: usize, comparison: usize) -> Result<usize, JsError> {
    let mut datasets = DATASETS.lock().unwrap();
    let base = datasets
        .get(baseline)
        .ok_or_else(|| JsError::new("invalid baseline handle"))?;
    let current = datasets
        .get(comparison)
        .ok_or_else(|| JsError::new("invalid comparison handle"))?;
    let merged = compare_datasets(base, current);
    let idx = datasets.len();
    datasets.push(merged);
    Ok(idx)
}

/// Build a ranked view of a loaded dataset, returning it as JSON.
///
/// `sort_key` is one of `name`/`self`/`total`/`baseline`/`comparison`/`diff`;
/// `direction` is `none`/`asc`/`desc`.
#[wasm_bindgen]
pub fn ranked_view_json(
    handle: usize,
    filter: &str,
    sort_key: &str,
    direction: &str,
) -> Result<String, JsError> {
    let datasets = DATASETS.lock().unwrap();
    let dataset = datasets
        .get(handle)
        .ok_or_else(|| JsError::new("invalid dataset handle"))?;

    let key: SortKey = match sort_key {
        "name" => SortKey::Name,
        "self" => SortKey::SelfValue,
        "total" => SortKey::Total,
        "baseline" => SortKey::Baseline,
        "comparison" => SortKey::Comparison,
        "diff" => SortKey::Diff,
        _ => return Err(JsError::new(&format!("unknown sort key: {sort_key}"))),
    };
    let direction: SortDirection = match direction {
        "none" => SortDirection::None,
        "asc" => SortDirection::Ascending,
        "desc" => SortDirection::Descending,
        _ => return Err(JsError::new(&format!("unknown direction: {direction}"))),
    };

    let view = ranked_view(dataset, filter, SortSpec { key, direction });
    serde_json::to_string(&view).map_err(|e| JsError::new(&e.to_string()))
}

/// Get the number of rows in a loaded dataset.
#[wasm_bindgen]
pub fn row_count(handle: usize) -> Result<usize, JsError> {
    let datasets = DATASETS.lock().unwrap();
    let dataset = datasets
        .get(handle)
        .ok_or_else(|| JsError::new("invalid dataset handle"))?;
    Ok(dataset.len())
}

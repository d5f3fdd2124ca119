//! Decoding of dataset-change payloads handed over by the query collaborator.

use thiserror::Error;
use tracing::warn;

use crate::model::{InvalidRowError, RejectedRow, TableDataset, TableRow, ValueUnit};

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("payload has neither a row array nor a table_data object")]
    UnknownShape,
}

/// Decode a dataset payload.
///
/// Two shapes are accepted: the query API's response envelope
/// (`{"unit": ..., "table_data": {"items": [...]}}`) and a bare row array.
/// Rows that fail to decode or violate the cost invariants are dropped and
/// reported alongside the dataset — one bad row never aborts the snapshot.
pub fn parse_table_payload(data: &[u8]) -> Result<(TableDataset, Vec<RejectedRow>), IngestError> {
    let value: serde_json::Value = serde_json::from_slice(data)?;

    let (unit, items) = match value {
        serde_json::Value::Array(items) => (ValueUnit::default(), items),
        serde_json::Value::Object(mut obj) => {
            let unit = match obj.remove("unit") {
                Some(u) => serde_json::from_value(u).unwrap_or_default(),
                None => ValueUnit::default(),
            };
            let items = obj
                .remove("table_data")
                .and_then(|mut td| td.get_mut("items").map(serde_json::Value::take))
                .and_then(|items| match items {
                    serde_json::Value::Array(items) => Some(items),
                    _ => None,
                })
                .ok_or(IngestError::UnknownShape)?;
            (unit, items)
        }
        _ => return Err(IngestError::UnknownShape),
    };

    let mut rows = Vec::with_capacity(items.len());
    let mut rejected = Vec::new();
    for (index, item) in items.into_iter().enumerate() {
        match serde_json::from_value::<TableRow>(item) {
            Ok(row) => match row.validate() {
                Ok(()) => rows.push(row),
                Err(error) => rejected.push(RejectedRow { index, error }),
            },
            Err(err) => rejected.push(RejectedRow {
                index,
                error: InvalidRowError::Undecodable(err.to_string()),
            }),
        }
    }

    for reject in &rejected {
        warn!(index = reject.index, error = %reject.error, "dropping malformed row");
    }

    Ok((TableDataset::new(unit, rows), rejected))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_the_response_envelope() {
        let payload = br#"{
            "unit": "nanoseconds",
            "table_data": {
                "items": [
                    {"id": 1, "name": "foo", "self": 10, "total": 20},
                    {"id": 2, "name": "bar", "self": 30, "total": 30}
                ]
            }
        }"#;
        let Ok((dataset, rejected)) = parse_table_payload(payload) else {
            panic!("envelope should parse");
        };
        assert_eq!(dataset.unit, ValueUnit::Nanoseconds);
        assert_eq!(dataset.len(), 2);
        assert!(rejected.is_empty());
        assert_eq!(dataset.rows[0].name, "foo");
    }

    #[test]
    fn parses_a_bare_row_array() {
        let payload = br#"[{"id": "a", "name": "only", "self": 1, "total": 2}]"#;
        let Ok((dataset, rejected)) = parse_table_payload(payload) else {
            panic!("array should parse");
        };
        assert_eq!(dataset.unit, ValueUnit::Nanoseconds);
        assert_eq!(dataset.len(), 1);
        assert!(rejected.is_empty());
    }

    #[test]
    fn bad_rows_are_reported_not_fatal() {
        let payload = br#"{
            "table_data": {
                "items": [
                    {"id": 1, "name": "good", "self": 1, "total": 2},
                    {"id": 2, "name": "inverted", "self": 9, "total": 2},
                    {"id": 3, "name": "broken", "self": "not a number", "total": 2},
                    {"id": 4, "name": "also good", "self": 0, "total": 0}
                ]
            }
        }"#;
        let Ok((dataset, rejected)) = parse_table_payload(payload) else {
            panic!("payload should parse");
        };
        let names: Vec<_> = dataset.rows.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["good", "also good"]);
        assert_eq!(rejected.len(), 2);
        assert_eq!(rejected[0].index, 1);
        assert!(matches!(
            rejected[0].error,
            InvalidRowError::TotalBelowSelf { .. }
        ));
        assert_eq!(rejected[1].index, 2);
        assert!(matches!(rejected[1].error, InvalidRowError::Undecodable(_)));
    }

    #[test]
    fn missing_unit_defaults() {
        let payload = br#"{"table_data": {"items": []}}"#;
        let Ok((dataset, _)) = parse_table_payload(payload) else {
            panic!("payload should parse");
        };
        assert_eq!(dataset.unit, ValueUnit::Nanoseconds);
        assert!(dataset.is_empty());
    }

    #[test]
    fn unknown_shapes_error() {
        assert!(matches!(
            parse_table_payload(br#"{"flame_data": []}"#),
            Err(IngestError::UnknownShape)
        ));
        assert!(matches!(
            parse_table_payload(br#""just a string""#),
            Err(IngestError::UnknownShape)
        ));
        assert!(matches!(
            parse_table_payload(b"not json at all"),
            Err(IngestError::Json(_))
        ));
    }

    #[test]
    fn empty_unit_string_falls_back() {
        let payload = br#"{"unit": "", "table_data": {"items": []}}"#;
        let Ok((dataset, _)) = parse_table_payload(payload) else {
            panic!("payload should parse");
        };
        // An unrecognized unit string downgrades to the catch-all.
        assert_eq!(dataset.unit, ValueUnit::Weight);
    }
}

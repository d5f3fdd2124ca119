use serde::{Deserialize, Serialize};

/// What the cost values in a dataset represent.
///
/// Wire names are lowercase to match the query API payload (`"nanoseconds"`,
/// `"count"`, ...). Anything unrecognized falls back to [`ValueUnit::Weight`]
/// and is formatted as a bare number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueUnit {
    #[default]
    Nanoseconds,
    Microseconds,
    Milliseconds,
    Seconds,
    /// Sample or call counts.
    Count,
    /// Memory in bytes.
    Bytes,
    /// Arbitrary weight (custom profilers).
    #[serde(other)]
    Weight,
}

impl ValueUnit {
    /// Format a cost in this unit for display.
    pub fn format_value(&self, value: f64) -> String {
        match self {
            Self::Nanoseconds => {
                if value >= 1_000_000_000.0 {
                    format!("{:.2}s", value / 1_000_000_000.0)
                } else if value >= 1_000_000.0 {
                    format!("{:.1}ms", value / 1_000_000.0)
                } else if value >= 1_000.0 {
                    format!("{:.0}µs", value / 1_000.0)
                } else {
                    format!("{value:.0}ns")
                }
            }
            Self::Microseconds => {
                if value >= 1_000_000.0 {
                    format!("{:.2}s", value / 1_000_000.0)
                } else if value >= 1_000.0 {
                    format!("{:.1}ms", value / 1_000.0)
                } else {
                    format!("{value:.0}µs")
                }
            }
            Self::Milliseconds => {
                if value >= 1_000.0 {
                    format!("{:.2}s", value / 1_000.0)
                } else {
                    format!("{value:.1}ms")
                }
            }
            Self::Seconds => format!("{value:.2}s"),
            Self::Count => format!("{}", value as u64),
            Self::Bytes => {
                if value >= 1_073_741_824.0 {
                    format!("{:.1} GiB", value / 1_073_741_824.0)
                } else if value >= 1_048_576.0 {
                    format!("{:.1} MiB", value / 1_048_576.0)
                } else if value >= 1_024.0 {
                    format!("{:.1} KiB", value / 1_024.0)
                } else {
                    format!("{} B", value as u64)
                }
            }
            Self::Weight => format!("{value:.0}"),
        }
    }
}

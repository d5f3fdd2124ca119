use serde::{Deserialize, Serialize};

/// Column a ranked view can sort on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    Name,
    #[serde(rename = "self")]
    SelfValue,
    Total,
    Baseline,
    Comparison,
    Diff,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortDirection {
    /// Natural (insertion) order — no sort applied.
    #[default]
    #[serde(rename = "none")]
    None,
    #[serde(rename = "asc")]
    Ascending,
    #[serde(rename = "desc")]
    Descending,
}

/// Current sort choice: at most one active column.
///
/// The caller owns this state and passes it to every recompute; the core
/// itself is stateless per call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl SortSpec {
    /// No sort applied; rows stay in insertion order.
    pub fn unsorted() -> Self {
        Self {
            key: SortKey::Total,
            direction: SortDirection::None,
        }
    }

    /// Column-header click cycle: a fresh column starts ascending, a second
    /// click flips to descending, a third returns to the natural order.
    /// Clicking a different column implicitly resets the previous one.
    pub fn click(&mut self, key: SortKey) {
        if self.key == key {
            self.direction = match self.direction {
                SortDirection::None => SortDirection::Ascending,
                SortDirection::Ascending => SortDirection::Descending,
                SortDirection::Descending => SortDirection::None,
            };
        } else {
            self.key = key;
            self.direction = SortDirection::Ascending;
        }
    }

    /// Back to the natural order, keeping the key. Used when a new dataset
    /// snapshot arrives.
    pub fn reset(&mut self) {
        self.direction = SortDirection::None;
    }

    pub fn is_active(&self) -> bool {
        self.direction != SortDirection::None
    }
}

impl Default for SortSpec {
    fn default() -> Self {
        Self::unsorted()
    }
}

//! hotseat core: ranking and comparison transforms for flat profiling
//! samples.
//!
//! ```text
//!   query payload ──▶ TableDataset ──▶ ranked_view ──▶ RankedView ──▶ caller
//!    (ingest)           │    ▲          (filter +        (rows +      (TUI,
//!                       │    │           stable sort)     maxima)      WASM,
//!                       ▼    │                                         web)
//!                 compare_datasets
//!                   (diff mode)
//! ```
//!
//! The core is stateless per call: the caller owns the current filter keyword
//! and [`SortSpec`] and re-invokes [`ranked_view`] whenever any input changes.
//! Every invocation gets a fresh snapshot and returns a fresh, immutable view.

pub mod color;
pub mod ingest;
pub mod model;
pub mod views;

pub use color::{PALETTE, Swatch, assign_colors, color_for};
pub use ingest::{IngestError, parse_table_payload};
pub use model::{
    DiffClass, InvalidRowError, Mark, Maxima, RejectedRow, RowId, SortDirection, SortKey, SortSpec,
    TableDataset, TableRow, ValueUnit,
};
pub use views::{
    DiffOutcome, RankedView, RowSummary, bar_width, compare_datasets, compute_diff, filter_rows,
    percent_of, ranked_view, sort_rows,
};

pub mod compare;
pub mod ranked;

pub use compare::{DiffOutcome, compare_datasets, compute_diff};
pub use ranked::{
    RankedView, RowSummary, bar_width, filter_rows, percent_of, ranked_view, sort_rows,
};

pub mod dataset;
pub mod row;
pub mod sort;
pub mod unit;

pub use dataset::{Maxima, RejectedRow, TableDataset};
pub use row::{DiffClass, InvalidRowError, Mark, RowId, TableRow};
pub use sort::{SortDirection, SortKey, SortSpec};
pub use unit::ValueUnit;

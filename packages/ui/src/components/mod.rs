//! Reusable widgets drawing the table engine's models.

mod data_table;
pub use data_table::DataTable;

mod pager;
pub use pager::Pager;

mod filter_bar;
pub use filter_bar::{FilterBar, SelectFilter};

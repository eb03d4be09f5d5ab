//! # Generic table engine
//!
//! Screens describe their tables with data, not markup:
//!
//! | Piece | Role |
//! |-------|------|
//! | [`Column`] / [`Action`] | field path + header + formatter; row button + visibility condition |
//! | [`TableView`] | pure `records × columns × actions → rows` description |
//! | [`FilterSet`] | exact-match dropdown filters AND free-text search over a cached list |
//! | [`PaginationState`] | page slicing and the windowed page strip |
//! | [`export`] | CSV text, CSV download, printable report |
//!
//! The Dioxus components that draw these live in [`crate::components`].

mod columns;
pub mod export;
mod filter;
mod pagination;
mod view;

pub use columns::{Action, ActionIcon, Cell, Column};
pub use export::{download_csv, print_table, to_csv, ExportError};
pub use filter::FilterSet;
pub use pagination::{PageItem, PaginationState};
pub use view::{escape_html, RowAction, TableBody, TableRow, TableView, EMPTY_MESSAGE};

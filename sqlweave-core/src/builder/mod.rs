//! Statement builders

pub mod common;
pub mod select;
pub mod insert;
pub mod update;
pub mod delete;

pub use common::{Join, JoinKind, OrderBy, QueryBuilder, SortDirection, Statement};
pub use select::SelectBuilder;
pub use insert::InsertBuilder;
pub use update::{ColumnUpdate, UpdateBuilder};
pub use delete::DeleteBuilder;

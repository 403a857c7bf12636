//! sqlweave - a fluent, dialect-aware SQL statement builder
//!
//! Describe tables, columns and conditions as typed values, accumulate them in
//! a builder, then compile once into SQL text and an ordered parameter list.
//! Nothing is executed; hand the [`Statement`] to whatever driver you use.
//!
//! ```
//! use sqlweave::prelude::*;
//!
//! let u = table("dbo.Users").unwrap().with_alias("u");
//! let statement = select_from(u.clone())
//!     .unwrap()
//!     .select([u.all_columns()])
//!     .where_([Condition::on(u.column("Email"), op::is_equal_to("a@b.com")).unwrap()])
//!     .order_by([OrderBy::asc(u.column("Name")).unwrap()])
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(
//!     statement.text(),
//!     "SELECT u.* FROM dbo.Users u WHERE u.Email = @p0 ORDER BY u.Name ASC"
//! );
//! ```

pub use sqlweave_core::*;

/// Create a SELECT builder over the given table
pub fn select_from(source: TableId) -> Result<SelectBuilder> {
    SelectBuilder::new(source)
}

/// Create an INSERT builder for columns of a single table
pub fn insert_into<I>(columns: I) -> Result<InsertBuilder>
where
    I: IntoIterator<Item = ColumnId>,
{
    InsertBuilder::new(columns)
}

/// Create an UPDATE builder for the given table
pub fn update(source: TableId) -> Result<UpdateBuilder> {
    UpdateBuilder::new(source)
}

/// Create a DELETE builder for the given table
pub fn delete_from(source: TableId) -> Result<DeleteBuilder> {
    DeleteBuilder::new(source)
}

/// Parse a `table` or `schema.table` identifier
///
/// # Examples
///
/// ```
/// use sqlweave::table;
///
/// let users = table("dbo.Users").unwrap().with_alias("u");
/// assert_eq!(users.to_string(), "dbo.Users u");
/// ```
pub fn table(identifier: &str) -> Result<TableId> {
    TableId::new(identifier)
}

/// Column of a table, shorthand for [`TableId::column`]
pub fn col(table: &TableId, name: &str) -> ColumnId {
    table.column(name)
}

/// Everything needed to build statements with a single import
pub mod prelude {
    pub use crate::{col, delete_from, insert_into, select_from, table, update};
    pub use sqlweave_core::{
        op, ColumnId, ColumnUpdate, Condition, ConditionGroup, Dialect, Join, JoinKind, OrderBy,
        QueryBuilder, SortDirection, Statement, TableId, Value,
    };
}

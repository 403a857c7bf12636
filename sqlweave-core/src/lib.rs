//! sqlweave core - a dialect-agnostic SQL statement builder
//!
//! Statements are described with typed table, column and condition values,
//! accumulated by fluent builders, and compiled on `build()` into SQL text
//! plus an ordered parameter list. Vendor syntax lives in a [`Dialect`]
//! table rather than in the builders.

pub mod error;
pub mod ident;
pub mod value;
pub mod param;
pub mod operator;
pub mod condition;
pub mod dialect;
pub mod builder;

// Re-export main types
pub use error::{Error, Result};
pub use ident::{ColumnId, Identifier, TableId};
pub use value::Value;
pub use param::{Parameter, ParameterList};
pub use operator::{op, Comparison, ConditionalOperator, IntoComparison};
pub use condition::{logical, Condition, ConditionGroup, OperatorCondition};
pub use dialect::{Dialect, IdentifierQuoting, Keyword, PagingStyle, PlaceholderStyle};
pub use builder::{
    ColumnUpdate, DeleteBuilder, InsertBuilder, Join, JoinKind, OrderBy, QueryBuilder,
    SelectBuilder, SortDirection, Statement, UpdateBuilder,
};

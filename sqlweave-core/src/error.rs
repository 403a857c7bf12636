//! Error types for sqlweave

use thiserror::Error;

/// The main error type for statement construction and compilation
#[derive(Error, Debug)]
pub enum Error {
    /// A dotted identifier did not split into `table` or `schema.table`
    #[error("Malformed identifier '{identifier}': expected 'table' or 'schema.table', found {parts} parts")]
    MalformedIdentifier { identifier: String, parts: usize },

    /// A serialized identifier was blank after trimming
    #[error("Identifier must not be blank")]
    BlankIdentifier,

    /// A table identifier has no table name
    #[error("Missing table name for {argument}")]
    MissingTableName { argument: String },

    /// An alias reference was built from a blank alias
    #[error("Missing alias for table reference")]
    MissingAlias,

    /// A column used outside a selection has no name
    #[error("Missing column name for {argument}")]
    MissingColumnName { argument: String },

    /// A column that must be table-qualified has no table
    #[error("Missing table for column {argument}")]
    MissingColumnTable { argument: String },

    /// A condition group was built without children
    #[error("Condition group requires at least one condition")]
    EmptyConditionGroup,

    /// A condition group was built with a blank logical operator
    #[error("Condition group requires a logical operator")]
    MissingOperator,

    /// An IN / NOT IN operator was given no values
    #[error("{argument} requires at least one value")]
    EmptyValueList { argument: String },

    /// INSERT was constructed without columns
    #[error("INSERT requires at least one column")]
    EmptyColumnList,

    /// INSERT columns reference more than one table
    #[error("INSERT columns must target one table: columns[{index}] targets '{found}', expected '{expected}'")]
    MultipleTargetTables {
        index: usize,
        expected: String,
        found: String,
    },

    /// An INSERT row was added without any cells
    #[error("INSERT row {row} contains no values")]
    EmptyRow { row: usize },

    /// An INSERT row does not line up with the column list
    #[error("INSERT row {row} has {found} values, expected {expected}")]
    RowLengthMismatch {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// INSERT was built before any row was added
    #[error("INSERT requires at least one row of values")]
    NoRowsToInsert,

    /// UPDATE was built before any SET column was added
    #[error("UPDATE requires at least one SET column")]
    NoColumnsToUpdate,

    /// Dialect configuration could not be (de)serialized
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Convenience Result type for sqlweave operations
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a new missing table name error
    pub fn missing_table_name(argument: impl Into<String>) -> Self {
        Self::MissingTableName {
            argument: argument.into(),
        }
    }

    /// Create a new missing column name error
    pub fn missing_column_name(argument: impl Into<String>) -> Self {
        Self::MissingColumnName {
            argument: argument.into(),
        }
    }

    /// Create a new missing column table error
    pub fn missing_column_table(argument: impl Into<String>) -> Self {
        Self::MissingColumnTable {
            argument: argument.into(),
        }
    }

    /// Create a new empty value list error
    pub fn empty_value_list(argument: impl Into<String>) -> Self {
        Self::EmptyValueList {
            argument: argument.into(),
        }
    }

    /// Whether the error can only surface from `build()`
    pub fn is_build_error(&self) -> bool {
        matches!(self, Self::NoRowsToInsert | Self::NoColumnsToUpdate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_identifier_message() {
        let err = Error::MalformedIdentifier {
            identifier: "a.b.c".to_string(),
            parts: 3,
        };
        assert_eq!(
            err.to_string(),
            "Malformed identifier 'a.b.c': expected 'table' or 'schema.table', found 3 parts"
        );
    }

    #[test]
    fn test_missing_column_name_carries_argument() {
        let err = Error::missing_column_name("columns[2]");
        assert!(matches!(err, Error::MissingColumnName { .. }));
        assert_eq!(err.to_string(), "Missing column name for columns[2]");
    }

    #[test]
    fn test_missing_column_table_carries_argument() {
        let err = Error::missing_column_table("right");
        assert_eq!(err.to_string(), "Missing table for column right");
    }

    #[test]
    fn test_multiple_target_tables_message() {
        let err = Error::MultipleTargetTables {
            index: 1,
            expected: "dbo.Users".to_string(),
            found: "dbo.Roles".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "INSERT columns must target one table: columns[1] targets 'dbo.Roles', expected 'dbo.Users'"
        );
    }

    #[test]
    fn test_build_errors() {
        assert!(Error::NoRowsToInsert.is_build_error());
        assert!(Error::NoColumnsToUpdate.is_build_error());
        assert!(!Error::EmptyColumnList.is_build_error());
        assert!(!Error::EmptyRow { row: 0 }.is_build_error());
        assert!(!Error::BlankIdentifier.is_build_error());
    }

    #[test]
    fn test_serialization_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(err, Error::Serialization(_)));
        assert!(err.to_string().starts_with("Serialization error:"));
    }
}
